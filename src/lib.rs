//! A queue of named items that yields them in a biased random rotation.
//!
//! Each `get` draws the front item and puts it back somewhere behind it, usually deep in the back of the queue. Recently drawn items therefore tend not to recur soon, items marked rare recur markedly less often, and the exact order never settles into a fixed cycle.
//!
//! # Example
//!
//! ```rust
//! use random_pqueue::RandomPQueue;
//!
//! let mut breakfasts = RandomPQueue::new();
//! for name in ["Toast", "Oatmeal", "Eggs", "Pancakes", "Yogurt", "Fruit"] {
//!   breakfasts.add(name);
//! }
//! breakfasts.add_rare("Waffles", true);
//!
//! for (day, meal) in breakfasts.draws().take(14).enumerate() {
//!   println!("Day {}: {meal}", day + 1);
//! }
//! assert_eq!(breakfasts.len(), 7);
//! ```

pub mod error;
pub mod queue;
pub mod shared;
pub mod tuning;

pub use error::GetTimeoutError;
pub use error::RandomPQueueError;
pub use queue::Draws;
pub use queue::Item;
pub use queue::RandomPQueue;
pub use shared::SharedRandomPQueue;
pub use tuning::Tuning;
pub use tuning::TuningError;
