use crate::error::RandomPQueueError;
use crate::tuning::Tuning;
use crate::tuning::TuningError;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use std::collections::VecDeque;
use std::fmt;
use std::fmt::Debug;
use std::fmt::Formatter;
use tracing::debug;
use tracing::trace;

fn normalize(name: &str) -> String {
  name.to_lowercase()
}

/// An entry in the queue. Its rarity is fixed when it is added.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
  name: String,
  rare: bool,
}

impl Item {
  /// The lowercased name.
  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn is_rare(&self) -> bool {
    self.rare
  }
}

/// A queue of uniquely named items that are drawn from the front and put back somewhere behind it.
///
/// Drawn items usually land in the back ~42% of the queue, so recently drawn items tend not to come up again soon. Rare items are always put back at the very end and are added into the back half, so they come up less often than ordinary items. Where exactly an item lands is random, which keeps the rotation from settling into a fixed cycle.
///
/// Names are compared case-insensitively and stored lowercased.
pub struct RandomPQueue<R = StdRng> {
  items: VecDeque<Item>,
  rng: R,
  tuning: Tuning,
}

impl RandomPQueue<StdRng> {
  /// Create a queue with an initial capacity, seeding its generator from OS entropy.
  pub fn with_capacity(cap: usize) -> Self {
    Self {
      items: VecDeque::with_capacity(cap),
      rng: StdRng::from_entropy(),
      tuning: Tuning::default(),
    }
  }

  /// Create a queue, seeding its generator from OS entropy.
  pub fn new() -> Self {
    Self::with_capacity(0)
  }
}

impl Default for RandomPQueue<StdRng> {
  fn default() -> Self {
    Self::new()
  }
}

impl<R> RandomPQueue<R> {
  /// Get the amount of items in the queue.
  pub fn len(&self) -> usize {
    self.items.len()
  }

  /// Checks whether or not the queue has no items.
  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn tuning(&self) -> &Tuning {
    &self.tuning
  }

  fn position(&self, normalized: &str) -> Option<usize> {
    self.items.iter().position(|item| item.name == normalized)
  }

  /// Checks whether an item with this name (ignoring case) is in the queue.
  pub fn contains(&self, name: &str) -> bool {
    self.position(&normalize(name)).is_some()
  }

  /// Returns whether the named item is rare, or None if it isn't in the queue.
  pub fn is_rare(&self, name: &str) -> Option<bool> {
    self.position(&normalize(name)).map(|i| self.items[i].rare)
  }

  /// Iterate over the items in draw order along with their index. Index 0 is drawn next.
  pub fn entries(&self) -> impl Iterator<Item = (usize, &Item)> + '_ {
    self.items.iter().enumerate()
  }

  /// Emit the current order as debug events.
  pub fn log_entries(&self) {
    for (index, item) in self.entries() {
      debug!(index, name = %item.name, rare = item.rare, "queue entry");
    }
  }
}

impl<R: Rng> RandomPQueue<R> {
  /// Create an empty queue that draws its randomness from `rng`. Pass a seeded generator for reproducible orders.
  pub fn with_rng(rng: R) -> Self {
    Self {
      items: VecDeque::new(),
      rng,
      tuning: Tuning::default(),
    }
  }

  /// Like `with_rng`, but with custom heuristic parameters. Fails if `tuning` would make any draw range empty.
  pub fn with_tuning(tuning: Tuning, rng: R) -> Result<Self, TuningError> {
    tuning.validate()?;
    Ok(Self {
      items: VecDeque::new(),
      rng,
      tuning,
    })
  }

  /// Adds an ordinary item. See `add_rare`.
  pub fn add(&mut self, name: &str) -> bool {
    self.add_rare(name, false)
  }

  /// Adds an item at a random position, returning whether it was admitted. Empty names and names already present are silently ignored.
  ///
  /// Ordinary items may land anywhere, including the end. Rare items land in the back half.
  pub fn add_rare(&mut self, name: &str, rare: bool) -> bool {
    let name = normalize(name);
    if name.is_empty() || self.position(&name).is_some() {
      debug!(%name, "ignoring empty or duplicate name");
      return false;
    };
    let len = self.items.len();
    let floor = if rare { self.tuning.rare_floor(len) } else { 0 };
    let index = self.rng.gen_range(floor..=len);
    debug!(%name, rare, index, "adding item");
    self.items.insert(index, Item { name, rare });
    true
  }

  /// Draws the front item and puts it back further down the queue, returning its name. The length doesn't change.
  pub fn get(&mut self) -> Result<String, RandomPQueueError> {
    let Some(item) = self.items.pop_front() else {
      return Err(RandomPQueueError::EmptyQueue);
    };
    let index = self.reinsert_index(item.rare);
    let name = item.name.clone();
    self.items.insert(index, item);
    Ok(name)
  }

  /// Picks where a just-drawn item goes, given the queue without it.
  fn reinsert_index(&mut self, rare: bool) -> usize {
    let n = self.items.len();
    if n < self.tuning.tiny_queue_threshold || rare {
      trace!(n, rare, index = n, "appending drawn item");
      return n;
    };
    // Occasionally jump into the front half so the rotation never becomes periodic.
    if self.rng.gen_range(0..self.tuning.front_reinsert_one_in) == 0 {
      let index = self.rng.gen_range(1..=n / 2);
      trace!(n, index, "reinserting drawn item in front half");
      return index;
    };
    let index = self.rng.gen_range(self.tuning.back_floor(n)..=n);
    trace!(n, index, "reinserting drawn item toward back");
    index
  }

  /// Removes the named item (ignoring case). The order of the other items is kept.
  pub fn delete_item(&mut self, name: &str) -> Result<(), RandomPQueueError> {
    if self.items.is_empty() {
      return Err(RandomPQueueError::EmptyQueue);
    };
    let name = normalize(name);
    let Some(index) = self.position(&name) else {
      return Err(RandomPQueueError::ItemNotFound { name });
    };
    self.items.remove(index);
    debug!(%name, index, "deleted item");
    Ok(())
  }

  /// Iterator that keeps drawing from the queue. It ends only if the queue is empty.
  pub fn draws(&mut self) -> Draws<'_, R> {
    Draws { queue: self }
  }
}

impl<R> Debug for RandomPQueue<R> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.debug_struct("RandomPQueue")
      .field("items", &self.items)
      .field("tuning", &self.tuning)
      .finish_non_exhaustive()
  }
}

impl<R: Rng, S: AsRef<str>> Extend<S> for RandomPQueue<R> {
  fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
    for name in iter {
      self.add(name.as_ref());
    }
  }
}

impl<S: AsRef<str>> FromIterator<S> for RandomPQueue<StdRng> {
  fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
    let mut queue = Self::new();
    queue.extend(iter);
    queue
  }
}

/// Schedule produced by `RandomPQueue::draws`. Each item is the result of one `get`.
pub struct Draws<'a, R> {
  queue: &'a mut RandomPQueue<R>,
}

impl<R: Rng> Iterator for Draws<'_, R> {
  type Item = String;

  fn next(&mut self) -> Option<Self::Item> {
    self.queue.get().ok()
  }
}
