use crate::error::GetTimeoutError;
use crate::error::RandomPQueueError;
use crate::queue::Item;
use crate::queue::RandomPQueue;
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::Arc;
use std::sync::Condvar;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::time::Duration;
use std::time::Instant;

struct SharedState<R> {
  queue: Mutex<RandomPQueue<R>>,
  // Signalled whenever an item is admitted, so waiters blocked on an empty queue can draw.
  condvar: Condvar,
}

/// Handle to a `RandomPQueue` that can be used from several threads. Every call takes one lock for its whole duration. This handle can be cheaply cloned; clones refer to the same queue.
pub struct SharedRandomPQueue<R = StdRng>(Arc<SharedState<R>>);

impl<R> Clone for SharedRandomPQueue<R> {
  fn clone(&self) -> Self {
    Self(self.0.clone())
  }
}

impl SharedRandomPQueue<StdRng> {
  /// Create an empty shared queue, seeding its generator from OS entropy.
  pub fn new() -> Self {
    Self::from_queue(RandomPQueue::new())
  }
}

impl Default for SharedRandomPQueue<StdRng> {
  fn default() -> Self {
    Self::new()
  }
}

impl<R> SharedRandomPQueue<R> {
  /// Wrap an existing queue.
  pub fn from_queue(queue: RandomPQueue<R>) -> Self {
    Self(Arc::new(SharedState {
      queue: Mutex::new(queue),
      condvar: Condvar::new(),
    }))
  }

  // Each mutation is a single VecDeque call, so a poisoned queue is still consistent.
  fn lock(&self) -> MutexGuard<'_, RandomPQueue<R>> {
    self.0.queue.lock().unwrap_or_else(PoisonError::into_inner)
  }

  pub fn len(&self) -> usize {
    self.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.lock().is_empty()
  }

  pub fn contains(&self, name: &str) -> bool {
    self.lock().contains(name)
  }

  pub fn is_rare(&self, name: &str) -> Option<bool> {
    self.lock().is_rare(name)
  }

  /// Copy of the items in draw order.
  pub fn snapshot(&self) -> Vec<Item> {
    self.lock().entries().map(|(_, item)| item.clone()).collect()
  }
}

impl<R: Rng> SharedRandomPQueue<R> {
  /// Adds an ordinary item. See `RandomPQueue::add`.
  pub fn add(&self, name: &str) -> bool {
    self.add_rare(name, false)
  }

  /// Adds an item and wakes every thread waiting for the queue to become non-empty. See `RandomPQueue::add_rare`.
  pub fn add_rare(&self, name: &str, rare: bool) -> bool {
    let added = self.lock().add_rare(name, rare);
    if added {
      // Draws don't consume items, so all waiters can proceed.
      self.0.condvar.notify_all();
    };
    added
  }

  /// Draw an item, or return an error if the queue is empty right now.
  pub fn get(&self) -> Result<String, RandomPQueueError> {
    self.lock().get()
  }

  /// Block the current thread until the queue has an item, then draw it.
  pub fn get_wait(&self) -> String {
    let mut queue = self.lock();
    loop {
      match queue.get() {
        Ok(name) => return name,
        Err(_) => {
          queue = self
            .0
            .condvar
            .wait(queue)
            .unwrap_or_else(PoisonError::into_inner);
        }
      };
    }
  }

  /// Block the current thread until the queue has an item or time has run out. If time has run out, an error is returned.
  pub fn get_timeout(&self, timeout: Duration) -> Result<String, GetTimeoutError> {
    let deadline = Instant::now() + timeout;
    let mut queue = self.lock();
    loop {
      if let Ok(name) = queue.get() {
        return Ok(name);
      };
      let remaining = deadline.saturating_duration_since(Instant::now());
      if remaining.is_zero() {
        return Err(GetTimeoutError);
      };
      queue = self
        .0
        .condvar
        .wait_timeout(queue, remaining)
        .unwrap_or_else(PoisonError::into_inner)
        .0;
    }
  }

  pub fn delete_item(&self, name: &str) -> Result<(), RandomPQueueError> {
    self.lock().delete_item(name)
  }
}
