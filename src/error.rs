use thiserror::Error;

/// Errors that could occur when drawing from or deleting out of a queue. The queue is left unchanged when one is returned.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RandomPQueueError {
  #[error("queue is empty")]
  EmptyQueue,
  #[error("no item named {name:?} in queue")]
  ItemNotFound { name: String },
}

/// Error returned by `SharedRandomPQueue::get_timeout` when no item showed up in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("timed out waiting for an item")]
pub struct GetTimeoutError;
