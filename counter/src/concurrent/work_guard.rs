use crate::concurrent::WorkCounter;

/// One unit of outstanding work on a [`WorkCounter`], completed when the guard is dropped.<br/>
/// [`WorkCounter`] 上の未完了作業一つ分。ガードのドロップ時に完了となる。
///
/// A worker that unwinds while holding the guard still completes its item, so waiters are not stranded by a
/// panicking task.
#[must_use = "dropping the guard completes the work item immediately"]
#[derive(Debug)]
pub struct WorkGuard {
  counter: WorkCounter,
  completed: bool,
}

impl WorkGuard {
  pub(crate) fn new(counter: WorkCounter) -> Self {
    counter.increment();
    Self {
      counter,
      completed: false,
    }
  }

  pub fn counter(&self) -> &WorkCounter {
    &self.counter
  }

  /// Completes the work item and returns the counter value after the decrement.
  pub fn complete(mut self) -> i32 {
    self.completed = true;
    self.counter.decrement()
  }
}

impl Drop for WorkGuard {
  fn drop(&mut self) {
    if !self.completed {
      self.counter.decrement();
    }
  }
}

static_assertions::assert_impl_all!(WorkGuard: Send, Sync);

#[cfg(test)]
mod tests {
  use std::thread;

  use crate::concurrent::WorkCounter;

  #[test]
  fn test_guard_increments_and_drop_decrements() {
    let counter = WorkCounter::new();
    let guard = counter.enter();
    assert_eq!(counter.value(), 1);
    assert_eq!(guard.counter(), &counter);
    drop(guard);
    assert_eq!(counter.value(), 0);
  }

  #[test]
  fn test_complete_returns_new_value() {
    let counter = WorkCounter::new();
    let first = counter.enter();
    let second = counter.enter();
    assert_eq!(first.complete(), 1);
    assert_eq!(second.complete(), 0);
    assert_eq!(counter.value(), 0);
  }

  #[test]
  fn test_panicking_worker_still_completes() {
    let counter = WorkCounter::new();
    let guard = counter.enter();
    let result = thread::spawn(move || {
      let _guard = guard;
      panic!("worker failed");
    })
    .join();
    assert!(result.is_err());
    assert_eq!(counter.value(), 0);
    assert!(!counter.wait_until_zero());
  }
}
