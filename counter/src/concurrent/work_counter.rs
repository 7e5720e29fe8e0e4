use std::fmt::{Debug, Formatter};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::concurrent::WorkGuard;
use crate::config::{Config, ConfigOption, WakePolicy};
use crate::error::WorkCounterError;


/// A signed count of outstanding work that threads can block on until it drops to zero or below.<br/>
/// 未完了の作業数を表す符号付きカウンタ。0以下になるまでスレッドを待機させることができる。
///
/// Producers call [`increment`](Self::increment) or [`add`](Self::add) per submitted item, workers call
/// [`decrement`](Self::decrement) or [`subtract`](Self::subtract) per completed item, and any thread may park in
/// [`wait_until_zero`](Self::wait_until_zero). The count may go negative when a completion is observed before
/// its submission; any value `<= 0` opens the gate.
///
/// Handles are cheap to clone and share one state. A parked waiter or an in-flight wake always holds a handle,
/// so the state outlives every operation on it.
///
/// Under [`WakePolicy::WakeOne`] a decrement into the non-positive region signals a single waiter, and each
/// waiter leaving a wait call signals one more if others are still parked, until the chain reaches all of them.
#[derive(Clone)]
pub struct WorkCounter {
  inner: Arc<Inner>,
}

struct Inner {
  state: Mutex<State>,
  condvar: Condvar,
  config: Config,
}

#[derive(Debug, Default)]
struct State {
  value: i32,
  waiters: usize,
  #[cfg(test)]
  signals: usize,
}

impl WorkCounter {
  pub fn new() -> Self {
    Self::with_config(Config::default())
  }

  pub fn with_options(options: impl IntoIterator<Item = ConfigOption>) -> Self {
    Self::with_config(Config::from(options))
  }

  pub fn with_config(config: Config) -> Self {
    tracing::debug!(name = %config.name, policy = %config.wake_policy, "WorkCounter::new");
    Self {
      inner: Arc::new(Inner {
        state: Mutex::new(State::default()),
        condvar: Condvar::new(),
        config,
      }),
    }
  }

  pub fn name(&self) -> &str {
    &self.inner.config.name
  }

  pub fn policy(&self) -> WakePolicy {
    self.inner.config.wake_policy
  }

  /// Returns the current count. Stale as soon as the lock is released.
  pub fn value(&self) -> i32 {
    self.lock().value
  }

  /// Increments the count of outstanding work and returns the new value.<br/>
  /// 未完了の作業数を1増やし、新しい値を返します。
  pub fn increment(&self) -> i32 {
    self.add(1)
  }

  /// Adds `count` to the outstanding work and returns the new value. Never wakes a waiter.<br/>
  /// 未完了の作業数に`count`を加算し、新しい値を返します。待機スレッドは起こしません。
  ///
  /// The sum wraps on overflow; use [`try_add`](Self::try_add) to detect it.
  pub fn add(&self, count: i32) -> i32 {
    let mut state = self.lock();
    state.value = state.value.wrapping_add(count);
    state.value
  }

  /// Decrements the count of outstanding work and wakes waiters if it reaches zero or below.<br/>
  /// 未完了の作業数を1減らし、0以下になった場合は待機スレッドを起こします。
  pub fn decrement(&self) -> i32 {
    self.subtract(1)
  }

  /// Subtracts `count` from the outstanding work and wakes waiters if the result is zero or below.<br/>
  /// 未完了の作業数から`count`を減算し、結果が0以下の場合は待機スレッドを起こします。
  ///
  /// The difference wraps on overflow; use [`try_subtract`](Self::try_subtract) to detect it.
  pub fn subtract(&self, count: i32) -> i32 {
    let mut state = self.lock();
    state.value = state.value.wrapping_sub(count);
    let value = state.value;
    if value <= 0 {
      self.signal_gate_open(&mut state);
    }
    value
  }

  /// Like [`add`](Self::add), but leaves the count untouched and fails instead of wrapping.
  pub fn try_add(&self, count: i32) -> Result<i32, WorkCounterError> {
    let mut state = self.lock();
    match state.value.checked_add(count) {
      Some(value) => {
        state.value = value;
        Ok(value)
      }
      None => Err(WorkCounterError::Overflow {
        value: state.value,
        delta: i64::from(count),
      }),
    }
  }

  /// Like [`subtract`](Self::subtract), but leaves the count untouched and fails instead of wrapping.
  pub fn try_subtract(&self, count: i32) -> Result<i32, WorkCounterError> {
    let mut state = self.lock();
    let value = match state.value.checked_sub(count) {
      Some(value) => value,
      None => {
        return Err(WorkCounterError::Overflow {
          value: state.value,
          delta: -i64::from(count),
        })
      }
    };
    state.value = value;
    if value <= 0 {
      self.signal_gate_open(&mut state);
    }
    Ok(value)
  }

  /// Blocks while the count is positive.<br/>
  /// カウントが正である間、ブロックします。
  ///
  /// The condition is re-checked after every wake, so this only returns once the count has been `<= 0` while
  /// holding the lock. Returns `true` if the calling thread parked at least once.
  pub fn wait_until_zero(&self) -> bool {
    let mut did_wait = false;
    let mut state = self.lock();
    while state.value > 0 {
      state = self.park(state);
      did_wait = true;
    }
    self.relay(&mut state);
    did_wait
  }

  /// Parks for a single wake if the count is positive.<br/>
  /// カウントが正の場合、一度だけ起こされるまで待機します。
  ///
  /// Unlike [`wait_until_zero`](Self::wait_until_zero) the count is not re-checked after waking, so it may
  /// still be positive on return. Workers use this to drop back into a spin loop instead of sleeping until the
  /// gate opens. Returns `true` if the calling thread parked.
  pub fn wait_one_wakeup(&self) -> bool {
    let mut did_wait = false;
    let mut state = self.lock();
    if state.value > 0 {
      state = self.park(state);
      did_wait = true;
    }
    self.relay(&mut state);
    did_wait
  }

  /// [`wait_until_zero`](Self::wait_until_zero) bounded by `timeout`.
  ///
  /// Fails with [`WorkCounterError::Timeout`] if the count is still positive once the deadline has passed. A
  /// deadline that cannot be represented waits without bound.
  pub fn wait_until_zero_timeout(&self, timeout: Duration) -> Result<bool, WorkCounterError> {
    let deadline = match Instant::now().checked_add(timeout) {
      Some(deadline) => deadline,
      None => return Ok(self.wait_until_zero()),
    };
    let mut did_wait = false;
    let mut state = self.lock();
    while state.value > 0 {
      let now = Instant::now();
      if now >= deadline {
        tracing::trace!(name = %self.name(), value = state.value, ?timeout, "WorkCounter: wait timed out");
        return Err(WorkCounterError::Timeout {
          value: state.value,
          timeout,
        });
      }
      state = self.park_timeout(state, deadline - now);
      did_wait = true;
    }
    self.relay(&mut state);
    Ok(did_wait)
  }

  /// Increments the count and returns a guard that decrements it again when dropped.<br/>
  /// カウントを1増やし、ドロップ時に1減らすガードを返します。
  pub fn enter(&self) -> WorkGuard {
    WorkGuard::new(self.clone())
  }

  fn lock(&self) -> MutexGuard<'_, State> {
    self.inner.state.lock().unwrap_or_else(|poisoned| {
      tracing::warn!(name = %self.name(), "WorkCounter: recovered poisoned lock");
      poisoned.into_inner()
    })
  }

  fn park<'a>(&'a self, mut state: MutexGuard<'a, State>) -> MutexGuard<'a, State> {
    state.waiters += 1;
    tracing::trace!(name = %self.name(), value = state.value, waiters = state.waiters, "WorkCounter: park");
    let mut state = self.inner.condvar.wait(state).unwrap_or_else(PoisonError::into_inner);
    state.waiters -= 1;
    tracing::trace!(name = %self.name(), value = state.value, waiters = state.waiters, "WorkCounter: woken");
    state
  }

  fn park_timeout<'a>(&'a self, mut state: MutexGuard<'a, State>, timeout: Duration) -> MutexGuard<'a, State> {
    state.waiters += 1;
    tracing::trace!(name = %self.name(), value = state.value, waiters = state.waiters, ?timeout, "WorkCounter: park");
    let (mut state, result) = self
      .inner
      .condvar
      .wait_timeout(state, timeout)
      .unwrap_or_else(PoisonError::into_inner);
    state.waiters -= 1;
    tracing::trace!(
      name = %self.name(),
      value = state.value,
      waiters = state.waiters,
      timed_out = result.timed_out(),
      "WorkCounter: woken"
    );
    state
  }

  // The notify must stay the last access to shared state before the caller drops the guard.
  fn signal_gate_open(&self, state: &mut State) {
    if state.waiters == 0 {
      return;
    }
    tracing::trace!(name = %self.name(), value = state.value, waiters = state.waiters, "WorkCounter: gate open");
    #[cfg(test)]
    {
      state.signals += 1;
    }
    match self.policy() {
      WakePolicy::WakeOne => self.inner.condvar.notify_one(),
      WakePolicy::WakeAll => self.inner.condvar.notify_all(),
    }
  }

  fn relay(&self, state: &mut State) {
    if !self.policy().is_wake_one() || state.waiters == 0 {
      return;
    }
    tracing::trace!(name = %self.name(), value = state.value, waiters = state.waiters, "WorkCounter: relay");
    #[cfg(test)]
    {
      state.signals += 1;
    }
    self.inner.condvar.notify_one();
  }

  #[cfg(test)]
  pub(crate) fn waiters(&self) -> usize {
    self.lock().waiters
  }

  #[cfg(test)]
  pub(crate) fn signals(&self) -> usize {
    self.lock().signals
  }
}

impl Default for WorkCounter {
  fn default() -> Self {
    Self::new()
  }
}

impl Debug for WorkCounter {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("WorkCounter")
      .field("name", &self.name())
      .field("policy", &self.policy())
      .field("value", &self.value())
      .finish()
  }
}

impl Eq for WorkCounter {}

impl PartialEq for WorkCounter {
  fn eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.inner, &other.inner)
  }
}

static_assertions::assert_impl_all!(WorkCounter: Send, Sync, Clone);
