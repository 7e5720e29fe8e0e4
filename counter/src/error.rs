use std::time::Duration;

use thiserror::Error;

/// An error returned by the fallible work counter operations.<br/>
/// ワークカウンタのフォールブルな操作が返すエラー。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkCounterError {
  /// The deadline passed while work was still outstanding.<br/>
  /// 未完了の作業が残ったまま期限を過ぎた。
  #[error("Timed out after {timeout:?} waiting for the counter to reach zero (value = {value})")]
  Timeout { value: i32, timeout: Duration },
  /// The mutation would leave the representable range; the value is unchanged.<br/>
  /// 操作が表現可能な範囲を超えるため、値は変更されていない。
  ///
  /// `delta` is the signed change that was requested, widened so that subtracting `i32::MIN` is exact.
  #[error("Counter overflow: {value} with delta {delta}")]
  Overflow { value: i32, delta: i64 },
}

impl WorkCounterError {
  /// Returns the counter value observed when the error was raised.
  pub fn value(&self) -> i32 {
    match self {
      WorkCounterError::Timeout { value, .. } | WorkCounterError::Overflow { value, .. } => *value,
    }
  }

  pub fn is_timeout(&self) -> bool {
    matches!(self, WorkCounterError::Timeout { .. })
  }
}
