use std::fmt::{Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

/// How many parked threads a decrement into the non-positive region signals.<br/>
/// 非正の領域へ減算したときに起こす待機スレッドの数。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WakePolicy {
  /// Signal a single waiter; every woken waiter relays one more wake on its way out.<br/>
  /// 一つの待機スレッドだけを起こし、起きたスレッドが次の一つを起こす。
  #[default]
  WakeOne,
  /// Signal every waiter at once.<br/>
  /// すべての待機スレッドを一度に起こす。
  WakeAll,
}

impl WakePolicy {
  pub fn is_wake_one(&self) -> bool {
    matches!(self, WakePolicy::WakeOne)
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      WakePolicy::WakeOne => "wake-one",
      WakePolicy::WakeAll => "wake-all",
    }
  }
}

impl Display for WakePolicy {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown wake policy: {0}")]
pub struct ParseWakePolicyError(pub String);

impl FromStr for WakePolicy {
  type Err = ParseWakePolicyError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "wake-one" | "wake_one" | "one" => Ok(WakePolicy::WakeOne),
      "wake-all" | "wake_all" | "all" => Ok(WakePolicy::WakeAll),
      _ => Err(ParseWakePolicyError(s.to_string())),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_is_wake_one() {
    assert_eq!(WakePolicy::default(), WakePolicy::WakeOne);
    assert!(WakePolicy::default().is_wake_one());
  }

  #[test]
  fn test_parse_accepts_display_form() {
    for policy in [WakePolicy::WakeOne, WakePolicy::WakeAll] {
      assert_eq!(policy.to_string().parse::<WakePolicy>(), Ok(policy));
    }
    assert_eq!(" Wake_All ".parse::<WakePolicy>(), Ok(WakePolicy::WakeAll));
  }

  #[test]
  fn test_parse_rejects_unknown() {
    let err = "wake-some".parse::<WakePolicy>().unwrap_err();
    assert_eq!(err, ParseWakePolicyError("wake-some".to_string()));
    assert_eq!(err.to_string(), "Unknown wake policy: wake-some");
  }
}
