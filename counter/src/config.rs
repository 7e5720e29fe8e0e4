mod config_option;
mod wake_policy;

pub use self::{config_option::*, wake_policy::*};

pub const DEFAULT_NAME: &str = "work-counter";

/// Construction-time settings of a [`WorkCounter`](crate::WorkCounter).<br/>
/// [`WorkCounter`](crate::WorkCounter) の生成時設定。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  /// Label attached to every log event of the counter.
  pub name: String,
  pub wake_policy: WakePolicy,
}

impl Default for Config {
  fn default() -> Self {
    Config {
      name: DEFAULT_NAME.to_string(),
      wake_policy: WakePolicy::default(),
    }
  }
}

impl Config {
  pub fn from(options: impl IntoIterator<Item = ConfigOption>) -> Config {
    let mut config = Config::default();
    for option in options {
      option.apply(&mut config);
    }
    config
  }
}
