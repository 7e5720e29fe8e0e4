use crate::config::{Config, WakePolicy};

#[derive(Debug, Clone)]
pub enum ConfigOption {
  SetName(String),
  SetWakePolicy(WakePolicy),
}

impl ConfigOption {
  pub fn apply(&self, config: &mut Config) {
    match self {
      ConfigOption::SetName(name) => {
        config.name = name.clone();
      }
      ConfigOption::SetWakePolicy(wake_policy) => {
        config.wake_policy = *wake_policy;
      }
    }
  }

  pub fn with_name(name: impl Into<String>) -> ConfigOption {
    ConfigOption::SetName(name.into())
  }

  pub fn with_wake_policy(wake_policy: WakePolicy) -> ConfigOption {
    ConfigOption::SetWakePolicy(wake_policy)
  }
}
