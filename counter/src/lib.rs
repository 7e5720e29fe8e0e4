//! Work counter completion gate for task scheduling.
//!
//! A [`WorkCounter`] tracks outstanding work items across threads. Producers count work up, workers count it
//! down, and any thread can block until the count reaches zero or below.
//!
//! ```
//! use std::thread;
//!
//! use nexus_work_counter_rs::WorkCounter;
//!
//! let counter = WorkCounter::new();
//! let workers = (0..4)
//!   .map(|_| {
//!     let guard = counter.enter();
//!     thread::spawn(move || drop(guard))
//!   })
//!   .collect::<Vec<_>>();
//!
//! counter.wait_until_zero();
//! assert_eq!(counter.value(), 0);
//! for worker in workers {
//!   worker.join().unwrap();
//! }
//! ```

pub mod concurrent;
pub mod config;
mod error;

pub use self::{
  concurrent::*,
  config::{Config, ConfigOption, WakePolicy},
  error::*,
};
