//! Run controller (§4.7): iterates the configured categories and root URLs,
//! drives recursive seed expansion through the strategy dispatcher, and
//! finalizes each root's run log.

mod controller;

pub use controller::{run, RunSummary, RunnerDeps};
