//! Signal deduplication state and the publish cycle built on it.

pub mod digest;
pub mod error;
pub mod pipeline;
pub mod store;

pub use error::StoreError;
pub use pipeline::{prepare, publish_selection, run_signal_cycle, CycleConfig, CycleReport, Prepared};
pub use store::{DedupWindow, Signal, SignalStore};
