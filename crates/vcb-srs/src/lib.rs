//! SRS (Spaced Repetition System) library for Vocabulario
//!
//! This crate holds the review scheduling rules and the progress tracker that
//! applies them to per-user vocabulary and verb records. Persistence and time
//! are injected through the [`ProgressStore`] and [`Clock`] traits.

pub mod clock;
pub mod error;
pub mod memory;
pub mod model;
pub mod schedule;
pub mod store;
pub mod tracker;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{StoreError, TrackerError};
pub use memory::MemoryProgressStore;
pub use model::{ItemRef, NewProgress, ProgressRecord, ProgressUpdate, ReviewOutcome, ReviewRequest};
pub use store::ProgressStore;
pub use tracker::{ProgressTracker, ReviewResult};
