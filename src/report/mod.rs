//! Report module - classification metrics, confusion matrices and run summaries

pub mod evaluate;
pub mod export;
pub mod metrics;
pub mod summary;

pub use evaluate::*;
pub use export::*;
pub use metrics::*;
pub use summary::*;
