pub mod analysis;
pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;

pub use analysis::{RoomAnalysis, RoomReport};
pub use config::KernelConfig;
pub use error::{FloorcutError, Result};
