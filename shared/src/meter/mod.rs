pub mod config;
pub mod direction;
pub mod error;
pub mod eta;
pub mod progress_meter;
pub mod record;
pub mod scheduler;
pub mod sync;
