//! Core types - pure abstractions shared across the codebase.

mod scale;
mod state;

pub use scale::{Scale, is_density_dir_name};
pub use state::{setup_shutdown_handler, shutdown_flag};
