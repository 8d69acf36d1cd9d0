//! Main application modules.
//!
//! This module provides progress logging, shutdown handling, statistics
//! printing and the exit-code policy used by the main application.

pub mod exit;
pub mod logging;
pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use exit::{evaluate_exit_code, POLICY_FAILURE_EXIT_CODE};
pub use logging::{log_progress, spawn_progress_logger};
pub use shutdown::shutdown_gracefully;
pub use statistics::{print_statistics, print_written_files};
