//! CLI command handlers.
//!
//! Testable handlers invoked by main.rs, one per subcommand. Handlers that
//! decide an exit code return it; the caller exits with it.

mod categorize;
mod config;
mod diff;
mod rules;

pub use categorize::run_categorize;
pub use config::{run_config_init, run_config_path, run_config_schema, run_config_show};
pub use diff::{run_diff, run_diff_latest};
pub use rules::run_rules;

// Re-export config types used by handlers
pub use crate::config::{CategorizeConfig, DiffConfig};
