//! CLI command implementations.

mod config;
mod providers;
mod summarize;

pub use config::run_create_config;
pub use providers::run_list_providers;
pub use summarize::{run_summarize, SummarizeOptions};
