//! Configuration module for ytsum.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, DEFAULT_SYSTEM_PROMPT, DEFAULT_USER_PROMPT_TEMPLATE};
pub use settings::{OutputSettings, ProcessingSettings, ProviderSettings, Settings};
