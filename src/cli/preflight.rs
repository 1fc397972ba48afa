//! Pre-flight checks before expensive operations.
//!
//! Validates that required tools are available before starting a run that
//! would otherwise fail midway.

use crate::error::{Result, SummarizerError};
use std::process::Command;

/// External programs a summarize run needs.
pub const REQUIRED_TOOLS: &[&str] = &["yt-dlp"];

/// Run pre-flight checks for a summarize run.
pub fn check() -> Result<()> {
    for tool in REQUIRED_TOOLS {
        check_tool(tool)?;
    }
    Ok(())
}

/// Check if an external tool is available.
pub fn check_tool(name: &str) -> Result<()> {
    match Command::new(name).arg("--version").output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(SummarizerError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(SummarizerError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(SummarizerError::ToolNotFound(format!("{}: {}", name, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool() {
        assert!(matches!(
            check_tool("ytsum-no-such-tool"),
            Err(SummarizerError::ToolNotFound(ref name)) if name == "ytsum-no-such-tool"
        ));
    }
}
