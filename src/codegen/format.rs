//! @acp:module "Source Formatter"
//! @acp:summary "Canonical formatting of the generated unit through rustfmt"
//! @acp:domain cli
//! @acp:layer codegen

use std::io::Write;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{CmdgenError, Result};

/// Formats a complete generated unit; the error is the formatter's message
pub trait SourceFormatter {
    fn format(&self, source: &str) -> std::result::Result<String, String>;
}

/// @acp:summary "Pipe the unit through a `rustfmt` subprocess"
#[derive(Debug, Clone)]
pub struct Rustfmt {
    pub program: String,
    pub edition: String,
}

impl Default for Rustfmt {
    fn default() -> Self {
        Self {
            program: "rustfmt".to_string(),
            edition: "2021".to_string(),
        }
    }
}

impl SourceFormatter for Rustfmt {
    fn format(&self, source: &str) -> std::result::Result<String, String> {
        let mut child = Command::new(&self.program)
            .arg("--edition")
            .arg(&self.edition)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| format!("failed to run {}: {}", self.program, e))?;

        {
            let mut stdin = child
                .stdin
                .take()
                .ok_or_else(|| format!("{} stdin unavailable", self.program))?;
            stdin
                .write_all(source.as_bytes())
                .map_err(|e| format!("failed writing to {}: {}", self.program, e))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| format!("failed waiting for {}: {}", self.program, e))?;
        if !output.status.success() {
            return Err(String::from_utf8_lossy(&output.stderr).trim().to_string());
        }
        String::from_utf8(output.stdout).map_err(|e| e.to_string())
    }
}

/// Leaves the unit as written
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl SourceFormatter for Verbatim {
    fn format(&self, source: &str) -> std::result::Result<String, String> {
        Ok(source.to_string())
    }
}

/// Format `source`, keeping the unformatted buffer in the error on failure
pub fn format_unit(formatter: &dyn SourceFormatter, source: String) -> Result<String> {
    match formatter.format(&source) {
        Ok(formatted) => {
            debug!(bytes = formatted.len(), "Formatted generated unit");
            Ok(formatted)
        }
        Err(message) => Err(CmdgenError::SourceFormat {
            message,
            source_text: source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Reject;

    impl SourceFormatter for Reject {
        fn format(&self, _source: &str) -> std::result::Result<String, String> {
            Err("expected `;`".to_string())
        }
    }

    #[test]
    fn test_failure_carries_raw_buffer() {
        let err = format_unit(&Reject, "fn main() { let x = 1 }".to_string()).unwrap_err();
        let text = err.to_string();
        assert!(text.contains("expected `;`"));
        assert!(text.contains("-----\nfn main() { let x = 1 }\n-----"));
    }

    #[test]
    fn test_verbatim_passthrough() {
        assert_eq!(format_unit(&Verbatim, "x".to_string()).unwrap(), "x");
    }
}
