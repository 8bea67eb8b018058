//! Human-readable or JSON rendering of command results.

use anyhow::Result;
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    /// Print pretty JSON instead of text lines.
    pub json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Print `value` as JSON, or hand it to `human` for text output.
    pub fn emit<T: Serialize + ?Sized>(&self, value: &T, human: impl FnOnce(&T)) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            human(value);
        }
        Ok(())
    }

    /// Confirmation for operations without a result worth showing.
    pub fn done(&self, message: &str) -> Result<()> {
        self.emit(&json!({ "success": true, "message": message }), |_| {
            println!("{}", message)
        })
    }
}

/// `value`, or `-` when absent.
pub fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}
