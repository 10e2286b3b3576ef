//! Console reporter: one `file:line:column` line per finding.

use lapse_core::diagnostics::{Finding, Severity};

use super::Reporter;

pub struct ConsoleReporter {
    pub use_color: bool,
}

impl ConsoleReporter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn color_start(&self, severity: Severity) -> &'static str {
        if !self.use_color {
            return "";
        }
        match severity {
            Severity::Error => "\x1b[31m",   // red
            Severity::Warning => "\x1b[33m", // yellow
            Severity::Info => "\x1b[36m",    // cyan
            Severity::Hint => "\x1b[90m",    // gray
        }
    }

    fn color_end(&self) -> &'static str {
        if self.use_color {
            "\x1b[0m"
        } else {
            ""
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Reporter for ConsoleReporter {
    fn name(&self) -> &'static str {
        "console"
    }

    fn generate(&self, findings: &[Finding]) -> Result<String, String> {
        let mut output = String::new();

        for finding in findings {
            output.push_str(&format!(
                "{}:{}:{}: {}{}{}: {} [{}]\n",
                finding.location.file,
                finding.location.line,
                finding.location.column,
                self.color_start(finding.severity),
                finding.severity.name(),
                self.color_end(),
                finding.message,
                finding.rule_id,
            ));
        }

        let files = {
            let mut files: Vec<&str> = findings.iter().map(|f| f.location.file.as_str()).collect();
            files.sort_unstable();
            files.dedup();
            files.len()
        };
        match findings.len() {
            0 => output.push_str("No leaked event subscriptions found.\n"),
            1 => output.push_str("1 leaked event subscription in 1 file.\n"),
            n => output.push_str(&format!(
                "{n} leaked event subscriptions in {files} file{}.\n",
                if files == 1 { "" } else { "s" }
            )),
        }

        Ok(output)
    }
}
