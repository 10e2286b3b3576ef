//! JSON reporter for machine-readable output.

use serde_json::json;

use lapse_core::diagnostics::Finding;

use super::Reporter;

pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn generate(&self, findings: &[Finding]) -> Result<String, String> {
        let output = json!({
            "finding_count": findings.len(),
            "findings": findings,
        });
        serde_json::to_string_pretty(&output).map_err(|e| e.to_string())
    }
}
