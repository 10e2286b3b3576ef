//! `#pragma warning disable/restore` handling.
//!
//! Directives apply from the line after them to the end of the file or the
//! next directive that touches the same rule. A directive without ids
//! applies to every rule.

use lapse_core::diagnostics::Finding;

use crate::rules::DiagnosticSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Disable,
    Restore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Directive {
    line: u32,
    action: Action,
    /// `None` = all rules.
    ids: Option<Vec<String>>,
}

impl Directive {
    fn applies_to(&self, rule_id: &str) -> bool {
        match &self.ids {
            None => true,
            Some(ids) => ids.iter().any(|id| id.eq_ignore_ascii_case(rule_id)),
        }
    }
}

/// Pragma regions of one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PragmaSuppressions {
    directives: Vec<Directive>,
}

impl PragmaSuppressions {
    pub fn parse(source: &str) -> Self {
        let directives = source
            .lines()
            .enumerate()
            .filter_map(|(i, line)| parse_directive(i as u32 + 1, line))
            .collect();
        Self { directives }
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// `true` if `rule_id` is disabled at 1-based `line`.
    pub fn is_suppressed(&self, rule_id: &str, line: u32) -> bool {
        self.directives
            .iter()
            .take_while(|d| d.line < line)
            .filter(|d| d.applies_to(rule_id))
            .last()
            .is_some_and(|d| d.action == Action::Disable)
    }
}

fn parse_directive(line_number: u32, line: &str) -> Option<Directive> {
    let rest = line.trim().strip_prefix('#')?.trim_start();
    let rest = rest.strip_prefix("pragma")?.trim_start();
    let rest = rest.strip_prefix("warning")?.trim_start();
    let (action, rest) = if let Some(rest) = rest.strip_prefix("disable") {
        (Action::Disable, rest)
    } else if let Some(rest) = rest.strip_prefix("restore") {
        (Action::Restore, rest)
    } else {
        return None;
    };
    let rest = rest.split("//").next().unwrap_or_default();
    let ids: Vec<String> = rest
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();
    Some(Directive {
        line: line_number,
        action,
        ids: (!ids.is_empty()).then_some(ids),
    })
}

/// Sink that drops findings inside disabled regions before forwarding.
pub struct SuppressingSink<'a> {
    inner: &'a dyn DiagnosticSink,
    suppressions: Option<&'a PragmaSuppressions>,
}

impl<'a> SuppressingSink<'a> {
    pub fn new(inner: &'a dyn DiagnosticSink, suppressions: Option<&'a PragmaSuppressions>) -> Self {
        Self {
            inner,
            suppressions,
        }
    }
}

impl DiagnosticSink for SuppressingSink<'_> {
    fn report(&self, finding: Finding) {
        if let Some(suppressions) = self.suppressions {
            if suppressions.is_suppressed(&finding.rule_id, finding.location.line) {
                tracing::trace!(file = %finding.location.file, line = finding.location.line, "suppressed by pragma");
                return;
            }
        }
        self.inner.report(finding);
    }
}
