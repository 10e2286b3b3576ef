//! Findings and their source locations.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::descriptor::{RuleDescriptor, Severity};

/// A source span. Lines and columns are 1-based; byte offsets are 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub end_line: u32,
    pub end_column: u32,
    pub start_byte: usize,
    pub end_byte: usize,
}

impl Location {
    /// `true` if `line` (1-based) falls inside this span.
    pub fn contains_line(&self, line: u32) -> bool {
        (self.line..=self.end_line).contains(&line)
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> Ordering {
        self.file
            .cmp(&other.file)
            .then(self.start_byte.cmp(&other.start_byte))
            .then(self.end_byte.cmp(&other.end_byte))
    }
}

/// One diagnostic emitted by a rule at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub rule_id: String,
    pub location: Location,
    pub severity: Severity,
    pub message: String,
    pub category: String,
}

impl Finding {
    /// Build a finding from a descriptor using its default severity.
    pub fn new(descriptor: &RuleDescriptor, location: Location) -> Self {
        Self {
            rule_id: descriptor.id.to_string(),
            location,
            severity: descriptor.default_severity,
            message: descriptor.message.to_string(),
            category: descriptor.category.to_string(),
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn file(&self) -> &str {
        &self.location.file
    }

    pub fn line(&self) -> u32 {
        self.location.line
    }

    pub fn column(&self) -> u32 {
        self.location.column
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(file: &str, start: usize) -> Location {
        Location {
            file: file.to_string(),
            line: 1,
            column: 1,
            end_line: 1,
            end_column: 2,
            start_byte: start,
            end_byte: start + 1,
        }
    }

    #[test]
    fn locations_order_by_file_then_offset() {
        let mut locs = vec![loc("b.cs", 0), loc("a.cs", 10), loc("a.cs", 2)];
        locs.sort();
        assert_eq!(locs[0], loc("a.cs", 2));
        assert_eq!(locs[1], loc("a.cs", 10));
        assert_eq!(locs[2], loc("b.cs", 0));
    }

    #[test]
    fn contains_line_is_inclusive() {
        let mut l = loc("a.cs", 0);
        l.line = 3;
        l.end_line = 5;
        assert!(l.contains_line(3));
        assert!(l.contains_line(5));
        assert!(!l.contains_line(6));
    }
}
