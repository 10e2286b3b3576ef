//! What a rule asks of the host that drives it.

use crate::host::{AssignmentOperator, SemanticHost};

/// Syntax nodes a rule wants to be called back for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeTrigger {
    /// Every `+=` assignment node in the program.
    AddAssignment,
}

impl NodeTrigger {
    /// `true` if `node` should be handed to the rule.
    pub fn matches<H: SemanticHost>(&self, host: &H, node: H::Node) -> bool {
        match self {
            Self::AddAssignment => host.assignment_operator(node) == AssignmentOperator::Add,
        }
    }
}

/// Registration a rule hands to its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    pub trigger: NodeTrigger,
    /// The callback may run concurrently and reentrantly.
    pub concurrent_execution: bool,
    /// Findings inside generated code are wanted.
    pub analyze_generated_code: bool,
}
