//! Searching a type's declarations for a matching `-=`.

use crate::host::{AssignmentOperator, SemanticHost};

use super::subscription::{event_of_assignment, SubscriptionSite};

/// Bounds on a single unsubscription search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchLimits {
    /// Maximum nodes visited across all declarations. `None` = unbounded.
    pub max_descendants: Option<usize>,
}

impl MatchLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_max_descendants(max: usize) -> Self {
        Self {
            max_descendants: Some(max),
        }
    }
}

/// Result of an unsubscription search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Matched,
    NotFound,
    /// The node budget ran out before a match was seen.
    BudgetExceeded,
}

/// `true` if `node` is `receiver.Event -= handler` with the same event and
/// handler identities as `site`.
fn is_matching_removal<H: SemanticHost>(host: &H, node: H::Node, site: &SubscriptionSite<H>) -> bool {
    let Some(event) = event_of_assignment(host, node, AssignmentOperator::Subtract) else {
        return false;
    };
    if !host.symbols_equal(&event, &site.event) {
        return false;
    }
    let handler = host
        .right_operand(node)
        .and_then(|right| host.resolve_symbol(right));
    host.optional_symbols_equal(handler.as_ref(), site.handler.as_ref())
}

/// Look for an unsubscription of `site` anywhere in the declarations of
/// `containing_type`. Order, reachability, and conditionality are ignored;
/// the first match ends the search.
pub fn find_unsubscription<H: SemanticHost>(
    host: &H,
    site: &SubscriptionSite<H>,
    containing_type: &H::Symbol,
    limits: &MatchLimits,
) -> MatchOutcome {
    let mut visited = 0usize;
    for root in host.declaring_syntax(containing_type) {
        for node in host.descendants(root) {
            visited += 1;
            if limits.max_descendants.is_some_and(|max| visited > max) {
                return MatchOutcome::BudgetExceeded;
            }
            if is_matching_removal(host, node, site) {
                return MatchOutcome::Matched;
            }
        }
    }
    MatchOutcome::NotFound
}
