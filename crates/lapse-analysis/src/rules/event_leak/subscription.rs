//! Recognizing event subscriptions and unsubscriptions.

use lapse_core::diagnostics::Location;

use crate::host::{AssignmentOperator, SemanticHost, SymbolKind};

/// A recognized `receiver.Event += handler` node.
pub struct SubscriptionSite<H: SemanticHost> {
    pub node: H::Node,
    pub location: Location,
    pub event: H::Symbol,
    /// `None` when the right-hand side does not resolve.
    pub handler: Option<H::Symbol>,
}

/// Resolve the event on the left of `node` if `node` is an `op` assignment
/// whose left side is a member access naming an event.
pub(crate) fn event_of_assignment<H: SemanticHost>(
    host: &H,
    node: H::Node,
    op: AssignmentOperator,
) -> Option<H::Symbol> {
    if host.assignment_operator(node) != op {
        return None;
    }
    let left = host.left_operand(node)?;
    if !host.is_member_access(left) {
        return None;
    }
    let symbol = host.resolve_symbol(left)?;
    (host.symbol_kind(&symbol) == SymbolKind::Event).then_some(symbol)
}

/// Classify `node` as an event subscription.
///
/// Bare-identifier subscriptions (`Changed += OnChanged`) are not
/// recognized; only explicit member access on the left counts.
pub fn detect_subscription<H: SemanticHost>(host: &H, node: H::Node) -> Option<SubscriptionSite<H>> {
    let event = event_of_assignment(host, node, AssignmentOperator::Add)?;
    let handler = host
        .right_operand(node)
        .and_then(|right| host.resolve_symbol(right));
    Some(SubscriptionSite {
        node,
        location: host.location(node),
        event,
        handler,
    })
}
