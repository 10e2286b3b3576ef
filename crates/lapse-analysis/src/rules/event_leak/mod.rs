//! Event-leak rule: flags `target.Event += handler` when the declaring type
//! never runs `target.Event -= handler` for the same event and handler.
//!
//! See <https://en.wikipedia.org/wiki/Lapsed_listener_problem>.

pub mod subscription;
pub mod unsubscription;


use lapse_core::config::AnalysisConfig;
use lapse_core::diagnostics::{Finding, RuleDescriptor, Severity};
use lapse_core::errors::AnalysisError;
use tracing::debug;

use crate::host::SemanticHost;
use crate::rules::registration::{NodeTrigger, Registration};
use crate::rules::sink::DiagnosticSink;

pub use subscription::{detect_subscription, SubscriptionSite};
pub use unsubscription::{find_unsubscription, MatchLimits, MatchOutcome};

/// Descriptor of the event-leak rule.
pub static EVENT_LEAK_RULE: RuleDescriptor = RuleDescriptor {
    id: "EventHandlerLeakAnalyzer",
    title: "EventHandlerLeakAnalyzer",
    message: "Event subscribed to but never unsubscribed from",
    category: "Memory Leak",
    default_severity: Severity::Warning,
    enabled_by_default: true,
    description: "Detects events that are never unsubscribed from",
};

/// What the rule concluded about one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Not an event subscription.
    Ignored,
    /// A matching unsubscription exists.
    Unsubscribed,
    Leaked(Finding),
    /// A subscription that could not be judged; no finding is produced.
    Skipped(AnalysisError),
}

/// Judge a single node.
pub fn evaluate<H: SemanticHost>(host: &H, node: H::Node, limits: &MatchLimits) -> Verdict {
    let Some(site) = detect_subscription(host, node) else {
        return Verdict::Ignored;
    };

    let containing_type = host
        .containing_symbol(node)
        .and_then(|symbol| host.containing_type(&symbol));
    let Some(containing_type) = containing_type else {
        debug!(
            file = %site.location.file,
            line = site.location.line,
            "subscription outside any resolvable type, skipping"
        );
        return Verdict::Skipped(AnalysisError::UnresolvedContainingType {
            file: site.location.file,
            line: site.location.line,
        });
    };

    match find_unsubscription(host, &site, &containing_type, limits) {
        MatchOutcome::Matched => Verdict::Unsubscribed,
        MatchOutcome::NotFound => Verdict::Leaked(Finding::new(&EVENT_LEAK_RULE, site.location)),
        MatchOutcome::BudgetExceeded => {
            let limit = limits.max_descendants.unwrap_or_default();
            debug!(
                file = %site.location.file,
                line = site.location.line,
                limit,
                "unsubscription search exceeded node budget"
            );
            Verdict::Skipped(AnalysisError::BudgetExceeded {
                file: site.location.file,
                line: site.location.line,
                limit,
            })
        }
    }
}

/// The finding for `node`, if it is a leaked subscription.
pub fn analyze<H: SemanticHost>(host: &H, node: H::Node, limits: &MatchLimits) -> Option<Finding> {
    match evaluate(host, node, limits) {
        Verdict::Leaked(finding) => Some(finding),
        _ => None,
    }
}

/// The rule as registered with a host.
#[derive(Debug, Clone, Default)]
pub struct EventLeakAnalyzer {
    limits: MatchLimits,
    severity: Option<Severity>,
    analyze_generated_code: bool,
}

impl EventLeakAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            limits: MatchLimits {
                max_descendants: config.max_descendants,
            },
            severity: config.severity,
            analyze_generated_code: config.effective_analyze_generated_code(),
        }
    }

    pub fn with_limits(mut self, limits: MatchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> &MatchLimits {
        &self.limits
    }

    pub fn descriptor(&self) -> &'static RuleDescriptor {
        &EVENT_LEAK_RULE
    }

    pub fn registration(&self) -> Registration {
        Registration {
            trigger: NodeTrigger::AddAssignment,
            concurrent_execution: true,
            analyze_generated_code: self.analyze_generated_code,
        }
    }

    /// Per-node callback: judge `node` and report a leak to `sink`.
    pub fn analyze_node<H: SemanticHost>(
        &self,
        host: &H,
        node: H::Node,
        sink: &dyn DiagnosticSink,
    ) -> Verdict {
        let verdict = evaluate(host, node, &self.limits);
        if let Verdict::Leaked(finding) = &verdict {
            let finding = match self.severity {
                Some(severity) => finding.clone().with_severity(severity),
                None => finding.clone(),
            };
            sink.report(finding);
        }
        verdict
    }
}
