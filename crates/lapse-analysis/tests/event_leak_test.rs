//! End-to-end behavior of the event-leak rule over parsed C# sources.

use lapse_analysis::{AnalysisPipeline, Compilation};
use lapse_core::config::LapseConfig;
use lapse_core::diagnostics::{Finding, Severity};
use lapse_core::traits::CancellationToken;

const LEAKED: &str = include_str!("fixtures/leaked.cs");
const UNSUBSCRIBED: &str = include_str!("fixtures/unsubscribed.cs");
const NEAR_MISSES: &str = include_str!("fixtures/near_misses.cs");
const PARTIAL_FIRST: &str = include_str!("fixtures/partial_first.cs");
const PARTIAL_SECOND: &str = include_str!("fixtures/partial_second.cs");

fn findings(sources: &[(&str, &str)]) -> Vec<Finding> {
    let compilation = Compilation::from_sources(sources).expect("sources parse");
    let pipeline = AnalysisPipeline::new(LapseConfig::default());
    let result = pipeline.analyze_compilation(&compilation, &CancellationToken::new());
    result.data
}

fn lines(findings: &[Finding]) -> Vec<(String, u32, u32)> {
    findings
        .iter()
        .map(|f| (f.location.file.clone(), f.location.line, f.location.column))
        .collect()
}

// ---- Fixture scenarios ----

#[test]
fn subscription_without_removal_is_reported() {
    let found = findings(&[("leaked.cs", LEAKED)]);
    assert_eq!(lines(&found), vec![("leaked.cs".to_string(), 15, 13)]);

    let finding = &found[0];
    assert_eq!(finding.rule_id, "EventHandlerLeakAnalyzer");
    assert_eq!(finding.message, "Event subscribed to but never unsubscribed from");
    assert_eq!(finding.category, "Memory Leak");
    assert_eq!(finding.severity, Severity::Warning);
}

#[test]
fn matching_removal_in_same_type_clears_subscription() {
    assert!(findings(&[("unsubscribed.cs", UNSUBSCRIBED)]).is_empty());
}

#[test]
fn removals_differing_in_handler_or_event_do_not_count() {
    let found = findings(&[("near_misses.cs", NEAR_MISSES)]);
    assert_eq!(lines(&found), vec![("near_misses.cs".to_string(), 21, 13)]);
}

#[test]
fn removal_in_another_partial_file_counts() {
    let found = findings(&[
        ("partial_first.cs", PARTIAL_FIRST),
        ("partial_second.cs", PARTIAL_SECOND),
    ]);
    assert!(found.is_empty(), "unexpected findings: {found:?}");
}

#[test]
fn partial_type_without_its_other_half_leaks() {
    let found = findings(&[("partial_first.cs", PARTIAL_FIRST)]);
    assert_eq!(lines(&found), vec![("partial_first.cs".to_string(), 16, 13)]);
}

#[test]
fn removal_in_another_partial_declaration_of_same_file_counts() {
    let src = r#"
using System;
static class Clock
{
    public static event Action Tick;
}

partial class Watcher
{
    void Attach() { Clock.Tick += Handle; }
}

partial class Watcher
{
    void Detach() { Clock.Tick -= Handle; }
    void Handle() { }
}
"#;
    assert!(findings(&[("watcher.cs", src)]).is_empty());
}

#[test]
fn partial_file_order_does_not_matter() {
    let found = findings(&[
        ("partial_second.cs", PARTIAL_SECOND),
        ("partial_first.cs", PARTIAL_FIRST),
    ]);
    assert!(found.is_empty());
}

// ---- Inputs with nothing to report ----

#[test]
fn empty_compilation_reports_nothing() {
    let none: [(&str, &str); 0] = [];
    assert!(findings(&none).is_empty());
}

#[test]
fn source_without_compound_assignments_reports_nothing() {
    let src = r#"
class Plain
{
    int _count;
    void Run() { _count = _count + 1; }
}
"#;
    assert!(findings(&[("plain.cs", src)]).is_empty());
}

#[test]
fn numeric_add_assignment_is_not_a_subscription() {
    let src = r#"
class Counter
{
    public int Total;
    void Run(Counter other) { other.Total += 1; this.Total += 2; }
}
"#;
    assert!(findings(&[("counter.cs", src)]).is_empty());
}

#[test]
fn bare_identifier_subscription_is_not_recognized() {
    let src = r#"
using System;
class Widget
{
    public event EventHandler Changed;
    void Init() { Changed += OnChanged; }
    void OnChanged(object s, EventArgs e) { }
}
"#;
    assert!(findings(&[("widget.cs", src)]).is_empty());
}

// ---- Identity matching ----

#[test]
fn removal_through_another_receiver_matches_by_event_identity() {
    let src = r#"
using System;
namespace App
{
    public class Publisher
    {
        public event EventHandler Changed;
    }

    class Listener
    {
        private Publisher _publisher;

        void Attach()
        {
            var local = new Publisher();
            local.Changed += OnChanged;
        }

        void Detach()
        {
            _publisher.Changed -= OnChanged;
        }

        void OnChanged(object sender, EventArgs e) { }
    }
}
"#;
    assert!(findings(&[("listener.cs", src)]).is_empty());
}

#[test]
fn this_qualified_event_matches_its_removal() {
    let src = r#"
using System;
class Widget
{
    public event EventHandler Changed;
    void Attach() { this.Changed += OnChanged; }
    void Detach() { this.Changed -= OnChanged; }
    void Leak() { this.Changed += OnOther; }
    void OnChanged(object s, EventArgs e) { }
    void OnOther(object s, EventArgs e) { }
}
"#;
    let found = findings(&[("widget.cs", src)]);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].location.line, 8);
}

#[test]
fn inherited_event_resolves_through_base_type() {
    let src = r#"
using System;
class Base
{
    public event Action Fired;
}

class Derived : Base
{
    void Attach() { this.Fired += Handle; }
    void Handle() { }
}
"#;
    let found = findings(&[("derived.cs", src)]);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].location.line, 10);
}

#[test]
fn event_with_accessors_is_an_event() {
    let src = r#"
using System;
class Source
{
    private EventHandler _inner;
    public event EventHandler Changed
    {
        add { _inner += value; }
        remove { _inner -= value; }
    }
}

class Sink
{
    private Source _source;
    void Attach() { _source.Changed += OnChanged; }
    void OnChanged(object s, EventArgs e) { }
}
"#;
    let found = findings(&[("accessors.cs", src)]);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].location.line, 16);
}

#[test]
fn namespace_qualified_receiver_resolves() {
    let bus = r#"
namespace Lapse.Events
{
    public static class Bus
    {
        public static event System.Action Raised;
    }
}
"#;
    let app = r#"
namespace App
{
    class Subscriber
    {
        void Attach() { Lapse.Events.Bus.Raised += OnRaised; }
        void Detach() { Lapse.Events.Bus.Raised -= OnRaised; }
        void OnRaised() { }
    }
}
"#;
    assert!(findings(&[("bus.cs", bus), ("app.cs", app)]).is_empty());
}

#[test]
fn lambda_handlers_never_match() {
    let src = r#"
using System;
static class Clock
{
    public static event Action Tick;
}

class Watcher
{
    void Attach() { Clock.Tick += () => { }; }
    void Detach() { Clock.Tick -= () => { }; }
}
"#;
    let found = findings(&[("watcher.cs", src)]);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].location.line, 10);
}

#[test]
fn removal_in_unrelated_type_does_not_count() {
    let src = r#"
using System;
static class Clock
{
    public static event Action Tick;
}

class Watcher
{
    void Attach() { Clock.Tick += Handle; }
    public static void Handle() { }
}

class Other
{
    void Detach() { Clock.Tick -= Watcher.Handle; }
}
"#;
    let found = findings(&[("watcher.cs", src)]);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].location.line, 10);
}

#[test]
fn each_subscription_is_judged_on_its_own() {
    let src = r#"
using System;
static class Clock
{
    public static event Action Tick;
    public static event Action Tock;
}

class Watcher
{
    void Attach()
    {
        Clock.Tick += Handle;
        Clock.Tock += Handle;
        Clock.Tick += Handle;
    }
    void Detach() { Clock.Tock -= Handle; }
    void Handle() { }
}
"#;
    let found = findings(&[("watcher.cs", src)]);
    let reported: Vec<u32> = found.iter().map(|f| f.location.line).collect();
    assert_eq!(reported, vec![13, 15]);
}

#[test]
fn removal_in_finalizer_clears_constructor_subscription() {
    let src = r#"
using System;
static class Clock
{
    public static event Action Tick;
}

class Watcher
{
    public Watcher() { Clock.Tick += Handle; }
    ~Watcher() { Clock.Tick -= Handle; }
    void Handle() { }
}
"#;
    assert!(findings(&[("watcher.cs", src)]).is_empty());
}

#[test]
fn findings_are_sorted_by_file_then_position() {
    let renamed = LEAKED.replace("Leaked", "LeakedB");
    let found = findings(&[("b.cs", renamed.as_str()), ("a.cs", LEAKED)]);
    let files: Vec<&str> = found.iter().map(|f| f.location.file.as_str()).collect();
    assert_eq!(files, vec!["a.cs", "b.cs"]);
}

#[test]
fn positional_record_parameter_is_a_receiver() {
    let src = r#"
struct Pub
{
    public event System.Action E;
}

record Sub(Pub P)
{
    void On() { P.E += H; }
    void H() { }
}
"#;
    let found = findings(&[("record.cs", src)]);
    assert_eq!(lines(&found), vec![("record.cs".to_string(), 9, 17)]);
}

#[test]
fn positional_record_parameter_removal_matches() {
    let src = r#"
struct Pub
{
    public event System.Action E;
}

record Sub(Pub P)
{
    void On() { P.E += H; }
    void Off() { P.E -= H; }
    void H() { }
}
"#;
    assert!(findings(&[("record.cs", src)]).is_empty());
}

#[test]
fn invocation_receiver_resolves_through_return_type() {
    let src = r#"
struct Pub
{
    public event System.Action E;
}

class Sub
{
    Pub Get() => default;
    void On() { Get().E += H; }
    void H() { }
}
"#;
    let found = findings(&[("invocation.cs", src)]);
    assert_eq!(lines(&found), vec![("invocation.cs".to_string(), 10, 17)]);
}

#[test]
fn invocation_receiver_removal_matches() {
    let src = r#"
class Pub
{
    public event System.Action E;
}

class Sub
{
    static Pub Shared() => null;
    void On() { Shared().E += H; }
    void Off() { Shared().E -= H; }
    void H() { }
}
"#;
    assert!(findings(&[("invocation.cs", src)]).is_empty());
}
