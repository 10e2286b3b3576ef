//! Console and JSON output.

use lapse_analysis::reporters::{available_formats, create_reporter, Reporter};
use lapse_analysis::reporters::console::ConsoleReporter;
use lapse_analysis::EVENT_LEAK_RULE;
use lapse_core::diagnostics::{Finding, Location, Severity};

fn finding(file: &str, line: u32, column: u32) -> Finding {
    Finding::new(
        &EVENT_LEAK_RULE,
        Location {
            file: file.to_string(),
            line,
            column,
            end_line: line,
            end_column: column + 20,
            start_byte: 0,
            end_byte: 20,
        },
    )
}

#[test]
fn every_listed_format_can_be_created() {
    for format in available_formats() {
        let reporter = create_reporter(format).expect("listed format");
        assert_eq!(reporter.name(), *format);
    }
    assert!(create_reporter("sarif").is_none());
}

#[test]
fn console_lists_findings_without_color() {
    let reporter = ConsoleReporter::new(false);
    let output = reporter
        .generate(&[finding("src/a.cs", 15, 13), finding("src/b.cs", 3, 9)])
        .unwrap();

    assert!(output.contains(
        "src/a.cs:15:13: warning: Event subscribed to but never unsubscribed from [EventHandlerLeakAnalyzer]"
    ));
    assert!(output.contains("src/b.cs:3:9: warning:"));
    assert!(output.contains("2 leaked event subscriptions in 2 files."));
    assert!(!output.contains("\x1b["));
}

#[test]
fn console_colors_by_severity() {
    let reporter = ConsoleReporter::new(true);
    let output = reporter
        .generate(&[finding("a.cs", 1, 1).with_severity(Severity::Error)])
        .unwrap();
    assert!(output.contains("\x1b[31merror\x1b[0m"));
    assert!(output.contains("1 leaked event subscription in 1 file."));
}

#[test]
fn console_reports_clean_run() {
    let output = ConsoleReporter::new(false).generate(&[]).unwrap();
    assert_eq!(output, "No leaked event subscriptions found.\n");
}

#[test]
fn json_output_round_trips_findings() {
    let reporter = create_reporter("json").unwrap();
    let findings = vec![finding("a.cs", 15, 13)];
    let output = reporter.generate(&findings).unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["finding_count"], 1);
    assert_eq!(value["findings"][0]["rule_id"], "EventHandlerLeakAnalyzer");
    assert_eq!(value["findings"][0]["severity"], "warning");
    assert_eq!(value["findings"][0]["location"]["line"], 15);

    let parsed: Vec<Finding> = serde_json::from_value(value["findings"].clone()).unwrap();
    assert_eq!(parsed, findings);
}
