//! Source discovery over real directories.

use std::fs;

use lapse_analysis::scanner::Scanner;
use lapse_core::config::ScanConfig;
use lapse_core::errors::ScanError;
use lapse_core::traits::CancellationToken;
use tempfile::TempDir;

fn touch(dir: &TempDir, relative: &str, contents: &str) {
    let path = dir.path().join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn discovers_only_csharp_sources_in_sorted_order() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "src/b.cs", "class B { }");
    touch(&dir, "src/a.cs", "class A { }");
    touch(&dir, "README.md", "# readme");
    touch(&dir, "Upper.CS", "class U { }");

    let files = Scanner::new(ScanConfig::default()).discover(dir.path()).unwrap();
    let relative: Vec<&str> = files.iter().map(|f| f.relative.as_str()).collect();
    assert_eq!(relative, vec!["Upper.CS", "src/a.cs", "src/b.cs"]);
    assert!(files.iter().all(|f| f.file_size > 0));
}

#[test]
fn lapseignore_and_default_directories_are_skipped() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "keep.cs", "class K { }");
    touch(&dir, "obj/Debug/skip.cs", "class S { }");
    touch(&dir, "legacy/old.cs", "class O { }");
    touch(&dir, ".lapseignore", "legacy/\n");

    let output = Scanner::new(ScanConfig::default())
        .scan(dir.path(), &CancellationToken::new())
        .unwrap();
    let relative: Vec<&str> = output.files.iter().map(|f| f.relative.as_str()).collect();
    assert_eq!(relative, vec!["keep.cs"]);
    assert!(output.stats.files_skipped_ignored >= 2);
    assert_eq!(output.stats.total_files, 1);
}

#[test]
fn configured_extensions_replace_the_default() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "a.cs", "class A { }");
    touch(&dir, "b.csx", "class B { }");

    let config = ScanConfig {
        extensions: vec!["csx".to_string()],
        ..Default::default()
    };
    let files = Scanner::new(config).discover(dir.path()).unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].relative, "b.csx");
}

#[test]
fn oversized_files_are_reported_not_returned() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "small.cs", "class S { }");
    touch(&dir, "big.cs", &"x".repeat(64));

    let config = ScanConfig {
        max_file_size: Some(32),
        ..Default::default()
    };
    let output = Scanner::new(config).scan(dir.path(), &CancellationToken::new()).unwrap();
    assert_eq!(output.files.len(), 1);
    assert_eq!(output.stats.files_skipped_large, 1);
    assert!(matches!(
        output.errors.as_slice(),
        [ScanError::MaxFileSizeExceeded { size: 64, max: 32, .. }]
    ));
}
