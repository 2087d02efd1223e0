//! Tests running the tools over files on disk.

use std::fs;
use std::path::PathBuf;

use absint_testkit::checker::{check_file, Expectation, Verdict};
use absint_testkit::directive::{extract_file, Marker};
use absint_testkit::domain::DomainRegistry;
use absint_testkit::migrate::migrate_file;
use absint_testkit::Error;

fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

// ─── Directives ───────────────────────────────────────────────────────────────

#[test]
fn extract_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "loop.c", "// CONFIG: widening: 3\nint f(void);\n  // CONFIG:  AbstractDomain: [Interval]  \n");

    let payloads = extract_file(&path, &Marker::default()).unwrap();
    assert_eq!(payloads, vec!["widening: 3", "AbstractDomain: [Interval]"]);
}

#[test]
fn extract_rejects_truncated_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "cut.c", "// CONFIG: widening: 3\n// CONFIG: AbstractDomain: [Interval]");

    let err = extract_file(&path, &Marker::default()).unwrap_err();
    assert!(matches!(err, Error::MissingTerminator { line: 2 }));
    assert!(err.is_format_error());
}

#[test]
fn extract_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = extract_file(dir.path().join("nope.c"), &Marker::default()).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert!(!err.is_format_error());
}

// ─── Migration ────────────────────────────────────────────────────────────────

#[test]
fn migrate_rewrites_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "test.c",
        "#include <stdio.h>\n// CONFIG: {AbstractDomain: [Interval, Octagon], widening: 3}\nint main() { return 0; }\n",
    );

    let migration = migrate_file(&path, &Marker::default(), &DomainRegistry::builtin()).unwrap();
    assert_eq!(migration.domains, vec!["Interval", "Octagon"]);

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "#include <stdio.h>");
    assert_eq!(lines[3], "int main() { return 0; }");

    let mut block = lines[1..3].to_vec();
    block.sort();
    assert_eq!(
        block,
        vec![
            r#"// CONFIG: config.AbstractDomain = [domains["Interval"], domains["Octagon"]]"#,
            "// CONFIG: config.widening = 3",
        ]
    );

    // The migrated file still reads as directives.
    let payloads = extract_file(&path, &Marker::default()).unwrap();
    assert_eq!(payloads.len(), 2);
    assert!(payloads.iter().all(|p| p.starts_with("config.")));
}

#[test]
fn migrate_failure_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let original = "// CONFIG: {widening: 3}\nint x;\n";
    let path = write(&dir, "test.c", original);

    let err = migrate_file(&path, &Marker::default(), &DomainRegistry::builtin()).unwrap_err();
    assert!(matches!(err, Error::MissingKey(_)));
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

// ─── Results ──────────────────────────────────────────────────────────────────

#[test]
fn check_result_dump() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "out.txt", "%a -> bottom\n%b -> [1, 2]\n%c -> top\n");

    let report = check_file(&path, Some(Expectation::new("%b", "[1, 2]"))).unwrap();
    assert_eq!(report.verdict(), Verdict::Pass);
    assert_eq!(report.bottoms().collect::<Vec<_>>(), vec!["%a"]);

    let report = check_file(&path, Some(Expectation::new("%c", "[0, 0]"))).unwrap();
    assert_eq!(report.verdict(), Verdict::Sound);

    let report = check_file(&path, None).unwrap();
    assert_eq!(report.verdict(), Verdict::Unchecked);
    assert_eq!(report.entries_scanned, 3);
}
