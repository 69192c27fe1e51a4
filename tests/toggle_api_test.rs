//! Behavior of managed entries in config files.

use std::fs;

use offlinedatasci::mirror::{self, MirrorPaths};
use offlinedatasci::toggle::{
    activate, activate_text, deactivate, deactivate_text, ManagedEntry, ToggleOutcome,
};
use tempfile::TempDir;

fn cran_line() -> ManagedEntry {
    ManagedEntry::line(
        r#"local({r <- getOption("repos"); r["CRAN"] <- "file:///x/miniCRAN"; options(repos=r)}) #Added by offlinedatasci"#,
    )
}

fn pip_block() -> ManagedEntry {
    ManagedEntry::block(["[global]", "index-url = /x/pypi"])
}

#[test]
fn activation_is_idempotent() {
    for entry in [cran_line(), pip_block()] {
        for content in ["", "a=1\n", "a=1\nb=2", "#comment\n\n"] {
            let (once, _) = activate_text(content, &entry);
            let (twice, outcome) = activate_text(&once, &entry);
            assert_eq!(once, twice);
            assert_eq!(outcome, ToggleOutcome::AlreadyActive);
        }
    }
}

#[test]
fn activate_then_deactivate_restores_content() {
    for entry in [cran_line(), pip_block()] {
        for content in ["", "a=1\n", "x\ny\nz\n"] {
            let (on, _) = activate_text(content, &entry);
            let (off, _) = deactivate_text(&on, &entry);
            assert_eq!(off, content);
        }

        // The last line gains its terminator when the entry is appended.
        let (on, _) = activate_text("a=1\nb=2", &entry);
        let (off, _) = deactivate_text(&on, &entry);
        assert_eq!(off, "a=1\nb=2\n");
    }
}

#[test]
fn commented_line_is_uncommented_in_place() {
    let entry = cran_line();
    let content = format!("before\n#{}\nafter\n", entry.lines()[0]);

    let (updated, outcome) = activate_text(&content, &entry);

    assert_eq!(outcome, ToggleOutcome::Reactivated);
    assert_eq!(updated, format!("before\n{}\nafter\n", entry.lines()[0]));
}

#[test]
fn block_removal_keeps_surrounding_lines() {
    let content = "foo=1\n#Added by offlinedatasci\n[global]\nindex-url = /x/pypi\nbar=2\n";
    let (updated, removed) = deactivate_text(content, &pip_block());
    assert_eq!(updated, "foo=1\nbar=2\n");
    assert_eq!(removed, 3);
}

#[test]
fn deactivation_without_marker_is_noop() {
    let content = "[global]\ntimeout = 60\n";
    assert_eq!(deactivate_text(content, &pip_block()), (content.to_string(), 0));
}

#[test]
fn activation_creates_file_and_parents() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(".config").join("pip").join("pip.conf");

    let outcome = activate(&path, &pip_block()).unwrap();

    assert_eq!(outcome, ToggleOutcome::Appended);
    assert_eq!(fs::read_to_string(&path).unwrap(), pip_block().render());
}

#[test]
fn deactivating_missing_file_fails() {
    let temp = TempDir::new().unwrap();
    let err = deactivate(&temp.path().join(".Rprofile"), &cran_line()).unwrap_err();
    assert!(err.to_string().contains(".Rprofile"));
}

#[test]
fn mirrors_switch_on_and_off_together() {
    let home = TempDir::new().unwrap();
    let paths = MirrorPaths::from_home(home.path());
    fs::write(&paths.rprofile, "options(width = 100)\n").unwrap();

    let activated = mirror::activate(&paths, &home.path().join("ods")).unwrap();
    assert_eq!(activated.cran, ToggleOutcome::Appended);
    assert_eq!(activated.pypi, ToggleOutcome::Appended);
    assert!(mirror::status(&paths).unwrap().iter().all(|s| s.active));

    let removed = mirror::deactivate(&paths).unwrap();
    assert_eq!((removed.cran, removed.pypi), (1, 3));
    assert_eq!(
        fs::read_to_string(&paths.rprofile).unwrap(),
        "options(width = 100)\n"
    );
    assert!(mirror::status(&paths).unwrap().iter().all(|s| !s.active));
}
