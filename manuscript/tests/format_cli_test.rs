mod common;

use assert_cmd::prelude::*;
use common::{Workspace, FAILING_CONVERTER, TRIM_CONVERTER};
use predicates::prelude::*;

#[test]
fn format_missing_document_fails() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["format", "--document", "nope.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn format_missing_marker_leaves_document_untouched() {
    let ws = Workspace::new();
    ws.write("README.md", "Title\nNo marker in here\n");

    ws.cmd()
        .args(["format"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Marker line 'Introduction' not found"));

    assert_eq!(ws.read("README.md"), "Title\nNo marker in here\n");
}

#[test]
fn format_missing_converter_leaves_document_untouched() {
    let ws = Workspace::new();
    ws.write("README.md", "Title\nIntroduction\nBody\n");
    ws.write(
        "manuscript.toml",
        "[convert]\nbinary = \"no-such-converter-binary\"\n",
    );

    ws.cmd()
        .args(["format"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found on PATH"));

    assert_eq!(ws.read("README.md"), "Title\nIntroduction\nBody\n");
}

#[test]
fn format_rejects_check_with_stdout() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["format", "--check", "--stdout"])
        .assert()
        .failure();
}

#[test]
fn format_rejects_invalid_toc_depth() {
    let ws = Workspace::new();
    ws.write("README.md", "Introduction\n");
    ws.cmd()
        .args(["format", "--toc-depth", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("toc_depth"));
}

#[cfg(unix)]
mod with_fake_converter {
    use super::*;

    fn setup(doc: &str, converter: &str) -> Workspace {
        let ws = Workspace::new();
        ws.write("README.md", doc);
        let bin = ws.script("fake-pandoc", converter);
        ws.write(
            "manuscript.toml",
            &format!("[convert]\nbinary = \"{}\"\n", bin.display()),
        );
        ws
    }

    #[test]
    fn format_drops_preamble_and_keeps_backup() {
        let original = "Preamble\nIntroduction\nBody text   \n";
        let ws = setup(original, TRIM_CONVERTER);

        ws.cmd()
            .args(["format"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Formatted"))
            .stdout(predicate::str::contains("Backup:"));

        assert_eq!(ws.read("README.md"), "Introduction\nBody text\n");
        assert_eq!(ws.read("README.md.bak"), original);
    }

    #[test]
    fn format_twice_is_stable() {
        let ws = setup("x\nIntroduction  x\nIntroduction\nline   \n", TRIM_CONVERTER);

        ws.cmd().args(["format"]).assert().success();
        let first = ws.read("README.md");
        assert_eq!(first, "Introduction\nline\n");

        ws.cmd()
            .args(["format"])
            .assert()
            .success()
            .stdout(predicate::str::contains("unchanged"));
        assert_eq!(ws.read("README.md"), first);
    }

    #[test]
    fn format_converter_failure_keeps_document() {
        let original = "Preamble\nIntroduction\nBody\n";
        let ws = setup(original, FAILING_CONVERTER);

        ws.cmd()
            .args(["format"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("pandoc: unexpected input"));

        assert_eq!(ws.read("README.md"), original);
    }

    #[test]
    fn format_check_reports_pending_change() {
        let original = "Introduction\ntrailing   \n";
        let ws = setup(original, TRIM_CONVERTER);

        ws.cmd()
            .args(["format", "--check"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("would be reformatted"));

        assert_eq!(ws.read("README.md"), original);
        assert!(!ws.path().join("README.md.bak").exists());
    }

    #[test]
    fn format_check_passes_on_formatted_document() {
        let ws = setup("Introduction\nclean\n", TRIM_CONVERTER);
        ws.cmd()
            .args(["format", "--check"])
            .assert()
            .success()
            .stdout(predicate::str::contains("already formatted"));
    }

    #[test]
    fn format_stdout_prints_without_writing() {
        let original = "drop me\nIntroduction\nkeep   \n";
        let ws = setup(original, TRIM_CONVERTER);

        ws.cmd()
            .args(["format", "--stdout"])
            .assert()
            .success()
            .stdout(predicate::eq("Introduction\nkeep\n"));

        assert_eq!(ws.read("README.md"), original);
    }

    #[test]
    fn format_custom_marker_and_no_backup() {
        let ws = setup("a\nOverview\nb\n", TRIM_CONVERTER);

        ws.cmd()
            .args(["format", "--marker", "Overview", "--no-backup"])
            .assert()
            .success();

        assert_eq!(ws.read("README.md"), "Overview\nb\n");
        assert!(!ws.path().join("README.md.bak").exists());
    }
}
