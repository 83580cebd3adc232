use crate::common::command::{run_rcslog_command, workspace_dir, write_report};
use crate::common::report::{DELETED_FILE_LOG, FILE2_LOG, TOOL_ERROR, report};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

#[rstest]
fn list_all_changes_in_commit_order(
    workspace_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = write_report(
        &workspace_dir,
        "rlog.txt",
        &report(&[FILE2_LOG, DELETED_FILE_LOG]),
    );

    let output =
        run_rcslog_command(workspace_dir.path(), &["changes", input.to_str().unwrap()])
            .output()?;

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "\
2010-01-20 09:00:00 +0000 module1/file2.txt New -> 1.1 ann new Initial revision
2010-01-20 09:00:00 +0000 module1/file2.txt 1.1 -> 1.1.1.1 ann +0 -0 Vendor import
2010-01-22 08:30:00 +0000 module2/deleted_file.txt New -> 1.1 joe new Added a file that will be removed
2010-01-23 10:00:00 +0000 module1/file2.txt 1.1 -> 1.2 ann +5 -0 Second change
2010-01-23 12:00:00 +0000 module1/file2.txt 1.2 -> 1.2.2.1 bob +1 -1 Fix on the stable branch
2010-01-24 14:20:12 +0000 module1/file2.txt 1.2 -> 1.3 joe +2 -1 Third change on trunk
2010-01-24 14:58:59 +0000 module2/deleted_file.txt 1.1 -> 1.2 joe +0 -0 Removed
"
    );

    Ok(())
}

#[rstest]
#[case("1.1", 3)]
#[case("1.2", 2)]
#[case("1.3", 0)]
fn list_changes_since_a_revision(
    workspace_dir: TempDir,
    #[case] since: &str,
    #[case] expected: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = write_report(&workspace_dir, "rlog.txt", FILE2_LOG);

    let output = run_rcslog_command(
        workspace_dir.path(),
        &["changes", input.to_str().unwrap(), "--since", since],
    )
    .output()?;

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout)?.lines().count(), expected);

    Ok(())
}

#[rstest]
fn files_without_the_base_revision_are_skipped(
    workspace_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = write_report(
        &workspace_dir,
        "rlog.txt",
        &report(&[FILE2_LOG, DELETED_FILE_LOG]),
    );

    run_rcslog_command(
        workspace_dir.path(),
        &["changes", input.to_str().unwrap(), "--since", "1.2.2.1"],
    )
    .assert()
    .success()
    .stdout(predicate::eq(
        "2010-01-24 14:20:12 +0000 module1/file2.txt 1.2 -> 1.3 joe +2 -1 Third change on trunk\n",
    ))
    .stderr(predicate::str::contains(
        "skipping module2/deleted_file.txt: unknown revision 1.2.2.1",
    ));

    Ok(())
}

#[rstest]
fn tool_errors_are_counted(workspace_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_rcslog_command(workspace_dir.path(), &["changes"])
        .write_stdin(report(&[TOOL_ERROR, DELETED_FILE_LOG]))
        .assert()
        .failure()
        .stdout(predicate::str::contains("module2/deleted_file.txt 1.1 -> 1.2"))
        .stderr(predicate::str::contains(
            "1 file(s) of the report could not be read; 2 change(s) listed",
        ));

    Ok(())
}
