use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::{FileWriteStr, PathChild};
use rstest::fixture;
use std::path::{Path, PathBuf};

#[fixture]
pub fn workspace_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository with live, removed and administrative files
#[fixture]
pub fn cvs_repository(workspace_dir: TempDir) -> TempDir {
    for file in [
        "CVSROOT/modules,v",
        "CVSROOT/loginfo,v",
        "module1/file1.txt,v",
        "module1/file2.txt,v",
        "module1/file3.txt,v",
        "module1/CVS/fileattr.xml",
        "module2/gpl.txt,v",
        "module2/timestamp.txt,v",
        "module2/Attic/deleted_file.txt,v",
        "module2/Attic/timestamp_deleted.txt,v",
    ] {
        workspace_dir
            .child(file)
            .write_str("head\t1.1;\naccess;\nsymbols;\nlocks; strict;\n")
            .expect("Failed to write RCS file");
    }

    workspace_dir
}

pub fn run_rcslog_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("rcslog").expect("Failed to find rcslog binary");
    cmd.env("RUST_LOG", "off");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// Write tool output to a file of the workspace and return its path
pub fn write_report(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let file = dir.child(name);
    file.write_str(content).expect("Failed to write report");
    file.path().to_path_buf()
}
