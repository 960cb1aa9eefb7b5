#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use tempfile::TempDir;

/// A scratch project directory isolated from any user config.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path().join(name)).unwrap()
    }

    /// Write an executable shell script standing in for an external tool.
    #[cfg(unix)]
    pub fn script(&self, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.write(name, &format!("#!/bin/sh\n{}\n", body));
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path
    }

    /// `manuscript` running inside this workspace.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("manuscript").unwrap();
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env_remove("RUST_LOG");
        cmd
    }
}

/// Converter that strips trailing whitespace, ignoring its arguments.
pub const TRIM_CONVERTER: &str = "sed 's/[[:space:]]*$//'";

/// Converter that consumes its input and fails.
pub const FAILING_CONVERTER: &str = "cat >/dev/null\necho 'pandoc: unexpected input' >&2\nexit 64";

/// Pipe-mode spell checker that flags every `teh`.
pub const FAKE_HUNSPELL: &str = r#"echo '@(#) fake hunspell'
while IFS= read -r line; do
  case "$line" in
    *teh*) echo '& teh 1 0: the' ;;
    *) echo '*' ;;
  esac
  echo
done"#;
