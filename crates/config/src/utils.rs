//! Utility functions

use crate::Config;
use eyre::WrapErr;
use std::path::{Path, PathBuf};

/// Loads the config for the current project workspace
pub fn load_config() -> eyre::Result<Config> {
    load_config_with_root(None)
}

/// Loads the config for the current project workspace or the provided root path
pub fn load_config_with_root(root: Option<PathBuf>) -> eyre::Result<Config> {
    let root = match root {
        Some(root) => root,
        None => find_project_root_path(None)?,
    };
    Config::load_with_root(&root)
        .wrap_err_with(|| format!("failed to load config at {}", root.display()))
}

/// Returns the path of the top-level directory of the working git tree. If there is no working
/// tree, an error is returned.
pub fn find_git_root_path(relative_to: impl AsRef<Path>) -> eyre::Result<PathBuf> {
    let path = relative_to.as_ref();
    let path = std::process::Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .current_dir(path)
        .output()
        .wrap_err_with(|| {
            format!("Failed detect git root path in current dir: {}", path.display())
        })?
        .stdout;
    let path = std::str::from_utf8(&path)?.trim_end_matches('\n');
    Ok(PathBuf::from(path))
}

/// Returns the root path to set for the project root
///
/// traverse the dir tree up and look for a `hoku.toml` file starting at the given path or cwd,
/// but only until the root dir of the current repo so that
///
/// ```text
/// -- hoku.toml
///
/// -- repo
///   |__ .git
///   |__sub
///      |__ [given_path | cwd]
/// ```
/// will still detect `repo` as root
pub fn find_project_root_path(path: Option<&Path>) -> std::io::Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    let cwd = path.unwrap_or(&cwd);
    let boundary = find_git_root_path(cwd)
        .ok()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| cwd.to_path_buf());
    let mut cwd = cwd;
    // traverse as long as we're in the current git repo cwd
    while cwd.starts_with(&boundary) {
        let file_path = cwd.join(Config::FILE_NAME);
        if file_path.is_file() {
            return Ok(cwd.to_path_buf());
        }
        if let Some(parent) = cwd.parent() {
            cwd = parent;
        } else {
            break;
        }
    }
    // no hoku.toml found
    Ok(boundary)
}

/// Canonicalizes `path`. If that fails, e.g. because it does not exist, the path is only made
/// absolute.
pub fn canonic(path: impl Into<PathBuf>) -> PathBuf {
    let path = path.into();
    dunce::canonicalize(&path).or_else(|_| std::path::absolute(&path)).unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_config_dir() {
        figment::Jail::expect_with(|jail| {
            let root = canonic(jail.directory());
            jail.create_file(Config::FILE_NAME, "")?;

            let found = find_project_root_path(Some(&root)).unwrap();
            assert_eq!(canonic(found), root);
            Ok(())
        });
    }

    #[test]
    fn falls_back_to_start_dir_outside_git() {
        let dir = tempfile::tempdir().unwrap();
        let start = canonic(dir.path());
        if find_git_root_path(&start).is_ok_and(|p| !p.as_os_str().is_empty()) {
            // the temp dir lives inside a work tree, the boundary is that tree instead
            return;
        }
        let found = find_project_root_path(Some(&start)).unwrap();
        assert_eq!(found, start);
    }
}
