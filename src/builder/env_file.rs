//! Ancestor-directory discovery of dotenv files.

use crate::ConfigError;
use log::{debug, info};
use std::env;
use std::path::Path;

/// Search for candidate env files from the working directory up to the
/// filesystem root and load each one found into the process environment.
///
/// Loading never overwrites a variable that is already set, so the real
/// process environment always wins, and among discovered files the first
/// one in directory-then-candidate order wins for any given key. Missing
/// or malformed files are skipped; only failing to determine the working
/// directory is fatal.
pub(super) fn load_env_from_ancestors(files: &[String]) -> Result<(), ConfigError> {
    let cwd = env::current_dir().map_err(ConfigError::EnvDiscovery)?;
    load_env_from_ancestors_at(&cwd, files);
    Ok(())
}

/// Ancestor walk rooted at an explicit directory.
pub(super) fn load_env_from_ancestors_at(start: &Path, files: &[String]) {
    let mut found = false;
    for dir in start.ancestors() {
        for name in files {
            let candidate = dir.join(name);
            if !candidate.is_file() {
                continue;
            }
            match dotenvy::from_path(&candidate) {
                Ok(()) => {
                    info!("loaded env file (path={})", candidate.display());
                    found = true;
                }
                Err(err) => {
                    debug!(
                        "skipping malformed env file (path={}, error={err})",
                        candidate.display()
                    );
                }
            }
        }
    }
    if !found {
        info!("no env files found in ancestor directories");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    // The process environment is shared mutable state, so every test uses
    // variable names unique to itself.

    #[test]
    fn nearer_directory_wins_for_the_same_key() {
        let temp = TempDir::new().expect("tmp");
        let parent = temp.path();
        let child = parent.join("child");
        fs::create_dir_all(&child).expect("child");

        fs::write(child.join(".env"), "FULCRUM_TEST_NEARER=child\n").expect("write");
        fs::write(parent.join(".env"), "FULCRUM_TEST_NEARER=parent\n").expect("write");

        load_env_from_ancestors_at(&child, &[".env".to_string()]);
        assert_eq!(env::var("FULCRUM_TEST_NEARER").expect("var"), "child");
        unsafe { env::remove_var("FULCRUM_TEST_NEARER") };
    }

    #[test]
    fn process_environment_wins_over_any_file() {
        let temp = TempDir::new().expect("tmp");
        fs::write(temp.path().join(".env"), "FULCRUM_TEST_PROC=from-file\n").expect("write");

        unsafe { env::set_var("FULCRUM_TEST_PROC", "from-process") };
        load_env_from_ancestors_at(temp.path(), &[".env".to_string()]);
        assert_eq!(env::var("FULCRUM_TEST_PROC").expect("var"), "from-process");
        unsafe { env::remove_var("FULCRUM_TEST_PROC") };
    }

    #[test]
    fn earlier_candidate_name_wins_within_a_directory() {
        let temp = TempDir::new().expect("tmp");
        fs::write(temp.path().join(".env.local"), "FULCRUM_TEST_ORDER=local\n").expect("write");
        fs::write(temp.path().join(".env"), "FULCRUM_TEST_ORDER=plain\n").expect("write");

        load_env_from_ancestors_at(
            temp.path(),
            &[".env.local".to_string(), ".env".to_string()],
        );
        assert_eq!(env::var("FULCRUM_TEST_ORDER").expect("var"), "local");
        unsafe { env::remove_var("FULCRUM_TEST_ORDER") };
    }

    #[test]
    fn malformed_files_are_skipped() {
        let temp = TempDir::new().expect("tmp");
        let child = temp.path().join("child");
        fs::create_dir_all(&child).expect("child");

        fs::write(child.join(".env"), "not a valid line\n").expect("write");
        fs::write(temp.path().join(".env"), "FULCRUM_TEST_SKIP=loaded\n").expect("write");

        load_env_from_ancestors_at(&child, &[".env".to_string()]);
        assert_eq!(env::var("FULCRUM_TEST_SKIP").expect("var"), "loaded");
        unsafe { env::remove_var("FULCRUM_TEST_SKIP") };
    }

    #[test]
    fn missing_candidates_are_not_an_error() {
        let temp = TempDir::new().expect("tmp");
        load_env_from_ancestors_at(temp.path(), &["no-such-file".to_string()]);
        load_env_from_ancestors_at(temp.path(), &[]);
    }
}
