//! Isolated test environment with temp directory.

// Allow dead code since not every test binary uses every helper
#![allow(dead_code)]

use super::DaybookCommand;
use chrono::FixedOffset;
use daybook::domain::{Calendar, DayKey, RichDocument};
use daybook::store::NoteStore;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with its own store and config directory.
///
/// Creates a temp directory that is automatically cleaned up on drop. The
/// binary is pointed at a UTC config inside it, so runs never touch the
/// user's real notes or settings.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    root: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();

        let config_dir = root.join("config").join("daybook");
        std::fs::create_dir_all(&config_dir).expect("Failed to create config dir");
        std::fs::write(config_dir.join("config.toml"), "utc_offset = \"+00:00\"\n")
            .expect("Failed to write config");

        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Returns the environment's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path of the note database.
    pub fn store_path(&self) -> PathBuf {
        self.root.join("daybook.db")
    }

    /// Opens the note store directly, bypassing the CLI.
    pub fn store(&self) -> NoteStore {
        NoteStore::open(&self.store_path(), utc()).expect("Failed to open store")
    }

    /// Seeds a plain-text note for `day` (YYYY-MM-DD).
    pub fn add_note(&self, day: &str, text: &str) {
        let day: DayKey = day.parse().expect("invalid day");
        self.store()
            .upsert(day, &RichDocument::from_plain_text(text))
            .expect("Failed to seed note");
    }

    /// Returns the plain text stored for `day`, if any.
    pub fn note_text(&self, day: &str) -> Option<String> {
        let day: DayKey = day.parse().expect("invalid day");
        self.store()
            .get(day)
            .expect("Failed to read store")
            .map(|n| n.document().expect("unreadable note").plain_text())
    }

    /// Creates a DaybookCommand configured for this test environment.
    pub fn cmd(&self) -> DaybookCommand {
        let config_home = self.root.join("config");
        DaybookCommand::new()
            .env("XDG_CONFIG_HOME", &config_home)
            .env("HOME", &self.root)
            .store(&self.store_path())
    }

    /// Writes a file to the test environment and returns its path.
    pub fn write_file(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

fn utc() -> Calendar {
    Calendar::Fixed(FixedOffset::east_opt(0).expect("zero offset"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.root().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_provides_command() {
        let env = TestEnv::new();
        let cmd = env.cmd();
        let args = cmd.get_args();
        assert_eq!(args[0], "--store");
        assert_eq!(args[1], env.store_path().to_string_lossy());
    }

    #[test]
    fn test_env_seeds_notes() {
        let env = TestEnv::new();
        env.add_note("2024-01-01", "Buy milk");
        assert_eq!(env.note_text("2024-01-01").as_deref(), Some("Buy milk"));
        assert_eq!(env.note_text("2024-01-02"), None);
    }
}
