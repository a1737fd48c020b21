use dirs::home_dir;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".sterdiary";
const HOME_ENV: &str = "STERDIARY_HOME";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "settings.json";
const ENTRIES_FILE: &str = "entries.json";

/// Resolves where diary data and settings live on disk.
pub struct PathResolver;

impl PathResolver {
    /// `$STERDIARY_HOME`, falling back to `~/.sterdiary`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn resolve_base(root: Option<PathBuf>) -> PathBuf {
        root.unwrap_or_else(Self::base_dir)
    }

    pub fn config_dir_in(base: &Path) -> PathBuf {
        base.join(CONFIG_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        Self::config_dir_in(base).join(CONFIG_FILE)
    }

    pub fn entries_file_in(base: &Path) -> PathBuf {
        base.join(ENTRIES_FILE)
    }
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_live_under_base() {
        let base = PathBuf::from("/tmp/diary");
        assert_eq!(
            PathResolver::config_file_in(&base),
            PathBuf::from("/tmp/diary/config/settings.json")
        );
        assert_eq!(
            PathResolver::entries_file_in(&base),
            PathBuf::from("/tmp/diary/entries.json")
        );
        assert_eq!(PathResolver::resolve_base(Some(base.clone())), base);
    }
}
