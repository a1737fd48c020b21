//! User preferences: theme, PIN lock, entry structure toggles, nickname.
//!
//! Settings are an explicit value object. They are loaded once when a session
//! starts, handed to the session by value, and written back only when the user
//! saves them.

use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::errors::{DiaryError, Result};
use crate::utils::paths::{ensure_dir, PathResolver};

const TMP_SUFFIX: &str = "tmp";
const PIN_LENGTH: usize = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

impl FromStr for Theme {
    type Err = DiaryError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "system" => Ok(Theme::System),
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(DiaryError::InvalidInput(format!("unknown theme `{}`", other))),
        }
    }
}

/// Which optional parts of an entry the wizard asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureToggles {
    pub discomfort_level: bool,
    pub reflection: bool,
    pub actions: bool,
}

impl Default for StructureToggles {
    fn default() -> Self {
        Self {
            discomfort_level: true,
            reflection: true,
            actions: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_code: Option<String>,
    #[serde(default)]
    pub structure: StructureToggles,
    #[serde(default = "default_nickname")]
    pub nickname: String,
}

fn default_nickname() -> String {
    "Friend".into()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            pin_code: None,
            structure: StructureToggles::default(),
            nickname: default_nickname(),
        }
    }
}

impl AppSettings {
    pub fn has_pin(&self) -> bool {
        self.pin_code.as_deref().is_some_and(|pin| !pin.is_empty())
    }

    pub fn set_pin(&mut self, pin: &str) -> Result<()> {
        validate_pin(pin)?;
        self.pin_code = Some(pin.to_string());
        Ok(())
    }

    pub fn clear_pin(&mut self) {
        self.pin_code = None;
    }

    pub fn pin_matches(&self, candidate: &str) -> bool {
        self.pin_code.as_deref() == Some(candidate.trim())
    }

    /// Blank nicknames fall back to the default.
    pub fn set_nickname(&mut self, nickname: &str) {
        let trimmed = nickname.trim();
        self.nickname = if trimmed.is_empty() {
            default_nickname()
        } else {
            trimmed.to_string()
        };
    }
}

pub fn validate_pin(pin: &str) -> Result<()> {
    if pin.len() == PIN_LENGTH && pin.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(DiaryError::InvalidInput(format!(
            "PIN must be exactly {} digits",
            PIN_LENGTH
        )))
    }
}

/// Loads and persists [`AppSettings`] as JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        let config_root = PathResolver::config_dir_in(&base);
        ensure_dir(&config_root)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<AppSettings> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| DiaryError::Config(err.to_string()))
        } else {
            Ok(AppSettings::default())
        }
    }

    pub fn save(&self, settings: &AppSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::info!(path = %self.path.display(), "settings saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

pub(crate) fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
        let settings = manager.load().expect("load");
        assert_eq!(settings, AppSettings::default());
        assert!(!settings.has_pin());
    }

    #[test]
    fn save_then_load_keeps_pin_and_structure() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
        let mut settings = AppSettings::default();
        settings.set_pin("1234").expect("valid pin");
        settings.structure.reflection = false;
        settings.theme = Theme::Dark;
        manager.save(&settings).expect("save");

        let loaded = manager.load().expect("load");
        assert!(loaded.pin_matches("1234"));
        assert!(!loaded.structure.reflection);
        assert_eq!(loaded.theme, Theme::Dark);
    }

    #[test]
    fn pin_must_be_four_digits() {
        let mut settings = AppSettings::default();
        assert!(settings.set_pin("12a4").is_err());
        assert!(settings.set_pin("12345").is_err());
        assert!(!settings.has_pin());
    }

    #[test]
    fn blank_nickname_falls_back() {
        let mut settings = AppSettings::default();
        settings.set_nickname("   ");
        assert_eq!(settings.nickname, "Friend");
        settings.set_nickname(" Mira ");
        assert_eq!(settings.nickname, "Mira");
    }
}
