use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::backup::default_backup_path;
use crate::convert::{ConvertOptions, HeadingStyle, PandocConverter};
use crate::error::{ManuscriptError, Result};
use crate::spell::HunspellChecker;

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "manuscript.toml";

/// Converter settings, the `[convert]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    pub binary: String,
    /// Input format passed to the converter
    pub from: String,
    pub columns: u32,
    pub heading_style: HeadingStyle,
    pub tab_stop: u32,
    pub target: String,
    pub toc: bool,
    pub toc_depth: u8,
    pub standalone: bool,
    pub timeout_secs: Option<u64>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        let options = ConvertOptions::default();
        Self {
            binary: "pandoc".to_string(),
            from: "markdown".to_string(),
            columns: options.columns,
            heading_style: options.heading_style,
            tab_stop: options.tab_stop,
            target: options.target,
            toc: options.toc,
            toc_depth: options.toc_depth,
            standalone: options.standalone,
            timeout_secs: None,
        }
    }
}

impl ConvertConfig {
    pub fn options(&self) -> ConvertOptions {
        ConvertOptions {
            columns: self.columns,
            heading_style: self.heading_style,
            tab_stop: self.tab_stop,
            target: self.target.clone(),
            toc: self.toc,
            toc_depth: self.toc_depth,
            standalone: self.standalone,
        }
    }

    pub fn converter(&self) -> PandocConverter {
        PandocConverter {
            binary: self.binary.clone(),
            from: self.from.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Spell checker settings, the `[spell]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellConfig {
    pub binary: String,
    pub language: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Default for SpellConfig {
    fn default() -> Self {
        Self {
            binary: "hunspell".to_string(),
            language: None,
            timeout_secs: None,
        }
    }
}

impl SpellConfig {
    pub fn checker(&self) -> HunspellChecker {
        HunspellChecker {
            binary: self.binary.clone(),
            language: self.language.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Manuscript configuration, read from `manuscript.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManuscriptConfig {
    /// Document to format and spell-check
    pub document: PathBuf,
    /// Custom word list for the spell checker
    pub word_list: PathBuf,
    /// First line to keep when formatting
    pub marker: String,
    /// Backup location (default: `<document>.bak`)
    pub backup: Option<PathBuf>,
    /// Leave the backup on disk after a successful format
    pub keep_backup: bool,
    pub convert: ConvertConfig,
    pub spell: SpellConfig,
}

impl Default for ManuscriptConfig {
    fn default() -> Self {
        Self {
            document: PathBuf::from("README.md"),
            word_list: PathBuf::from("words.dic"),
            marker: "Introduction".to_string(),
            backup: None,
            keep_backup: true,
            convert: ConvertConfig::default(),
            spell: SpellConfig::default(),
        }
    }
}

/// Raw TOML file structure. Paths stay unset unless the file names them.
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    document: Option<PathBuf>,
    word_list: Option<PathBuf>,
    marker: Option<String>,
    backup: Option<PathBuf>,
    keep_backup: Option<bool>,
    #[serde(default)]
    convert: ConvertConfig,
    #[serde(default)]
    spell: SpellConfig,
}

/// User-level config: `~/.config/manuscript/config.toml`.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("manuscript").join("config.toml"))
}

impl ManuscriptConfig {
    /// Parse TOML text. Relative paths written in the file resolve against
    /// `base_dir`; paths it leaves out keep their working-directory defaults.
    pub fn from_toml(content: &str, base_dir: &Path) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| ManuscriptError::Config(e.to_string()))?;

        let resolve = |p: PathBuf| {
            if p.is_relative() {
                base_dir.join(p)
            } else {
                p
            }
        };

        let defaults = Self::default();
        Ok(Self {
            document: file.document.map(&resolve).unwrap_or(defaults.document),
            word_list: file.word_list.map(&resolve).unwrap_or(defaults.word_list),
            marker: file.marker.unwrap_or(defaults.marker),
            backup: file.backup.map(&resolve),
            keep_backup: file.keep_backup.unwrap_or(defaults.keep_backup),
            convert: file.convert,
            spell: file.spell,
        })
    }

    /// Load from an explicit file. The file must exist.
    pub fn load_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ManuscriptError::Config(format!(
                "config file not found at {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_toml(&content, base).map_err(|e| match e {
            ManuscriptError::Config(msg) => {
                ManuscriptError::Config(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Resolve configuration for a run.
    ///
    /// Priority: explicit path, then `manuscript.toml` in `cwd`, then the
    /// user config, then defaults.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load_file(path)?, Some(path.to_path_buf())));
        }

        let local = cwd.join(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Ok((Self::load_file(&local)?, Some(local)));
        }

        if let Some(user) = user_config_path().filter(|p| p.exists()) {
            return Ok((Self::load_file(&user)?, Some(user)));
        }

        Ok((Self::default(), None))
    }

    pub fn backup_path(&self) -> PathBuf {
        self.backup
            .clone()
            .unwrap_or_else(|| default_backup_path(&self.document))
    }

    pub fn validate(&self) -> Result<()> {
        if self.marker.is_empty() {
            return Err(ManuscriptError::InvalidOption(
                "marker cannot be empty".to_string(),
            ));
        }
        if self.marker.contains('\n') {
            return Err(ManuscriptError::InvalidOption(
                "marker must be a single line".to_string(),
            ));
        }
        if self.backup_path() == self.document {
            return Err(ManuscriptError::InvalidOption(
                "backup path must differ from the document path".to_string(),
            ));
        }
        self.convert.options().validate()
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ManuscriptError::Config(e.to_string()))
    }
}
