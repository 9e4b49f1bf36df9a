//! Workspace settings (`.stagekit/settings.yaml`)
//!
//! A small set of named settings loaded when a command starts and written
//! back when it finishes. Relative directory settings are resolved against
//! the project root.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::DescriptorProfile;
use crate::domain::capability::DEFAULT_GIT_INSTALL_DIR;
use crate::error::{Result, config, fs};

/// Settings file name inside the workspace directory
pub const SETTINGS_FILE: &str = "settings.yaml";

/// Environment variable overriding the asset cache directory
pub const ASSET_CACHE_ENV: &str = "STAGEKIT_ASSET_CACHE";

/// Subdirectory of the data directory holding one YAML file per descriptor
pub const DESCRIPTORS_DIR: &str = "descriptors";

/// Subdirectory of the data directory holding one YAML file per stage
pub const STAGES_DIR: &str = "stages";

const DEFAULT_DATA_DIR: &str = ".stagekit";
const DEFAULT_ARCHIVE_EXTENSION: &str = "unitypackage";
const DEFAULT_IMPORT_DIR: &str = "Assets/Imported";
const DEFAULT_REGISTRY_MANIFEST: &str = "Packages/manifest.json";
const DEFAULT_GIT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 2;

const DEFAULT_GIT_URIS: &[&str] = &[
    "git@github.com:3dtbd/Textures.git",
    "git@github.com:3dtbd/DevLogger.git",
    "git@github.com:3dtbd/Models.git",
    "git@github.com:3dtbd/VegetationStudioProExtensions.git",
    "git@github.com:3dtbd/nvjob-water-shader-simple-and-fast.git",
    "git@github.com:3dtbd/nvjob-sky-shader-simple-and-fast.git",
    "git@github.com:3dtbd/TheFirstPerson.git",
];

/// Keys accepted by [`Settings::get`] and [`Settings::set`], in display order
pub const KEYS: &[&str] = &[
    "asset_cache_dir",
    "data_dir",
    "archive_extension",
    "known_git_uris",
    "git_install_dir",
    "import_dir",
    "registry_index",
    "registry_manifest",
    "git_program",
    "git_timeout_secs",
    "refresh_interval_secs",
    "profiles",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where locally cached package archives are scanned for
    pub asset_cache_dir: String,

    /// Where the workflow, stages and descriptors are stored
    pub data_dir: String,

    /// File extension of package archives, without the dot
    pub archive_extension: String,

    pub known_git_uris: Vec<String>,

    /// Directory git packages are added under
    pub git_install_dir: String,

    /// Directory local archives are imported into
    pub import_dir: String,

    /// JSON index searched for registry packages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_index: Option<String>,

    /// Project manifest that registry installs are recorded in
    pub registry_manifest: String,

    pub git_program: String,
    pub git_timeout_secs: u64,
    pub refresh_interval_secs: u64,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub profiles: Vec<DescriptorProfile>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            asset_cache_dir: default_asset_cache_dir(),
            data_dir: DEFAULT_DATA_DIR.to_string(),
            archive_extension: DEFAULT_ARCHIVE_EXTENSION.to_string(),
            known_git_uris: DEFAULT_GIT_URIS.iter().map(|s| (*s).to_string()).collect(),
            git_install_dir: DEFAULT_GIT_INSTALL_DIR.to_string(),
            import_dir: DEFAULT_IMPORT_DIR.to_string(),
            registry_index: None,
            registry_manifest: DEFAULT_REGISTRY_MANIFEST.to_string(),
            git_program: "git".to_string(),
            git_timeout_secs: DEFAULT_GIT_TIMEOUT_SECS,
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            profiles: Vec::new(),
        }
    }
}

/// Default asset cache location.
///
/// Uses the platform data directory with a `stagekit/asset-cache`
/// subdirectory. Can be overridden with the `STAGEKIT_ASSET_CACHE`
/// environment variable.
pub fn default_asset_cache_dir() -> String {
    if let Some(dir) = asset_cache_override() {
        return dir;
    }

    dirs::data_dir()
        .map(|d| d.join("stagekit").join("asset-cache"))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR).join("asset-cache"))
        .to_string_lossy()
        .to_string()
}

fn asset_cache_override() -> Option<String> {
    std::env::var(ASSET_CACHE_ENV)
        .ok()
        .map(|dir| dir.trim().to_string())
        .filter(|dir| !dir.is_empty())
}

fn parse_number(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| config::invalid(format!("{key} must be a whole number: {e}")))
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl Settings {
    /// Load settings from `<stagekit_dir>/settings.yaml`, or defaults if the file is absent
    pub fn load(stagekit_dir: &Path) -> Result<Self> {
        let path = stagekit_dir.join(SETTINGS_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }

        let yaml = std::fs::read_to_string(&path)
            .map_err(|e| config::read_failed(path.display().to_string(), e.to_string()))?;
        let settings: Self = serde_yaml::from_str(&yaml)
            .map_err(|e| config::parse_failed(path.display().to_string(), e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, stagekit_dir: &Path) -> Result<()> {
        let path = stagekit_dir.join(SETTINGS_FILE);
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(&path, yaml)
            .map_err(|e| fs::write_failed(path.display().to_string(), e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.archive_extension.trim_start_matches('.').is_empty() {
            return Err(config::invalid("archive_extension cannot be empty"));
        }
        if self.git_timeout_secs == 0 {
            return Err(config::invalid("git_timeout_secs must be greater than 0"));
        }
        if self.refresh_interval_secs == 0 {
            return Err(config::invalid("refresh_interval_secs must be greater than 0"));
        }
        if self.data_dir.trim().is_empty() {
            return Err(config::invalid("data_dir cannot be empty"));
        }
        Ok(())
    }

    /// Resolve a directory setting against the project root
    pub fn resolve(root: &Path, value: &str) -> PathBuf {
        let path = Path::new(value);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            root.join(path)
        }
    }

    pub fn data_path(&self, root: &Path) -> PathBuf {
        Self::resolve(root, &self.data_dir)
    }

    pub fn descriptors_path(&self, root: &Path) -> PathBuf {
        self.data_path(root).join(DESCRIPTORS_DIR)
    }

    pub fn stages_path(&self, root: &Path) -> PathBuf {
        self.data_path(root).join(STAGES_DIR)
    }

    /// Asset cache directory, with `STAGEKIT_ASSET_CACHE` taking precedence
    /// over the stored setting when it is set
    pub fn asset_cache_path(&self, root: &Path) -> PathBuf {
        match asset_cache_override() {
            Some(dir) => Self::resolve(root, &dir),
            None => Self::resolve(root, &self.asset_cache_dir),
        }
    }

    /// Archive extension without a leading dot
    pub fn archive_extension(&self) -> &str {
        self.archive_extension.trim_start_matches('.')
    }

    pub fn git_timeout(&self) -> Duration {
        Duration::from_secs(self.git_timeout_secs)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// Create every directory the workspace needs.
    ///
    /// A directory that cannot be created is fatal: nothing downstream can
    /// work with an invalid path.
    pub fn ensure_directories(&self, root: &Path) -> Result<()> {
        let dirs = [
            self.asset_cache_path(root),
            self.data_path(root),
            self.descriptors_path(root),
            self.stages_path(root),
        ];

        for dir in dirs {
            std::fs::create_dir_all(&dir).map_err(|e| {
                config::dir_create_failed(dir.display().to_string(), e.to_string())
            })?;
        }
        Ok(())
    }

    /// Current value of a setting, rendered as a string
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "asset_cache_dir" => self.asset_cache_dir.clone(),
            "data_dir" => self.data_dir.clone(),
            "archive_extension" => self.archive_extension.clone(),
            "known_git_uris" => self.known_git_uris.join(","),
            "git_install_dir" => self.git_install_dir.clone(),
            "import_dir" => self.import_dir.clone(),
            "registry_index" => self.registry_index.clone().unwrap_or_default(),
            "registry_manifest" => self.registry_manifest.clone(),
            "git_program" => self.git_program.clone(),
            "git_timeout_secs" => self.git_timeout_secs.to_string(),
            "refresh_interval_secs" => self.refresh_interval_secs.to_string(),
            "profiles" => format!("{} profile(s)", self.profiles.len()),
            _ => return Err(config::unknown_setting(key)),
        };
        Ok(value)
    }

    /// Update a setting from its string form.
    ///
    /// `known_git_uris` takes a comma-separated list. Profiles are structured
    /// and can only be edited in the settings file.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut updated = self.clone();
        match key {
            "asset_cache_dir" => updated.asset_cache_dir = value.trim().to_string(),
            "data_dir" => updated.data_dir = value.trim().to_string(),
            "archive_extension" => updated.archive_extension = value.trim().to_string(),
            "known_git_uris" => {
                updated.known_git_uris = value
                    .split(',')
                    .filter_map(optional)
                    .collect();
            }
            "git_install_dir" => updated.git_install_dir = value.trim().to_string(),
            "import_dir" => updated.import_dir = value.trim().to_string(),
            "registry_index" => updated.registry_index = optional(value),
            "registry_manifest" => updated.registry_manifest = value.trim().to_string(),
            "git_program" => updated.git_program = value.trim().to_string(),
            "git_timeout_secs" => updated.git_timeout_secs = parse_number(key, value)?,
            "refresh_interval_secs" => updated.refresh_interval_secs = parse_number(key, value)?,
            "profiles" => {
                return Err(config::invalid(format!(
                    "profiles can only be edited in {SETTINGS_FILE}"
                )));
            }
            _ => return Err(config::unknown_setting(key)),
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}
