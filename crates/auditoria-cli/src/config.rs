use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use auditoria_media::compress::{CompressionSettings, JPEG_QUALITY, MAX_DIMENSION};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditoriaConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_max_dimension() -> u32 {
    MAX_DIMENSION
}

fn default_jpeg_quality() -> u8 {
    JPEG_QUALITY
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AuditoriaConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            max_dimension: default_max_dimension(),
            jpeg_quality: default_jpeg_quality(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl AuditoriaConfig {
    pub fn compression(&self) -> CompressionSettings {
        CompressionSettings {
            max_dimension: self.max_dimension,
            quality: self.jpeg_quality,
        }
    }
}

pub fn default_config_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("auditoria").join("config.json"))
}

/// Load the config at `path`, running migrations first. A missing file means
/// defaults.
pub fn load_config(path: &Path) -> eyre::Result<AuditoriaConfig> {
    if !path.exists() {
        return Ok(AuditoriaConfig::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = match json.get("config_version").and_then(|v| v.as_u64()) {
        Some(raw) => u32::try_from(raw)
            .map_err(|_| eyre::eyre!("config_version {raw} at {} is out of range", path.display()))?,
        None => 0,
    };

    let migrated = migrate(json, on_disk_version)?;
    let config: AuditoriaConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION})"
        ));
    }

    // v0 → v1: hand-written files carry no version; the shape is unchanged
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (stamped version)");
    }

    Ok(json)
}

pub fn save_config(path: &Path, config: &AuditoriaConfig) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path {} has no parent", path.display()))?;
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;
    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

/// Write the default config to `path`. An existing file is only replaced when
/// `force` is set.
pub fn init_config(path: &Path, force: bool) -> eyre::Result<AuditoriaConfig> {
    if path.exists() && !force {
        return Err(eyre::eyre!(
            "config already exists at {} (use --force to overwrite)",
            path.display()
        ));
    }

    let config = AuditoriaConfig::default();
    save_config(path, &config)?;
    Ok(config)
}
