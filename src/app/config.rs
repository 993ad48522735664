use crate::app::cli::Cli;
use crate::app::models::RuntimeConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PresetConfig {
    pub wall: Option<bool>,
    pub project_file: Option<PathBuf>,
    pub build_rule_file: Option<PathBuf>,
    pub max_file_size: Option<u64>,
}

fn presets_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("mxclangd").join("presets.toml"))
}

/// A missing file is not an error, it simply has no presets.
pub fn load_presets_file(path: &Path) -> Result<HashMap<String, PresetConfig>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {:?}", path))?;

    let parsed: PresetsFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {:?}", path))?;

    Ok(parsed.presets)
}

/// Merges CLI > preset > built-in defaults.
pub fn merge(cli: Cli, preset: PresetConfig) -> RuntimeConfig {
    let defaults = RuntimeConfig::default();
    RuntimeConfig {
        wall: cli.wall || preset.wall.unwrap_or(defaults.wall),
        project_file: cli
            .project_file
            .or(preset.project_file)
            .unwrap_or(defaults.project_file),
        build_rule_file: cli
            .build_rules
            .or(preset.build_rule_file)
            .unwrap_or(defaults.build_rule_file),
        max_file_size: preset.max_file_size.unwrap_or(defaults.max_file_size),
    }
}

pub fn resolve_config(cli: Cli, project_name: Option<&str>) -> Result<RuntimeConfig> {
    resolve_config_from(cli, project_name, presets_path().as_deref())
}

/// Without a presets location only the CLI and the built-in defaults apply.
pub fn resolve_config_from(
    cli: Cli,
    project_name: Option<&str>,
    presets_path: Option<&Path>,
) -> Result<RuntimeConfig> {
    let presets = match presets_path {
        Some(path) => load_presets_file(path)?,
        None => {
            log::warn!("💡 Could not determine home directory, presets are ignored.");
            HashMap::new()
        }
    };

    // CLI flag > directory name > None
    let preset_key = cli.preset.as_deref().or(project_name);
    if let Some(key) = cli.preset.as_deref().filter(|k| !presets.contains_key(*k)) {
        log::warn!("💡 Preset '{}' not found, using defaults.", key);
    }
    let preset = preset_key
        .and_then(|k| presets.get(k))
        .cloned()
        .unwrap_or_default();

    Ok(merge(cli, preset))
}
