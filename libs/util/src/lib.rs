use std::path::{Path, PathBuf};

use anyhow::Context;
use toml::{map::Map, Value};

pub fn workspace_dir() -> PathBuf {
    let output = std::process::Command::new(env!("CARGO"))
        .arg("locate-project")
        .arg("--workspace")
        .arg("--message-format=plain")
        .output()
        .map(|output| output.stdout)
        .unwrap_or_default();

    workspace_dir_from(&output)
}

/// Parent of the manifest path printed by `cargo locate-project`, or the
/// current dir when cargo printed nothing usable.
fn workspace_dir_from(locate_output: &[u8]) -> PathBuf {
    let cargo_path =
        std::str::from_utf8(locate_output).unwrap_or_default().trim();

    match Path::new(cargo_path).parent() {
        Some(dir) if !cargo_path.is_empty() => dir.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_default(),
    }
}

pub fn load_config(config_name: &str) -> anyhow::Result<Map<String, Value>> {
    let workspace_dir = workspace_dir();
    let config = std::fs::read_to_string(workspace_dir.join(config_name))
        .with_context(|| format!("failed to read {}", config_name))?;

    let config = toml::from_str::<Map<String, Value>>(&config)
        .with_context(|| format!("failed to parse {}", config_name))?;

    Ok(config)
}

pub fn load_env(secrets_name: &str) -> anyhow::Result<Map<String, Value>> {
    let workspace_dir = workspace_dir();
    let secrets = std::fs::read_to_string(workspace_dir.join(secrets_name))
        .with_context(|| format!("failed to read {}", secrets_name))?;

    toml::from_str::<Map<String, Value>>(&secrets)
        .with_context(|| format!("failed to parse {}", secrets_name))
}

/// Looks a secret up in the loaded secrets file, falling back to the process
/// environment. Blank values count as missing.
pub fn secret(secrets: &Map<String, Value>, key: &str) -> Option<String> {
    secrets
        .get(key)
        .and_then(|value| value.as_str())
        .map(str::to_string)
        .or_else(|| std::env::var(key).ok())
        .filter(|value| !value.trim().is_empty())
}
