use crate::theme::Theme;
use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// Contents of the settings file.
///
/// Only `theme` is interpreted. Every other key is carried through `extra`
/// so a rewrite never drops values written by something else.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Settings {
    pub theme: Theme,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub fn parse_settings(raw: &str) -> Result<Settings> {
    let value: Value = serde_json::from_str(raw).context("settings are not valid JSON")?;
    let Value::Object(mut extra) = value else {
        bail!("settings must be a JSON object");
    };

    let theme = match extra.remove("theme") {
        None => Theme::default(),
        Some(v) => serde_json::from_value::<Theme>(v.clone()).unwrap_or_else(|_| {
            warn!(value = %v, "unknown theme, using light");
            Theme::default()
        }),
    };

    Ok(Settings { theme, extra })
}

pub fn load_settings(path: &Path) -> Settings {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Settings::default();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read settings, using defaults");
            return Settings::default();
        }
    };

    parse_settings(&raw).unwrap_or_else(|e| {
        let reason = format!("{e:#}");
        warn!(path = %path.display(), error = %reason, "malformed settings, using defaults");
        Settings::default()
    })
}

pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating data directory {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json).with_context(|| format!("writing settings to {}", path.display()))?;
    debug!(path = %path.display(), theme = %settings.theme, "settings saved");
    Ok(())
}
