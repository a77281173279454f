//! Theme and preset files, and the merge that layers user params over a preset.

use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::error::{CardError, CardResult},
    params::model::Theme,
};

pub const THEME_FILE: &str = "default.json";
/// Preset name meaning "no preset".
pub const NO_PRESET: &str = "none";

/// Read `{dir}/default.json`. A missing file is an empty theme.
pub fn load_theme(dir: &Path) -> CardResult<Theme> {
    let path = dir.join(THEME_FILE);
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "no theme file");
        return Ok(Theme::default());
    }
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("read theme '{}'", path.display()))?;
    serde_json::from_str(&text)
        .map_err(|e| CardError::serde(format!("parse theme '{}': {e}", path.display())))
}

/// Read preset `name` from `{dir}/{name}.json`. `none` and the empty name are an empty object.
pub fn load_preset(dir: &Path, name: &str) -> CardResult<serde_json::Value> {
    let name = name.trim();
    if name.is_empty() || name == NO_PRESET {
        return Ok(serde_json::Value::Object(serde_json::Map::new()));
    }
    if name.contains(['/', '\\']) || name.starts_with('.') {
        return Err(CardError::config(format!("invalid preset name: {name}")));
    }
    let path = dir.join(format!("{name}.json"));
    if !path.is_file() {
        return Err(CardError::config(format!("preset not found: {name}")));
    }
    load_json(&path)
}

/// Parse a JSON document from disk.
pub fn load_json(path: &Path) -> CardResult<serde_json::Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read JSON '{}'", path.display()))?;
    serde_json::from_str(&text)
        .map_err(|e| CardError::serde(format!("parse JSON '{}': {e}", path.display())))
}

/// `over` layered on top of `base`. Objects merge key by key, recursively; any other value in
/// `over` replaces the one in `base`.
pub fn deep_merge(base: &serde_json::Value, over: &serde_json::Value) -> serde_json::Value {
    match (base, over) {
        (serde_json::Value::Object(a), serde_json::Value::Object(b)) => {
            let mut out = a.clone();
            for (k, v) in b {
                let merged = match out.get(k) {
                    Some(existing) if existing.is_object() && v.is_object() => {
                        deep_merge(existing, v)
                    }
                    _ => v.clone(),
                };
                out.insert(k.clone(), merged);
            }
            serde_json::Value::Object(out)
        }
        _ => over.clone(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/config.rs"]
mod tests;
