//! One-call card generation: presets, theme, normalization, rendering and export.

use std::path::{Path, PathBuf};

use crate::{
    export::save_image,
    foundation::error::{CardError, CardResult},
    layout::{RenderOptions, render_card},
    params::{CardParams, RawParams, deep_merge, load_preset, load_theme, normalize_params},
};

/// Where themes, presets and fonts are read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Holds `themes/`, `presets/` and `fonts/`.
    pub assets_dir: PathBuf,
    pub render: RenderOptions,
}

impl GenerateOptions {
    /// Options reading everything from `assets_dir`.
    pub fn with_assets_dir(assets_dir: impl Into<PathBuf>) -> Self {
        let assets_dir = assets_dir.into();
        Self {
            render: RenderOptions {
                fonts_dir: assets_dir.join("fonts"),
                ..RenderOptions::default()
            },
            assets_dir,
        }
    }

    pub fn themes_dir(&self) -> PathBuf {
        self.assets_dir.join("themes")
    }

    pub fn presets_dir(&self) -> PathBuf {
        self.assets_dir.join("presets")
    }
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self::with_assets_dir(default_assets_dir())
    }
}

/// The package's bundled `assets/` directory.
pub fn default_assets_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets")
}

/// Layer `params` over its preset, apply the theme and normalize.
///
/// A missing or blank title is a [`CardError::Config`].
pub fn prepare_params(
    params: &serde_json::Value,
    opts: &GenerateOptions,
) -> CardResult<CardParams> {
    let theme = load_theme(&opts.themes_dir())?;
    let preset_name = params
        .get("preset")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("none");
    let preset = load_preset(&opts.presets_dir(), preset_name)?;
    let merged = deep_merge(&preset, params);

    let raw: RawParams = serde_json::from_value(merged)
        .map_err(|e| CardError::serde(format!("invalid card params: {e}")))?;
    if raw.title.as_deref().is_none_or(|t| t.trim().is_empty()) {
        return Err(CardError::config(
            "title must not be empty; set 'title' in the params",
        ));
    }
    Ok(normalize_params(&raw, &theme))
}

/// Generate a card from a params document and write it; returns the written path.
#[tracing::instrument(skip_all)]
pub fn generate_card(params: &serde_json::Value, opts: &GenerateOptions) -> CardResult<PathBuf> {
    let card = prepare_params(params, opts)?;
    let canvas = render_card(&card, &opts.render)?;
    save_image(&canvas, &card.out, card.format, card.max_file_mb)
}

#[cfg(test)]
#[path = "../tests/unit/api.rs"]
mod tests;
