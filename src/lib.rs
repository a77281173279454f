//! Renders 16:9 promotional hero cards: a fitted title, an optional brand line, a bullet panel
//! with a soft shadow, and a few decorations, exported to PNG or JPEG under a size budget.
//!
//! The usual entry point is [`generate_card`], which layers params over a preset and theme,
//! normalizes them, renders and writes the file. Library users can also call
//! [`normalize_params`] and [`render_card`] directly and keep the [`Canvas`] in memory.
#![forbid(unsafe_code)]

pub mod api;
pub mod color;
pub mod export;
pub mod foundation;
pub mod layout;
pub mod params;
pub mod render;
pub mod text;

pub use api::{GenerateOptions, default_assets_dir, generate_card, prepare_params};
pub use color::{Rgb, contrast_ratio, hex_to_rgb, pick_text_color, relative_luminance, rgb_to_hex};
pub use export::{EncodedImage, encode_with_budget, save_image};
pub use foundation::error::{CardError, CardResult};
pub use layout::{RenderOptions, RenderReport, render_card, render_card_with_report};
pub use params::{CardParams, OutputFormat, RawParams, Texture, TitleAlign, normalize_params};
pub use render::Canvas;
