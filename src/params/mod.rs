pub mod config;
pub mod model;
pub mod normalize;

pub use config::{deep_merge, load_json, load_preset, load_theme};
pub use model::{
    CardParams, Decoration, Number, OutputFormat, RawDecoration, RawParams, Switch, Texture,
    Theme, ThemeColors, TitleAlign,
};
pub use normalize::normalize_params;
