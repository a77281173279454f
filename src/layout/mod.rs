pub mod engine;
pub mod fit;

pub use engine::{
    DEFAULT_DECORATIONS, RenderOptions, RenderReport, default_fonts_dir, render_card,
    render_card_with_report,
};
pub use fit::{TitleFit, TitleRequest, fit_title, title_size_candidates};
