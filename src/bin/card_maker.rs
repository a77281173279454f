use std::path::PathBuf;

use anyhow::Context as _;
use clap::{CommandFactory as _, Parser, ValueEnum, error::ErrorKind};
use serde_json::{Map, Value, json};

#[derive(Parser, Debug)]
#[command(name = "card-maker", version, about = "Render a 16:9 promotional hero card")]
struct Cli {
    /// Preset layered under the params.
    #[arg(long, value_enum)]
    preset: Option<PresetChoice>,

    /// Title text. Required, either here or in `--params-json`.
    #[arg(long)]
    title: Option<String>,

    /// Brand line drawn above the title.
    #[arg(long)]
    brand: Option<String>,

    /// Bullet lines for the panel. Passing the flag with no values gives an empty list.
    #[arg(long, num_args = 0..)]
    bullets: Option<Vec<String>>,

    /// Background color, `#RRGGBB` or `#RGB`.
    #[arg(long)]
    bg: Option<String>,

    /// Accent color, `#RRGGBB` or `#RGB`.
    #[arg(long)]
    accent: Option<String>,

    #[arg(long, value_enum)]
    title_align: Option<AlignChoice>,

    /// Canvas width in pixels; the height follows 16:9 when omitted.
    #[arg(long)]
    width: Option<f64>,

    /// Canvas height in pixels; the width follows 16:9 when omitted.
    #[arg(long)]
    height: Option<f64>,

    #[arg(long, value_enum)]
    format: Option<FormatChoice>,

    /// Output file path.
    #[arg(long)]
    out: PathBuf,

    /// File size budget in megabytes.
    #[arg(long = "max-mb")]
    max_mb: Option<f64>,

    #[arg(long, value_enum)]
    texture: Option<TextureChoice>,

    /// Small text drawn in the bottom-right corner.
    #[arg(long)]
    watermark: Option<String>,

    /// JSON file with params; command-line values override it.
    #[arg(long = "params-json")]
    params_json: Option<PathBuf>,

    /// Font family looked up as `{family}-{style}.ttf` in the fonts directory.
    #[arg(long)]
    font_family: Option<String>,

    /// Restrict title and body fonts to CJK-capable faces.
    #[arg(long, value_enum)]
    cjk_only: Option<OnOff>,

    /// Directory holding `themes/`, `presets/` and `fonts/`.
    #[arg(long)]
    assets_dir: Option<PathBuf>,

    /// Print the resolved fonts (name, path, size and SHA-256 of the font bytes).
    #[arg(long)]
    dump_fonts: bool,

    /// Log layout and export decisions.
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PresetChoice {
    None,
    Month,
    New,
    Season,
    Seat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AlignChoice {
    Center,
    Left,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Png,
    Jpg,
    Jpeg,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TextureChoice {
    None,
    Noise,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OnOff {
    On,
    Off,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let params = collect_params(&cli)?;
    let has_title = params
        .get("title")
        .and_then(Value::as_str)
        .is_some_and(|t| !t.trim().is_empty());
    if !has_title {
        Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "a non-empty title is required (--title or \"title\" in --params-json)",
            )
            .exit();
    }

    let mut opts = match &cli.assets_dir {
        Some(dir) => card_maker::GenerateOptions::with_assets_dir(dir),
        None => card_maker::GenerateOptions::default(),
    };
    opts.render.debug_fonts = cli.dump_fonts;

    let written = card_maker::generate_card(&params, &opts)
        .with_context(|| format!("generate card '{}'", cli.out.display()))?;

    println!("{}", written.display());
    Ok(())
}

fn init_tracing(cli: &Cli) {
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else if cli.dump_fonts {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// The `--params-json` object with every flag that was given written over it.
fn collect_params(cli: &Cli) -> anyhow::Result<Value> {
    let mut params = match &cli.params_json {
        Some(path) => match card_maker::params::load_json(path)? {
            Value::Object(map) => map,
            other => anyhow::bail!(
                "params file '{}' must hold a JSON object, found {}",
                path.display(),
                json_kind(&other)
            ),
        },
        None => Map::new(),
    };

    let mut set = |key: &str, value: Option<Value>| {
        if let Some(v) = value {
            params.insert(key.to_string(), v);
        }
    };

    set("preset", cli.preset.map(|p| json!(preset_name(p))));
    set("title", cli.title.clone().map(Value::String));
    set("brand", cli.brand.clone().map(Value::String));
    set("bullets", cli.bullets.clone().map(|b| json!(b)));
    set("bg", cli.bg.clone().map(Value::String));
    set("accent", cli.accent.clone().map(Value::String));
    set(
        "title_align",
        cli.title_align.map(|a| {
            json!(match a {
                AlignChoice::Center => "center",
                AlignChoice::Left => "left",
            })
        }),
    );
    set("width", cli.width.map(|w| json!(w)));
    set("height", cli.height.map(|h| json!(h)));
    set(
        "format",
        cli.format.map(|f| {
            json!(match f {
                FormatChoice::Png => "png",
                FormatChoice::Jpg | FormatChoice::Jpeg => "jpeg",
            })
        }),
    );
    set("out", Some(json!(cli.out)));
    set("max_file_mb", cli.max_mb.map(|m| json!(m)));
    set(
        "texture",
        cli.texture.map(|t| {
            json!(match t {
                TextureChoice::None => "none",
                TextureChoice::Noise => "noise",
            })
        }),
    );
    set("watermark", cli.watermark.clone().map(Value::String));
    set("font_family", cli.font_family.clone().map(Value::String));
    set(
        "cjk_only",
        cli.cjk_only.map(|c| Value::Bool(matches!(c, OnOff::On))),
    );

    Ok(Value::Object(params))
}

fn preset_name(p: PresetChoice) -> &'static str {
    match p {
        PresetChoice::None => "none",
        PresetChoice::Month => "month",
        PresetChoice::New => "new",
        PresetChoice::Season => "season",
        PresetChoice::Seat => "seat",
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
