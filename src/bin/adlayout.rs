use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "adlayout", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the built-in pixel presets.
    Presets,
    /// Write a new template JSON (a preset, or the default layout).
    New(NewArgs),
    /// Print resolved element boxes for a target canvas.
    Resolve(ResolveArgs),
    /// Print the background-generation prompt for a template.
    Prompt(PromptArgs),
    /// Composite a template's overlays onto a background image.
    Compose(ComposeArgs),
    /// Pad an image into a square for a square-only editor.
    Square(SquareArgs),
    /// Restore an edited square to its original geometry.
    Unsquare(UnsquareArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Pixel,
    Zone,
}

#[derive(Parser, Debug)]
struct NewArgs {
    /// Output template JSON.
    #[arg(long)]
    out: PathBuf,

    /// Start from this preset id instead of the default layout.
    #[arg(long, conflicts_with_all = ["name", "width", "height"])]
    preset: Option<String>,

    /// Template name.
    #[arg(long, default_value = "Untitled")]
    name: String,

    /// Canvas width.
    #[arg(long, default_value_t = 1080)]
    width: u32,

    /// Canvas height.
    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// Positioning mode for the default layout.
    #[arg(long, value_enum, default_value_t = ModeChoice::Zone)]
    mode: ModeChoice,
}

#[derive(Parser, Debug)]
struct ResolveArgs {
    /// Input template JSON.
    #[arg(long = "template", visible_alias = "in")]
    template: PathBuf,

    /// Target width (defaults to the template canvas).
    #[arg(long)]
    width: Option<u32>,

    /// Target height (defaults to the template canvas).
    #[arg(long)]
    height: Option<u32>,
}

#[derive(Parser, Debug)]
struct PromptArgs {
    /// Input template JSON.
    #[arg(long = "template", visible_alias = "in")]
    template: PathBuf,

    /// Scene description supplied by the user.
    #[arg(long, default_value = "")]
    content: String,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Input template JSON.
    #[arg(long = "template", visible_alias = "in")]
    template: PathBuf,

    /// Background image.
    #[arg(long)]
    background: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Target width (defaults to the background width).
    #[arg(long)]
    width: Option<u32>,

    /// Target height (defaults to the background height).
    #[arg(long)]
    height: Option<u32>,

    /// Placeholder value, `key=value`. Repeatable.
    #[arg(long = "var", value_parser = parse_var)]
    vars: Vec<(String, String)>,

    /// Directory logo references resolve against (defaults to the template's directory).
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Extra font directory loaded on top of system fonts.
    #[arg(long)]
    font_dir: Option<PathBuf>,

    /// Color scheme name, overriding the template's.
    #[arg(long)]
    scheme: Option<String>,
}

#[derive(Parser, Debug)]
struct SquareArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Square side in pixels.
    #[arg(long)]
    size: u32,

    /// Output square PNG.
    #[arg(long)]
    out: PathBuf,

    /// Where to write the round-trip context JSON.
    #[arg(long)]
    ctx: PathBuf,

    /// Allow shrinking images larger than `--size`.
    #[arg(long, default_value_t = false)]
    allow_downscale: bool,
}

#[derive(Parser, Debug)]
struct UnsquareArgs {
    /// Edited square image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Round-trip context JSON written by `square`.
    #[arg(long)]
    ctx: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Presets => cmd_presets(),
        Command::New(args) => cmd_new(args),
        Command::Resolve(args) => cmd_resolve(args),
        Command::Prompt(args) => cmd_prompt(args),
        Command::Compose(args) => cmd_compose(args),
        Command::Square(args) => cmd_square(args),
        Command::Unsquare(args) => cmd_unsquare(args),
    }
}

fn parse_var(s: &str) -> Result<(String, String), String> {
    let (k, v) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    let k = k.trim();
    if k.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((k.to_string(), v.to_string()))
}

fn target_canvas(
    width: Option<u32>,
    height: Option<u32>,
    default: adlayout::Canvas,
) -> anyhow::Result<adlayout::Canvas> {
    Ok(adlayout::Canvas::new(
        width.unwrap_or(default.width),
        height.unwrap_or(default.height),
    )?)
}

fn read_image(path: &Path) -> anyhow::Result<image::RgbaImage> {
    Ok(image::open(path)
        .with_context(|| format!("read image '{}'", path.display()))?
        .to_rgba8())
}

fn write_png(path: &Path, img: &image::RgbaImage) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        path,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;

    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_presets() -> anyhow::Result<()> {
    for p in &adlayout::PRESETS {
        println!("{:<24} {:<24} {}", p.id, p.name, p.canvas);
    }
    Ok(())
}

fn cmd_new(args: NewArgs) -> anyhow::Result<()> {
    let template = match &args.preset {
        Some(id) => adlayout::preset(id)
            .with_context(|| format!("unknown preset '{id}'"))?
            .template()?,
        None => {
            let mode = match args.mode {
                ModeChoice::Pixel => adlayout::PositioningMode::Pixel,
                ModeChoice::Zone => adlayout::PositioningMode::Zone,
            };
            adlayout::Template::new_default(
                args.name,
                adlayout::Canvas::new(args.width, args.height)?,
                mode,
            )?
        }
    };

    std::fs::write(&args.out, template.to_json_pretty()?)
        .with_context(|| format!("write template '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let template = adlayout::Template::from_path(&args.template)?;
    let target = target_canvas(args.width, args.height, template.canvas())?;
    let layout = adlayout::resolve_layout(&template, target)?;

    for w in &layout.warnings {
        eprintln!("warning: {w}");
    }
    println!("{}", serde_json::to_string_pretty(&layout)?);
    Ok(())
}

fn cmd_prompt(args: PromptArgs) -> anyhow::Result<()> {
    let template = adlayout::Template::from_path(&args.template)?;
    println!("{}", adlayout::background_prompt(&template, &args.content)?);
    Ok(())
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let template = adlayout::Template::from_path(&args.template)?;
    let background = read_image(&args.background)?;
    let target = target_canvas(
        args.width,
        args.height,
        adlayout::Canvas {
            width: background.width(),
            height: background.height(),
        },
    )?;

    let assets_root = args.assets.clone().unwrap_or_else(|| {
        args.template
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf()
    });
    let mut assets = adlayout::BrandAssets::with_root(assets_root);

    let mut fonts = adlayout::FontBook::system();
    if let Some(dir) = &args.font_dir {
        fonts = fonts.with_font_dir(dir);
    }

    let vars: adlayout::ContentVars = args.vars.into_iter().collect();
    let opts = adlayout::ComposeOpts {
        scheme: args.scheme.as_deref().map(adlayout::ColorScheme::named),
        ..adlayout::ComposeOpts::default()
    };

    let out = adlayout::render_template(
        &template,
        target,
        &background,
        &vars,
        &mut assets,
        &fonts,
        &opts,
    )?;
    for w in &out.warnings {
        eprintln!("warning: {w}");
    }
    write_png(&args.out, &out.image)
}

fn cmd_square(args: SquareArgs) -> anyhow::Result<()> {
    let img = read_image(&args.in_path)?;
    let (square, ctx) = if args.allow_downscale {
        adlayout::to_square_downscaled(&img, args.size)?
    } else {
        adlayout::to_square(&img, args.size)?
    };

    std::fs::write(&args.ctx, serde_json::to_string_pretty(&ctx)?)
        .with_context(|| format!("write context '{}'", args.ctx.display()))?;
    write_png(&args.out, &square)
}

fn cmd_unsquare(args: UnsquareArgs) -> anyhow::Result<()> {
    let f = std::fs::File::open(&args.ctx)
        .with_context(|| format!("open context '{}'", args.ctx.display()))?;
    let ctx: adlayout::RoundTripContext = serde_json::from_reader(std::io::BufReader::new(f))
        .with_context(|| "parse round-trip context JSON")?;

    let edited = read_image(&args.in_path)?;
    let restored = adlayout::from_square(&edited, &ctx)?;
    write_png(&args.out, &restored)
}
