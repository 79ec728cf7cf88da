use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gitnet::{
    Config, DataSource as _, Dataset, FocusCommit, FocusLane, FontSource, FrameRGBA,
    GraphRenderer, IndexedDataset, JsonFileSource, NetworkView, NullHost, TextEngine,
};

#[derive(Parser, Debug)]
#[command(name = "gitnet", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the whole network surface as a PNG.
    Render(RenderArgs),
    /// Render one viewport frame (axes, grid, visible network) as a PNG.
    Frame(FrameArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Dataset JSON holding `meta` and `commits`.
    #[arg(long, conflicts_with_all = ["meta", "chunk"], required_unless_present = "meta")]
    input: Option<PathBuf>,

    /// Network meta response (use with --chunk).
    #[arg(long, requires = "chunk")]
    meta: Option<PathBuf>,

    /// Network chunk response holding `commits` (use with --meta).
    #[arg(long, requires = "meta")]
    chunk: Option<PathBuf>,

    /// JSON file with option overrides.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Extra font file; repeatable.
    #[arg(long = "font")]
    fonts: Vec<PathBuf>,

    /// Do not query installed fonts.
    #[arg(long)]
    no_system_fonts: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = 920)]
    width: u32,

    #[arg(long, default_value_t = 400)]
    height: u32,

    /// Time index, commit id (or prefix) or YYYY-MM-DD to center on.
    #[arg(long)]
    focus_commit: Option<FocusCommit>,

    /// Lane index or contributor name to scroll to the top.
    #[arg(long)]
    focus_lane: Option<FocusLane>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn load_config(args: &InputArgs) -> anyhow::Result<Config> {
    let mut cfg = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read config '{}'", path.display()))?;
            let overrides: serde_json::Value =
                serde_json::from_str(&text).with_context(|| "parse config JSON")?;
            Config::from_overrides(&overrides)?
        }
        None => Config::default(),
    };
    if args.no_system_fonts {
        cfg.fonts.system = false;
    }
    cfg.fonts.files.extend(args.fonts.iter().cloned());
    Ok(cfg)
}

fn load_dataset(args: &InputArgs) -> anyhow::Result<Dataset> {
    let mut source = match (&args.input, &args.meta, &args.chunk) {
        (Some(path), _, _) => JsonFileSource::single(path),
        (None, Some(meta), Some(chunk)) => JsonFileSource::meta_and_chunk(meta, chunk),
        _ => anyhow::bail!("pass --input or both --meta and --chunk"),
    };
    source
        .load()?
        .ok_or_else(|| anyhow::anyhow!("data source returned no dataset"))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.input)?;
    let ds = load_dataset(&args.input)?;
    let indexed = IndexedDataset::new(Arc::new(ds), cfg.only_primary_contributor);

    let mut text = TextEngine::new(FontSource::from_config(&cfg.fonts));
    let network = GraphRenderer.render_full(Some(&indexed), &cfg, &mut text)?;
    write_png(&args.out, &network.surface.to_frame())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.input)?;
    let ds = load_dataset(&args.input)?;

    let mut view = NetworkView::new(cfg, args.width, args.height, NullHost)?;
    view.set_data(Some(ds))?;
    if let Some(target) = &args.focus_commit {
        view.focus_on_commit(target)?;
    }
    if let Some(target) = &args.focus_lane {
        view.focus_on_lane(target)?;
    }
    view.on_frame()?;
    write_png(&args.out, view.frame())
}

fn write_png(out: &Path, frame: &FrameRGBA) -> anyhow::Result<()> {
    if frame.is_empty() {
        anyhow::bail!("nothing to write: {}x{} image", frame.width, frame.height);
    }
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        out,
        &frame.to_straight_rgba(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}
