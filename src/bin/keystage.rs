use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use keystage::{
    ChromaKey, Editor, EditorCommand, EditorConfig, ImageDecoder, RasterImage, decode_raster,
    encode_png,
};

#[derive(Parser, Debug)]
#[command(name = "keystage", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Chroma-key an image and write the result as a PNG.
    Key(KeyArgs),
    /// Place an overlay on a background, replay edits and export.
    Compose(ComposeArgs),
}

#[derive(Parser, Debug)]
struct KeyArgs {
    /// Input image (PNG or JPEG).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Key color as `R,G,B`.
    #[arg(long, value_parser = parse_rgb)]
    key: Option<[u8; 3]>,

    /// Channel distance that is fully transparent.
    #[arg(long)]
    tolerance: Option<u8>,

    /// Width of the soft edge above the tolerance.
    #[arg(long)]
    ramp: Option<u8>,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Background image.
    #[arg(long)]
    background: PathBuf,

    /// Overlay image; keyed on load.
    #[arg(long)]
    overlay: PathBuf,

    /// JSON array of editor commands to replay.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Editor config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output composite PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Also write the keyed (and cropped) overlay here.
    #[arg(long)]
    overlay_out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Key(args) => cmd_key(args),
        Command::Compose(args) => cmd_compose(args),
    }
}

fn cmd_key(args: KeyArgs) -> anyhow::Result<()> {
    let defaults = ChromaKey::default();
    let key = ChromaKey {
        key: args.key.unwrap_or(defaults.key),
        tolerance: args.tolerance.unwrap_or(defaults.tolerance),
        ramp_width: args.ramp.unwrap_or(defaults.ramp_width),
    };

    let raw = read_raster(&args.in_path)?;
    let keyed = key.extract(&raw);
    write_png(&args.out, &keyed)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => EditorConfig::from_path(path)?,
        None => EditorConfig::default(),
    };
    let commands = match &args.script {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("read script '{}'", path.display()))?;
            EditorCommand::parse_script(&json)?
        }
        None => Vec::new(),
    };

    let background = read_bytes(&args.background)?;
    let overlay = read_bytes(&args.overlay)?;

    let mut editor = Editor::new(config);
    pollster::block_on(async {
        editor
            .load_background_bytes(&ImageDecoder, &background)
            .await?;
        editor.load_overlay_bytes(&ImageDecoder, &overlay).await
    })?;

    let total = commands.len();
    let applied = commands
        .into_iter()
        .filter(|command| editor.apply(*command).is_applied())
        .count();
    tracing::info!(applied, total, "script replayed");

    let composite = editor
        .export_composite()
        .context("no background loaded")?;
    write_png(&args.out, &composite)?;
    eprintln!("wrote {}", args.out.display());

    if let Some(path) = &args.overlay_out {
        let overlay = editor.export_overlay_only().context("no overlay loaded")?;
        write_png(path, &overlay)?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn read_bytes(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))
}

fn read_raster(path: &Path) -> anyhow::Result<RasterImage> {
    let bytes = read_bytes(path)?;
    decode_raster(&bytes).with_context(|| format!("decode '{}'", path.display()))
}

fn write_png(path: &Path, raster: &RasterImage) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let bytes = encode_png(raster)?;
    std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))
}

fn parse_rgb(s: &str) -> Result<[u8; 3], String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<u8>().map_err(|e| format!("'{p}': {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    <[u8; 3]>::try_from(parts).map_err(|_| format!("expected R,G,B, got '{s}'"))
}
