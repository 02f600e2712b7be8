use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use frameloom::{
    FfmpegSink, FfmpegSinkOpts, FrameIndex, FrameRange, FrameSink, PngSequenceSink, Rasterizer,
    RenderConfig, SceneRegistry, SceneSource,
};

#[derive(Parser, Debug)]
#[command(name = "frameloom", version)]
struct Cli {
    /// Render configuration JSON (scene overrides, background, render options).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered scenes.
    List,
    /// Write one frame as an SVG document.
    Svg(FrameArgs),
    /// Dump one frame's scene graph as JSON.
    Json(FrameArgs),
    /// Render one frame as a PNG.
    Frame(FrameArgs),
    /// Render a frame range as MP4 (requires `ffmpeg` on PATH) or as a PNG sequence.
    Render(RenderArgs),
    /// Print per-frame scene fingerprints.
    Fingerprint(FingerprintArgs),
}

#[derive(Args, Debug)]
struct FrameArgs {
    /// Scene id (see `list`).
    #[arg(long)]
    scene: String,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct RangeArgs {
    /// First frame (inclusive).
    #[arg(long)]
    from: Option<u64>,

    /// Last frame (exclusive). Defaults to the scene duration.
    #[arg(long)]
    to: Option<u64>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Scene id (see `list`).
    #[arg(long)]
    scene: String,

    /// Output MP4 path, or output directory with `--png-dir`.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    range: RangeArgs,

    /// Enable frame-level parallelism.
    #[arg(long)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Render chunk size.
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Rasterize repeated frames once per chunk.
    #[arg(long)]
    static_frame_elision: bool,

    /// Write a numbered PNG sequence into `--out` instead of encoding MP4.
    #[arg(long)]
    png_dir: bool,
}

#[derive(Args, Debug)]
struct FingerprintArgs {
    /// Scene id (see `list`).
    #[arg(long)]
    scene: String,

    #[command(flatten)]
    range: RangeArgs,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let registry = SceneRegistry::builtin();
    config.validate(&registry)?;

    match cli.cmd {
        Command::List => cmd_list(&registry),
        Command::Svg(args) => cmd_svg(&registry, &config, args),
        Command::Json(args) => cmd_json(&registry, &config, args),
        Command::Frame(args) => cmd_frame(&registry, &config, args),
        Command::Render(args) => cmd_render(&registry, &config, args),
        Command::Fingerprint(args) => cmd_fingerprint(&registry, &config, args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<RenderConfig> {
    match path {
        Some(p) => RenderConfig::from_path(p)
            .with_context(|| format!("load render config '{}'", p.display())),
        None => Ok(RenderConfig::default()),
    }
}

fn build_scene(
    registry: &SceneRegistry,
    config: &RenderConfig,
    id: &str,
) -> anyhow::Result<Box<dyn SceneSource>> {
    let scene = registry
        .build(id, &config.override_for(id))
        .with_context(|| format!("build scene '{id}'"))?;
    Ok(scene)
}

fn resolve_range(source: &dyn SceneSource, args: &RangeArgs) -> anyhow::Result<FrameRange> {
    let duration = source.spec().duration_frames;
    let start = args.from.unwrap_or(0);
    let end = args.to.unwrap_or(duration);
    if end > duration {
        anyhow::bail!("--to {end} is past the scene duration ({duration} frames)");
    }
    let range = FrameRange::new(FrameIndex(start), FrameIndex(end))?;
    if range.is_empty() {
        anyhow::bail!("frame range {start}..{end} is empty");
    }
    Ok(range)
}

fn checked_frame(source: &dyn SceneSource, frame: u64) -> anyhow::Result<FrameIndex> {
    let duration = source.spec().duration_frames;
    if frame >= duration {
        anyhow::bail!(
            "frame {frame} is out of range for '{}' ({duration} frames)",
            source.spec().id
        );
    }
    Ok(FrameIndex(frame))
}

fn create_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_list(registry: &SceneRegistry) -> anyhow::Result<()> {
    for entry in registry.entries() {
        let spec = entry.default_spec();
        println!(
            "{:<24} {:>6} frames  {:>3} fps  {}x{}",
            spec.id,
            spec.duration_frames,
            spec.fps.as_f64(),
            spec.canvas.width,
            spec.canvas.height
        );
    }
    Ok(())
}

fn cmd_svg(
    registry: &SceneRegistry,
    config: &RenderConfig,
    args: FrameArgs,
) -> anyhow::Result<()> {
    let source = build_scene(registry, config, &args.scene)?;
    let frame = checked_frame(source.as_ref(), args.frame)?;
    let scene = source.sample(frame)?;

    create_parent_dir(&args.out)?;
    std::fs::write(&args.out, frameloom::to_svg(&scene))
        .with_context(|| format!("write svg '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_json(
    registry: &SceneRegistry,
    config: &RenderConfig,
    args: FrameArgs,
) -> anyhow::Result<()> {
    let source = build_scene(registry, config, &args.scene)?;
    let frame = checked_frame(source.as_ref(), args.frame)?;
    let scene = source.sample(frame)?;

    create_parent_dir(&args.out)?;
    let f = std::fs::File::create(&args.out)
        .with_context(|| format!("create '{}'", args.out.display()))?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(f), &scene)
        .with_context(|| format!("write scene JSON '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frame(
    registry: &SceneRegistry,
    config: &RenderConfig,
    args: FrameArgs,
) -> anyhow::Result<()> {
    let source = build_scene(registry, config, &args.scene)?;
    let frame = checked_frame(source.as_ref(), args.frame)?;

    let raster = Rasterizer::new();
    let rgba = frameloom::render_frame(source.as_ref(), frame, &raster)?;
    frameloom::write_png(&args.out, &rgba)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(
    registry: &SceneRegistry,
    config: &RenderConfig,
    args: RenderArgs,
) -> anyhow::Result<()> {
    let source = build_scene(registry, config, &args.scene)?;
    let range = resolve_range(source.as_ref(), &args.range)?;

    let mut opts = config.render.clone();
    opts.parallel |= args.parallel;
    opts.static_frame_elision |= args.static_frame_elision;
    if args.threads.is_some() {
        opts.threads = args.threads;
    }
    if let Some(n) = args.chunk_size {
        opts.chunk_size = n;
    }

    let mut sink: Box<dyn FrameSink> = if args.png_dir {
        Box::new(PngSequenceSink::new(&args.out))
    } else {
        let mut ffmpeg = FfmpegSinkOpts::new(&args.out);
        ffmpeg.bg_rgba = config.background_rgba()?;
        Box::new(FfmpegSink::new(ffmpeg))
    };

    let raster = Rasterizer::new();
    let stats = frameloom::render_range(source.as_ref(), range, &raster, &opts, sink.as_mut())
        .with_context(|| {
            format!(
                "render '{}' frames {}..{}",
                args.scene, range.start.0, range.end.0
            )
        })?;

    tracing::info!(
        total = stats.frames_total,
        rendered = stats.frames_rendered,
        elided = stats.frames_elided,
        "render finished"
    );
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_fingerprint(
    registry: &SceneRegistry,
    config: &RenderConfig,
    args: FingerprintArgs,
) -> anyhow::Result<()> {
    let source = build_scene(registry, config, &args.scene)?;
    let range = resolve_range(source.as_ref(), &args.range)?;
    for f in range.start.0..range.end.0 {
        let scene = source.sample(FrameIndex(f))?;
        println!("{f}\t{}", frameloom::fingerprint_scene(&scene));
    }
    Ok(())
}
