use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing::Level;

use dotwave::{
    CaptureOpts, Engine, EngineOpts, FfmpegSink, FfmpegSinkOpts, Fps, ParameterState, TimingMode,
    presets,
};

#[derive(Parser, Debug)]
#[command(name = "dotwave", version)]
struct Cli {
    /// Log verbosity on stderr (`-v` info, `-vv` debug, `-vvv` trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Export a single frame as an SVG document.
    Svg(SvgArgs),
    /// Record a video (requires `ffmpeg` on PATH).
    Record(RecordArgs),
    /// List the built-in presets.
    Presets,
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Input parameter-state JSON; defaults are used when omitted.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Canvas size preset id (e.g. `square`, `story`).
    #[arg(long)]
    preset_size: Option<String>,

    /// Background gradient preset name (e.g. `"Teal Gradient"`).
    #[arg(long)]
    preset_gradient: Option<String>,

    /// Animation preset name (e.g. `"Calm Ripple"`).
    #[arg(long)]
    preset_anim: Option<String>,

    /// Seed for noise and raindrops.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Constant time step per tick instead of smoothed parameters.
    #[arg(long, default_value_t = false)]
    fixed: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Ticks to advance before rendering.
    #[arg(long, default_value_t = 0)]
    ticks: u64,

    /// Tick rate used to advance.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Resolution multiplier.
    #[arg(long, default_value_t = 1)]
    scale: u32,
}

#[derive(Parser, Debug)]
struct SvgArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,

    /// Ticks to advance before exporting.
    #[arg(long, default_value_t = 0)]
    ticks: u64,

    /// Tick rate used to advance.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Also rasterize the document to this PNG path.
    #[arg(long)]
    preview: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RecordArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output path; `.webm` records VP9, anything else H.264.
    #[arg(long)]
    out: PathBuf,

    /// Capture length in seconds.
    #[arg(long, default_value_t = 5.0)]
    duration: f64,

    /// Capture frame rate.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Target bitrate in bits per second.
    #[arg(long, default_value_t = dotwave::DEFAULT_BITRATE)]
    bitrate: u64,

    /// Fail instead of replacing an existing output file.
    #[arg(long)]
    no_overwrite: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Svg(args) => cmd_svg(args),
        Command::Record(args) => cmd_record(args),
        Command::Presets => cmd_presets(),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .try_init();
}

fn load_scene(args: &SceneArgs) -> anyhow::Result<(ParameterState, Engine)> {
    let mut state = match &args.in_path {
        Some(path) => ParameterState::from_path(path)
            .with_context(|| format!("load parameter state '{}'", path.display()))?,
        None => ParameterState::default(),
    };

    if let Some(id) = &args.preset_size {
        let preset = presets::dimension(id)
            .with_context(|| format!("unknown size preset '{id}'"))?;
        preset.apply(&mut state);
    }
    if let Some(name) = &args.preset_gradient {
        let preset = presets::gradient_preset(name)
            .with_context(|| format!("unknown gradient preset '{name}'"))?;
        preset.apply(&mut state);
    }
    if let Some(name) = &args.preset_anim {
        let preset = presets::animation_preset(name)
            .with_context(|| format!("unknown animation preset '{name}'"))?;
        preset.apply(&mut state.animation);
    }

    let opts = EngineOpts {
        seed: args.seed,
        timing: if args.fixed {
            TimingMode::Fixed
        } else {
            TimingMode::Smoothed
        },
    };
    let engine = Engine::new(state.canvas, opts);
    Ok((state, engine))
}

fn run_ticks(
    engine: &mut Engine,
    state: &ParameterState,
    ticks: u64,
    fps: u32,
) -> anyhow::Result<()> {
    let dt = Fps::new(fps, 1)?.frame_duration_secs();
    for _ in 0..ticks {
        engine.advance(state, dt);
    }
    engine.render(state);
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (state, mut engine) = load_scene(&args.scene)?;
    run_ticks(&mut engine, &state, args.ticks, args.fps)?;
    engine
        .snapshot_png(&state, &args.out, args.scale)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_svg(args: SvgArgs) -> anyhow::Result<()> {
    let (state, mut engine) = load_scene(&args.scene)?;
    run_ticks(&mut engine, &state, args.ticks, args.fps)?;
    let svg = engine.export_vector(&state)?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &svg)
        .with_context(|| format!("write svg '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());

    if let Some(preview) = &args.preview {
        write_preview(&svg, preview)?;
        eprintln!("wrote {}", preview.display());
    }
    Ok(())
}

#[cfg(feature = "vector-export")]
fn write_preview(svg: &str, path: &std::path::Path) -> anyhow::Result<()> {
    let frame = dotwave::rasterize_svg(svg)?;
    dotwave::write_png(&frame, path)
        .with_context(|| format!("write preview '{}'", path.display()))?;
    Ok(())
}

#[cfg(not(feature = "vector-export"))]
fn write_preview(_svg: &str, _path: &std::path::Path) -> anyhow::Result<()> {
    anyhow::bail!("svg preview requires the `vector-export` feature")
}

fn cmd_record(args: RecordArgs) -> anyhow::Result<()> {
    let (state, mut engine) = load_scene(&args.scene)?;

    let mut sink = FfmpegSink::new(sink_opts(&args));

    let opts = CaptureOpts {
        fps: Fps::new(args.fps, 1)?,
        duration_secs: args.duration,
    };
    let stats = engine.capture_video(&state, opts, &mut sink)?;

    eprintln!("wrote {} ({} frames)", args.out.display(), stats.frames);
    Ok(())
}

fn sink_opts(args: &RecordArgs) -> FfmpegSinkOpts {
    let mut opts = FfmpegSinkOpts::new(args.out.clone());
    opts.overwrite = !args.no_overwrite;
    opts.bitrate = Some(args.bitrate);
    opts
}

fn cmd_presets() -> anyhow::Result<()> {
    println!("sizes:");
    for d in presets::DIMENSIONS {
        println!("  {:<12} {}", d.id, d.label);
    }
    println!("gradients:");
    for g in presets::GRADIENT_PRESETS {
        println!("  {}", g.name);
    }
    println!("animations:");
    for a in presets::ANIMATION_PRESETS {
        println!("  {:<14} {}", a.name, a.pattern.id());
    }
    println!("colors:");
    for (group, name, hex) in presets::BRAND_COLORS {
        println!("  {name:<16} {hex} ({group})");
    }
    Ok(())
}
