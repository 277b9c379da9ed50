use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "ribbon", version)]
struct Cli {
    /// Log more (`-v` debug, `-vv` trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Defaults to `svg` with every option at its default.
    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a batch of static SVG ribbons.
    Svg(SvgArgs),
    /// Render the animated ribbon headless into a PNG sequence.
    Frames(FramesArgs),
}

#[derive(Parser, Debug, Default)]
struct SvgArgs {
    /// Output directory [default: public/img/ribbons].
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Number of files [default: 6].
    #[arg(long)]
    count: Option<usize>,

    /// Base seed for a reproducible batch.
    #[arg(long)]
    seed: Option<u64>,

    /// Also write a PNG preview next to every SVG.
    #[arg(long)]
    png: bool,

    /// Print every generated configuration as JSON on stdout.
    #[arg(long)]
    dump_config: bool,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Surface width in CSS pixels.
    #[arg(long)]
    width: f64,

    /// Surface height in CSS pixels.
    #[arg(long)]
    height: f64,

    /// Device pixel ratio (clamped to 2).
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Ticks to run; throttled ticks write no file.
    #[arg(long, default_value_t = 60)]
    frames: u64,

    /// Seed in [0, 10000); random when omitted.
    #[arg(long)]
    seed: Option<f64>,

    /// JSON file overriding the preset's parameters.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Preset::Site)]
    preset: Preset,

    /// Draw a single still frame.
    #[arg(long)]
    no_motion: bool,

    /// Output directory for `frame-00000.png` ...
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    /// Exits to the right through a loop.
    Site,
    /// Exits to the left, no loop.
    ExitLeft,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd.unwrap_or_else(|| Command::Svg(SvgArgs::default())) {
        Command::Svg(args) => cmd_svg(args),
        Command::Frames(args) => cmd_frames(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_svg(args: SvgArgs) -> anyhow::Result<()> {
    let defaults = ribbon::ExportOpts::default();
    let opts = ribbon::ExportOpts {
        out_dir: args.out_dir.unwrap_or(defaults.out_dir.clone()),
        count: args.count.unwrap_or(defaults.count),
        base_seed: args.seed,
        png_preview: args.png,
        threads: args.threads,
        ..defaults
    };

    let report = ribbon::export_batch(&opts)?;

    if args.dump_config {
        for file in &report.files {
            let cfg = ribbon::EllipticConfig::from_seed(file.seed);
            println!("{}", serde_json::to_string(&cfg)?);
        }
    }

    eprintln!(
        "wrote {} ribbon(s) to {}",
        report.files.len(),
        report.out_dir.display()
    );
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let cfg = match &args.config {
        Some(path) => ribbon::RibbonConfig::from_json_path(path)?,
        None => match args.preset {
            Preset::Site => ribbon::RibbonConfig::site_default(),
            Preset::ExitLeft => ribbon::RibbonConfig::exit_left(),
        },
    };
    let seed = match args.seed {
        Some(s) => ribbon::SeedState::new(s),
        None => ribbon::SeedState::from_entropy(),
    };
    let opts = ribbon::RendererOpts {
        motion: !args.no_motion,
        ..ribbon::RendererOpts::default()
    };

    let mut renderer = ribbon::RibbonRenderer::new(cfg, seed, opts)?;
    let mut surface = ribbon::CpuSurface::new();
    let outcome = renderer.resize(
        ribbon::ViewportGeometry::new(args.width, args.height, args.dpr),
        &mut surface,
    )?;
    if outcome == ribbon::ResizeOutcome::Rejected {
        anyhow::bail!(
            "surface {}x{} cannot be drawn into",
            args.width,
            args.height
        );
    }

    let mut sink = ribbon::PngSequenceSink::new(&args.out_dir);
    let stats = ribbon::render_to_sink(&mut renderer, &mut surface, args.frames, &mut sink)
        .with_context(|| format!("render frames into '{}'", args.out_dir.display()))?;

    eprintln!(
        "seed {:.3}: {} tick(s), {} drawn, {} skipped -> {}",
        renderer.seed().seed,
        stats.ticks,
        stats.drawn,
        stats.skipped,
        args.out_dir.display()
    );
    Ok(())
}
