use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use framescrub::{FrameFetcher, FsFetcher, ScrollPlayer, Section, SurfaceSize, presets};

#[derive(Parser, Debug)]
#[command(name = "framescrub", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the cover-fit frame for one scroll progress as a PNG.
    Frame(FrameArgs),
    /// Render evenly spaced progress steps into numbered PNGs.
    Sweep(SweepArgs),
}

#[derive(Parser, Debug)]
struct SectionArgs {
    /// Asset root holding the sequence directories.
    #[arg(long)]
    assets_root: PathBuf,

    /// Built-in section preset (hero-scroll, hero-clouds, plane-morph,
    /// specs-morph, fly-in-luxury).
    #[arg(long, conflicts_with = "section")]
    preset: Option<String>,

    /// Section definition JSON.
    #[arg(long)]
    section: Option<PathBuf>,

    /// Surface width in pixels.
    #[arg(long, default_value_t = 1920)]
    width: u32,

    /// Surface height in pixels.
    #[arg(long, default_value_t = 1080)]
    height: u32,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    section: SectionArgs,

    /// Scroll progress in [0,1].
    #[arg(long, default_value_t = 0.0)]
    progress: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SweepArgs {
    #[command(flatten)]
    section: SectionArgs,

    /// Number of evenly spaced progress steps.
    #[arg(long, default_value_t = 10)]
    steps: u32,

    /// Output directory for numbered PNGs.
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sweep(args) => cmd_sweep(args),
    }
}

fn load_section(args: &SectionArgs) -> anyhow::Result<Section> {
    match (&args.preset, &args.section) {
        (Some(name), None) => Ok(presets::by_name(name)?),
        (None, Some(path)) => read_section_json(path),
        _ => anyhow::bail!("exactly one of --preset or --section is required"),
    }
}

fn read_section_json(path: &Path) -> anyhow::Result<Section> {
    let f = File::open(path).with_context(|| format!("open section '{}'", path.display()))?;
    let section: Section =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse section JSON")?;
    section.validate()?;
    Ok(section)
}

fn mount_player(section: &Section, args: &SectionArgs) -> anyhow::Result<ScrollPlayer> {
    let size = SurfaceSize::new(args.width, args.height)?;
    let fetcher: Arc<dyn FrameFetcher> = Arc::new(FsFetcher::new(&args.assets_root));
    let mut player = ScrollPlayer::mount(section.sequences.clone(), fetcher, size)?;
    player.wait_until_ready()?;
    Ok(player)
}

fn write_png(player: &ScrollPlayer, out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let surface = player.surface();
    image::save_buffer_with_format(
        out,
        surface.data(),
        surface.size().width,
        surface.size().height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let section = load_section(&args.section)?;
    let mut player = mount_player(&section, &args.section)?;

    player.set_scroll_progress(args.progress);
    write_png(&player, &args.out)?;

    let overlay = section.rig.evaluate(args.progress);
    println!("{}", serde_json::to_string_pretty(&overlay)?);

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sweep(args: SweepArgs) -> anyhow::Result<()> {
    if args.steps < 2 {
        anyhow::bail!("--steps must be >= 2");
    }
    let section = load_section(&args.section)?;
    let mut player = mount_player(&section, &args.section)?;

    for step in 0..args.steps {
        let progress = f64::from(step) / f64::from(args.steps - 1);
        player.set_scroll_progress(progress);
        let out = args.out_dir.join(format!("frame_{step:04}.png"));
        write_png(&player, &out)?;
    }

    eprintln!("wrote {} frames to {}", args.steps, args.out_dir.display());
    Ok(())
}
