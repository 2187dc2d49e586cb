use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use markspeed::config::Config;
use markspeed::display::{LogSink, WindowSink};
use markspeed::replay::RegionReplay;
use markspeed::segmentation::HsvSegmenter;
use markspeed::video::VideoSource;
use markspeed::{DisplaySink, FrameSource, Tracker};

/// Estimate speed and heading of a two-part marker seen in a video.
#[derive(Parser, Debug)]
#[command(name = "markspeed", version)]
struct Cli {
    /// Input video file.
    #[arg(long, conflicts_with = "regions", required_unless_present = "regions")]
    video: Option<PathBuf>,

    /// Replay pre-segmented regions (`index:[...]` per line) instead of a video.
    #[arg(long)]
    regions: Option<PathBuf>,

    /// YAML config overriding calibration and segmentation defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log results instead of opening a window.
    #[arg(long)]
    headless: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("markspeed=info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    tracing::debug!(?config, "configuration");

    let mut source: Box<dyn FrameSource> = match (&cli.video, &cli.regions) {
        (Some(video), _) => Box::new(VideoSource::open(
            video,
            HsvSegmenter::new(config.segmentation),
        )?),
        (None, Some(regions)) => Box::new(RegionReplay::open(regions)?),
        (None, None) => anyhow::bail!("either --video or --regions is required"),
    };

    let mut sink: Box<dyn DisplaySink> = if cli.headless || cli.video.is_none() {
        Box::new(LogSink)
    } else {
        Box::new(WindowSink::new("markspeed")?)
    };

    let mut tracker = Tracker::new(&config.calibration);
    let summary = tracker.run(&mut source, &mut sink)?;

    println!(
        "processed {} frames, target seen in {}",
        summary.frames, summary.acquired
    );

    Ok(())
}
