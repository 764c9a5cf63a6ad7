use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use rgbd_bokeh_rs::image_pipeline::{
    BokehConfig, BokehPipeline, EdgePolicy, FocusSession, OutputBitDepth, PointerEvent,
    TiffCompression, TiffFileSink,
};
use rgbd_bokeh_rs::logger;

use tracing::{error, info, warn};

/// Synthetic depth of field for an RGB image and its depth map.
///
/// Without --focus, pointer events are read from stdin, one per line:
/// `click X Y` refocuses on the depth under column X, row Y; `q` quits.
#[derive(Parser, Debug)]
#[command(name = "rgbd_bokeh", version)]
struct Cli {
    /// Color image (TIFF)
    image: PathBuf,

    /// Depth image (TIFF, 8-bit single channel)
    image_depth: PathBuf,

    /// File every rendered frame is written to
    #[arg(short, long, default_value = "bokeh.tiff")]
    output: PathBuf,

    /// Render once at this focal depth and exit
    #[arg(short, long)]
    focus: Option<u8>,

    /// Which neighbors may contribute at the image border
    #[arg(long, value_enum, default_value_t = Edge::Legacy)]
    edge: Edge,

    #[arg(long, value_enum, default_value_t = Compression::None)]
    compression: Compression,

    /// Write 16 bits per sample instead of 8
    #[arg(long)]
    sixteen_bit: bool,

    /// Kernel diameter in pixels for depth 0
    #[arg(long, default_value_t = 20.0)]
    max_diameter: f32,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Edge {
    /// Row and column 0 never contribute to neighbors
    Legacy,
    /// Every pixel inside the image may contribute
    Inclusive,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Compression {
    None,
    Lzw,
    Deflate,
}

impl Cli {
    fn config(&self) -> BokehConfig {
        BokehConfig::builder()
            .edge_policy(match self.edge {
                Edge::Legacy => EdgePolicy::Legacy,
                Edge::Inclusive => EdgePolicy::Inclusive,
            })
            .compression(match self.compression {
                Compression::None => TiffCompression::None,
                Compression::Lzw => TiffCompression::Lzw,
                Compression::Deflate => TiffCompression::Deflate,
            })
            .output_depth(if self.sixteen_bit {
                OutputBitDepth::Sixteen
            } else {
                OutputBitDepth::Eight
            })
            .max_kernel_diameter(self.max_diameter)
            .build()
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init("info");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.config();
    info!("Starting rgbd_bokeh...");
    info!("Edge policy: {:?}", config.edge_policy);
    info!("Compression: {:?}", config.compression);

    let pipeline = BokehPipeline::new(config.clone());
    let frame = pipeline
        .load_files(&cli.image, &cli.image_depth)
        .context("error loading input images")?;

    let sink = TiffFileSink::new(&cli.output, config);
    let mut session = FocusSession::new(&pipeline, frame, sink);
    session.start()?;

    if let Some(focus) = cli.focus {
        session.refocus(focus)?;
        return Ok(());
    }

    info!("Waiting for pointer events on stdin (`click X Y`, `q` to quit)");
    session.run(pointer_events(io::stdin().lock()))?;

    info!(output = %session.sink().path().display(), "Session finished");
    Ok(())
}

/// Parse one pointer event per line. Lines that are blank, malformed or not
/// valid UTF-8 are skipped; any other read error ends the stream.
fn pointer_events<B: BufRead>(input: B) -> impl Iterator<Item = PointerEvent> {
    input
        .lines()
        .map_while(|line| match line {
            Ok(line) => Some(parse_event_line(&line)),
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                warn!("Skipping unreadable input line: {}", e);
                Some(None)
            }
            Err(e) => {
                error!("Stopped reading pointer events: {}", e);
                None
            }
        })
        .flatten()
}

fn parse_event_line(line: &str) -> Option<PointerEvent> {
    if line.trim().is_empty() {
        return None;
    }
    match line.parse::<PointerEvent>() {
        Ok(event) => Some(event),
        Err(e) => {
            warn!("{}", e);
            None
        }
    }
}
