use anyhow::Result;
use log::{LogLevel, info, logger::AdvancedLogger};
use std::path::Path;

use cli::{Args, parse_args};
use conf::load_config;
use cv::cascade::{DetectParams, HaarFaceDetector};
use cv::{CameraSource, FrameSource, Surface, Window};
use recorder::PositionRecorder;
use session::Session;

mod cli;
mod conf;
mod cv;
mod recorder;
mod session;

fn main() -> Result<()> {
    let args = parse_args();

    let level = if args.debug {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    if let Err(e) = AdvancedLogger::init(level) {
        eprintln!("Failed to initialize logger: {e}");
    }

    run(args)
}

fn run(args: Args) -> Result<()> {
    let cfg = load_config()?;

    let cascade = args.cascade.unwrap_or(cfg.cascade);
    let params = DetectParams {
        scale_factor: args.scale_factor,
        min_neighbors: args.min_neighbors,
    };
    let detector = HaarFaceDetector::new(Path::new(&cascade), params)?;

    let source: Box<dyn FrameSource> = match &args.video {
        Some(file) => Box::new(CameraSource::from_file(file)?),
        None => Box::new(CameraSource::open(args.device.unwrap_or(cfg.device))?),
    };

    let recorder = args
        .export
        .as_deref()
        .map(|path| PositionRecorder::create(Path::new(path)))
        .transpose()?;

    let surface: Box<dyn Surface> = Box::new(Window::new());

    let mut session = Session::new(source, Box::new(detector), surface, recorder);
    let state = session.run()?;
    info!("Session finished: {:?}", state);
    Ok(())
}
