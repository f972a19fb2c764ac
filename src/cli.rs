use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Read a video file instead of using the camera
    #[arg(short, long)]
    pub video: Option<String>,

    /// Capture device index (overrides the configured value)
    #[arg(long)]
    pub device: Option<i32>,

    /// Haar cascade model file (overrides the configured value)
    #[arg(short, long)]
    pub cascade: Option<String>,

    /// Export per-frame positions to a CSV file
    #[arg(short, long)]
    pub export: Option<String>,

    /// Ratio between successive detection window scales
    #[arg(short, long, default_value_t = 1.1)]
    pub scale_factor: f64,

    /// Overlapping raw detections required to confirm a face
    #[arg(short = 'n', long, default_value_t = 5)]
    pub min_neighbors: i32,

    /// Output debug information
    #[arg(short, long)]
    pub debug: bool,
}

pub fn parse_args() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_reproduces_the_script_defaults() {
        let args = Args::parse_from(["mira"]);
        assert!(args.video.is_none());
        assert!(args.export.is_none());
        assert_eq!(args.scale_factor, 1.1);
        assert_eq!(args.min_neighbors, 5);
        assert!(!args.debug);
    }
}
