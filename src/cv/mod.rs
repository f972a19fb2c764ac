pub mod cascade;
pub mod frame_metrics;
pub mod overlay;
pub mod position;

use anyhow::{Context, Result, anyhow};
use log::{debug, info, warning};
use opencv::core::{Mat, MatTraitConst};
use opencv::highgui;
use opencv::videoio::{VideoCapture, VideoCaptureTrait, VideoCaptureTraitConst};

/// Yields frames until the stream ends. `None` is the end-of-stream signal,
/// not an error.
pub trait FrameSource {
    fn grab(&mut self) -> Result<Option<Mat>>;
}

/// Output surface for composited frames.
pub trait Surface {
    fn present(&mut self, frame: &Mat) -> Result<()>;
    /// Services the display backend's event queue for a minimal duration.
    fn poll(&mut self) -> Result<()>;
    fn is_visible(&self) -> Result<bool>;
}

pub struct CameraSource {
    capture: VideoCapture,
}

impl CameraSource {
    pub fn open(device: i32) -> Result<Self> {
        info!("Opening camera stream on device {}", device);
        let capture =
            VideoCapture::new_def(device).context("Failed to open capture device")?;
        Self::check_opened(capture)
    }

    pub fn from_file(file: &str) -> Result<Self> {
        info!("Opening input video file stream: {}", file);
        let capture = VideoCapture::from_file_def(file)
            .with_context(|| format!("Failed to open video file {file}"))?;
        Self::check_opened(capture)
    }

    fn check_opened(capture: VideoCapture) -> Result<Self> {
        if !capture.is_opened()? {
            return Err(anyhow!("Camera not opened"));
        }
        debug!("Capture opened successfully with default settings");
        Ok(Self { capture })
    }
}

impl FrameSource for CameraSource {
    fn grab(&mut self) -> Result<Option<Mat>> {
        let mut frame = Mat::default();
        if !self.capture.read(&mut frame)? || frame.empty() {
            debug!("No frame available, treating as end of stream");
            return Ok(None);
        }
        Ok(Some(frame))
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        match self.capture.release() {
            Ok(()) => debug!("Capture device released"),
            Err(e) => warning!("Failed to release capture device: {}", e),
        }
    }
}

pub const WINDOW_TITLE: &str = "Face detection";

/// The single highgui display window.
pub struct Window {
    name: &'static str,
}

impl Window {
    pub fn new() -> Self {
        debug!("Initializing display window '{}'", WINDOW_TITLE);
        let result = highgui::named_window(
            WINDOW_TITLE,
            highgui::WINDOW_KEEPRATIO | highgui::WINDOW_GUI_NORMAL,
        );

        match result {
            Ok(()) => debug!("Window '{}' created successfully", WINDOW_TITLE),
            Err(e) => warning!("Could not create named window: {:?}", e),
        }

        Self { name: WINDOW_TITLE }
    }
}

impl Surface for Window {
    fn present(&mut self, frame: &Mat) -> Result<()> {
        highgui::imshow(self.name, frame)?;
        Ok(())
    }

    fn poll(&mut self) -> Result<()> {
        // Refreshes the window; any pressed key is discarded.
        highgui::wait_key(1)?;
        Ok(())
    }

    fn is_visible(&self) -> Result<bool> {
        match highgui::get_window_property(self.name, highgui::WND_PROP_VISIBLE) {
            Ok(visible) => Ok(visible >= 1.0),
            Err(e) => {
                debug!("Window property query failed, assuming closed: {}", e);
                Ok(false)
            }
        }
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        match highgui::destroy_all_windows() {
            Ok(()) => debug!("All display windows destroyed"),
            Err(e) => warning!("Failed to destroy windows: {}", e),
        }
    }
}
