use anyhow::{Context, Result, bail};
use log::{debug, error, info};
use opencv::core::{Mat, Rect, Size, Vector};
use opencv::objdetect::{CascadeClassifier, CascadeClassifierTrait, CascadeClassifierTraitConst};
use std::path::Path;
use std::time::Instant;

/// Multi-scale face detector returning candidate rectangles in the
/// classifier's enumeration order.
pub trait FaceDetector {
    fn detect(&mut self, gray: &Mat) -> Result<Vec<Rect>>;
}

/// Tuning knobs for the multi-scale detection pass.
#[derive(Debug, Clone, Copy)]
pub struct DetectParams {
    /// Ratio between successive detection window scales.
    pub scale_factor: f64,
    /// Overlapping raw detections required to confirm a candidate.
    pub min_neighbors: i32,
}

impl Default for DetectParams {
    fn default() -> Self {
        Self {
            scale_factor: 1.1,
            min_neighbors: 5,
        }
    }
}

pub struct HaarFaceDetector {
    classifier: CascadeClassifier,
    params: DetectParams,
}

impl HaarFaceDetector {
    /// Loads a pretrained cascade from `cascade`. A missing file or a model
    /// that loads empty is a construction error, reported before the main
    /// loop ever runs.
    pub fn new(cascade: &Path, params: DetectParams) -> Result<Self> {
        debug!("Loading Haar cascade from file: '{}'", cascade.display());
        let start_time = Instant::now();

        if !cascade.is_file() {
            bail!("Cascade file missing: {}", cascade.display());
        }
        let path = cascade
            .to_str()
            .context("Cascade path is not valid UTF-8")?;

        let classifier = match CascadeClassifier::new(path) {
            Ok(classifier) => classifier,
            Err(e) => {
                error!("Failed to load cascade: {}", e);
                return Err(e.into());
            }
        };
        if classifier.empty()? {
            bail!("Cascade failed to parse: {}", cascade.display());
        }

        info!(
            "Haar cascade loaded successfully in {:?}",
            start_time.elapsed()
        );
        Ok(Self { classifier, params })
    }
}

impl FaceDetector for HaarFaceDetector {
    fn detect(&mut self, gray: &Mat) -> Result<Vec<Rect>> {
        let mut faces = Vector::<Rect>::new();
        self.classifier.detect_multi_scale(
            gray,
            &mut faces,
            self.params.scale_factor,
            self.params.min_neighbors,
            0,
            Size::default(),
            Size::default(),
        )?;
        debug!("Detector returned {} candidate rectangles", faces.len());
        Ok(faces.to_vec())
    }
}
