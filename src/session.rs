use anyhow::Result;
use log::{debug, info};
use opencv::core::{Mat, MatTraitConst};
use opencv::imgproc;

use crate::cv::cascade::FaceDetector;
use crate::cv::frame_metrics::FrameMetrics;
use crate::cv::overlay;
use crate::cv::position::{RelativePosition, largest_face};
use crate::cv::{FrameSource, Surface};
use crate::recorder::PositionRecorder;

/// One running state, two terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    /// The source stopped producing frames. A normal end condition.
    StreamEnded,
    /// The user closed the display window.
    SurfaceClosed,
}

/// Owns every resource of the capture/detect/render loop; nothing is
/// ambient. All of it lives on the one thread for the program lifetime.
pub struct Session {
    source: Box<dyn FrameSource>,
    detector: Box<dyn FaceDetector>,
    surface: Box<dyn Surface>,
    recorder: Option<PositionRecorder>,
    metrics: FrameMetrics,
    frame_count: u64,
}

impl Session {
    pub fn new(
        source: Box<dyn FrameSource>,
        detector: Box<dyn FaceDetector>,
        surface: Box<dyn Surface>,
        recorder: Option<PositionRecorder>,
    ) -> Self {
        Self {
            source,
            detector,
            surface,
            recorder,
            metrics: FrameMetrics::new(),
            frame_count: 0,
        }
    }

    /// Runs one full acquire/convert/detect/select/render/display iteration.
    pub fn step(&mut self) -> Result<SessionState> {
        let Some(mut frame) = self.source.grab()? else {
            info!("Stream ended after {} frames", self.frame_count);
            return Ok(SessionState::StreamEnded);
        };

        let gray = grayscale(&frame)?;
        let faces = self.detector.detect(&gray)?;
        let selected = largest_face(&faces);

        let position = match selected {
            Some(face) => RelativePosition::of(face, gray.cols(), gray.rows()),
            None => RelativePosition::default(),
        };

        if let Some(face) = selected {
            debug!(
                "Selected face {:?} at relative position ({:.2}, {:.2})",
                face, position.x, position.y
            );
            overlay::draw_face_box(&mut frame, face)?;
            overlay::draw_position_label(&mut frame, &position)?;
        }

        self.surface.present(&frame)?;
        self.surface.poll()?;

        if let Some(recorder) = &mut self.recorder {
            recorder.record(self.frame_count, &position)?;
        }

        self.frame_count += 1;
        self.metrics.update();

        if !self.surface.is_visible()? {
            info!("Display surface closed after {} frames", self.frame_count);
            return Ok(SessionState::SurfaceClosed);
        }
        Ok(SessionState::Running)
    }

    /// Drives `step` until a terminal state is reached.
    pub fn run(&mut self) -> Result<SessionState> {
        loop {
            let state = self.step()?;
            if state != SessionState::Running {
                if let Some(recorder) = &mut self.recorder {
                    recorder.finish()?;
                }
                info!(
                    "Session ended: processed {} frames, avg {:.1} FPS",
                    self.metrics.frames(),
                    self.metrics.avg_fps()
                );
                return Ok(state);
            }
        }
    }
}

fn grayscale(frame: &Mat) -> opencv::Result<Mat> {
    let mut gray = Mat::default();
    imgproc::cvt_color(
        frame,
        &mut gray,
        imgproc::COLOR_BGR2GRAY,
        0,
        opencv::core::AlgorithmHint::ALGO_HINT_DEFAULT,
    )?;
    Ok(gray)
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{self, CV_8UC3, Rect, Scalar};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct StubSource {
        frames_left: usize,
        grabs: Rc<RefCell<usize>>,
    }

    impl FrameSource for StubSource {
        fn grab(&mut self) -> Result<Option<Mat>> {
            *self.grabs.borrow_mut() += 1;
            if self.frames_left == 0 {
                return Ok(None);
            }
            self.frames_left -= 1;
            let frame = Mat::new_rows_cols_with_default(480, 640, CV_8UC3, Scalar::all(0.0))?;
            Ok(Some(frame))
        }
    }

    struct StubDetector {
        faces: Vec<Rect>,
    }

    impl FaceDetector for StubDetector {
        fn detect(&mut self, _gray: &Mat) -> Result<Vec<Rect>> {
            Ok(self.faces.clone())
        }
    }

    struct StubSurface {
        presented: Rc<RefCell<Vec<Mat>>>,
        visible_for: Option<usize>,
    }

    impl Surface for StubSurface {
        fn present(&mut self, frame: &Mat) -> Result<()> {
            self.presented.borrow_mut().push(frame.clone());
            Ok(())
        }

        fn poll(&mut self) -> Result<()> {
            Ok(())
        }

        fn is_visible(&self) -> Result<bool> {
            match self.visible_for {
                Some(limit) => Ok(self.presented.borrow().len() < limit),
                None => Ok(true),
            }
        }
    }

    fn session_with(
        frames: usize,
        faces: Vec<Rect>,
        visible_for: Option<usize>,
    ) -> (Session, Rc<RefCell<usize>>, Rc<RefCell<Vec<Mat>>>) {
        let grabs = Rc::new(RefCell::new(0));
        let presented = Rc::new(RefCell::new(Vec::new()));
        let session = Session::new(
            Box::new(StubSource {
                frames_left: frames,
                grabs: grabs.clone(),
            }),
            Box::new(StubDetector { faces }),
            Box::new(StubSurface {
                presented: presented.clone(),
                visible_for,
            }),
            None,
        );
        (session, grabs, presented)
    }

    fn pixel_sum(frame: &Mat) -> f64 {
        let sum = core::sum_elems(frame).unwrap();
        sum[0] + sum[1] + sum[2]
    }

    #[test]
    fn stream_end_after_exact_iteration_count() {
        // The source yields frames on calls 1..=4 and no frame on call 5,
        // so exactly 4 full iterations must run.
        let (mut session, grabs, presented) = session_with(4, Vec::new(), None);
        let state = session.run().unwrap();
        assert_eq!(state, SessionState::StreamEnded);
        assert_eq!(*grabs.borrow(), 5);
        assert_eq!(presented.borrow().len(), 4);
    }

    #[test]
    fn surface_close_terminates_at_that_iteration() {
        let (mut session, _grabs, presented) = session_with(100, Vec::new(), Some(3));
        let state = session.run().unwrap();
        assert_eq!(state, SessionState::SurfaceClosed);
        assert_eq!(presented.borrow().len(), 3);
    }

    #[test]
    fn no_face_leaves_frame_undecorated() {
        let (mut session, _grabs, presented) = session_with(1, Vec::new(), None);
        session.run().unwrap();

        let presented = presented.borrow();
        assert_eq!(pixel_sum(&presented[0]), 0.0);
    }

    #[test]
    fn selected_face_is_drawn_on_the_frame() {
        let faces = vec![Rect::new(100, 100, 50, 50)];
        let (mut session, _grabs, presented) = session_with(1, faces, None);
        session.run().unwrap();

        let presented = presented.borrow();
        assert!(pixel_sum(&presented[0]) > 0.0);
    }

    #[test]
    fn positions_are_exported_when_recording() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("positions.csv");
        let recorder = PositionRecorder::create(&path).unwrap();

        let grabs = Rc::new(RefCell::new(0));
        let presented = Rc::new(RefCell::new(Vec::new()));
        // cx = 440 + 40 = 480, cy = 60 + 60 = 120 on a 640x480 frame:
        // x = 0.5, y = -0.5, area = 80 * 120 = 9600
        let mut session = Session::new(
            Box::new(StubSource {
                frames_left: 2,
                grabs: grabs.clone(),
            }),
            Box::new(StubDetector {
                faces: vec![Rect::new(440, 60, 80, 120)],
            }),
            Box::new(StubSurface {
                presented,
                visible_for: None,
            }),
            Some(recorder),
        );
        session.run().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "frame,x,y,area");
        assert_eq!(lines[1], "0,0.500000,-0.500000,9600");
        assert_eq!(lines[2], "1,0.500000,-0.500000,9600");
    }
}
