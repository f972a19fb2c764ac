use log::{debug, info};
use std::time::Instant;

const STATS_INTERVAL: usize = 100;

/// Per-frame throughput tracker. Purely observational.
pub struct FrameMetrics {
    started: Instant,
    last_frame: Instant,
    frames: usize,
    min_fps: f32,
    max_fps: f32,
}

impl FrameMetrics {
    pub fn new() -> Self {
        debug!("Initializing frame metrics tracker");
        FrameMetrics {
            started: Instant::now(),
            last_frame: Instant::now(),
            frames: 0,
            min_fps: f32::MAX,
            max_fps: 0.0,
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame);
        let fps = 1.0 / frame_time.as_secs_f32();

        self.frames += 1;
        self.min_fps = self.min_fps.min(fps);
        self.max_fps = self.max_fps.max(fps);

        if self.frames % STATS_INTERVAL == 0 {
            info!(
                "Performance after {} frames: {:.1} FPS current, {:.1} avg, {:.1} min, {:.1} max",
                self.frames,
                fps,
                self.avg_fps(),
                self.min_fps,
                self.max_fps
            );
        } else {
            debug!(
                "Frame #{}: {:.1} FPS ({:.1}ms)",
                self.frames,
                fps,
                frame_time.as_secs_f32() * 1000.0
            );
        }

        self.last_frame = now;
    }

    pub fn avg_fps(&self) -> f32 {
        let runtime = self.started.elapsed().as_secs_f32();
        if runtime > 0.0 {
            self.frames as f32 / runtime
        } else {
            0.0
        }
    }

    pub fn frames(&self) -> usize {
        self.frames
    }
}
