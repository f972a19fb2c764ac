use anyhow::{Context, Result};
use csv::Writer;
use log::{debug, info};
use std::fs::File;
use std::path::Path;

use crate::cv::position::RelativePosition;

const FLUSH_INTERVAL: u64 = 100;

/// Opt-in CSV export of per-frame relative positions. Nothing is written
/// unless one of these is constructed.
pub struct PositionRecorder {
    writer: Writer<File>,
    rows: u64,
}

impl PositionRecorder {
    pub fn create(path: &Path) -> Result<Self> {
        info!("Creating position CSV: {}", path.display());
        let mut writer = Writer::from_path(path)
            .with_context(|| format!("Failed to create export file {}", path.display()))?;
        writer.write_record(["frame", "x", "y", "area"])?;
        Ok(Self { writer, rows: 0 })
    }

    pub fn record(&mut self, frame: u64, position: &RelativePosition) -> Result<()> {
        self.writer.write_record(&[
            frame.to_string(),
            format!("{:.6}", position.x),
            format!("{:.6}", position.y),
            position.area.to_string(),
        ])?;
        self.rows += 1;

        if self.rows % FLUSH_INTERVAL == 0 {
            debug!("Flushed {} position rows", self.rows);
            self.writer.flush()?;
        }
        Ok(())
    }

    pub fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        info!("Position export complete: {} rows", self.rows);
        Ok(())
    }
}
