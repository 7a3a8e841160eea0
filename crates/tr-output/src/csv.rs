//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `frames.csv`: one row per simulator frame
//! - `routes.csv`: the route set, re-written on every selection change

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{FrameRow, OutputResult, RouteRow};

pub const FRAMES_FILE: &str = "frames.csv";
pub const ROUTES_FILE: &str = "routes.csv";

/// Writes tracking output to two CSV files.
pub struct CsvWriter {
    frames:   Writer<File>,
    routes:   Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create (or truncate) the two CSV files in `dir` and write the header
    /// rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut frames = Writer::from_path(dir.join(FRAMES_FILE))?;
        frames.write_record([
            "session_id", "at_ms", "route_id", "index", "lon", "lat",
            "bearing_deg", "instruction", "eta_minutes", "status",
        ])?;

        let mut routes = Writer::from_path(dir.join(ROUTES_FILE))?;
        routes.write_record([
            "session_id", "route_id", "name", "traffic", "distance_km",
            "duration_min", "waypoints", "selected",
        ])?;

        Ok(Self { frames, routes, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_routes(&mut self, rows: &[RouteRow]) -> OutputResult<()> {
        self.finished = false;
        for row in rows {
            self.routes.write_record(&[
                row.session_id.to_string(),
                row.route_id.to_string(),
                row.name.clone(),
                row.traffic.to_string(),
                format!("{:.3}", row.distance_km),
                format!("{:.1}", row.duration_min),
                row.waypoints.to_string(),
                (row.selected as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_frame(&mut self, row: &FrameRow) -> OutputResult<()> {
        self.finished = false;
        self.frames.write_record(&[
            row.session_id.to_string(),
            row.at_ms.to_string(),
            row.route_id.to_string(),
            row.index.to_string(),
            format!("{:.6}", row.lon),
            format!("{:.6}", row.lat),
            format!("{:.1}", row.bearing_deg),
            row.instruction.to_string(),
            row.eta_minutes.to_string(),
            row.status.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.frames.flush()?;
        self.routes.flush()?;
        Ok(())
    }
}
