//! `TrackingOutputObserver<W>` — bridges `TrackingObserver` to an `OutputWriter`.

use tr_core::SessionId;
use tr_route::RouteSet;
use tr_sim::{Frame, TrackingObserver};

use crate::row::{FrameRow, RouteRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`TrackingObserver`] that writes route sets and frames to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because observer methods
/// have no return value.  After the run, check with
/// [`take_error`][Self::take_error].
pub struct TrackingOutputObserver<W: OutputWriter> {
    writer:     W,
    session:    SessionId,
    frames:     u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> TrackingOutputObserver<W> {
    pub fn new(writer: W, session: SessionId) -> Self {
        Self { writer, session, frames: 0, last_error: None }
    }

    /// Frames handed to the writer so far.
    pub fn frames_written(&self) -> u64 {
        self.frames
    }

    /// Flush the writer.  Call once the run is over, arrived or not.
    pub fn finish(&mut self) {
        let result = self.writer.finish();
        self.store_err(result);
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> TrackingObserver for TrackingOutputObserver<W> {
    fn on_routes(&mut self, routes: &RouteSet) {
        let selected = routes.selected_id();
        let rows: Vec<RouteRow> = routes
            .routes()
            .iter()
            .map(|r| RouteRow::new(self.session, r, r.id == selected))
            .collect();
        let result = self.writer.write_routes(&rows);
        self.store_err(result);
    }

    fn on_frame(&mut self, frame: &Frame) {
        let result = self.writer.write_frame(&FrameRow::new(self.session, frame));
        self.frames += 1;
        self.store_err(result);
    }

    fn on_arrived(&mut self, _frame: &Frame) {
        self.finish();
    }
}
