//! The `OutputWriter` trait implemented by output backends.

use crate::{FrameRow, OutputResult, RouteRow};

/// A sink for tracking output.
///
/// Errors are returned here but swallowed by [`TrackingOutputObserver`]
/// (observer callbacks cannot fail); retrieve them afterwards with
/// [`TrackingOutputObserver::take_error`].
///
/// [`TrackingOutputObserver`]: crate::TrackingOutputObserver
/// [`TrackingOutputObserver::take_error`]: crate::TrackingOutputObserver::take_error
pub trait OutputWriter {
    /// Write the route set as it stands after a build or a selection change.
    fn write_routes(&mut self, rows: &[RouteRow]) -> OutputResult<()>;

    /// Write one simulator frame.
    fn write_frame(&mut self, row: &FrameRow) -> OutputResult<()>;

    /// Flush all underlying file handles.
    ///
    /// Idempotent until the next write.
    fn finish(&mut self) -> OutputResult<()>;
}
