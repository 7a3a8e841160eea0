//! `tr-output` — tracking output writers for rust_track.
//!
//! | Backend | Files created                  |
//! |---------|--------------------------------|
//! | CSV     | `frames.csv`, `routes.csv`     |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`TrackingOutputObserver`], which implements `tr_sim::TrackingObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tr_output::{CsvWriter, TrackingOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = TrackingOutputObserver::new(writer, session.id());
//! session.start(ticker.now(), &mut obs)?;
//! session.run(&mut ticker, &mut obs);
//! obs.finish();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TrackingOutputObserver;
pub use row::{FrameRow, RouteRow};
pub use writer::OutputWriter;
