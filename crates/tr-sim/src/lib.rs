//! `tr-sim` — movement simulation and tracking sessions for rust_track.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`state`]     | `SimStatus`, `SimulationState`, `Frame`                   |
//! | [`schedule`]  | `TickSchedule`: one pending wake plus an epoch token      |
//! | [`ticker`]    | `Ticker` trait, `ManualTicker`, `RealtimeTicker`          |
//! | [`simulator`] | `MovementSimulator`: the tick state machine               |
//! | [`observer`]  | `TrackingObserver`, `NoopObserver`, `FrameRecorder`       |
//! | [`session`]   | `TrackingSession`, `TrackingSessionBuilder`               |
//! | [`error`]     | `SimError`, `SimResult<T>`                                |
//!
//! # One wake at a time
//!
//! ```text
//! start/select_route ─▶ cancel() ─▶ reset state ─▶ schedule(now, Tick)
//!                                                        │
//!          ┌──────────────── advance_to(now) ◀───────────┘
//!          ▼
//!   Tick   → emit frame → schedule(next Tick | Resume) or Arrived
//!   Resume → emit frame → schedule(next Tick)
//! ```
//!
//! The schedule panics if asked to hold two wakes, so every path above
//! must go through `cancel` or consume the pending wake first.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tr_core::{GeoPoint, TrackingConfig};
//! use tr_route::StraightLineClient;
//! use tr_sim::{FrameRecorder, ManualTicker, Ticker, TrackingSessionBuilder};
//!
//! let mut session = TrackingSessionBuilder::new(TrackingConfig::default(), StraightLineClient::new(10))
//!     .origin(GeoPoint::new(120.9842, 14.5995))
//!     .destination(GeoPoint::new(121.0223, 14.6091))
//!     .build()?;
//! let mut ticker = ManualTicker::new();
//! let mut frames = FrameRecorder::new();
//! session.start(ticker.now(), &mut frames)?;
//! session.run(&mut ticker, &mut frames);
//! ```

pub mod error;
pub mod observer;
pub mod schedule;
pub mod session;
pub mod simulator;
pub mod state;
pub mod ticker;


pub use error::{SimError, SimResult};
pub use observer::{FrameRecorder, NoopObserver, TrackingObserver};
pub use schedule::{Epoch, TickSchedule, Wake, WakeKind};
pub use session::{TrackingSession, TrackingSessionBuilder};
pub use simulator::MovementSimulator;
pub use state::{Frame, SimStatus, SimulationState};
pub use ticker::{ManualTicker, RealtimeTicker, Ticker};
