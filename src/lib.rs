//! Aircraft maintenance task timeline.
//!
//! The schedule core (`model`, `engine`, `viewport`, `snapshot`) has no UI
//! dependency; `app` and `ui` render it with egui.

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod model;
pub mod snapshot;
pub mod telemetry;
pub mod ui;
pub mod viewport;

pub use error::{HangarError, HangarResult};
