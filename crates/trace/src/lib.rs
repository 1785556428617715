//! Trace export for scheduler timelines.
//!
//! Snapshots the per-thread slices recorded by a
//! [`Scheduler`](pipesim_simulation::Scheduler) and renders them as a
//! self-contained HTML diagram, or as JSON for other tooling.

mod error;
mod html;
mod snapshot;

pub use error::TraceError;
pub use html::{render_html, write_html, DATA_MARKER};
pub use snapshot::{write_json, ThreadTrace, TraceData};
