//! Interaction module
//!
//! Pointer events, display sinks and the focus session that drives refocusing from clicks.

mod events;
mod sink;
mod session;

pub use events::{PointerEvent, SessionControl};
pub use sink::{DisplaySink, TiffFileSink};
pub use session::FocusSession;
