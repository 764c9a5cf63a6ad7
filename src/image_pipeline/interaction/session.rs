use tracing::{debug, warn};

use crate::image_pipeline::common::error::{BokehError, Result};
use crate::image_pipeline::conversions::BokehPipeline;
use crate::image_pipeline::frame::FrameBuffer;
use crate::image_pipeline::interaction::events::{PointerEvent, SessionControl};
use crate::image_pipeline::interaction::sink::DisplaySink;
use crate::image_pipeline::tiff::{RgbdImageReader, TiffWriter};

/// Interactive refocusing over one frame.
///
/// The session owns the frame for its whole lifetime. A left click reads the
/// depth under the pointer, re-renders the frame at that focal depth and
/// presents the result once.
pub struct FocusSession<'a, R: RgbdImageReader, W: TiffWriter, S: DisplaySink> {
    pipeline: &'a BokehPipeline<R, W>,
    frame: FrameBuffer,
    sink: S,
}

impl<'a, R: RgbdImageReader, W: TiffWriter, S: DisplaySink> FocusSession<'a, R, W, S> {
    pub fn new(pipeline: &'a BokehPipeline<R, W>, frame: FrameBuffer, sink: S) -> Self {
        Self { pipeline, frame, sink }
    }

    /// Present the initial, unfocused output.
    pub fn start(&mut self) -> Result<()> {
        self.sink.present(self.frame.output())
    }

    /// Re-render at `focus` and present the result.
    pub fn refocus(&mut self, focus: u8) -> Result<()> {
        self.pipeline.refocus(&mut self.frame, focus)?;
        self.sink.present(self.frame.output())
    }

    pub fn dispatch(&mut self, event: PointerEvent) -> Result<SessionControl> {
        match event {
            PointerEvent::LeftButtonDown { x, y } => {
                let focus = self.frame.depth_at_pointer(x, y)?;
                debug!(x, y, focus, "Focus picked from depth map");
                self.refocus(focus)?;
                Ok(SessionControl::Continue)
            }
            PointerEvent::RightButtonDown { .. }
            | PointerEvent::MiddleButtonDown { .. }
            | PointerEvent::Move { .. } => Ok(SessionControl::Continue),
            PointerEvent::Quit => Ok(SessionControl::Stop),
        }
    }

    /// Dispatch events until one stops the session or the source runs dry.
    /// Clicks outside the image are logged and skipped.
    pub fn run<I: IntoIterator<Item = PointerEvent>>(&mut self, events: I) -> Result<()> {
        for event in events {
            match self.dispatch(event) {
                Ok(SessionControl::Continue) => {}
                Ok(SessionControl::Stop) => break,
                Err(e @ BokehError::PointerOutOfBounds { .. }) => warn!("{}", e),
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
