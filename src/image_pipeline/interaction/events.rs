use std::str::FromStr;

use crate::image_pipeline::common::error::BokehError;

/// Pointer input in image coordinates: `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    LeftButtonDown { x: usize, y: usize },
    RightButtonDown { x: usize, y: usize },
    MiddleButtonDown { x: usize, y: usize },
    Move { x: usize, y: usize },
    Quit,
}

/// Whether the session keeps running after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionControl {
    Continue,
    Stop,
}

impl FromStr for PointerEvent {
    type Err = BokehError;

    /// Parse a text event: `click X Y` (or `left X Y`), `right X Y`,
    /// `middle X Y`, `move X Y`, or `q` / `quit` / `esc`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let invalid = || BokehError::InvalidEvent(line.trim().to_string());

        let kind = parts.next().ok_or_else(invalid)?.to_ascii_lowercase();
        if matches!(kind.as_str(), "q" | "quit" | "esc") {
            return match parts.next() {
                None => Ok(PointerEvent::Quit),
                Some(_) => Err(invalid()),
            };
        }

        let mut coordinate = || -> Result<usize, BokehError> {
            parts.next().and_then(|v| v.parse().ok()).ok_or_else(invalid)
        };
        let x = coordinate()?;
        let y = coordinate()?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        match kind.as_str() {
            "click" | "left" => Ok(PointerEvent::LeftButtonDown { x, y }),
            "right" => Ok(PointerEvent::RightButtonDown { x, y }),
            "middle" => Ok(PointerEvent::MiddleButtonDown { x, y }),
            "move" => Ok(PointerEvent::Move { x, y }),
            _ => Err(invalid()),
        }
    }
}
