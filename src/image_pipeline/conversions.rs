//! Pipeline conversions module
//!
//! This module contains orchestration logic turning RGB-D inputs into refocused frames.

mod rgbd_to_bokeh;


pub use rgbd_to_bokeh::BokehPipeline;
