//! Renderers for chart layouts
//!
//! SVG output draws cards and connector lines with stylesheet colours; JSON
//! output exposes the raw placement and segment geometry.

pub mod config;
pub mod json;
pub mod svg;

pub use config::SvgConfig;
pub use json::render_json;
pub use svg::{render_svg, render_svg_with_stylesheet};
