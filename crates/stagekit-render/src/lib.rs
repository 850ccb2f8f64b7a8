//! StageKit Render Library
//!
//! Renderer abstraction and the SVG exporter for StageKit layouts.

mod renderer;
pub mod svg;

pub use renderer::{RenderContext, RenderResult, Renderer, RendererError, ShapeRenderer};
pub use svg::{SvgRenderer, calculate_star_points};
