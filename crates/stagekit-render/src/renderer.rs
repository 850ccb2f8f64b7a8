//! Renderer trait abstraction.

use kurbo::{Affine, Rect, Size};
use peniko::Color;
use stagekit_core::canvas::Canvas;
use stagekit_core::shapes::Shape;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Failed to write output: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render pass.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub canvas: &'a Canvas,
    /// Stage size in pixels.
    pub viewport_size: Size,
    /// Background color.
    pub background_color: Color,
    /// Selection highlight color.
    pub selection_color: Color,
    /// Draw selection outlines around selected shapes.
    pub show_selection: bool,
    /// Marquee rectangle in stage coordinates.
    pub selection_rect: Option<Rect>,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(canvas: &'a Canvas, viewport_size: Size) -> Self {
        Self {
            canvas,
            viewport_size,
            background_color: Color::from_rgba8(255, 255, 255, 255),
            selection_color: Color::from_rgba8(59, 130, 246, 255), // Blue
            show_selection: true,
            selection_rect: None,
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }

    /// Hide selection outlines, e.g. for export.
    pub fn without_selection(mut self) -> Self {
        self.show_selection = false;
        self
    }

    /// Set the marquee rectangle.
    pub fn with_selection_rect(mut self, rect: Option<Rect>) -> Self {
        self.selection_rect = rect;
        self
    }

    /// Shapes in paint order: grouped shapes first, then ungrouped.
    pub fn shapes_ordered(&self) -> Vec<&'a Shape> {
        self.canvas.scene().render_order()
    }

    /// Whether the shape should get a selection outline.
    pub fn is_highlighted(&self, shape: &Shape) -> bool {
        self.show_selection && self.canvas.is_selected(&shape.id)
    }
}

/// Trait for rendering backends.
pub trait Renderer: Send + Sync {
    /// Build the output for one pass over the canvas.
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

/// Per-shape drawing, used by renderers while walking the scene.
pub trait ShapeRenderer {
    /// Render a shape with the given world-to-output transform.
    fn render_shape(&mut self, shape: &Shape, transform: Affine, selected: bool) -> RenderResult<()>;

    /// Render the marquee rectangle.
    fn render_selection_rect(&mut self, rect: Rect) -> RenderResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn test_context_defaults() {
        let canvas = Canvas::default();
        let ctx = RenderContext::new(&canvas, Size::new(800.0, 600.0));
        assert!(ctx.show_selection);
        assert!(ctx.selection_rect.is_none());
        assert_eq!(ctx.background_color.to_rgba8().a, 255);
        assert!(!ctx.without_selection().show_selection);
    }

    #[test]
    fn test_shapes_ordered_grouped_first() {
        let mut canvas = Canvas::default();
        canvas.drop_payload("Rect", Point::new(300.0, 300.0)).unwrap();
        canvas.drop_payload("Rect", Point::new(600.0, 300.0)).unwrap();
        canvas.select(&["rectangle_2".to_string()]);
        canvas.toggle_group();

        let ctx = RenderContext::new(&canvas, Size::new(800.0, 600.0));
        let order: Vec<&str> = ctx.shapes_ordered().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(order, vec!["rectangle_2", "rectangle_1"]);
    }

    #[test]
    fn test_highlight_follows_selection() {
        let mut canvas = Canvas::default();
        canvas.drop_payload("Rect", Point::new(300.0, 300.0)).unwrap();
        canvas.select(&["rectangle_1".to_string()]);
        let shape = canvas.shapes()[0].clone();

        let ctx = RenderContext::new(&canvas, Size::new(800.0, 600.0));
        assert!(ctx.is_highlighted(&shape));
        assert!(!ctx.without_selection().is_highlighted(&shape));
    }
}
