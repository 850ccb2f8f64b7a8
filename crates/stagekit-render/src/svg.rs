//! SVG export of the layout.

use crate::renderer::{RenderContext, RenderResult, Renderer, ShapeRenderer};
use kurbo::{Affine, Point, Rect, Size};
use log::debug;
use peniko::Color;
use stagekit_core::canvas::Canvas;
use stagekit_core::shapes::{Shape, ShapeKind, parse_hex_color};
use std::f64::consts::PI;
use std::fmt::Write;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Renders the canvas into standalone SVG markup.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    size: Size,
    elements: Vec<String>,
    background: Color,
    selection_color: Color,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self {
            size: Size::ZERO,
            elements: Vec::new(),
            background: Color::from_rgba8(255, 255, 255, 255),
            selection_color: Color::from_rgba8(59, 130, 246, 255),
        }
    }

    /// Elements produced by the last pass, one per drawn item.
    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    /// Assemble the document from the last pass.
    pub fn to_svg(&self) -> String {
        let mut out = format!(
            "<svg xmlns=\"{SVG_NS}\" width=\"{}px\" height=\"{}px\">\n",
            self.size.width, self.size.height
        );
        out.push_str("  <rect width=\"100%\" height=\"100%\" ");
        out.push_str(&paint("fill", &hex_rgba(self.background)));
        out.push_str("/>\n");
        for element in &self.elements {
            out.push_str("  ");
            out.push_str(element);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }

    /// Export a canvas without selection decoration.
    pub fn export(canvas: &Canvas, size: Size) -> RenderResult<String> {
        let mut renderer = Self::new();
        let ctx = RenderContext::new(canvas, size).without_selection();
        renderer.build_scene(&ctx)?;
        Ok(renderer.to_svg())
    }

    fn push(&mut self, element: String, transform: Affine) {
        if transform == Affine::IDENTITY {
            self.elements.push(element);
        } else {
            let [a, b, c, d, e, f] = transform.as_coeffs();
            self.elements
                .push(format!("<g transform=\"matrix({a} {b} {c} {d} {e} {f})\">{element}</g>"));
        }
    }

    fn render_image(&mut self, shape: &Shape, transform: Affine) -> RenderResult<()> {
        let ShapeKind::Image(image) = &shape.kind else {
            return Ok(());
        };
        let Some(data) = image.loaded() else {
            debug!("Skipping image {} that has not loaded", shape.id);
            return Ok(());
        };
        let mut el = String::new();
        write!(
            el,
            "<image href=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
            data.to_data_url(),
            shape.x - image.width / 2.0,
            shape.y - image.height / 2.0,
            image.width,
            image.height
        )?;
        write_pose(&mut el, shape)?;
        el.push_str("/>");
        self.push(el, transform);
        Ok(())
    }
}

/// Vertices of a star centered on `(cx, cy)`, alternating outer and inner
/// radius, starting straight up.
pub fn calculate_star_points(cx: f64, cy: f64, num_points: u32, inner_radius: f64, outer_radius: f64) -> Vec<Point> {
    let angle = PI / f64::from(num_points.max(1));
    (0..u64::from(num_points) * 2)
        .map(|i| {
            let r = if i % 2 == 0 { outer_radius } else { inner_radius };
            let theta = i as f64 * angle;
            Point::new(cx + r * theta.sin(), cy - r * theta.cos())
        })
        .collect()
}

/// Escape text for use in element content and attribute values.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn hex(color: Color) -> String {
    let rgba = color.to_rgba8();
    format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
}

fn hex_rgba(color: Color) -> String {
    format!("{}{:02x}", hex(color), color.to_rgba8().a)
}

/// Paint attribute (`fill` or `stroke`) with an opacity companion when needed.
fn paint(attr: &str, value: &str) -> String {
    match parse_hex_color(value) {
        Some(color) => {
            let alpha = color.to_rgba8().a;
            if alpha == 255 {
                format!("{attr}=\"{}\"", hex(color))
            } else {
                format!("{attr}=\"{}\" {attr}-opacity=\"{}\"", hex(color), f64::from(alpha) / 255.0)
            }
        }
        None => format!("{attr}=\"{}\"", escape_xml(value)),
    }
}

/// Rotation about the shape position, plus flip/scale when not identity.
fn write_pose(el: &mut String, shape: &Shape) -> std::fmt::Result {
    let (x, y) = (shape.x, shape.y);
    write!(el, " transform=\"rotate({}, {x}, {y})", shape.rotation)?;
    if shape.scale_x != 1.0 || shape.scale_y != 1.0 {
        write!(
            el,
            " translate({x}, {y}) scale({}, {}) translate({}, {})",
            shape.scale_x, shape.scale_y, -x, -y
        )?;
    }
    el.push('"');
    Ok(())
}

impl Renderer for SvgRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        self.elements.clear();
        self.size = ctx.viewport_size;
        self.background = self.background_color(ctx);
        self.selection_color = ctx.selection_color;

        for shape in ctx.shapes_ordered() {
            self.render_shape(shape, Affine::IDENTITY, ctx.is_highlighted(shape))?;
        }
        if let Some(rect) = ctx.selection_rect {
            self.render_selection_rect(rect)?;
        }
        debug!("Built SVG with {} elements", self.elements.len());
        Ok(())
    }
}

impl ShapeRenderer for SvgRenderer {
    fn render_shape(&mut self, shape: &Shape, transform: Affine, selected: bool) -> RenderResult<()> {
        let (x, y) = (shape.x, shape.y);
        let mut el = String::new();
        match &shape.kind {
            ShapeKind::Rectangle(rect) => {
                write!(
                    el,
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" {}",
                    x - rect.width / 2.0,
                    y - rect.height / 2.0,
                    rect.width,
                    rect.height,
                    paint("fill", &rect.fill)
                )?;
                write_pose(&mut el, shape)?;
                el.push_str("/>");
            }
            ShapeKind::Location(location) => {
                write!(
                    el,
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"none\" {} stroke-width=\"{}\"",
                    x - location.width / 2.0,
                    y - location.height / 2.0,
                    location.width,
                    location.height,
                    paint("stroke", &location.fill),
                    location.stroke_width
                )?;
                write_pose(&mut el, shape)?;
                el.push_str("/>");
            }
            ShapeKind::Circle(circle) => {
                write!(
                    el,
                    "<circle cx=\"{x}\" cy=\"{y}\" r=\"{}\" {}",
                    circle.radius,
                    paint("fill", &circle.fill)
                )?;
                write_pose(&mut el, shape)?;
                el.push_str("/>");
            }
            ShapeKind::Star(star) => {
                let points = calculate_star_points(x, y, star.num_points, star.inner_radius, star.outer_radius)
                    .iter()
                    .map(|p| format!("{},{}", p.x, p.y))
                    .collect::<Vec<_>>()
                    .join(" ");
                write!(el, "<polygon points=\"{points}\" {}", paint("fill", &star.fill))?;
                write_pose(&mut el, shape)?;
                el.push_str("/>");
            }
            ShapeKind::Image(_) => {
                self.render_image(shape, transform)?;
            }
            ShapeKind::Text(text) => {
                write!(
                    el,
                    "<text x=\"{x}\" y=\"{y}\" font-size=\"{}\" font-family=\"{}\" {} dominant-baseline=\"hanging\"",
                    text.font_size,
                    escape_xml(&text.font_family),
                    paint("fill", &text.fill)
                )?;
                write_pose(&mut el, shape)?;
                el.push('>');
                for (i, line) in text.text.lines().enumerate() {
                    let dy = if i == 0 { 0.0 } else { text.font_size };
                    write!(el, "<tspan x=\"{x}\" dy=\"{dy}\">{}</tspan>", escape_xml(line))?;
                }
                el.push_str("</text>");
            }
        }
        if !el.is_empty() {
            self.push(el, transform);
        }

        if selected {
            let bounds = shape.bounds();
            let outline = format!(
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"none\" stroke=\"{}\" stroke-dasharray=\"4 2\"/>",
                bounds.x0,
                bounds.y0,
                bounds.width(),
                bounds.height(),
                hex(self.selection_color)
            );
            self.push(outline, transform);
        }
        Ok(())
    }

    fn render_selection_rect(&mut self, rect: Rect) -> RenderResult<()> {
        let color = hex(self.selection_color);
        self.elements.push(format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{color}\" fill-opacity=\"0.1\" stroke=\"{color}\"/>",
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height()
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(json: &str) -> Canvas {
        let mut canvas = Canvas::default();
        canvas.import_json(json).unwrap();
        canvas
    }

    fn render(canvas: &Canvas) -> SvgRenderer {
        let mut renderer = SvgRenderer::new();
        let ctx = RenderContext::new(canvas, Size::new(1280.0, 800.0));
        renderer.build_scene(&ctx).unwrap();
        renderer
    }

    #[test]
    fn test_document_root() {
        let svg = SvgRenderer::export(&Canvas::default(), Size::new(1280.0, 800.0)).unwrap();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"1280px\" height=\"800px\">"));
        assert!(svg.contains("<rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_background_and_selection_colors() {
        let mut canvas = canvas(
            r##"{ "shapes": [ { "id": "r", "type": "rectangle", "x": 50, "y": 50, "width": 10, "height": 10, "fill": "#000" } ] }"##,
        );
        canvas.select(&["r".to_string()]);

        let mut renderer = SvgRenderer::new();
        let ctx = RenderContext::new(&canvas, Size::new(100.0, 100.0))
            .with_background(Color::from_rgba8(16, 32, 48, 128))
            .with_selection_color(Color::from_rgba8(255, 0, 0, 255));
        renderer.build_scene(&ctx).unwrap();
        assert!(renderer.elements()[1].contains("stroke=\"#ff0000\""));
        let svg = renderer.to_svg();
        assert!(svg.contains("fill=\"#102030\" fill-opacity=\""));
    }

    #[test]
    fn test_rectangle_centered_and_rotated() {
        let canvas = canvas(
            r##"{ "shapes": [ { "id": "r", "type": "rectangle", "x": 200, "y": 100, "width": 80, "height": 40, "fill": "#0000FF", "rotation": 30 } ] }"##,
        );
        let renderer = render(&canvas);
        assert_eq!(
            renderer.elements(),
            ["<rect x=\"160\" y=\"80\" width=\"80\" height=\"40\" fill=\"#0000ff\" transform=\"rotate(30, 200, 100)\"/>"]
        );
    }

    #[test]
    fn test_location_is_stroked() {
        let canvas = canvas(
            r##"{ "shapes": [ { "id": "l", "type": "location", "x": 100, "y": 100, "width": 50, "height": 50, "fill": "#f00", "strokeWidth": 3 } ] }"##,
        );
        let renderer = render(&canvas);
        let el = &renderer.elements()[0];
        assert!(el.contains("fill=\"none\""));
        assert!(el.contains("stroke=\"#ff0000\""));
        assert!(el.contains("stroke-width=\"3\""));
    }

    #[test]
    fn test_circle_and_translucent_fill() {
        let canvas = canvas(
            r##"{ "shapes": [ { "id": "c", "type": "circle", "x": 10, "y": 20, "radius": 5, "fill": "#ff000080" } ] }"##,
        );
        let renderer = render(&canvas);
        let el = &renderer.elements()[0];
        assert!(el.starts_with("<circle cx=\"10\" cy=\"20\" r=\"5\" fill=\"#ff0000\" fill-opacity="));
    }

    #[test]
    fn test_circle_carries_scale_and_rotation() {
        let canvas = canvas(
            r##"{ "shapes": [ { "id": "c", "type": "circle", "x": 10, "y": 20, "radius": 5, "fill": "#000", "rotation": 15, "scaleX": 2 } ] }"##,
        );
        let renderer = render(&canvas);
        let el = &renderer.elements()[0];
        assert!(el.contains("rotate(15, 10, 20)"));
        assert!(el.contains("scale(2, 1)"));
        assert!(el.ends_with("/>"));
    }

    #[test]
    fn test_star_points() {
        let points = calculate_star_points(100.0, 100.0, 5, 20.0, 40.0);
        assert_eq!(points.len(), 10);
        assert!((points[0].x - 100.0).abs() < 1e-9);
        assert!((points[0].y - 60.0).abs() < 1e-9);
        // Second vertex is on the inner radius.
        assert!(((points[1] - Point::new(100.0, 100.0)).hypot() - 20.0).abs() < 1e-9);
        assert!((points[5].y - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_star_with_huge_point_count_exports() {
        let canvas = canvas(
            r##"{ "shapes": [ { "id": "s", "type": "star", "x": 100, "y": 100, "numPoints": 3000000000, "innerRadius": 10, "radius": 20, "fill": "#ffd700" } ] }"##,
        );
        let renderer = render(&canvas);
        let el = &renderer.elements()[0];
        let vertices = el.split("points=\"").nth(1).unwrap().split('"').next().unwrap();
        assert_eq!(vertices.split(' ').count(), 200);
    }

    #[test]
    fn test_star_polygon() {
        let canvas = canvas(
            r##"{ "shapes": [ { "id": "s", "type": "star", "x": 100, "y": 100, "numPoints": 4, "innerRadius": 10, "radius": 20, "fill": "#ffd700" } ] }"##,
        );
        let renderer = render(&canvas);
        let el = &renderer.elements()[0];
        assert!(el.starts_with("<polygon points=\"100,80 "));
        assert!(el.ends_with("transform=\"rotate(0, 100, 100)\"/>"));
    }

    #[test]
    fn test_image_requires_loaded_bytes() {
        let mut canvas = Canvas::default();
        canvas.drop_payload("Shape", Point::new(300.0, 300.0)).unwrap();
        assert!(render(&canvas).elements().is_empty());

        canvas.install_image("./science.svg", b"<svg/>").unwrap();
        let renderer = render(&canvas);
        let el = &renderer.elements()[0];
        assert!(el.starts_with("<image href=\"data:image/svg+xml;base64,"));
        assert!(el.contains("x=\"250\" y=\"250\" width=\"100\" height=\"100\""));
    }

    #[test]
    fn test_text_escaped() {
        let canvas = canvas(
            r##"{ "shapes": [ { "id": "t", "type": "text", "x": 10, "y": 10, "text": "a < b & c\nnext", "fontSize": 20, "fontFamily": "Calibri", "fill": "#000" } ] }"##,
        );
        let renderer = render(&canvas);
        let el = &renderer.elements()[0];
        assert!(el.contains(">a &lt; b &amp; c</tspan>"));
        assert!(el.contains("<tspan x=\"10\" dy=\"20\">next</tspan>"));
    }

    #[test]
    fn test_flip_in_transform() {
        let canvas = canvas(
            r##"{ "shapes": [ { "id": "r", "type": "rectangle", "x": 50, "y": 50, "width": 10, "height": 10, "fill": "#000", "scaleX": -1 } ] }"##,
        );
        let renderer = render(&canvas);
        let el = &renderer.elements()[0];
        assert!(el.contains("scale(-1, 1)"));
    }

    #[test]
    fn test_selection_outline_and_marquee() {
        let mut canvas = canvas(
            r##"{ "shapes": [ { "id": "r", "type": "rectangle", "x": 50, "y": 50, "width": 10, "height": 10, "fill": "#000" } ] }"##,
        );
        canvas.select(&["r".to_string()]);

        let mut renderer = SvgRenderer::new();
        let ctx = RenderContext::new(&canvas, Size::new(100.0, 100.0))
            .with_selection_rect(Some(Rect::new(0.0, 0.0, 20.0, 20.0)));
        renderer.build_scene(&ctx).unwrap();
        assert_eq!(renderer.elements().len(), 3);
        assert!(renderer.elements()[1].contains("stroke-dasharray"));

        let exported = SvgRenderer::export(&canvas, Size::new(100.0, 100.0)).unwrap();
        assert!(!exported.contains("stroke-dasharray"));
    }

    #[test]
    fn test_non_identity_transform_wraps_group() {
        let canvas = canvas(
            r##"{ "shapes": [ { "id": "c", "type": "circle", "x": 10, "y": 10, "radius": 5, "fill": "#000" } ] }"##,
        );
        let mut renderer = SvgRenderer::new();
        renderer
            .render_shape(&canvas.shapes()[0], Affine::scale(2.0), false)
            .unwrap();
        assert!(renderer.elements()[0].starts_with("<g transform=\"matrix(2 0 0 2 0 0)\"><circle"));
    }
}
