//! Anti-aliased drawing surface backed by a `tiny_skia::Pixmap`.
//!
//! Geometry (mesh, coastlines, markers, legend handles) is drawn here;
//! text is added afterwards on the converted [`image::RgbaImage`].

use image::RgbaImage;
use tiny_skia::{
    FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Rect, Stroke, StrokeDash, Transform,
};

use crate::color::Color;
use crate::error::{RenderError, RenderResult};

/// Stroke settings in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    pub width: f32,
    /// On/off lengths of a dash pattern; `None` for a solid line.
    pub dash: Option<(f32, f32)>,
}

impl LineStyle {
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    /// Dotted line in the proportions of a `:` line style.
    pub fn dotted(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dash: Some((width, 1.65 * width)),
        }
    }

    fn to_stroke(&self) -> Stroke {
        let mut stroke = Stroke::default();
        stroke.width = self.width.max(0.1);
        stroke.line_join = LineJoin::Round;
        match self.dash {
            Some((on, off)) => {
                stroke.line_cap = LineCap::Butt;
                stroke.dash = StrokeDash::new(vec![on.max(0.1), off.max(0.1)], 0.0);
            }
            None => stroke.line_cap = LineCap::Round,
        }
        stroke
    }
}

fn paint_for(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = true;
    paint
}

pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Color) -> RenderResult<Self> {
        let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::InvalidSize { width, height })?;
        pixmap.fill(background.to_skia());
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Raw premultiplied RGBA bytes, row-major.
    ///
    /// Writing opaque colors here is equivalent to writing straight RGBA.
    pub fn data_mut(&mut self) -> &mut [u8] {
        self.pixmap.data_mut()
    }

    /// Straight-alpha color of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::new(c.red(), c.green(), c.blue(), c.alpha()))
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        if let Some(rect) = Rect::from_xywh(x, y, width, height) {
            self.pixmap
                .fill_rect(rect, &paint_for(color), Transform::identity(), None);
        }
    }

    pub fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, style: &LineStyle) {
        let corners = [
            (x, y),
            (x + width, y),
            (x + width, y + height),
            (x, y + height),
        ];
        self.stroke_path(&corners, true, style);
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, fill: Color, edge: Option<&LineStyle>) {
        let Some(path) = PathBuilder::from_circle(cx, cy, radius) else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &paint_for(fill),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
        if let Some(style) = edge {
            self.pixmap.stroke_path(
                &path,
                &paint_for(style.color),
                &style.to_stroke(),
                Transform::identity(),
                None,
            );
        }
    }

    /// Fill a closed polygon, then optionally stroke its outline.
    pub fn fill_polygon(&mut self, points: &[(f32, f32)], fill: Color, edge: Option<&LineStyle>) {
        let Some(path) = build_path(points, true) else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &paint_for(fill),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
        if let Some(style) = edge {
            self.pixmap.stroke_path(
                &path,
                &paint_for(style.color),
                &style.to_stroke(),
                Transform::identity(),
                None,
            );
        }
    }

    pub fn stroke_polyline(&mut self, points: &[(f32, f32)], style: &LineStyle) {
        self.stroke_path(points, false, style);
    }

    fn stroke_path(&mut self, points: &[(f32, f32)], closed: bool, style: &LineStyle) {
        let Some(path) = build_path(points, closed) else {
            return;
        };
        self.pixmap.stroke_path(
            &path,
            &paint_for(style.color),
            &style.to_stroke(),
            Transform::identity(),
            None,
        );
    }

    /// Upward-pointing triangle marker centered on `(cx, cy)`.
    pub fn draw_triangle_marker(&mut self, cx: f32, cy: f32, size: f32, fill: Color, edge: &LineStyle) {
        self.fill_polygon(&triangle_vertices(cx, cy, size), fill, Some(edge));
    }

    /// Convert to a straight-alpha image for text drawing and encoding.
    pub fn into_image(self) -> RenderResult<RgbaImage> {
        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        let mut raw = Vec::with_capacity(width as usize * height as usize * 4);
        for p in self.pixmap.pixels() {
            let c = p.demultiply();
            raw.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        RgbaImage::from_raw(width, height, raw).ok_or(RenderError::InvalidSize { width, height })
    }
}

fn build_path(points: &[(f32, f32)], closed: bool) -> Option<tiny_skia::Path> {
    let (first, rest) = points.split_first()?;
    if rest.is_empty() {
        return None;
    }
    let mut pb = PathBuilder::new();
    pb.move_to(first.0, first.1);
    for &(x, y) in rest {
        pb.line_to(x, y);
    }
    if closed {
        pb.close();
    }
    pb.finish()
}

/// Vertices of a `^` marker of the given size (side of its bounding square).
pub fn triangle_vertices(cx: f32, cy: f32, size: f32) -> [(f32, f32); 3] {
    let h = size / 2.0;
    [(cx, cy - h), (cx - h, cy + h), (cx + h, cy + h)]
}
