//! Canvas - the raster drawing surface.
//!
//! Holds the RGBA pixel buffer together with the drawing configuration that
//! the mode state machine sets up (line width, compositing, stroke and fill
//! colors). Primitives use binary coverage: a pixel is painted when its
//! center lies inside the shape.

use egui::{Color32, Pos2, Vec2};
use image::{Rgba, RgbaImage};
use std::ops::Range;

use crate::snapshot::Snapshot;

/// Width used by a freshly created surface before any mode is applied
pub const DEFAULT_LINE_WIDTH: f32 = 1.0;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// How new drawing combines with the pixels already on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeOp {
    /// Paint over existing pixels
    #[default]
    SourceOver,
    /// Remove existing pixels wherever the source is drawn
    DestinationOut,
}

/// A bitmap canvas for drawing
#[derive(Clone)]
pub struct Canvas {
    image: RgbaImage,
    line_width: f32,
    composite: CompositeOp,
    stroke_color: Color32,
    fill_color: Color32,
    /// Bumped on every pixel mutation so textures know when to re-upload
    version: u64,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("line_width", &self.line_width)
            .field("composite", &self.composite)
            .field("stroke_color", &self.stroke_color)
            .field("fill_color", &self.fill_color)
            .field("version", &self.version)
            .finish()
    }
}

impl Canvas {
    /// Creates a fully transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, TRANSPARENT),
            line_width: DEFAULT_LINE_WIDTH,
            composite: CompositeOp::SourceOver,
            stroke_color: Color32::BLACK,
            fill_color: Color32::BLACK,
            version: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    pub fn composite(&self) -> CompositeOp {
        self.composite
    }

    pub fn set_composite(&mut self, op: CompositeOp) {
        self.composite = op;
    }

    pub fn stroke_color(&self) -> Color32 {
        self.stroke_color
    }

    pub fn set_stroke_color(&mut self, color: Color32) {
        self.stroke_color = color;
    }

    pub fn fill_color(&self) -> Color32 {
        self.fill_color
    }

    pub fn set_fill_color(&mut self, color: Color32) {
        self.fill_color = color;
    }

    /// Reads a pixel, `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        self.image
            .get_pixel_checked(x, y)
            .map(|&Rgba([r, g, b, a])| Color32::from_rgba_unmultiplied(r, g, b, a))
    }

    /// Captures the whole pixel buffer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.image)
    }

    /// Writes a snapshot back at the origin.
    ///
    /// A snapshot of a different size only overwrites the overlapping region.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        let source = snapshot.pixels();
        if source.dimensions() == self.image.dimensions() {
            self.image = source.clone();
        } else {
            log::debug!(
                "Restoring {}x{} snapshot onto {}x{} canvas",
                source.width(),
                source.height(),
                self.width(),
                self.height()
            );
            let width = source.width().min(self.width());
            let height = source.height().min(self.height());
            for y in 0..height {
                for x in 0..width {
                    self.image.put_pixel(x, y, *source.get_pixel(x, y));
                }
            }
        }
        self.version += 1;
    }

    /// Wipes every pixel to fully transparent
    pub fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = TRANSPARENT;
        }
        self.version += 1;
    }

    pub fn stroke_line(&mut self, from: Pos2, to: Pos2) {
        self.stroke_segments(&[(from, to)]);
    }

    /// Strokes the outline of the rectangle spanned by `origin` and `origin + size`
    pub fn stroke_rect(&mut self, origin: Pos2, size: Vec2) {
        if size == Vec2::ZERO {
            return;
        }
        let corners = [
            origin,
            origin + Vec2::new(size.x, 0.0),
            origin + size,
            origin + Vec2::new(0.0, size.y),
        ];
        let segments: Vec<(Pos2, Pos2)> = (0..corners.len())
            .map(|i| (corners[i], corners[(i + 1) % corners.len()]))
            .collect();
        self.stroke_segments(&segments);
    }

    /// Fills the rectangle spanned by `origin` and `origin + size`; either sign works
    pub fn fill_rect(&mut self, origin: Pos2, size: Vec2) {
        let min = origin.min(origin + size);
        let max = origin.max(origin + size);
        let (width, height) = self.image.dimensions();
        let Some(mut coverage) = Coverage::new(
            half_open_range(min.x, max.x, width),
            half_open_range(min.y, max.y, height),
        ) else {
            return;
        };
        coverage.mark_where(|_| true);
        self.apply(&coverage, self.fill_color);
    }

    /// Strokes an axis-aligned ellipse around `center`
    pub fn stroke_ellipse(&mut self, center: Pos2, radii: Vec2) {
        let radii = radii.abs();
        if radii == Vec2::ZERO {
            return;
        }
        let points = ellipse_outline(center, radii);
        let segments: Vec<(Pos2, Pos2)> = (0..points.len())
            .map(|i| (points[i], points[(i + 1) % points.len()]))
            .collect();
        self.stroke_segments(&segments);
    }

    /// Fills an axis-aligned ellipse around `center`
    pub fn fill_ellipse(&mut self, center: Pos2, radii: Vec2) {
        let radii = radii.abs();
        if radii.x <= 0.0 || radii.y <= 0.0 {
            return;
        }
        let (width, height) = self.image.dimensions();
        let Some(mut coverage) = Coverage::new(
            center_range(center.x - radii.x, center.x + radii.x, width),
            center_range(center.y - radii.y, center.y + radii.y, height),
        ) else {
            return;
        };
        coverage.mark_where(|p| {
            let dx = (p.x - center.x) / radii.x;
            let dy = (p.y - center.y) / radii.y;
            dx * dx + dy * dy <= 1.0
        });
        self.apply(&coverage, self.fill_color);
    }

    fn stroke_segments(&mut self, segments: &[(Pos2, Pos2)]) {
        let half = self.line_width / 2.0;
        if half <= 0.0 || segments.is_empty() {
            return;
        }

        let mut min = Pos2::new(f32::INFINITY, f32::INFINITY);
        let mut max = Pos2::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for (a, b) in segments {
            min = min.min(a.min(*b));
            max = max.max(a.max(*b));
        }

        let (width, height) = self.image.dimensions();
        let Some(mut coverage) = Coverage::new(
            center_range(min.x - half, max.x + half, width),
            center_range(min.y - half, max.y + half, height),
        ) else {
            return;
        };
        for &(a, b) in segments {
            coverage.mark_capsule(a, b, half);
        }
        self.apply(&coverage, self.stroke_color);
    }

    fn apply(&mut self, coverage: &Coverage, color: Color32) {
        let source = color.to_srgba_unmultiplied();
        for (x, y) in coverage.covered_pixels() {
            composite_pixel(self.image.get_pixel_mut(x, y), source, self.composite);
        }
        self.version += 1;
    }
}

/// Pixels covered by a single primitive.
///
/// Each pixel is composited at most once per primitive, so overlapping
/// segments of one outline never double-blend.
struct Coverage {
    xs: Range<u32>,
    ys: Range<u32>,
    covered: Vec<bool>,
}

impl Coverage {
    fn new(xs: Range<u32>, ys: Range<u32>) -> Option<Self> {
        if xs.is_empty() || ys.is_empty() {
            return None;
        }
        let len = xs.len() * ys.len();
        Some(Self {
            xs,
            ys,
            covered: vec![false; len],
        })
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y - self.ys.start) as usize * self.xs.len() + (x - self.xs.start) as usize
    }

    fn mark_where(&mut self, inside: impl Fn(Pos2) -> bool) {
        for y in self.ys.clone() {
            for x in self.xs.clone() {
                if inside(pixel_center(x, y)) {
                    let index = self.index(x, y);
                    self.covered[index] = true;
                }
            }
        }
    }

    fn mark_capsule(&mut self, a: Pos2, b: Pos2, half: f32) {
        let xs = intersect(
            center_range(a.x.min(b.x) - half, a.x.max(b.x) + half, u32::MAX),
            &self.xs,
        );
        let ys = intersect(
            center_range(a.y.min(b.y) - half, a.y.max(b.y) + half, u32::MAX),
            &self.ys,
        );
        for y in ys {
            for x in xs.clone() {
                if distance_to_segment(pixel_center(x, y), a, b) <= half {
                    let index = self.index(x, y);
                    self.covered[index] = true;
                }
            }
        }
    }

    fn covered_pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let row = self.xs.len();
        self.covered
            .iter()
            .enumerate()
            .filter(|(_, covered)| **covered)
            .map(move |(i, _)| {
                (
                    self.xs.start + (i % row) as u32,
                    self.ys.start + (i / row) as u32,
                )
            })
    }
}

fn pixel_center(x: u32, y: u32) -> Pos2 {
    Pos2::new(x as f32 + 0.5, y as f32 + 0.5)
}

/// Pixels whose centers lie in `[lo, hi]`, clamped to `0..limit`
fn center_range(lo: f32, hi: f32, limit: u32) -> Range<u32> {
    let limit = limit as f32;
    let start = (lo - 0.5).ceil().clamp(0.0, limit) as u32;
    let end = ((hi - 0.5).floor() + 1.0).clamp(0.0, limit) as u32;
    start..end.max(start)
}

/// Pixels whose centers lie in `[lo, hi)`, clamped to `0..limit`
fn half_open_range(lo: f32, hi: f32, limit: u32) -> Range<u32> {
    let limit = limit as f32;
    let start = (lo - 0.5).ceil().clamp(0.0, limit) as u32;
    let end = (hi - 0.5).ceil().clamp(0.0, limit) as u32;
    start..end.max(start)
}

fn intersect(range: Range<u32>, bounds: &Range<u32>) -> Range<u32> {
    let start = range.start.max(bounds.start);
    let end = range.end.min(bounds.end);
    start..end.max(start)
}

fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Closed polygon approximating the ellipse, with vertices on both axes
fn ellipse_outline(center: Pos2, radii: Vec2) -> Vec<Pos2> {
    let quarter = ((radii.x + radii.y) / 2.0).ceil().max(2.0) as usize;
    let count = quarter * 4;
    (0..count)
        .map(|i| {
            let angle = std::f32::consts::TAU * i as f32 / count as f32;
            center + Vec2::new(radii.x * angle.cos(), radii.y * angle.sin())
        })
        .collect()
}

fn composite_pixel(dst: &mut Rgba<u8>, src: [u8; 4], op: CompositeOp) {
    let src_alpha = f32::from(src[3]) / 255.0;
    match op {
        CompositeOp::SourceOver => {
            let dst_alpha = f32::from(dst[3]) / 255.0;
            let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
            if out_alpha <= 0.0 {
                *dst = TRANSPARENT;
                return;
            }
            for c in 0..3 {
                let value = (f32::from(src[c]) * src_alpha
                    + f32::from(dst[c]) * dst_alpha * (1.0 - src_alpha))
                    / out_alpha;
                dst[c] = value.round().clamp(0.0, 255.0) as u8;
            }
            dst[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
        }
        CompositeOp::DestinationOut => {
            let alpha = (f32::from(dst[3]) * (1.0 - src_alpha)).round() as u8;
            if alpha == 0 {
                *dst = TRANSPARENT;
            } else {
                dst[3] = alpha;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn painted(canvas: &Canvas) -> usize {
        canvas.image().pixels().filter(|p| p[3] > 0).count()
    }

    #[test]
    fn test_new_canvas_is_transparent() {
        let canvas = Canvas::new(8, 6);
        assert_eq!(canvas.width(), 8);
        assert_eq!(canvas.height(), 6);
        assert_eq!(painted(&canvas), 0);
        assert_eq!(canvas.line_width(), DEFAULT_LINE_WIDTH);
    }

    #[test]
    fn test_fill_rect_covers_exact_pixels() {
        let mut canvas = Canvas::new(20, 20);
        canvas.set_fill_color(Color32::RED);
        canvas.fill_rect(pos2(2.0, 3.0), vec2(4.0, 5.0));

        assert_eq!(painted(&canvas), 20);
        assert_eq!(canvas.pixel(2, 3), Some(Color32::RED));
        assert_eq!(canvas.pixel(5, 7), Some(Color32::RED));
        assert_eq!(canvas.pixel(6, 7), Some(Color32::TRANSPARENT));
    }

    #[test]
    fn test_fill_rect_accepts_negative_size() {
        let mut canvas = Canvas::new(20, 20);
        canvas.fill_rect(pos2(6.0, 8.0), vec2(-4.0, -5.0));
        assert_eq!(painted(&canvas), 20);
        assert!(canvas.pixel(2, 3).is_some_and(|c| c.a() == 255));
    }

    #[test]
    fn test_stroke_line_is_clipped_to_canvas() {
        let mut canvas = Canvas::new(10, 10);
        canvas.set_line_width(2.0);
        canvas.stroke_line(pos2(-50.0, 5.0), pos2(50.0, 5.0));

        // Rows 4 and 5 have centers within one pixel of y = 5
        assert_eq!(painted(&canvas), 20);
    }

    #[test]
    fn test_zero_sized_shapes_draw_nothing() {
        let mut canvas = Canvas::new(10, 10);
        canvas.set_line_width(2.0);
        canvas.stroke_rect(pos2(5.0, 5.0), Vec2::ZERO);
        canvas.fill_rect(pos2(5.0, 5.0), Vec2::ZERO);
        canvas.stroke_ellipse(pos2(5.0, 5.0), Vec2::ZERO);
        canvas.fill_ellipse(pos2(5.0, 5.0), Vec2::ZERO);
        assert_eq!(painted(&canvas), 0);
    }

    #[test]
    fn test_destination_out_removes_pixels() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_rect(Pos2::ZERO, vec2(10.0, 10.0));
        canvas.set_composite(CompositeOp::DestinationOut);
        canvas.fill_rect(pos2(0.0, 0.0), vec2(5.0, 10.0));

        assert_eq!(painted(&canvas), 50);
        assert_eq!(canvas.pixel(0, 0), Some(Color32::TRANSPARENT));
    }

    #[test]
    fn test_source_over_blends_translucent_color() {
        let mut canvas = Canvas::new(4, 4);
        canvas.set_fill_color(Color32::WHITE);
        canvas.fill_rect(Pos2::ZERO, vec2(4.0, 4.0));
        canvas.set_fill_color(Color32::from_rgba_unmultiplied(0, 0, 0, 128));
        canvas.fill_rect(Pos2::ZERO, vec2(4.0, 4.0));

        let [r, _, _, a] = canvas.image().get_pixel(1, 1).0;
        assert_eq!(a, 255);
        assert!((120..=135).contains(&r));
    }

    #[test]
    fn test_restore_and_clear_bump_version() {
        let mut canvas = Canvas::new(6, 6);
        let blank = canvas.snapshot();
        canvas.fill_rect(Pos2::ZERO, vec2(3.0, 3.0));
        let drawn_version = canvas.version();

        canvas.restore(&blank);
        assert!(canvas.version() > drawn_version);
        assert_eq!(painted(&canvas), 0);

        canvas.fill_rect(Pos2::ZERO, vec2(3.0, 3.0));
        canvas.clear();
        assert_eq!(painted(&canvas), 0);
    }

    #[test]
    fn test_restore_smaller_snapshot_overwrites_overlap_only() {
        let mut canvas = Canvas::new(6, 6);
        canvas.fill_rect(Pos2::ZERO, vec2(6.0, 6.0));
        let small = Canvas::new(2, 2).snapshot();

        canvas.restore(&small);
        assert_eq!(canvas.width(), 6);
        assert_eq!(painted(&canvas), 32);
    }

    #[test]
    fn test_stroke_ellipse_passes_through_axis_points() {
        let mut canvas = Canvas::new(40, 40);
        canvas.set_line_width(2.0);
        canvas.stroke_ellipse(pos2(20.0, 20.0), vec2(10.0, 6.0));

        assert!(canvas.pixel(29, 19).is_some_and(|c| c.a() > 0));
        assert!(canvas.pixel(19, 13).is_some_and(|c| c.a() > 0));
        assert_eq!(canvas.pixel(20, 20), Some(Color32::TRANSPARENT));
    }
}
