use crate::geometry::Rect;
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

/// How a painted color combines with the pixel underneath
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaintMode {
    /// Write the color as given, alpha included
    #[default]
    Replace,
    /// Composite over the existing pixel (source-over)
    SourceOver,
}

/// One paint operation over the canvas
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Replace every pixel with a solid color
    Fill(Rgba<u8>),
    /// Top-to-bottom linear gradient clipped to a rounded rectangle
    VerticalGradient {
        rect: Rect,
        radius: f32,
        from: Rgba<u8>,
        to: Rgba<u8>,
    },
    /// Closed polygon, even-odd fill rule
    Polygon {
        points: Vec<(f32, f32)>,
        color: Rgba<u8>,
    },
    RoundedRect {
        rect: Rect,
        radius: f32,
        color: Rgba<u8>,
    },
    /// Ring of `width` pixels traced inward from the rounded rectangle edge
    RoundedRectOutline {
        rect: Rect,
        radius: f32,
        width: f32,
        color: Rgba<u8>,
    },
    /// Ellipse inscribed in `rect`
    Ellipse { rect: Rect, color: Rgba<u8> },
}

/// Mutable raster that draw commands are painted onto
pub struct Canvas {
    img: RgbaImage,
    mode: PaintMode,
}

impl Canvas {
    pub fn new(size: u32) -> Self {
        Canvas::with_mode(size, PaintMode::default())
    }

    pub fn with_mode(size: u32, mode: PaintMode) -> Self {
        Canvas {
            img: RgbaImage::new(size, size),
            mode,
        }
    }

    pub fn size(&self) -> u32 {
        self.img.width()
    }

    pub fn apply(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Fill(color) => {
                for pixel in self.img.pixels_mut() {
                    *pixel = *color;
                }
            }
            DrawCommand::VerticalGradient { rect, radius, from, to } => {
                self.fill_gradient(rect, *radius, *from, *to)
            }
            DrawCommand::Polygon { points, color } => self.fill_polygon(points, *color),
            DrawCommand::RoundedRect { rect, radius, color } => {
                self.fill_where(rect, *color, |x, y| rect.contains_rounded(x, y, *radius))
            }
            DrawCommand::RoundedRectOutline { rect, radius, width, color } => {
                let inner = rect.inset(*width);
                let inner_radius = (radius - width).max(0.0);
                self.fill_where(rect, *color, |x, y| {
                    rect.contains_rounded(x, y, *radius)
                        && (inner.is_empty() || !inner.contains_rounded(x, y, inner_radius))
                })
            }
            DrawCommand::Ellipse { rect, color } => {
                let (cx, cy) = rect.center();
                let (rx, ry) = (rect.width() / 2.0, rect.height() / 2.0);
                if rx <= 0.0 || ry <= 0.0 {
                    return;
                }
                self.fill_where(rect, *color, |x, y| {
                    let (nx, ny) = ((x - cx) / rx, (y - cy) / ry);
                    nx * nx + ny * ny <= 1.0
                })
            }
        }
    }

    pub fn into_image(self) -> RgbaImage {
        self.img
    }

    fn plot(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        let pixel = self.img.get_pixel_mut(x, y);
        *pixel = match self.mode {
            PaintMode::Replace => color,
            PaintMode::SourceOver => source_over(color, *pixel),
        };
    }

    /// Pixel index range covered by `[lo, hi]`, clamped to the canvas
    fn span(&self, lo: f32, hi: f32) -> std::ops::Range<u32> {
        let max = self.size() as f32;
        let start = lo.floor().clamp(0.0, max) as u32;
        let end = hi.ceil().clamp(0.0, max) as u32;
        start..end
    }

    /// Plot every pixel in `bounds` whose center satisfies `inside`
    fn fill_where<F>(&mut self, bounds: &Rect, color: Rgba<u8>, inside: F)
    where
        F: Fn(f32, f32) -> bool,
    {
        for py in self.span(bounds.y0, bounds.y1) {
            let y = py as f32 + 0.5;
            for px in self.span(bounds.x0, bounds.x1) {
                if inside(px as f32 + 0.5, y) {
                    self.plot(px, py, color);
                }
            }
        }
    }

    fn fill_gradient(&mut self, rect: &Rect, radius: f32, from: Rgba<u8>, to: Rgba<u8>) {
        let height = rect.height();
        if height <= 0.0 {
            return;
        }
        for py in self.span(rect.y0, rect.y1) {
            let y = py as f32 + 0.5;
            let t = ((y - rect.y0) / height).clamp(0.0, 1.0);
            let color = lerp_color(from, to, t);
            for px in self.span(rect.x0, rect.x1) {
                if rect.contains_rounded(px as f32 + 0.5, y, radius) {
                    self.plot(px, py, color);
                }
            }
        }
    }

    fn fill_polygon(&mut self, points: &[(f32, f32)], color: Rgba<u8>) {
        if points.len() < 3 {
            return;
        }
        let (min_y, max_y) = points
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));

        let mut crossings: Vec<f32> = Vec::with_capacity(points.len());
        for py in self.span(min_y, max_y) {
            let y = py as f32 + 0.5;
            crossings.clear();
            for (i, &(xa, ya)) in points.iter().enumerate() {
                let (xb, yb) = points[(i + 1) % points.len()];
                // Half-open test so shared vertices are counted once
                if (ya <= y && y < yb) || (yb <= y && y < ya) {
                    crossings.push(xa + (y - ya) / (yb - ya) * (xb - xa));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));

            for pair in crossings.chunks_exact(2) {
                let (left, right) = (pair[0], pair[1]);
                for px in self.span(left, right) {
                    let x = px as f32 + 0.5;
                    if x >= left && x < right {
                        self.plot(px, py, color);
                    }
                }
            }
        }
    }
}

/// Source-over compositing in 8-bit integer math.
///
/// An opaque destination stays at exactly 255 alpha.
pub fn source_over(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as u32;
    let da = dst[3] as u32;
    match sa {
        255 => return src,
        0 => return dst,
        _ => {}
    }

    // Output alpha scaled by 255
    let alpha_255 = sa * 255 + da * (255 - sa);
    if alpha_255 == 0 {
        return Rgba([0, 0, 0, 0]);
    }

    let mut out = [0u8; 4];
    for i in 0..3 {
        let num = src[i] as u32 * sa * 255 + dst[i] as u32 * da * (255 - sa);
        out[i] = ((num + alpha_255 / 2) / alpha_255).min(255) as u8;
    }
    out[3] = ((alpha_255 + 127) / 255) as u8;
    Rgba(out)
}

/// Per-channel linear interpolation, `t` in `[0, 1]`
pub fn lerp_color(from: Rgba<u8>, to: Rgba<u8>, t: f32) -> Rgba<u8> {
    let mut out = [0u8; 4];
    for (i, channel) in out.iter_mut().enumerate() {
        let a = from[i] as f32;
        let b = to[i] as f32;
        *channel = (a + (b - a) * t).round().clamp(0.0, 255.0) as u8;
    }
    Rgba(out)
}
