//! Resolution-independent layout of the icon
//!
//! Every measurement is a fraction of the canvas side length, so the same
//! layout scales to any requested size. Coordinates are continuous: pixel
//! `(x, y)` covers `[x, x + 1) x [y, y + 1)` and is sampled at its center.

/// Axis-aligned box in continuous canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Rect { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Shrink by `d` on every side
    pub fn inset(&self, d: f32) -> Rect {
        Rect::new(self.x0 + d, self.y0 + d, self.x1 - d, self.y1 - d)
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    /// Point-in-rounded-rectangle test; `radius` is clamped to half the
    /// shorter side.
    pub fn contains_rounded(&self, x: f32, y: f32, radius: f32) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        let r = radius.min(self.width() / 2.0).min(self.height() / 2.0).max(0.0);
        if r == 0.0 {
            return true;
        }
        // Distance to the nearest corner circle center
        let cx = x.clamp(self.x0 + r, self.x1 - r);
        let cy = y.clamp(self.y0 + r, self.y1 - r);
        let (dx, dy) = (x - cx, y - cy);
        dx * dx + dy * dy <= r * r
    }

    pub fn center(&self) -> (f32, f32) {
        ((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }
}

/// Layout of every element of the icon at one canvas size
#[derive(Debug, Clone)]
pub struct IconLayout {
    pub size: f32,
    pub backdrop: Rect,
    pub corner_radius: f32,
    pub emblem: Vec<(f32, f32)>,
    pub panel: Rect,
    pub panel_radius: f32,
    pub text_bars: Vec<Rect>,
    pub text_bar_radius: f32,
    pub accent: Rect,
    /// Kept fractional so thin icons (< 100px) still get a border ring
    pub border_width: f32,
}

/// Number of text bars drawn inside the panel
pub const TEXT_BAR_COUNT: usize = 3;

/// Angular step, in degrees, used to sample the emblem outline
pub const EMBLEM_STEP_DEGREES: usize = 5;

impl IconLayout {
    pub fn new(size: u32) -> Self {
        let s = size as f32;

        let margin = s * 0.1;
        let backdrop = Rect::new(margin, margin, s - margin, s - margin);

        let panel_margin = s * 0.25;
        let panel = Rect::new(
            panel_margin + s * 0.05,
            panel_margin + s * 0.1,
            s - panel_margin - s * 0.05,
            s - panel_margin - s * 0.05,
        );

        let bar_top = panel.y0 + s * 0.08;
        let bar_height = s * 0.04;
        let bar_spacing = s * 0.06;
        let bar_left = panel.x0 + s * 0.06;
        let text_bars = (0..TEXT_BAR_COUNT)
            .map(|i| {
                let width = if i == 0 { s * 0.35 } else { s * 0.25 - i as f32 * s * 0.03 };
                let y = bar_top + i as f32 * bar_spacing;
                Rect::new(bar_left, y, bar_left + width, y + bar_height)
            })
            .collect();

        // Anchored to the panel's bottom-right corner
        let accent_size = s * 0.12;
        let accent_x = panel.x1 - accent_size - s * 0.03;
        let accent_y = panel.y1 - accent_size - s * 0.02;
        let accent = Rect::new(accent_x, accent_y, accent_x + accent_size, accent_y + accent_size * 0.6);

        IconLayout {
            size: s,
            backdrop,
            corner_radius: s * 0.2,
            emblem: emblem_outline(size),
            panel,
            panel_radius: s * 0.03,
            text_bars,
            text_bar_radius: s * 0.01,
            accent,
            border_width: s * 0.01,
        }
    }
}

/// Sample the crescent-like emblem outline over a full revolution.
///
/// The horizontal radius is modulated by `sin(2θ)` and the vertical
/// extent by `cos(θ)`, which bends the ellipse into an asymmetric curve.
pub fn emblem_outline(size: u32) -> Vec<(f32, f32)> {
    let s = size as f32;
    let center = (size / 2) as f32;
    let emblem_width = s * 0.5;
    let emblem_height = s * 0.6;
    let ry = emblem_height * 0.35;

    (0..360)
        .step_by(EMBLEM_STEP_DEGREES)
        .map(|deg| {
            let theta = (deg as f32).to_radians();
            let rx = emblem_width * 0.4 * (1.0 + 0.3 * (theta * 2.0).sin());
            let x = center + rx * theta.cos() - s * 0.05;
            let y = center + ry * theta.sin() * (1.0 + 0.2 * theta.cos());
            (x, y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounded_corner_excludes_extreme_corner() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(!rect.contains_rounded(0.5, 0.5, 20.0));
        assert!(rect.contains_rounded(50.0, 0.5, 20.0));
        assert!(rect.contains_rounded(0.5, 0.5, 0.0));
    }

    #[test]
    fn test_rounded_radius_is_clamped() {
        // Radius larger than the box degenerates to a circle, not a panic
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains_rounded(5.0, 5.0, 100.0));
        assert!(!rect.contains_rounded(0.2, 0.2, 100.0));
    }

    #[test]
    fn test_emblem_samples_full_revolution() {
        let points = emblem_outline(1024);
        assert_eq!(points.len(), 360 / EMBLEM_STEP_DEGREES);
        for (x, y) in &points {
            assert!(*x > 0.0 && *x < 1024.0);
            assert!(*y > 0.0 && *y < 1024.0);
        }
    }

    #[test]
    fn test_layout_scales_with_size() {
        let small = IconLayout::new(100);
        let large = IconLayout::new(1000);
        assert!((large.backdrop.x0 - small.backdrop.x0 * 10.0).abs() < 1e-3);
        assert!((large.panel.width() - small.panel.width() * 10.0).abs() < 1e-2);
        assert_eq!(small.text_bars.len(), TEXT_BAR_COUNT);
    }

    #[test]
    fn test_border_width_stays_fractional_at_small_sizes() {
        let layout = IconLayout::new(64);
        assert!((layout.border_width - 0.64).abs() < 1e-6);
    }

    #[test]
    fn test_text_bars_shrink_and_step_down() {
        let layout = IconLayout::new(1024);
        for pair in layout.text_bars.windows(2) {
            assert!(pair[1].width() < pair[0].width());
            assert!(pair[1].y0 > pair[0].y0);
        }
    }

    #[test]
    fn test_accent_sits_in_panel_bottom_right() {
        let layout = IconLayout::new(1024);
        let (cx, cy) = layout.accent.center();
        let (px, py) = layout.panel.center();
        assert!(cx > px && cy > py);
        assert!(layout.panel.contains(layout.accent.x1, layout.accent.y1));
    }
}
