use anyhow::{bail, Result};
use image::{Rgba, RgbaImage};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::draw::{Canvas, DrawCommand, PaintMode};
use crate::geometry::IconLayout;

/// Colors used by the icon, as RGBA
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Palette {
    #[serde(default = "default_background")]
    pub background: [u8; 4],
    #[serde(default = "default_gradient_start")]
    pub gradient_start: [u8; 4],
    #[serde(default = "default_gradient_end")]
    pub gradient_end: [u8; 4],
    #[serde(default = "default_emblem")]
    pub emblem: [u8; 4],
    #[serde(default = "default_panel")]
    pub panel: [u8; 4],
    #[serde(default = "default_text_bar")]
    pub text_bar: [u8; 4],
    #[serde(default = "default_accent")]
    pub accent: [u8; 4],
    #[serde(default = "default_border")]
    pub border: [u8; 4],
}

fn default_background() -> [u8; 4] {
    [26, 26, 46, 255] // #1a1a2e, matches the app theme
}

fn default_gradient_start() -> [u8; 4] {
    [255, 200, 50, 255] // gold
}

fn default_gradient_end() -> [u8; 4] {
    [225, 150, 70, 255] // orange
}

fn default_emblem() -> [u8; 4] {
    [255, 220, 80, 255] // banana yellow
}

fn default_panel() -> [u8; 4] {
    [255, 255, 255, 200]
}

fn default_text_bar() -> [u8; 4] {
    [255, 200, 50, 255]
}

fn default_accent() -> [u8; 4] {
    [255, 210, 60, 255]
}

fn default_border() -> [u8; 4] {
    [255, 200, 50, 100]
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            background: default_background(),
            gradient_start: default_gradient_start(),
            gradient_end: default_gradient_end(),
            emblem: default_emblem(),
            panel: default_panel(),
            text_bar: default_text_bar(),
            accent: default_accent(),
            border: default_border(),
        }
    }
}

/// Ordered paint operations that draw the icon at `size`
pub fn icon_commands(size: u32, palette: &Palette) -> Vec<DrawCommand> {
    let layout = IconLayout::new(size);
    let mut commands = Vec::with_capacity(8);

    commands.push(DrawCommand::Fill(Rgba(palette.background)));

    commands.push(DrawCommand::VerticalGradient {
        rect: layout.backdrop,
        radius: layout.corner_radius,
        from: Rgba(palette.gradient_start),
        to: Rgba(palette.gradient_end),
    });

    // Guard kept even though a full revolution always yields enough points
    if layout.emblem.len() >= 3 {
        commands.push(DrawCommand::Polygon {
            points: layout.emblem.clone(),
            color: Rgba(palette.emblem),
        });
    }

    commands.push(DrawCommand::RoundedRect {
        rect: layout.panel,
        radius: layout.panel_radius,
        color: Rgba(palette.panel),
    });

    for bar in &layout.text_bars {
        commands.push(DrawCommand::RoundedRect {
            rect: *bar,
            radius: layout.text_bar_radius,
            color: Rgba(palette.text_bar),
        });
    }

    commands.push(DrawCommand::Ellipse {
        rect: layout.accent,
        color: Rgba(palette.accent),
    });

    commands.push(DrawCommand::RoundedRectOutline {
        rect: layout.backdrop,
        radius: layout.corner_radius,
        width: layout.border_width,
        color: Rgba(palette.border),
    });

    commands
}

/// Render the icon into a fresh `size x size` RGBA raster.
///
/// Translucent colors are written as-is, so the panel and border keep
/// their own alpha in the output.
pub fn render_icon(size: u32, palette: &Palette) -> Result<RgbaImage> {
    render_icon_with(size, palette, PaintMode::Replace)
}

pub fn render_icon_with(size: u32, palette: &Palette, mode: PaintMode) -> Result<RgbaImage> {
    if size == 0 {
        bail!("icon size must be greater than 0");
    }

    let commands = icon_commands(size, palette);
    debug!("Rendering {}x{} icon with {} draw commands", size, size, commands.len());

    let mut canvas = Canvas::with_mode(size, mode);
    for command in &commands {
        canvas.apply(command);
    }
    Ok(canvas.into_image())
}
