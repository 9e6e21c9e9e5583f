use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::constants;
use crate::draw::PaintMode;
use crate::export;
use crate::render::{self, Palette};

/// Inputs for one generator run
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub output_dir: PathBuf,
    pub size: u32,
    pub palette: Palette,
    pub paint_mode: PaintMode,
    pub convert_icns: bool,
}

impl GenerateOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        GenerateOptions {
            output_dir: output_dir.into(),
            size: constants::source::DEFAULT_SIZE,
            palette: Palette::default(),
            paint_mode: PaintMode::default(),
            convert_icns: false,
        }
    }
}

/// Every artifact written by a run, in write order
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub source: PathBuf,
    pub ico: PathBuf,
    pub iconset_dir: PathBuf,
    pub icns: PathBuf,
    pub png_set: Vec<PathBuf>,
}

/// Render the icon once and write every export.
///
/// Any failure aborts the run; packaging needs all three artifacts.
pub fn generate(options: &GenerateOptions) -> Result<GenerationReport> {
    let output_dir = &options.output_dir;
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    let source = render::render_icon_with(options.size, &options.palette, options.paint_mode)
        .context("Failed to render source icon")?;

    let source_path = output_dir.join(constants::source::FILE_NAME);
    source
        .save_with_format(&source_path, image::ImageFormat::Png)
        .with_context(|| format!("Failed to write source icon {}", source_path.display()))?;
    println!("Created source icon: {}", source_path.display());

    let ico_path = output_dir.join(constants::ico::FILE_NAME);
    export::write_ico(&source, &ico_path).context("Failed to generate Windows icon (icon.ico)")?;
    println!("Created: {}", ico_path.display());

    let iconset_dir = export::write_iconset(&source, output_dir)
        .context("Failed to generate macOS iconset (icon.iconset)")?;
    let icns_path = output_dir.join(constants::iconset::ICNS_FILE_NAME);
    println!("Created iconset at: {}", iconset_dir.display());

    if options.convert_icns {
        export::convert_iconset(&iconset_dir, &icns_path)
            .context("Failed to convert iconset to icon.icns")?;
        println!("Created: {}", icns_path.display());
    } else {
        println!("Note: Run 'iconutil -c icns icon.iconset' on macOS to create .icns");
    }

    let png_set = export::write_png_set(&source, output_dir)
        .context("Failed to generate PNG icon set")?;
    println!("Created PNG icons in: {}", output_dir.display());

    remove_placeholder_marker(output_dir)?;

    info!(
        "Wrote source, ICO ({} frames), iconset ({} files) and {} PNGs",
        constants::ico::SIZES.len(),
        constants::iconset::ENTRIES.len(),
        png_set.len()
    );

    Ok(GenerationReport {
        source: source_path,
        ico: ico_path,
        iconset_dir,
        icns: icns_path,
        png_set,
    })
}

/// Remove `.gitkeep` if present; a missing marker is not an error
fn remove_placeholder_marker(output_dir: &Path) -> Result<()> {
    let marker = output_dir.join(constants::output::PLACEHOLDER_MARKER);
    match fs::remove_file(&marker) {
        Ok(()) => {
            debug!("Removed {}", marker.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to remove {}", marker.display())),
    }
}
