use anyhow::{bail, Context, Result};
use ico::{IconDir, IconDirEntry, IconImage, ResourceType};
use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::constants;

/// Resample `source` to a `size x size` raster with Lanczos3.
///
/// Resampling to the source size returns an exact copy.
pub fn resample(source: &RgbaImage, size: u32) -> Result<RgbaImage> {
    if size == 0 {
        bail!("cannot resample to a {}x{} raster", size, size);
    }
    if source.width() != source.height() {
        bail!(
            "source raster must be square, got {}x{}",
            source.width(),
            source.height()
        );
    }

    if source.width() == size {
        return Ok(source.clone());
    }

    debug!("Resampling {0}x{0} -> {1}x{1}", source.width(), size);
    Ok(imageops::resize(source, size, size, FilterType::Lanczos3))
}

fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    img.save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Resample and save as PNG in one step
fn write_resampled(source: &RgbaImage, size: u32, path: &Path) -> Result<()> {
    let resized = resample(source, size)?;
    save_png(&resized, path)
}

/// Windows .ico bundle with every size in `constants::ico::SIZES`.
///
/// All frames are encoded in memory first so a failure never leaves a
/// partial file behind.
pub fn write_ico(source: &RgbaImage, path: &Path) -> Result<()> {
    let mut icon_dir = IconDir::new(ResourceType::Icon);

    for size in constants::ico::SIZES {
        let frame = resample(source, size)?;
        let image = IconImage::from_rgba_data(size, size, frame.into_raw());
        let entry = IconDirEntry::encode(&image)
            .with_context(|| format!("Failed to encode {0}x{0} icon frame", size))?;
        icon_dir.add_entry(entry);
        debug!("ICO frame: {0}x{0}", size);
    }

    let mut buffer = Vec::new();
    icon_dir
        .write(&mut buffer)
        .context("Failed to encode ICO container")?;
    fs::write(path, buffer)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

/// Stage `icon.iconset/` for iconutil and drop a PNG placeholder at
/// `icon.icns`.
///
/// The placeholder is PNG data under an .icns name; it stands in until
/// `convert_iconset` (or a manual iconutil run) replaces it. The iconset
/// directory is recreated each run so stale files never accumulate.
pub fn write_iconset(source: &RgbaImage, output_dir: &Path) -> Result<PathBuf> {
    let iconset_dir = output_dir.join(constants::iconset::DIR_NAME);
    if iconset_dir.exists() {
        fs::remove_dir_all(&iconset_dir)
            .with_context(|| format!("Failed to clear {}", iconset_dir.display()))?;
    }
    fs::create_dir_all(&iconset_dir)
        .with_context(|| format!("Failed to create {}", iconset_dir.display()))?;

    for (file_name, size) in constants::iconset::ENTRIES {
        write_resampled(source, size, &iconset_dir.join(file_name))?;
    }

    let placeholder = output_dir.join(constants::iconset::ICNS_FILE_NAME);
    write_resampled(source, constants::iconset::ICNS_PLACEHOLDER_SIZE, &placeholder)?;

    Ok(iconset_dir)
}

/// Flat `{size}x{size}.png` files plus the canonical `icon.png`
pub fn write_png_set(source: &RgbaImage, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(constants::png::SIZES.len() + 1);

    for size in constants::png::SIZES {
        let path = output_dir.join(format!("{0}x{0}.png", size));
        write_resampled(source, size, &path)?;
        written.push(path);
    }

    let canonical = output_dir.join(constants::png::CANONICAL_FILE_NAME);
    write_resampled(source, constants::png::CANONICAL_SIZE, &canonical)?;
    written.push(canonical);

    Ok(written)
}

/// Convert a staged iconset into a native .icns with iconutil (macOS only)
pub fn convert_iconset(iconset_dir: &Path, icns_path: &Path) -> Result<()> {
    let output = Command::new("iconutil")
        .arg("-c")
        .arg("icns")
        .arg(iconset_dir)
        .arg("-o")
        .arg(icns_path)
        .output()
        .context("Failed to run iconutil (required on macOS)")?;

    if !output.status.success() {
        bail!("iconutil failed: {}", String::from_utf8_lossy(&output.stderr));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn checker(size: u32) -> RgbaImage {
        RgbaImage::from_fn(size, size, |x, y| {
            if (x / 4 + y / 4) % 2 == 0 {
                Rgba([255, 200, 50, 255])
            } else {
                Rgba([26, 26, 46, 128])
            }
        })
    }

    #[test]
    fn test_resample_dimensions() {
        let source = checker(64);
        let out = resample(&source, 24).unwrap();
        assert_eq!(out.dimensions(), (24, 24));
    }

    #[test]
    fn test_resample_is_deterministic() {
        let source = checker(64);
        let a = resample(&source, 17).unwrap();
        let b = resample(&source, 17).unwrap();
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_resample_same_size_is_copy() {
        let source = checker(32);
        assert_eq!(resample(&source, 32).unwrap(), source);
    }

    #[test]
    fn test_resample_rejects_zero() {
        assert!(resample(&checker(16), 0).is_err());
    }

    #[test]
    fn test_resample_rejects_non_square() {
        let source = RgbaImage::new(16, 8);
        assert!(resample(&source, 8).is_err());
    }

    #[test]
    fn test_resample_keeps_alpha() {
        let source = RgbaImage::from_pixel(32, 32, Rgba([10, 20, 30, 0]));
        let out = resample(&source, 8).unwrap();
        assert!(out.pixels().all(|p| p[3] == 0));
    }
}
