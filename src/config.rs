use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants;
use crate::draw::PaintMode;
use crate::render::Palette;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RenderConfig {
    #[serde(default = "default_size")]
    pub size: u32,
    #[serde(default)]
    pub palette: Palette,
    /// `replace` writes translucent colors as-is; `source-over` blends them
    #[serde(default)]
    pub paint_mode: PaintMode,
}

fn default_size() -> u32 {
    constants::source::DEFAULT_SIZE
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            size: default_size(),
            palette: Palette::default(),
            paint_mode: PaintMode::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct OutputConfig {
    /// Overrides `<crate root>/resources/icons`
    #[serde(default)]
    pub dir: Option<PathBuf>,
    /// Run iconutil on the staged iconset to produce a real .icns
    #[serde(default)]
    pub convert_icns: bool,
}

impl Config {
    /// Default output directory, resolved from the crate root
    pub fn default_output_dir() -> PathBuf {
        constants::output::DEFAULT_DIR
            .iter()
            .fold(PathBuf::from(env!("CARGO_MANIFEST_DIR")), |dir, part| dir.join(part))
    }

    /// Load from `path`, or fall back to defaults when no file is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Config::default());
        };

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.render.size == 0 {
            bail!("render.size must be greater than 0");
        }
        if self.render.size > constants::source::MAX_SIZE {
            bail!("render.size must be <= {}", constants::source::MAX_SIZE);
        }

        // The backdrop sits on an opaque background; a translucent gradient
        // would let the background bleed through unevenly
        let palette = &self.render.palette;
        if palette.gradient_start[3] != 255 || palette.gradient_end[3] != 255 {
            bail!("gradient colors must be fully opaque");
        }

        if let Some(dir) = &self.output.dir {
            if dir.as_os_str().is_empty() {
                bail!("output.dir cannot be empty");
            }
        }

        Ok(())
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output.dir.clone().unwrap_or_else(Self::default_output_dir)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = serde_yaml::from_str("render:\n  size: 256\n").unwrap();
        assert_eq!(config.render.size, 256);
        assert_eq!(config.render.palette, Palette::default());
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_palette_override() {
        let yaml = "render:\n  palette:\n    background: [0, 0, 0, 255]\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.render.palette.background, [0, 0, 0, 255]);
        assert_eq!(config.render.palette.emblem, Palette::default().emblem);
    }

    #[test]
    fn test_paint_mode_parses_and_defaults_to_replace() {
        assert_eq!(Config::default().render.paint_mode, PaintMode::Replace);
        let config: Config = serde_yaml::from_str("render:\n  paint_mode: source-over\n").unwrap();
        assert_eq!(config.render.paint_mode, PaintMode::SourceOver);
    }

    #[test]
    fn test_zero_size_rejected() {
        let mut config = Config::default();
        config.render.size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_rejected() {
        let mut config = Config::default();
        config.render.size = constants::source::MAX_SIZE + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_translucent_gradient_rejected() {
        let mut config = Config::default();
        config.render.palette.gradient_end = [225, 150, 70, 10];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_round_trip_of_defaults() {
        let config = Config::default();
        let parsed: Config = serde_yaml::from_str(&config.to_yaml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_default_output_dir() {
        let config = Config::default();
        assert!(config.output_dir().ends_with("resources/icons"));
    }

    #[test]
    fn test_load_without_path_uses_defaults() {
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }
}
