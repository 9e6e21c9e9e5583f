use anyhow::Result;
use banana_icons::config::Config;
use banana_icons::draw::PaintMode;
use banana_icons::pipeline::{self, GenerateOptions};
use clap::Parser;
use log::debug;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "generate-icons")]
#[command(about = "Render the app icon and export ICO, iconset and PNG sets", long_about = None)]
struct Cli {
    /// Output directory (default: <crate root>/resources/icons)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// YAML config file with render size, palette and output settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Side length of the rendered source icon
    #[arg(short, long)]
    size: Option<u32>,

    /// Blend translucent layers over the backdrop instead of writing them as-is
    #[arg(long)]
    composite: bool,

    /// Convert the staged iconset to a real icon.icns with iconutil (macOS)
    #[arg(long)]
    iconutil: bool,

    /// Print the effective configuration as YAML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.out_dir {
        config.output.dir = Some(dir);
    }
    if let Some(size) = cli.size {
        config.render.size = size;
    }
    if cli.composite {
        config.render.paint_mode = PaintMode::SourceOver;
    }
    if cli.iconutil {
        config.output.convert_icns = true;
    }
    config.validate()?;

    if cli.print_config {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    let options = GenerateOptions {
        output_dir: config.output_dir(),
        size: config.render.size,
        palette: config.render.palette,
        paint_mode: config.render.paint_mode,
        convert_icns: config.output.convert_icns,
    };

    println!("Generating Nano Banana Slides Prompter icons...");

    let report = pipeline::generate(&options)?;

    println!();
    println!("Icon generation complete!");
    println!("Icons saved to: {}", options.output_dir.display());
    debug!("{:?}", report);

    Ok(())
}
