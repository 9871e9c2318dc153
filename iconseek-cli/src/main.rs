use clap::Parser;
use iconseek::image::io::load_gray_image;
use iconseek::{
    FrameSource, IconSeekResult, LocateConfig, Locator, OwnedImage, ScaleConfig, TemplateLibrary,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "IconSeek CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for attempt-level diagnostics.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ScaleConfigJson {
    min_scale: f32,
    max_scale: f32,
    samples: usize,
}

impl Default for ScaleConfigJson {
    fn default() -> Self {
        let cfg = ScaleConfig::default();
        Self {
            min_scale: cfg.min_scale,
            max_scale: cfg.max_scale,
            samples: cfg.samples,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct LocateConfigJson {
    threshold: f32,
    max_attempts: usize,
    retry_delay_ms: u64,
}

impl Default for LocateConfigJson {
    fn default() -> Self {
        let cfg = LocateConfig::default();
        Self {
            threshold: cfg.threshold,
            max_attempts: cfg.max_attempts,
            retry_delay_ms: cfg.retry_delay.as_millis() as u64,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    template_paths: Vec<String>,
    frame_path: String,
    output_path: Option<String>,
    scale: ScaleConfigJson,
    locate: LocateConfigJson,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template_paths: Vec::new(),
            frame_path: String::new(),
            output_path: None,
            scale: ScaleConfigJson::default(),
            locate: LocateConfigJson::default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct PointRecord {
    x: usize,
    y: usize,
}

#[derive(Debug, Serialize)]
struct Output {
    found: bool,
    center: Option<PointRecord>,
}

/// Frame source that re-reads a saved screenshot on every attempt.
///
/// Stands in for a live screen grabber so the whole pipeline can run
/// headlessly against captured data.
struct FileFrameSource {
    path: PathBuf,
}

impl FrameSource for FileFrameSource {
    fn capture(&mut self) -> IconSeekResult<OwnedImage> {
        load_gray_image(&self.path)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("iconseek=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.template_paths.is_empty() {
        return Err("template_paths must list at least one image".into());
    }
    if config.frame_path.is_empty() {
        return Err("frame_path must be set in the config".into());
    }

    let library = TemplateLibrary::load(&config.template_paths)?;
    for skipped in library.skipped() {
        eprintln!(
            "warning: skipped template {}: {}",
            skipped.path.display(),
            skipped.reason
        );
    }

    let locator = Locator::new(
        library,
        ScaleConfig {
            min_scale: config.scale.min_scale,
            max_scale: config.scale.max_scale,
            samples: config.scale.samples,
        },
        LocateConfig {
            threshold: config.locate.threshold,
            max_attempts: config.locate.max_attempts,
            retry_delay: Duration::from_millis(config.locate.retry_delay_ms),
        },
    )?;

    let mut source = FileFrameSource {
        path: PathBuf::from(&config.frame_path),
    };
    let center = locator.locate(&mut source);

    let output = Output {
        found: center.is_some(),
        center: center.map(|p| PointRecord { x: p.x, y: p.y }),
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
