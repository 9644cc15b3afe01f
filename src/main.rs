use clap::{Parser, Subcommand};
use reframe::config::{self, ToolConfig};
use reframe::geometry::{self, Dimensions, Quality, RatioSpec, ResizeRequest};
use reframe::output;
use reframe::process::{self, ProcessOptions};
use reframe::render::{OutputFormat, RasterBackend, RenderBackend};
use std::path::PathBuf;

/// Shared sizing and ratio flags for commands that resolve geometry.
#[derive(clap::Args, Clone)]
struct GeometryArgs {
    /// Target width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Target height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Scale both axes by a percentage (50 = half size, 200 = double)
    #[arg(long, value_parser = parse_percent, conflicts_with_all = ["width", "height"])]
    percent: Option<f64>,

    /// Aspect ratio: original, 1:1, 4:1, 3:1, 16:9, 4:3, 9:16, or any W:H pair
    #[arg(long)]
    ratio: Option<RatioSpec>,

    /// Keep the source height/width instead of deriving it when only one of
    /// --width/--height is given
    #[arg(long)]
    no_keep_aspect: bool,

    /// Encode quality for lossy outputs (JPEG, AVIF), from 0.0 to 1.0
    #[arg(long, value_parser = parse_quality)]
    quality: Option<f32>,
}

fn parse_percent(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if value > 0.0 && value <= 1000.0 {
        Ok(value)
    } else {
        Err(format!("percent must be above 0 and at most 1000, got {value}"))
    }
}

fn parse_quality(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("quality must be between 0.0 and 1.0, got {value}"))
    }
}

#[derive(Parser)]
#[command(name = "reframe")]
#[command(about = "Resize images and change aspect ratios from the command line")]
#[command(long_about = "\
Resize images and change aspect ratios from the command line

Sizing picks the target canvas, in order of precedence:

  --percent 50                scale both axes
  --width 800 --height 600    exact canvas (may change proportions)
  --width 800                 derive the height from the source ratio

A ratio then reframes the result by center-cropping the source:

  --ratio square              1:1 (also: banner, wide, widescreen,
                              standard, portrait)
  --ratio 21:9                any width:height pair

Outputs land next to their sources as name-WxH.ext, or in --out-dir.
Existing outputs with the same name are overwritten.

Examples:

  reframe resize photo.jpg --percent 50
  reframe resize shoot/ --width 1600 --ratio 16:9 --out-dir web/
  reframe resize scan.tiff --format jpg --quality 0.8
  reframe plan --size 4000x3000 --ratio square

Run 'reframe gen-config' to generate a documented reframe.toml.")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./reframe.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resize images to a new size and/or aspect ratio
    Resize(ResizeArgs),
    /// Show the geometry a request resolves to, without touching pixels
    Plan(PlanArgs),
    /// Print a stock reframe.toml with all options documented
    GenConfig,
}

#[derive(clap::Args)]
struct ResizeArgs {
    /// Image files or directories to resize
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    #[command(flatten)]
    geometry: GeometryArgs,

    /// Output format: jpg, png, webp, or avif (default: each source's own)
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Directory to write outputs into (created if missing)
    #[arg(long, conflicts_with = "output")]
    out_dir: Option<PathBuf>,

    /// Exact output path (single input only)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Descend into subdirectories of directory inputs
    #[arg(long, short = 'r')]
    recursive: bool,
}

#[derive(clap::Args)]
struct PlanArgs {
    /// Image file to read the source size from
    #[arg(required_unless_present = "size", conflicts_with = "size")]
    input: Option<PathBuf>,

    /// Source size as WxH instead of reading a file
    #[arg(long)]
    size: Option<Dimensions>,

    #[command(flatten)]
    geometry: GeometryArgs,

    /// Print the resolved geometry as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Resize(args) => {
            let cfg = ToolConfig::load_or_default(cli.config.as_deref())?;
            run_resize(args, &cfg)
        }
        Command::Plan(args) => {
            let cfg = ToolConfig::load_or_default(cli.config.as_deref())?;
            run_plan(args, &cfg)
        }
        // Loads no config: regenerating one must work even when the file
        // on disk is broken.
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            Ok(())
        }
    }
}

fn run_resize(args: ResizeArgs, cfg: &ToolConfig) -> Result<(), Box<dyn std::error::Error>> {
    init_thread_pool(&cfg.processing);
    let request = build_request(&args.geometry, cfg)?;
    let format = match args.format {
        Some(format) => Some(format),
        None => cfg.output_format()?,
    };
    let options = ProcessOptions {
        request,
        format,
        out_dir: args.out_dir,
        output: args.output,
        recursive: args.recursive,
    };

    let report = process::process(&args.inputs, &options)?;
    output::print_report(&report);
    if !report.all_ok() {
        std::process::exit(1);
    }
    Ok(())
}

fn run_plan(args: PlanArgs, cfg: &ToolConfig) -> Result<(), Box<dyn std::error::Error>> {
    let request = build_request(&args.geometry, cfg)?;
    let source = match args.size {
        Some(size) => size,
        // clap requires an input when --size is absent.
        None => {
            let path = args
                .input
                .as_deref()
                .ok_or("an image file or --size is required")?;
            RasterBackend::new().identify(path)?
        }
    };

    let resolved = geometry::resolve(source, &request)?;
    if args.json {
        println!("{}", output::plan_json(source, &resolved)?);
    } else {
        output::print_plan(source, &resolved);
    }
    Ok(())
}

/// Merge command-line flags over config defaults into a resize request.
fn build_request(
    args: &GeometryArgs,
    cfg: &ToolConfig,
) -> Result<ResizeRequest, Box<dyn std::error::Error>> {
    let ratio = match args.ratio {
        Some(spec) => spec,
        None => cfg.default_ratio()?,
    };
    let maintain = if args.no_keep_aspect {
        false
    } else {
        cfg.geometry.keep_aspect
    };
    Ok(ResizeRequest {
        aspect_ratio: ratio.ratio,
        custom_ratio: ratio.custom,
        width: args.width,
        height: args.height,
        percentage: args.percent,
        maintain_aspect_ratio: maintain,
        quality: Quality::new(args.quality.unwrap_or(cfg.render.quality)),
    })
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; users can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
