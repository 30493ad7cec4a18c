//! spherecam-sweep: render a spherical camera sweep and export poses
//!
//! Usage:
//!   spherecam-sweep --config sweep.json --out generated_images
//!   spherecam-sweep --no-render --schema simple --points 5000 --seed 7

use spherecam_rs::io::CsvSchema;
use spherecam_rs::render::{NullRenderer, PreviewRenderer};
use spherecam_rs::{run_pipeline, PipelineConfig};
use std::error::Error;
use std::path::PathBuf;

/// Subject radius of the preview renderer, as a fraction of the sweep radius.
const PREVIEW_SUBJECT_FRACTION: f64 = 0.25;
const PREVIEW_SAMPLES: usize = 4000;

struct Args {
    config: Option<PathBuf>,
    out: Option<PathBuf>,
    schema: Option<CsvSchema>,
    points: Option<usize>,
    seed: Option<u64>,
    radius: Option<f64>,
    resume: bool,
    render: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = std::env::args().skip(1);
    let mut parsed = Args {
        config: None,
        out: None,
        schema: None,
        points: None,
        seed: None,
        radius: None,
        resume: false,
        render: true,
    };

    fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
        args.next().ok_or_else(|| format!("Missing {flag} argument"))
    }

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => parsed.config = Some(PathBuf::from(value(&mut args, "--config")?)),
            "--out" => parsed.out = Some(PathBuf::from(value(&mut args, "--out")?)),
            "--schema" => parsed.schema = Some(value(&mut args, "--schema")?.parse()?),
            "--points" => {
                let v = value(&mut args, "--points")?;
                parsed.points = Some(v.parse().map_err(|_| format!("Invalid point count: {v}"))?);
            }
            "--seed" => {
                let v = value(&mut args, "--seed")?;
                parsed.seed = Some(v.parse().map_err(|_| format!("Invalid seed: {v}"))?);
            }
            "--radius" => {
                let v = value(&mut args, "--radius")?;
                parsed.radius = Some(v.parse().map_err(|_| format!("Invalid radius: {v}"))?);
            }
            "--resume" => parsed.resume = true,
            "--no-render" => parsed.render = false,
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => return Err(format!("Unknown argument: {other}")),
        }
    }

    Ok(parsed)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("spherecam-sweep v{}", spherecam_rs::VERSION);

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("Error: {msg}");
            print_help();
            std::process::exit(1);
        }
    };

    let mut config = match &args.config {
        Some(path) => match PipelineConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => PipelineConfig::default(),
    };

    if let Some(out) = args.out {
        config.output_dir = out;
    }
    if let Some(schema) = args.schema {
        config.csv_schema = schema;
    }
    if let Some(points) = args.points {
        config.point_count = points;
    }
    if let Some(radius) = args.radius {
        config.sweep.radius = radius;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.resume |= args.resume;

    let result = if args.render {
        let mut renderer = PreviewRenderer::new(
            config.sweep.center,
            config.sweep.radius * PREVIEW_SUBJECT_FRACTION,
            PREVIEW_SAMPLES,
        );
        run_pipeline(&config, &mut renderer, None)
    } else {
        run_pipeline(&config, &mut NullRenderer, None)
    };

    match result {
        Ok(report) => {
            println!(
                "Done! {} cameras ({} resumed)",
                report.camera_count, report.resumed_from
            );
            println!("  JSON: {:?}", report.json_path);
            println!("  CSV:  {:?}", report.csv_path);
            println!("  PLY:  {:?}", report.ply_path);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            std::process::exit(1);
        }
    }
}

fn print_help() {
    println!(
        r#"spherecam-sweep: spherical camera sweep with pose and point-cloud export

USAGE:
    spherecam-sweep [OPTIONS]

OPTIONS:
    --config PATH        Pipeline config (JSON). Missing fields use defaults
    --out DIR            Output directory [default: generated_images]
                         WARNING: the directory is deleted and recreated
    --schema NAME        CSV schema: simple | interop [default: interop]
    --points N           Guide point cloud size [default: 10000]
    --seed N             Seed for the guide point cloud
    --radius R           Camera distance from the subject [default: 3]
    --resume             Continue from sweep_checkpoint.json in the output directory
    --no-render          Skip image rendering; write pose tables and point cloud only
    --help, -h           Print this help message

OUTPUTS:
    NNNN_tilt_TTT_pan_PPP_fF.jpg   One image per camera
    camera_data.json               Camera poses, lens and sensor data
    camera_data.csv                Pose table in the selected schema
    init_guide_points.ply          Binary guide point cloud

CONFIG EXAMPLE:
    {{
        "sweep": {{
            "center": [0.0, 0.0, 1.0],
            "radius": 3.0,
            "focal_length": {{ "start": 20, "end": 50, "step": 10 }},
            "tilt": {{ "start": 0, "end": 180, "step": 10 }},
            "pan": {{ "start": 0, "end": 360, "step": 10 }},
            "sensor_width_mm": 36.0,
            "resolution": {{ "width": 1920, "height": 1080 }},
            "policy": {{ "x_sign": "negative", "y_sign": "positive",
                        "yaw_flip": true, "orientation": "heuristic" }},
            "image_format": "jpg"
        }},
        "output_dir": "generated_images",
        "csv_schema": "interop",
        "point_count": 10000,
        "seed": 42
    }}
"#
    );
}
