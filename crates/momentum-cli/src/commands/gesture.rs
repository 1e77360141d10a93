use std::path::PathBuf;

use clap::Args;
use momentum_core::{load_strokes, Config, Point, RecognitionEngine, Stroke};

#[derive(Args)]
pub struct GestureArgs {
    /// Space-separated points, e.g. "0,0 10,20 30,-10"
    #[arg(long, allow_hyphen_values = true, conflicts_with = "file")]
    pub points: Option<String>,
    /// JSON file holding an array of points or an array of strokes
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Print JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

fn parse_points(raw: &str) -> Result<Vec<Point>, momentum_core::ValidationError> {
    raw.split_whitespace().map(str::parse).collect()
}

pub fn run(args: GestureArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let strokes = match (&args.points, &args.file) {
        (Some(raw), _) => vec![Stroke::new(parse_points(raw)?)],
        (None, Some(path)) => {
            load_strokes(path).map_err(|e| format!("{}: {e}", path.display()))?
        }
        (None, None) => return Err("provide --points or --file".into()),
    };
    tracing::debug!(strokes = strokes.len(), "classifying gesture");

    let gesture = RecognitionEngine::new().classify_strokes(&strokes);

    if args.json || config.output.json {
        return super::print_json(&gesture, config);
    }
    match gesture {
        Some(g) => println!(
            "{:?} {:.2} (bounds {:.1},{:.1} {:.1}x{:.1})",
            g.kind, g.confidence, g.bounds.x, g.bounds.y, g.bounds.width, g.bounds.height
        ),
        None => println!("no matches"),
    }
    Ok(())
}
