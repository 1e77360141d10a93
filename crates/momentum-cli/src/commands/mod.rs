pub mod completions;
pub mod config;
pub mod dates;
pub mod gesture;
pub mod scan;
pub mod times;

use std::sync::Arc;

use chrono::NaiveDateTime;
use clap::Args;
use momentum_core::{parse_reference_time, Config, FixedClock, RecognitionEngine};
use serde::Serialize;

/// Options shared by the text commands.
#[derive(Args)]
pub struct TextArgs {
    /// Text to analyze
    pub text: String,
    /// Reference moment, e.g. 2025-03-19T10:30:00 (defaults to now)
    #[arg(long)]
    pub now: Option<String>,
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl TextArgs {
    /// Engine and reference moment for this invocation.
    pub fn engine(
        &self,
        config: &Config,
    ) -> Result<(RecognitionEngine, NaiveDateTime), Box<dyn std::error::Error>> {
        let engine = match &self.now {
            Some(raw) => {
                let fixed = parse_reference_time(raw)?;
                RecognitionEngine::from_config_with_clock(config, Arc::new(FixedClock(fixed)))
            }
            None => RecognitionEngine::from_config(config)?,
        };
        let now = engine.now();
        tracing::debug!(%now, "reference moment");
        Ok((engine, now))
    }

    pub fn json(&self, config: &Config) -> bool {
        self.json || config.output.json
    }
}

/// Print `value` as JSON, pretty unless the config says otherwise.
pub fn print_json<T: Serialize + ?Sized>(
    value: &T,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let out = if config.output.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}
