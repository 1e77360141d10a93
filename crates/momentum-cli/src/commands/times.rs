use clap::Args;
use momentum_core::{Config, RecognizedTime};

use super::{print_json, TextArgs};

#[derive(Args)]
pub struct TimesArgs {
    #[command(flatten)]
    pub text: TextArgs,
}

pub fn run(args: TimesArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let (engine, now) = args.text.engine(config)?;
    let times = engine.recognize_times_at(&args.text.text, now);

    if args.text.json(config) {
        return print_json(&times, config);
    }
    print_times(&args.text.text, &times);
    Ok(())
}

pub(super) fn print_times(text: &str, times: &[RecognizedTime]) {
    if times.is_empty() {
        println!("no matches");
        return;
    }
    for time in times {
        println!(
            "{:<24} {}  {:<14} {:.2}",
            format!("\"{}\"", time.matched(text).unwrap_or_default()),
            time.time_of_day().format("%H:%M"),
            format!("{:?}", time.format),
            time.confidence
        );
    }
}
