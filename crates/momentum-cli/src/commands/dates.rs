use clap::Args;
use momentum_core::{Config, RecognizedDate};

use super::{print_json, TextArgs};

#[derive(Args)]
pub struct DatesArgs {
    #[command(flatten)]
    pub text: TextArgs,
    /// Also tag bare weekday names ("friday")
    #[arg(long)]
    pub tagger: bool,
}

pub fn run(args: DatesArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let (mut engine, now) = args.text.engine(config)?;
    if args.tagger {
        engine = engine.with_weekday_tagger();
    }
    let dates = engine.recognize_dates_at(&args.text.text, now);

    if args.text.json(config) {
        return print_json(&dates, config);
    }
    print_dates(&args.text.text, &dates);
    Ok(())
}

pub(super) fn print_dates(text: &str, dates: &[RecognizedDate]) {
    if dates.is_empty() {
        println!("no matches");
        return;
    }
    for date in dates {
        println!(
            "{:<24} {}  {:<12} {:.2}",
            format!("\"{}\"", date.matched(text).unwrap_or_default()),
            date.date.format("%Y-%m-%d %H:%M"),
            format!("{:?}", date.kind),
            date.confidence
        );
    }
}
