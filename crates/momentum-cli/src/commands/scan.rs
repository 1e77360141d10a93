use clap::Args;
use momentum_core::Config;

use super::dates::print_dates;
use super::times::print_times;
use super::{print_json, TextArgs};

#[derive(Args)]
pub struct ScanArgs {
    #[command(flatten)]
    pub text: TextArgs,
}

pub fn run(args: ScanArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let (engine, now) = args.text.engine(config)?;
    let analysis = engine.analyze_at(&args.text.text, now);

    if args.text.json(config) {
        return print_json(&analysis, config);
    }
    if analysis.is_empty() {
        println!("no matches");
        return Ok(());
    }

    println!("reference: {}", analysis.reference.format("%Y-%m-%d %H:%M:%S"));
    println!("dates:");
    print_dates(&args.text.text, &analysis.dates);
    println!("times:");
    print_times(&args.text.text, &analysis.times);
    Ok(())
}
