use std::env;
use std::path::PathBuf;

use anyhow::Result;

use npl_analytics::sample_feed::{generate_dataset, write_dataset_csv, SampleConfig};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let out_dir = PathBuf::from(arg_value(&args, "--out-dir").unwrap_or_else(|| "data".to_string()));
    let config = SampleConfig {
        seasons: arg_value(&args, "--seasons")
            .and_then(|v| v.parse().ok())
            .unwrap_or(2)
            .max(1),
        first_season: arg_value(&args, "--first-season")
            .and_then(|v| v.parse().ok())
            .unwrap_or(2024),
        seed: arg_value(&args, "--seed")
            .and_then(|v| v.parse().ok())
            .unwrap_or(7),
    };

    let dataset = generate_dataset(&config);
    write_dataset_csv(&dataset, &out_dir)?;

    println!(
        "Wrote {} master rows, {} outcome rows, {} team summaries, {} toss rows to {}",
        dataset.master.len(),
        dataset.outcomes.len(),
        dataset.team_summary.len(),
        dataset.toss_summary.len(),
        out_dir.display()
    );
    println!(
        "Seasons {}..={}, seed {}",
        config.first_season,
        config.first_season + config.seasons - 1,
        config.seed
    );
    Ok(())
}

fn arg_value(args: &[String], key: &str) -> Option<String> {
    for (i, arg) in args.iter().enumerate() {
        if let Some(rest) = arg.strip_prefix(&format!("{key}=")) {
            return Some(rest.to_string());
        }
        if arg == key && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    None
}
