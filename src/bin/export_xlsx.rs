use std::env;
use std::path::PathBuf;

use anyhow::Result;

use npl_analytics::analytics_export::export_workbook;
use npl_analytics::loader::{load_dataset, resolve_data_dir};

fn main() -> Result<()> {
    dotenvy::from_filename(".env.local").ok();
    dotenvy::dotenv().ok();
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let data_dir = resolve_data_dir(arg_value(&args, "--data-dir").as_deref());
    let out = PathBuf::from(
        arg_value(&args, "--out").unwrap_or_else(|| "npl_analytics.xlsx".to_string()),
    );

    let dataset = load_dataset(&data_dir)?;
    let report = export_workbook(&out, &dataset)?;

    println!("Wrote {}", out.display());
    println!("  teams        {}", report.teams);
    println!("  players      {}", report.players);
    println!("  top batsmen  {}", report.top_batsmen);
    println!("  top bowlers  {}", report.top_bowlers);
    println!("  all-rounders {}", report.all_rounders);
    println!("  best players {}", report.best_players);
    println!("  head-to-head {}", report.head_to_head);
    println!("  toss rows    {}", report.toss_rows);
    println!("  venues       {}", report.venues);
    println!("  zones        {}", report.zones);
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
