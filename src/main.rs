use std::env;

use anyhow::Result;

use npl_analytics::aggregate::{
    aggregate_players, aggregate_teams, dataset_totals, merge_team_summaries, run_distribution,
    season_average_score,
};
use npl_analytics::crosstab::{
    head_to_head, match_trend, overall_outcomes, season_comparison, team_outcomes,
    toss_decision_outcomes, toss_win_advantage, venue_records,
};
use npl_analytics::field_zones::{allocate_zones, batting_totals, zone_insights};
use npl_analytics::filters::{filter_rows, unique_seasons, RecordFilter};
use npl_analytics::format::{format_number, format_percentage, team_short_name};
use npl_analytics::loader::{load_dataset, resolve_data_dir, Dataset};
use npl_analytics::rankings::{
    all_rounders, best_economy, best_player_per_match, best_strike_rate, comparison_pool,
    comparison_profiles, impact_profiles, most_consistent, most_fours, most_sixes,
    run_contributions, top_batsmen, top_bowlers, top_scorer, top_wicket_taker,
};
use npl_analytics::records::MatchPlayerRecord;
use npl_analytics::sample_feed::{generate_dataset, SampleConfig};

const BOARD_LIMIT: usize = 10;

fn main() -> Result<()> {
    dotenvy::from_filename(".env.local").ok();
    dotenvy::dotenv().ok();
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let data_dir = resolve_data_dir(arg_value(&args, "--data-dir").as_deref());
    let filter = RecordFilter {
        season: arg_value(&args, "--season").and_then(|v| v.parse().ok()),
        team: arg_value(&args, "--team"),
        player: arg_value(&args, "--player"),
        match_id: None,
    };

    let dataset = if has_flag(&args, "--sample") {
        let config = SampleConfig {
            seasons: arg_value(&args, "--seasons")
                .and_then(|v| v.parse().ok())
                .unwrap_or(2)
                .max(1),
            seed: arg_value(&args, "--seed")
                .and_then(|v| v.parse().ok())
                .unwrap_or(7),
            ..SampleConfig::default()
        };
        println!("Using generated sample data (seed {})", config.seed);
        generate_dataset(&config)
    } else {
        load_dataset(&data_dir)?
    };

    print_overview(&dataset, &filter);
    print_teams(&dataset, &filter);
    print_leaderboards(&dataset, &filter);
    print_best_players(&dataset, &filter);
    print_head_to_head(&dataset);
    print_outcomes(&dataset, &filter);
    print_seasons(&dataset);
    print_records(&dataset, &filter);
    print_profiles(&dataset, &filter);
    print_zones(&dataset, &filter);
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

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

fn print_overview(dataset: &Dataset, filter: &RecordFilter) {
    let scoped = filter_rows(&dataset.master, filter);
    let owned: Vec<MatchPlayerRecord> = scoped.iter().map(|&r| r.clone()).collect();
    let totals = dataset_totals(&owned);
    println!("== Overview ==");
    println!(
        "{} rows in scope, {} matches, {} players, {} teams",
        scoped.len(),
        totals.matches,
        totals.players,
        totals.teams
    );
    println!(
        "runs {}  wickets {}  fours {}  sixes {}",
        format_number(totals.runs),
        format_number(totals.wickets),
        format_number(totals.fours),
        format_number(totals.sixes)
    );
}

fn print_teams(dataset: &Dataset, filter: &RecordFilter) {
    let mut teams = aggregate_teams(&dataset.master, filter);
    merge_team_summaries(&mut teams, &dataset.team_summary);
    let mut names: Vec<&String> = teams.keys().collect();
    names.sort();

    println!("\n== Teams ==");
    for name in names {
        let team = &teams[name];
        println!(
            "{:4} {:32} M{:3} R{:5} W{:4}  {}-{}-{}  {}",
            team_short_name(&team.team),
            team.team,
            team.matches_played(),
            team.runs,
            team.wickets,
            team.wins,
            team.losses,
            team.ties,
            format_percentage(team.win_rate, 1)
        );
    }
}

fn print_leaderboards(dataset: &Dataset, filter: &RecordFilter) {
    let players = aggregate_players(&dataset.master, filter);

    println!("\n== Top Batsmen ==");
    for entry in top_batsmen(&players, BOARD_LIMIT) {
        println!(
            "{:24} {:4} runs  avg {:6.2}  sr {:6.2}",
            entry.player_name, entry.runs, entry.average, entry.strike_rate
        );
    }

    println!("\n== Top Bowlers ==");
    for entry in top_bowlers(&players, BOARD_LIMIT) {
        println!(
            "{:24} {:3} wkts  econ {:5.2}",
            entry.player_name, entry.wickets, entry.economy
        );
    }

    println!("\n== All-Rounders ==");
    for entry in all_rounders(&players, BOARD_LIMIT) {
        println!(
            "{:24} {:4} runs  {:2} wkts  score {}",
            entry.player_name, entry.runs, entry.wickets, entry.score
        );
    }

    println!("\n== Run Contribution ==");
    for entry in run_contributions(&dataset.master, filter) {
        println!(
            "{:24} {:4} runs  cumulative {:3}%",
            entry.player_name, entry.runs, entry.cumulative_pct
        );
    }
}

fn print_best_players(dataset: &Dataset, filter: &RecordFilter) {
    println!("\n== Best Player Per Match ==");
    for entry in best_player_per_match(&dataset.master, filter)
        .iter()
        .take(BOARD_LIMIT)
    {
        println!(
            "{:10} {:24} {:3} pts ({} runs, {} wkts)",
            entry.match_id, entry.player_name, entry.total_points, entry.runs, entry.wickets
        );
    }
}

fn print_head_to_head(dataset: &Dataset) {
    let matrix = head_to_head(&dataset.master);
    let teams = matrix.teams();
    if teams.is_empty() {
        return;
    }

    println!("\n== Head To Head ==");
    print!("{:32}", "");
    for team in &teams {
        print!("{:>6}", team_short_name(team));
    }
    println!();
    for team in &teams {
        print!("{team:32}");
        for opposition in &teams {
            if team == opposition {
                print!("{:>6}", "-");
            } else {
                let record = matrix.record(team, opposition);
                print!("{:>6}", format!("{}-{}", record.wins, record.losses));
            }
        }
        println!();
    }
}

fn print_outcomes(dataset: &Dataset, filter: &RecordFilter) {
    println!("\n== Match Outcomes ==");
    let overall = overall_outcomes(&dataset.outcomes, filter);
    println!(
        "{} perspective rows: {} wins, {} losses, {} ties, win rate {}",
        overall.rows,
        overall.wins,
        overall.losses,
        overall.ties,
        format_percentage(overall.win_rate(), 1)
    );
    for tally in team_outcomes(&dataset.outcomes, filter) {
        println!(
            "{:32} {}-{}-{}",
            tally.team, tally.wins, tally.losses, tally.ties
        );
    }

    println!("\n== Toss ==");
    println!(
        "average toss-winner win rate {}",
        format_percentage(toss_win_advantage(&dataset.toss_summary), 1)
    );
    for summary in &dataset.toss_summary {
        println!(
            "{:10} {:3} matches, {} wins, win rate {}",
            summary.toss_status,
            summary.total_matches,
            summary.wins,
            format_percentage(summary.win_rate, 1)
        );
    }
    for split in toss_decision_outcomes(&dataset.outcomes, filter) {
        println!(
            "chose {:5}: {:3} rows, {:3} converted, rate {}",
            split.decision,
            split.total,
            split.wins,
            format_percentage(split.win_rate(), 1)
        );
    }

    println!("\n== Venues ==");
    for record in venue_records(&dataset.outcomes, filter) {
        println!(
            "{:40} {:3} rows  {}W {}L",
            record.venue, record.total, record.wins, record.losses
        );
    }

    if let Some(team) = filter.team.as_deref() {
        println!("\n== Trend: {team} ==");
        let line: Vec<String> = match_trend(&dataset.outcomes, team)
            .iter()
            .map(|p| match p.value {
                v if v == 1.0 => "W".to_string(),
                v if v == 0.5 => "T".to_string(),
                _ => "L".to_string(),
            })
            .collect();
        println!("{}", line.join(" "));
    }
}

fn print_seasons(dataset: &Dataset) {
    let seasons = unique_seasons(&dataset.master);
    if seasons.is_empty() {
        return;
    }

    println!("\n== Seasons ==");
    for season in &seasons {
        println!(
            "{season}: average match score {:.1}",
            season_average_score(&dataset.master, *season)
        );
    }
    if seasons.len() >= 2 {
        let (s1, s2) = (seasons[seasons.len() - 2], seasons[seasons.len() - 1]);
        println!("\n== {s1} vs {s2} ==");
        for cmp in season_comparison(&dataset.outcomes, s1, s2) {
            println!(
                "{:32} {} -> {} ({:+.1})",
                cmp.team,
                format_percentage(cmp.season1_win_rate, 1),
                format_percentage(cmp.season2_win_rate, 1),
                cmp.improvement
            );
        }
    }
}

fn print_records(dataset: &Dataset, filter: &RecordFilter) {
    let players = aggregate_players(&dataset.master, filter);

    println!("\n== Records ==");
    if let Some(p) = top_scorer(&players) {
        println!("top scorer: {} ({} runs)", p.player_name, p.runs);
    }
    if let Some(p) = top_wicket_taker(&players) {
        println!("top wicket taker: {} ({} wickets)", p.player_name, p.wickets);
    }
    if let Some(p) = most_consistent(&players) {
        println!(
            "most consistent: {} (avg {:.2} over {} matches)",
            p.player_name,
            p.batting_average(),
            p.matches_played()
        );
    }
    if let Some(p) = best_strike_rate(&players) {
        println!("best strike rate: {} ({:.2})", p.player_name, p.strike_rate());
    }
    if let Some(p) = best_economy(&players) {
        println!("best economy: {} ({:.2})", p.player_name, p.economy());
    }
    if let Some(p) = most_sixes(&players) {
        println!("most sixes: {} ({})", p.player_name, p.sixes);
    }
    if let Some(p) = most_fours(&players) {
        println!("most fours: {} ({})", p.player_name, p.fours);
    }

    println!("\n== Run Distribution ==");
    for bucket in run_distribution(&players) {
        println!("{:8} {:3} players", bucket.label, bucket.players);
    }
}

fn print_profiles(dataset: &Dataset, filter: &RecordFilter) {
    let players = aggregate_players(&dataset.master, filter);

    println!("\n== Impact Profiles ==");
    for profile in impact_profiles(&players) {
        println!(
            "{:24} bat {:5.1} bowl {:5.1} cons {:5.1} exp {:5.1} impact {:5.1}",
            profile.player_name,
            profile.batting,
            profile.bowling,
            profile.consistency,
            profile.experience,
            profile.impact
        );
    }

    let pool = comparison_pool(&players);
    if pool.len() >= 2 {
        println!("\n== Comparison: {} vs {} ==", pool[0].player_name, pool[1].player_name);
        for profile in comparison_profiles(&pool[..2]) {
            println!(
                "{:24} runs {:5.1} wkts {:5.1} sr {:5.1} field {:5.1} sixes {:5.1} fours {:5.1}",
                profile.player_name,
                profile.runs,
                profile.wickets,
                profile.strike_rate,
                profile.fielding,
                profile.sixes,
                profile.fours
            );
        }
    }
}

fn print_zones(dataset: &Dataset, filter: &RecordFilter) {
    let totals = batting_totals(&dataset.master, filter);
    let allocations = allocate_zones(totals);

    println!("\n== Field Zones ==");
    println!(
        "{} runs, {} fours, {} sixes, {} dismissals over {} players",
        totals.runs, totals.fours, totals.sixes, totals.dismissals, totals.players
    );
    for allocation in &allocations {
        println!(
            "{:12} runs {:6}  4s {:4}  6s {:4}  outs {:4}",
            allocation.zone.display_name(),
            allocation.runs,
            allocation.fours,
            allocation.sixes,
            allocation.dismissals
        );
    }
    if let Some(insights) = zone_insights(&allocations) {
        println!(
            "strongest {} / best six zone {} / danger zone {}",
            insights.strongest.display_name(),
            insights.best_six_zone.display_name(),
            insights.danger_zone.display_name()
        );
    }
}
