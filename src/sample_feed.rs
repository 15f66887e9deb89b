use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Duration as ChronoDuration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::format::win_rate;
use crate::loader::{
    Dataset, MASTER_FILE, MATCH_RESULTS_FILE, TEAM_SUMMARY_FILE, TOSS_SUMMARY_FILE,
};
use crate::records::{
    MatchOutcomeRecord, MatchPlayerRecord, TeamSummaryRecord, TossSummaryRecord,
};

pub const LEAGUE_TEAMS: [&str; 8] = [
    "Biratnagar Kings (NPL)",
    "Chitwan Rhinos (NPL)",
    "Janakpur Bolts (NPL)",
    "Karnali Yaks (NPL)",
    "Kathmandu Gorkhas (NPL)",
    "Lumbini Lions (NPL)",
    "Pokhara Avengers (NPL)",
    "Sudur Paschim Royals (NPL)",
];

const SQUAD_SIZE: usize = 8;

const FIRST_NAMES: [&str; 16] = [
    "Aarav", "Aasif", "Binod", "Chirag", "Dipendra", "Gyanendra", "Karan", "Kushal", "Lalit",
    "Mohan", "Nabin", "Prakash", "Rohit", "Sandeep", "Sompal", "Sumit",
];

const LAST_NAMES: [&str; 16] = [
    "Airee", "Bhurtel", "Bohara", "Dhakal", "Jora", "Kami", "Karki", "KC", "Khadka",
    "Lamichhane", "Malla", "Paudel", "Rajbanshi", "Sheikh", "Thapa", "Yadav",
];

const VENUES: [&str; 5] = [
    "TU International Cricket Ground, Kirtipur",
    "Mulpani Cricket Ground, Kathmandu",
    "Siddharthanagar Stadium, Bhairahawa",
    "Biratnagar Cricket Ground, Biratnagar",
    "Pokhara Rangasala, Pokhara",
];

const DISMISSALS: [&str; 5] = ["Caught", "Bowled", "LBW", "Run Out", "Stumped"];

#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub seasons: u32,
    pub first_season: u32,
    pub seed: u64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            seasons: 2,
            first_season: 2024,
            seed: 7,
        }
    }
}

/// Synthetic league history: one single round robin per season over the
/// eight franchises, per-player batting and bowling lines, and the two
/// summary tables recomputed from the generated outcomes so every table
/// agrees with the others. Same seed, same dataset.
pub fn generate_dataset(config: &SampleConfig) -> Dataset {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut master = Vec::new();
    let mut outcomes = Vec::new();

    for season_offset in 0..config.seasons {
        let season = config.first_season + season_offset;
        let opening_day = NaiveDate::from_ymd_opt(season as i32, 11, 15).unwrap_or_default();
        let mut match_index = 0u32;
        for home in 0..LEAGUE_TEAMS.len() {
            for away in (home + 1)..LEAGUE_TEAMS.len() {
                match_index += 1;
                let date = opening_day + ChronoDuration::days(i64::from(match_index));
                simulate_match(
                    &mut rng,
                    season,
                    match_index,
                    home,
                    away,
                    date,
                    &mut master,
                    &mut outcomes,
                );
            }
        }
    }

    let team_summary = team_summary_from(&outcomes);
    let toss_summary = toss_summary_from(&outcomes);
    Dataset {
        master,
        team_summary,
        toss_summary,
        outcomes,
    }
}

/// Player `slot` of team `team_idx`; stable across matches and seasons so
/// careers accumulate.
pub fn squad_player(team_idx: usize, slot: usize) -> String {
    let k = team_idx * SQUAD_SIZE + slot;
    format!(
        "{} {}",
        FIRST_NAMES[k % FIRST_NAMES.len()],
        LAST_NAMES[(k + k / FIRST_NAMES.len()) % LAST_NAMES.len()]
    )
}

fn squad_role(slot: usize) -> &'static str {
    match slot {
        0..=2 => "Batsman",
        3 => "Wicket-keeper",
        4 | 5 => "All-rounder",
        _ => "Bowler",
    }
}

#[allow(clippy::too_many_arguments)]
fn simulate_match(
    rng: &mut StdRng,
    season: u32,
    match_index: u32,
    home: usize,
    away: usize,
    date: NaiveDate,
    master: &mut Vec<MatchPlayerRecord>,
    outcomes: &mut Vec<MatchOutcomeRecord>,
) {
    let match_id = format!("{season}_M{match_index:03}");
    let match_date = date.format("%Y-%m-%d").to_string();
    let venue = VENUES[rng.gen_range(0..VENUES.len())].to_string();

    let tied = rng.gen_bool(0.05);
    let home_won = rng.gen_bool(0.5);
    let toss_to_home = rng.gen_bool(0.5);
    let toss_decision = if rng.gen_bool(0.6) { "Bat" } else { "Bowl" };
    let toss_winner = LEAGUE_TEAMS[if toss_to_home { home } else { away }].to_string();

    for (side, other) in [(home, away), (away, home)] {
        let result = if tied {
            "Tie"
        } else if (side == home) == home_won {
            "Win"
        } else {
            "Loss"
        };
        let team = LEAGUE_TEAMS[side];
        let opposition = LEAGUE_TEAMS[other];
        let toss_won = u32::from(toss_winner == team);

        outcomes.push(MatchOutcomeRecord {
            match_id: match_id.clone(),
            team: team.to_string(),
            opposition: opposition.to_string(),
            match_result: result.to_string(),
            match_date: match_date.clone(),
            venue: venue.clone(),
            season,
            toss_winner: toss_winner.clone(),
            toss_decision: toss_decision.to_string(),
            won: u32::from(!tied && result == "Win"),
            lost: u32::from(!tied && result == "Loss"),
            tied: u32::from(tied),
            toss_won,
        });

        for slot in 0..SQUAD_SIZE {
            master.push(player_line(
                rng,
                season,
                &match_id,
                side,
                slot,
                opposition,
                result,
                &toss_winner,
                toss_decision,
                &venue,
                &match_date,
            ));
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn player_line(
    rng: &mut StdRng,
    season: u32,
    match_id: &str,
    team_idx: usize,
    slot: usize,
    opposition: &str,
    result: &str,
    toss_winner: &str,
    toss_decision: &str,
    venue: &str,
    match_date: &str,
) -> MatchPlayerRecord {
    let role = squad_role(slot);
    let batting_cap = match slot {
        0..=2 => 75,
        3..=5 => 45,
        _ => 18,
    };
    let runs_scored = rng.gen_range(0..=batting_cap);
    let balls_faced = if runs_scored == 0 {
        rng.gen_range(1..=5)
    } else {
        ((f64::from(runs_scored) / rng.gen_range(0.9..1.6)).ceil() as u32).max(1)
    };
    let fours = (runs_scored / 6).min(rng.gen_range(0..=6));
    let sixes = (runs_scored / 12).min(rng.gen_range(0..=4));
    let strike_rate = f64::from(runs_scored) / f64::from(balls_faced) * 100.0;
    let dismissed = rng.gen_bool(0.6);
    let dismissal_type = if dismissed {
        DISMISSALS[rng.gen_range(0..DISMISSALS.len())]
    } else {
        ""
    };

    let bowls = matches!(role, "Bowler" | "All-rounder");
    let overs_bowled = if bowls {
        f64::from(rng.gen_range(2..=4u32))
    } else {
        0.0
    };
    let runs_conceded = if bowls {
        (overs_bowled * rng.gen_range(5.0..11.0)).round() as u32
    } else {
        0
    };
    let wickets = if bowls {
        [0, 0, 1, 1, 2, 3][rng.gen_range(0..6)]
    } else {
        0
    };
    let maidens = u32::from(bowls && rng.gen_bool(0.15));
    let economy_rate = if overs_bowled > 0.0 {
        f64::from(runs_conceded) / overs_bowled
    } else {
        0.0
    };

    let catches = u32::from(rng.gen_bool(0.25)) + u32::from(rng.gen_bool(0.05));
    let run_outs = u32::from(rng.gen_bool(0.08));
    let stumpings = u32::from(role == "Wicket-keeper" && rng.gen_bool(0.2));

    let team = LEAGUE_TEAMS[team_idx];
    MatchPlayerRecord {
        player_name: squad_player(team_idx, slot),
        team: team.to_string(),
        role: role.to_string(),
        season,
        match_id: match_id.to_string(),
        runs_scored,
        balls_faced,
        fours,
        sixes,
        strike_rate,
        out_status: if dismissed { "Yes" } else { "Not Out" }.to_string(),
        dismissal_type: dismissal_type.to_string(),
        overs_bowled,
        runs_conceded,
        wickets,
        maidens,
        economy_rate,
        catches,
        run_outs,
        stumpings,
        batting_team: team.to_string(),
        opposition: opposition.to_string(),
        match_result: result.to_string(),
        toss_winner: toss_winner.to_string(),
        toss_decision: toss_decision.to_string(),
        venue: venue.to_string(),
        match_date: match_date.to_string(),
    }
}

fn performance_label(rate: f64) -> &'static str {
    if rate >= 60.0 {
        "Excellent"
    } else if rate >= 45.0 {
        "Good"
    } else if rate >= 30.0 {
        "Average"
    } else {
        "Poor"
    }
}

fn team_summary_from(outcomes: &[MatchOutcomeRecord]) -> Vec<TeamSummaryRecord> {
    let mut by_team: BTreeMap<&str, TeamSummaryRecord> = BTreeMap::new();
    for row in outcomes {
        let entry = by_team.entry(row.team.as_str()).or_default();
        if entry.team.is_empty() {
            entry.team = row.team.clone();
        }
        entry.wins += row.won;
        entry.losses += row.lost;
        entry.ties += row.tied;
        entry.total += 1;
    }
    by_team
        .into_values()
        .map(|mut entry| {
            entry.win_rate = win_rate(entry.wins, entry.total);
            entry.performance = performance_label(entry.win_rate).to_string();
            entry
        })
        .collect()
}

fn toss_summary_from(outcomes: &[MatchOutcomeRecord]) -> Vec<TossSummaryRecord> {
    let mut rows = Vec::with_capacity(2);
    for (status, flag) in [("Won Toss", 1u32), ("Lost Toss", 0u32)] {
        let mut summary = TossSummaryRecord {
            toss_status: status.to_string(),
            ..TossSummaryRecord::default()
        };
        for row in outcomes.iter().filter(|r| r.toss_won == flag) {
            summary.total_matches += 1;
            summary.wins += row.won;
            summary.losses += row.lost;
            summary.ties += row.tied;
        }
        summary.win_rate = win_rate(summary.wins, summary.total_matches);
        rows.push(summary);
    }
    rows
}

/// Writes the four tables as headered CSV under `dir`.
pub fn write_dataset_csv(dataset: &Dataset, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create data dir {}", dir.display()))?;
    write_csv(&dir.join(MASTER_FILE), &dataset.master)?;
    write_csv(&dir.join(TEAM_SUMMARY_FILE), &dataset.team_summary)?;
    write_csv(&dir.join(TOSS_SUMMARY_FILE), &dataset.toss_summary)?;
    write_csv(&dir.join(MATCH_RESULTS_FILE), &dataset.outcomes)?;
    Ok(())
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create csv {}", path.display()))?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("write csv row to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush csv {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::unique_matches;

    #[test]
    fn same_seed_same_dataset() {
        let config = SampleConfig::default();
        let a = generate_dataset(&config);
        let b = generate_dataset(&config);
        let a_json = serde_json::to_string(&a.master).unwrap();
        let b_json = serde_json::to_string(&b.master).unwrap();
        assert_eq!(a_json, b_json);
        assert_eq!(
            serde_json::to_string(&a.outcomes).unwrap(),
            serde_json::to_string(&b.outcomes).unwrap()
        );
    }

    #[test]
    fn round_robin_counts() {
        let config = SampleConfig {
            seasons: 1,
            ..SampleConfig::default()
        };
        let dataset = generate_dataset(&config);
        // 8 teams, every pair once.
        assert_eq!(unique_matches(&dataset.master).len(), 28);
        assert_eq!(dataset.outcomes.len(), 56);
        assert_eq!(dataset.master.len(), 56 * SQUAD_SIZE);
        assert_eq!(dataset.team_summary.len(), 8);
        assert_eq!(dataset.toss_summary.len(), 2);
    }

    #[test]
    fn outcome_flags_are_exclusive() {
        let dataset = generate_dataset(&SampleConfig::default());
        for row in &dataset.outcomes {
            assert_eq!(row.won + row.lost + row.tied, 1, "match {}", row.match_id);
        }
    }

    #[test]
    fn summaries_agree_with_outcomes() {
        let dataset = generate_dataset(&SampleConfig::default());
        let total_outcomes: u32 = dataset
            .team_summary
            .iter()
            .map(|t| t.wins + t.losses + t.ties)
            .sum();
        assert_eq!(total_outcomes as usize, dataset.outcomes.len());
        let toss_total: u32 = dataset.toss_summary.iter().map(|t| t.total_matches).sum();
        assert_eq!(toss_total as usize, dataset.outcomes.len());
    }

    #[test]
    fn squads_do_not_share_players() {
        let mut names = std::collections::HashSet::new();
        for team_idx in 0..LEAGUE_TEAMS.len() {
            for slot in 0..SQUAD_SIZE {
                assert!(names.insert(squad_player(team_idx, slot)));
            }
        }
    }
}
