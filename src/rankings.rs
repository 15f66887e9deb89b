use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::aggregate::PlayerAggregate;
use crate::filters::RecordFilter;
use crate::records::MatchPlayerRecord;

/// Pareto view keeps the ten heaviest contributors.
const TOP_CONTRIBUTORS: usize = 10;

const ECONOMY_BONUS_CAP: f64 = 6.0;
const ALL_ROUNDER_MIN_RUNS: u32 = 50;
const ALL_ROUNDER_MIN_WICKETS: u32 = 2;
const CONSISTENCY_MIN_MATCHES: u32 = 5;
const STRIKE_RATE_MIN_BALLS: u32 = 50;
const ECONOMY_MIN_OVERS: f64 = 10.0;
const COMPARISON_MIN_MATCHES: u32 = 3;

pub fn batting_points(runs: u32, fours: u32, sixes: u32) -> u32 {
    runs + fours + sixes * 2
}

pub fn bowling_points(wickets: u32) -> u32 {
    wickets * 25
}

pub fn fielding_points(catches: u32) -> u32 {
    catches * 10
}

/// Fantasy points for a single match row. Unlike the career totals this
/// pays the economy bonus and counts run-outs and stumpings as fielding.
pub fn match_row_points(row: &MatchPlayerRecord) -> u32 {
    let batting = batting_points(row.runs_scored, row.fours, row.sixes);
    let mut bowling = bowling_points(row.wickets);
    if row.overs_bowled > 0.0 && row.economy_rate < ECONOMY_BONUS_CAP {
        bowling += 10;
    }
    let fielding = (row.catches + row.run_outs + row.stumpings) * 10;
    batting + bowling + fielding
}

/// One leaderboard row derived from a career aggregate.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub player_name: String,
    pub team: String,
    pub matches: u32,
    pub runs: u32,
    pub fours: u32,
    pub sixes: u32,
    pub average: f64,
    pub strike_rate: f64,
    pub wickets: u32,
    pub overs: f64,
    pub economy: f64,
    pub batting_points: u32,
    pub bowling_points: u32,
    pub fielding_points: u32,
    pub total_points: u32,
}

fn entry_from(agg: &PlayerAggregate) -> LeaderboardEntry {
    let batting = batting_points(agg.runs, agg.fours, agg.sixes);
    let bowling = bowling_points(agg.wickets);
    let fielding = fielding_points(agg.catches);
    LeaderboardEntry {
        player_name: agg.player_name.clone(),
        team: agg.team.clone(),
        matches: agg.matches_played(),
        runs: agg.runs,
        fours: agg.fours,
        sixes: agg.sixes,
        average: agg.batting_average(),
        strike_rate: agg.strike_rate(),
        wickets: agg.wickets,
        overs: agg.overs,
        economy: agg.economy(),
        batting_points: batting,
        bowling_points: bowling,
        fielding_points: fielding,
        total_points: batting + bowling + fielding,
    }
}

/// Players with at least one run, by runs descending. Ties go to the
/// alphabetically earlier name so reruns give identical boards.
pub fn top_batsmen(
    players: &HashMap<String, PlayerAggregate>,
    limit: usize,
) -> Vec<LeaderboardEntry> {
    let mut list: Vec<LeaderboardEntry> = players
        .values()
        .filter(|p| p.runs > 0)
        .map(entry_from)
        .collect();
    list.sort_by(|a, b| {
        b.runs
            .cmp(&a.runs)
            .then_with(|| a.player_name.cmp(&b.player_name))
    });
    list.truncate(limit);
    list
}

pub fn top_bowlers(
    players: &HashMap<String, PlayerAggregate>,
    limit: usize,
) -> Vec<LeaderboardEntry> {
    let mut list: Vec<LeaderboardEntry> = players
        .values()
        .filter(|p| p.wickets > 0)
        .map(entry_from)
        .collect();
    list.sort_by(|a, b| {
        b.wickets
            .cmp(&a.wickets)
            .then_with(|| a.player_name.cmp(&b.player_name))
    });
    list.truncate(limit);
    list
}

#[derive(Debug, Clone, Serialize)]
pub struct AllRounderEntry {
    pub player_name: String,
    pub team: String,
    pub matches: u32,
    pub runs: u32,
    pub wickets: u32,
    pub score: u32,
}

/// Composite score `runs + wickets * 25` for players past both bars.
/// Both thresholds are strict: 50 runs or 2 wickets exactly is not enough.
pub fn all_rounders(
    players: &HashMap<String, PlayerAggregate>,
    limit: usize,
) -> Vec<AllRounderEntry> {
    let mut list: Vec<AllRounderEntry> = players
        .values()
        .filter(|p| p.runs > ALL_ROUNDER_MIN_RUNS && p.wickets > ALL_ROUNDER_MIN_WICKETS)
        .map(|p| AllRounderEntry {
            player_name: p.player_name.clone(),
            team: p.team.clone(),
            matches: p.matches_played(),
            runs: p.runs,
            wickets: p.wickets,
            score: p.runs + p.wickets * 25,
        })
        .collect();
    list.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.player_name.cmp(&b.player_name))
    });
    list.truncate(limit);
    list
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchBestPlayer {
    pub match_id: String,
    pub player_name: String,
    pub team: String,
    pub runs: u32,
    pub wickets: u32,
    pub total_points: u32,
}

/// Highest-scoring row per match, one entry per match in first-seen match
/// order. A later row must strictly beat the incumbent, so point ties keep
/// the earlier row.
pub fn best_player_per_match(
    rows: &[MatchPlayerRecord],
    filter: &RecordFilter,
) -> Vec<MatchBestPlayer> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<MatchBestPlayer> = Vec::new();
    for row in rows.iter().filter(|r| filter.matches(r)) {
        let points = match_row_points(row);
        match index.get(&row.match_id) {
            Some(&slot) => {
                if points > out[slot].total_points {
                    out[slot] = best_entry(row, points);
                }
            }
            None => {
                index.insert(row.match_id.clone(), out.len());
                out.push(best_entry(row, points));
            }
        }
    }
    out
}

fn best_entry(row: &MatchPlayerRecord, points: u32) -> MatchBestPlayer {
    MatchBestPlayer {
        match_id: row.match_id.clone(),
        player_name: row.player_name.clone(),
        team: row.team.clone(),
        runs: row.runs_scored,
        wickets: row.wickets,
        total_points: points,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContributionEntry {
    pub player_name: String,
    pub runs: u32,
    pub cumulative_pct: u32,
}

/// Run contribution Pareto: top ten scorers in the filtered scope with a
/// running cumulative percentage of the top-ten total (not the grand
/// total), so the last entry reads 100 give or take rounding.
pub fn run_contributions(
    rows: &[MatchPlayerRecord],
    filter: &RecordFilter,
) -> Vec<ContributionEntry> {
    let mut by_player: HashMap<&str, u32> = HashMap::new();
    for row in rows.iter().filter(|r| filter.matches(r)) {
        *by_player.entry(row.player_name.as_str()).or_default() += row.runs_scored;
    }
    let mut ranked: Vec<(&str, u32)> = by_player.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(TOP_CONTRIBUTORS);

    let total: u64 = ranked.iter().map(|(_, runs)| u64::from(*runs)).sum();
    let mut cumulative = 0u64;
    ranked
        .into_iter()
        .map(|(name, runs)| {
            cumulative += u64::from(runs);
            let pct = if total > 0 {
                (cumulative as f64 / total as f64 * 100.0).round() as u32
            } else {
                0
            };
            ContributionEntry {
                player_name: name.to_string(),
                runs,
                cumulative_pct: pct,
            }
        })
        .collect()
}

fn best_by<'a, I, F>(candidates: I, cmp: F) -> Option<&'a PlayerAggregate>
where
    I: Iterator<Item = &'a PlayerAggregate>,
    F: Fn(&PlayerAggregate, &PlayerAggregate) -> Ordering,
{
    candidates.min_by(|a, b| cmp(a, b).then_with(|| a.player_name.cmp(&b.player_name)))
}

pub fn top_scorer(players: &HashMap<String, PlayerAggregate>) -> Option<&PlayerAggregate> {
    best_by(players.values(), |a, b| b.runs.cmp(&a.runs))
}

pub fn top_wicket_taker(players: &HashMap<String, PlayerAggregate>) -> Option<&PlayerAggregate> {
    best_by(players.values(), |a, b| b.wickets.cmp(&a.wickets))
}

/// Highest batting average among players with a five-match sample.
pub fn most_consistent(players: &HashMap<String, PlayerAggregate>) -> Option<&PlayerAggregate> {
    best_by(
        players
            .values()
            .filter(|p| p.matches_played() >= CONSISTENCY_MIN_MATCHES),
        |a, b| {
            b.batting_average()
                .partial_cmp(&a.batting_average())
                .unwrap_or(Ordering::Equal)
        },
    )
}

/// Highest strike rate among players who faced at least fifty balls.
pub fn best_strike_rate(players: &HashMap<String, PlayerAggregate>) -> Option<&PlayerAggregate> {
    best_by(
        players.values().filter(|p| p.balls >= STRIKE_RATE_MIN_BALLS),
        |a, b| {
            b.strike_rate()
                .partial_cmp(&a.strike_rate())
                .unwrap_or(Ordering::Equal)
        },
    )
}

/// Lowest economy among bowlers with at least ten overs.
pub fn best_economy(players: &HashMap<String, PlayerAggregate>) -> Option<&PlayerAggregate> {
    best_by(
        players.values().filter(|p| p.overs >= ECONOMY_MIN_OVERS),
        |a, b| a.economy().partial_cmp(&b.economy()).unwrap_or(Ordering::Equal),
    )
}

pub fn most_sixes(players: &HashMap<String, PlayerAggregate>) -> Option<&PlayerAggregate> {
    best_by(players.values(), |a, b| b.sixes.cmp(&a.sixes))
}

pub fn most_fours(players: &HashMap<String, PlayerAggregate>) -> Option<&PlayerAggregate> {
    best_by(players.values(), |a, b| b.fours.cmp(&a.fours))
}

/// Radar row for side-by-side comparison: each axis is the player's value
/// against the best of the compared set, as a 0-100 share.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonProfile {
    pub player_name: String,
    pub runs: f64,
    pub wickets: f64,
    pub strike_rate: f64,
    pub fielding: f64,
    pub sixes: f64,
    pub fours: f64,
}

/// Players with enough of a sample to compare, name ascending.
pub fn comparison_pool(players: &HashMap<String, PlayerAggregate>) -> Vec<&PlayerAggregate> {
    let mut pool: Vec<&PlayerAggregate> = players
        .values()
        .filter(|p| p.matches_played() >= COMPARISON_MIN_MATCHES)
        .collect();
    pool.sort_by(|a, b| a.player_name.cmp(&b.player_name));
    pool
}

pub fn comparison_profiles(selected: &[&PlayerAggregate]) -> Vec<ComparisonProfile> {
    fn axis_max(values: impl Iterator<Item = f64>) -> f64 {
        values.fold(0.0f64, f64::max).max(1.0)
    }

    let max_runs = axis_max(selected.iter().map(|p| f64::from(p.runs)));
    let max_wickets = axis_max(selected.iter().map(|p| f64::from(p.wickets)));
    let max_sr = axis_max(selected.iter().map(|p| p.strike_rate()));
    let max_catches = axis_max(selected.iter().map(|p| f64::from(p.catches)));
    let max_sixes = axis_max(selected.iter().map(|p| f64::from(p.sixes)));
    let max_fours = axis_max(selected.iter().map(|p| f64::from(p.fours)));

    selected
        .iter()
        .map(|p| ComparisonProfile {
            player_name: p.player_name.clone(),
            runs: f64::from(p.runs) / max_runs * 100.0,
            wickets: f64::from(p.wickets) / max_wickets * 100.0,
            strike_rate: p.strike_rate() / max_sr * 100.0,
            fielding: f64::from(p.catches) / max_catches * 100.0,
            sixes: f64::from(p.sixes) / max_sixes * 100.0,
            fours: f64::from(p.fours) / max_fours * 100.0,
        })
        .collect()
}

/// Radar row for the top-impact view, every axis capped at 100.
#[derive(Debug, Clone, Serialize)]
pub struct ImpactProfile {
    pub player_name: String,
    pub batting: f64,
    pub bowling: f64,
    pub consistency: f64,
    pub experience: f64,
    pub impact: f64,
}

/// Top five players by `runs + wickets * 20`, each scaled against the
/// filtered set's best batter and best bowler.
pub fn impact_profiles(players: &HashMap<String, PlayerAggregate>) -> Vec<ImpactProfile> {
    fn capped(value: f64) -> f64 {
        value.min(100.0)
    }
    fn impact_score(p: &PlayerAggregate) -> u32 {
        p.runs + p.wickets * 20
    }

    let best_runs = top_scorer(players).map(|p| p.runs).unwrap_or(0).max(1);
    let best_wickets = top_wicket_taker(players)
        .map(|p| p.wickets)
        .unwrap_or(0)
        .max(1);

    let mut ranked: Vec<&PlayerAggregate> = players.values().collect();
    ranked.sort_by(|a, b| {
        impact_score(b)
            .cmp(&impact_score(a))
            .then_with(|| a.player_name.cmp(&b.player_name))
    });
    ranked.truncate(5);

    ranked
        .into_iter()
        .map(|p| ImpactProfile {
            player_name: p.player_name.clone(),
            batting: capped(f64::from(p.runs) / f64::from(best_runs) * 100.0),
            bowling: capped(f64::from(p.wickets) / f64::from(best_wickets) * 100.0),
            consistency: capped(p.batting_average() / 50.0 * 100.0),
            experience: capped(f64::from(p.matches_played()) / 20.0 * 100.0),
            impact: capped(f64::from(impact_score(p)) / 500.0 * 100.0),
        })
        .collect()
}
