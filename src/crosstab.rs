use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::filters::RecordFilter;
use crate::records::{MatchOutcomeRecord, MatchPlayerRecord, TossSummaryRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WinLossRecord {
    pub wins: u32,
    pub losses: u32,
}

/// Team-vs-team record accumulated from the master rows. One outcome per
/// distinct match id (the first row seen); ties are not tracked here. The
/// matrix is asymmetric by construction, nothing enforces that A beating B
/// shows up again as B losing to A.
#[derive(Debug, Clone, Default)]
pub struct HeadToHeadMatrix {
    cells: HashMap<String, HashMap<String, WinLossRecord>>,
    teams: BTreeSet<String>,
}

impl HeadToHeadMatrix {
    /// Zero record for pairings that never met.
    pub fn record(&self, team: &str, opposition: &str) -> WinLossRecord {
        self.cells
            .get(team)
            .and_then(|row| row.get(opposition))
            .copied()
            .unwrap_or_default()
    }

    /// Every team seen on either side of a pairing, name ascending.
    pub fn teams(&self) -> Vec<String> {
        self.teams.iter().cloned().collect()
    }

    fn add(&mut self, team: &str, opposition: &str, result: &str) {
        self.teams.insert(team.to_string());
        self.teams.insert(opposition.to_string());
        let cell = self
            .cells
            .entry(team.to_string())
            .or_default()
            .entry(opposition.to_string())
            .or_default();
        if result == "Win" {
            cell.wins += 1;
        } else if result == "Loss" {
            cell.losses += 1;
        }
    }
}

pub fn head_to_head(rows: &[MatchPlayerRecord]) -> HeadToHeadMatrix {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut matrix = HeadToHeadMatrix::default();
    for row in rows {
        if !seen.insert(row.match_id.as_str()) {
            continue;
        }
        if row.batting_team.is_empty() || row.opposition.is_empty() {
            continue;
        }
        matrix.add(&row.batting_team, &row.opposition, &row.match_result);
    }
    matrix
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OutcomeTally {
    pub team: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

/// Per-team win/loss/tie sums over the 0/1 outcome flags, team ascending.
pub fn team_outcomes(rows: &[MatchOutcomeRecord], filter: &RecordFilter) -> Vec<OutcomeTally> {
    let mut by_team: BTreeMap<&str, OutcomeTally> = BTreeMap::new();
    for row in rows.iter().filter(|r| filter.matches_outcome(r)) {
        let tally = by_team.entry(row.team.as_str()).or_default();
        if tally.team.is_empty() {
            tally.team = row.team.clone();
        }
        tally.wins += row.won;
        tally.losses += row.lost;
        tally.ties += row.tied;
    }
    by_team.into_values().collect()
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct OverallOutcomes {
    pub rows: usize,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl OverallOutcomes {
    /// Each match contributes two perspective rows, so the match count is
    /// half the row count.
    pub fn win_rate(&self) -> f64 {
        if self.rows == 0 {
            0.0
        } else {
            f64::from(self.wins) / (self.rows as f64 / 2.0) * 100.0
        }
    }
}

pub fn overall_outcomes(rows: &[MatchOutcomeRecord], filter: &RecordFilter) -> OverallOutcomes {
    let mut out = OverallOutcomes::default();
    for row in rows.iter().filter(|r| filter.matches_outcome(r)) {
        out.rows += 1;
        out.wins += row.won;
        out.losses += row.lost;
        out.ties += row.tied;
    }
    out
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TossDecisionSplit {
    pub decision: String,
    pub total: u32,
    pub wins: u32,
}

impl TossDecisionSplit {
    pub fn win_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.total) * 100.0
        }
    }
}

/// Outcome split by toss decision. A win only counts when the row's team
/// both won the toss and won the match, so the rate reads "won toss and
/// converted".
pub fn toss_decision_outcomes(
    rows: &[MatchOutcomeRecord],
    filter: &RecordFilter,
) -> Vec<TossDecisionSplit> {
    let mut by_decision: BTreeMap<&str, TossDecisionSplit> = BTreeMap::new();
    for row in rows.iter().filter(|r| filter.matches_outcome(r)) {
        let split = by_decision.entry(row.toss_decision.as_str()).or_default();
        if split.decision.is_empty() {
            split.decision = row.toss_decision.clone();
        }
        split.total += 1;
        if row.toss_won == 1 && row.won == 1 {
            split.wins += 1;
        }
    }
    by_decision.into_values().collect()
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VenueRecord {
    pub venue: String,
    pub total: u32,
    pub wins: u32,
    pub losses: u32,
}

/// Per-venue record keyed on the venue text before the first comma, so
/// "Kirtipur, Kathmandu" and "Kirtipur" land in the same bucket.
pub fn venue_records(rows: &[MatchOutcomeRecord], filter: &RecordFilter) -> Vec<VenueRecord> {
    let mut by_venue: BTreeMap<String, VenueRecord> = BTreeMap::new();
    for row in rows.iter().filter(|r| filter.matches_outcome(r)) {
        let key = row.venue.split(',').next().unwrap_or("").trim();
        let record = by_venue.entry(key.to_string()).or_default();
        if record.venue.is_empty() {
            record.venue = key.to_string();
        }
        record.total += 1;
        record.wins += row.won;
        record.losses += row.lost;
    }
    by_venue.into_values().collect()
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SeasonComparison {
    pub team: String,
    pub season1_wins: u32,
    pub season1_losses: u32,
    pub season1_win_rate: f64,
    pub season2_wins: u32,
    pub season2_losses: u32,
    pub season2_win_rate: f64,
    pub improvement: f64,
}

/// Side-by-side record for every team that appears in either season, team
/// ascending. Improvement is the raw win-rate delta.
pub fn season_comparison(
    rows: &[MatchOutcomeRecord],
    season1: u32,
    season2: u32,
) -> Vec<SeasonComparison> {
    #[derive(Default)]
    struct Tally {
        wins: u32,
        losses: u32,
        total: u32,
    }
    impl Tally {
        fn rate(&self) -> f64 {
            if self.total == 0 {
                0.0
            } else {
                f64::from(self.wins) / f64::from(self.total) * 100.0
            }
        }
    }

    let mut by_team: BTreeMap<&str, (Tally, Tally)> = BTreeMap::new();
    for row in rows {
        let slot = if row.season == season1 {
            0
        } else if row.season == season2 {
            1
        } else {
            continue;
        };
        let entry = by_team.entry(row.team.as_str()).or_default();
        let tally = if slot == 0 { &mut entry.0 } else { &mut entry.1 };
        tally.wins += row.won;
        tally.losses += row.lost;
        tally.total += 1;
    }

    by_team
        .into_iter()
        .map(|(team, (first, second))| SeasonComparison {
            team: team.to_string(),
            season1_wins: first.wins,
            season1_losses: first.losses,
            season1_win_rate: first.rate(),
            season2_wins: second.wins,
            season2_losses: second.losses,
            season2_win_rate: second.rate(),
            improvement: second.rate() - first.rate(),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    pub match_id: String,
    pub value: f64,
}

/// Result trend for one team: 1.0 win, 0.5 tie, 0.0 loss. Points come out
/// date ascending when every date parses as `%Y-%m-%d`; otherwise the
/// input order stands.
pub fn match_trend(rows: &[MatchOutcomeRecord], team: &str) -> Vec<TrendPoint> {
    let mut dated: Vec<(Option<NaiveDate>, TrendPoint)> = rows
        .iter()
        .filter(|r| r.team == team)
        .map(|r| {
            let value = if r.won == 1 {
                1.0
            } else if r.tied == 1 {
                0.5
            } else {
                0.0
            };
            let date = NaiveDate::parse_from_str(&r.match_date, "%Y-%m-%d").ok();
            (
                date,
                TrendPoint {
                    match_id: r.match_id.clone(),
                    value,
                },
            )
        })
        .collect();

    if dated.iter().all(|(d, _)| d.is_some()) {
        dated.sort_by_key(|(d, _)| *d);
    }
    dated.into_iter().map(|(_, p)| p).collect()
}

/// Mean win rate across the toss summary rows, 0 for an empty table.
pub fn toss_win_advantage(rows: &[TossSummaryRecord]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    rows.iter().map(|r| r.win_rate).sum::<f64>() / rows.len() as f64
}
