use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::filters::RecordFilter;
use crate::records::{MatchPlayerRecord, TeamSummaryRecord};

/// Career totals for one player under some filter. Stat columns sum over
/// every row; the match count comes from the distinct id set, so duplicate
/// rows for the same match never inflate it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlayerAggregate {
    pub player_name: String,
    pub team: String,
    pub role: String,
    #[serde(skip)]
    match_ids: BTreeSet<String>,
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    pub wickets: u32,
    pub overs: f64,
    pub runs_conceded: u32,
    pub catches: u32,
    pub run_outs: u32,
    pub stumpings: u32,
}

impl PlayerAggregate {
    pub fn matches_played(&self) -> u32 {
        self.match_ids.len() as u32
    }

    pub fn strike_rate(&self) -> f64 {
        if self.balls > 0 {
            f64::from(self.runs) / f64::from(self.balls) * 100.0
        } else {
            0.0
        }
    }

    pub fn economy(&self) -> f64 {
        if self.overs > 0.0 {
            f64::from(self.runs_conceded) / self.overs
        } else {
            0.0
        }
    }

    pub fn batting_average(&self) -> f64 {
        let matches = self.matches_played();
        if matches > 0 {
            f64::from(self.runs) / f64::from(matches)
        } else {
            0.0
        }
    }

    fn absorb(&mut self, row: &MatchPlayerRecord) {
        if self.player_name.is_empty() {
            self.player_name = row.player_name.clone();
            self.team = row.team.clone();
            self.role = row.role.clone();
        }
        self.match_ids.insert(row.match_id.clone());
        self.runs += row.runs_scored;
        self.balls += row.balls_faced;
        self.fours += row.fours;
        self.sixes += row.sixes;
        self.wickets += row.wickets;
        self.overs += row.overs_bowled;
        self.runs_conceded += row.runs_conceded;
        self.catches += row.catches;
        self.run_outs += row.run_outs;
        self.stumpings += row.stumpings;
    }
}

pub fn aggregate_players(
    rows: &[MatchPlayerRecord],
    filter: &RecordFilter,
) -> HashMap<String, PlayerAggregate> {
    let mut out: HashMap<String, PlayerAggregate> = HashMap::new();
    for row in rows.iter().filter(|r| filter.matches(r)) {
        out.entry(row.player_name.clone()).or_default().absorb(row);
    }
    out
}

/// Per-team totals from the master rows. The authoritative win/loss/tie
/// block arrives separately via [`merge_team_summaries`]; until then it
/// stays zeroed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TeamAggregate {
    pub team: String,
    #[serde(skip)]
    match_ids: BTreeSet<String>,
    #[serde(skip)]
    won_matches: BTreeSet<String>,
    pub runs: u32,
    pub wickets: u32,
    pub fours: u32,
    pub sixes: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub win_rate: f64,
    pub performance: String,
}

impl TeamAggregate {
    pub fn matches_played(&self) -> u32 {
        self.match_ids.len() as u32
    }

    /// Wins counted from the rows themselves (distinct matches ending in a
    /// "Win"). Kept separate from the merged summary block.
    pub fn record_wins(&self) -> u32 {
        self.won_matches.len() as u32
    }

    fn absorb(&mut self, row: &MatchPlayerRecord) {
        if self.team.is_empty() {
            self.team = row.team.clone();
        }
        self.match_ids.insert(row.match_id.clone());
        if row.is_win() {
            self.won_matches.insert(row.match_id.clone());
        }
        self.runs += row.runs_scored;
        self.wickets += row.wickets;
        self.fours += row.fours;
        self.sixes += row.sixes;
    }
}

pub fn aggregate_teams(
    rows: &[MatchPlayerRecord],
    filter: &RecordFilter,
) -> HashMap<String, TeamAggregate> {
    let mut out: HashMap<String, TeamAggregate> = HashMap::new();
    for row in rows.iter().filter(|r| filter.matches(r)) {
        out.entry(row.team.clone()).or_default().absorb(row);
    }
    out
}

/// Copy the precomputed win/loss/tie block onto matching teams. Teams
/// absent from the summary keep zeros; summary rows for unknown teams are
/// ignored. No reconciliation between the two sources.
pub fn merge_team_summaries(
    teams: &mut HashMap<String, TeamAggregate>,
    summaries: &[TeamSummaryRecord],
) {
    for summary in summaries {
        let Some(team) = teams.get_mut(&summary.team) else {
            continue;
        };
        team.wins = summary.wins;
        team.losses = summary.losses;
        team.ties = summary.ties;
        team.win_rate = summary.win_rate;
        team.performance = summary.performance.clone();
    }
}

/// Headline counters for the dashboard cards.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardTotals {
    pub matches: usize,
    pub players: usize,
    pub teams: usize,
    pub runs: u64,
    pub wickets: u64,
    pub fours: u64,
    pub sixes: u64,
}

pub fn dataset_totals(rows: &[MatchPlayerRecord]) -> DashboardTotals {
    let mut matches = BTreeSet::new();
    let mut players = BTreeSet::new();
    let mut teams = BTreeSet::new();
    let mut totals = DashboardTotals::default();
    for row in rows {
        matches.insert(row.match_id.as_str());
        players.insert(row.player_name.as_str());
        teams.insert(row.team.as_str());
        totals.runs += u64::from(row.runs_scored);
        totals.wickets += u64::from(row.wickets);
        totals.fours += u64::from(row.fours);
        totals.sixes += u64::from(row.sixes);
    }
    totals.matches = matches.len();
    totals.players = players.len();
    totals.teams = teams.len();
    totals
}

/// Mean runs per match for one season: summed runs over distinct matches.
pub fn season_average_score(rows: &[MatchPlayerRecord], season: u32) -> f64 {
    let mut runs = 0u64;
    let mut matches = BTreeSet::new();
    for row in rows.iter().filter(|r| r.season == season) {
        runs += u64::from(row.runs_scored);
        matches.insert(row.match_id.as_str());
    }
    if matches.is_empty() {
        0.0
    } else {
        runs as f64 / matches.len() as f64
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunBucket {
    pub label: &'static str,
    pub players: usize,
}

const BUCKET_BOUNDS: [(&str, u32, Option<u32>); 5] = [
    ("0-100", 0, Some(100)),
    ("100-200", 100, Some(200)),
    ("200-300", 200, Some(300)),
    ("300-400", 300, Some(400)),
    ("400+", 400, None),
];

/// Half-open career-run buckets over a player aggregate map, last bucket
/// unbounded.
pub fn run_distribution(players: &HashMap<String, PlayerAggregate>) -> Vec<RunBucket> {
    BUCKET_BOUNDS
        .iter()
        .map(|(label, lo, hi)| {
            let players = players
                .values()
                .filter(|p| p.runs >= *lo && hi.is_none_or(|h| p.runs < h))
                .count();
            RunBucket { label, players }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(player: &str, match_id: &str, runs: u32) -> MatchPlayerRecord {
        MatchPlayerRecord {
            player_name: player.to_string(),
            team: "Team".to_string(),
            season: 2024,
            match_id: match_id.to_string(),
            runs_scored: runs,
            ..MatchPlayerRecord::default()
        }
    }

    #[test]
    fn duplicate_match_rows_sum_stats_but_count_one_match() {
        let rows = vec![
            row("A", "M1", 10),
            row("A", "M1", 20),
            row("A", "M1", 5),
            row("A", "M2", 30),
        ];
        let agg = aggregate_players(&rows, &RecordFilter::all());
        let a = &agg["A"];
        assert_eq!(a.matches_played(), 2);
        assert_eq!(a.runs, 65);
    }

    #[test]
    fn rates_are_zero_safe() {
        let agg = PlayerAggregate::default();
        assert_eq!(agg.strike_rate(), 0.0);
        assert_eq!(agg.economy(), 0.0);
        assert_eq!(agg.batting_average(), 0.0);
    }

    #[test]
    fn strike_rate_and_average() {
        let mut r = row("A", "M1", 50);
        r.balls_faced = 25;
        let agg = aggregate_players(&[r], &RecordFilter::all());
        let a = &agg["A"];
        assert_eq!(a.strike_rate(), 200.0);
        assert_eq!(a.batting_average(), 50.0);
    }

    #[test]
    fn filter_scopes_aggregation() {
        let mut rows = vec![row("A", "M1", 10), row("A", "M2", 20)];
        rows[1].season = 2025;
        let agg = aggregate_players(&rows, &RecordFilter::for_season(2024));
        assert_eq!(agg["A"].runs, 10);
        assert_eq!(agg["A"].matches_played(), 1);
    }

    #[test]
    fn team_aggregate_counts_distinct_wins() {
        let mut rows = vec![
            row("A", "M1", 40),
            row("B", "M1", 20),
            row("A", "M2", 10),
        ];
        for r in &mut rows[..2] {
            r.match_result = "Win".to_string();
        }
        rows[2].match_result = "Loss".to_string();
        let teams = aggregate_teams(&rows, &RecordFilter::all());
        let t = &teams["Team"];
        assert_eq!(t.matches_played(), 2);
        assert_eq!(t.record_wins(), 1);
        assert_eq!(t.runs, 70);
    }

    #[test]
    fn summary_merge_fills_record_block() {
        let rows = vec![row("A", "M1", 10)];
        let mut teams = aggregate_teams(&rows, &RecordFilter::all());
        let summaries = vec![TeamSummaryRecord {
            team: "Team".to_string(),
            wins: 7,
            losses: 4,
            ties: 1,
            total: 12,
            win_rate: 58.3,
            performance: "Good".to_string(),
        }];
        merge_team_summaries(&mut teams, &summaries);
        assert_eq!(teams["Team"].wins, 7);
        assert_eq!(teams["Team"].win_rate, 58.3);
    }

    #[test]
    fn totals_count_distinct_entities() {
        let rows = vec![row("A", "M1", 10), row("B", "M1", 20), row("A", "M2", 5)];
        let totals = dataset_totals(&rows);
        assert_eq!(totals.matches, 2);
        assert_eq!(totals.players, 2);
        assert_eq!(totals.teams, 1);
        assert_eq!(totals.runs, 35);
    }

    #[test]
    fn season_average_uses_distinct_matches() {
        let rows = vec![row("A", "M1", 100), row("B", "M1", 80), row("A", "M2", 60)];
        assert_eq!(season_average_score(&rows, 2024), 80.0);
        assert_eq!(season_average_score(&rows, 1999), 0.0);
    }

    #[test]
    fn run_buckets_are_half_open() {
        let rows = vec![
            row("A", "M1", 99),
            row("B", "M1", 100),
            row("C", "M1", 400),
            row("D", "M1", 450),
        ];
        let agg = aggregate_players(&rows, &RecordFilter::all());
        let buckets = run_distribution(&agg);
        assert_eq!(buckets[0].players, 1);
        assert_eq!(buckets[1].players, 1);
        assert_eq!(buckets[4].players, 2);
    }
}
