use std::collections::{BTreeSet, HashSet};

use crate::records::{MatchOutcomeRecord, MatchPlayerRecord};

/// Dashboard filter passed explicitly into every derivation. `None` means
/// "all" for that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub season: Option<u32>,
    pub team: Option<String>,
    pub player: Option<String>,
    pub match_id: Option<String>,
}

impl RecordFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_season(season: u32) -> Self {
        Self {
            season: Some(season),
            ..Self::default()
        }
    }

    pub fn for_team(team: &str) -> Self {
        Self {
            team: Some(team.to_string()),
            ..Self::default()
        }
    }

    pub fn matches(&self, row: &MatchPlayerRecord) -> bool {
        if let Some(season) = self.season
            && row.season != season
        {
            return false;
        }
        if let Some(team) = self.team.as_deref()
            && row.team != team
        {
            return false;
        }
        if let Some(player) = self.player.as_deref()
            && row.player_name != player
        {
            return false;
        }
        if let Some(match_id) = self.match_id.as_deref()
            && row.match_id != match_id
        {
            return false;
        }
        true
    }

    /// Outcome rows carry no player dimension; season and team apply.
    pub fn matches_outcome(&self, row: &MatchOutcomeRecord) -> bool {
        if let Some(season) = self.season
            && row.season != season
        {
            return false;
        }
        if let Some(team) = self.team.as_deref()
            && row.team != team
        {
            return false;
        }
        if let Some(match_id) = self.match_id.as_deref()
            && row.match_id != match_id
        {
            return false;
        }
        true
    }
}

pub fn filter_rows<'a>(
    rows: &'a [MatchPlayerRecord],
    filter: &RecordFilter,
) -> Vec<&'a MatchPlayerRecord> {
    rows.iter().filter(|r| filter.matches(r)).collect()
}

pub fn unique_teams(rows: &[MatchPlayerRecord]) -> Vec<String> {
    let set: BTreeSet<&str> = rows
        .iter()
        .map(|r| r.team.as_str())
        .filter(|t| !t.is_empty())
        .collect();
    set.into_iter().map(|t| t.to_string()).collect()
}

pub fn unique_players(rows: &[MatchPlayerRecord]) -> Vec<String> {
    let set: BTreeSet<&str> = rows
        .iter()
        .map(|r| r.player_name.as_str())
        .filter(|p| !p.is_empty())
        .collect();
    set.into_iter().map(|p| p.to_string()).collect()
}

pub fn unique_seasons(rows: &[MatchPlayerRecord]) -> Vec<u32> {
    let set: BTreeSet<u32> = rows.iter().map(|r| r.season).collect();
    set.into_iter().collect()
}

/// Match ids in first-seen row order, for selectors that should follow the
/// dataset's own chronology.
pub fn unique_matches(rows: &[MatchPlayerRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for row in rows {
        if !row.match_id.is_empty() && seen.insert(row.match_id.as_str()) {
            out.push(row.match_id.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(player: &str, team: &str, season: u32, match_id: &str) -> MatchPlayerRecord {
        MatchPlayerRecord {
            player_name: player.to_string(),
            team: team.to_string(),
            season,
            match_id: match_id.to_string(),
            ..MatchPlayerRecord::default()
        }
    }

    #[test]
    fn default_filter_matches_everything() {
        let r = row("A", "T1", 2024, "M1");
        assert!(RecordFilter::all().matches(&r));
    }

    #[test]
    fn each_dimension_restricts() {
        let r = row("A", "T1", 2024, "M1");
        assert!(RecordFilter::for_season(2024).matches(&r));
        assert!(!RecordFilter::for_season(2025).matches(&r));
        assert!(RecordFilter::for_team("T1").matches(&r));
        assert!(!RecordFilter::for_team("T2").matches(&r));
        let f = RecordFilter {
            player: Some("B".to_string()),
            ..RecordFilter::default()
        };
        assert!(!f.matches(&r));
    }

    #[test]
    fn uniques_sort_and_dedup() {
        let rows = vec![
            row("B", "T2", 2025, "M2"),
            row("A", "T1", 2024, "M1"),
            row("B", "T2", 2024, "M2"),
        ];
        assert_eq!(unique_teams(&rows), vec!["T1", "T2"]);
        assert_eq!(unique_players(&rows), vec!["A", "B"]);
        assert_eq!(unique_seasons(&rows), vec![2024, 2025]);
    }

    #[test]
    fn unique_matches_keep_first_seen_order() {
        let rows = vec![
            row("A", "T1", 2024, "M2"),
            row("B", "T1", 2024, "M1"),
            row("C", "T1", 2024, "M2"),
        ];
        assert_eq!(unique_matches(&rows), vec!["M2", "M1"]);
    }
}
