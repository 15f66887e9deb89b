use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::aggregate::{
    aggregate_players, aggregate_teams, merge_team_summaries, PlayerAggregate, TeamAggregate,
};
use crate::crosstab::{head_to_head, venue_records};
use crate::field_zones::{allocate_zones, batting_totals};
use crate::filters::RecordFilter;
use crate::format::team_short_name;
use crate::loader::Dataset;
use crate::rankings::{
    all_rounders, best_player_per_match, top_batsmen, top_bowlers, AllRounderEntry,
    LeaderboardEntry,
};

const LEADERBOARD_LIMIT: usize = 15;

pub struct ExportReport {
    pub teams: usize,
    pub players: usize,
    pub top_batsmen: usize,
    pub top_bowlers: usize,
    pub all_rounders: usize,
    pub best_players: usize,
    pub head_to_head: usize,
    pub toss_rows: usize,
    pub venues: usize,
    pub zones: usize,
}

/// Derives every dashboard table from the dataset and writes one sheet per
/// table.
pub fn export_workbook(path: &Path, dataset: &Dataset) -> Result<ExportReport> {
    let filter = RecordFilter::all();
    let players = aggregate_players(&dataset.master, &filter);
    let mut teams = aggregate_teams(&dataset.master, &filter);
    merge_team_summaries(&mut teams, &dataset.team_summary);

    let teams_rows = team_rows(&teams);
    let players_rows = player_rows(&players);
    let batsmen_rows = batsmen_rows(&top_batsmen(&players, LEADERBOARD_LIMIT));
    let bowlers_rows = bowlers_rows(&top_bowlers(&players, LEADERBOARD_LIMIT));
    let rounders_rows = rounders_rows(&all_rounders(&players, LEADERBOARD_LIMIT));
    let best_rows = best_player_rows(dataset);
    let h2h_rows = head_to_head_rows(dataset);
    let toss_rows = toss_rows(dataset);
    let venues_rows = venue_rows(dataset);
    let zones_rows = zone_rows(dataset);

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Teams")?;
        write_rows(sheet, &teams_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Players")?;
        write_rows(sheet, &players_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("TopBatsmen")?;
        write_rows(sheet, &batsmen_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("TopBowlers")?;
        write_rows(sheet, &bowlers_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("AllRounders")?;
        write_rows(sheet, &rounders_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("BestPlayers")?;
        write_rows(sheet, &best_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("HeadToHead")?;
        write_rows(sheet, &h2h_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("TossImpact")?;
        write_rows(sheet, &toss_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Venues")?;
        write_rows(sheet, &venues_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Zones")?;
        write_rows(sheet, &zones_rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;
    info!(
        "wrote workbook {} ({} teams, {} players)",
        path.display(),
        teams_rows.len().saturating_sub(1),
        players_rows.len().saturating_sub(1)
    );

    Ok(ExportReport {
        teams: teams_rows.len().saturating_sub(1),
        players: players_rows.len().saturating_sub(1),
        top_batsmen: batsmen_rows.len().saturating_sub(1),
        top_bowlers: bowlers_rows.len().saturating_sub(1),
        all_rounders: rounders_rows.len().saturating_sub(1),
        best_players: best_rows.len().saturating_sub(1),
        head_to_head: h2h_rows.len().saturating_sub(1),
        toss_rows: toss_rows.len().saturating_sub(1),
        venues: venues_rows.len().saturating_sub(1),
        zones: zones_rows.len().saturating_sub(1),
    })
}

fn team_rows(teams: &HashMap<String, TeamAggregate>) -> Vec<Vec<String>> {
    let mut names: Vec<&String> = teams.keys().collect();
    names.sort();

    let mut rows = vec![vec![
        "Team".to_string(),
        "Code".to_string(),
        "Matches".to_string(),
        "Runs".to_string(),
        "Wickets".to_string(),
        "Fours".to_string(),
        "Sixes".to_string(),
        "Wins".to_string(),
        "Losses".to_string(),
        "Ties".to_string(),
        "Win Rate".to_string(),
        "Performance".to_string(),
    ]];
    for name in names {
        let team = &teams[name];
        rows.push(vec![
            team.team.clone(),
            team_short_name(&team.team),
            team.matches_played().to_string(),
            team.runs.to_string(),
            team.wickets.to_string(),
            team.fours.to_string(),
            team.sixes.to_string(),
            team.wins.to_string(),
            team.losses.to_string(),
            team.ties.to_string(),
            format!("{:.2}", team.win_rate),
            team.performance.clone(),
        ]);
    }
    rows
}

fn player_rows(players: &HashMap<String, PlayerAggregate>) -> Vec<Vec<String>> {
    let mut names: Vec<&String> = players.keys().collect();
    names.sort();

    let mut rows = vec![vec![
        "Player".to_string(),
        "Team".to_string(),
        "Role".to_string(),
        "Matches".to_string(),
        "Runs".to_string(),
        "Balls".to_string(),
        "Average".to_string(),
        "Strike Rate".to_string(),
        "Fours".to_string(),
        "Sixes".to_string(),
        "Wickets".to_string(),
        "Overs".to_string(),
        "Economy".to_string(),
        "Catches".to_string(),
        "Run Outs".to_string(),
        "Stumpings".to_string(),
    ]];
    for name in names {
        let p = &players[name];
        rows.push(vec![
            p.player_name.clone(),
            p.team.clone(),
            p.role.clone(),
            p.matches_played().to_string(),
            p.runs.to_string(),
            p.balls.to_string(),
            format!("{:.2}", p.batting_average()),
            format!("{:.2}", p.strike_rate()),
            p.fours.to_string(),
            p.sixes.to_string(),
            p.wickets.to_string(),
            format!("{:.1}", p.overs),
            format!("{:.2}", p.economy()),
            p.catches.to_string(),
            p.run_outs.to_string(),
            p.stumpings.to_string(),
        ]);
    }
    rows
}

fn batsmen_rows(board: &[LeaderboardEntry]) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Player".to_string(),
        "Team".to_string(),
        "Matches".to_string(),
        "Runs".to_string(),
        "Average".to_string(),
        "Strike Rate".to_string(),
        "Fours".to_string(),
        "Sixes".to_string(),
        "Total Points".to_string(),
    ]];
    for entry in board {
        rows.push(vec![
            entry.player_name.clone(),
            entry.team.clone(),
            entry.matches.to_string(),
            entry.runs.to_string(),
            format!("{:.2}", entry.average),
            format!("{:.2}", entry.strike_rate),
            entry.fours.to_string(),
            entry.sixes.to_string(),
            entry.total_points.to_string(),
        ]);
    }
    rows
}

fn bowlers_rows(board: &[LeaderboardEntry]) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Player".to_string(),
        "Team".to_string(),
        "Matches".to_string(),
        "Wickets".to_string(),
        "Overs".to_string(),
        "Economy".to_string(),
        "Total Points".to_string(),
    ]];
    for entry in board {
        rows.push(vec![
            entry.player_name.clone(),
            entry.team.clone(),
            entry.matches.to_string(),
            entry.wickets.to_string(),
            format!("{:.1}", entry.overs),
            format!("{:.2}", entry.economy),
            entry.total_points.to_string(),
        ]);
    }
    rows
}

fn rounders_rows(board: &[AllRounderEntry]) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Player".to_string(),
        "Team".to_string(),
        "Matches".to_string(),
        "Runs".to_string(),
        "Wickets".to_string(),
        "Score".to_string(),
    ]];
    for entry in board {
        rows.push(vec![
            entry.player_name.clone(),
            entry.team.clone(),
            entry.matches.to_string(),
            entry.runs.to_string(),
            entry.wickets.to_string(),
            entry.score.to_string(),
        ]);
    }
    rows
}

fn best_player_rows(dataset: &Dataset) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Match".to_string(),
        "Player".to_string(),
        "Team".to_string(),
        "Runs".to_string(),
        "Wickets".to_string(),
        "Points".to_string(),
    ]];
    for entry in best_player_per_match(&dataset.master, &RecordFilter::all()) {
        rows.push(vec![
            entry.match_id.clone(),
            entry.player_name.clone(),
            entry.team.clone(),
            entry.runs.to_string(),
            entry.wickets.to_string(),
            entry.total_points.to_string(),
        ]);
    }
    rows
}

fn head_to_head_rows(dataset: &Dataset) -> Vec<Vec<String>> {
    let matrix = head_to_head(&dataset.master);
    let teams = matrix.teams();

    let mut header = vec!["Team".to_string()];
    header.extend(teams.iter().map(|t| team_short_name(t)));
    let mut rows = vec![header];

    for team in &teams {
        let mut row = vec![team.clone()];
        for opposition in &teams {
            if team == opposition {
                row.push("-".to_string());
                continue;
            }
            let record = matrix.record(team, opposition);
            row.push(format!("{}-{}", record.wins, record.losses));
        }
        rows.push(row);
    }
    rows
}

fn toss_rows(dataset: &Dataset) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Toss Status".to_string(),
        "Matches".to_string(),
        "Wins".to_string(),
        "Losses".to_string(),
        "Ties".to_string(),
        "Win Rate".to_string(),
    ]];
    for summary in &dataset.toss_summary {
        rows.push(vec![
            summary.toss_status.clone(),
            summary.total_matches.to_string(),
            summary.wins.to_string(),
            summary.losses.to_string(),
            summary.ties.to_string(),
            format!("{:.2}", summary.win_rate),
        ]);
    }
    rows
}

fn venue_rows(dataset: &Dataset) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Venue".to_string(),
        "Matches".to_string(),
        "Wins".to_string(),
        "Losses".to_string(),
    ]];
    for record in venue_records(&dataset.outcomes, &RecordFilter::all()) {
        rows.push(vec![
            record.venue.clone(),
            record.total.to_string(),
            record.wins.to_string(),
            record.losses.to_string(),
        ]);
    }
    rows
}

fn zone_rows(dataset: &Dataset) -> Vec<Vec<String>> {
    let totals = batting_totals(&dataset.master, &RecordFilter::all());
    let mut rows = vec![vec![
        "Zone".to_string(),
        "Runs".to_string(),
        "Fours".to_string(),
        "Sixes".to_string(),
        "Dismissals".to_string(),
    ]];
    for allocation in allocate_zones(totals) {
        rows.push(vec![
            allocation.zone.display_name().to_string(),
            allocation.runs.to_string(),
            allocation.fours.to_string(),
            allocation.sixes.to_string(),
            allocation.dismissals.to_string(),
        ]);
    }
    rows
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
