use std::path::PathBuf;

use npl_analytics::crosstab::{
    head_to_head, match_trend, overall_outcomes, season_comparison, team_outcomes,
    toss_decision_outcomes, toss_win_advantage, venue_records,
};
use npl_analytics::filters::RecordFilter;
use npl_analytics::loader::{load_dataset, Dataset};

fn fixture_dataset() -> Dataset {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    load_dataset(&path).expect("fixtures should load")
}

#[test]
fn grid_counts_one_result_per_match() {
    let dataset = fixture_dataset();
    let matrix = head_to_head(&dataset.master);
    assert_eq!(
        matrix.teams(),
        vec!["Janakpur Bolts", "Sudurpaschim Royals"]
    );

    // Win in 2024_M01, loss in 2024_M02, tie in 2025_M01.
    let record = matrix.record("Janakpur Bolts", "Sudurpaschim Royals");
    assert_eq!(record.wins, 1);
    assert_eq!(record.losses, 1);

    // Only the first row of each match counts, so the reverse cell is empty.
    let reverse = matrix.record("Sudurpaschim Royals", "Janakpur Bolts");
    assert_eq!(reverse.wins, 0);
    assert_eq!(reverse.losses, 0);
}

#[test]
fn outcome_tallies_sum_the_flags() {
    let dataset = fixture_dataset();
    let tallies = team_outcomes(&dataset.outcomes, &RecordFilter::all());
    assert_eq!(tallies.len(), 2);
    for tally in &tallies {
        assert_eq!(tally.wins, 1);
        assert_eq!(tally.losses, 1);
        assert_eq!(tally.ties, 1);
    }

    let overall = overall_outcomes(&dataset.outcomes, &RecordFilter::all());
    assert_eq!(overall.rows, 6);
    assert_eq!(overall.wins, 2);
    // Two wins over three physical matches.
    assert!((overall.win_rate() - 200.0 / 3.0).abs() < 1e-9);
}

#[test]
fn toss_splits_count_converted_tosses() {
    let dataset = fixture_dataset();
    let splits = toss_decision_outcomes(&dataset.outcomes, &RecordFilter::all());
    assert_eq!(splits.len(), 2);
    assert_eq!(splits[0].decision, "Bat");
    assert_eq!(splits[0].total, 4);
    assert_eq!(splits[0].wins, 1);
    assert_eq!(splits[0].win_rate(), 25.0);
    assert_eq!(splits[1].decision, "Bowl");
    assert_eq!(splits[1].total, 2);
    assert_eq!(splits[1].wins, 1);
    assert_eq!(splits[1].win_rate(), 50.0);
}

#[test]
fn toss_advantage_averages_the_summary() {
    let dataset = fixture_dataset();
    let advantage = toss_win_advantage(&dataset.toss_summary);
    assert!((advantage - (66.67 + 0.0) / 2.0).abs() < 1e-9);
}

#[test]
fn venue_variants_share_one_bucket() {
    let dataset = fixture_dataset();
    let records = venue_records(&dataset.outcomes, &RecordFilter::all());
    // "Kirtipur, Kathmandu" and "Kirtipur" both key on the text before the comma.
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].venue, "Kirtipur");
    assert_eq!(records[0].total, 6);
    assert_eq!(records[0].wins, 2);
    assert_eq!(records[0].losses, 2);
}

#[test]
fn season_comparison_reports_the_delta() {
    let dataset = fixture_dataset();
    let cmp = season_comparison(&dataset.outcomes, 2024, 2025);
    assert_eq!(cmp.len(), 2);
    let janakpur = cmp
        .iter()
        .find(|c| c.team == "Janakpur Bolts")
        .expect("Janakpur should appear");
    assert_eq!(janakpur.season1_wins, 1);
    assert_eq!(janakpur.season1_win_rate, 50.0);
    assert_eq!(janakpur.season2_wins, 0);
    assert_eq!(janakpur.season2_win_rate, 0.0);
    assert_eq!(janakpur.improvement, -50.0);
}

#[test]
fn trend_is_date_ordered_and_scored() {
    let dataset = fixture_dataset();
    let trend = match_trend(&dataset.outcomes, "Janakpur Bolts");
    let values: Vec<f64> = trend.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![1.0, 0.0, 0.5]);
    assert_eq!(trend[0].match_id, "2024_M01");
    assert_eq!(trend[2].match_id, "2025_M01");
}

#[test]
fn filters_narrow_the_crosstabs() {
    let dataset = fixture_dataset();
    let filter = RecordFilter::for_season(2024);
    let overall = overall_outcomes(&dataset.outcomes, &filter);
    assert_eq!(overall.rows, 4);
    assert_eq!(overall.ties, 0);

    let team_filter = RecordFilter::for_team("Sudurpaschim Royals");
    let tallies = team_outcomes(&dataset.outcomes, &team_filter);
    assert_eq!(tallies.len(), 1);
    assert_eq!(tallies[0].team, "Sudurpaschim Royals");
}
