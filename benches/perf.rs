use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use npl_analytics::aggregate::{aggregate_players, aggregate_teams};
use npl_analytics::crosstab::{head_to_head, team_outcomes};
use npl_analytics::field_zones::{allocate_zones, batting_totals};
use npl_analytics::filters::RecordFilter;
use npl_analytics::loader::{parse_json_rows, Dataset};
use npl_analytics::rankings::{all_rounders, best_player_per_match, top_batsmen, top_bowlers};
use npl_analytics::records::MatchPlayerRecord;
use npl_analytics::sample_feed::{generate_dataset, SampleConfig};

fn bench_dataset() -> Dataset {
    generate_dataset(&SampleConfig {
        seasons: 4,
        first_season: 2023,
        seed: 7,
    })
}

fn bench_master_json_parse(c: &mut Criterion) {
    let dataset = bench_dataset();
    let body = serde_json::to_string(&dataset.master).expect("serializable rows");

    c.bench_function("master_json_parse", |b| {
        b.iter(|| {
            let rows: Vec<MatchPlayerRecord> = parse_json_rows(black_box(&body)).unwrap();
            black_box(rows.len());
        })
    });
}

fn bench_player_aggregation(c: &mut Criterion) {
    let dataset = bench_dataset();
    let filter = RecordFilter::all();

    c.bench_function("player_aggregation", |b| {
        b.iter(|| {
            let players = aggregate_players(black_box(&dataset.master), &filter);
            black_box(players.len());
        })
    });
}

fn bench_leaderboards(c: &mut Criterion) {
    let dataset = bench_dataset();
    let players = aggregate_players(&dataset.master, &RecordFilter::all());

    c.bench_function("leaderboards", |b| {
        b.iter(|| {
            let batsmen = top_batsmen(black_box(&players), 10);
            let bowlers = top_bowlers(black_box(&players), 10);
            let rounders = all_rounders(black_box(&players), 10);
            black_box(batsmen.len() + bowlers.len() + rounders.len());
        })
    });
}

fn bench_best_player_scan(c: &mut Criterion) {
    let dataset = bench_dataset();
    let filter = RecordFilter::all();

    c.bench_function("best_player_scan", |b| {
        b.iter(|| {
            let best = best_player_per_match(black_box(&dataset.master), &filter);
            black_box(best.len());
        })
    });
}

fn bench_crosstabs(c: &mut Criterion) {
    let dataset = bench_dataset();
    let filter = RecordFilter::all();

    c.bench_function("crosstabs", |b| {
        b.iter(|| {
            let matrix = head_to_head(black_box(&dataset.master));
            let tallies = team_outcomes(black_box(&dataset.outcomes), &filter);
            black_box(matrix.teams().len() + tallies.len());
        })
    });
}

fn bench_team_aggregation(c: &mut Criterion) {
    let dataset = bench_dataset();
    let filter = RecordFilter::all();

    c.bench_function("team_aggregation", |b| {
        b.iter(|| {
            let teams = aggregate_teams(black_box(&dataset.master), &filter);
            black_box(teams.len());
        })
    });
}

fn bench_zone_allocation(c: &mut Criterion) {
    let dataset = bench_dataset();
    let filter = RecordFilter::all();

    c.bench_function("zone_allocation", |b| {
        b.iter(|| {
            let totals = batting_totals(black_box(&dataset.master), &filter);
            let spread = allocate_zones(totals);
            black_box(spread.len());
        })
    });
}

criterion_group!(
    perf,
    bench_master_json_parse,
    bench_player_aggregation,
    bench_leaderboards,
    bench_best_player_scan,
    bench_crosstabs,
    bench_team_aggregation,
    bench_zone_allocation
);
criterion_main!(perf);
