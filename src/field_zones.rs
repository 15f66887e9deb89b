use std::collections::HashSet;

use serde::Serialize;

use crate::filters::RecordFilter;
use crate::records::MatchPlayerRecord;

/// The twelve field zones in their fixed clockwise order. Every weight
/// table below is indexed by this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Zone {
    ThirdMan,
    Point,
    Cover,
    ExtraCover,
    MidOff,
    LongOff,
    LongOn,
    MidOn,
    MidWicket,
    SquareLeg,
    FineLeg,
    LegSlip,
}

pub const ZONES: [Zone; 12] = [
    Zone::ThirdMan,
    Zone::Point,
    Zone::Cover,
    Zone::ExtraCover,
    Zone::MidOff,
    Zone::LongOff,
    Zone::LongOn,
    Zone::MidOn,
    Zone::MidWicket,
    Zone::SquareLeg,
    Zone::FineLeg,
    Zone::LegSlip,
];

impl Zone {
    pub fn name(self) -> &'static str {
        match self {
            Zone::ThirdMan => "third_man",
            Zone::Point => "point",
            Zone::Cover => "cover",
            Zone::ExtraCover => "extra_cover",
            Zone::MidOff => "mid_off",
            Zone::LongOff => "long_off",
            Zone::LongOn => "long_on",
            Zone::MidOn => "mid_on",
            Zone::MidWicket => "mid_wicket",
            Zone::SquareLeg => "square_leg",
            Zone::FineLeg => "fine_leg",
            Zone::LegSlip => "leg_slip",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Zone::ThirdMan => "Third Man",
            Zone::Point => "Point",
            Zone::Cover => "Cover",
            Zone::ExtraCover => "Extra Cover",
            Zone::MidOff => "Mid Off",
            Zone::LongOff => "Long Off",
            Zone::LongOn => "Long On",
            Zone::MidOn => "Mid On",
            Zone::MidWicket => "Mid Wicket",
            Zone::SquareLeg => "Square Leg",
            Zone::FineLeg => "Fine Leg",
            Zone::LegSlip => "Leg Slip",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ZoneMetric {
    Runs,
    Fours,
    Sixes,
    Dismissals,
}

pub const METRICS: [ZoneMetric; 4] = [
    ZoneMetric::Runs,
    ZoneMetric::Fours,
    ZoneMetric::Sixes,
    ZoneMetric::Dismissals,
];

// Static shares per metric. No ball-tracking data exists for this league,
// so the heatmap is a fixed plausible spread of each total, not observed
// placement. Each table sums to 1.0 over the twelve zones.
const RUN_WEIGHTS: [f64; 12] = [
    0.05, 0.08, 0.15, 0.12, 0.08, 0.12, 0.10, 0.08, 0.10, 0.06, 0.04, 0.02,
];
const FOUR_WEIGHTS: [f64; 12] = [
    0.08, 0.12, 0.18, 0.10, 0.06, 0.08, 0.08, 0.06, 0.10, 0.08, 0.04, 0.02,
];
const SIX_WEIGHTS: [f64; 12] = [
    0.02, 0.02, 0.08, 0.10, 0.12, 0.20, 0.18, 0.10, 0.12, 0.04, 0.02, 0.00,
];
const DISMISSAL_WEIGHTS: [f64; 12] = [
    0.05, 0.15, 0.20, 0.12, 0.10, 0.08, 0.08, 0.08, 0.08, 0.04, 0.02, 0.00,
];

fn weights(metric: ZoneMetric) -> &'static [f64; 12] {
    match metric {
        ZoneMetric::Runs => &RUN_WEIGHTS,
        ZoneMetric::Fours => &FOUR_WEIGHTS,
        ZoneMetric::Sixes => &SIX_WEIGHTS,
        ZoneMetric::Dismissals => &DISMISSAL_WEIGHTS,
    }
}

pub fn zone_weight(zone: Zone, metric: ZoneMetric) -> f64 {
    weights(metric)[zone.index()]
}

/// Batting totals for whatever scope the filter selects, the inputs to the
/// zone spread.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct BattingTotals {
    pub runs: u64,
    pub fours: u64,
    pub sixes: u64,
    pub dismissals: u64,
    pub players: usize,
}

pub fn batting_totals(rows: &[MatchPlayerRecord], filter: &RecordFilter) -> BattingTotals {
    let mut totals = BattingTotals::default();
    let mut players = HashSet::new();
    for row in rows.iter().filter(|r| filter.matches(r)) {
        totals.runs += u64::from(row.runs_scored);
        totals.fours += u64::from(row.fours);
        totals.sixes += u64::from(row.sixes);
        if row.is_dismissed() {
            totals.dismissals += 1;
        }
        players.insert(row.player_name.as_str());
    }
    totals.players = players.len();
    totals
}

#[derive(Debug, Clone, Serialize)]
pub struct ZoneAllocation {
    pub zone: Zone,
    pub runs: u64,
    pub fours: u64,
    pub sixes: u64,
    pub dismissals: u64,
}

impl ZoneAllocation {
    pub fn value(&self, metric: ZoneMetric) -> u64 {
        match metric {
            ZoneMetric::Runs => self.runs,
            ZoneMetric::Fours => self.fours,
            ZoneMetric::Sixes => self.sixes,
            ZoneMetric::Dismissals => self.dismissals,
        }
    }
}

fn share(total: u64, weight: f64) -> u64 {
    (total as f64 * weight).round() as u64
}

/// Spread the aggregate totals over all twelve zones. Zone shares round
/// independently, so the recombined sum can drift from the input total by
/// a few units; that drift is accepted, not corrected.
pub fn allocate_zones(totals: BattingTotals) -> Vec<ZoneAllocation> {
    ZONES
        .iter()
        .map(|&zone| ZoneAllocation {
            zone,
            runs: share(totals.runs, zone_weight(zone, ZoneMetric::Runs)),
            fours: share(totals.fours, zone_weight(zone, ZoneMetric::Fours)),
            sixes: share(totals.sixes, zone_weight(zone, ZoneMetric::Sixes)),
            dismissals: share(totals.dismissals, zone_weight(zone, ZoneMetric::Dismissals)),
        })
        .collect()
}

pub fn zone_value(allocations: &[ZoneAllocation], zone: Zone, metric: ZoneMetric) -> u64 {
    allocations
        .iter()
        .find(|a| a.zone == zone)
        .map(|a| a.value(metric))
        .unwrap_or(0)
}

/// Zone holding the metric's maximum; ties go to the earlier zone in the
/// fixed order.
pub fn max_zone(allocations: &[ZoneAllocation], metric: ZoneMetric) -> Option<Zone> {
    let mut best: Option<(&ZoneAllocation, u64)> = None;
    for allocation in allocations {
        let value = allocation.value(metric);
        if best.is_none_or(|(_, top)| value > top) {
            best = Some((allocation, value));
        }
    }
    best.map(|(a, _)| a.zone)
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ZoneInsights {
    pub strongest: Zone,
    pub best_six_zone: Zone,
    pub danger_zone: Zone,
}

pub fn zone_insights(allocations: &[ZoneAllocation]) -> Option<ZoneInsights> {
    Some(ZoneInsights {
        strongest: max_zone(allocations, ZoneMetric::Runs)?,
        best_six_zone: max_zone(allocations, ZoneMetric::Sixes)?,
        danger_zone: max_zone(allocations, ZoneMetric::Dismissals)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_tables_sum_to_one() {
        for metric in METRICS {
            let sum: f64 = ZONES.iter().map(|&z| zone_weight(z, metric)).sum();
            assert!(
                (sum - 1.0).abs() < 0.01,
                "weights for {metric:?} sum to {sum}"
            );
        }
    }

    #[test]
    fn allocation_is_deterministic_and_rounded() {
        let totals = BattingTotals {
            runs: 1000,
            fours: 100,
            sixes: 50,
            dismissals: 20,
            players: 7,
        };
        let first = allocate_zones(totals);
        let second = allocate_zones(totals);
        assert_eq!(first.len(), 12);
        assert_eq!(zone_value(&first, Zone::Cover, ZoneMetric::Runs), 150);
        assert_eq!(zone_value(&first, Zone::LongOff, ZoneMetric::Sixes), 10);
        assert_eq!(zone_value(&first, Zone::LegSlip, ZoneMetric::Sixes), 0);
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.runs, b.runs);
            assert_eq!(a.dismissals, b.dismissals);
        }
    }

    #[test]
    fn recombined_runs_stay_close_to_total() {
        let totals = BattingTotals {
            runs: 997,
            ..BattingTotals::default()
        };
        let spread = allocate_zones(totals);
        let sum: u64 = spread.iter().map(|a| a.runs).sum();
        assert!(sum.abs_diff(997) <= 6);
    }

    #[test]
    fn batting_totals_count_dismissals_and_players() {
        let mut a = MatchPlayerRecord {
            player_name: "A".to_string(),
            match_id: "M1".to_string(),
            runs_scored: 30,
            fours: 2,
            sixes: 1,
            ..MatchPlayerRecord::default()
        };
        a.out_status = "Yes".to_string();
        let b = MatchPlayerRecord {
            player_name: "A".to_string(),
            match_id: "M2".to_string(),
            runs_scored: 10,
            out_status: "Not Out".to_string(),
            ..MatchPlayerRecord::default()
        };
        let totals = batting_totals(&[a, b], &RecordFilter::all());
        assert_eq!(totals.runs, 40);
        assert_eq!(totals.dismissals, 1);
        assert_eq!(totals.players, 1);
    }

    #[test]
    fn insights_pick_the_heaviest_zones() {
        let totals = BattingTotals {
            runs: 1000,
            fours: 100,
            sixes: 100,
            dismissals: 100,
            players: 5,
        };
        let spread = allocate_zones(totals);
        let insights = zone_insights(&spread).unwrap();
        assert_eq!(insights.strongest, Zone::Cover);
        assert_eq!(insights.best_six_zone, Zone::LongOff);
        assert_eq!(insights.danger_zone, Zone::Cover);
    }

    #[test]
    fn empty_allocation_has_no_insights() {
        assert!(zone_insights(&[]).is_none());
        assert_eq!(max_zone(&[], ZoneMetric::Runs), None);
        assert_eq!(zone_value(&[], Zone::Point, ZoneMetric::Fours), 0);
    }

    #[test]
    fn zero_totals_allocate_zeros() {
        let spread = allocate_zones(BattingTotals::default());
        assert!(spread.iter().all(|a| a.value(ZoneMetric::Runs) == 0));
        // Argmax over an all-zero board still answers with the first zone.
        assert_eq!(max_zone(&spread, ZoneMetric::Runs), Some(Zone::ThirdMan));
    }

    #[test]
    fn zone_names_match_the_fixed_layout() {
        assert_eq!(Zone::ThirdMan.name(), "third_man");
        assert_eq!(Zone::ExtraCover.display_name(), "Extra Cover");
        assert_eq!(ZONES.len(), 12);
    }
}
