use serde::{Deserialize, Deserializer, Serialize};

/// One row per player per match from the master table. A player can appear
/// in several rows for the same match (multi-innings encodings), so match
/// counting always goes through the distinct match id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchPlayerRecord {
    #[serde(default)]
    pub player_name: String,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub role: String,
    #[serde(default, deserialize_with = "de_u32_flex")]
    pub season: u32,
    #[serde(default, rename = "match_id_unique")]
    pub match_id: String,
    #[serde(default, deserialize_with = "de_u32_flex")]
    pub runs_scored: u32,
    #[serde(default, deserialize_with = "de_u32_flex")]
    pub balls_faced: u32,
    #[serde(default, deserialize_with = "de_u32_flex")]
    pub fours: u32,
    #[serde(default, deserialize_with = "de_u32_flex")]
    pub sixes: u32,
    #[serde(default, deserialize_with = "de_f64_flex")]
    pub strike_rate: f64,
    #[serde(default)]
    pub out_status: String,
    #[serde(default)]
    pub dismissal_type: String,
    #[serde(default, deserialize_with = "de_f64_flex")]
    pub overs_bowled: f64,
    #[serde(default, deserialize_with = "de_u32_flex")]
    pub runs_conceded: u32,
    #[serde(default, deserialize_with = "de_u32_flex")]
    pub wickets: u32,
    #[serde(default, deserialize_with = "de_u32_flex")]
    pub maidens: u32,
    #[serde(default, deserialize_with = "de_f64_flex")]
    pub economy_rate: f64,
    #[serde(default, deserialize_with = "de_u32_flex")]
    pub catches: u32,
    #[serde(default, deserialize_with = "de_u32_flex")]
    pub run_outs: u32,
    #[serde(default, deserialize_with = "de_u32_flex")]
    pub stumpings: u32,
    #[serde(default)]
    pub batting_team: String,
    #[serde(default)]
    pub opposition: String,
    #[serde(default)]
    pub match_result: String,
    #[serde(default)]
    pub toss_winner: String,
    #[serde(default)]
    pub toss_decision: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub match_date: String,
}

impl MatchPlayerRecord {
    pub fn is_win(&self) -> bool {
        self.match_result == "Win"
    }

    pub fn is_loss(&self) -> bool {
        self.match_result == "Loss"
    }

    pub fn is_tie(&self) -> bool {
        self.match_result == "Tie"
    }

    pub fn is_dismissed(&self) -> bool {
        self.out_status.trim().eq_ignore_ascii_case("yes")
    }
}

/// Precomputed per-team win/loss/tie summary. The upstream export keeps the
/// team column lowercase and capitalizes the rest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamSummaryRecord {
    #[serde(default)]
    pub team: String,
    #[serde(default, rename = "Win", deserialize_with = "de_u32_flex")]
    pub wins: u32,
    #[serde(default, rename = "Loss", deserialize_with = "de_u32_flex")]
    pub losses: u32,
    #[serde(default, rename = "Tie", deserialize_with = "de_u32_flex")]
    pub ties: u32,
    #[serde(default, rename = "Total", deserialize_with = "de_u32_flex")]
    pub total: u32,
    #[serde(default, rename = "Win_Rate", deserialize_with = "de_f64_flex")]
    pub win_rate: f64,
    #[serde(default, rename = "Performance")]
    pub performance: String,
}

/// Precomputed "Won Toss" / "Lost Toss" outcome summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TossSummaryRecord {
    #[serde(default, rename = "Toss_Status")]
    pub toss_status: String,
    #[serde(default, rename = "Total_Matches", deserialize_with = "de_u32_flex")]
    pub total_matches: u32,
    #[serde(default, rename = "Wins", deserialize_with = "de_u32_flex")]
    pub wins: u32,
    #[serde(default, rename = "Losses", deserialize_with = "de_u32_flex")]
    pub losses: u32,
    #[serde(default, rename = "Ties", deserialize_with = "de_u32_flex")]
    pub ties: u32,
    #[serde(default, rename = "Win_Rate", deserialize_with = "de_f64_flex")]
    pub win_rate: f64,
}

/// One row per team per match: each physical match shows up twice, once per
/// perspective. Outcome flags are mutually exclusive 0/1 so tallies are
/// plain sums.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchOutcomeRecord {
    #[serde(default, rename = "match_id_unique")]
    pub match_id: String,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub opposition: String,
    #[serde(default)]
    pub match_result: String,
    #[serde(default)]
    pub match_date: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default, deserialize_with = "de_u32_flex")]
    pub season: u32,
    #[serde(default)]
    pub toss_winner: String,
    #[serde(default)]
    pub toss_decision: String,
    #[serde(default, deserialize_with = "de_u32_flex")]
    pub won: u32,
    #[serde(default, deserialize_with = "de_u32_flex")]
    pub lost: u32,
    #[serde(default, deserialize_with = "de_u32_flex")]
    pub tied: u32,
    #[serde(default, deserialize_with = "de_u32_flex")]
    pub toss_won: u32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Num(f64),
    Text(String),
    Null(()),
}

/// Lenient u32 field: accepts numbers, numeric strings (commas stripped),
/// and anything else as 0. Negative values clamp to 0.
pub fn de_u32_flex<'de, D>(de: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(flex_value(de).map(|n| n.max(0.0) as u32).unwrap_or(0))
}

/// Lenient f64 field with the same tolerance as [`de_u32_flex`].
pub fn de_f64_flex<'de, D>(de: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(flex_value(de).unwrap_or(0.0))
}

fn flex_value<'de, D>(de: D) -> Option<f64>
where
    D: Deserializer<'de>,
{
    match RawNumber::deserialize(de) {
        Ok(RawNumber::Num(n)) if n.is_finite() => Some(n),
        Ok(RawNumber::Text(s)) => parse_number(&s),
        _ => None,
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() || s == "-" {
        return None;
    }
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-' || *c == ',')
        .collect();
    let cleaned = cleaned.replace(',', "");
    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_number_strips_decorations() {
        assert_eq!(parse_number("1,234"), Some(1234.0));
        assert_eq!(parse_number(" 42 "), Some(42.0));
        assert_eq!(parse_number("7.5*"), Some(7.5));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("abc"), None);
    }

    #[test]
    fn flex_fields_accept_numbers_and_strings() {
        let row: MatchPlayerRecord = serde_json::from_str(
            r#"{
                "player_name": "Karan KC",
                "match_id_unique": "2024_M01",
                "runs_scored": "34",
                "balls_faced": 21,
                "fours": "",
                "wickets": "n/a",
                "overs_bowled": "3.5",
                "runs_conceded": "1,002"
            }"#,
        )
        .unwrap();
        assert_eq!(row.runs_scored, 34);
        assert_eq!(row.balls_faced, 21);
        assert_eq!(row.fours, 0);
        assert_eq!(row.wickets, 0);
        assert_eq!(row.overs_bowled, 3.5);
        assert_eq!(row.runs_conceded, 1002);
    }

    #[test]
    fn flex_fields_default_missing_and_null() {
        let row: MatchPlayerRecord =
            serde_json::from_str(r#"{"player_name": "P", "season": null}"#).unwrap();
        assert_eq!(row.season, 0);
        assert_eq!(row.runs_scored, 0);
        assert_eq!(row.match_id, "");
    }

    #[test]
    fn negative_counts_clamp_to_zero() {
        let row: MatchPlayerRecord =
            serde_json::from_str(r#"{"player_name": "P", "runs_scored": -3}"#).unwrap();
        assert_eq!(row.runs_scored, 0);
    }

    #[test]
    fn dismissal_flag_reads_out_status() {
        let mut row = MatchPlayerRecord::default();
        assert!(!row.is_dismissed());
        row.out_status = "Yes".to_string();
        assert!(row.is_dismissed());
        row.out_status = " yes ".to_string();
        assert!(row.is_dismissed());
        row.out_status = "Not Out".to_string();
        assert!(!row.is_dismissed());
    }

    #[test]
    fn summary_rows_use_upstream_headers() {
        let row: TeamSummaryRecord = serde_json::from_str(
            r#"{"team": "Janakpur Bolts (NPL)", "Win": 9, "Loss": "3", "Tie": 0,
                "Total": 12, "Win_Rate": "75.0", "Performance": "Excellent"}"#,
        )
        .unwrap();
        assert_eq!(row.wins, 9);
        assert_eq!(row.losses, 3);
        assert_eq!(row.total, 12);
        assert_eq!(row.win_rate, 75.0);
    }
}
