use std::collections::HashMap;

use once_cell::sync::Lazy;

// Both historical spellings of the Kathmandu franchise map to the same
// code.
static TEAM_SHORT_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Biratnagar Kings (NPL)", "BIK"),
        ("Janakpur Bolts (NPL)", "JAB"),
        ("Kathmandu Gurkhas (NPL)", "KAG"),
        ("Kathmandu Gorkhas (NPL)", "KAG"),
        ("Chitwan Rhinos (NPL)", "CHR"),
        ("Karnali Yaks (NPL)", "KAY"),
        ("Lumbini Lions (NPL)", "LUL"),
        ("Pokhara Avengers (NPL)", "POA"),
        ("Sudur Paschim Royals (NPL)", "SPR"),
    ])
});

pub fn team_short_name(team: &str) -> String {
    if let Some(short) = TEAM_SHORT_NAMES.get(team) {
        return (*short).to_string();
    }
    team.chars().take(3).collect::<String>().to_uppercase()
}

pub fn format_number(value: u64) -> String {
    if value >= 1_000_000 {
        format!("{:.1}M", value as f64 / 1_000_000.0)
    } else if value >= 1000 {
        format!("{:.1}K", value as f64 / 1000.0)
    } else {
        value.to_string()
    }
}

pub fn format_percentage(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}%")
}

pub fn win_rate(wins: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(wins) / f64::from(total) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_cover_the_league() {
        assert_eq!(team_short_name("Janakpur Bolts (NPL)"), "JAB");
        assert_eq!(team_short_name("Kathmandu Gorkhas (NPL)"), "KAG");
        assert_eq!(team_short_name("Kathmandu Gurkhas (NPL)"), "KAG");
    }

    #[test]
    fn unknown_teams_fall_back_to_prefix() {
        assert_eq!(team_short_name("Mustang Riders"), "MUS");
        assert_eq!(team_short_name("ab"), "AB");
    }

    #[test]
    fn compact_numbers() {
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1500), "1.5K");
        assert_eq!(format_number(2_300_000), "2.3M");
    }

    #[test]
    fn percentage_respects_decimals() {
        assert_eq!(format_percentage(58.333, 1), "58.3%");
        assert_eq!(format_percentage(100.0, 0), "100%");
    }

    #[test]
    fn win_rate_is_zero_safe() {
        assert_eq!(win_rate(0, 0), 0.0);
        assert_eq!(win_rate(3, 4), 75.0);
    }
}
