// Display helpers: race dates and nationality flags

use chrono::{DateTime, NaiveDate};

pub const INVALID_DATE: &str = "Invalid Date";

/// Formats a race date as a short month and day, e.g. `"Mar 24"`.
///
/// Accepts plain ISO dates (`2024-03-24`) and RFC 3339 timestamps, the
/// latter use the calendar date written in the timestamp. Anything else,
/// including a missing or empty value, gives [`INVALID_DATE`].
pub fn format_race_date(date: Option<&str>) -> String {
    let Some(date) = date.map(str::trim).filter(|d| !d.is_empty()) else {
        return INVALID_DATE.to_string();
    };

    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(date).ok().map(|dt| dt.date_naive()));

    match parsed {
        Some(day) => day.format("%b %-d").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

// demonym -> ISO 3166-1 alpha-2
const NATIONALITY_CODES: &[(&str, &str)] = &[
    ("American", "US"),
    ("Argentine", "AR"),
    ("Argentinian", "AR"),
    ("Australian", "AU"),
    ("Austrian", "AT"),
    ("Belgian", "BE"),
    ("Brazilian", "BR"),
    ("British", "GB"),
    ("Canadian", "CA"),
    ("Chinese", "CN"),
    ("Colombian", "CO"),
    ("Czech", "CZ"),
    ("Danish", "DK"),
    ("Dutch", "NL"),
    ("Finnish", "FI"),
    ("French", "FR"),
    ("German", "DE"),
    ("Hungarian", "HU"),
    ("Indian", "IN"),
    ("Indonesian", "ID"),
    ("Irish", "IE"),
    ("Italian", "IT"),
    ("Japanese", "JP"),
    ("Malaysian", "MY"),
    ("Mexican", "MX"),
    ("Monegasque", "MC"),
    ("New Zealander", "NZ"),
    ("Polish", "PL"),
    ("Portuguese", "PT"),
    ("Russian", "RU"),
    ("South African", "ZA"),
    ("Spanish", "ES"),
    ("Swedish", "SE"),
    ("Swiss", "CH"),
    ("Thai", "TH"),
    ("Venezuelan", "VE"),
];

/// Country code for a nationality as the backend spells it ("Dutch" -> "NL").
pub fn nationality_country_code(nationality: &str) -> Option<&'static str> {
    let nationality = nationality.trim();
    NATIONALITY_CODES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(nationality))
        .map(|(_, code)| *code)
}

/// Flag emoji for a nationality, built from the regional indicator symbols
/// of its country code.
pub fn nationality_flag(nationality: &str) -> Option<String> {
    let code = nationality_country_code(nationality)?;
    code.chars()
        .map(|c| char::from_u32(0x1F1E6 + (c as u32 - 'A' as u32)))
        .collect()
}
