use std::fmt::Write;

use itertools::Itertools;

use crate::browser::SeasonBrowser;
use crate::champions::SeasonEntry;
use crate::format::{format_race_date, nationality_flag};
use crate::messages;
use crate::model::{Driver, Race, Season};
use crate::races::RaceList;

const CHAMPION_MARK: &str = "★";

fn flagged(name: &str, nationality: Option<&str>) -> String {
    match nationality.and_then(nationality_flag) {
        Some(flag) => format!("{flag} {name}"),
        None => name.to_string(),
    }
}

fn driver_label(driver: &Driver) -> String {
    flagged(&driver.display_name(), driver.nationality.as_deref())
}

fn race_line(browser: &SeasonBrowser, season: Season, race: &Race) -> String {
    let winner = race
        .winner
        .as_ref()
        .map(driver_label)
        .unwrap_or_else(|| "-".to_string());
    let constructor = race
        .constructor
        .as_ref()
        .map(|c| c.name.as_str())
        .unwrap_or("-");
    let mark = if browser.is_race_won_by_champion(season, race) {
        CHAMPION_MARK
    } else {
        ""
    };
    format!(
        "    R{:<3} {:<7} {:<32} {:<28} {:<20} {}",
        race.round,
        format_race_date(race.date.as_deref()),
        race.race_name,
        winner,
        constructor,
        mark
    )
    .trim_end()
    .to_string()
}

fn race_panel(browser: &SeasonBrowser, season: Season) -> Vec<String> {
    match browser.races_for(season) {
        RaceList::NotRequested => Vec::new(),
        RaceList::Pending => vec![format!("    {}", messages::loading_race_data(season))],
        RaceList::Empty => vec![format!("    {}", messages::no_race_data(season))],
        RaceList::Loaded(races) => races
            .iter()
            .map(|race| race_line(browser, season, race))
            .collect(),
    }
}

fn season_block(browser: &SeasonBrowser, entry: &SeasonEntry<'_>) -> String {
    let mut lines = match entry {
        SeasonEntry::Current { year } => vec![
            format!("{year}  {}  [{}]", messages::SEASON_IN_PROGRESS, messages::ONGOING),
            format!("      {}", messages::CHAMPION_TO_BE_DETERMINED),
        ],
        SeasonEntry::Completed { year, champion } => vec![format!(
            "{year}  {}  ({})",
            driver_label(champion),
            messages::WORLD_CHAMPION
        )],
    };
    if browser.is_expanded(entry.year()) {
        lines.extend(race_panel(browser, entry.year()));
    }
    lines.join("\n")
}

/// Renders the season list as plain text for terminal output.
pub fn render_season_list(browser: &SeasonBrowser) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", messages::APP_TITLE);
    let _ = writeln!(out, "{}", "=".repeat(messages::APP_TITLE.len()));

    if browser.is_loading() {
        let _ = writeln!(out, "{}", messages::LOADING_SEASONS);
        return out;
    }
    if let Some(error) = browser.error() {
        let _ = writeln!(out, "{error}");
        return out;
    }

    let body = browser
        .entries()
        .iter()
        .map(|entry| season_block(browser, entry))
        .join("\n");
    let _ = writeln!(out, "{body}");
    out
}
