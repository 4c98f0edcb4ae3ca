// Fixed user-facing strings shared by the GUI and the terminal output

use crate::model::Season;

pub const APP_TITLE: &str = "F1 World Champions";

pub const LOADING_SEASONS: &str = "Loading seasons...";
pub const ERROR_LOAD_CHAMPIONS: &str = "Error loading F1 World Champions";

pub const SEASON_IN_PROGRESS: &str = "SEASON IN PROGRESS";
pub const ONGOING: &str = "ONGOING";
pub const CHAMPIONSHIP_ONGOING: &str = "Championship Ongoing";
pub const CHAMPION_TO_BE_DETERMINED: &str = "Champion to be determined";
pub const VIEW_RACE_WINNERS: &str = "View Race Winners";
pub const HIDE_RACE_WINNERS: &str = "Hide Race Winners";
pub const WORLD_CHAMPION: &str = "World Champion";
pub const CHAMPION_WIN: &str = "Champion win";

pub fn loading_race_data(season: Season) -> String {
    format!("Loading race data for {season}")
}

pub fn no_race_data(season: Season) -> String {
    format!("No race data available for {season}")
}

pub fn toggle_race_list(season: Season) -> String {
    format!("Toggle race list for {season} season")
}
