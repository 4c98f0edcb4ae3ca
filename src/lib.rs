// Library interface for pitwall
// The binary and the integration tests both build on these modules

pub mod api;
pub mod browser;
pub mod champions;
pub mod config;
pub mod errors;
pub mod format;
pub mod messages;
pub mod model;
pub mod races;
pub mod ui;

// Re-export commonly used types
pub use api::{F1Api, HttpF1Api};
pub use browser::{FetchOutcome, SeasonBrowser};
pub use champions::{ChampionIndex, SeasonEntry, load_champions};
pub use config::{ApiConfig, AppConfig, Profile};
pub use errors::PitwallError;
pub use model::{Circuit, Constructor, Driver, Race, RaceResult, Season};
pub use races::{RaceList, RaceResultsCache, ToggleOutcome, load_races};
