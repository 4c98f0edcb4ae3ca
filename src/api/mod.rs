// Backend access for champions and race results

pub mod http;

use async_trait::async_trait;

use crate::PitwallError;
use crate::model::{ChampionRecord, RaceRecord, Season};

pub use http::HttpF1Api;

/// Source of season data. The HTTP client is the production implementation,
/// tests plug in canned data.
#[async_trait]
pub trait F1Api: Send + Sync {
    /// Every recorded world champion, one entry per season.
    async fn champions(&self) -> Result<Vec<ChampionRecord>, PitwallError>;

    /// All races of `season` with their classification.
    async fn races(&self, season: Season) -> Result<Vec<RaceRecord>, PitwallError>;
}
