// Champions index: which driver won which season

use std::collections::BTreeMap;

use log::{debug, info};

use crate::PitwallError;
use crate::api::F1Api;
use crate::model::{ChampionRecord, Driver, Race, Season};

/// Season to champion lookup, built once from the champions endpoint.
///
/// The season following the newest recorded champion is considered in
/// progress and is listed first by [`ChampionIndex::seasons`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChampionIndex {
    champions: BTreeMap<Season, Driver>,
}

/// A season as the views list it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SeasonEntry<'a> {
    Current { year: Season },
    Completed { year: Season, champion: &'a Driver },
}

impl SeasonEntry<'_> {
    pub fn year(&self) -> Season {
        match self {
            Self::Current { year } | Self::Completed { year, .. } => *year,
        }
    }
}

impl ChampionIndex {
    /// Builds the index from backend records. A repeated year keeps the last
    /// record seen.
    pub fn from_records(records: impl IntoIterator<Item = ChampionRecord>) -> Self {
        let champions = records
            .into_iter()
            .map(|record| (record.year, record.driver))
            .collect();
        Self { champions }
    }

    pub fn is_empty(&self) -> bool {
        self.champions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.champions.len()
    }

    pub fn champion(&self, season: Season) -> Option<&Driver> {
        self.champions.get(&season)
    }

    /// The season after the newest one with a champion. There is none when
    /// the newest year is the last representable one.
    pub fn current_year(&self) -> Option<Season> {
        self.champions
            .keys()
            .next_back()
            .and_then(|year| year.checked_add(1))
    }

    pub fn is_current(&self, season: Season) -> bool {
        self.current_year() == Some(season)
    }

    /// Whether `season` is listed, either completed or in progress.
    pub fn contains(&self, season: Season) -> bool {
        self.is_current(season) || self.champions.contains_key(&season)
    }

    /// All seasons, newest first, starting with the season in progress.
    pub fn seasons(&self) -> Vec<Season> {
        self.current_year()
            .into_iter()
            .chain(self.champions.keys().rev().copied())
            .collect()
    }

    pub fn entries(&self) -> Vec<SeasonEntry<'_>> {
        self.current_year()
            .map(|year| SeasonEntry::Current { year })
            .into_iter()
            .chain(
                self.champions
                    .iter()
                    .rev()
                    .map(|(year, champion)| SeasonEntry::Completed {
                        year: *year,
                        champion,
                    }),
            )
            .collect()
    }

    /// Whether `driver_id` is the recorded champion of `season`.
    pub fn is_champion(&self, season: Season, driver_id: &str) -> bool {
        self.champion(season)
            .is_some_and(|champion| champion.driver_id == driver_id)
    }

    /// Whether `race` was won by the champion of `season`. Missing champion
    /// or missing winner both count as no.
    pub fn is_champion_winner(&self, season: Season, race: &Race) -> bool {
        race.winner
            .as_ref()
            .is_some_and(|winner| self.is_champion(season, &winner.driver_id))
    }
}

/// Fetches the champions endpoint and builds the index.
pub async fn load_champions(api: &dyn F1Api) -> Result<ChampionIndex, PitwallError> {
    let records = api.champions().await?;
    debug!("Received {} champion records", records.len());
    let index = ChampionIndex::from_records(records);
    info!(
        "Loaded {} champions, current season {:?}",
        index.len(),
        index.current_year()
    );
    Ok(index)
}
