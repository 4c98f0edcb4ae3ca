// Per-season race results, fetched lazily when a season is expanded

use std::collections::{HashMap, HashSet};

use log::{debug, error, info};

use crate::PitwallError;
use crate::api::F1Api;
use crate::model::{Race, Season};

/// What the views can show for a season's race panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RaceList<'a> {
    /// Never expanded, nothing requested yet
    NotRequested,
    Pending,
    /// Fetched, but no races (or the fetch failed)
    Empty,
    Loaded(&'a [Race]),
}

/// Result of flipping a season's expansion.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    Collapsed,
    Expanded,
    /// Expanded with nothing cached or in flight, the caller has to fetch
    FetchRequired,
}

/// Expansion flags and cached race lists, keyed by season.
///
/// A season's races are requested at most once: a fetch is only asked for
/// when nothing is in flight and nothing is cached, and a failed fetch is
/// cached as an empty list.
#[derive(Debug, Default)]
pub struct RaceResultsCache {
    races: HashMap<Season, Vec<Race>>,
    expanded: HashMap<Season, bool>,
    in_flight: HashSet<Season>,
}

impl RaceResultsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, season: Season) -> ToggleOutcome {
        let expanded = !self.is_expanded(season);
        self.expanded.insert(season, expanded);

        if !expanded {
            return ToggleOutcome::Collapsed;
        }
        if self.in_flight.contains(&season) {
            debug!("Races for {} already being fetched", season);
            return ToggleOutcome::Expanded;
        }
        if self.races.contains_key(&season) {
            debug!("Races for {} served from cache", season);
            return ToggleOutcome::Expanded;
        }
        self.in_flight.insert(season);
        ToggleOutcome::FetchRequired
    }

    pub fn is_expanded(&self, season: Season) -> bool {
        self.expanded.get(&season).copied().unwrap_or(false)
    }

    pub fn is_in_flight(&self, season: Season) -> bool {
        self.in_flight.contains(&season)
    }

    pub fn has_pending_fetches(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn races_for(&self, season: Season) -> RaceList<'_> {
        match self.races.get(&season) {
            Some(races) if races.is_empty() => RaceList::Empty,
            Some(races) => RaceList::Loaded(races),
            None if self.in_flight.contains(&season) => RaceList::Pending,
            None => RaceList::NotRequested,
        }
    }

    /// Records the outcome of a fetch. Failures are logged and cached as an
    /// empty list so the season is not fetched again.
    pub fn store(&mut self, season: Season, result: Result<Vec<Race>, PitwallError>) {
        self.in_flight.remove(&season);
        let races = match result {
            Ok(races) => {
                info!("Loaded {} races for {}", races.len(), season);
                races
            }
            Err(e) => {
                error!("Error loading races for {}: {}", season, e);
                Vec::new()
            }
        };
        self.races.insert(season, races);
    }
}

/// Fetches the races of `season` and resolves each race's winner.
pub async fn load_races(api: &dyn F1Api, season: Season) -> Result<Vec<Race>, PitwallError> {
    let records = api.races(season).await?;
    Ok(records.into_iter().map(Race::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{constructor, driver, race_record, result};

    fn races(season: Season, count: u32) -> Vec<Race> {
        (1..=count)
            .map(|round| {
                Race::from(race_record(
                    season,
                    round,
                    vec![result(
                        driver("alonso", "Fernando", "Alonso"),
                        constructor("renault", "Renault"),
                        "1",
                    )],
                ))
            })
            .collect()
    }

    #[test]
    fn test_first_expand_requires_fetch() {
        let mut cache = RaceResultsCache::new();
        assert_eq!(cache.races_for(2005), RaceList::NotRequested);

        assert_eq!(cache.toggle(2005), ToggleOutcome::FetchRequired);
        assert!(cache.is_expanded(2005));
        assert!(cache.is_in_flight(2005));
        assert_eq!(cache.races_for(2005), RaceList::Pending);
    }

    #[test]
    fn test_toggle_cycle_fetches_once() {
        let mut cache = RaceResultsCache::new();

        assert_eq!(cache.toggle(2005), ToggleOutcome::FetchRequired);
        cache.store(2005, Ok(races(2005, 19)));
        assert_eq!(cache.toggle(2005), ToggleOutcome::Collapsed);
        assert!(!cache.is_expanded(2005));
        assert_eq!(cache.toggle(2005), ToggleOutcome::Expanded);
        assert!(cache.is_expanded(2005));

        match cache.races_for(2005) {
            RaceList::Loaded(list) => assert_eq!(list.len(), 19),
            other => panic!("Expected loaded races, got {:?}", other),
        }
    }

    #[test]
    fn test_reexpand_while_in_flight_does_not_refetch() {
        let mut cache = RaceResultsCache::new();

        assert_eq!(cache.toggle(2010), ToggleOutcome::FetchRequired);
        assert_eq!(cache.toggle(2010), ToggleOutcome::Collapsed);
        assert_eq!(cache.toggle(2010), ToggleOutcome::Expanded);
        assert_eq!(cache.races_for(2010), RaceList::Pending);

        cache.store(2010, Ok(races(2010, 2)));
        assert!(!cache.has_pending_fetches());
        assert!(matches!(cache.races_for(2010), RaceList::Loaded(_)));
    }

    #[test]
    fn test_failure_caches_empty_and_stays_expanded() {
        let mut cache = RaceResultsCache::new();

        assert_eq!(cache.toggle(2021), ToggleOutcome::FetchRequired);
        cache.store(
            2021,
            Err(PitwallError::UnexpectedStatus {
                url: "http://localhost/races/2021".to_string(),
                status: 500,
            }),
        );

        assert!(cache.is_expanded(2021));
        assert_eq!(cache.races_for(2021), RaceList::Empty);
        assert!(!cache.is_in_flight(2021));

        // an empty cache entry still counts as cached
        assert_eq!(cache.toggle(2021), ToggleOutcome::Collapsed);
        assert_eq!(cache.toggle(2021), ToggleOutcome::Expanded);
    }

    #[test]
    fn test_last_resolved_wins() {
        let mut cache = RaceResultsCache::new();
        cache.store(2012, Ok(races(2012, 3)));
        cache.store(2012, Ok(races(2012, 20)));

        match cache.races_for(2012) {
            RaceList::Loaded(list) => assert_eq!(list.len(), 20),
            other => panic!("Expected loaded races, got {:?}", other),
        }
    }

    #[test]
    fn test_seasons_are_independent() {
        let mut cache = RaceResultsCache::new();
        assert_eq!(cache.toggle(2020), ToggleOutcome::FetchRequired);
        assert_eq!(cache.toggle(2019), ToggleOutcome::FetchRequired);
        cache.store(2020, Err(PitwallError::FetchAborted { scope: "races for 2020".to_string() }));

        assert_eq!(cache.races_for(2020), RaceList::Empty);
        assert_eq!(cache.races_for(2019), RaceList::Pending);
        assert!(cache.is_expanded(2019));
    }
}
