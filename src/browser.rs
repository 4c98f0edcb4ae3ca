use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use log::{debug, error, warn};
use tokio::runtime::Runtime;

use crate::PitwallError;
use crate::api::F1Api;
use crate::champions::{self, ChampionIndex, SeasonEntry};
use crate::messages;
use crate::model::{Driver, Race, Season};
use crate::races::{self, RaceList, RaceResultsCache, ToggleOutcome};

const FETCH_WORKER_THREADS: usize = 2;

/// Called from the fetch workers whenever an outcome is ready to be polled.
pub type ChangeNotifier = Arc<dyn Fn() + Send + Sync>;

/// Result of a background fetch, applied by [`SeasonBrowser::poll`].
#[derive(Debug)]
pub enum FetchOutcome {
    Champions(Result<ChampionIndex, PitwallError>),
    Races {
        season: Season,
        result: Result<Vec<Race>, PitwallError>,
    },
}

/// Delivers exactly one outcome per fetch. If the fetch task never completes
/// (panic or runtime shutdown) the fallback failure is delivered on drop.
struct OutcomeGuard {
    sender: Sender<FetchOutcome>,
    fallback: Option<FetchOutcome>,
    notifier: Option<ChangeNotifier>,
}

impl OutcomeGuard {
    fn new(
        sender: Sender<FetchOutcome>,
        fallback: FetchOutcome,
        notifier: Option<ChangeNotifier>,
    ) -> Self {
        Self {
            sender,
            fallback: Some(fallback),
            notifier,
        }
    }

    fn complete(mut self, outcome: FetchOutcome) {
        self.fallback = None;
        self.deliver(outcome);
    }

    fn deliver(&self, outcome: FetchOutcome) {
        // the browser is gone, nobody is left to show the result
        if self.sender.send(outcome).is_err() {
            debug!("Discarding fetch outcome, browser was dropped");
            return;
        }
        if let Some(notify) = &self.notifier {
            notify();
        }
    }
}

impl Drop for OutcomeGuard {
    fn drop(&mut self) {
        if let Some(fallback) = self.fallback.take() {
            warn!("Fetch ended without a result, reporting failure");
            self.deliver(fallback);
        }
    }
}

/// View-model for the season list.
///
/// Owns the champions index and the race results cache. Fetches run on a
/// small background runtime and their outcomes are applied when the view
/// calls [`SeasonBrowser::poll`], so all state changes happen on the owner's
/// thread.
pub struct SeasonBrowser {
    api: Arc<dyn F1Api>,
    runtime: Runtime,
    sender: Sender<FetchOutcome>,
    receiver: Receiver<FetchOutcome>,
    notifier: Option<ChangeNotifier>,
    index: ChampionIndex,
    races: RaceResultsCache,
    mounted: bool,
    loading: bool,
    error: Option<String>,
}

impl SeasonBrowser {
    pub fn new(api: Arc<dyn F1Api>) -> Result<Self, PitwallError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(FETCH_WORKER_THREADS)
            .thread_name("pitwall-fetch")
            .enable_all()
            .build()
            .map_err(|e| PitwallError::RuntimeError { source: e })?;
        let (sender, receiver) = mpsc::channel();

        Ok(Self {
            api,
            runtime,
            sender,
            receiver,
            notifier: None,
            index: ChampionIndex::default(),
            races: RaceResultsCache::new(),
            mounted: false,
            loading: false,
            error: None,
        })
    }

    /// Installs a callback fired after each fetch completes, e.g. to wake up
    /// a GUI event loop.
    pub fn with_notifier(mut self, notifier: ChangeNotifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Starts loading the champions index. Only the first call fetches.
    pub fn mount(&mut self) {
        if self.mounted {
            debug!("Season browser already mounted");
            return;
        }
        self.mounted = true;
        self.loading = true;
        self.error = None;

        let api = Arc::clone(&self.api);
        let guard = OutcomeGuard::new(
            self.sender.clone(),
            FetchOutcome::Champions(Err(PitwallError::FetchAborted {
                scope: "champions".to_string(),
            })),
            self.notifier.clone(),
        );
        self.runtime.spawn(async move {
            let result = champions::load_champions(api.as_ref()).await;
            guard.complete(FetchOutcome::Champions(result));
        });
    }

    /// Expands or collapses a season, fetching its races on first expansion.
    pub fn toggle_race_list(&mut self, season: Season) {
        if !self.index.contains(season) {
            warn!("Ignoring toggle for unknown season {}", season);
            return;
        }
        if self.races.toggle(season) == ToggleOutcome::FetchRequired {
            self.spawn_races(season);
        }
    }

    fn spawn_races(&self, season: Season) {
        debug!("Fetching races for {}", season);
        let api = Arc::clone(&self.api);
        let guard = OutcomeGuard::new(
            self.sender.clone(),
            FetchOutcome::Races {
                season,
                result: Err(PitwallError::FetchAborted {
                    scope: format!("races of {season}"),
                }),
            },
            self.notifier.clone(),
        );
        self.runtime.spawn(async move {
            let result = races::load_races(api.as_ref(), season).await;
            guard.complete(FetchOutcome::Races { season, result });
        });
    }

    /// Applies every outcome that has arrived so far without blocking.
    /// Returns how many were applied.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(outcome) = self.receiver.try_recv() {
            self.apply(outcome);
            applied += 1;
        }
        applied
    }

    /// Blocks until no fetch is outstanding or `timeout` elapses. Returns
    /// whether the browser went idle.
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.is_busy() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok(outcome) => self.apply(outcome),
                Err(RecvTimeoutError::Timeout) => return false,
                // unreachable while we hold a sender
                Err(RecvTimeoutError::Disconnected) => return false,
            }
        }
        true
    }

    fn apply(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Champions(result) => {
                self.loading = false;
                match result {
                    Ok(index) => self.index = index,
                    Err(e) => {
                        error!("Error loading champions: {}", e);
                        self.error = Some(messages::ERROR_LOAD_CHAMPIONS.to_string());
                    }
                }
            }
            FetchOutcome::Races { season, result } => self.races.store(season, result),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.loading || self.races.has_pending_fetches()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn index(&self) -> &ChampionIndex {
        &self.index
    }

    pub fn seasons(&self) -> Vec<Season> {
        self.index.seasons()
    }

    pub fn entries(&self) -> Vec<SeasonEntry<'_>> {
        self.index.entries()
    }

    pub fn champion(&self, season: Season) -> Option<&Driver> {
        self.index.champion(season)
    }

    pub fn is_expanded(&self, season: Season) -> bool {
        self.races.is_expanded(season)
    }

    pub fn races_for(&self, season: Season) -> RaceList<'_> {
        self.races.races_for(season)
    }

    pub fn is_champion_winner(&self, season: Season, driver_id: &str) -> bool {
        self.index.is_champion(season, driver_id)
    }

    pub fn is_race_won_by_champion(&self, season: Season, race: &Race) -> bool {
        self.index.is_champion_winner(season, race)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChampionRecord, RaceRecord};
    use async_trait::async_trait;

    struct PanickingApi;

    #[async_trait]
    impl F1Api for PanickingApi {
        async fn champions(&self) -> Result<Vec<ChampionRecord>, PitwallError> {
            panic!("backend exploded");
        }

        async fn races(&self, _season: Season) -> Result<Vec<RaceRecord>, PitwallError> {
            panic!("backend exploded");
        }
    }

    #[test]
    fn test_panicking_fetch_still_clears_loading() {
        let mut browser = SeasonBrowser::new(Arc::new(PanickingApi)).unwrap();
        browser.mount();
        assert!(browser.is_loading());

        assert!(browser.wait_idle(Duration::from_secs(5)));
        assert!(!browser.is_loading());
        assert_eq!(browser.error(), Some(messages::ERROR_LOAD_CHAMPIONS));
        assert!(browser.seasons().is_empty());
    }

    #[test]
    fn test_guard_delivers_fallback_on_drop() {
        let (sender, receiver) = mpsc::channel();
        let guard = OutcomeGuard::new(
            sender,
            FetchOutcome::Races {
                season: 1999,
                result: Ok(Vec::new()),
            },
            None,
        );
        drop(guard);

        match receiver.try_recv() {
            Ok(FetchOutcome::Races { season, result }) => {
                assert_eq!(season, 1999);
                assert!(result.is_ok());
            }
            other => panic!("Expected fallback outcome, got {:?}", other),
        }
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn test_guard_complete_sends_once() {
        let (sender, receiver) = mpsc::channel();
        let guard = OutcomeGuard::new(
            sender,
            FetchOutcome::Champions(Err(PitwallError::FetchAborted {
                scope: "champions".to_string(),
            })),
            None,
        );
        guard.complete(FetchOutcome::Champions(Ok(ChampionIndex::default())));

        assert!(matches!(
            receiver.try_recv(),
            Ok(FetchOutcome::Champions(Ok(_)))
        ));
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn test_guard_survives_dropped_receiver() {
        let (sender, receiver) = mpsc::channel();
        drop(receiver);
        let guard = OutcomeGuard::new(
            sender,
            FetchOutcome::Champions(Ok(ChampionIndex::default())),
            None,
        );
        guard.complete(FetchOutcome::Champions(Ok(ChampionIndex::default())));
    }
}
