//! Prefix index over station name tokens.
//!
//! Every whitespace-delimited word of every station name is normalized and
//! stored in a sorted map from token to the stations carrying it. A prefix
//! query is a range scan starting at the normalized query and stopping at
//! the first token that no longer starts with it. A query of several words
//! keeps only the stations matched by every word.
//!
//! The index is built lazily on first use. Building is single-flight:
//! concurrent first callers wait for the one in-flight build, and a failed
//! build leaves the index empty so the next caller retries.

use std::collections::{BTreeMap, HashSet};
use std::ops::Bound;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{Mutex, OnceCell};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::normalize::normalize;
use crate::catalog::{CatalogError, StationRecord, StationSource};

/// The built, immutable catalog.
#[derive(Debug)]
struct Catalog {
    /// Stations with a usable name, in source order.
    stations: Vec<StationRecord>,

    /// Normalized token -> positions in `stations`.
    ///
    /// A position appears once per occurrence of the token in the name.
    tokens: BTreeMap<String, Vec<usize>>,
}

impl Catalog {
    /// Build the catalog, dropping stations whose name is blank.
    fn build(loaded: Vec<StationRecord>) -> Self {
        let loaded_count = loaded.len();
        let stations: Vec<StationRecord> = loaded
            .into_iter()
            .filter(|s| !s.name.trim().is_empty())
            .collect();

        let dropped = loaded_count - stations.len();
        if dropped > 0 {
            warn!(dropped, "dropped stations without a name");
        }

        let mut tokens: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (position, station) in stations.iter().enumerate() {
            for token in station.tokens() {
                tokens.entry(normalize(token)).or_default().push(position);
            }
        }

        Self { stations, tokens }
    }

    /// Positions of stations with a token starting with `prefix`, ordered by
    /// token, then by source order.
    fn positions<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.tokens
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(token, _)| token.starts_with(prefix))
            .flat_map(|(_, positions)| positions.iter().copied())
    }

    /// Stations matching the normalized `key`.
    ///
    /// A single word matches stations with a token starting with it, ordered
    /// by token, then by source order; a station matched by several tokens
    /// appears once per matching token. Several words match stations that
    /// every word matches, each station once, in the order of the first
    /// word's matches.
    fn search(&self, key: &str) -> Vec<&StationRecord> {
        let words: Vec<&str> = key.split_whitespace().collect();

        let positions: Vec<usize> = match words.as_slice() {
            [] => self.positions("").collect(),
            [word] => self.positions(word).collect(),
            [first, rest @ ..] => {
                let required: Vec<HashSet<usize>> =
                    rest.iter().map(|w| self.positions(w).collect()).collect();
                let mut seen = HashSet::new();
                self.positions(first)
                    .filter(|p| required.iter().all(|set| set.contains(p)))
                    .filter(|p| seen.insert(*p))
                    .collect()
            }
        };

        positions.into_iter().map(|p| &self.stations[p]).collect()
    }
}

/// Lazily built prefix index over a station source.
pub struct PrefixIndex {
    source: Arc<dyn StationSource>,
    catalog: OnceCell<Catalog>,

    /// The running load, kept here so a caller that stops waiting does not
    /// abandon it; the next initializer picks it up instead of loading again.
    pending: Mutex<Option<JoinHandle<Result<Catalog, CatalogError>>>>,
}

impl PrefixIndex {
    /// Create an unbuilt index over `source`.
    ///
    /// Nothing is loaded until the first search or `ensure_built` call.
    pub fn new(source: impl StationSource) -> Self {
        Self {
            source: Arc::new(source),
            catalog: OnceCell::new(),
            pending: Mutex::new(None),
        }
    }

    /// Build the index if it has not been built yet.
    ///
    /// The source is loaded and indexed on a blocking thread. Once a build
    /// succeeds, later calls return immediately.
    pub async fn ensure_built(&self) -> Result<(), CatalogError> {
        self.catalog().await.map(|_| ())
    }

    async fn catalog(&self) -> Result<&Catalog, CatalogError> {
        self.catalog
            .get_or_try_init(|| self.build())
            .await
            .inspect_err(|e| error!(error = %e, "failed to build station index"))
    }

    async fn build(&self) -> Result<Catalog, CatalogError> {
        let mut pending = self.pending.lock().await;

        let handle = pending.get_or_insert_with(|| {
            let source = Arc::clone(&self.source);
            tokio::task::spawn_blocking(move || -> Result<Catalog, CatalogError> {
                let started = Instant::now();
                let catalog = Catalog::build(source.load()?);
                info!(
                    stations = catalog.stations.len(),
                    tokens = catalog.tokens.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "station index built"
                );
                Ok(catalog)
            })
        });

        let joined = handle.await;
        *pending = None;

        joined.map_err(|e| CatalogError::Aborted {
            message: e.to_string(),
        })?
    }

    /// Find stations matching the normalized `query`.
    ///
    /// Builds the index first if needed. Each whitespace-separated word of
    /// the query must be a prefix of some word of the station name. An empty
    /// query matches every token.
    pub async fn search(&self, query: &str) -> Result<Vec<&StationRecord>, CatalogError> {
        let catalog = self.catalog().await?;
        let key = normalize(query);
        let matches = catalog.search(&key);

        debug!(key = %key, matches = matches.len(), "prefix search");
        Ok(matches)
    }

    /// Whether the index has been built.
    pub fn is_built(&self) -> bool {
        self.catalog.initialized()
    }

    /// Number of indexed stations, if built.
    pub fn station_count(&self) -> Option<usize> {
        self.catalog.get().map(|c| c.stations.len())
    }

    /// Number of distinct normalized tokens, if built.
    pub fn token_count(&self) -> Option<usize> {
        self.catalog.get().map(|c| c.tokens.len())
    }
}

impl std::fmt::Debug for PrefixIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrefixIndex")
            .field("built", &self.is_built())
            .field("stations", &self.station_count())
            .field("tokens", &self.token_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticStationSource;
    use futures::FutureExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn station(id: &str, code: &str, name: &str) -> StationRecord {
        StationRecord::new(id, code, name)
    }

    fn sample_stations() -> Vec<StationRecord> {
        vec![
            station("1", "BALE", "Berlin Zoologischer Garten Bhf."),
            station("2", "BBEV", "Berlin Ostbahnhof"),
            station("3", "MH", "München Hbf"),
            station("4", "KK", "Köln Hbf"),
            station("5", "FGZ", "Gießen Oberhessen"),
            station("6", "TBB", "Bernau bei Berlin"),
        ]
    }

    fn ids(stations: &[&StationRecord]) -> Vec<String> {
        stations.iter().map(|s| s.id.clone()).collect()
    }

    /// Source that counts loads and can fail a number of times first.
    struct CountingSource {
        stations: Vec<StationRecord>,
        loads: Arc<AtomicUsize>,
        failures: usize,
        delay: Duration,
    }

    impl CountingSource {
        fn new(stations: Vec<StationRecord>) -> (Self, Arc<AtomicUsize>) {
            let loads = Arc::new(AtomicUsize::new(0));
            let source = Self {
                stations,
                loads: Arc::clone(&loads),
                failures: 0,
                delay: Duration::ZERO,
            };
            (source, loads)
        }

        fn failing_first(mut self, failures: usize) -> Self {
            self.failures = failures;
            self
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    impl StationSource for CountingSource {
        fn load(&self) -> Result<Vec<StationRecord>, CatalogError> {
            let attempt = self.loads.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(self.delay);
            if attempt < self.failures {
                return Err(CatalogError::Aborted {
                    message: "simulated failure".into(),
                });
            }
            Ok(self.stations.clone())
        }
    }

    #[test]
    fn catalog_indexes_every_token() {
        let catalog = Catalog::build(sample_stations());

        assert_eq!(catalog.stations.len(), 6);
        for token in ["berlin", "zoologischer", "garten", "bhf.", "muenchen", "koeln", "giessen"] {
            assert!(catalog.tokens.contains_key(token), "missing token {token}");
        }
    }

    #[test]
    fn catalog_drops_blank_names() {
        let catalog = Catalog::build(vec![
            station("1", "A", "Berlin"),
            station("2", "B", ""),
            station("3", "C", "   "),
        ]);

        assert_eq!(catalog.stations.len(), 1);
        assert_eq!(catalog.stations[0].id, "1");
    }

    #[test]
    fn catalog_search_is_prefix_not_substring() {
        let catalog = Catalog::build(sample_stations());

        assert_eq!(ids(&catalog.search("ost")), vec!["2"]);
        assert!(catalog.search("bahnhof").is_empty());
        assert!(catalog.search("xyz").is_empty());
    }

    #[test]
    fn catalog_search_orders_by_token_then_source() {
        let catalog = Catalog::build(sample_stations());

        // "berlin" (1, 2, 6) sorts before "bernau" (6).
        assert_eq!(ids(&catalog.search("ber")), vec!["1", "2", "6", "6"]);
    }

    #[test]
    fn catalog_keeps_duplicates_from_repeated_tokens() {
        let catalog = Catalog::build(vec![station("1", "X", "Halle Halle")]);

        assert_eq!(ids(&catalog.search("hal")), vec!["1", "1"]);
    }

    #[test]
    fn catalog_keeps_distinct_stations_with_same_key() {
        let catalog = Catalog::build(vec![
            station("1", "A", "Muenster"),
            station("2", "B", "Münster"),
        ]);

        assert_eq!(ids(&catalog.search("muen")), vec!["1", "2"]);
    }

    #[test]
    fn catalog_search_requires_every_word() {
        let catalog = Catalog::build(sample_stations());

        assert_eq!(ids(&catalog.search("berlin zoo")), vec!["1"]);
        assert_eq!(ids(&catalog.search("berlin  ost")), vec!["2"]);
        assert!(catalog.search("berlin xyz").is_empty());
    }

    #[test]
    fn catalog_search_lists_multi_word_matches_once() {
        let catalog = Catalog::build(sample_stations());

        // "bernau bei berlin" matches "ber" twice but is listed once.
        assert_eq!(ids(&catalog.search("ber b")), vec!["1", "2", "6"]);
        assert_eq!(ids(&catalog.search("bei ber")), vec!["6"]);
    }

    #[tokio::test]
    async fn search_matches_several_words() {
        let index = PrefixIndex::new(StaticStationSource::new(sample_stations()));

        assert_eq!(ids(&index.search("Berlin Zoo").await.unwrap()), vec!["1"]);
        assert_eq!(ids(&index.search("MÜNCHEN hbf").await.unwrap()), vec!["3"]);
        assert!(index.search("Berlin Xyz").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_normalizes_query() {
        let index = PrefixIndex::new(StaticStationSource::new(sample_stations()));

        assert_eq!(ids(&index.search("MÜN").await.unwrap()), vec!["3"]);
        assert_eq!(ids(&index.search("muen").await.unwrap()), vec!["3"]);
        assert_eq!(ids(&index.search("Köl").await.unwrap()), vec!["4"]);
        assert_eq!(ids(&index.search("Gieß").await.unwrap()), vec!["5"]);
        assert_eq!(ids(&index.search("giess").await.unwrap()), vec!["5"]);
    }

    #[tokio::test]
    async fn search_builds_lazily() {
        let (source, loads) = CountingSource::new(sample_stations());
        let index = PrefixIndex::new(source);

        assert!(!index.is_built());
        assert_eq!(index.station_count(), None);
        assert_eq!(loads.load(Ordering::SeqCst), 0);

        index.search("ber").await.unwrap();

        assert!(index.is_built());
        assert_eq!(index.station_count(), Some(6));
        assert!(index.token_count().unwrap() > 6);
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn repeated_builds_load_once() {
        let (source, loads) = CountingSource::new(sample_stations());
        let index = PrefixIndex::new(source);

        index.ensure_built().await.unwrap();
        let first = ids(&index.search("ber").await.unwrap());

        for _ in 0..5 {
            index.ensure_built().await.unwrap();
        }
        let again = ids(&index.search("ber").await.unwrap());

        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert_eq!(first, again);
    }

    #[tokio::test]
    async fn empty_catalog_returns_nothing() {
        let index = PrefixIndex::new(StaticStationSource::default());

        assert!(index.search("berlin").await.unwrap().is_empty());
        assert_eq!(index.station_count(), Some(0));
    }

    #[tokio::test]
    async fn failed_build_is_retried_by_next_call() {
        let (source, loads) = CountingSource::new(sample_stations());
        let index = PrefixIndex::new(source.failing_first(1));

        let err = index.search("ber").await.unwrap_err();
        assert!(matches!(err, CatalogError::Aborted { .. }));
        assert!(!index.is_built());

        let matches = index.search("ber").await.unwrap();
        assert_eq!(matches.len(), 4);
        assert!(index.is_built());
        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn abandoned_build_is_picked_up_by_next_call() {
        let (source, loads) = CountingSource::new(sample_stations());
        let index = PrefixIndex::new(source.with_delay(Duration::from_millis(50)));

        // The first caller gives up before the load finishes.
        assert!(index.ensure_built().now_or_never().is_none());
        assert!(!index.is_built());

        index.ensure_built().await.unwrap();

        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert_eq!(index.station_count(), Some(6));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_first_searches_load_once() {
        let (source, loads) = CountingSource::new(sample_stations());
        let index = Arc::new(PrefixIndex::new(source.with_delay(Duration::from_millis(50))));

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let index = Arc::clone(&index);
                tokio::spawn(async move { index.search("ber").await.map(|m| m.len()) })
            })
            .collect();

        let results = futures::future::join_all(tasks).await;

        assert_eq!(loads.load(Ordering::SeqCst), 1);
        for result in results {
            assert_eq!(result.unwrap().unwrap(), 4);
        }
    }
}
