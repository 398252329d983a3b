//! Historical-weather client: optional remote fetch of ~30 years of daily
//! observations, statistical derivation of climate baselines, and a
//! coordinate-keyed cache with single-flight fetches.
//!
//! The remote archive is Open-Meteo's historical API. Any failure path
//! (transport error, short series, unusable fit) falls back to regional
//! statistical defaults tagged [`DataSource::HardcodedConfig`]; failures
//! warn and never surface as errors.
//!
//! Concurrency: the cache is guarded by a mutex; concurrent `fetch_stats`
//! calls for the same rounded coordinate collapse to a single outstanding
//! transport request via a per-key gate, and every caller receives the same
//! result.
//!
//! References:
//! - Open-Meteo (2024) archive API.
//! - Coles (2001) for the method-of-moments Gumbel fit.
//! - KMA heatwave criterion (daily maximum above 33 deg C).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use crate::config::hazards::flood_gumbel_defaults;
use crate::config::{classify_region, Region};
use crate::core::{Clock, DataSource, RiskError, SystemClock};
use crate::math::{fit_gumbel_annual_maxima, GumbelParams};

/// Cache entries expire one hour after creation.
pub const CACHE_TTL: Duration = Duration::from_secs(3600);

/// Transport-level timeout per fetch.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Minimum usable years of daily data; shorter series trigger fallback.
const MIN_YEARS: usize = 5;

/// KMA heatwave threshold, deg C.
const HEATWAVE_THRESHOLD_C: f64 = 33.0;

/// Dry-day threshold for the drought index, mm.
const DRY_DAY_MM: f64 = 1.0;

const ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";
const START_DATE: &str = "1994-01-01";
const END_DATE: &str = "2023-12-31";

/// Thirty years of daily values as returned by the archive.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct DailyHistory {
    pub temperature_2m_max: Vec<Option<f64>>,
    pub precipitation_sum: Vec<Option<f64>>,
    pub wind_speed_10m_max: Vec<Option<f64>>,
}

/// Derived climate baselines for one coordinate.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WeatherStats {
    pub gumbel: GumbelParams,
    /// Average annual days above 33 deg C; None means use regional default.
    pub heatwave_days: Option<f64>,
    /// Average annual longest dry spell in days.
    pub drought_index_days: Option<f64>,
    /// Average annual maximum wind speed, m/s.
    pub wind_annual_max_ms: Option<f64>,
    pub source: DataSource,
}

impl WeatherStats {
    /// Regional defaults used on every fallback path.
    pub fn fallback(region: Region) -> Self {
        let (location, scale) = flood_gumbel_defaults(region);
        Self {
            gumbel: GumbelParams { location, scale },
            heatwave_days: None,
            drought_index_days: None,
            wind_annual_max_ms: None,
            source: DataSource::HardcodedConfig,
        }
    }
}

/// Source of climate baselines for the physical engine. Implemented by
/// [`WeatherClient`]; the engine treats the absence of a provider as
/// "defaults only".
pub trait WeatherProvider: Send + Sync {
    fn fetch_stats(&self, latitude: f64, longitude: f64) -> WeatherStats;
}

/// Raw archive access. The production transport is [`OpenMeteoTransport`];
/// tests inject canned or counting transports.
pub trait WeatherTransport: Send + Sync {
    fn daily_history(&self, latitude: f64, longitude: f64) -> Result<DailyHistory, RiskError>;
}

/// Blocking HTTP transport against the Open-Meteo archive.
#[derive(Debug)]
pub struct OpenMeteoTransport {
    client: reqwest::blocking::Client,
}

impl OpenMeteoTransport {
    pub fn new() -> Result<Self, RiskError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| RiskError::WeatherUnavailable(e.to_string()))?;
        Ok(Self { client })
    }
}

#[derive(Debug, serde::Deserialize)]
struct ArchiveResponse {
    daily: Option<DailyHistory>,
}

impl WeatherTransport for OpenMeteoTransport {
    fn daily_history(&self, latitude: f64, longitude: f64) -> Result<DailyHistory, RiskError> {
        let response = self
            .client
            .get(ARCHIVE_URL)
            .query(&[
                ("latitude", format!("{latitude:.2}")),
                ("longitude", format!("{longitude:.2}")),
                ("start_date", START_DATE.to_string()),
                ("end_date", END_DATE.to_string()),
                (
                    "daily",
                    "temperature_2m_max,precipitation_sum,wind_speed_10m_max".to_string(),
                ),
                ("timezone", "Asia/Seoul".to_string()),
            ])
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| RiskError::WeatherUnavailable(e.to_string()))?;

        let payload: ArchiveResponse = response
            .json()
            .map_err(|e| RiskError::WeatherUnavailable(e.to_string()))?;
        payload.daily.ok_or_else(|| {
            RiskError::WeatherUnavailable("archive response carried no daily block".to_string())
        })
    }
}

/// Cache key: coordinates rounded to a 0.25 degree grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct GridKey {
    lat_quarter: i32,
    lon_quarter: i32,
}

impl GridKey {
    fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            lat_quarter: (latitude * 4.0).round() as i32,
            lon_quarter: (longitude * 4.0).round() as i32,
        }
    }
}

struct CacheEntry {
    stats: WeatherStats,
    expires_at: SystemTime,
}

/// Caching, single-flight weather client.
pub struct WeatherClient<T: WeatherTransport> {
    transport: T,
    clock: Arc<dyn Clock>,
    cache: Mutex<HashMap<GridKey, CacheEntry>>,
    inflight: Mutex<HashMap<GridKey, Arc<Mutex<()>>>>,
}

impl WeatherClient<OpenMeteoTransport> {
    /// Production client against the live archive.
    pub fn open_meteo() -> Result<Self, RiskError> {
        Ok(Self::with_transport(
            OpenMeteoTransport::new()?,
            Arc::new(SystemClock),
        ))
    }
}

impl<T: WeatherTransport> WeatherClient<T> {
    pub fn with_transport(transport: T, clock: Arc<dyn Clock>) -> Self {
        Self {
            transport,
            clock,
            cache: Mutex::new(HashMap::new()),
            inflight: Mutex::new(HashMap::new()),
        }
    }

    fn cache_get(&self, key: GridKey) -> Option<WeatherStats> {
        let mut cache = self.cache.lock().expect("weather cache poisoned");
        match cache.get(&key) {
            Some(entry) if entry.expires_at > self.clock.now() => Some(entry.stats),
            Some(_) => {
                cache.remove(&key);
                None
            }
            None => None,
        }
    }

    fn cache_put(&self, key: GridKey, stats: WeatherStats) {
        let mut cache = self.cache.lock().expect("weather cache poisoned");
        cache.insert(
            key,
            CacheEntry {
                stats,
                expires_at: self.clock.now() + CACHE_TTL,
            },
        );
    }

    fn inflight_gate(&self, key: GridKey) -> Arc<Mutex<()>> {
        let mut inflight = self.inflight.lock().expect("inflight map poisoned");
        inflight.entry(key).or_default().clone()
    }

    fn fetch_and_derive(&self, latitude: f64, longitude: f64) -> WeatherStats {
        let region = classify_region(latitude, longitude);
        match self.transport.daily_history(latitude, longitude) {
            Ok(history) => match derive_stats(&history) {
                Ok(stats) => stats,
                Err(err) => {
                    log::warn!(
                        "weather derivation failed for ({latitude:.2}, {longitude:.2}): {err}; \
                         using regional defaults"
                    );
                    WeatherStats::fallback(region)
                }
            },
            Err(err) => {
                log::warn!(
                    "weather fetch failed for ({latitude:.2}, {longitude:.2}): {err}; \
                     using regional defaults"
                );
                WeatherStats::fallback(region)
            }
        }
    }
}

impl<T: WeatherTransport> WeatherProvider for WeatherClient<T> {
    /// Cached, single-flight lookup. Fallback results are cached too so a
    /// flapping archive is not hammered.
    fn fetch_stats(&self, latitude: f64, longitude: f64) -> WeatherStats {
        let key = GridKey::new(latitude, longitude);
        if let Some(hit) = self.cache_get(key) {
            return hit;
        }

        let gate = self.inflight_gate(key);
        let _guard = gate.lock().expect("inflight gate poisoned");
        // A concurrent caller may have filled the cache while we waited.
        if let Some(hit) = self.cache_get(key) {
            return hit;
        }

        let stats = self.fetch_and_derive(latitude, longitude);
        self.cache_put(key, stats);
        stats
    }
}

/// Derives all baselines from a daily history. Fails when fewer than
/// [`MIN_YEARS`] usable years are present or the precipitation fit is
/// degenerate.
fn derive_stats(history: &DailyHistory) -> Result<WeatherStats, RiskError> {
    let precip_maxima = annual_aggregate(&history.precipitation_sum, |year| {
        year.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    });
    let gumbel = fit_gumbel_annual_maxima(&precip_maxima, MIN_YEARS)?;

    let heatwave_days = annual_mean(&history.temperature_2m_max, |year| {
        year.iter().filter(|t| **t > HEATWAVE_THRESHOLD_C).count() as f64
    });
    let drought_index_days = annual_mean(&history.precipitation_sum, |year| {
        longest_dry_spell(year) as f64
    });
    let wind_annual_max_ms = annual_mean(&history.wind_speed_10m_max, |year| {
        year.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    });

    Ok(WeatherStats {
        gumbel,
        heatwave_days,
        drought_index_days,
        wind_annual_max_ms,
        source: DataSource::OpenMeteoApi,
    })
}

/// Splits a daily series into 365-day years and applies `f` per year,
/// skipping years with no usable values.
fn annual_aggregate(daily: &[Option<f64>], f: impl Fn(&[f64]) -> f64) -> Vec<f64> {
    daily
        .chunks(365)
        .filter_map(|chunk| {
            let year: Vec<f64> = chunk
                .iter()
                .filter_map(|v| v.filter(|x| x.is_finite()))
                .collect();
            // Ignore fragments shorter than half a year.
            if year.is_empty() || chunk.len() < 183 {
                None
            } else {
                Some(f(&year))
            }
        })
        .collect()
}

fn annual_mean(daily: &[Option<f64>], f: impl Fn(&[f64]) -> f64) -> Option<f64> {
    let per_year = annual_aggregate(daily, f);
    if per_year.len() < MIN_YEARS {
        return None;
    }
    Some(per_year.iter().sum::<f64>() / per_year.len() as f64)
}

/// Longest run of days with precipitation below the dry-day threshold.
fn longest_dry_spell(daily_precip: &[f64]) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for value in daily_precip {
        if *value < DRY_DAY_MM {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::core::ManualClock;

    use super::*;

    /// Transport returning a synthetic 30-year history and counting calls.
    struct CountingTransport {
        calls: AtomicUsize,
    }

    impl CountingTransport {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl WeatherTransport for CountingTransport {
        fn daily_history(&self, _lat: f64, _lon: f64) -> Result<DailyHistory, RiskError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(synthetic_history(30))
        }
    }

    struct FailingTransport;

    impl WeatherTransport for FailingTransport {
        fn daily_history(&self, _lat: f64, _lon: f64) -> Result<DailyHistory, RiskError> {
            Err(RiskError::WeatherUnavailable("connection refused".to_string()))
        }
    }

    fn synthetic_history(years: usize) -> DailyHistory {
        let mut precip = Vec::with_capacity(years * 365);
        let mut tmax = Vec::with_capacity(years * 365);
        let mut wind = Vec::with_capacity(years * 365);
        for year in 0..years {
            for day in 0..365 {
                // One pronounced monsoon peak per year, deterministic.
                let peak = 180.0 + 10.0 * (year % 7) as f64;
                let rain = if day == 200 {
                    peak
                } else if day % 9 == 0 {
                    12.0
                } else {
                    0.0
                };
                precip.push(Some(rain));
                let temp = if (180..=220).contains(&day) { 34.0 } else { 24.0 };
                tmax.push(Some(temp));
                wind.push(Some(if day == 250 { 28.0 } else { 6.0 }));
            }
        }
        DailyHistory {
            temperature_2m_max: tmax,
            precipitation_sum: precip,
            wind_speed_10m_max: wind,
        }
    }

    #[test]
    fn derives_baselines_from_synthetic_history() {
        let stats = derive_stats(&synthetic_history(30)).unwrap();
        assert_eq!(stats.source, DataSource::OpenMeteoApi);
        // Annual maxima 180..=240 mm.
        assert!(stats.gumbel.location > 150.0 && stats.gumbel.location < 250.0);
        assert!(stats.heatwave_days.unwrap() > 30.0);
        assert!(stats.drought_index_days.unwrap() > 5.0);
        assert!((stats.wind_annual_max_ms.unwrap() - 28.0).abs() < 1e-9);
    }

    #[test]
    fn short_series_is_rejected() {
        assert!(derive_stats(&synthetic_history(3)).is_err());
    }

    #[test]
    fn transport_failure_falls_back_to_regional_defaults() {
        let client =
            WeatherClient::with_transport(FailingTransport, Arc::new(ManualClock::at_epoch()));
        let stats = client.fetch_stats(36.02, 129.34);
        assert_eq!(stats.source, DataSource::HardcodedConfig);
        let (mu, _) = flood_gumbel_defaults(Region::CoastalEast);
        assert_eq!(stats.gumbel.location, mu);
    }

    #[test]
    fn cache_hit_avoids_second_fetch_until_expiry() {
        let clock = ManualClock::at_epoch();
        let client = WeatherClient::with_transport(CountingTransport::new(), Arc::new(clock.clone()));

        client.fetch_stats(35.50, 129.00);
        client.fetch_stats(35.50, 129.00);
        // Same 0.25 degree cell.
        client.fetch_stats(35.55, 129.05);
        assert_eq!(client.transport.calls(), 1);

        clock.advance(Duration::from_secs(3601));
        client.fetch_stats(35.50, 129.00);
        assert_eq!(client.transport.calls(), 2);
    }

    #[test]
    fn concurrent_same_key_fetches_collapse_to_one_request() {
        let client = Arc::new(WeatherClient::with_transport(
            CountingTransport::new(),
            Arc::new(ManualClock::at_epoch()),
        ));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let client = Arc::clone(&client);
            handles.push(std::thread::spawn(move || client.fetch_stats(35.50, 129.00)));
        }
        let results: Vec<WeatherStats> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(client.transport.calls(), 1);
        assert!(results.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn distinct_cells_fetch_independently() {
        let client = WeatherClient::with_transport(
            CountingTransport::new(),
            Arc::new(ManualClock::at_epoch()),
        );
        client.fetch_stats(35.50, 129.00);
        client.fetch_stats(36.50, 127.00);
        assert_eq!(client.transport.calls(), 2);
    }

    #[test]
    fn dry_spell_tracks_longest_run() {
        assert_eq!(longest_dry_spell(&[0.0, 0.5, 2.0, 0.0, 0.0, 0.0, 3.0]), 3);
        assert_eq!(longest_dry_spell(&[5.0, 5.0]), 0);
    }
}
