use common::models::WeatherReport;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};
use tracing::debug;

/// Where a request's cacheable identity comes from: a validated form either
/// names a city or carries both coordinates. Anything else never reaches key
/// derivation.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    City(String),
    Coords { lat: String, lon: String },
}

impl Location {
    /// Applies the form validation rule: a non-empty trimmed city wins over
    /// coordinates, otherwise both coordinates must be non-empty.
    pub fn from_form(city: &str, lat: Option<&str>, lon: Option<&str>) -> Option<Self> {
        let city = city.trim();
        if !city.is_empty() {
            return Some(Self::City(city.to_string()));
        }
        match (lat, lon) {
            (Some(lat), Some(lon)) if !lat.is_empty() && !lon.is_empty() => Some(Self::Coords {
                lat: lat.to_string(),
                lon: lon.to_string(),
            }),
            _ => None,
        }
    }

    /// Deterministic cache key. City keys are case- and whitespace-insensitive;
    /// coordinate keys use the raw form strings, so "40.7" and "40.70" are
    /// distinct keys (known limitation).
    pub fn cache_key(&self) -> String {
        match self {
            Self::City(city) => format!("city:{}", city.trim().to_lowercase()),
            Self::Coords { lat, lon } => format!("latlon:{lat},{lon}"),
        }
    }
}

struct CacheEntry {
    report: WeatherReport,
    stored_at: Instant,
}

/// Process-lifetime response cache with a fixed TTL.
///
/// Expiry is checked only on access: an expired entry is removed by the lookup
/// that observes it, never by a background sweep. There is no size bound, and
/// two concurrent misses for the same key may both fetch upstream and both
/// write, last write wins. Both are accepted limitations; entries are
/// idempotent snapshots of an external source.
pub struct WeatherCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl WeatherCache {
    pub fn with_ttl(ttl_seconds: u64) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: Duration::from_secs(ttl_seconds),
        }
    }

    /// Returns the stored report if one exists and is still fresh. A stale
    /// entry is evicted on the spot.
    pub async fn get(&self, key: &str) -> Option<WeatherReport> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                    debug!(key, "cache hit");
                    return Some(entry.report.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }
        // Stale: re-check under the write lock before evicting, another task
        // may have refreshed the entry in between.
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(key) {
            if entry.stored_at.elapsed() < self.ttl {
                return Some(entry.report.clone());
            }
            debug!(key, "cache expired");
            entries.remove(key);
        }
        None
    }

    /// Stores a report, overwriting any previous entry for the key.
    pub async fn put(&self, key: String, report: WeatherReport) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key,
            CacheEntry {
                report,
                stored_at: Instant::now(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::models::{CurrentWeather, WeatherReport};

    fn report(city: &str) -> WeatherReport {
        WeatherReport {
            current: CurrentWeather {
                city: city.to_string(),
                temp: 20.0,
                description: "clear sky".to_string(),
                icon: "01d".to_string(),
                humidity: 50.0,
                wind_speed: 3.0,
                feels_like: 19.0,
                timezone_offset: 0,
            },
            input_city: city.to_string(),
            forecast: Vec::new(),
        }
    }

    #[test]
    fn city_keys_ignore_case_and_surrounding_whitespace() {
        let a = Location::City("  New York ".to_string()).cache_key();
        let b = Location::City("new york".to_string()).cache_key();
        let c = Location::City("NEW YORK".to_string()).cache_key();
        assert_eq!(a, "city:new york");
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn coordinate_keys_use_raw_strings() {
        let a = Location::Coords {
            lat: "40.7".to_string(),
            lon: "-74.0".to_string(),
        };
        let b = Location::Coords {
            lat: "40.70".to_string(),
            lon: "-74.0".to_string(),
        };
        assert_eq!(a.cache_key(), "latlon:40.7,-74.0");
        assert_ne!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn city_takes_priority_over_coordinates() {
        let loc = Location::from_form("Paris", Some("48.85"), Some("2.35"));
        assert_eq!(loc, Some(Location::City("Paris".to_string())));
    }

    #[test]
    fn blank_city_falls_back_to_coordinates() {
        let loc = Location::from_form("   ", Some("48.85"), Some("2.35"));
        assert_eq!(
            loc,
            Some(Location::Coords {
                lat: "48.85".to_string(),
                lon: "2.35".to_string(),
            })
        );
    }

    #[test]
    fn missing_everything_is_invalid() {
        assert_eq!(Location::from_form("", None, None), None);
        assert_eq!(Location::from_form("  ", Some("48.85"), None), None);
        assert_eq!(Location::from_form("", Some(""), Some("2.35")), None);
    }

    #[tokio::test(start_paused = true)]
    async fn entry_expires_after_ttl() {
        let cache = WeatherCache::with_ttl(600);
        cache.put("city:london".to_string(), report("London")).await;

        tokio::time::advance(Duration::from_secs(599)).await;
        assert!(cache.get("city:london").await.is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(cache.get("city:london").await.is_none());
        // Lazy eviction removed the entry, not just hid it.
        assert!(cache.get("city:london").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn put_overwrites_and_refreshes_timestamp() {
        let cache = WeatherCache::with_ttl(600);
        cache.put("city:rome".to_string(), report("Roma")).await;

        tokio::time::advance(Duration::from_secs(300)).await;
        cache.put("city:rome".to_string(), report("Rome")).await;

        tokio::time::advance(Duration::from_secs(400)).await;
        let hit = cache.get("city:rome").await.expect("refreshed entry");
        assert_eq!(hit.current.city, "Rome");
    }

    #[tokio::test]
    async fn unknown_key_misses() {
        let cache = WeatherCache::with_ttl(600);
        assert!(cache.get("city:nowhere").await.is_none());
    }
}
