//! Reverse-geocoding contract for the import step
//!
//! The crate ships no network client. Importers plug their own lookup in via
//! [`ReverseGeocoder`] and wrap it in a [`ThrottledGeocoder`], which spaces
//! requests out (one per second by default, the public Nominatim limit),
//! retries failures with exponential backoff and falls back to
//! [`UNKNOWN_LOCATION`] once the attempts are used up.
//!
//! # Example
//!
//! ```
//! use dronemap_core::geocode::{Address, GeocodeThrottle, ReverseGeocoder, ThrottledGeocoder};
//! use dronemap_geo::Coordinate;
//!
//! struct Fixed;
//!
//! impl ReverseGeocoder for Fixed {
//!     fn reverse(&self, _at: Coordinate) -> dronemap_core::Result<Option<Address>> {
//!         Ok(Some(Address { city: Some("Bend".into()), country: Some("USA".into()), ..Address::default() }))
//!     }
//! }
//!
//! let mut geocoder = ThrottledGeocoder::new(Fixed, GeocodeThrottle::unthrottled());
//! assert_eq!(geocoder.lookup(Coordinate::new(44.05, -121.31)), "Bend, USA");
//! ```

use dronemap_geo::Coordinate;
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::error::Result;
use crate::photo::PhotoRecord;

/// Label used when no address could be resolved
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Address components returned by a reverse lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Preferred locality
    pub city: Option<String>,
    /// Locality when there is no city
    pub town: Option<String>,
    /// Locality when there is no city or town
    pub village: Option<String>,
    /// Preferred second-level division
    pub state: Option<String>,
    /// Second-level division when there is no state
    pub region: Option<String>,
    /// Country name
    pub country: Option<String>,
}

impl Address {
    /// `"locality, state, country"` from whichever parts are present
    pub fn display_name(&self) -> String {
        let pick = |fields: &[&Option<String>]| {
            fields
                .iter()
                .filter_map(|f| f.as_deref())
                .map(str::trim)
                .find(|s| !s.is_empty())
                .map(str::to_string)
        };

        let parts: Vec<String> = [
            pick(&[&self.city, &self.town, &self.village]),
            pick(&[&self.state, &self.region]),
            pick(&[&self.country]),
        ]
        .into_iter()
        .flatten()
        .collect();

        if parts.is_empty() {
            UNKNOWN_LOCATION.to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// A reverse-geocoding backend
pub trait ReverseGeocoder {
    /// Resolve a coordinate; `Ok(None)` means the backend knows no address there
    fn reverse(&self, at: Coordinate) -> Result<Option<Address>>;
}

/// Request spacing and retry policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeThrottle {
    /// Minimum time between the starts of two requests
    pub min_interval: Duration,
    /// Attempts per lookup, including the first
    pub max_attempts: u32,
    /// Backoff before the first retry
    pub initial_backoff: Duration,
    /// Growth factor for each later retry
    pub backoff_multiplier: f64,
}

impl Default for GeocodeThrottle {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_secs(1),
            max_attempts: 3,
            initial_backoff: Duration::from_millis(500),
            backoff_multiplier: 2.0,
        }
    }
}

impl GeocodeThrottle {
    /// No spacing and no backoff; single attempt
    pub fn unthrottled() -> Self {
        Self {
            min_interval: Duration::ZERO,
            max_attempts: 1,
            initial_backoff: Duration::ZERO,
            backoff_multiplier: 1.0,
        }
    }

    /// Backoff before `attempt` (0-based); zero for the first attempt
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let exponent = i32::try_from(attempt - 1).unwrap_or(i32::MAX);
        self.initial_backoff
            .mul_f64(self.backoff_multiplier.powi(exponent))
    }
}

/// Wraps a [`ReverseGeocoder`] with request spacing and retries
pub struct ThrottledGeocoder<G> {
    inner: G,
    policy: GeocodeThrottle,
    last_request: Option<Instant>,
}

impl<G: ReverseGeocoder> ThrottledGeocoder<G> {
    /// Wrap `inner`; the first request is not delayed
    pub fn new(inner: G, policy: GeocodeThrottle) -> Self {
        Self {
            inner,
            policy,
            last_request: None,
        }
    }

    /// Spacing and retry settings in use
    pub fn policy(&self) -> &GeocodeThrottle {
        &self.policy
    }

    fn wait_turn(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.policy.min_interval {
                thread::sleep(self.policy.min_interval - elapsed);
            }
        }
        self.last_request = Some(Instant::now());
    }

    /// Display name for `at`, or [`UNKNOWN_LOCATION`] if every attempt failed
    pub fn lookup(&mut self, at: Coordinate) -> String {
        let attempts = self.policy.max_attempts.max(1);
        for attempt in 0..attempts {
            let backoff = self.policy.delay_for_attempt(attempt);
            if !backoff.is_zero() {
                thread::sleep(backoff);
            }
            self.wait_turn();

            match self.inner.reverse(at) {
                Ok(Some(address)) => return address.display_name(),
                Ok(None) => return UNKNOWN_LOCATION.to_string(),
                Err(err) => {
                    debug!(attempt = attempt + 1, %at, error = %err, "reverse geocoding failed");
                }
            }
        }

        warn!(%at, attempts, "reverse geocoding gave up");
        UNKNOWN_LOCATION.to_string()
    }

    /// Fill `location_name` on locatable photos that lack one.
    ///
    /// Returns how many photos were annotated.
    pub fn annotate(&mut self, photos: &mut [PhotoRecord]) -> usize {
        let mut annotated = 0;
        for photo in photos.iter_mut() {
            if photo.location_name.is_some() || !photo.is_locatable() {
                continue;
            }
            if let Some(at) = photo.position() {
                photo.location_name = Some(self.lookup(at));
                annotated += 1;
            }
        }
        annotated
    }
}
