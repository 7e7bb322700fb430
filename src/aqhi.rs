//! This module provides the main entry point of the crate, the [`AirQuality`] client.
//! A client is tied to one AQHI region, given either directly by its zone and region
//! identifiers or by a geographical location that is resolved to the closest region.

use crate::air_quality::fetcher::fetch_snapshot;
use crate::endpoints::Endpoints;
use crate::error::AqhiError;
use crate::regions::catalog::find_closest_region;
use crate::transport::http::{Fetch, HttpFetcher, DEFAULT_TIMEOUT};
use crate::types::language::Language;
use crate::types::site::Site;
use crate::types::snapshot::AirQualitySnapshot;
use bon::bon;
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::sync::{Mutex, OnceCell};

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
/// Both values are decimal degrees.
///
/// # Examples
///
/// ```
/// use ec_aqhi::LatLon;
///
/// let toronto = LatLon(43.6532, -79.3832);
/// assert_eq!(toronto.0, 43.6532); // Latitude
/// assert_eq!(toronto.1, -79.3832); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon(pub f64, pub f64);

/// Which region a client reports on.
#[derive(Debug, Clone, PartialEq)]
pub enum SiteRequest {
    /// A known zone/region identifier pair. No catalog lookup is needed.
    Identifiers(Site),
    /// A location, resolved to the closest catalog region on the first refresh.
    Coordinates(LatLon),
}

impl SiteRequest {
    /// Builds a request from the optional pieces a caller may supply.
    ///
    /// A complete identifier pair always wins over a location; the location is only
    /// used when one of the identifiers is missing or empty.
    ///
    /// # Errors
    ///
    /// Returns [`AqhiError::MissingSite`] if there is neither a complete identifier pair
    /// nor a location.
    pub fn from_parts(
        zone_id: Option<String>,
        region_id: Option<String>,
        location: Option<LatLon>,
    ) -> Result<Self, AqhiError> {
        let zone_id = zone_id.filter(|id| !id.trim().is_empty());
        let region_id = region_id.filter(|id| !id.trim().is_empty());
        match (zone_id, region_id, location) {
            (Some(zone_id), Some(region_id), _) => Ok(SiteRequest::Identifiers(Site::new(
                zone_id.trim(),
                region_id.trim(),
            ))),
            (_, _, Some(location)) => Ok(SiteRequest::Coordinates(location)),
            _ => Err(AqhiError::MissingSite),
        }
    }
}

/// Client for the Air Quality Health Index of a single region.
///
/// The client starts out empty. Each successful [`refresh`](AirQuality::refresh)
/// downloads the current observation and the forecasts and replaces everything the
/// accessors return in one step. A failed refresh changes nothing, so the previous
/// data stays available.
///
/// A client created from a location looks up the closest region on its first refresh
/// and keeps using that region for the rest of its life.
///
/// Refreshes of one client never overlap: [`refresh`](AirQuality::refresh) waits for a
/// running refresh to finish, [`try_refresh`](AirQuality::try_refresh) gives up instead.
///
/// # Examples
///
/// ```no_run
/// # use ec_aqhi::{AirQuality, AqhiError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), AqhiError> {
/// let aqhi = AirQuality::builder()
///     .zone_id("ont")
///     .region_id("FAFFD")
///     .language("EN")
///     .build()?;
/// aqhi.refresh().await?;
/// println!("AQHI now: {:?}", aqhi.current());
/// for (period, index) in aqhi.daily_forecasts() {
///     println!("{period}: {index}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AirQuality<F = HttpFetcher> {
    fetcher: F,
    endpoints: Endpoints,
    language: Language,
    location: Option<LatLon>,
    site: OnceCell<Site>,
    refresh_lock: Mutex<()>,
    snapshot: RwLock<Arc<AirQualitySnapshot>>,
}

#[bon]
impl AirQuality<HttpFetcher> {
    /// Creates a client that fetches over HTTP.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.zone_id(String)` and `.region_id(String)`: The zone abbreviation and region site
    ///   code (e.g., `"ont"` and `"FAFFD"`). When both are given, `.location()` is ignored.
    /// * `.location(LatLon)`: Used when the identifiers are not both given; the closest
    ///   region is looked up on the first refresh.
    /// * `.language(String)`: `"EN"` or `"FR"`, case-insensitive. Defaults to `"EN"`.
    /// * `.timeout(Duration)`: Per-request timeout. Defaults to 10 seconds.
    /// * `.endpoints(Endpoints)`: Server to fetch from. Defaults to Environment Canada's.
    ///
    /// # Errors
    ///
    /// Returns [`AqhiError::UnsupportedLanguage`] for a language other than EN or FR,
    /// [`AqhiError::MissingSite`] when neither identifiers nor a location are given, and
    /// [`AqhiError::HttpClient`] if the HTTP client cannot be created. No request is made.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ec_aqhi::{AirQuality, AqhiError, LatLon};
    /// # fn main() -> Result<(), AqhiError> {
    /// let aqhi = AirQuality::builder()
    ///     .location(LatLon(45.5017, -73.5673))
    ///     .language("fr")
    ///     .build()?;
    /// assert_eq!(aqhi.zone_id(), None); // Not resolved until the first refresh.
    ///
    /// assert!(AirQuality::builder().language("EN").build().is_err());
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub fn new(
        #[builder(into)] zone_id: Option<String>,
        #[builder(into)] region_id: Option<String>,
        location: Option<LatLon>,
        #[builder(into)] language: Option<String>,
        timeout: Option<Duration>,
        endpoints: Option<Endpoints>,
    ) -> Result<Self, AqhiError> {
        let language = match language {
            Some(code) => code.parse()?,
            None => Language::default(),
        };
        let site = SiteRequest::from_parts(zone_id, region_id, location)?;
        let fetcher =
            HttpFetcher::new(timeout.unwrap_or(DEFAULT_TIMEOUT)).map_err(AqhiError::HttpClient)?;
        Ok(Self::with_fetcher(
            site,
            language,
            endpoints.unwrap_or_default(),
            fetcher,
        ))
    }
}

impl<F: Fetch> AirQuality<F> {
    /// Creates a client that fetches its documents through `fetcher`.
    pub fn with_fetcher(
        site: SiteRequest,
        language: Language,
        endpoints: Endpoints,
        fetcher: F,
    ) -> Self {
        let (location, site) = match site {
            SiteRequest::Identifiers(site) => (None, OnceCell::from(site)),
            SiteRequest::Coordinates(location) => (Some(location), OnceCell::new()),
        };
        Self {
            fetcher,
            endpoints,
            language,
            location,
            site,
            refresh_lock: Mutex::new(()),
            snapshot: RwLock::new(Arc::new(AirQualitySnapshot::default())),
        }
    }

    /// Fetches fresh observation and forecast data and replaces the current snapshot.
    ///
    /// Waits for any refresh already running on this client. On a location-based client
    /// the first call also resolves the closest region.
    ///
    /// # Errors
    ///
    /// Returns [`AqhiError::LocateRegion`] if the region lookup fails, and
    /// [`AqhiError::AirQualityData`] if either document cannot be fetched or parsed.
    /// The snapshot is left untouched in both cases.
    pub async fn refresh(&self) -> Result<(), AqhiError> {
        let _guard = self.refresh_lock.lock().await;
        self.refresh_locked().await
    }

    /// Same as [`refresh`](AirQuality::refresh).
    pub async fn update(&self) -> Result<(), AqhiError> {
        self.refresh().await
    }

    /// Like [`refresh`](AirQuality::refresh), but returns
    /// [`AqhiError::RefreshInProgress`] right away if another refresh is running.
    pub async fn try_refresh(&self) -> Result<(), AqhiError> {
        let _guard = self
            .refresh_lock
            .try_lock()
            .map_err(|_| AqhiError::RefreshInProgress)?;
        self.refresh_locked().await
    }

    async fn refresh_locked(&self) -> Result<(), AqhiError> {
        let site = self.resolve_site().await?;
        match fetch_snapshot(&self.fetcher, &self.endpoints, site, self.language).await {
            Ok(snapshot) => {
                *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) =
                    Arc::new(snapshot);
                Ok(())
            }
            Err(e) => {
                warn!("Keeping previous AQHI data for {}: {}", site, e);
                Err(e.into())
            }
        }
    }

    async fn resolve_site(&self) -> Result<&Site, AqhiError> {
        self.site
            .get_or_try_init(|| async {
                let location = self.location.ok_or(AqhiError::MissingSite)?;
                let region =
                    find_closest_region(&self.fetcher, &self.endpoints, location, self.language)
                        .await?;
                info!(
                    "Using AQHI region {} ({}/{}) for {:?}",
                    region.region_name, region.abbreviation, region.cgndb, location
                );
                Ok::<_, AqhiError>(Site::from(&region))
            })
            .await
    }

    /// The data committed by the last successful refresh.
    pub fn snapshot(&self) -> Arc<AirQualitySnapshot> {
        Arc::clone(&self.snapshot.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// The current AQHI reading, if there is one.
    pub fn current(&self) -> Option<f64> {
        self.snapshot().current
    }

    /// When the current reading was taken, if the observation said.
    pub fn current_timestamp(&self) -> Option<DateTime<Utc>> {
        self.snapshot().current_timestamp
    }

    /// Daily forecasts keyed by period name in the client's language.
    pub fn daily_forecasts(&self) -> HashMap<String, i32> {
        self.snapshot().daily_forecasts.clone()
    }

    /// Hourly forecasts keyed by the hour they apply to, earliest first.
    pub fn hourly_forecasts(&self) -> BTreeMap<DateTime<Utc>, i32> {
        self.snapshot().hourly_forecasts.clone()
    }

    /// The language used for zone, region and forecast period names.
    pub fn language(&self) -> Language {
        self.language
    }

    /// The zone identifier, or `None` while a location-based client is unresolved.
    pub fn zone_id(&self) -> Option<&str> {
        self.site.get().map(|site| site.zone_id.as_str())
    }

    /// The region identifier, or `None` while a location-based client is unresolved.
    pub fn region_id(&self) -> Option<&str> {
        self.site.get().map(|site| site.region_id.as_str())
    }
}
