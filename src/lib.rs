//! Air Quality Health Index (AQHI) observations and forecasts from Environment Canada.
//!
//! Environment Canada publishes the AQHI as static XML files: a catalog of monitoring
//! regions, and per region a current observation and a forecast. [`AirQuality`] keeps
//! the latest of those for one region, and [`RegionCatalog`] finds the region closest
//! to a location.

mod air_quality;
mod aqhi;
mod endpoints;
mod error;
mod regions;
mod transport;
mod types;
mod xml;

pub use aqhi::*;
pub use endpoints::{Endpoints, DEFAULT_BASE_URL};
pub use error::AqhiError;

pub use regions::catalog::RegionCatalog;
pub use regions::locate_region::{distance_km, NearestRegion, RegionIndex};

pub use transport::http::{DocumentEncoding, Fetch, HttpFetcher, DEFAULT_TIMEOUT};

pub use types::language::{Language, UnsupportedLanguageError};
pub use types::region::Region;
pub use types::site::Site;
pub use types::snapshot::AirQualitySnapshot;
pub use types::timestamp::{parse_utc_stamp, TimestampError};

pub use air_quality::error::AirQualityDataError;
pub use regions::error::LocateRegionError;
pub use transport::error::FetchError;
