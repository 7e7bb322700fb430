//! Defines the AQHI monitoring region as published in Environment Canada's site
//! catalog.

use crate::aqhi::LatLon;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single AQHI region (monitoring site) from the site catalog.
///
/// A region is identified by the pair of its zone [`abbreviation`](Region::abbreviation)
/// and its [`cgndb`](Region::cgndb) site code; those are the two values the observation
/// and forecast URLs are built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Abbreviation of the administrative zone the region belongs to (e.g., "ont").
    pub abbreviation: String,
    /// Zone name in the language the catalog was read in (e.g., "Ontario").
    pub zone_name: String,
    /// Region name in the language the catalog was read in (e.g., "Toronto Downtown").
    pub region_name: String,
    /// The site code, unique within the catalog (e.g., "FAFFD").
    pub cgndb: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Child elements of the catalog entry that have no dedicated field, keyed by tag name
    /// (for example `pathToCurrentObservation`).
    pub extra: BTreeMap<String, String>,
}

impl Region {
    pub fn location(&self) -> LatLon {
        LatLon(self.latitude, self.longitude)
    }

    /// The `(zone, site code)` pair identifying this region.
    pub fn id(&self) -> (&str, &str) {
        (&self.abbreviation, &self.cgndb)
    }
}
