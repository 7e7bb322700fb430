use crate::types::region::Region;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The zone and region identifiers an observation or forecast document is published under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Site {
    pub zone_id: String,
    pub region_id: String,
}

impl Site {
    /// Region identifiers are always upper case in the published file names.
    pub fn new(zone_id: impl Into<String>, region_id: impl AsRef<str>) -> Self {
        Self {
            zone_id: zone_id.into(),
            region_id: region_id.as_ref().to_uppercase(),
        }
    }
}

impl From<&Region> for Site {
    fn from(region: &Region) -> Self {
        Site::new(region.abbreviation.clone(), &region.cgndb)
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.zone_id, self.region_id)
    }
}
