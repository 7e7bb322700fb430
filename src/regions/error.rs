use crate::transport::error::FetchError;
use std::num::ParseFloatError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocateRegionError {
    #[error("Failed to download the AQHI site catalog")]
    Fetch(#[from] FetchError),

    #[error("Failed to parse the AQHI site catalog")]
    XmlParse(#[source] roxmltree::Error),

    #[error("Catalog element '{element}' is missing required attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: String },

    #[error("Region '{region}' has an invalid {attribute} '{value}'")]
    InvalidCoordinate {
        region: String,
        attribute: &'static str,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("No AQHI regions available in the site catalog")]
    NoRegionsAvailable,
}
