use crate::transport::error::FetchError;
use crate::types::timestamp::TimestampError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AirQualityDataError {
    #[error("Failed to download AQHI data")]
    Fetch(#[from] FetchError),

    #[error("Failed to parse the AQHI {document} document")]
    XmlParse {
        document: &'static str,
        #[source]
        source: roxmltree::Error,
    },

    #[error("Element '{element}' is missing required attribute '{attribute}'")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("Element '{parent}' has no '{element}' child")]
    MissingElement {
        parent: &'static str,
        element: &'static str,
    },

    #[error("Element '{element}' has an invalid value '{value}'")]
    InvalidValue {
        element: &'static str,
        value: String,
    },

    #[error(transparent)]
    Timestamp(#[from] TimestampError),
}
