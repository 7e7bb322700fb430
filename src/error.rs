use crate::air_quality::error::AirQualityDataError;
use crate::regions::error::LocateRegionError;
use crate::types::language::UnsupportedLanguageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AqhiError {
    #[error(transparent)]
    UnsupportedLanguage(#[from] UnsupportedLanguageError),

    #[error("Either a zone and region identifier pair or a location is required")]
    MissingSite,

    #[error("Failed to build the HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("A refresh is already in progress for this client")]
    RefreshInProgress,

    #[error(transparent)]
    LocateRegion(#[from] LocateRegionError),

    #[error(transparent)]
    AirQualityData(#[from] AirQualityDataError),
}

impl AqhiError {
    /// Whether the error comes from how the client was set up rather than from a fetch.
    /// Retrying will not help with these.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            AqhiError::UnsupportedLanguage(_) | AqhiError::MissingSite | AqhiError::HttpClient(_)
        )
    }
}
