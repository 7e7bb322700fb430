//! URLs of the AQHI documents on Environment Canada's data server.

/// Base URL of Environment Canada's public data server.
pub const DEFAULT_BASE_URL: &str = "https://dd.weather.gc.ca";

const CATALOG_PATH: &str = "/air_quality/doc/AQHI_XML_File_List.xml";

/// Where the catalog, observation and forecast documents are fetched from.
///
/// All three documents hang off one base URL. Point it at a mirror (or a test server)
/// with [`Endpoints::new`]; [`Endpoints::default`] uses [`DEFAULT_BASE_URL`].
///
/// # Examples
///
/// ```
/// use ec_aqhi::Endpoints;
///
/// let endpoints = Endpoints::default();
/// assert_eq!(
///     endpoints.observation_url("ont", "FAFFD"),
///     "https://dd.weather.gc.ca/air_quality/aqhi/ont/observation/realtime/xml/AQ_OBS_FAFFD_CURRENT.xml"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl Endpoints {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn catalog_url(&self) -> String {
        format!("{}{}", self.base_url, CATALOG_PATH)
    }

    pub fn observation_url(&self, zone_id: &str, region_id: &str) -> String {
        format!(
            "{}/air_quality/aqhi/{}/observation/realtime/xml/AQ_OBS_{}_CURRENT.xml",
            self.base_url, zone_id, region_id
        )
    }

    pub fn forecast_url(&self, zone_id: &str, region_id: &str) -> String {
        format!(
            "{}/air_quality/aqhi/{}/forecast/realtime/xml/AQ_FCST_{}_CURRENT.xml",
            self.base_url, zone_id, region_id
        )
    }
}
