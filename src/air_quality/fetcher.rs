use crate::air_quality::error::AirQualityDataError;
use crate::air_quality::extractor::{
    extract_forecasts, extract_observation, Forecasts, Observation,
};
use crate::endpoints::Endpoints;
use crate::transport::http::{fetch_document, DocumentEncoding, Fetch};
use crate::types::language::Language;
use crate::types::site::Site;
use crate::types::snapshot::AirQualitySnapshot;
use log::info;

/// Downloads the observation and forecast documents for `site` and maps them into a
/// snapshot.
///
/// Both downloads run concurrently and both must succeed before either document is
/// parsed. Any failure discards the work done so far.
pub async fn fetch_snapshot<F: Fetch>(
    fetcher: &F,
    endpoints: &Endpoints,
    site: &Site,
    language: Language,
) -> Result<AirQualitySnapshot, AirQualityDataError> {
    let observation_url = endpoints.observation_url(&site.zone_id, &site.region_id);
    let forecast_url = endpoints.forecast_url(&site.zone_id, &site.region_id);

    let (observation_xml, forecast_xml) = tokio::try_join!(
        fetch_document(fetcher, &observation_url, DocumentEncoding::Latin1),
        fetch_document(fetcher, &forecast_url, DocumentEncoding::Latin1),
    )?;

    let Observation { current, timestamp } = extract_observation(&observation_xml)?;
    let Forecasts { daily, hourly } = extract_forecasts(&forecast_xml, language)?;
    info!(
        "Fetched AQHI for {}: current {:?}, {} daily and {} hourly forecasts",
        site,
        current,
        daily.len(),
        hourly.len()
    );

    Ok(AirQualitySnapshot {
        current,
        current_timestamp: timestamp,
        daily_forecasts: daily,
        hourly_forecasts: hourly,
    })
}
