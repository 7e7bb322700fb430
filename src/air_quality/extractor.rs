use crate::air_quality::error::AirQualityDataError;
use crate::types::language::Language;
use crate::types::timestamp::parse_utc_stamp;
use crate::xml::{child_elements, find_all, find_path, trimmed_text};
use chrono::{DateTime, Utc};
use log::debug;
use roxmltree::{Document, Node};
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

const INDEX_TAG: &str = "airQualityHealthIndex";
const PERIOD_TAG: &str = "period";
const HOURLY_TAG: &str = "hourlyForecast";

/// The current reading from an observation document. Both parts are optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Observation {
    pub current: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forecasts {
    pub daily: HashMap<String, i32>,
    pub hourly: BTreeMap<DateTime<Utc>, i32>,
}

pub fn extract_observation(xml: &str) -> Result<Observation, AirQualityDataError> {
    let document = parse_document(xml, "observation")?;
    let root = document.root_element();

    let current = find_path(root, &[INDEX_TAG])
        .map(|node| parse_text(node, INDEX_TAG))
        .transpose()?;
    let timestamp = find_path(root, &["dateStamp", "UTCStamp"])
        .map(|node| parse_utc_stamp(trimmed_text(node).unwrap_or_default()))
        .transpose()?;

    Ok(Observation { current, timestamp })
}

/// Reads the daily and hourly forecasts out of a forecast document.
///
/// A daily forecast is keyed by the name of its period in `language`. Forecasts with
/// no period in that language are left out; when several periods match, the last one
/// in document order names the forecast.
pub fn extract_forecasts(
    xml: &str,
    language: Language,
) -> Result<Forecasts, AirQualityDataError> {
    let document = parse_document(xml, "forecast")?;
    let root = document.root_element();

    let mut daily = HashMap::new();
    for forecast in find_all(root, &["forecastGroup", "forecast"]) {
        let period = child_elements(forecast, PERIOD_TAG)
            .filter(|period| {
                period
                    .attribute("lang")
                    .is_some_and(|lang| language.matches_code(lang))
            })
            .last();
        let Some(period) = period else {
            debug!(
                "Skipping forecast {:?} with no {} period",
                forecast.attribute("periodID"),
                language
            );
            continue;
        };

        let name = period
            .attribute("forecastName")
            .ok_or(AirQualityDataError::MissingAttribute {
                element: PERIOD_TAG,
                attribute: "forecastName",
            })?;
        let index = find_path(forecast, &[INDEX_TAG]).ok_or(
            AirQualityDataError::MissingElement {
                parent: "forecast",
                element: INDEX_TAG,
            },
        )?;
        daily.insert(name.to_string(), parse_text(index, INDEX_TAG)?);
    }

    let mut hourly = BTreeMap::new();
    for forecast in find_all(root, &["hourlyForecastGroup", HOURLY_TAG]) {
        let stamp = forecast
            .attribute("UTCTime")
            .ok_or(AirQualityDataError::MissingAttribute {
                element: HOURLY_TAG,
                attribute: "UTCTime",
            })?;
        hourly.insert(parse_utc_stamp(stamp)?, parse_text(forecast, HOURLY_TAG)?);
    }

    Ok(Forecasts { daily, hourly })
}

fn parse_document<'input>(
    xml: &'input str,
    document: &'static str,
) -> Result<Document<'input>, AirQualityDataError> {
    Document::parse(xml).map_err(|e| AirQualityDataError::XmlParse {
        document,
        source: e,
    })
}

fn parse_text<T: FromStr>(
    node: Node<'_, '_>,
    element: &'static str,
) -> Result<T, AirQualityDataError> {
    let text = trimmed_text(node).unwrap_or_default();
    text.parse().map_err(|_| AirQualityDataError::InvalidValue {
        element,
        value: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::timestamp::TimestampError;
    use chrono::TimeZone;

    const OBSERVATION: &str = include_str!("../../tests/fixtures/observation.xml");
    const FORECAST: &str = include_str!("../../tests/fixtures/forecast.xml");

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_extract_observation() {
        let observation = extract_observation(OBSERVATION).unwrap();
        assert_eq!(observation.current, Some(3.2));
        assert_eq!(observation.timestamp, Some(utc(2024, 1, 15, 12)));
    }

    #[test]
    fn test_observation_without_reading() {
        let xml = r#"<conditionAirQuality>
            <dateStamp><UTCStamp>20240115120000</UTCStamp></dateStamp>
        </conditionAirQuality>"#;
        let observation = extract_observation(xml).unwrap();
        assert_eq!(observation.current, None);
        assert_eq!(observation.timestamp, Some(utc(2024, 1, 15, 12)));

        let observation = extract_observation("<conditionAirQuality/>").unwrap();
        assert_eq!(observation, Observation::default());
    }

    #[test]
    fn test_observation_bad_values() {
        let xml = r#"<conditionAirQuality>
            <airQualityHealthIndex>high</airQualityHealthIndex>
        </conditionAirQuality>"#;
        match extract_observation(xml) {
            Err(AirQualityDataError::InvalidValue { element, value }) => {
                assert_eq!(element, INDEX_TAG);
                assert_eq!(value, "high");
            }
            other => panic!("Expected InvalidValue, got {:?}", other),
        }

        let xml = r#"<conditionAirQuality>
            <dateStamp><UTCStamp>2024-01-15 12:00</UTCStamp></dateStamp>
        </conditionAirQuality>"#;
        assert!(matches!(
            extract_observation(xml),
            Err(AirQualityDataError::Timestamp(TimestampError::InvalidFormat(_)))
        ));
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(
            extract_observation("<conditionAirQuality>"),
            Err(AirQualityDataError::XmlParse {
                document: "observation",
                ..
            })
        ));
        assert!(matches!(
            extract_forecasts("not xml", Language::English),
            Err(AirQualityDataError::XmlParse {
                document: "forecast",
                ..
            })
        ));
    }

    #[test]
    fn test_daily_forecasts_english() {
        let forecasts = extract_forecasts(FORECAST, Language::English).unwrap();
        let expected: HashMap<String, i32> =
            [("Today".to_string(), 3), ("Tonight".to_string(), 2)].into();
        // The third forecast only has a French period and is left out.
        assert_eq!(forecasts.daily, expected);
    }

    #[test]
    fn test_daily_forecasts_french() {
        let forecasts = extract_forecasts(FORECAST, Language::French).unwrap();
        assert_eq!(forecasts.daily.len(), 3);
        assert_eq!(forecasts.daily.get("Aujourd'hui"), Some(&3));
        assert_eq!(forecasts.daily.get("Ce soir et cette nuit"), Some(&2));
        assert_eq!(forecasts.daily.get("Demain"), Some(&4));
    }

    #[test]
    fn test_last_matching_period_names_the_forecast() {
        let xml = r#"<forecastAirQuality><forecastGroup>
            <forecast>
              <period lang="EN" forecastName="Tonight">Tonight</period>
              <period lang="FR" forecastName="Ce soir">Ce soir</period>
              <period lang="EN" forecastName="Tonight and overnight">Tonight</period>
              <airQualityHealthIndex>5</airQualityHealthIndex>
            </forecast>
        </forecastGroup></forecastAirQuality>"#;
        let forecasts = extract_forecasts(xml, Language::English).unwrap();
        let expected: HashMap<String, i32> = [("Tonight and overnight".to_string(), 5)].into();
        assert_eq!(forecasts.daily, expected);
    }

    #[test]
    fn test_hourly_forecasts() {
        let forecasts = extract_forecasts(FORECAST, Language::English).unwrap();
        let hourly: Vec<_> = forecasts.hourly.into_iter().collect();
        assert_eq!(
            hourly,
            vec![
                (utc(2024, 1, 15, 13), 3),
                (utc(2024, 1, 15, 14), 4),
                (utc(2024, 1, 15, 15), 4),
            ]
        );
    }

    #[test]
    fn test_hourly_forecast_errors() {
        let xml = r#"<forecastAirQuality><hourlyForecastGroup>
            <hourlyForecast UTCTime="2024011513">3</hourlyForecast>
        </hourlyForecastGroup></forecastAirQuality>"#;
        assert!(matches!(
            extract_forecasts(xml, Language::English),
            Err(AirQualityDataError::Timestamp(_))
        ));

        let xml = r#"<forecastAirQuality><hourlyForecastGroup>
            <hourlyForecast>3</hourlyForecast>
        </hourlyForecastGroup></forecastAirQuality>"#;
        assert!(matches!(
            extract_forecasts(xml, Language::English),
            Err(AirQualityDataError::MissingAttribute {
                attribute: "UTCTime",
                ..
            })
        ));

        let xml = r#"<forecastAirQuality><hourlyForecastGroup>
            <hourlyForecast UTCTime="20240115130000">3.5</hourlyForecast>
        </hourlyForecastGroup></forecastAirQuality>"#;
        assert!(matches!(
            extract_forecasts(xml, Language::English),
            Err(AirQualityDataError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_empty_forecast_document() {
        let forecasts = extract_forecasts("<forecastAirQuality/>", Language::English).unwrap();
        assert_eq!(forecasts, Forecasts::default());
    }
}
