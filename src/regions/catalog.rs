use crate::aqhi::LatLon;
use crate::endpoints::Endpoints;
use crate::error::AqhiError;
use crate::regions::error::LocateRegionError;
use crate::regions::locate_region::NearestRegion;
use crate::transport::http::{
    fetch_document, DocumentEncoding, Fetch, HttpFetcher, DEFAULT_TIMEOUT,
};
use crate::types::language::Language;
use crate::types::region::Region;
use crate::xml::{child_elements, find_all};
use log::{debug, info};
use roxmltree::{Document, Node};
use std::collections::BTreeMap;

const ZONE_TAG: &str = "EC_administrativeZone";
// Spelled this way in the published catalog.
const ZONE_ABBREVIATION_ATTRIBUTE: &str = "abreviation";

/// Access to Environment Canada's AQHI site catalog.
///
/// The catalog is downloaded on every call; nothing is cached between calls.
///
/// # Examples
///
/// ```no_run
/// # use ec_aqhi::{AqhiError, Language, LatLon, RegionCatalog};
/// # #[tokio::main]
/// # async fn main() -> Result<(), AqhiError> {
/// let catalog = RegionCatalog::new()?;
/// let region = catalog
///     .find_closest_region(LatLon(45.5017, -73.5673), Language::French)
///     .await?;
/// println!("{} ({}/{})", region.region_name, region.abbreviation, region.cgndb);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RegionCatalog<F = HttpFetcher> {
    fetcher: F,
    endpoints: Endpoints,
}

impl RegionCatalog<HttpFetcher> {
    /// Creates a catalog reader over HTTP with the default timeout and endpoints.
    pub fn new() -> Result<Self, AqhiError> {
        let fetcher = HttpFetcher::new(DEFAULT_TIMEOUT).map_err(AqhiError::HttpClient)?;
        Ok(Self::with_fetcher(fetcher, Endpoints::default()))
    }
}

impl<F: Fetch> RegionCatalog<F> {
    pub fn with_fetcher(fetcher: F, endpoints: Endpoints) -> Self {
        Self { fetcher, endpoints }
    }

    /// Downloads the catalog and returns every region in it, names in `language`.
    pub async fn list_regions(
        &self,
        language: Language,
    ) -> Result<Vec<Region>, LocateRegionError> {
        list_regions(&self.fetcher, &self.endpoints, language).await
    }

    /// Downloads the catalog and returns the region closest to `location`.
    pub async fn find_closest_region(
        &self,
        location: LatLon,
        language: Language,
    ) -> Result<Region, LocateRegionError> {
        find_closest_region(&self.fetcher, &self.endpoints, location, language).await
    }
}

pub(crate) async fn list_regions<F: Fetch>(
    fetcher: &F,
    endpoints: &Endpoints,
    language: Language,
) -> Result<Vec<Region>, LocateRegionError> {
    let url = endpoints.catalog_url();
    let xml = fetch_document(fetcher, &url, DocumentEncoding::Utf8).await?;
    let regions = parse_region_catalog(&xml, language)?;
    info!("Parsed {} AQHI regions from {}", regions.len(), url);
    Ok(regions)
}

pub(crate) async fn find_closest_region<F: Fetch>(
    fetcher: &F,
    endpoints: &Endpoints,
    location: LatLon,
    language: Language,
) -> Result<Region, LocateRegionError> {
    let regions = list_regions(fetcher, endpoints, language).await?;
    let closest = regions
        .as_slice()
        .nearest(location)
        .ok_or(LocateRegionError::NoRegionsAvailable)?;
    debug!(
        "Closest region to {:?} is {} ({}/{})",
        location, closest.region_name, closest.abbreviation, closest.cgndb
    );
    Ok(closest.clone())
}

/// Flattens the zone/region tree of the catalog into a list of regions.
///
/// Fails as a whole on the first missing attribute or bad coordinate.
pub(crate) fn parse_region_catalog(
    xml: &str,
    language: Language,
) -> Result<Vec<Region>, LocateRegionError> {
    let document = Document::parse(xml).map_err(LocateRegionError::XmlParse)?;
    let zone_name_attribute = language.zone_name_attribute();
    let region_name_attribute = language.region_name_attribute();

    let mut regions = Vec::new();
    for zone in child_elements(document.root_element(), ZONE_TAG) {
        let abbreviation = required_attribute(zone, ZONE_ABBREVIATION_ATTRIBUTE)?;
        let zone_name = required_attribute(zone, zone_name_attribute)?;

        for region in find_all(zone, &["regionList", "region"]) {
            let cgndb = required_attribute(region, "cgndb")?;
            regions.push(Region {
                abbreviation: abbreviation.to_string(),
                zone_name: zone_name.to_string(),
                region_name: required_attribute(region, region_name_attribute)?.to_string(),
                latitude: coordinate(region, cgndb, "latitude")?,
                longitude: coordinate(region, cgndb, "longitude")?,
                cgndb: cgndb.to_string(),
                extra: extra_fields(region),
            });
        }
    }
    Ok(regions)
}

fn required_attribute<'a>(
    node: Node<'a, '_>,
    attribute: &str,
) -> Result<&'a str, LocateRegionError> {
    node.attribute(attribute)
        .ok_or_else(|| LocateRegionError::MissingAttribute {
            element: node.tag_name().name().to_string(),
            attribute: attribute.to_string(),
        })
}

fn coordinate(
    region: Node<'_, '_>,
    cgndb: &str,
    attribute: &'static str,
) -> Result<f64, LocateRegionError> {
    let value = required_attribute(region, attribute)?;
    value
        .trim()
        .parse()
        .map_err(|e| LocateRegionError::InvalidCoordinate {
            region: cgndb.to_string(),
            attribute,
            value: value.to_string(),
            source: e,
        })
}

fn extra_fields(region: Node<'_, '_>) -> BTreeMap<String, String> {
    region
        .children()
        .filter(Node::is_element)
        .map(|child| {
            (
                child.tag_name().name().to_string(),
                child.text().unwrap_or_default().trim().to_string(),
            )
        })
        .collect()
}
