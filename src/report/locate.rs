// Location of a farm on the state map viewer.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::time::Duration;

use crate::report::*;

#[derive(Debug, Snafu)]
pub enum GeocodeError {
    #[snafu(display("Geocoding request failed: {source}"))]
    Request { source: reqwest::Error },
    #[snafu(display("Invalid coordinate in the geocoding response: {value:?}"))]
    InvalidCoordinate { value: String },
}

/// A WGS84 position, in degrees.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct AddressQuery {
    pub street: String,
    pub house_number: String,
    pub postal_code: String,
    pub city: String,
}

impl AddressQuery {
    pub fn from_project(project: &FarmProject) -> AddressQuery {
        AddressQuery {
            street: project.street.clone(),
            house_number: project.house_number.clone(),
            postal_code: project.postal_code.clone(),
            city: project.city.clone(),
        }
    }

    pub fn is_resolvable(&self) -> bool {
        is_resolvable_address(&self.street, &self.city)
    }

    /// The text of the map marker.
    pub fn label(&self) -> String {
        address_label(&self.street, &self.house_number, &self.postal_code, &self.city)
    }
}

/// A service that finds the position of a postal address.
///
/// `Ok(None)` means that the service answered but did not find the address.
pub trait Geocoder {
    fn locate(&self, query: &AddressQuery) -> Result<Option<GeoPoint>, GeocodeError>;
}

#[derive(Deserialize, Debug)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

/// Geocoder backed by the structured search of a Nominatim server.
pub struct NominatimGeocoder {
    http: reqwest::blocking::Client,
    endpoint: String,
    country: String,
}

impl NominatimGeocoder {
    pub fn new(settings: &GeocoderSettings) -> Result<NominatimGeocoder, reqwest::Error> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(NominatimGeocoder {
            http,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            country: settings.country.clone(),
        })
    }
}

impl Geocoder for NominatimGeocoder {
    fn locate(&self, query: &AddressQuery) -> Result<Option<GeoPoint>, GeocodeError> {
        let street = format!("{} {}", query.house_number, query.street);
        let params = [
            ("street", street.trim()),
            ("postalcode", query.postal_code.as_str()),
            ("city", query.city.as_str()),
            ("country", self.country.as_str()),
            ("format", "json"),
            ("limit", "1"),
        ];
        let places: Vec<NominatimPlace> = self
            .http
            .get(format!("{}/search", self.endpoint))
            .query(&params)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json::<Vec<NominatimPlace>>())
            .context(RequestSnafu {})?;
        debug!("NominatimGeocoder: {} place(s) found", places.len());

        match places.first() {
            None => Ok(None),
            Some(place) => Ok(Some(GeoPoint {
                lat: parse_coordinate(&place.lat)?,
                lon: parse_coordinate(&place.lon)?,
            })),
        }
    }
}

fn parse_coordinate(s: &str) -> Result<f64, GeocodeError> {
    match s.trim().parse::<f64>() {
        Ok(x) if x.is_finite() => Ok(x),
        _ => InvalidCoordinateSnafu { value: s }.fail(),
    }
}

/// Forward transverse Mercator projection (Krüger series, 6th order).
///
/// Accurate to well below a millimeter within the usual zone width.
#[derive(PartialEq, Debug, Clone)]
pub struct TransverseMercator {
    lon0: f64,
    k0: f64,
    false_easting: f64,
    false_northing: f64,
    // Radius of the rectifying sphere.
    a_hat: f64,
    e: f64,
    alpha: [f64; 6],
}

impl TransverseMercator {
    /// `a` and `f` describe the ellipsoid, `lon0` is the central meridian in degrees.
    pub fn new(
        a: f64,
        f: f64,
        lon0: f64,
        k0: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> TransverseMercator {
        let n = f / (2.0 - f);
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n3 * n;
        let n5 = n4 * n;
        let n6 = n5 * n;
        let a_hat = a / (1.0 + n) * (1.0 + n2 / 4.0 + n4 / 64.0 + n6 / 256.0);
        let alpha = [
            n / 2.0 - 2.0 * n2 / 3.0 + 5.0 * n3 / 16.0 + 41.0 * n4 / 180.0 - 127.0 * n5 / 288.0
                + 7891.0 * n6 / 37800.0,
            13.0 * n2 / 48.0 - 3.0 * n3 / 5.0 + 557.0 * n4 / 1440.0 + 281.0 * n5 / 630.0
                - 1983433.0 * n6 / 1935360.0,
            61.0 * n3 / 240.0 - 103.0 * n4 / 140.0 + 15061.0 * n5 / 26880.0
                + 167603.0 * n6 / 181440.0,
            49561.0 * n4 / 161280.0 - 179.0 * n5 / 168.0 + 6601661.0 * n6 / 7257600.0,
            34729.0 * n5 / 80640.0 - 3418889.0 * n6 / 1995840.0,
            212378941.0 * n6 / 319334400.0,
        ];
        TransverseMercator {
            lon0: lon0.to_radians(),
            k0,
            false_easting,
            false_northing,
            a_hat,
            e: 2.0 * n.sqrt() / (1.0 + n),
            alpha,
        }
    }

    /// Projects a position. Returns (easting, northing) in meters.
    pub fn forward(&self, p: GeoPoint) -> (f64, f64) {
        let phi = p.lat.to_radians();
        let lambda = p.lon.to_radians() - self.lon0;

        let sin_phi = phi.sin();
        let t = (sin_phi.atanh() - self.e * (self.e * sin_phi).atanh()).sinh();
        let xi_p = t.atan2(lambda.cos());
        let eta_p = (lambda.sin() / (1.0 + t * t).sqrt()).atanh();

        let mut xi = xi_p;
        let mut eta = eta_p;
        for (idx, a) in self.alpha.iter().enumerate() {
            let k = 2.0 * (idx + 1) as f64;
            xi += a * (k * xi_p).sin() * (k * eta_p).cosh();
            eta += a * (k * xi_p).cos() * (k * eta_p).sinh();
        }

        (
            self.false_easting + self.k0 * self.a_hat * eta,
            self.false_northing + self.k0 * self.a_hat * xi,
        )
    }
}

/// ETRS89 / UTM zone 32N (EPSG:25832), on the GRS80 ellipsoid.
pub static UTM32N: Lazy<TransverseMercator> = Lazy::new(|| {
    TransverseMercator::new(6378137.0, 1.0 / 298.257222101, 9.0, 0.9996, 500000.0, 0.0)
});

/// Turns an address into a link to the map viewer.
pub struct LocationResolver<G: Geocoder> {
    geocoder: G,
    map: MapSettings,
}

impl<G: Geocoder> LocationResolver<G> {
    pub fn new(geocoder: G, map: MapSettings) -> LocationResolver<G> {
        LocationResolver { geocoder, map }
    }

    /// The map link centered on the address, or None if the address cannot be located.
    ///
    /// A blank street or city is never sent to the geocoder. Service failures
    /// are logged and reported as None.
    pub fn resolve(
        &self,
        street: &str,
        house_number: &str,
        postal_code: &str,
        city: &str,
        scale: u32,
    ) -> Option<String> {
        let query = AddressQuery {
            street: street.to_string(),
            house_number: house_number.to_string(),
            postal_code: postal_code.to_string(),
            city: city.to_string(),
        };
        if !query.is_resolvable() {
            debug!("resolve: street or city missing");
            return None;
        }
        let point = match self.geocoder.locate(&query) {
            Ok(Some(p)) => p,
            Ok(None) => {
                warn!("No location found for {:?}", query);
                return None;
            }
            Err(e) => {
                warn!("Geocoding failed for {:?}: {}", query, e);
                return None;
            }
        };
        let (easting, northing) = UTM32N.forward(point);
        let (easting, northing) = (easting.round() as i64, northing.round() as i64);
        info!(
            "Location: {:?} -> {}, {} (EPSG:25832)",
            point, easting, northing
        );

        Some(map_url(&self.map, &query.label(), scale, easting, northing))
    }
}

pub fn map_url(map: &MapSettings, label: &str, scale: u32, easting: i64, northing: i64) -> String {
    format!(
        "{}?bg={}&text={}&scale={}&center={},{}&icon=true",
        map.base_url,
        map.basemap,
        urlencoding::encode(label),
        scale,
        easting,
        northing
    )
}
