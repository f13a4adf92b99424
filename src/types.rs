//! Wire types returned by the geocoding provider.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One tagged fragment of a geocoded address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressComponent {
    /// Full text name (e.g. "New York", "United States")
    pub long_name: String,
    /// Abbreviated name (e.g. "NY", "US")
    pub short_name: String,
    /// Provider tags such as "locality" or "country"
    #[serde(default)]
    pub types: Vec<String>,
}

impl AddressComponent {
    /// Create a new component.
    pub fn new<I, S>(long_name: impl Into<String>, short_name: impl Into<String>, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            long_name: long_name.into(),
            short_name: short_name.into(),
            types: types.into_iter().map(Into::into).collect(),
        }
    }

    /// Check whether the component carries the given tag.
    pub fn has_type(&self, tag: &str) -> bool {
        self.types.iter().any(|t| t == tag)
    }
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

/// Bounding box recommended for displaying a result.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// North-east corner
    pub northeast: LatLng,
    /// South-west corner
    pub southwest: LatLng,
}

/// Precision of a geocoded location.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationType {
    /// Precise street address
    Rooftop,
    /// Interpolated between two precise points
    RangeInterpolated,
    /// Geometric center of a line or polygon
    GeometricCenter,
    /// Approximate location
    #[default]
    Approximate,
}

/// Location data of a geocoded result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    /// Geocoded coordinates
    pub location: LatLng,
    /// Precision of `location`
    #[serde(default)]
    pub location_type: LocationType,
    /// Recommended viewport
    #[serde(default)]
    pub viewport: Option<Viewport>,
}

/// A single geocoded result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeocodeResult {
    /// Address fragments in provider order
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
    /// Human readable address
    #[serde(default)]
    pub formatted_address: String,
    /// Coordinates and precision
    #[serde(default)]
    pub geometry: Geometry,
    /// Provider identifier of the place
    #[serde(default)]
    pub place_id: String,
    /// Tags of the whole result
    #[serde(default)]
    pub types: Vec<String>,
    /// Set when the provider only matched part of the request
    #[serde(default)]
    pub partial_match: bool,
}

/// Status code of a geocoding response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    /// At least one result was returned
    Ok,
    /// The lookup succeeded but found nothing
    ZeroResults,
    /// Billing or key problem
    OverDailyLimit,
    /// Quota exceeded
    OverQueryLimit,
    /// The request was rejected, usually because of the API key
    RequestDenied,
    /// The query was missing or malformed
    InvalidRequest,
    /// Server side error, the same request may succeed later
    UnknownError,
    /// Any status not known to this crate
    Other(String),
}

impl Status {
    /// The literal status string used by the provider.
    pub fn as_str(&self) -> &str {
        match self {
            Status::Ok => "OK",
            Status::ZeroResults => "ZERO_RESULTS",
            Status::OverDailyLimit => "OVER_DAILY_LIMIT",
            Status::OverQueryLimit => "OVER_QUERY_LIMIT",
            Status::RequestDenied => "REQUEST_DENIED",
            Status::InvalidRequest => "INVALID_REQUEST",
            Status::UnknownError => "UNKNOWN_ERROR",
            Status::Other(status) => status.as_str(),
        }
    }

    /// Parse from the literal status string.
    pub fn from_str(status: &str) -> Self {
        match status {
            "OK" => Status::Ok,
            "ZERO_RESULTS" => Status::ZeroResults,
            "OVER_DAILY_LIMIT" => Status::OverDailyLimit,
            "OVER_QUERY_LIMIT" => Status::OverQueryLimit,
            "REQUEST_DENIED" => Status::RequestDenied,
            "INVALID_REQUEST" => Status::InvalidRequest,
            "UNKNOWN_ERROR" => Status::UnknownError,
            _ => Status::Other(status.to_string()),
        }
    }

    /// Whether the status signals a successful lookup.
    pub fn is_ok(&self) -> bool {
        matches!(self, Status::Ok)
    }
}

impl From<String> for Status {
    fn from(status: String) -> Self {
        Status::from_str(&status)
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top level body of a geocoding response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResponse {
    /// Outcome of the lookup
    pub status: Status,
    /// Results, best match first
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    /// Explanation sent with non-`OK` statuses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl GeocodeResponse {
    /// Build a response without results carrying only a status.
    pub fn with_status(status: Status) -> Self {
        Self {
            status,
            results: Vec::new(),
            error_message: None,
        }
    }
}
