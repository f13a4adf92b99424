//! # geocode-address
//!
//! Address validation and city/state/country lookup on top of the Google
//! Geocoding API.
//!
//! ## Features
//!
//! - **Address Validation**: Resolve a free-text address to its best geocoded match
//! - **Location Info**: Reduce a location to its city, state and country
//! - **Pluggable Provider**: Swap the HTTP client for any [`GeocodingProvider`]
//! - **Explicit Credentials**: The API key is configuration, never a constant
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use geocode_address::{Geocoder, GeocoderConfig};
//!
//! # async fn run() -> geocode_address::Result<()> {
//! let geocoder = Geocoder::new(GeocoderConfig::from_env()?)?;
//!
//! let info = geocoder.find_address_info("Brooklyn").await?;
//! println!("City: {}", info.city.unwrap_or_default());
//! println!("State: {}", info.state.unwrap_or_default());
//! println!("Country: {}", info.country.unwrap_or_default());
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(rust_2018_idioms)]

use std::fmt;

pub mod client;
pub mod error;
pub mod parser;
pub mod types;

// Re-export main API
#[cfg(feature = "http-client")]
pub use client::GoogleGeocodingClient;
pub use client::GeocodingProvider;
pub use error::{Error, Operation, Result};
pub use parser::{AddressComponentParser, AddressField, ParsedAddress};
pub use types::*;

/// Default endpoint of the Google Geocoding API.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "GOOGLE_MAPS_API_KEY";
/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const ENV_BASE_URL: &str = "GOOGLE_MAPS_GEOCODE_URL";
/// Environment variable holding the language hint.
pub const ENV_LANGUAGE: &str = "GOOGLE_MAPS_LANGUAGE";
/// Environment variable holding the region hint.
pub const ENV_REGION: &str = "GOOGLE_MAPS_REGION";

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Main entry point for address lookups.
///
/// Wraps a [`GeocodingProvider`] and turns its raw responses into either a
/// usable result or a single descriptive [`Error`]. Nothing is retried or cached.
///
/// # Examples
///
/// ```rust,no_run
/// use geocode_address::{Geocoder, GeocoderConfig};
///
/// # async fn run() -> geocode_address::Result<()> {
/// let config = GeocoderConfig::builder("my-api-key").build();
/// let geocoder = Geocoder::new(config)?;
///
/// let result = geocoder.validate_address("1600 Amphitheatre Parkway, Mountain View, CA").await?;
/// println!("{}", result.formatted_address);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Geocoder<P> {
    provider: P,
    parser: AddressComponentParser,
}

#[cfg(feature = "http-client")]
impl Geocoder<GoogleGeocodingClient> {
    /// Create a geocoder talking to the Google Geocoding API.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is unusable, such as a blank API key.
    pub fn new(config: GeocoderConfig) -> Result<Self> {
        Ok(Self::with_provider(GoogleGeocodingClient::new(config)?))
    }

    /// Create a geocoder configured from the environment.
    ///
    /// See [`GeocoderConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::new(GeocoderConfig::from_env()?)
    }
}

impl<P: GeocodingProvider> Geocoder<P> {
    /// Create a geocoder on top of a custom provider.
    pub fn with_provider(provider: P) -> Self {
        Self {
            provider,
            parser: AddressComponentParser::new(),
        }
    }

    /// Get the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Validate an address, returning its best geocoded match.
    ///
    /// # Errors
    ///
    /// Every failure is an [`Error::Lookup`] tagged with
    /// [`Operation::ValidateAddress`]. Its [`Error::root`] is
    /// [`Error::Geocoding`] if the provider reports any status other than `OK`,
    /// and [`Error::Transport`] if the provider cannot be reached.
    pub async fn validate_address(&self, address: &str) -> Result<GeocodeResult> {
        self.lookup(address)
            .await
            .map_err(|e| Error::lookup(Operation::ValidateAddress, e))
            .inspect_err(|e| log::warn!("{e} ({address:?})"))
    }

    /// Resolve a city or state into its city, state and country.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`Geocoder::validate_address`], tagged
    /// with [`Operation::FindAddressInfo`]. A successful lookup never fails in
    /// the parsing step; fields the provider did not report are simply absent.
    pub async fn find_address_info(&self, location: &str) -> Result<ParsedAddress> {
        let result = self
            .lookup(location)
            .await
            .map_err(|e| Error::lookup(Operation::FindAddressInfo, e))
            .inspect_err(|e| log::warn!("{e} ({location:?})"))?;
        Ok(self.parser.parse(&result.address_components))
    }

    async fn lookup(&self, address: &str) -> Result<GeocodeResult> {
        let GeocodeResponse {
            status,
            results,
            error_message,
        } = self.provider.geocode(address).await?;

        if !status.is_ok() {
            return Err(Error::geocoding(status, error_message));
        }

        log::debug!("Geocoding {address:?} returned {} result(s)", results.len());
        results
            .into_iter()
            .next()
            .ok_or_else(|| Error::invalid_response("status OK without any result"))
    }
}

/// Configuration of the geocoding client.
///
/// The API key is redacted from the `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct GeocoderConfig {
    /// API key sent with every request
    pub api_key: String,

    /// Endpoint of the geocoding API
    pub base_url: String,

    /// Request timeout
    pub timeout_seconds: u64,

    /// Language of the returned names (e.g. "en", "de")
    pub language: Option<String>,

    /// Region bias as a ccTLD code (e.g. "us", "ch")
    pub region: Option<String>,
}

impl GeocoderConfig {
    /// Create a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geocode_address::GeocoderConfig;
    ///
    /// let config = GeocoderConfig::builder("my-api-key")
    ///     .language("en")
    ///     .timeout_seconds(10)
    ///     .build();
    /// assert_eq!(config.timeout_seconds, 10);
    /// ```
    pub fn builder(api_key: impl Into<String>) -> GeocoderConfigBuilder {
        GeocoderConfigBuilder::new(api_key)
    }

    /// Load the configuration from environment variables.
    ///
    /// `GOOGLE_MAPS_API_KEY` is required. `GOOGLE_MAPS_GEOCODE_URL`,
    /// `GOOGLE_MAPS_LANGUAGE` and `GOOGLE_MAPS_REGION` are optional.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or blank.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the configuration through an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_key = var(ENV_API_KEY)
            .ok_or_else(|| Error::config(format!("{ENV_API_KEY} is not set")))?;

        let mut builder = Self::builder(api_key);
        if let Some(base_url) = var(ENV_BASE_URL) {
            builder = builder.base_url(base_url);
        }
        if let Some(language) = var(ENV_LANGUAGE) {
            builder = builder.language(language);
        }
        if let Some(region) = var(ENV_REGION) {
            builder = builder.region(region);
        }
        Ok(builder.build())
    }
}

impl fmt::Debug for GeocoderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeocoderConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("language", &self.language)
            .field("region", &self.region)
            .finish()
    }
}

/// Builder for GeocoderConfig.
#[derive(Debug, Clone)]
pub struct GeocoderConfigBuilder {
    config: GeocoderConfig,
}

impl GeocoderConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            config: GeocoderConfig {
                api_key: api_key.into(),
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
                language: None,
                region: None,
            },
        }
    }

    /// Set the API endpoint.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout_seconds(mut self, seconds: u64) -> Self {
        self.config.timeout_seconds = seconds;
        self
    }

    /// Set the language hint.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.config.language = Some(language.into());
        self
    }

    /// Set the region hint.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.config.region = Some(region.into());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> GeocoderConfig {
        self.config
    }
}
