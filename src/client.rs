//! Access to the external geocoding service.

use std::future::Future;

use crate::error::Result;
use crate::types::GeocodeResponse;

/// A service that turns free-text addresses into geocoded results.
///
/// Implementations only report transport failures as errors. Interpreting the
/// response [`Status`](crate::Status) is left to [`Geocoder`](crate::Geocoder).
pub trait GeocodingProvider {
    /// Look up a single address or location string.
    fn geocode(&self, address: &str) -> impl Future<Output = Result<GeocodeResponse>> + Send;
}

impl<P: GeocodingProvider> GeocodingProvider for &P {
    fn geocode(&self, address: &str) -> impl Future<Output = Result<GeocodeResponse>> + Send {
        (**self).geocode(address)
    }
}

#[cfg(feature = "http-client")]
pub use self::google::GoogleGeocodingClient;

#[cfg(feature = "http-client")]
mod google {
    use std::fmt;
    use std::time::Duration;

    use super::GeocodingProvider;
    use crate::GeocoderConfig;
    use crate::error::{Error, Result};
    use crate::types::GeocodeResponse;

    /// Geocoding provider backed by the Google Geocoding HTTP API.
    #[derive(Clone)]
    pub struct GoogleGeocodingClient {
        http: reqwest::Client,
        config: GeocoderConfig,
    }

    impl GoogleGeocodingClient {
        /// Create a new client from the given configuration.
        ///
        /// # Errors
        ///
        /// Returns an error if the API key is blank or the HTTP client cannot be built.
        pub fn new(config: GeocoderConfig) -> Result<Self> {
            if config.api_key.trim().is_empty() {
                return Err(Error::config("API key must not be empty"));
            }

            let http = reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_seconds))
                .build()
                .map_err(|e| Error::transport(format!("Failed to build HTTP client: {e}")))?;

            Ok(Self { http, config })
        }

        /// Get the configuration used by this client.
        pub fn config(&self) -> &GeocoderConfig {
            &self.config
        }

        pub(crate) fn request(&self, address: &str) -> reqwest::RequestBuilder {
            let mut query = vec![("address", address), ("key", self.config.api_key.as_str())];
            if let Some(language) = &self.config.language {
                query.push(("language", language.as_str()));
            }
            if let Some(region) = &self.config.region {
                query.push(("region", region.as_str()));
            }
            self.http.get(&self.config.base_url).query(&query)
        }
    }

    impl fmt::Debug for GoogleGeocodingClient {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("GoogleGeocodingClient")
                .field("config", &self.config)
                .finish_non_exhaustive()
        }
    }

    impl GeocodingProvider for GoogleGeocodingClient {
        async fn geocode(&self, address: &str) -> Result<GeocodeResponse> {
            log::debug!("Geocoding {address:?} via {}", self.config.base_url);

            let response = self
                .request(address)
                .send()
                .await
                .map_err(|e| Error::transport(format!("Request failed: {}", e.without_url())))?;

            if !response.status().is_success() {
                return Err(Error::transport(format!(
                    "Request failed with status: {}",
                    response.status()
                )));
            }

            response
                .json::<GeocodeResponse>()
                .await
                .map_err(|e| Error::transport(format!("Failed to read response: {}", e.without_url())))
        }
    }

    #[cfg(test)]
    mod tests {
        use assert_matches::assert_matches;
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        use super::*;
        use crate::Geocoder;

        /// Serve a single canned HTTP reply on a local port and return its URL.
        async fn serve_once(status_line: &'static str, body: &'static str) -> String {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();

            tokio::spawn(async move {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut buf = vec![0u8; 8192];
                let mut read = 0;
                loop {
                    let n = socket.read(&mut buf[read..]).await.unwrap();
                    read += n;
                    if n == 0 || buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                let reply = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                socket.write_all(reply.as_bytes()).await.unwrap();
                socket.shutdown().await.ok();
            });

            format!("http://{addr}/json")
        }

        fn local_config(base_url: String) -> GeocoderConfig {
            GeocoderConfig::builder("secret-key")
                .base_url(base_url)
                .timeout_seconds(5)
                .build()
        }

        fn config() -> GeocoderConfig {
            GeocoderConfig::builder("secret-key")
                .base_url("https://geocode.test/json")
                .build()
        }

        fn query_pairs(client: &GoogleGeocodingClient, address: &str) -> Vec<(String, String)> {
            let request = client.request(address).build().unwrap();
            request
                .url()
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect()
        }

        #[test]
        fn test_request_carries_address_and_key() {
            let client = GoogleGeocodingClient::new(config()).unwrap();
            let request = client.request("1600 Amphitheatre Pkwy").build().unwrap();

            assert_eq!(request.method(), reqwest::Method::GET);
            assert_eq!(request.url().host_str(), Some("geocode.test"));
            assert_eq!(
                query_pairs(&client, "1600 Amphitheatre Pkwy"),
                vec![
                    ("address".to_string(), "1600 Amphitheatre Pkwy".to_string()),
                    ("key".to_string(), "secret-key".to_string()),
                ]
            );
        }

        #[test]
        fn test_request_carries_hints() {
            let config = GeocoderConfig::builder("secret-key")
                .language("de")
                .region("ch")
                .build();
            let client = GoogleGeocodingClient::new(config).unwrap();
            let pairs = query_pairs(&client, "Bern");

            assert!(pairs.contains(&("language".to_string(), "de".to_string())));
            assert!(pairs.contains(&("region".to_string(), "ch".to_string())));
        }

        #[test]
        fn test_blank_api_key_is_rejected() {
            let result = GoogleGeocodingClient::new(GeocoderConfig::builder("  ").build());
            assert_matches!(result, Err(Error::Config { .. }));
        }

        #[test]
        fn test_debug_redacts_api_key() {
            let client = GoogleGeocodingClient::new(config()).unwrap();
            assert!(!format!("{client:?}").contains("secret-key"));
        }

        #[tokio::test]
        async fn test_unreachable_host_is_transport_error() {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            drop(listener);

            let client = GoogleGeocodingClient::new(local_config(format!("http://{addr}/json"))).unwrap();

            let err = client.geocode("anywhere").await.unwrap_err();
            assert_matches!(err, Error::Transport { .. });
            assert!(!err.to_string().contains("secret-key"));
        }

        #[tokio::test]
        async fn test_server_error_is_transport_error() {
            let url = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;
            let client = GoogleGeocodingClient::new(local_config(url)).unwrap();

            let err = client.geocode("Berlin").await.unwrap_err();
            assert_matches!(err, Error::Transport { .. });
            assert!(err.to_string().contains("500"));
            assert!(!err.to_string().contains("secret-key"));
        }

        #[tokio::test]
        async fn test_undecodable_body_is_transport_error() {
            let url = serve_once("200 OK", "<html>not json</html>").await;
            let client = GoogleGeocodingClient::new(local_config(url)).unwrap();

            let err = client.geocode("Berlin").await.unwrap_err();
            assert_matches!(err, Error::Transport { .. });
            assert!(!err.to_string().contains("secret-key"));
        }

        #[tokio::test]
        async fn test_zero_results_reply_names_status() {
            let url = serve_once("200 OK", r#"{"status":"ZERO_RESULTS","results":[]}"#).await;
            let geocoder = Geocoder::new(local_config(url)).unwrap();

            let err = geocoder.find_address_info("Atlantis").await.unwrap_err();
            assert_matches!(err.root(), Error::Geocoding { .. });
            assert!(err.to_string().contains("ZERO_RESULTS"));
            assert!(!err.to_string().contains("secret-key"));
        }

        #[tokio::test]
        async fn test_ok_reply_is_decoded_and_parsed() {
            let url = serve_once(
                "200 OK",
                r#"{"status":"OK","results":[{"address_components":[
                    {"long_name":"Zurich","short_name":"Zurich","types":["locality","political"]},
                    {"long_name":"Zurich","short_name":"ZH","types":["administrative_area_level_1","political"]},
                    {"long_name":"Switzerland","short_name":"CH","types":["country","political"]}
                ],"formatted_address":"Zurich, Switzerland"}]}"#,
            )
            .await;
            let geocoder = Geocoder::new(local_config(url)).unwrap();

            let info = geocoder.find_address_info("Zurich").await.unwrap();
            assert_eq!(info.city.as_deref(), Some("Zurich"));
            assert_eq!(info.state.as_deref(), Some("ZH"));
            assert_eq!(info.country.as_deref(), Some("Switzerland"));
        }
    }
}
