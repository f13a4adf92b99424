//! Location lookup example
//!
//! Resolves city or state names into city, state and country.
//!
//! Run with: GOOGLE_MAPS_API_KEY=... cargo run --example find_address_info -- Brooklyn

use geocode_address::{Error, Geocoder};

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    println!("geocode-address Location Info Example");
    println!("=====================================");

    let geocoder = Geocoder::from_env()?;

    let mut locations: Vec<String> = std::env::args().skip(1).collect();
    if locations.is_empty() {
        locations = vec!["Brooklyn".to_string(), "Texas".to_string(), "Zurich".to_string()];
    }

    for location in &locations {
        println!("\nLocation: {location}");

        match geocoder.find_address_info(location).await {
            Ok(info) if info.is_empty() => println!("  No city, state or country reported"),
            Ok(info) => {
                if let Some(city) = &info.city {
                    println!("  City: {city}");
                }
                if let Some(state) = &info.state {
                    println!("  State: {state}");
                }
                if let Some(country) = &info.country {
                    println!("  Country: {country}");
                }
            }
            Err(e) => println!("  Error: {e}"),
        }
    }

    println!("\nExample complete!");
    Ok(())
}
