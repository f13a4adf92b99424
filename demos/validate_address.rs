//! Address validation example
//!
//! Looks up each address given on the command line and prints the best match.
//!
//! Run with: GOOGLE_MAPS_API_KEY=... cargo run --example validate_address -- "1600 Amphitheatre Pkwy"

use geocode_address::Geocoder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("geocode-address Validation Example");
    println!("==================================");

    let geocoder = Geocoder::from_env()?;

    let mut addresses: Vec<String> = std::env::args().skip(1).collect();
    if addresses.is_empty() {
        addresses = vec![
            "1600 Amphitheatre Parkway, Mountain View, CA".to_string(),
            "221B Baker Street, London".to_string(),
            "This place does not exist 12345".to_string(),
        ];
    }

    for address in &addresses {
        println!("\nOriginal: {address}");

        match geocoder.validate_address(address).await {
            Ok(result) => {
                println!("  Formatted: {}", result.formatted_address);
                println!(
                    "  Location: {:.6}, {:.6} ({:?})",
                    result.geometry.location.lat,
                    result.geometry.location.lng,
                    result.geometry.location_type
                );
                println!("  Place ID: {}", result.place_id);
                if result.partial_match {
                    println!("  Note: partial match only");
                }
            }
            Err(e) => {
                println!("  Error: {e}");
            }
        }
    }

    println!("\nExample complete!");
    Ok(())
}
