//! Energidata demo binary.
//!
//! Fetches day-ahead prices and prints three small reports: latest DK1
//! prices, a DK1/DK2 comparison and the peak/off-peak hours of DK1.

mod report;

use energidata_sdk::{ClientConfig, EnergiDataClient, PriceArea};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SEPARATOR: &str = "----------------------------------------";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,energidata_sdk=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration from environment
    let config = ClientConfig::from_env()?;
    tracing::info!("Energi Data Service URL: {}", config.base_url);
    tracing::info!("Request timeout: {:?}", config.timeout);

    let client = EnergiDataClient::new(config)?;

    println!("=== Energi Data Service Client Example ===");
    println!();

    run(&client).await?;

    println!();
    println!("Example completed!");
    Ok(())
}

async fn run(client: &EnergiDataClient) -> Result<(), energidata_sdk::ClientError> {
    // Example 1: latest DK1 prices
    println!("Getting day-ahead prices for DK1 (last 24 hours)...");
    let dk1 = client
        .fetch_day_ahead_prices_for_area(PriceArea::DK1.as_str(), Some(24))
        .await?;
    println!("Found {} price records", dk1.len());
    println!();
    println!("Latest prices:");
    for line in report::latest_prices(&dk1, 5) {
        println!("{}", line);
    }

    println!();
    println!("{}", SEPARATOR);
    println!();

    // Example 2: DK1 vs DK2
    println!("Comparing prices between DK1 and DK2...");
    let both = client
        .fetch_day_ahead_prices(&[PriceArea::DK1, PriceArea::DK2], Some(20))
        .await?;
    match report::area_comparison(&both, &PriceArea::DK1, &PriceArea::DK2) {
        Some(lines) => lines.iter().for_each(|line| println!("{}", line)),
        None => tracing::warn!("no records for one of the areas"),
    }

    println!();
    println!("{}", SEPARATOR);
    println!();

    // Example 3: peak and off-peak hours
    println!("Finding peak and off-peak hours for DK1...");
    let daily = client
        .fetch_day_ahead_prices_for_area(PriceArea::DK1.as_str(), Some(48))
        .await?;
    match report::peak_hours(&daily) {
        Some(lines) => lines.iter().for_each(|line| println!("{}", line)),
        None => tracing::warn!("no DK1 records returned"),
    }

    Ok(())
}
