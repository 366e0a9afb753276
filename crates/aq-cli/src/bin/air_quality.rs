//! CLI tool to fetch the current air-quality reading for a location.

use aq_cli::{parse_condition, AdvisoryClient};
use aq_core::ReadingRequest;
use clap::Parser;

/// Current PM2.5, weather and health advice for one location
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Air-quality server URL
    #[arg(long, default_value = "http://localhost:3000")]
    url: String,

    /// Latitude (default: Bangkok)
    #[arg(long, default_value_t = 13.7563)]
    lat: f64,

    /// Longitude (default: Bangkok)
    #[arg(long, default_value_t = 100.5018)]
    lng: f64,

    /// Health conditions, comma separated (asthma,copd,heart,...)
    #[arg(long, value_delimiter = ',')]
    conditions: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let conditions = if args.conditions.is_empty() {
        None
    } else {
        Some(
            args.conditions
                .iter()
                .map(|name| parse_condition(name))
                .collect::<anyhow::Result<Vec<_>>>()?,
        )
    };

    let client = AdvisoryClient::new(&args.url);
    let reading = client
        .air_quality(&ReadingRequest {
            latitude: args.lat,
            longitude: args.lng,
            conditions,
        })
        .await?;

    println!("{} at {}", reading.location, reading.timestamp.to_rfc3339());
    println!("  PM2.5:       {} µg/m³", reading.pm25);
    println!("  Temperature: {} °C", reading.temperature);
    println!("  Humidity:    {} %", reading.humidity);

    if let Some(advice) = &reading.advice {
        println!();
        println!("{}", advice.title);
        for line in &advice.recommendations {
            println!("  - {}", line);
        }
        if let Some(warning) = &advice.sensitive_group_warning {
            println!("  ! {}", warning);
        }
    }

    if let Some(notification) = &reading.notification {
        println!();
        println!("[{:?}] {}", notification.severity, notification.title);
        println!("{}", notification.body);
    }

    Ok(())
}
