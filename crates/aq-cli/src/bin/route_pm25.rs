//! CLI tool to score routes by PM2.5 exposure.
//!
//! Either `--end-lat/--end-lng` or `--destination` selects the target;
//! coordinates win when both are given.

use aq_cli::{route_summary, AdvisoryClient};
use aq_core::{Coordinate, RouteRequest};
use clap::Parser;

/// Rank candidate routes by average PM2.5 along the way
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Air-quality server URL
    #[arg(long, default_value = "http://localhost:3000")]
    url: String,

    /// Start latitude (default: Bangkok)
    #[arg(long, default_value_t = 13.7563)]
    start_lat: f64,

    /// Start longitude (default: Bangkok)
    #[arg(long, default_value_t = 100.5018)]
    start_lng: f64,

    #[arg(long, requires = "end_lng")]
    end_lat: Option<f64>,

    #[arg(long, requires = "end_lat")]
    end_lng: Option<f64>,

    /// Free-text destination, geocoded by the server
    #[arg(long)]
    destination: Option<String>,

    /// Print the raw JSON response
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let start = Coordinate::new(args.start_lat, args.start_lng);

    let request = match (args.end_lat, args.end_lng, args.destination) {
        (Some(lat), Some(lng), _) => RouteRequest::between(start, Coordinate::new(lat, lng)),
        (_, _, Some(destination)) => RouteRequest::to_destination(start, destination),
        _ => anyhow::bail!("either --end-lat/--end-lng or --destination is required"),
    };

    let client = AdvisoryClient::new(&args.url);
    let response = client.score_route(&request).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("Scored {} route(s):", response.routes.len());
    for route in &response.routes {
        println!("  {}", route_summary(route));
    }
    println!();
    println!(
        "Recommended: route #{} - {}",
        response.recommended_route.route_index, response.recommended_route.health_message
    );

    Ok(())
}
