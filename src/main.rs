use anyhow::{bail, Result};
use chrono::Local;
use clap::Parser;

use pogoda_core::{App, AppError, Lookup};

/// Look up the weather for a place and show the next 24 hours
#[derive(Debug, Parser)]
#[command(name = "pogoda", version)]
struct Cli {
    /// Place name, e.g. "Moscow" (display name when used with --lat/--lon)
    place: Option<String>,

    /// Latitude of an already resolved place
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Longitude of an already resolved place
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,

    /// List autocomplete suggestions for TERM instead of fetching weather
    #[arg(long, value_name = "TERM", conflicts_with_all = ["place", "lat", "lon"])]
    suggest: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    pogoda_core::init()?;
    let cli = Cli::parse();

    let app = App::new()?;

    if let Some(term) = cli.suggest.as_deref() {
        let suggestions = app.suggest(term).await;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&suggestions)?);
        } else if suggestions.is_empty() {
            println!("No suggestions for {:?}", term);
        } else {
            for s in &suggestions {
                println!("{:>10.4} {:>10.4}  {}", s.latitude, s.longitude, s.display_name);
            }
        }
        return Ok(());
    }

    // Local wall-clock time; the provider answers in the place's local time
    let now = Local::now().naive_local();

    let result = match (cli.lat, cli.lon, cli.place.as_deref()) {
        (Some(lat), Some(lon), name) => {
            let name = name
                .map(str::to_string)
                .unwrap_or_else(|| format!("{:.4}, {:.4}", lat, lon));
            app.lookup_coordinates(lat, lon, &name, now).await
        }
        (_, _, Some(place)) => app.lookup(place, now).await,
        _ => bail!("Specify a place name, --lat/--lon, or --suggest"),
    };

    match result {
        Ok(lookup) if cli.json => println!("{}", serde_json::to_string_pretty(&lookup)?),
        Ok(lookup) => print_lookup(&lookup),
        Err(e) => {
            report(&e);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn report(e: &AppError) {
    tracing::error!("Lookup failed: {}", e);
    eprintln!("{}", e.user_message());
}

fn print_lookup(lookup: &Lookup) {
    println!("{}", lookup.place.display_name);

    let current = &lookup.forecast.current;
    if let Some(temperature) = current.get("temperature").and_then(|v| v.as_f64()) {
        let wind = current
            .get("windspeed")
            .and_then(|v| v.as_f64())
            .map(|w| format!(", wind {:.1} km/h", w))
            .unwrap_or_default();
        println!("Now: {:.1}°C{}", temperature, wind);
    }

    if lookup.forecast.hourly.is_empty() {
        println!("No hourly forecast available");
        return;
    }

    println!();
    for sample in &lookup.forecast.hourly {
        println!(
            "{}  {:>6}°C  {:>5} mm  {:>5} km/h  {}",
            sample.timestamp.format("%d.%m %H:%M"),
            cell(sample.temperature),
            cell(sample.precipitation),
            cell(sample.wind_speed),
            sample.condition_label
        );
    }
}

/// One decimal, or a dash when the provider sent no value
fn cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.1}", v))
}
