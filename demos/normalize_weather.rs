use polars::prelude::*;
use std::env;
use weather_crawler::{normalize_weather_data, WeatherCrawlerError};

fn main() -> Result<(), WeatherCrawlerError> {
    env_logger::init();
    configure_polars_display();

    let method = env::args().nth(1).unwrap_or_else(|| "zscore".to_string());

    let weather_data = df!(
        "temperature" => [20, 22, 19, 25, 18, 30, 15],
        "pressure" => [1013, 1012, 1015, 1010, 1014, 1011, 1016],
        "humidity" => [60, 65, 58, 70, 55, 75, 50],
    )
    .map_err(weather_crawler::NormalizeError::from)?;

    println!("Raw data:\n{}", weather_data);

    let (normalized, params) = normalize_weather_data(&weather_data, &method)?;

    println!("Applied {} normalization", params.method);
    println!("  columns: {:?}", params.column_names());
    println!(
        "  shape: {:?} -> {:?}",
        weather_data.shape(),
        normalized.shape()
    );
    println!("\nNormalized:\n{}", normalized);

    for name in params.column_names() {
        let values = normalized
            .column(name)
            .and_then(|c| c.f64().cloned())
            .map_err(weather_crawler::NormalizeError::from)?;
        println!(
            "{:<12} mean {:>9.5}  std {:>9.5}  min {:>9.5}  max {:>9.5}",
            name,
            values.mean().unwrap_or(f64::NAN),
            values.std(1).unwrap_or(f64::NAN),
            values.min().unwrap_or(f64::NAN),
            values.max().unwrap_or(f64::NAN),
        );
    }

    if let Ok(json) = serde_json::to_string_pretty(&params) {
        println!("\nParameters:\n{}", json);
    }

    Ok(())
}

fn configure_polars_display() {
    // show every column
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
}
