use weather_crawler::{WeatherCrawler, WeatherCrawlerError};

#[tokio::main]
async fn main() -> Result<(), WeatherCrawlerError> {
    // Set RUST_LOG=info (or debug) to see per-day parsing output.
    env_logger::init();

    let city_code = "101090114"; // Luquan, Shijiazhuang
    println!("Fetching forecast for city code {}...", city_code);

    let crawler = WeatherCrawler::new()?;
    let report = crawler.forecast(city_code).call().await?;

    if report.is_empty() {
        println!("No forecast data. Possible causes:");
        println!("1. Wrong city code");
        println!("2. The page structure changed");
        println!("3. Network problems");
        println!("4. The site blocked the request");
        return Ok(());
    }

    for day in &report.days {
        println!(
            "{} - {} - high {} - low {}",
            day.date,
            day.condition,
            day.high_temp.as_deref().unwrap_or("-"),
            day.low_temp
        );
    }
    if !report.skipped.is_empty() {
        println!("Skipped {} malformed day entries", report.skipped.len());
    }
    println!(
        "Got {} days of forecast for {}",
        report.days.len(),
        report.city_name
    );

    Ok(())
}
