use weather_crawler::{CrawlerConfig, WeatherCrawler, WeatherCrawlerError};

#[tokio::main]
async fn main() -> Result<(), WeatherCrawlerError> {
    env_logger::init();

    let config = CrawlerConfig::builder().concurrency(2).build();
    let crawler = WeatherCrawler::with_config(config)?;

    let cities = ["101090114", "101010100"]; // Luquan, Beijing
    let results = crawler.batch_forecast(cities).await;

    for (code, report) in &results {
        if report.is_empty() {
            println!("FAILED {} ({})", report.city_name, code);
        } else {
            println!("OK     {} ({}): {} days", report.city_name, code, report.days.len());
            let path = crawler.save_csv(report, None).await?;
            println!("       saved to {}", path.display());
        }
    }

    Ok(())
}
