//! Pulls the city name and the 7-day forecast out of a weather.com.cn city page.
//!
//! The page layout this relies on:
//!
//! ```text
//! div.ctop            first <a> holds the city name
//! div#7d > ul > li    one entry per day
//!   h1                date label
//!   p (1st)           condition
//!   p (2nd)           <span> high (optional), <i> low
//! ```
//!
//! Extraction never fails as a whole. A missing city node or forecast block
//! degrades to `None` / no entries, and a malformed day-entry becomes a
//! [`SkippedDay`] while the other entries are kept.

use crate::types::forecast_day::{DayOutcome, DaySkipReason, ForecastDay, SkippedDay};
use log::{debug, info, warn};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static CITY_BLOCK: LazyLock<Selector> = LazyLock::new(|| selector("div.ctop"));
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a"));
// `#7d` is not a valid ID selector because it starts with a digit.
static FORECAST_BLOCK: LazyLock<Selector> = LazyLock::new(|| selector(r#"div[id="7d"]"#));
static LIST: LazyLock<Selector> = LazyLock::new(|| selector("ul"));
static ENTRY: LazyLock<Selector> = LazyLock::new(|| selector("li"));
static DATE: LazyLock<Selector> = LazyLock::new(|| selector("h1"));
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| selector("p"));
static HIGH: LazyLock<Selector> = LazyLock::new(|| selector("span"));
static LOW: LazyLock<Selector> = LazyLock::new(|| selector("i"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static CSS selector is valid")
}

/// Everything found in one forecast page, before skips are separated out.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedForecast {
    pub city_name: Option<String>,
    /// Whether the `div#7d` forecast list was present at all.
    pub container_found: bool,
    /// One outcome per day-entry, in document order.
    pub days: Vec<DayOutcome>,
}

/// Extracts the city name and per-day forecast from page HTML.
pub fn extract_forecast(html: &str) -> ExtractedForecast {
    let document = Html::parse_document(html);

    let city_name = extract_city_name(&document);
    match &city_name {
        Some(name) => debug!("Found city name '{}'", name),
        None => warn!("City name node not found in forecast page"),
    }

    let Some(entries) = forecast_entries(&document) else {
        warn!("7-day forecast block not found; the page structure may have changed");
        return ExtractedForecast {
            city_name,
            container_found: false,
            days: Vec::new(),
        };
    };

    let days: Vec<DayOutcome> = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| extract_day(index, entry))
        .collect();
    info!(
        "Extracted {} of {} forecast day entries",
        days.iter().filter(|d| d.is_ok()).count(),
        days.len()
    );

    ExtractedForecast {
        city_name,
        container_found: true,
        days,
    }
}

fn extract_city_name(document: &Html) -> Option<String> {
    let block = document.select(&CITY_BLOCK).next()?;
    let link = block.select(&LINK).next()?;
    Some(element_text(link))
}

fn forecast_entries(document: &Html) -> Option<Vec<ElementRef<'_>>> {
    let block = document.select(&FORECAST_BLOCK).next()?;
    let list = block.select(&LIST).next()?;
    Some(list.select(&ENTRY).collect())
}

fn extract_day(index: usize, entry: ElementRef<'_>) -> DayOutcome {
    let skip = |reason| SkippedDay { index, reason };

    let date = entry
        .select(&DATE)
        .next()
        .map(element_text)
        .ok_or(skip(DaySkipReason::MissingDate))?;

    let mut paragraphs = entry.select(&PARAGRAPH);
    let condition = paragraphs
        .next()
        .map(element_text)
        .ok_or(skip(DaySkipReason::MissingCondition))?;
    let temperatures = paragraphs
        .next()
        .ok_or(skip(DaySkipReason::MissingTemperatures))?;

    let low_temp = temperatures
        .select(&LOW)
        .next()
        .map(|el| strip_degree(&element_text(el)))
        .ok_or(skip(DaySkipReason::MissingLowTemperature))?;
    let high_temp = temperatures
        .select(&HIGH)
        .next()
        .map(|el| strip_degree(&element_text(el)));

    debug!(
        "Parsed {} - {} - high {} - low {}",
        date,
        condition,
        high_temp.as_deref().unwrap_or("-"),
        low_temp
    );
    Ok(ForecastDay {
        date,
        condition,
        high_temp,
        low_temp,
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Removes Celsius markers (`℃`, `°C`, `°`) from a temperature label.
pub fn strip_degree(text: &str) -> String {
    text.replace('℃', "")
        .replace("°C", "")
        .replace('°', "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = include_str!("../../tests/fixtures/forecast_7d.html");

    fn day_entry(body: &str) -> String {
        format!("<li>{}</li>", body)
    }

    fn page_with_entries(entries: &[String]) -> String {
        format!(
            r#"<html><body><div class="ctop"><a href="/">北京</a></div>
            <div id="7d"><ul class="t">{}</ul></div></body></html>"#,
            entries.concat()
        )
    }

    #[test]
    fn test_extracts_all_days_in_document_order() {
        let extracted = extract_forecast(PAGE);

        assert!(extracted.container_found);
        assert_eq!(extracted.city_name.as_deref(), Some("石家庄"));
        assert_eq!(extracted.days.len(), 7);

        let dates: Vec<&str> = extracted
            .days
            .iter()
            .map(|d| d.as_ref().map(|d| d.date.as_str()).unwrap_or("<skipped>"))
            .collect();
        assert_eq!(
            dates,
            [
                "20日（今天）",
                "21日（明天）",
                "22日（后天）",
                "23日（周一）",
                "24日（周二）",
                "25日（周三）",
                "26日（周四）"
            ]
        );
    }

    #[test]
    fn test_first_day_fields() {
        let extracted = extract_forecast(PAGE);
        let first = extracted.days[0].as_ref().unwrap();
        assert_eq!(
            first,
            &ForecastDay::new("20日（今天）", "晴", Some("12".to_string()), "-2")
        );
    }

    #[test]
    fn test_trailing_day_without_high_temperature() {
        let extracted = extract_forecast(PAGE);
        let last = extracted.days[6].as_ref().unwrap();
        assert_eq!(last.high_temp, None);
        assert_eq!(last.low_temp, "-3");
        assert_eq!(last.condition, "多云");
    }

    #[test]
    fn test_no_degree_symbols_in_temperatures() {
        let extracted = extract_forecast(PAGE);
        for day in extracted.days.iter().flatten() {
            assert!(!day.low_temp.contains('℃') && !day.low_temp.contains('°'));
            if let Some(high) = &day.high_temp {
                assert!(!high.contains('℃') && !high.contains('°'));
            }
        }
    }

    #[test]
    fn test_malformed_entry_does_not_block_others() {
        let html = page_with_entries(&[
            day_entry(r#"<h1>1日</h1><p>晴</p><p><span>5℃</span>/<i>-1℃</i></p>"#),
            day_entry(r#"<h1>2日</h1><p>阴</p><p><span>4℃</span></p>"#),
            day_entry(r#"<h1>3日</h1><p>雪</p><p><span>2℃</span>/<i>-6℃</i></p>"#),
        ]);

        let extracted = extract_forecast(&html);

        assert_eq!(extracted.days.len(), 3);
        assert_eq!(extracted.days[0].as_ref().unwrap().date, "1日");
        assert_eq!(
            extracted.days[1],
            Err(SkippedDay {
                index: 1,
                reason: DaySkipReason::MissingLowTemperature
            })
        );
        assert_eq!(extracted.days[2].as_ref().unwrap().low_temp, "-6");
    }

    #[test]
    fn test_skip_reasons_for_missing_fields() {
        let html = page_with_entries(&[
            day_entry(r#"<p>晴</p><p><i>-1℃</i></p>"#),
            day_entry(r#"<h1>2日</h1>"#),
            day_entry(r#"<h1>3日</h1><p>雪</p>"#),
        ]);

        let reasons: Vec<DaySkipReason> = extract_forecast(&html)
            .days
            .into_iter()
            .map(|d| d.unwrap_err().reason)
            .collect();

        assert_eq!(
            reasons,
            [
                DaySkipReason::MissingDate,
                DaySkipReason::MissingCondition,
                DaySkipReason::MissingTemperatures
            ]
        );
    }

    #[test]
    fn test_missing_forecast_block_yields_no_days() {
        let html = r#"<html><body><div class="ctop"><a>上海</a></div><p>维护中</p></body></html>"#;
        let extracted = extract_forecast(html);
        assert!(!extracted.container_found);
        assert!(extracted.days.is_empty());
        assert_eq!(extracted.city_name.as_deref(), Some("上海"));
    }

    #[test]
    fn test_forecast_block_without_list_counts_as_missing() {
        let html = r#"<html><body><div id="7d"><p>暂无数据</p></div></body></html>"#;
        let extracted = extract_forecast(html);
        assert!(!extracted.container_found);
        assert!(extracted.days.is_empty());
    }

    #[test]
    fn test_missing_city_node_is_not_fatal() {
        let html = r#"<html><body><div id="7d"><ul>
            <li><h1>1日</h1><p>晴</p><p><span>5</span>/<i>-1℃</i></p></li>
            </ul></div></body></html>"#;
        let extracted = extract_forecast(html);
        assert_eq!(extracted.city_name, None);
        assert_eq!(extracted.days.len(), 1);
        assert!(extracted.days[0].is_ok());
    }

    #[test]
    fn test_empty_document() {
        let extracted = extract_forecast("");
        assert_eq!(extracted.city_name, None);
        assert!(extracted.days.is_empty());
    }

    #[test]
    fn test_static_selectors_parse() {
        for sel in [
            &CITY_BLOCK,
            &LINK,
            &FORECAST_BLOCK,
            &LIST,
            &ENTRY,
            &DATE,
            &PARAGRAPH,
            &HIGH,
            &LOW,
        ] {
            LazyLock::force(sel);
        }
    }

    #[test]
    fn test_forecast_block_matched_by_id_only() {
        let html = r#"<html><body>
            <div id="15d"><ul><li><h1>9日</h1><p>雨</p><p><i>1℃</i></p></li></ul></div>
            <div class="7d"><ul><li><h1>8日</h1><p>雨</p><p><i>1℃</i></p></li></ul></div>
            <div id="7d"><ul><li><h1>1日</h1><p>晴</p><p><span>5℃</span>/<i>-1℃</i></p></li></ul></div>
            </body></html>"#;
        let extracted = extract_forecast(html);
        assert!(extracted.container_found);
        assert_eq!(extracted.days.len(), 1);
        assert_eq!(extracted.days[0].as_ref().unwrap().date, "1日");
    }

    #[test]
    fn test_strip_degree_variants() {
        assert_eq!(strip_degree("-2℃"), "-2");
        assert_eq!(strip_degree(" 12°C "), "12");
        assert_eq!(strip_degree("7°"), "7");
        assert_eq!(strip_degree("15"), "15");
    }
}
