use chrono::{DateTime, NaiveDate};
use common::models::{DailyForecast, DetailSample};
use std::collections::HashMap;

use crate::api_client::ForecastSample;

/// Days of forecast shown on the page.
pub const MAX_FORECAST_DAYS: usize = 5;

/// Groups 3-hourly provider samples into per-day summaries.
///
/// Days are keyed by the UTC calendar date of each sample's timestamp and kept
/// in order of first appearance; min/max accumulate over every sample for a
/// date before the list is cut to [`MAX_FORECAST_DAYS`]. The first sample of a
/// date supplies the day's icon and description. Samples with an
/// unrepresentable timestamp are skipped.
pub fn aggregate_daily(samples: &[ForecastSample]) -> Vec<DailyForecast> {
    let mut days: Vec<DailyForecast> = Vec::new();
    let mut day_index: HashMap<NaiveDate, usize> = HashMap::new();

    for sample in samples {
        let Some(at) = DateTime::from_timestamp(sample.dt, 0) else {
            continue;
        };
        let date = at.date_naive();
        let (icon, description) = sample
            .weather
            .first()
            .map(|c| (c.icon.clone(), c.description.clone()))
            .unwrap_or_default();

        let idx = *day_index.entry(date).or_insert_with(|| {
            days.push(DailyForecast {
                date,
                label: at.format("%a, %b %-d").to_string(),
                temp_min: sample.main.temp,
                temp_max: sample.main.temp,
                icon: icon.clone(),
                description: description.clone(),
                details: Vec::new(),
            });
            days.len() - 1
        });

        let day = &mut days[idx];
        day.temp_min = day.temp_min.min(sample.main.temp);
        day.temp_max = day.temp_max.max(sample.main.temp);
        day.details.push(DetailSample {
            time: at.format("%-I %p").to_string(),
            temp: sample.main.temp,
            icon,
            description,
        });
    }

    days.truncate(MAX_FORECAST_DAYS);
    days
}
