use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;
use utoipa::ToSchema;

use crate::http::types::ProblemDetail;

/// Friendly temperature descriptions, coldest to hottest.
const SUMMARIES: [&str; 10] = [
    "Freezing", "Bracing", "Chilly", "Cool", "Mild",
    "Warm", "Balmy", "Hot", "Sweltering", "Scorching",
];

pub fn router() -> Router {
    Router::new().route("/weatherforecast", get(get_forecasts))
}

/// A randomly generated forecast for one day.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeatherForecast {
    /// The date of the forecast.
    pub date: DateTime<Utc>,
    /// Forecasted temperature in Celsius.
    pub temperature_c: i32,
    /// Forecasted temperature in Fahrenheit, rounded.
    pub temperature_f: i32,
    /// Friendly temperature description.
    pub summary: String,
}

/// Get some random forecasts.
///
/// Sample endpoint with no persistence behind it; it exists to show a second
/// API version group and its generated documentation.
#[utoipa::path(
    get,
    path = "/weatherforecast",
    tag = "WeatherForecast",
    responses(
        (status = 200, description = "Five random daily forecasts", body = [WeatherForecast]),
        (status = 500, description = "Unexpected failure", body = ProblemDetail),
    ),
)]
pub(crate) async fn get_forecasts() -> Json<Vec<WeatherForecast>> {
    Json(sample_forecasts(rand::thread_rng()))
}

fn sample_forecasts(mut rng: impl Rng) -> Vec<WeatherForecast> {
    let today = Utc::now();
    (1..=5)
        .map(|day| {
            let temperature_c = rng.gen_range(-20..55);
            WeatherForecast {
                date: today + Duration::days(day),
                temperature_c,
                temperature_f: fahrenheit(temperature_c),
                summary: SUMMARIES[rng.gen_range(0..SUMMARIES.len())].to_string(),
            }
        })
        .collect()
}

// Truncating conversion, kept as the documented "rounded" value.
fn fahrenheit(celsius: i32) -> i32 {
    32 + (f64::from(celsius) / 0.5556) as i32
}
