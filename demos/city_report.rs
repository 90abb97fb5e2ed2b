//! City Report Example for Nepal AQI
//!
//! Scores sample OpenWeather readings for a few cities the way the dashboard
//! colors its map markers, then summarizes a short history series.
//!
//! Run with: cargo run --example city_report

use nepal_aqi::openweather::{self, Observation};
use nepal_aqi::series::{aqi_series, daily_max, peak};
use nepal_aqi::{AqiEngine, EngineConfig, Pollutant, breakpoints};

const CITIES: [(&str, &str); 5] = [
    (
        "Kathmandu",
        r#"{"coord":{"lon":85.3206,"lat":27.7017},"list":[{"main":{"aqi":4},"dt":1700000000,
        "components":{"co":647.57,"no":0.1,"no2":5.44,"o3":70.81,"so2":4.65,"pm2_5":68.87,"pm10":81.25,"nh3":8.24}}]}"#,
    ),
    (
        "Pokhara",
        r#"{"coord":{"lon":83.9856,"lat":28.2096},"list":[{"main":{"aqi":2},"dt":1700000000,
        "components":{"co":310.41,"no":0.0,"no2":2.1,"o3":58.65,"so2":0.72,"pm2_5":14.2,"pm10":19.6,"nh3":1.5}}]}"#,
    ),
    (
        "Biratnagar",
        r#"{"coord":{"lon":87.2718,"lat":26.4525},"list":[{"main":{"aqi":5},"dt":1700000000,
        "components":{"co":1201.63,"no":5.3,"no2":30.5,"o3":12.1,"so2":9.8,"pm2_5":151.3,"pm10":190.6,"nh3":20.1}}]}"#,
    ),
    (
        "London",
        r#"{"coord":{"lon":-0.1276,"lat":51.5072},"list":[{"main":{"aqi":1},"dt":1700000000,
        "components":{"co":220.3,"no":0.4,"no2":18.2,"o3":40.1,"so2":2.1,"pm2_5":4.1,"pm10":6.3,"nh3":0.3}}]}"#,
    ),
    (
        "Offline station",
        r#"{"coord":{"lon":85.0,"lat":27.0},"list":[]}"#,
    ),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("🌏 Nepal AQI - City Report\n");

    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    let engine = AqiEngine::new(config)?;

    println!("📍 Current conditions");
    println!("=====================");
    for (city, json) in CITIES {
        let (coord, observations) = openweather::parse_with_coord(json)?;
        let location = coord.map_or_else(String::new, |c| format!(" ({:.2}, {:.2})", c.lat, c.lon));
        match observations.first() {
            Some(obs) => {
                let result = engine.compute_overall_aqi(&obs.reading)?;
                let owm = obs.owm_index.map_or("-", |i| i.label());
                println!("{city}{location}: {result} {} [OpenWeather: {owm}]", result.color());
                if let Some(category) = result.category() {
                    println!("    {}", category.health_message());
                }
            }
            None => println!("{city}{location}: No Data Available"),
        }
    }

    println!("\n📈 Kathmandu, last three days");
    println!("=============================");
    let history = kathmandu_history();
    let points = aqi_series(&engine, &history)?;
    for (day, aqi) in daily_max(&points) {
        println!("{day}: max AQI {aqi}");
    }
    if let Some(top) = peak(&points) {
        println!("Peak: {} at {}", top.result, top.timestamp);
    }

    println!("\n📋 Breakpoint tables (µg/m³)");
    println!("============================");
    for pollutant in Pollutant::INDEXED {
        if let Some(table) = breakpoints::table(pollutant) {
            println!(
                "{:>6}: published in {} ({}), ceiling {:.1}",
                pollutant.display_name(),
                table.native_unit.symbol(),
                table.averaging,
                table.ceiling()
            );
        }
    }

    Ok(())
}

/// Synthetic history: PM2.5 rising through the morning on three days
fn kathmandu_history() -> Vec<Observation> {
    let mut entries = Vec::new();
    let start = 1_699_920_000; // 2023-11-14T00:00:00Z
    for day in 0..3 {
        for hour in [0, 6, 12, 18] {
            let dt = start + day * 86_400 + hour * 3_600;
            let pm2_5 = 20.0 + 15.0 * day as f64 + 2.5 * hour as f64;
            entries.push(format!(
                r#"{{"dt":{dt},"components":{{"pm2_5":{pm2_5},"pm10":{pm10}}}}}"#,
                pm10 = pm2_5 * 1.4
            ));
        }
    }
    let json = format!(r#"{{"list":[{}]}}"#, entries.join(","));
    openweather::parse_response(&json).unwrap_or_default()
}
