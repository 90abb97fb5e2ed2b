//! Error Handling Example for Nepal AQI
//!
//! This example shows how callers can react to each `AqiError` variant and
//! keep "no data" apart from a numeric index, so a failed or empty reading is
//! never shown as good air.
//!
//! Run with: cargo run --example error_handling

use nepal_aqi::{
    AqiEngine, AqiError, AqiResult, EngineConfig, NegativeConcentrationPolicy,
    UnsupportedPollutantPolicy, openweather,
};

/// Statistics for error tracking
#[derive(Debug, Default)]
struct ErrorStats {
    total_attempts: u32,
    computed: u32,
    no_data: u32,
    invalid_concentration_errors: u32,
    unsupported_pollutant_errors: u32,
    malformed_payload_errors: u32,
    other_errors: u32,
}

impl ErrorStats {
    fn record(&mut self, outcome: &Result<AqiResult, AqiError>) {
        self.total_attempts += 1;
        match outcome {
            Ok(AqiResult::Computed(_)) => self.computed += 1,
            Ok(AqiResult::NoData) => self.no_data += 1,
            Err(AqiError::InvalidConcentration { .. }) => self.invalid_concentration_errors += 1,
            Err(AqiError::UnsupportedPollutant(_)) => self.unsupported_pollutant_errors += 1,
            Err(AqiError::MalformedPayload(_)) => self.malformed_payload_errors += 1,
            Err(_) => self.other_errors += 1,
        }
    }

    fn print(&self) {
        println!("\n📊 Statistics");
        println!("=============");
        println!("Total attempts: {}", self.total_attempts);
        println!("Computed: {}", self.computed);
        println!("No data: {}", self.no_data);
        println!("\nError Breakdown:");
        println!("  Invalid concentration: {}", self.invalid_concentration_errors);
        println!("  Unsupported pollutant: {}", self.unsupported_pollutant_errors);
        println!("  Malformed payload: {}", self.malformed_payload_errors);
        println!("  Other errors: {}", self.other_errors);
    }
}

/// What a map marker or badge would show for an outcome
fn badge(outcome: &Result<AqiResult, AqiError>) -> String {
    match outcome {
        Ok(AqiResult::NoData) => "⬜ No Data Available".to_string(),
        Ok(result @ AqiResult::Computed(_)) => format!("🟢 {result} [{}]", result.color()),
        Err(e) => format!("⚠️  {e} (showing No Data Available)"),
    }
}

/// Decode a payload and score its first entry
fn score_payload(engine: &AqiEngine, json: &str) -> Result<AqiResult, AqiError> {
    let observations = openweather::parse_response(json)?;
    match observations.first() {
        Some(obs) => engine.compute_overall_aqi(&obs.reading),
        None => Ok(AqiResult::NoData),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("⚠️  Nepal AQI - Error Handling Example");
    println!("=====================================\n");

    let mut stats = ErrorStats::default();
    let strict = AqiEngine::default();

    let payloads = [
        (
            "Valid payload",
            r#"{"list":[{"dt":1700000000,"main":{"aqi":4},"components":{"pm2_5":68.87,"pm10":81.25}}]}"#,
        ),
        ("Empty list", r#"{"list":[]}"#),
        ("Display-only components", r#"{"list":[{"dt":1700000000,"components":{"no":0.1,"nh3":8.2}}]}"#),
        ("Negative sensor value", r#"{"list":[{"dt":1700000000,"components":{"pm2_5":-3.0}}]}"#),
        ("Truncated JSON", r#"{"list":[{"dt":170000"#),
    ];

    for (description, json) in payloads {
        println!("🧪 {description}");
        let outcome = score_payload(&strict, json);
        println!("   {}", badge(&outcome));
        stats.record(&outcome);
    }

    println!("\n🧪 Unknown upstream key, strict vs. lenient policies");
    let components = [("pm2_5", 20.0), ("pm1", 15.0)];
    let outcome = strict.compute_from_components(components);
    println!("   strict:   {}", badge(&outcome));
    stats.record(&outcome);

    let lenient = AqiEngine::new(EngineConfig {
        negative_concentrations: NegativeConcentrationPolicy::ClampToZero,
        unsupported_pollutants: UnsupportedPollutantPolicy::Skip,
    })?;
    let outcome = lenient.compute_from_components(components);
    println!("   lenient:  {}", badge(&outcome));
    stats.record(&outcome);

    let outcome = lenient.compute_from_components([("pm2_5", -3.0)]);
    println!("   clamped:  {}", badge(&outcome));
    stats.record(&outcome);

    println!("\n🧪 Invalid configuration");
    match EngineConfig::from_toml_str("unsupported-pollutants = { fallback = \"nh3\" }") {
        Ok(config) => println!("   unexpectedly accepted: {config:?}"),
        Err(e) => println!("   ❌ {e}"),
    }

    stats.print();
    Ok(())
}
