//! End-to-end runs of the reporting driver with small sample counts

use naive_pi::{Config, OutputFormat, PartialConfig, run};
use naive_pi_core::Method;

fn small_config(seed: u64) -> Config {
    let overrides = PartialConfig::from_toml(&format!(
        r#"
        seed = {seed}

        [monte_carlo]
        iterations = 20_000

        [leibniz]
        terms = 2_000
        precision = 20

        [buffon]
        drops = 20_000
        needle_length = 1.0
        line_spacing = 2.0
        "#
    ))
    .unwrap();
    Config::load(None, overrides).unwrap()
}

fn run_to_string(config: &Config, color: bool) -> (naive_pi::Report, String) {
    let mut out = Vec::new();
    let report = run(config, color, &mut out).unwrap();
    (report, String::from_utf8(out).unwrap())
}

#[test]
fn test_human_report_has_every_section() {
    let config = small_config(11);
    let (report, text) = run_to_string(&config, false);

    assert_eq!(report.results.len(), 3);
    assert!(text.contains("Method 1: Monte Carlo Simulation"));
    assert!(text.contains("Generating 20,000 random points..."));
    assert!(text.contains("Method 2: Leibniz Formula"));
    assert!(text.contains("Calculating 2,000 terms..."));
    assert!(text.contains("Method 3: Buffon's Needle"));
    assert!(text.contains("Dropping 20,000 needles..."));
    assert!(text.contains("Results Summary"));
    assert!(text.contains("Actual π             3.14159265358979323846"));
    assert!(!text.contains('\x1b'));

    // Every estimate line carries 20 decimal places
    for line in text.lines().filter(|l| l.starts_with("Estimated pi: ")) {
        let value = line.trim_start_matches("Estimated pi: ");
        let (_, fraction) = value.split_once('.').unwrap();
        assert_eq!(fraction.len(), 20, "{}", line);
    }
}

#[test]
fn test_leibniz_line_uses_decimal_digits() {
    let mut config = small_config(0);
    config.methods = vec![Method::Leibniz];
    let (report, text) = run_to_string(&config, false);

    // 4 * (1 - 1/3 + ... - 1/3999) = 3.14109265...
    let value = report.results[0].value().unwrap();
    assert!(value.starts_with("3.1410926"), "{}", value);
    assert!(text.contains(&format!("Estimated pi: {}", value)));
    assert!(text.contains("Method 1: Leibniz Formula"));
}

#[test]
fn test_same_seed_same_report() {
    let (first, _) = run_to_string(&small_config(99), false);
    let (second, _) = run_to_string(&small_config(99), false);
    assert_eq!(first, second);
}

#[test]
fn test_subset_selection_keeps_per_method_results() {
    let (all, _) = run_to_string(&small_config(5), false);

    let mut config = small_config(5);
    config.methods = vec![Method::BuffonNeedle];
    let (only_buffon, _) = run_to_string(&config, false);

    assert_eq!(only_buffon.results[0], all.results[2]);
}

#[test]
fn test_color_highlights_divergent_digits() {
    let mut config = small_config(3);
    config.methods = vec![Method::MonteCarlo];
    let (_, text) = run_to_string(&config, true);
    assert!(text.contains("\x1b[91m"));
    assert!(text.contains("\x1b[0m"));
}

#[test]
fn test_json_report() {
    let mut config = small_config(21);
    config.output.format = OutputFormat::Json;
    let (report, text) = run_to_string(&config, true);

    assert!(!text.contains("Method 1"));
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["seed"], 21);
    assert_eq!(json["reference"], "3.14159265358979323846");

    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["method"], "monte-carlo");
    assert_eq!(results[1]["method"], "leibniz");
    assert_eq!(results[2]["method"], "buffon-needle");
    assert_eq!(results[1]["samples"], 2000);
    assert_eq!(
        results[0]["value"].as_str(),
        report.results[0].value()
    );
    assert!(results[2]["error"].as_f64().unwrap() < 0.2);
}

#[test]
fn test_inconclusive_buffon_is_reported_not_fatal() {
    let mut config = small_config(8);
    config.methods = vec![Method::BuffonNeedle];
    config.buffon.drops = 1;
    config.buffon.needle_length = 1e-12;
    config.buffon.line_spacing = 1.0;
    config.validate().unwrap();

    let (report, text) = run_to_string(&config, false);
    let result = &report.results[0];
    assert_eq!(result.value(), None);
    assert!(result.is_inconclusive());
    assert!(text.contains("Estimated pi: inconclusive"));
    assert!(text.contains("Buffon Needle        inconclusive"));
}

#[test]
fn test_inconclusive_buffon_json_omits_value_and_error() {
    let mut config = small_config(8);
    config.methods = vec![Method::BuffonNeedle];
    config.buffon.drops = 1;
    config.buffon.needle_length = 1e-12;
    config.buffon.line_spacing = 1.0;
    config.output.format = OutputFormat::Json;
    config.validate().unwrap();

    let (report, text) = run_to_string(&config, false);
    assert!(report.results[0].is_inconclusive());

    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    let result = &json["results"][0];
    assert_eq!(result["method"], "buffon-needle");
    assert_eq!(result["samples"], 1);
    assert!(result["inconclusive"].as_str().unwrap().contains("no hits after 1 samples"));
    assert!(result.get("value").is_none());
    assert!(result.get("error").is_none());
}

#[test]
fn test_invalid_geometry_rejected_before_running() {
    let overrides = PartialConfig::from_toml("[buffon]\nneedle_length = 2.0\nline_spacing = 1.0")
        .unwrap();
    let err = Config::load(None, overrides).unwrap_err();
    assert!(err.starts_with("Invalid configuration"), "{}", err);
}
