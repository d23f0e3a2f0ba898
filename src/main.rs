//! Intrusion Detection Pipeline - Main Entry Point
//!
//! Takes one positional argument (the dataset path), runs the inference
//! pipeline, and prints exactly one JSON report to stdout. All diagnostic
//! output goes to stderr so stdout stays machine-parseable.

use intrusion_detection_pipeline::{
    config::AppConfig, pipeline, types::report::AnalysisReport, Pipeline,
};
use tracing::info;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Arity is checked before logging, config, or artifact work: a bad
    // invocation must not touch the pipeline at all.
    let dataset = match pipeline::parse_invocation(&args) {
        Ok(path) => path,
        Err(report) => emit(&report),
    };

    let config = AppConfig::load().unwrap_or_default();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting intrusion detection pipeline");

    let report = Pipeline::new(&config).run(&dataset);
    emit(&report)
}

/// Print the report to stdout and exit: zero on success, non-zero on any
/// error report.
fn emit(report: &AnalysisReport) -> ! {
    match serde_json::to_string(report) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            // The stdout contract must hold even if serializing our own
            // report type fails: one parseable document, then exit.
            eprintln!("failed to serialize report: {e}");
            println!(
                r#"{{"status":"error","message":"internal serialization failure","code":"PROCESSING_ERROR"}}"#
            );
            std::process::exit(1);
        }
    }
    std::process::exit(if report.is_error() { 1 } else { 0 })
}
