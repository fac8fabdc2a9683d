use prometheus::{register_counter_vec, CounterVec, Encoder, TextEncoder};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use lazy_static::lazy_static;

const DEFAULT_DIRECTIVES: &str = "info,tower_http=debug,sqlx=warn";

lazy_static! {
    pub static ref QUIZ_QUESTIONS_SERVED: CounterVec = register_counter_vec!(
        "quiz_questions_served_total",
        "Number of questions served to quiz players",
        &["category"]
    )
    .unwrap();
    pub static ref API_ERRORS: CounterVec = register_counter_vec!(
        "api_errors_total",
        "Number of error responses by status code",
        &["status"]
    )
    .unwrap();
}

/// Installs the global subscriber. `LOG_LEVEL` takes `EnvFilter` directives.
pub fn init_tracing() -> anyhow::Result<()> {
    let span_events = match std::env::var("INCLUDE_SPAN_EVENTS") {
        Ok(value) if value.eq_ignore_ascii_case("true") => FmtSpan::NEW | FmtSpan::CLOSE,
        _ => FmtSpan::NONE,
    };
    let filter_layer = match EnvFilter::try_from_env("LOG_LEVEL") {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(DEFAULT_DIRECTIVES)?,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_target(false).with_span_events(span_events))
        .try_init()?;
    Ok(())
}

/// Prometheus text exposition of every registered metric, with its content type.
pub fn gather_metrics() -> anyhow::Result<(String, Vec<u8>)> {
    let encoder = TextEncoder::new();
    let mut buf = vec![];
    encoder.encode(&prometheus::gather(), &mut buf)?;
    Ok((encoder.format_type().to_owned(), buf))
}
