use prometheus::CounterVec;
use prometheus::IntCounter;
use prometheus::{register_counter_vec, register_int_counter};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use lazy_static::lazy_static;

use crate::settings::LogSettings;

lazy_static! {
    pub static ref QUIZ_SERVED_CNTR: CounterVec = register_counter_vec!(
        "quiz_questions_served_total",
        "Number of questions served to quiz players",
        &["category"]
    )
    .unwrap();
    pub static ref QUIZ_EXHAUSTED_CNTR: CounterVec = register_counter_vec!(
        "quiz_exhausted_total",
        "Number of quiz requests with no unseen question left",
        &["category"]
    )
    .unwrap();
    pub static ref QUESTIONS_CREATED_CNTR: IntCounter = register_int_counter!(
        "questions_created_total",
        "Number of questions created through the API"
    )
    .unwrap();
    pub static ref QUESTIONS_DELETED_CNTR: IntCounter = register_int_counter!(
        "questions_deleted_total",
        "Number of questions deleted through the API"
    )
    .unwrap();
}

/// Installs the global subscriber. An invalid filter in `log.level` is
/// reported and replaced by `info`.
pub fn init_tracing(log: &LogSettings) {
    let (filter, invalid) = match EnvFilter::try_new(&log.level) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new("info"), Some(e)),
    };
    let span_events = if log.span_events {
        FmtSpan::ENTER | FmtSpan::EXIT
    } else {
        FmtSpan::NONE
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_span_events(span_events))
        .init();

    if let Some(e) = invalid {
        tracing::warn!(level = %log.level, error = %e, "invalid log filter, using info");
    }
}
