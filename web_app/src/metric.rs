use opentelemetry::{KeyValue, metrics::UpDownCounter};
use std::sync::LazyLock;

static STATDS: LazyLock<UpDownCounter<i64>> = LazyLock::new(|| {
    logfire::i64_up_down_counter("doctor_roster_statds")
        .with_description("Doctor roster LINE registration statistics")
        .with_unit("event")
        .build()
});

fn incr_statds(metric: String, value: String) {
    STATDS.add(1, &[KeyValue::new(metric, value)]);
}

pub fn incr_registration_statds(outcome: &str) {
    incr_statds("registration".to_string(), outcome.into())
}

pub fn incr_webhook_statds(action: &str) {
    incr_statds("webhook".to_string(), action.into())
}

pub fn incr_push_statds(result: &str) {
    incr_statds("line_push".to_string(), result.into())
}
