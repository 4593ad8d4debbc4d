use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("colloquy.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("colloquy.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("colloquy.client.request_duration_seconds");

pub(crate) static EXCHANGES_COMPLETED: Counter = Counter::new("colloquy.exchange.completed");
pub(crate) static EXCHANGES_FAILED: Counter = Counter::new("colloquy.exchange.failed");
pub(crate) static EXCHANGES_REJECTED: Counter = Counter::new("colloquy.exchange.rejected");

pub(crate) static REGISTRY_REFRESHES: Counter = Counter::new("colloquy.registry.refreshes");
pub(crate) static REGISTRY_REFRESH_ERRORS: Counter =
    Counter::new("colloquy.registry.refresh_errors");
pub(crate) static REGISTRY_SELECT_ERRORS: Counter =
    Counter::new("colloquy.registry.select_errors");
pub(crate) static REGISTRY_DELETES: Counter = Counter::new("colloquy.registry.deletes");
pub(crate) static REGISTRY_DELETE_ERRORS: Counter =
    Counter::new("colloquy.registry.delete_errors");

pub(crate) static REVEALS_STARTED: Counter = Counter::new("colloquy.reveal.started");
pub(crate) static REVEALS_CANCELLED: Counter = Counter::new("colloquy.reveal.cancelled");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&EXCHANGES_COMPLETED);
    collector.register_counter(&EXCHANGES_FAILED);
    collector.register_counter(&EXCHANGES_REJECTED);

    collector.register_counter(&REGISTRY_REFRESHES);
    collector.register_counter(&REGISTRY_REFRESH_ERRORS);
    collector.register_counter(&REGISTRY_SELECT_ERRORS);
    collector.register_counter(&REGISTRY_DELETES);
    collector.register_counter(&REGISTRY_DELETE_ERRORS);

    collector.register_counter(&REVEALS_STARTED);
    collector.register_counter(&REVEALS_CANCELLED);
}
