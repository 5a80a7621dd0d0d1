//! Diagnostic logging setup.
//!
//! Engine events (deals, hits, dealer draws, settlement, halts) go to stderr
//! through `tracing-subscriber`. `RUST_LOG` overrides the default filter. The
//! per-round audit trail is the JSONL round log, not these events.

use std::marker::PhantomData;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::Level;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

pub const DEFAULT_FILTER: &str = "warn,blackjack_engine=info,blackjack_cli=info";

/// Initialize logging for the binary. Safe to call more than once; later
/// calls leave the first subscriber in place.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Structured log entry for testing and analysis
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

impl LogEntry {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Captures events in memory so tests can assert on them.
#[derive(Debug, Clone, Default)]
pub struct TestLogSubscriber {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogSubscriber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn into_layer<S>(self) -> TestLayer<S>
    where
        S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    {
        TestLayer {
            subscriber: self,
            _phantom: PhantomData,
        }
    }
}

pub struct TestLayer<S> {
    subscriber: TestLogSubscriber,
    _phantom: PhantomData<S>,
}

impl<S> Layer<S> for TestLayer<S>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let entry = LogEntry {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message: visitor.message.unwrap_or_default(),
            fields: visitor.fields,
        };

        self.subscriber
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Vec<(String, String)>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        let value_str = format!("{:?}", value);
        if field.name() == "message" {
            self.message = Some(value_str);
        } else {
            self.fields.push((field.name().to_string(), value_str));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::handle_sim_command;
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    fn capture<F: FnOnce()>(f: F) -> Vec<LogEntry> {
        let subscriber = TestLogSubscriber::new();
        let registry = Registry::default().with(subscriber.clone().into_layer::<Registry>());
        tracing::subscriber::with_default(registry, f);
        subscriber.entries()
    }

    #[test]
    fn sim_emits_one_settlement_event_per_round() {
        let entries = capture(|| {
            let mut out = Vec::new();
            let mut err = Vec::new();
            handle_sim_command(12, None, Some(4), 17, &mut out, &mut err).unwrap();
        });

        let settled: Vec<&LogEntry> = entries
            .iter()
            .filter(|e| e.message == "round settled")
            .collect();
        assert_eq!(settled.len(), 12);
        assert!(settled.iter().all(|e| e.level == Level::INFO));
        assert!(settled.iter().all(|e| e.target.starts_with("blackjack_engine")));
        assert_eq!(settled[0].field("round_id"), Some("#1"));
        assert!(entries.iter().any(|e| e.message == "simulation finished"));
    }

    #[test]
    fn stale_ticket_is_logged_at_debug() {
        use blackjack_engine::engine::Table;
        use blackjack_engine::game::RoundState;

        let entries = capture(|| {
            for seed in 0..200u64 {
                let mut table = Table::new(seed);
                table.new_round().unwrap();
                if table.round().unwrap().state() != RoundState::PlayerTurn {
                    continue;
                }
                if let Some(ticket) = table.stand().unwrap() {
                    table.new_round().unwrap();
                    table.dealer_step(ticket).unwrap();
                    return;
                }
            }
            panic!("no seed left the dealer drawing");
        });

        let stale = entries
            .iter()
            .find(|e| e.message == "stale dealer ticket dropped")
            .expect("stale event");
        assert_eq!(stale.level, Level::DEBUG);
        assert_eq!(stale.field("ticket_round"), Some("#1"));
    }
}
