use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, Once, OnceLock};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// One log line as the dashboard emitted it.
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Process-wide store the capture layer appends to.
#[derive(Clone, Default)]
pub struct EventLog {
    inner: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl EventLog {
    fn lock(&self) -> MutexGuard<'_, Vec<CapturedEvent>> {
        self.inner.lock().unwrap()
    }

    /// First event with exactly this message.
    pub fn find(&self, message: &str) -> Option<CapturedEvent> {
        self.lock().iter().find(|e| e.message == message).cloned()
    }
}

static LOG: OnceLock<EventLog> = OnceLock::new();

pub fn captured_events() -> EventLog {
    LOG.get_or_init(EventLog::default).clone()
}

/// Install the capture layer as the global subscriber. Later calls are no-ops.
pub fn init_test_tracing(log: EventLog) {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let subscriber = tracing_subscriber::registry().with(CaptureLayer { log });
        tracing::subscriber::set_global_default(subscriber)
            .expect("failed to set global tracing subscriber");
    });
}

struct CaptureLayer {
    log: EventLog,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut recorder = Recorder::default();
        event.record(&mut recorder);

        let meta = event.metadata();
        self.log.lock().push(CapturedEvent {
            level: *meta.level(),
            target: meta.target().to_string(),
            message: recorder.message,
            fields: recorder.fields,
        });
    }
}

/// Splits the message from the structured fields.
#[derive(Default)]
struct Recorder {
    message: String,
    fields: BTreeMap<String, String>,
}

impl Recorder {
    fn put(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = value;
        } else {
            self.fields.insert(field.name().to_string(), value);
        }
    }
}

impl Visit for Recorder {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.put(field, format!("{value:?}"));
    }
}
