//! Captures WARN events so tests can count diagnostics.

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

#[derive(Debug, Clone, Default)]
pub(crate) struct WarnCapture {
    messages: Arc<Mutex<Vec<String>>>,
}

impl WarnCapture {
    /// Runs `f` with this capture as the thread's only subscriber.
    pub(crate) fn run<T>(&self, f: impl FnOnce() -> T) -> T {
        let subscriber = tracing_subscriber::registry().with(self.clone());
        tracing::subscriber::with_default(subscriber, f)
    }

    pub(crate) fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("capture lock poisoned").clone()
    }
}

impl<S: Subscriber> Layer<S> for WarnCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() != Level::WARN {
            return;
        }
        let mut message = MessageVisitor::default();
        event.record(&mut message);
        self.messages
            .lock()
            .expect("capture lock poisoned")
            .push(message.0);
    }
}

#[derive(Default)]
struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}
