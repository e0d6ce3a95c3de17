//! Forward `tracing` events into a kvlog logger.
//!
//! Libraries that log through `tracing` end up in the same stream, with the
//! same format and level filter, as code that calls kvlog directly.

use std::fmt;

use tracing::field::{Field as TracingField, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::global;
use crate::level::Level;
use crate::logger::{Caller, Logger};
use crate::value::{Field, Value};

enum Target {
    Global,
    Fixed(Logger),
}

/// `tracing_subscriber` layer that re-emits every event as a kvlog record.
///
/// The event's `message` becomes `msg`, its other fields follow, and the
/// event target is added as `target`. `TRACE` events map to `debug`.
pub struct FacadeLayer {
    target: Target,
}

impl FacadeLayer {
    /// Forward to a specific logger.
    pub fn new(logger: Logger) -> Self {
        Self {
            target: Target::Fixed(logger),
        }
    }

    /// Forward to whatever the process-wide logger is when each event fires.
    pub fn global() -> Self {
        Self {
            target: Target::Global,
        }
    }
}

impl<S> Layer<S> for FacadeLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        let mut visitor = FieldVisitor::default();
        visitor.fields.push(Field::new("target", metadata.target()));
        event.record(&mut visitor);

        let level = match *metadata.level() {
            tracing::Level::ERROR => Level::Error,
            tracing::Level::WARN => Level::Warn,
            tracing::Level::INFO => Level::Info,
            _ => Level::Debug,
        };
        let caller = match (metadata.file(), metadata.line()) {
            (Some(file), Some(line)) => Some(Caller::new(file, line)),
            _ => None,
        };
        let message = visitor.message.unwrap_or_default();

        match &self.target {
            Target::Fixed(logger) => logger.emit(level, caller, &message, &visitor.fields),
            Target::Global => global::emit(level, caller, &message, &visitor.fields),
        }
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Vec<Field>,
}

impl FieldVisitor {
    fn push(&mut self, field: &TracingField, value: Value) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.push(Field::new(field.name(), value));
        }
    }
}

impl Visit for FieldVisitor {
    fn record_f64(&mut self, field: &TracingField, value: f64) {
        self.push(field, Value::Float(value));
    }

    fn record_i64(&mut self, field: &TracingField, value: i64) {
        self.push(field, Value::Int(value));
    }

    fn record_u64(&mut self, field: &TracingField, value: u64) {
        self.push(field, Value::Uint(value));
    }

    fn record_bool(&mut self, field: &TracingField, value: bool) {
        self.push(field, Value::Bool(value));
    }

    fn record_str(&mut self, field: &TracingField, value: &str) {
        self.push(field, Value::from(value));
    }

    fn record_error(
        &mut self,
        field: &TracingField,
        value: &(dyn std::error::Error + 'static),
    ) {
        self.push(field, Value::error(value));
    }

    fn record_debug(&mut self, field: &TracingField, value: &dyn fmt::Debug) {
        self.push(field, Value::Str(format!("{:?}", value)));
    }
}

/// Route `tracing` events to the process-wide kvlog logger.
///
/// # Arguments
/// * `directives` - Optional `EnvFilter` directives (e.g. "hyper=warn");
///   falls back to `RUST_LOG`, then to letting every event through so the
///   kvlog level decides.
pub fn init_tracing(directives: Option<&str>) -> anyhow::Result<()> {
    let filter = if let Some(directives) = directives {
        EnvFilter::new(directives)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(FacadeLayer::global())
        .try_init()?;

    Ok(())
}
