// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use std::{
    env,
    fmt::{self, Write},
    sync::atomic::{AtomicUsize, Ordering},
};

use tracing::{field::Visit, Id, Level, Subscriber};
use tracing_core::Field;

pub const ENV_WEBCRYPTO_LOG: &str = "WEBCRYPTO_LOG";

struct StringVisitor<'a> {
    string: &'a mut String,
}

impl Visit for StringVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let _ = if field.name() == "message" {
            write!(self.string, "{value:?} ")
        } else {
            write!(self.string, "{} = {:?}; ", field.name(), value)
        };
    }
}

#[derive(Debug, PartialEq)]
struct LogFilter {
    target: Option<String>,
    level: Option<Level>,
}

/// Subscriber writing `LEVEL target: message` lines to stderr.
///
/// Filtering comes from `WEBCRYPTO_LOG`, a comma separated list of `level`,
/// `target` or `target=level` entries. An event is printed when any entry
/// matches; an empty value prints everything and an unset variable prints
/// nothing.
pub struct MinimalTracer {
    enabled: bool,
    filters: Vec<LogFilter>,
}

fn string_to_level(string: &str) -> Option<Level> {
    match string.to_lowercase().as_str() {
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "warn" | "warning" => Some(Level::WARN),
        "trace" => Some(Level::TRACE),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

fn parse_filters(env_value: &str) -> Vec<LogFilter> {
    let mut filters = Vec::with_capacity(10);
    for filter in env_value.split(',').map(str::trim).filter(|f| !f.is_empty()) {
        let (target, level) = match filter.split_once('=') {
            Some((target, level)) => (Some(target), string_to_level(level)),
            None => match string_to_level(filter) {
                Some(level) => (None, Some(level)),
                None => (Some(filter), None),
            },
        };
        filters.push(LogFilter {
            target: target.map(|v| v.to_string()),
            level,
        });
    }
    filters
}

impl MinimalTracer {
    pub fn from_env() -> Self {
        match env::var(ENV_WEBCRYPTO_LOG) {
            Ok(env_value) => Self {
                enabled: true,
                filters: parse_filters(&env_value),
            },
            Err(_) => Self {
                enabled: false,
                filters: Vec::new(),
            },
        }
    }

    pub fn register() -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
        tracing::subscriber::set_global_default(Self::from_env())
    }

    fn allows(&self, level: &Level, target: &str) -> bool {
        if !self.enabled {
            return false;
        }
        if self.filters.is_empty() {
            return true;
        }
        self.filters.iter().any(|filter| {
            filter.level.as_ref().map_or(true, |l| l == level)
                && filter
                    .target
                    .as_deref()
                    .map_or(true, |t| target.starts_with(t))
        })
    }
}

static AUTO_ID: AtomicUsize = AtomicUsize::new(1);

impl Subscriber for MinimalTracer {
    fn enabled(&self, metadata: &tracing::Metadata<'_>) -> bool {
        self.allows(metadata.level(), metadata.target())
    }

    fn new_span(&self, _span: &tracing_core::span::Attributes<'_>) -> Id {
        Id::from_u64(AUTO_ID.fetch_add(1, Ordering::Relaxed) as u64)
    }

    fn record(&self, _span: &Id, _values: &tracing_core::span::Record<'_>) {}

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

    fn event(&self, event: &tracing::Event<'_>) {
        let metadata = event.metadata();

        let mut text = String::new();
        event.record(&mut StringVisitor { string: &mut text });

        eprintln!("{} {}: {}", metadata.level(), metadata.target(), text);
    }

    fn enter(&self, _span: &Id) {}

    fn exit(&self, _span: &Id) {}
}
