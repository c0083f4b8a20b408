//! Global `tracing` subscriber setup for embedders that want the output of
//! the default `TracingLog` to go somewhere.
//!
//! The filter comes from `FILE_OPS_LOG` when set, otherwise from
//! `LogSettings::filter`. Output goes to a daily rolling file when a
//! directory is configured, or to stderr.

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::settings::LogSettings;

pub const LOG_ENV: &str = "FILE_OPS_LOG";
const LOG_FILE_PREFIX: &str = "file_ops.log";

/// Keeps the non-blocking file writer alive; drop it to flush.
pub struct LogGuard(#[allow(dead_code)] Option<WorkerGuard>);

/// Install the global subscriber. Fails (without panicking) when one is
/// already installed.
pub fn init_tracing(settings: &LogSettings) -> anyhow::Result<LogGuard> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .with_context(|| format!("invalid log filter `{}`", settings.filter))?;

    let (layer, guard) = match &settings.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (fmt_layer(writer, settings.json, false), Some(guard))
        }
        None => (fmt_layer(std::io::stderr, settings.json, true), None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    tracing::debug!(json = settings.json, "logging initialized");
    Ok(LogGuard(guard))
}

fn fmt_layer<S, W>(writer: W, json: bool, ansi: bool) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    if json {
        fmt::layer()
            .json()
            .with_file(true)
            .with_line_number(true)
            .with_writer(writer)
            .boxed()
    } else {
        fmt::layer().with_ansi(ansi).with_writer(writer).boxed()
    }
}
