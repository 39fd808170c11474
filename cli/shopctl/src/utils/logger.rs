use std::sync::OnceLock;

use tracing::error;
use tracing_subscriber::prelude::*;
use tracing_subscriber::reload::Handle;
use tracing_subscriber::{EnvFilter, Registry};

use super::{TERMINAL_STDERR, message};
use crate::commands::Verbosity;

struct LockingTerminalStderr;
impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LockingTerminalStderr {
    type Writer = LockingTerminalStderr;

    fn make_writer(&'a self) -> Self::Writer {
        LockingTerminalStderr
    }
}

impl std::io::Write for LockingTerminalStderr {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(mut guard) = TERMINAL_STDERR.lock() {
            guard.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if let Ok(mut guard) = TERMINAL_STDERR.lock() {
            guard.flush()?
        }
        Ok(())
    }
}

static LOGGER_HANDLE: OnceLock<Handle<EnvFilter, Registry>> = OnceLock::new();

/// Filter directives for a verbosity level, used unless `RUST_LOG` is set.
fn log_filter(verbosity: Verbosity) -> &'static str {
    match verbosity {
        // Show only errors
        Verbosity::Quiet => "off,shopctl=error,shop_catalog=error",
        // Only show warnings
        Verbosity::Verbose(0) => "off,shopctl=warn,shop_catalog=warn",
        Verbosity::Verbose(1) => "off,shopctl=info,shop_catalog=info",
        // Show requests and decoded responses
        Verbosity::Verbose(2) => "off,shopctl=debug,shop_catalog=debug",
        Verbosity::Verbose(3) => "off,shopctl=trace,shop_catalog=trace",
        // Also show the http stack
        Verbosity::Verbose(4) => "debug,shopctl=trace,shop_catalog=trace",
        Verbosity::Verbose(_) => "trace",
    }
}

/// Install the logger, or update its filter if it is already installed.
///
/// Called once with defaults before arguments are parsed and again once the
/// verbosity flags are known.
pub(crate) fn init_logger(verbosity: Option<Verbosity>) {
    let verbosity = verbosity.unwrap_or_default();

    let filter_handle = LOGGER_HANDLE.get_or_init(|| {
        // Start wide open and narrow the filter below.
        let (filter, reload_handle) =
            tracing_subscriber::reload::Layer::new(EnvFilter::new("trace"));
        let log_layer = tracing_subscriber::fmt::layer()
            .with_writer(LockingTerminalStderr)
            .with_filter(filter);

        if let Err(err) = tracing_subscriber::registry().with(log_layer).try_init() {
            message::warning(format!("Could not initialize logging: {err}"));
        }
        reload_handle
    });

    update_filters(filter_handle, log_filter(verbosity));
}

fn update_filters(filter_handle: &Handle<EnvFilter, Registry>, log_filter: &str) {
    let result = filter_handle.modify(|layer| {
        match EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_filter)) {
            Ok(new_filter) => *layer = new_filter,
            Err(err) => {
                error!("Updating logger filter failed: {}", err);
            },
        };
    });
    if let Err(err) = result {
        error!("Updating logger filter failed: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_verbosity_shows_warnings() {
        assert_eq!(
            log_filter(Verbosity::default()),
            "off,shopctl=warn,shop_catalog=warn"
        );
    }

    #[test]
    fn quiet_shows_errors_only() {
        assert_eq!(
            log_filter(Verbosity::Quiet),
            "off,shopctl=error,shop_catalog=error"
        );
    }

    #[test]
    fn every_level_is_a_valid_filter() {
        let levels = std::iter::once(Verbosity::Quiet).chain((0..8).map(Verbosity::Verbose));
        for verbosity in levels {
            assert!(
                EnvFilter::try_new(log_filter(verbosity)).is_ok(),
                "{verbosity:?}"
            );
        }
    }
}
