use std::{fs, io::Write, path::Path};

use termcolor::{ColorChoice, StandardStream};
use tracing::{error, info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::LevelFilter, prelude::*, registry, EnvFilter};

const RUST_LOG_ENV: &str = "RUST_LOG";

/// Modules that stay at `INFO` even when a broader directive asks for more,
/// unless they are named explicitly.
const QUIET_MODULES: [&str; 1] = ["hamlet_world::sim"];

/// Build the filter from `RUST_LOG`, on top of an `INFO` default.
///
/// Directives that fail to parse are reported on stderr and skipped, since
/// no subscriber exists yet to log them through.
fn env_filter(env: Option<&str>) -> EnvFilter {
    let mut filter = EnvFilter::new("").add_directive(LevelFilter::INFO.into());
    for module in QUIET_MODULES {
        if let Ok(d) = format!("{}=info", module).parse() {
            filter = filter.add_directive(d);
        }
    }

    for s in env.into_iter().flat_map(|env| env.split(',')) {
        match s.parse() {
            Ok(d) => filter = filter.add_directive(d),
            Err(err) => eprintln!("WARN ignoring log directive: `{}`: {}", s, err),
        }
    }
    filter
}

/// Initialise tracing for a binary, logging to `terminal` and, when
/// `log_path_file` is given, to a file in that directory rotated daily.
///
/// If the log directory cannot be created only the terminal is used. The
/// level defaults to `INFO`. Override it per module with `RUST_LOG`, e.g. to
/// see every rejected plot candidate:
/// `RUST_LOG="hamlet_world::site::sampler=trace"`
///
/// Directives are separated by `,`:
/// `RUST_LOG="hamlet_world::site=debug,hamlet_world::sim=warn,info"`
///
/// The returned guards flush the writers when dropped, so keep them alive
/// until the program is done logging.
pub fn init<W>(log_path_file: Option<(&Path, &str)>, terminal: W) -> Vec<WorkerGuard>
where
    W: Write + Send + 'static,
{
    let env = std::env::var(RUST_LOG_ENV).ok();
    let filter = env_filter(env.as_deref());
    let mut guards = Vec::new();

    let (terminal, terminal_guard) = tracing_appender::non_blocking(terminal);
    guards.push(terminal_guard);
    let registry = registry().with(tracing_subscriber::fmt::layer().with_writer(terminal));

    let file_result = log_path_file.map(|(path, file)| {
        fs::create_dir_all(path).map(|()| {
            let (writer, file_guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::daily(path, file));
            guards.push(file_guard);
            (path, file, writer)
        })
    });

    match file_result {
        Some(Ok((path, file, writer))) => {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(writer),
                )
                .with(filter)
                .init();
            info!(?path, ?file, "Setup terminal and file logging.");
        },
        Some(Err(e)) => {
            registry.with(filter).init();
            error!(?e, "Failed to create log file! Falling back to terminal logging only.");
        },
        None => registry.with(filter).init(),
    }

    if tracing::level_enabled!(Level::TRACE) {
        info!("Tracing Level: TRACE");
    } else if tracing::level_enabled!(Level::DEBUG) {
        info!("Tracing Level: DEBUG");
    }

    guards
}

/// [`init`] with a colour-aware stdout as the terminal.
pub fn init_stdout(log_path_file: Option<(&Path, &str)>) -> Vec<WorkerGuard> {
    init(log_path_file, StandardStream::stdout(ColorChoice::Auto))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_directives_extend_the_default() {
        let filter = env_filter(Some("hamlet_world::site=trace"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));

        let filter = env_filter(None);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn bad_directives_are_skipped() {
        let filter = env_filter(Some("hamlet_world=loud,debug"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }
}
