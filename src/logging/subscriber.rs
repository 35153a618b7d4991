//! Tracing subscriber: one line format shared by the console and the run log.
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::fmt::format::{DefaultFields, Writer};
use tracing_subscriber::fmt::{self, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use super::types::TaskStatus;
use crate::environment::Environment;

pub(super) const STAGE: &str = "dotfiles::stage";
pub(super) const DRY_RUN: &str = "dotfiles::dry_run";
pub(super) const SUMMARY_OK: &str = "dotfiles::summary::ok";
pub(super) const SUMMARY_PLANNED: &str = "dotfiles::summary::planned";
pub(super) const SUMMARY_FAILED: &str = "dotfiles::summary::failed";

/// What a line means, read off the event's level and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Stage,
    Intent,
    Notice,
    Summary(TaskStatus),
    Warn,
    Error,
    Detail,
}

impl Kind {
    fn of(meta: &Metadata<'_>) -> Self {
        match (*meta.level(), meta.target()) {
            (Level::ERROR, _) => Self::Error,
            (Level::WARN, _) => Self::Warn,
            (Level::INFO, STAGE) => Self::Stage,
            (Level::INFO, DRY_RUN) => Self::Notice,
            (Level::INFO, SUMMARY_OK) => Self::Summary(TaskStatus::Ok),
            (Level::INFO, SUMMARY_PLANNED) => Self::Summary(TaskStatus::DryRun),
            (Level::INFO, SUMMARY_FAILED) => Self::Summary(TaskStatus::Failed),
            (Level::INFO, _) => Self::Intent,
            _ => Self::Detail,
        }
    }

    const fn indent(self) -> &'static str {
        match self {
            Self::Stage | Self::Error => "",
            _ => "  ",
        }
    }

    const fn marker(self) -> Option<&'static str> {
        match self {
            Self::Stage => Some("==>"),
            Self::Notice => Some("(dry run)"),
            Self::Warn => Some("warning:"),
            Self::Error => Some("error:"),
            Self::Intent | Self::Summary(_) | Self::Detail => None,
        }
    }

    /// SGR parameters for the whole line, empty for plain text.
    const fn color(self) -> &'static str {
        match self {
            Self::Stage => "1;34",
            Self::Notice | Self::Warn => "33",
            Self::Error | Self::Summary(TaskStatus::Failed) => "31",
            Self::Summary(TaskStatus::Ok) => "32",
            Self::Summary(TaskStatus::DryRun) => "37",
            Self::Detail => "2",
            Self::Intent => "",
        }
    }

    /// Column tag in the run log.
    const fn tag(self) -> &'static str {
        match self {
            Self::Stage => "stage",
            Self::Intent => "action",
            Self::Notice => "dry-run",
            Self::Summary(_) => "summary",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Detail => "debug",
        }
    }
}

/// Renders one event per line.
///
/// The console variant indents and colors by meaning; the run log variant
/// prefixes a UTC time and a fixed-width tag and never emits escapes.
#[derive(Debug, Clone, Copy)]
pub(super) enum LineFormat {
    Console,
    File,
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let kind = Kind::of(event.metadata());
        match self {
            Self::Console => {
                let color = if writer.has_ansi_escapes() {
                    kind.color()
                } else {
                    ""
                };
                writer.write_str(kind.indent())?;
                if !color.is_empty() {
                    write!(writer, "\x1b[{color}m")?;
                }
                if let Some(marker) = kind.marker() {
                    write!(writer, "{marker} ")?;
                }
                ctx.field_format().format_fields(writer.by_ref(), event)?;
                if !color.is_empty() {
                    writer.write_str("\x1b[0m")?;
                }
            }
            Self::File => {
                write!(
                    writer,
                    "{} {:<7} ",
                    chrono::Utc::now().format("%H:%M:%S"),
                    kind.tag()
                )?;
                ctx.field_format().format_fields(writer.by_ref(), event)?;
            }
        }
        writeln!(writer)
    }
}

/// `$XDG_CACHE_HOME/dotfiles/<command>.log`, or `~/.cache/dotfiles/` when
/// `XDG_CACHE_HOME` is unset. The directory is created.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let cache = std::env::var_os("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .or_else(|| Environment::home_dir().ok().map(|home| home.join(".cache")))?;
    let dir = cache.join("dotfiles");
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

/// A layer writing every event to a fresh run log at `path`.
///
/// The file is truncated and starts with a one-line run header. Returns
/// `None` if it cannot be created.
pub(super) fn file_layer<S>(
    path: &Path,
) -> Option<fmt::Layer<S, DefaultFields, LineFormat, Mutex<fs::File>>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let mut file = fs::File::create(path).ok()?;
    writeln!(
        file,
        "# dotfiles-bootstrap {} run started {}",
        env!("CARGO_PKG_VERSION"),
        chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
    )
    .ok()?;
    Some(
        fmt::layer()
            .event_format(LineFormat::File)
            .with_ansi(false)
            .with_writer(Mutex::new(file)),
    )
}

/// Initialise the global [`tracing`] subscriber.
///
/// Warnings and errors go to stderr, everything else to stdout; debug lines
/// reach the console only when `verbose`. Every event including debug is
/// also written to the run log for `command` (see [`log_file_path`]). Must
/// be called once at program startup, before any logging.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let console = std::io::stderr
        .with_max_level(Level::WARN)
        .and(std::io::stdout.with_min_level(Level::INFO));

    let console_layer = fmt::layer()
        .event_format(LineFormat::Console)
        .with_writer(console)
        .with_filter(console_level);

    let run_log = log_file_path(command)
        .and_then(|path| file_layer(&path))
        .map(|layer| layer.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(run_log)
        .init();
}
