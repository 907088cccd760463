use std::{env, io::Write, sync::Once};

use chrono::Local;
use env_logger::{fmt::Formatter, Builder as EnvLoggerBuilder};
use log::{LevelFilter, Record};

use crate::errors::error::{TestUtilsError, TestUtilsResult};

static TEST_LOGGING_INIT: Once = Once::new();

const DEFAULT_PATTERN: &str = "warn";

/// Installs the test logger once per process. Stays silent unless `RUST_LOG` is set.
pub fn init_logger() {
    TEST_LOGGING_INIT.call_once(|| {
        if let Ok(pattern) = env::var("RUST_LOG") {
            if let Err(err) = LibvcxDefaultLogger::init(Some(pattern)) {
                eprintln!("{err}");
            }
        }
    })
}

#[derive(Debug)]
pub struct LibvcxDefaultLogger;

type FormatFn = fn(&mut Formatter, &Record<'_>) -> std::io::Result<()>;

fn write_record(buf: &mut Formatter, record: &Record<'_>, level: &dyn std::fmt::Display) -> std::io::Result<()> {
    writeln!(
        buf,
        "{}|{:>5}|{:<30}|{:>35}:{:<4}| {}",
        Local::now().format("%Y-%m-%d %H:%M:%S.%f"),
        level,
        record.target(),
        record.file().unwrap_or(""),
        record.line().unwrap_or(0),
        record.args()
    )
}

fn text_format(buf: &mut Formatter, record: &Record<'_>) -> std::io::Result<()> {
    let style = buf.default_level_style(record.level());
    let level = style.value(record.level());
    write_record(buf, record, &level)
}

fn text_no_color_format(buf: &mut Formatter, record: &Record<'_>) -> std::io::Result<()> {
    write_record(buf, record, &record.level())
}

fn formatter_from_env() -> FormatFn {
    match env::var("RUST_LOG_FORMATTER").as_deref() {
        Ok("text_no_color") => text_no_color_format,
        _ => text_format,
    }
}

impl LibvcxDefaultLogger {
    pub fn init(pattern: Option<String>) -> TestUtilsResult<()> {
        let pattern = pattern.or_else(|| env::var("RUST_LOG").ok());
        EnvLoggerBuilder::new()
            .format(formatter_from_env())
            .filter(None, LevelFilter::Off)
            .parse_filters(pattern.as_deref().unwrap_or(DEFAULT_PATTERN))
            .is_test(true)
            .try_init()
            .map_err(|err| TestUtilsError::LoggingError(format!("Cannot init logger: {err:?}")))
    }
}
