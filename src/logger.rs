//! Process-wide logging setup on top of `log4rs`.

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::append::rolling_file::policy::compound::{
    CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::Path;

use crate::errors::GenError;

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}";
const CONSOLE_PATTERN: &str = "[{l}] {m}{n}";
const ROLL_SIZE: u64 = 10 * 1024 * 1024;
pub const DEFAULT_RETENTION: usize = 7;

/// error|warn|info|debug|trace|off; anything else reads as `warn`.
#[must_use]
pub fn parse_level(level: Option<&str>) -> LevelFilter {
    match level.unwrap_or("warn").to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Warn,
    }
}

/// Build the logging config: stderr always, plus `bulkseed.log` rolled at 10 MiB
/// in `dir` when a directory is given.
///
/// # Errors
/// Returns [`GenError::Settings`] if the log directory or appenders cannot be set up.
pub fn build_config(dir: Option<&Path>, level: Option<&str>, retention: Option<usize>) -> Result<Config, GenError> {
    let lvl = parse_level(level);
    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(CONSOLE_PATTERN)))
        .build();
    let mut builder = Config::builder().appender(Appender::builder().build("console", Box::new(console)));
    let mut root = Root::builder().appender("console");

    if let Some(dir) = dir {
        std::fs::create_dir_all(dir)?;
        let keep = u32::try_from(retention.unwrap_or(DEFAULT_RETENTION)).unwrap_or(u32::MAX);
        let roller = FixedWindowRoller::builder()
            .build(&format!("{}", dir.join("bulkseed.{}.log").display()), keep)
            .map_err(|e| GenError::Settings(format!("log roller: {e}")))?;
        let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(ROLL_SIZE)), Box::new(roller));
        let file = RollingFileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(PATTERN)))
            .build(dir.join("bulkseed.log"), Box::new(policy))?;
        builder = builder.appender(Appender::builder().build("file", Box::new(file)));
        root = root.appender("file");
    }

    builder.build(root.build(lvl)).map_err(|e| GenError::Settings(format!("log config: {e}")))
}

/// Install logging for the process. A second call is a no-op.
///
/// # Errors
/// Propagates [`build_config`] failures.
pub fn configure_logging(dir: Option<&Path>, level: Option<&str>, retention: Option<usize>) -> Result<(), GenError> {
    let config = build_config(dir, level, retention)?;
    if log4rs::init_config(config).is_err() {
        log::debug!("logger already initialized; keeping existing config");
    }
    Ok(())
}
