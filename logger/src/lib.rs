use constants::DRIVER_LOG_VERSION;
use directories::UserDirs;
use lazy_static::lazy_static;
use log::LevelFilter;
use log4rs::{
    append::rolling_file::{
        policy::compound::{
            roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger, CompoundPolicy,
        },
        RollingFileAppender,
    },
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    Handle,
};
use shared_sql_utils::DriverSettings;
use std::path::{Path, PathBuf};

const LOG_FILE_SIZE: u64 = 1024 * 500;
const LOG_FILE_COUNT: u32 = 10;

// The logger is global to the process. The first initialization creates it
// and keeps a handle; later connections only adjust the level through the
// handle.
lazy_static! {
    static ref LOGGER: Option<Logger> = {
        let driver_settings = DriverSettings::from_private_profile_string().unwrap_or_default();

        // Logger failure must never take the host application down, so the
        // whole setup runs under catch_unwind.
        std::panic::catch_unwind(|| {
            let log_dir = Logger::get_log_dir();
            let log_dir_str = log_dir.to_str()?;
            let appender = Logger::file_appender(log_dir_str).ok()?;
            let level_filter = Logger::level_filter_from_string(driver_settings.log_level);
            let handle = Logger::init_logger(appender, level_filter)?;
            Some(Logger { handle, log_dir })
        })
        .unwrap_or(None)
    };
}

#[derive(Debug)]
pub struct Logger {
    handle: Handle,
    log_dir: PathBuf,
}

impl Logger {
    /// Force initialization of the global logger. Safe to call on every
    /// connect; only the first call does work.
    pub fn initialize() {
        let _ = LOGGER.as_ref();
    }

    /// Update the logger log level. Affects all logging, including already
    /// opened connections.
    pub fn set_log_level(level_filter: String) {
        if let Some(logger) = LOGGER.as_ref() {
            let level_filter = Self::level_filter_from_string(level_filter);
            if let Some(log_dir) = logger.log_dir.to_str() {
                log::logger().flush();
                if let Ok(appender) = Logger::file_appender(log_dir) {
                    let config = Config::builder()
                        .appender(Appender::builder().build("logfile", Box::new(appender)))
                        .build(Root::builder().appender("logfile").build(level_filter))
                        .unwrap();
                    logger.handle.set_config(config);
                    log::logger().flush();
                }
            }
        }
    }

    /// Convert a string value into the corresponding LevelFilter, defaulting
    /// to INFO for unrecognized values.
    pub fn level_filter_from_string(level_filter: String) -> LevelFilter {
        match level_filter.to_lowercase().as_str() {
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Info,
        }
    }

    fn get_log_dir() -> PathBuf {
        let base = UserDirs::new()
            .and_then(|dirs| dirs.document_dir().map(Path::to_path_buf))
            .unwrap_or_else(std::env::temp_dir);
        base.join("DuckDB")
            .join("ODBC Driver")
            .join(DRIVER_LOG_VERSION)
            .join("logs")
    }

    fn file_appender(log_dir: &str) -> Result<RollingFileAppender, std::io::Error> {
        let file_path = Path::new(log_dir).join("duckdb_odbc.log");
        let roller_pattern = Path::new(log_dir).join("duckdb_odbc.log.{}");

        let roller = FixedWindowRoller::builder()
            .build(roller_pattern.to_str().unwrap_or_default(), LOG_FILE_COUNT)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
        let trigger = SizeTrigger::new(LOG_FILE_SIZE);
        let policy = CompoundPolicy::new(Box::new(trigger), Box::new(roller));
        RollingFileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(
                "{d(%Y-%m-%dT%H:%M:%S%.3f%z)} {f}:{L} - {m}{n}",
            )))
            .build(file_path, Box::new(policy))
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))
    }

    fn init_logger(appender: RollingFileAppender, level_filter: LevelFilter) -> Option<Handle> {
        let config = Config::builder()
            .appender(Appender::builder().build("logfile", Box::new(appender)))
            .build(Root::builder().appender("logfile").build(level_filter))
            .ok()?;
        log4rs::init_config(config).ok()
    }
}

#[cfg(test)]
mod test {
    use super::Logger;
    use log::LevelFilter;

    #[test]
    fn level_filter_parsing() {
        assert_eq!(
            LevelFilter::Debug,
            Logger::level_filter_from_string("DEBUG".to_string())
        );
        assert_eq!(
            LevelFilter::Off,
            Logger::level_filter_from_string("off".to_string())
        );
        assert_eq!(
            LevelFilter::Info,
            Logger::level_filter_from_string("bogus".to_string())
        );
    }
}
