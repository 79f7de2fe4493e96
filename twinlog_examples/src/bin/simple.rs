// example_simple — простой пример: логгер в файл, набор уровней по умолчанию, завершение

use twinlog::{
    debug, default_levels, error, info, warning, DefaultLevel, FormatFlags, Logger, LoggerConfig,
};

const APP_NAME: &str = "example_simple";
const APP_VERSION: &str = "1.0.0";

fn main() -> twinlog::Result<()> {
    // 1. Инициализация: файлы logs/simple.log.0 и logs/simple.log.1
    let config = LoggerConfig::new(
        APP_NAME,
        "logs/simple.log",
        default_levels(),
        DefaultLevel::Info,
        FormatFlags::DEFAULT,
        10,
        1024 * 1024,
    );
    let mut logger = Logger::new(config)?;

    if let Some(reason) = logger.fallback_reason() {
        eprintln!("[WARN] log file unavailable, writing to stdout: {}", reason);
    }

    // 2. Основной код
    info!(logger, "Starting {} v{}", APP_NAME, APP_VERSION)?;
    debug!(logger, "Not written: threshold is info")?;
    info!(logger, "Processing data block #1")?;
    warning!(logger, "Non-critical issue detected")?;
    error!(logger, "An error occurred, but we continue")?;

    // 3. Финальная часть
    info!(logger, "Application finished successfully")?;
    logger.shutdown()
}
