// example_error_init — пример с ошибками инициализации

use twinlog::{default_levels, error, DefaultLevel, FormatFlags, Logger, LoggerConfig};

const APP_NAME: &str = "example_error_init";

fn config(path: &str, threshold: usize) -> LoggerConfig {
    LoggerConfig::new(APP_NAME, path, default_levels(), threshold, FormatFlags::DEFAULT, 10, 1024)
}

fn main() {
    // 1. Неверный порог: логгер не создаётся
    if let Err(e) = Logger::new(config("logs/error.log", 9)) {
        eprintln!("[ERROR] configuration rejected: {}", e);
    }

    // 2. Недоступная директория: ошибка создания каталога
    let log_dir = "/proc/forbidden/error.log";
    let mut logger = match Logger::new(config(log_dir, DefaultLevel::Debug.index())) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("[ERROR] Failed to open log file in {}: {}", log_dir, e);
            // 3. Без файла логгер пишет в stdout
            match Logger::new(config("", DefaultLevel::Debug.index())) {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("[FATAL] {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    if let Err(e) = logger.emit(42usize, "no such level") {
        let _ = error!(logger, "emit rejected: {}", e);
    }

    let _ = logger.shutdown();
}
