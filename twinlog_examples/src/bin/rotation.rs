//! example_rotation — демонстрация ротации логов по размеру

use std::thread;
use std::time::Duration;
use twinlog::{
    debug, default_levels, error, warning, DefaultLevel, FormatFlags, Logger, LoggerConfig,
};

const APP_NAME: &str = "example_rotation";

// Маленький максимальный размер — чтобы ротация сработала быстро
const MAX_LOG_SIZE: u64 = 4096; // 4 КБ
const CHECK_INTERVAL: u32 = 5;

fn main() {
    let config = LoggerConfig::new(
        APP_NAME,
        "logs/rotation.log",
        default_levels(),
        DefaultLevel::Debug,
        FormatFlags::DEFAULT,
        CHECK_INTERVAL,
        MAX_LOG_SIZE,
    );
    let mut logger = match Logger::new(config) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("[FATAL] Failed to create log file: {}", e);
            std::process::exit(1);
        }
    };
    // сбои ротации дублируются в syslog
    logger.report_to_system(APP_NAME);

    let _ = debug!(
        logger,
        "Logger initialized with max_size={} bytes, check every {} writes",
        MAX_LOG_SIZE,
        CHECK_INTERVAL
    );

    let mut slot = logger.slot();
    for i in 0..200 {
        let mut results = vec![debug!(logger, "This is a debug message number {}", i)];
        if i % 30 == 0 {
            results.push(warning!(logger, "Warning message at iteration {}", i));
        }
        if i % 35 == 0 {
            results.push(error!(logger, "Error message at iteration {}", i));
        }
        for e in results.into_iter().filter_map(Result::err) {
            eprintln!("[WARN] {}", e);
        }

        if logger.slot() != slot {
            println!("rotated: {:?} -> {:?} at message {}", slot, logger.slot(), i);
            slot = logger.slot();
        }

        thread::sleep(Duration::from_millis(5));
    }

    let _ = debug!(
        logger,
        "Log generation completed. Check 'logs/' for rotation.log.0 and rotation.log.1"
    );
    if let Err(e) = logger.shutdown() {
        eprintln!("[WARN] {}", e);
    }
}
