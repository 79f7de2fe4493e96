// example_advanced — потоки, общий логгер под Mutex
// Логгер сам не синхронизирован, поэтому доступ из потоков сериализуем снаружи

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use twinlog::{
    debug, default_levels, error, warning, DefaultLevel, FormatFlags, Logger, LoggerConfig,
};

const APP_NAME: &str = "example_advanced";
const APP_VERSION: &str = "1.1.0";

fn main() -> twinlog::Result<()> {
    let config = LoggerConfig::new(
        APP_NAME,
        "logs/advanced.log",
        default_levels(),
        DefaultLevel::Debug,
        FormatFlags::DEFAULT,
        10,
        1024 * 1024,
    );
    let logger = Arc::new(Mutex::new(Logger::new(config)?));

    debug!(logger.lock().unwrap(), "Starting {} v{}, spawning workers", APP_NAME, APP_VERSION)?;

    let handles: Vec<_> = (0..3)
        .map(|i| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                let _ = debug!(logger.lock().unwrap(), "Worker thread {} started", i);
                thread::sleep(Duration::from_millis(100 * (i + 1)));

                if i == 1 {
                    let _ = warning!(logger.lock().unwrap(), "Worker {} detected high latency", i);
                }

                let _ = debug!(logger.lock().unwrap(), "Worker {} finished", i);
            })
        })
        .collect();

    for h in handles {
        let _ = h.join();
    }

    let mut logger = logger.lock().unwrap();
    error!(logger, "Finalizing with one last error log")?;
    logger.shutdown()
}
