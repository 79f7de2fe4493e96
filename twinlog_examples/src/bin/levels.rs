// example_levels — свои метки уровней и смена уровня во время работы через реестр

use twinlog::{log, FormatFlags, LoggerConfig, Registry};

const APP_NAME: &str = "example_levels";

const TRACE: usize = 0;
const NOTICE: usize = 1;
const ALERT: usize = 2;

fn config(threshold: usize) -> LoggerConfig {
    let levels = ["trace", "notice", "alert"].iter().map(|s| s.to_string()).collect();
    let flags = FormatFlags {
        align_labels: true,
        ..FormatFlags::DEFAULT
    };
    // пустой путь — вывод в stdout
    LoggerConfig::new(APP_NAME, "", levels, threshold, flags, 10, 10_000)
}

fn main() -> twinlog::Result<()> {
    let mut registry = Registry::new();

    let logger = registry.register(config(TRACE))?;
    log!(logger, TRACE, "trace output is on")?;
    log!(logger, NOTICE, "notice output is on")?;

    // Повышаем порог: старый экземпляр закрывается, новый занимает имя
    let logger = registry.register(config(ALERT))?;
    log!(logger, NOTICE, "this notice is filtered")?;
    log!(logger, ALERT, "only alerts from here on")?;

    // Понижаем обратно
    let logger = registry.register(config(TRACE))?;
    log!(logger, TRACE, "and trace is back")?;

    if let Err(e) = registry.logger("unknown") {
        println!("lookup failed as expected: {}", e);
    }

    registry.shutdown_all()
}
