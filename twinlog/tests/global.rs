use twinlog::{default_levels, global, DefaultLevel, Error, FormatFlags, LoggerConfig, SharedStream};

// один тест на файл: глобальный реестр общий для всего процесса
#[test]
fn global_registry_lifecycle() {
    let (stream, buffer) = SharedStream::buffer();
    let config = |threshold: DefaultLevel| {
        LoggerConfig::new("app", "", default_levels(), threshold, FormatFlags::NONE, 10, 10_000)
    };

    global::register_with_fallback(config(DefaultLevel::Debug), stream.clone()).unwrap();
    assert!(global::contains("app"));

    twinlog::gdebug!("app", "This is a debug level print; debug level logging.").unwrap();
    twinlog::gerror!("app", "This is a error level print; debug level logging.").unwrap();

    // смена уровня во время работы
    global::register_with_fallback(config(DefaultLevel::Warning), stream).unwrap();
    twinlog::gdebug!("app", "This will not output with warning level logging.").unwrap();
    twinlog::gwarning!("app", "Warning and higher do print").unwrap();

    assert!(matches!(twinlog::ginfo!("missing", "nobody home"), Err(Error::NotFound(_))));

    let threshold = global::with_logger("app", |logger| logger.threshold()).unwrap();
    assert_eq!(threshold, DefaultLevel::Warning.index());

    global::shutdown_all().unwrap();
    assert!(!global::contains("app"));
    assert_eq!(
        buffer.contents(),
        "debug: This is a debug level print; debug level logging.\n\
         error: This is a error level print; debug level logging.\n\
         warning: Warning and higher do print\n"
    );
}
