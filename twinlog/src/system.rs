// ===== Системный журнал (платформозависимо) =====
//
// Сюда уходят сбои самого логгера: неоткрывшийся файл, неудачная ротация.

#[cfg(target_os = "linux")]
type SystemLogger = syslog::Logger<syslog::LoggerBackend, syslog::Formatter3164>;

pub(crate) struct SystemReporter {
    #[cfg(target_os = "linux")]
    logger: SystemLogger,
}

impl SystemReporter {
    #[cfg(target_os = "linux")]
    pub(crate) fn connect(app_name: &str) -> Option<Self> {
        let formatter = syslog::Formatter3164 {
            facility: syslog::Facility::LOG_USER,
            hostname: None,
            process: app_name.to_owned(),
            pid: std::process::id(),
        };
        syslog::unix(formatter)
            .ok()
            .map(|logger| SystemReporter { logger })
    }

    #[cfg(not(target_os = "linux"))]
    pub(crate) fn connect(_app_name: &str) -> Option<Self> {
        None
    }

    #[cfg(target_os = "linux")]
    pub(crate) fn report(&mut self, msg: &str) {
        let _ = self.logger.err(msg);
    }

    #[cfg(not(target_os = "linux"))]
    pub(crate) fn report(&mut self, _msg: &str) {}
}

impl std::fmt::Debug for SystemReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SystemReporter")
    }
}
