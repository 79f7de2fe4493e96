use crate::error::{Error, Result};
use crate::format::{self, FormatFlags};
use crate::level;
use crate::rotation::{self, slot_path, RotationState};
use crate::system::SystemReporter;
use crate::target::{SharedStream, Target};
use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};

// ===== Конфигурация =====

/// Параметры логгера. Все поля обязательны; пустой `file_path` означает
/// запись в запасной поток без ротации.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub name: String,
    pub file_path: PathBuf,
    pub levels: Vec<String>,
    pub threshold: usize,
    pub flags: FormatFlags,
    /// Размер файла проверяется раз в `check_interval` вызовов.
    pub check_interval: u32,
    /// Порог ротации в байтах.
    pub max_size: u64,
}

impl LoggerConfig {
    pub fn new(
        name: &str,
        file_path: impl Into<PathBuf>,
        levels: Vec<String>,
        threshold: impl Into<usize>,
        flags: FormatFlags,
        check_interval: u32,
        max_size: u64,
    ) -> Self {
        LoggerConfig {
            name: name.to_owned(),
            file_path: file_path.into(),
            levels,
            threshold: threshold.into(),
            flags,
            check_interval,
            max_size,
        }
    }

    pub fn validate(&self) -> Result<()> {
        level::validate(&self.levels, self.threshold)?;
        if self.check_interval == 0 {
            return Err(Error::InvalidConfig("check_interval must be positive".into()));
        }
        if self.max_size == 0 {
            return Err(Error::InvalidConfig("max_size must be positive".into()));
        }
        Ok(())
    }

    pub(crate) fn is_file_backed(&self) -> bool {
        !self.file_path.as_os_str().is_empty()
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|source| Error::CreateDirectory {
                path: dir.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

// ===== Логгер =====

#[derive(Debug)]
pub struct Logger {
    name: String,
    file_path: PathBuf,
    levels: Vec<String>,
    threshold: usize,
    flags: FormatFlags,
    max_size: u64,
    label_width: usize,
    // готовые префиксы "<метка>: " по уровням; очищаются при Shutdown
    prefixes: Vec<String>,
    // None у логгеров без файла
    rotation: Option<RotationState>,
    // None после Shutdown
    target: Option<Target>,
    fallback: SharedStream,
    fallback_reason: Option<String>,
    reporter: Option<SystemReporter>,
}

impl Logger {
    /// Создаёт логгер; запасной поток — stdout.
    pub fn new(config: LoggerConfig) -> Result<Self> {
        Self::with_fallback(config, SharedStream::stdout())
    }

    /// Как `new`, но с явно заданным запасным потоком.
    ///
    /// Неудачное открытие файла не считается ошибкой создания: логгер пишет
    /// в `fallback`, а причина доступна через [`Logger::fallback_reason`].
    pub fn with_fallback(config: LoggerConfig, fallback: SharedStream) -> Result<Self> {
        config.validate()?;

        let mut fallback_reason = None;
        let (target, rotation) = if config.is_file_backed() {
            ensure_parent_dir(&config.file_path)?;
            let slot = rotation::select_slot(&config.file_path, config.max_size)?;
            let path = slot_path(&config.file_path, slot);
            let target = match Target::open(&path) {
                Ok(target) => target,
                Err(source) => {
                    fallback_reason = Some(Error::Open { path, source }.to_string());
                    Target::Stream(fallback.clone())
                }
            };
            (target, Some(RotationState::new(slot, config.check_interval)))
        } else {
            (Target::Stream(fallback.clone()), None)
        };

        let label_width = level::label_width(&config.levels);
        let prefixes = config
            .levels
            .iter()
            .map(|label| format::level_prefix(label, label_width, config.flags))
            .collect();

        Ok(Logger {
            name: config.name,
            file_path: config.file_path,
            levels: config.levels,
            threshold: config.threshold,
            flags: config.flags,
            max_size: config.max_size,
            label_width,
            prefixes,
            rotation,
            target: Some(target),
            fallback,
            fallback_reason,
            reporter: None,
        })
    }

    /// Дублировать сбои открытия и ротации в системный журнал.
    /// Возвращает `false`, если журнал недоступен.
    pub fn report_to_system(&mut self, app_name: &str) -> bool {
        self.reporter = SystemReporter::connect(app_name);
        if let (Some(reporter), Some(reason)) = (self.reporter.as_mut(), &self.fallback_reason) {
            reporter.report(reason);
        }
        self.reporter.is_some()
    }

    /// Println: одна строка с меткой уровня `severity`.
    #[track_caller]
    pub fn emit(&mut self, severity: impl Into<usize>, message: &str) -> Result<()> {
        self.emit_at(severity.into(), Location::caller(), || Cow::Borrowed(message))
    }

    /// Printf: сообщение форматируется, только если уровень проходит фильтр.
    #[track_caller]
    pub fn log(&mut self, severity: impl Into<usize>, args: fmt::Arguments<'_>) -> Result<()> {
        self.emit_at(severity.into(), Location::caller(), || match args.as_str() {
            Some(s) => Cow::Borrowed(s),
            None => Cow::Owned(args.to_string()),
        })
    }

    fn emit_at<'m>(
        &mut self,
        severity: usize,
        location: &Location<'_>,
        message: impl FnOnce() -> Cow<'m, str>,
    ) -> Result<()> {
        if self.target.is_none() {
            return Err(Error::Closed(self.name.clone()));
        }
        level::check_severity(&self.levels, severity)?;

        let mut result = Ok(());
        if level::should_log(severity, self.threshold) {
            let prefix = &self.prefixes[severity];
            let line = format::format_line(prefix, self.flags, location, &message());
            if let Some(target) = self.target.as_mut() {
                result = target.write_line(&line).map_err(Error::Write);
            }
        }

        // ротация считает все вызовы, а не только прошедшие фильтр
        let due = self.rotation.as_mut().map_or(false, RotationState::record_write);
        if due {
            let rotated = self.rotate_if_needed();
            if result.is_ok() {
                result = rotated;
            }
        }
        result
    }

    /// Немедленная проверка размера и ротация, не дожидаясь интервала.
    pub fn check_rotation(&mut self) -> Result<()> {
        if self.target.is_none() {
            return Err(Error::Closed(self.name.clone()));
        }
        self.rotate_if_needed()
    }

    fn rotate_if_needed(&mut self) -> Result<()> {
        let res = self.try_rotate();
        if let (Err(e), Some(reporter)) = (&res, self.reporter.as_mut()) {
            reporter.report(&format!("{}: {}", self.name, e));
        }
        res
    }

    fn try_rotate(&mut self) -> Result<()> {
        let Some(state) = self.rotation.as_mut() else {
            return Ok(());
        };
        state.reset();
        let slot = state.slot;

        // прошлое открытие не удалось: пробуем снова тот же слот
        if !self.target.as_ref().map_or(false, Target::is_file) {
            return self.switch_to(slot);
        }

        let size = rotation::file_size(&slot_path(&self.file_path, slot))?;
        if size <= self.max_size {
            return Ok(());
        }

        // слот меняется только после удаления, иначе остаёмся на прежнем файле
        let next = rotation::next_slot(slot);
        rotation::remove_slot(&self.file_path, next)?;
        state.slot = next;
        self.switch_to(next)
    }

    fn switch_to(&mut self, slot: usize) -> Result<()> {
        let path = slot_path(&self.file_path, slot);
        let (new_target, opened) = match Target::open(&path) {
            Ok(target) => {
                self.fallback_reason = None;
                (target, Ok(()))
            }
            Err(source) => {
                let err = Error::Open { path, source };
                self.fallback_reason = Some(err.to_string());
                (Target::Stream(self.fallback.clone()), Err(err))
            }
        };

        if let Some(old) = self.target.replace(new_target) {
            if let Err((path, source)) = old.close() {
                opened?;
                return Err(Error::Close { path, source });
            }
        }
        opened
    }

    /// Закрывает файл. Повторный вызов ничего не делает.
    pub fn shutdown(&mut self) -> Result<()> {
        self.prefixes.clear();
        self.rotation = None;
        match self.target.take() {
            Some(target) => target
                .close()
                .map_err(|(path, source)| Error::Close { path, source }),
            None => Ok(()),
        }
    }

    /// Смена порога без пересоздания логгера.
    pub fn set_threshold(&mut self, threshold: impl Into<usize>) -> Result<()> {
        let threshold = threshold.into();
        level::validate(&self.levels, threshold)?;
        self.threshold = threshold;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn label_width(&self) -> usize {
        self.label_width
    }

    /// Текущий слот ротации; `None` для логгера без файла.
    pub fn slot(&self) -> Option<usize> {
        self.rotation.as_ref().map(|r| r.slot)
    }

    /// Путь открытого файла; `None`, если пишем в запасной поток.
    pub fn active_path(&self) -> Option<&Path> {
        match self.target.as_ref()? {
            Target::File { path, .. } => Some(path.as_path()),
            Target::Stream(_) => None,
        }
    }

    pub fn fallback_reason(&self) -> Option<&str> {
        self.fallback_reason.as_deref()
    }

    pub fn is_shut_down(&self) -> bool {
        self.target.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{default_levels, DefaultLevel};

    fn stream_config(threshold: DefaultLevel) -> LoggerConfig {
        LoggerConfig::new("unit", "", default_levels(), threshold, FormatFlags::NONE, 10, 1000)
    }

    #[test]
    fn stream_logger_writes_bare_line() {
        let (stream, buffer) = SharedStream::buffer();
        let mut logger = Logger::with_fallback(stream_config(DefaultLevel::Debug), stream).unwrap();

        logger.emit(DefaultLevel::Debug, "Sending data to defaultOutput").unwrap();
        assert_eq!(buffer.contents(), "debug: Sending data to defaultOutput\n");
        assert_eq!(logger.slot(), None);
        assert!(logger.active_path().is_none());
    }

    #[test]
    fn invalid_threshold_fails_construction() {
        let mut config = stream_config(DefaultLevel::Debug);
        config.threshold = 5;
        assert!(matches!(Logger::new(config), Err(Error::InvalidThreshold { .. })));
    }

    #[test]
    fn zero_interval_or_size_is_rejected() {
        let mut config = stream_config(DefaultLevel::Debug);
        config.check_interval = 0;
        assert!(matches!(Logger::new(config), Err(Error::InvalidConfig(_))));

        let mut config = stream_config(DefaultLevel::Debug);
        config.max_size = 0;
        assert!(matches!(Logger::new(config), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn out_of_range_severity_writes_nothing() {
        let (stream, buffer) = SharedStream::buffer();
        let mut logger = Logger::with_fallback(stream_config(DefaultLevel::Debug), stream).unwrap();

        let err = logger.emit(7usize, "nope").unwrap_err();
        assert!(matches!(err, Error::LevelOutOfRange { level: 7, max: 4 }));
        assert_eq!(buffer.contents(), "");
    }

    #[test]
    fn printf_formats_arguments() {
        let (stream, buffer) = SharedStream::buffer();
        let mut logger = Logger::with_fallback(stream_config(DefaultLevel::Info), stream).unwrap();

        logger.log(DefaultLevel::Warning, format_args!("disk {}% full", 93)).unwrap();
        logger.log(DefaultLevel::Debug, format_args!("hidden {}", 1)).unwrap();
        assert_eq!(buffer.contents(), "warning: disk 93% full\n");
    }

    #[test]
    fn set_threshold_changes_filter() {
        let (stream, buffer) = SharedStream::buffer();
        let mut logger = Logger::with_fallback(stream_config(DefaultLevel::Error), stream).unwrap();

        logger.emit(DefaultLevel::Info, "first").unwrap();
        logger.set_threshold(DefaultLevel::Info).unwrap();
        logger.emit(DefaultLevel::Info, "second").unwrap();
        assert!(logger.set_threshold(9usize).is_err());

        assert_eq!(buffer.contents(), "info: second\n");
    }

    #[test]
    fn emit_after_shutdown_is_rejected() {
        let (stream, _buffer) = SharedStream::buffer();
        let mut logger = Logger::with_fallback(stream_config(DefaultLevel::Debug), stream).unwrap();

        logger.shutdown().unwrap();
        logger.shutdown().unwrap();
        assert!(logger.is_shut_down());
        assert!(matches!(logger.emit(DefaultLevel::Error, "late"), Err(Error::Closed(_))));
    }

    #[test]
    fn shutdown_drops_rotation_slot() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("log.txt");
        let config = LoggerConfig::new(
            "unit",
            &base,
            default_levels(),
            DefaultLevel::Debug,
            FormatFlags::NONE,
            1,
            1000,
        );
        let mut logger = Logger::new(config).unwrap();
        assert_eq!(logger.slot(), Some(0));

        logger.shutdown().unwrap();
        assert_eq!(logger.slot(), None);
        assert!(logger.active_path().is_none());
        assert!(matches!(logger.check_rotation(), Err(Error::Closed(_))));
    }

    #[test]
    fn aligned_labels_use_max_width() {
        let (stream, buffer) = SharedStream::buffer();
        let mut config = stream_config(DefaultLevel::Debug);
        config.flags.align_labels = true;
        let mut logger = Logger::with_fallback(config, stream).unwrap();

        assert_eq!(logger.label_width(), 7);
        logger.emit(DefaultLevel::Info, "x").unwrap();
        assert_eq!(buffer.contents(), "info   : x\n");
    }
}
