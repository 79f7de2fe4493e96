use crate::error::{Error, Result};
use crate::logger::{Logger, LoggerConfig};
use crate::target::SharedStream;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

// ===== Реестр именованных логгеров =====

#[derive(Debug, Default)]
pub struct Registry {
    loggers: HashMap<String, Logger>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// Регистрирует логгер под `config.name`. Прежний логгер с тем же именем
    /// сначала закрывается и удаляется, даже если создание нового не удастся.
    pub fn register(&mut self, config: LoggerConfig) -> Result<&mut Logger> {
        self.register_with_fallback(config, SharedStream::stdout())
    }

    pub fn register_with_fallback(
        &mut self,
        config: LoggerConfig,
        fallback: SharedStream,
    ) -> Result<&mut Logger> {
        if config.is_file_backed() {
            let wanted = normalize(&config.file_path);
            if let Some(owner) = self.loggers.values().find(|l| {
                l.name() != config.name && !l.is_shut_down() && normalize(l.file_path()) == wanted
            }) {
                return Err(Error::PathInUse {
                    path: config.file_path.clone(),
                    owner: owner.name().to_owned(),
                });
            }
        }

        if let Some(mut previous) = self.loggers.remove(&config.name) {
            // файл старого экземпляра уже не нужен, ошибку закрытия не ждём
            let _ = previous.shutdown();
        }

        let name = config.name.clone();
        let logger = Logger::with_fallback(config, fallback)?;
        Ok(self.loggers.entry(name).or_insert(logger))
    }

    pub fn get(&self, name: &str) -> Option<&Logger> {
        self.loggers.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Logger> {
        self.loggers.get_mut(name)
    }

    /// Как `get_mut`, но отсутствие логгера — ошибка.
    pub fn logger(&mut self, name: &str) -> Result<&mut Logger> {
        self.loggers
            .get_mut(name)
            .ok_or_else(|| Error::NotFound(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.loggers.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.loggers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.loggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.is_empty()
    }

    /// Закрывает и удаляет один логгер.
    pub fn unregister(&mut self, name: &str) -> Result<()> {
        let mut logger = self
            .loggers
            .remove(name)
            .ok_or_else(|| Error::NotFound(name.to_owned()))?;
        logger.shutdown()
    }

    /// Закрывает все логгеры и очищает реестр. Возвращает последнюю ошибку,
    /// более ранние перечисляются в её тексте.
    pub fn shutdown_all(&mut self) -> Result<()> {
        let mut errors: Vec<Error> = self
            .loggers
            .drain()
            .filter_map(|(_, mut logger)| logger.shutdown().err())
            .collect();

        let Some(last) = errors.pop() else {
            return Ok(());
        };
        if errors.is_empty() {
            return Err(last);
        }
        let prior = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(Error::ShutdownAll {
            last: Box::new(last),
            prior,
        })
    }
}

// `logs/a.log` и `./logs/a.log` — один и тот же файл. Символьные ссылки и
// `..` не раскрываются.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

// ===== Глобальный реестр =====

/// Общий на процесс реестр. Живёт до конца процесса; `shutdown_all`
/// закрывает все логгеры и очищает его.
pub mod global {
    use super::Registry;
    use crate::error::{Error, Result};
    use crate::logger::{Logger, LoggerConfig};
    use crate::target::SharedStream;
    use once_cell::sync::Lazy;
    use std::sync::{Mutex, MutexGuard};

    static GLOBAL_REGISTRY: Lazy<Mutex<Registry>> = Lazy::new(|| Mutex::new(Registry::new()));

    fn registry() -> MutexGuard<'static, Registry> {
        GLOBAL_REGISTRY.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn register(config: LoggerConfig) -> Result<()> {
        registry().register(config).map(|_| ())
    }

    pub fn register_with_fallback(config: LoggerConfig, fallback: SharedStream) -> Result<()> {
        registry()
            .register_with_fallback(config, fallback)
            .map(|_| ())
    }

    /// Выполняет `f` над логгером `name` под блокировкой реестра.
    ///
    /// Блокировка держится, пока работает `f`: вызов любой функции `global::*`
    /// или макроса `g*!` изнутри `f` приведёт к взаимной блокировке.
    pub fn with_logger<R>(name: &str, f: impl FnOnce(&mut Logger) -> R) -> Result<R> {
        let mut registry = registry();
        let logger = registry
            .get_mut(name)
            .ok_or_else(|| Error::NotFound(name.to_owned()))?;
        Ok(f(logger))
    }

    pub fn contains(name: &str) -> bool {
        registry().contains(name)
    }

    pub fn unregister(name: &str) -> Result<()> {
        registry().unregister(name)
    }

    pub fn shutdown_all() -> Result<()> {
        registry().shutdown_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatFlags;
    use crate::level::{default_levels, DefaultLevel};

    fn config(name: &str, path: &Path) -> LoggerConfig {
        LoggerConfig::new(
            name,
            path,
            default_levels(),
            DefaultLevel::Debug,
            FormatFlags::NONE,
            10,
            10_000,
        )
    }

    #[test]
    fn reregistering_replaces_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let mut registry = Registry::new();

        registry.register(config("app", &path)).unwrap();
        let mut warn_only = config("app", &path);
        warn_only.threshold = DefaultLevel::Warning.index();
        registry.register(warn_only).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("app").unwrap().threshold(), 2);
    }

    #[test]
    fn missing_logger_is_an_error() {
        let mut registry = Registry::new();
        assert!(registry.get("ghost").is_none());
        assert!(matches!(registry.logger("ghost"), Err(Error::NotFound(_))));
        assert!(matches!(registry.unregister("ghost"), Err(Error::NotFound(_))));
    }

    #[test]
    fn shared_path_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.log");
        let mut registry = Registry::new();

        registry.register(config("first", &path)).unwrap();
        let err = registry.register(config("second", &path)).unwrap_err();
        assert!(matches!(err, Error::PathInUse { ref owner, .. } if owner == "first"));
    }

    #[test]
    fn shut_down_logger_releases_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.log");
        let mut registry = Registry::new();

        registry.register(config("first", &path)).unwrap();
        registry.logger("first").unwrap().shutdown().unwrap();
        assert!(registry.get("first").unwrap().is_shut_down());

        let second = registry.register(config("second", &path)).unwrap();
        second.emit(DefaultLevel::Info, "taken over").unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn equivalent_spellings_share_a_path() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("logs").join("a.log");
        let dotted = dir.path().join(".").join("logs").join(".").join("a.log");
        let mut registry = Registry::new();

        registry.register(config("first", &plain)).unwrap();
        let err = registry.register(config("second", &dotted)).unwrap_err();
        assert!(matches!(err, Error::PathInUse { ref owner, .. } if owner == "first"));
    }

    #[test]
    fn relative_leading_dot_is_ignored() {
        assert_eq!(normalize(Path::new("./logs/a.log")), PathBuf::from("logs/a.log"));
        assert_eq!(normalize(Path::new("logs/a.log")), PathBuf::from("logs/a.log"));
    }

    #[test]
    fn stream_loggers_may_coexist() {
        let (stream, _buffer) = SharedStream::buffer();
        let mut registry = Registry::new();
        registry
            .register_with_fallback(config("a", Path::new("")), stream.clone())
            .unwrap();
        registry
            .register_with_fallback(config("b", Path::new("")), stream)
            .unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn shutdown_all_clears() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = Registry::new();
        registry.register(config("a", &dir.path().join("a.log"))).unwrap();
        registry.register(config("b", &dir.path().join("b.log"))).unwrap();

        registry.shutdown_all().unwrap();
        assert!(registry.is_empty());
        registry.shutdown_all().unwrap();
    }
}
