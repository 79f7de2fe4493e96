use crate::error::{Error, Result};

// ===== Уровни логгирования =====

/// Набор меток по умолчанию, в порядке возрастания важности.
pub const DEFAULT_LEVELS: [&str; 5] = ["debug", "info", "warning", "audit", "error"];

/// Индексы для `DEFAULT_LEVELS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DefaultLevel {
    Debug,
    Info,
    Warning,
    Audit,
    Error,
}

impl DefaultLevel {
    pub const ALL: [DefaultLevel; 5] = [
        DefaultLevel::Debug,
        DefaultLevel::Info,
        DefaultLevel::Warning,
        DefaultLevel::Audit,
        DefaultLevel::Error,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        DEFAULT_LEVELS[self.index()]
    }
}

impl From<DefaultLevel> for usize {
    fn from(level: DefaultLevel) -> usize {
        level.index()
    }
}

pub fn default_levels() -> Vec<String> {
    DEFAULT_LEVELS.iter().map(|s| s.to_string()).collect()
}

// ===== Фильтр =====

pub(crate) fn should_log(severity: usize, threshold: usize) -> bool {
    severity >= threshold
}

pub(crate) fn validate(levels: &[String], threshold: usize) -> Result<()> {
    if levels.is_empty() {
        return Err(Error::EmptyLevels);
    }
    if threshold >= levels.len() {
        return Err(Error::InvalidThreshold {
            level: threshold,
            max: levels.len() - 1,
        });
    }
    Ok(())
}

pub(crate) fn check_severity(levels: &[String], severity: usize) -> Result<()> {
    if severity >= levels.len() {
        return Err(Error::LevelOutOfRange {
            level: severity,
            max: levels.len().saturating_sub(1),
        });
    }
    Ok(())
}

/// Ширина самой длинной метки; нужна для выравнивания префиксов.
pub(crate) fn label_width(levels: &[String]) -> usize {
    levels.iter().map(|l| l.chars().count()).max().unwrap_or(0)
}
