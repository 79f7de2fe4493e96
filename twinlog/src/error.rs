//! Ошибки twinlog.

use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("input level was outside range, level:{level}, len(levels)-1:{max}")]
    InvalidThreshold { level: usize, max: usize },

    #[error("level set must contain at least one label")]
    EmptyLevels,

    #[error("invalid logger configuration: {0}")]
    InvalidConfig(String),

    #[error("creating log file directory {path}, error:{source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Уровень сообщения вне диапазона меток логгера. Запись не выполнялась.
    #[error("message level was outside range, level:{level}, len(levels)-1:{max}")]
    LevelOutOfRange { level: usize, max: usize },

    #[error("opening log file {path}, error:{source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("checking size of log file {path}, error:{source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("removing log file {path}, error:{source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("writing log line, error:{0}")]
    Write(#[source] io::Error),

    #[error("closing log file {path}, error:{source}")]
    Close {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("logger '{0}' is shut down")]
    Closed(String),

    #[error("logger '{0}' is not registered")]
    NotFound(String),

    #[error("log file {path} is already used by logger '{owner}'")]
    PathInUse { path: PathBuf, owner: String },

    /// Последняя ошибка ShutdownAll; более ранние перечислены в `prior`.
    #[error("{last}, prior errors: {prior}")]
    ShutdownAll { last: Box<Error>, prior: String },
}

impl Error {
    /// Ошибки ротации: stat, удаление или открытие очередного файла.
    pub fn is_rotation(&self) -> bool {
        matches!(
            self,
            Error::Stat { .. } | Error::Remove { .. } | Error::Open { .. }
        )
    }
}
