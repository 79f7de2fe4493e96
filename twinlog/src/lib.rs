//! twinlog — именованные многоуровневые логгеры с ротацией двух файлов.
//!
//! Каждый логгер имеет свой набор меток, порог и цель вывода. Файловый
//! логгер пишет в `<path>.0` / `<path>.1` и переключается между ними, когда
//! текущий файл превышает `max_size`. Размер проверяется раз в
//! `check_interval` вызовов.
//!
//! Логгер не синхронизирован: все изменяющие методы берут `&mut self`.

mod error;
mod format;
mod level;
mod logger;
mod registry;
mod rotation;
mod system;
mod target;

pub use error::{Error, Result};
pub use format::FormatFlags;
pub use level::{default_levels, DefaultLevel, DEFAULT_LEVELS};
pub use logger::{Logger, LoggerConfig};
pub use registry::{global, Registry};
pub use rotation::{slot_path, MAX_ROTATIONS};
pub use target::{MemoryBuffer, SharedStream};

// ===== Макросы =====
//
// Все макросы возвращают `twinlog::Result<()>`.

#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)*) => {{
        $logger.log($level, ::std::format_args!($($arg)*))
    }};
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)*) => {{
        $logger.log($crate::DefaultLevel::Debug, ::std::format_args!($($arg)*))
    }};
}
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)*) => {{
        $logger.log($crate::DefaultLevel::Info, ::std::format_args!($($arg)*))
    }};
}
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)*) => {{
        $logger.log($crate::DefaultLevel::Warning, ::std::format_args!($($arg)*))
    }};
}
#[macro_export]
macro_rules! audit {
    ($logger:expr, $($arg:tt)*) => {{
        $logger.log($crate::DefaultLevel::Audit, ::std::format_args!($($arg)*))
    }};
}
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)*) => {{
        $logger.log($crate::DefaultLevel::Error, ::std::format_args!($($arg)*))
    }};
}

// ===== Глобальные макросы =====
//
// Пишут в логгер из глобального реестра по имени; незарегистрированное
// имя даёт `Error::NotFound`.

#[macro_export]
macro_rules! glog {
    ($name:expr, $level:expr, $($arg:tt)*) => {{
        $crate::global::with_logger($name, |logger| {
            logger.log($level, ::std::format_args!($($arg)*))
        })
        .and_then(::std::convert::identity)
    }};
}
#[macro_export]
macro_rules! gdebug {
    ($name:expr, $($arg:tt)*) => {{
        $crate::glog!($name, $crate::DefaultLevel::Debug, $($arg)*)
    }};
}
#[macro_export]
macro_rules! ginfo {
    ($name:expr, $($arg:tt)*) => {{
        $crate::glog!($name, $crate::DefaultLevel::Info, $($arg)*)
    }};
}
#[macro_export]
macro_rules! gwarning {
    ($name:expr, $($arg:tt)*) => {{
        $crate::glog!($name, $crate::DefaultLevel::Warning, $($arg)*)
    }};
}
#[macro_export]
macro_rules! gaudit {
    ($name:expr, $($arg:tt)*) => {{
        $crate::glog!($name, $crate::DefaultLevel::Audit, $($arg)*)
    }};
}
#[macro_export]
macro_rules! gerror {
    ($name:expr, $($arg:tt)*) => {{
        $crate::glog!($name, $crate::DefaultLevel::Error, $($arg)*)
    }};
}
