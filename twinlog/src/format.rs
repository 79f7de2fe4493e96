use chrono::{DateTime, Local, Utc};
use std::fmt::Write as _;
use std::panic::Location;
use std::path::Path;

// ===== Флаги форматирования =====

/// Какие метаданные выводить перед сообщением.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatFlags {
    pub date: bool,
    pub time: bool,
    pub microseconds: bool,
    pub utc: bool,
    pub short_file: bool,
    pub long_file: bool,
    pub align_labels: bool,
}

impl FormatFlags {
    /// UTC дата, время с микросекундами и короткое имя файла.
    pub const DEFAULT: FormatFlags = FormatFlags {
        date: true,
        time: true,
        microseconds: true,
        utc: true,
        short_file: true,
        long_file: false,
        align_labels: false,
    };

    /// Только метка и сообщение.
    pub const NONE: FormatFlags = FormatFlags {
        date: false,
        time: false,
        microseconds: false,
        utc: false,
        short_file: false,
        long_file: false,
        align_labels: false,
    };
}

impl Default for FormatFlags {
    fn default() -> Self {
        FormatFlags::DEFAULT
    }
}

// ===== Сборка строки =====

pub(crate) fn level_prefix(label: &str, width: usize, flags: FormatFlags) -> String {
    if flags.align_labels {
        format!("{:<width$}: ", label, width = width)
    } else {
        format!("{}: ", label)
    }
}

pub(crate) fn format_line(
    level_prefix: &str,
    flags: FormatFlags,
    location: &Location<'_>,
    message: &str,
) -> String {
    let now = Utc::now();
    format_line_at(level_prefix, flags, location, message, now)
}

fn format_line_at(
    level_prefix: &str,
    flags: FormatFlags,
    location: &Location<'_>,
    message: &str,
    now: DateTime<Utc>,
) -> String {
    let mut line = String::with_capacity(level_prefix.len() + message.len() + 48);
    line.push_str(level_prefix);

    if flags.date || flags.time || flags.microseconds {
        if flags.utc {
            push_timestamp(&mut line, flags, &now);
        } else {
            push_timestamp(&mut line, flags, &now.with_timezone(&Local));
        }
    }

    if flags.short_file || flags.long_file {
        let file = if flags.short_file {
            Path::new(location.file())
                .file_name()
                .and_then(|f| f.to_str())
                .unwrap_or(location.file())
        } else {
            location.file()
        };
        let _ = write!(line, "{}:{}: ", file, location.line());
    }

    line.push_str(message);
    if !message.ends_with('\n') {
        line.push('\n');
    }
    line
}

fn push_timestamp<Tz>(line: &mut String, flags: FormatFlags, ts: &DateTime<Tz>)
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    if flags.date {
        let _ = write!(line, "{} ", ts.format("%Y/%m/%d"));
    }
    if flags.time || flags.microseconds {
        let _ = write!(line, "{}", ts.format("%H:%M:%S"));
        if flags.microseconds {
            let _ = write!(line, "{}", ts.format("%.6f"));
        }
        line.push(' ');
    }
}
