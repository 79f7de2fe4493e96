use crate::error::{Error, Result};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

// ===== Ротация двух файлов =====

pub const MAX_ROTATIONS: usize = 2;

/// `<path>.<slot>`
pub fn slot_path(base: &Path, slot: usize) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(format!(".{}", slot));
    PathBuf::from(name)
}

pub(crate) fn next_slot(slot: usize) -> usize {
    (slot + 1) % MAX_ROTATIONS
}

/// Выбор файла при старте: первый несуществующий или меньший `max_size`.
/// Если заполнены оба, слот 0 очищается.
pub(crate) fn select_slot(base: &Path, max_size: u64) -> Result<usize> {
    for slot in 0..MAX_ROTATIONS {
        match fs::metadata(slot_path(base, slot)) {
            Err(_) => return Ok(slot),
            Ok(meta) if meta.len() < max_size => return Ok(slot),
            Ok(_) => {}
        }
    }

    remove_slot(base, 0)?;
    Ok(0)
}

/// Удаляет файл слота; отсутствие файла ошибкой не считается.
pub(crate) fn remove_slot(base: &Path, slot: usize) -> Result<()> {
    let path = slot_path(base, slot);
    match fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(Error::Remove { path, source }),
    }
}

pub(crate) fn file_size(path: &Path) -> Result<u64> {
    fs::metadata(path)
        .map(|m| m.len())
        .map_err(|source| Error::Stat {
            path: path.to_path_buf(),
            source,
        })
}

/// Счётчик записей между проверками размера.
#[derive(Debug)]
pub(crate) struct RotationState {
    pub(crate) slot: usize,
    writes_since_check: u32,
    check_interval: u32,
}

impl RotationState {
    pub(crate) fn new(slot: usize, check_interval: u32) -> Self {
        RotationState {
            slot,
            writes_since_check: 0,
            check_interval,
        }
    }

    /// Учитывает вызов; `true`, когда пора проверять размер.
    pub(crate) fn record_write(&mut self) -> bool {
        self.writes_since_check += 1;
        if self.writes_since_check >= self.check_interval {
            self.writes_since_check = 0;
            true
        } else {
            false
        }
    }

    pub(crate) fn reset(&mut self) {
        self.writes_since_check = 0;
    }
}
