use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

// ===== Запасной поток =====

/// Поток, в который пишут логгеры без файла или с неоткрывшимся файлом.
/// Клоны разделяют один и тот же поток.
#[derive(Clone)]
pub struct SharedStream {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl SharedStream {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        SharedStream {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    pub fn stdout() -> Self {
        SharedStream::new(io::stdout())
    }

    /// Буфер в памяти и поток, пишущий в него. Удобно для тестов.
    pub fn buffer() -> (Self, MemoryBuffer) {
        let buffer = MemoryBuffer::default();
        (SharedStream::new(buffer.clone()), buffer)
    }

    fn write_all(&self, bytes: &[u8]) -> io::Result<()> {
        // отравленный мьютекс не должен глушить логгирование
        let mut writer = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        writer.write_all(bytes)?;
        writer.flush()
    }
}

impl Default for SharedStream {
    fn default() -> Self {
        SharedStream::stdout()
    }
}

impl fmt::Debug for SharedStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedStream")
    }
}

#[derive(Clone, Default, Debug)]
pub struct MemoryBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl MemoryBuffer {
    pub fn contents(&self) -> String {
        let bytes = self.bytes.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    pub fn clear(&self) {
        self.bytes.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

impl Write for MemoryBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ===== Цель вывода =====

#[derive(Debug)]
pub(crate) enum Target {
    File { path: PathBuf, file: File },
    Stream(SharedStream),
}

impl Target {
    pub(crate) fn open(path: &Path) -> io::Result<Target> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Target::File {
            path: path.to_path_buf(),
            file,
        })
    }

    pub(crate) fn write_line(&mut self, line: &str) -> io::Result<()> {
        match self {
            Target::File { file, .. } => {
                file.write_all(line.as_bytes())?;
                file.flush()
            }
            Target::Stream(stream) => stream.write_all(line.as_bytes()),
        }
    }

    pub(crate) fn is_file(&self) -> bool {
        matches!(self, Target::File { .. })
    }

    /// Сбрасывает и закрывает файл. Для потока ничего не закрывается.
    pub(crate) fn close(self) -> Result<(), (PathBuf, io::Error)> {
        match self {
            Target::File { path, mut file } => {
                let res = file.flush().and_then(|_| file.sync_all());
                drop(file);
                res.map_err(|e| (path, e))
            }
            Target::Stream(_) => Ok(()),
        }
    }
}
