// example_tokio — асинхронный пример с tokio и глобальным реестром
// Логгер берётся по имени из реестра; блокировка держится только на время записи

use tokio::task;
use tokio::time::{sleep, Duration};
use twinlog::{
    default_levels, gdebug, gerror, global, gwarning, DefaultLevel, FormatFlags, LoggerConfig,
};

const APP_NAME: &str = "example_tokio";
const APP_VERSION: &str = "1.0.0";

// Асинхронный "воркер"
pub struct Worker {
    id: u32,
}

impl Worker {
    pub fn new(id: u32) -> Self {
        Self { id }
    }

    pub async fn run(&self) -> twinlog::Result<()> {
        gdebug!(APP_NAME, "Worker {} started (async)", self.id)?;

        // Имитация асинхронной работы
        sleep(Duration::from_millis(50 + (self.id as u64) * 100)).await;

        if self.id % 3 == 0 {
            gwarning!(APP_NAME, "Worker {} has high priority task", self.id)?;
        }
        if self.id == 2 {
            gerror!(APP_NAME, "Worker {} failed to process data", self.id)?;
        }

        gdebug!(APP_NAME, "Worker {} completed", self.id)
    }
}

#[tokio::main]
async fn main() {
    let config = LoggerConfig::new(
        APP_NAME,
        "logs/tokio.log",
        default_levels(),
        DefaultLevel::Debug,
        FormatFlags::DEFAULT,
        10,
        1024 * 1024,
    );
    if let Err(e) = global::register(config) {
        eprintln!("[FATAL] Failed to open log file: {}", e);
        std::process::exit(1);
    }

    let _ = gdebug!(APP_NAME, "Starting {} v{}, spawning async tasks...", APP_NAME, APP_VERSION);

    let mut handles = vec![];
    for i in 0..5 {
        handles.push(task::spawn(async move { Worker::new(i).run().await }));
    }

    // Ждём завершения всех задач
    for h in handles {
        if let Ok(Err(e)) = h.await {
            eprintln!("[WARN] {}", e);
        }
    }

    let _ = gdebug!(APP_NAME, "All async tasks completed");

    if let Err(e) = global::shutdown_all() {
        eprintln!("[WARN] {}", e);
    }
}
