// example_worker — единственный поток-владелец логгера, остальные шлют ему сообщения

use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use twinlog::{default_levels, DefaultLevel, FormatFlags, Logger, LoggerConfig};

const APP_NAME: &str = "example_worker";

type Record = (DefaultLevel, String);

// Структура, моделирующая "класс" потока
pub struct Worker {
    id: u32,
    log: mpsc::Sender<Record>,
}

impl Worker {
    pub fn new(id: u32, log: mpsc::Sender<Record>) -> Self {
        Self { id, log }
    }

    fn send(&self, level: DefaultLevel, msg: String) {
        let _ = self.log.send((level, msg));
    }

    pub fn run(&self) {
        self.send(DefaultLevel::Debug, format!("Worker {} started execution", self.id));

        thread::sleep(Duration::from_millis(50 + (self.id as u64) * 100));

        if self.id % 2 == 1 {
            self.send(DefaultLevel::Warning, format!("Worker {} detected odd workload", self.id));
        }
        if self.id == 2 {
            self.send(
                DefaultLevel::Error,
                format!("Worker {} encountered a transient error", self.id),
            );
        }

        self.send(DefaultLevel::Debug, format!("Worker {} finished", self.id));
    }
}

fn main() {
    let config = LoggerConfig::new(
        APP_NAME,
        "logs/worker.log",
        default_levels(),
        DefaultLevel::Debug,
        FormatFlags::DEFAULT,
        10,
        1024 * 1024,
    );
    let mut logger = match Logger::new(config) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("[FATAL] Failed to create log file: {}", e);
            std::process::exit(1);
        }
    };

    let (tx, rx) = mpsc::channel::<Record>();

    // Поток-писатель владеет логгером целиком
    let writer = thread::spawn(move || {
        for (level, msg) in rx {
            if let Err(e) = logger.emit(level, &msg) {
                eprintln!("[WARN] {}", e);
            }
        }
        logger.shutdown()
    });

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let worker = Worker::new(i, tx.clone());
            thread::spawn(move || worker.run())
        })
        .collect();

    for h in handles {
        let _ = h.join();
    }
    drop(tx);

    match writer.join() {
        Ok(Ok(())) => {}
        Ok(Err(e)) => eprintln!("[WARN] {}", e),
        Err(_) => eprintln!("[FATAL] log writer panicked"),
    }
}
