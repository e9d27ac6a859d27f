// Process-wide `log` sink. Lines land in a capped `History` shown by the Logs
// window; warnings and errors are also appended to cocktail_finder.log.
// `COCKTAIL_LOG_STDERR=1` echoes every line to stderr.

use lazy_static::lazy_static;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::str::FromStr;
use std::sync::Mutex;
use std::time::{Duration, Instant};

const HISTORY_CAP: usize = 5000;
const LOG_FILE_NAME: &str = "cocktail_finder.log";
const CRATE_PREFIX: &str = "cocktail_finder::";

#[derive(Debug, Clone)]
pub struct Line {
    pub level: Level,
    /// Module path below the crate root, e.g. `app::controllers`.
    pub module: String,
    pub text: String,
    /// Time since the logger was installed.
    pub at: Duration,
}

impl Line {
    pub fn render(&self) -> String {
        format!(
            "{:>9.3}s {:<5} {:<18} {}",
            self.at.as_secs_f64(),
            self.level,
            self.module,
            self.text
        )
    }
}

fn module_of(target: &str) -> String {
    match target.strip_prefix(CRATE_PREFIX) {
        Some(rest) => rest.to_string(),
        None if target == "cocktail_finder" => "main".to_string(),
        None => target.to_string(),
    }
}

/// Bounded line store. `revision` changes on every push or clear so the UI can
/// tell whether it needs a repaint.
pub struct History {
    lines: VecDeque<Line>,
    cap: usize,
    revision: u64,
}

impl History {
    pub fn new(cap: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(cap.min(1024)),
            cap: cap.max(1),
            revision: 0,
        }
    }

    pub fn push(&mut self, line: Line) {
        if self.lines.len() == self.cap {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
        self.revision += 1;
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.revision += 1;
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Lines at or above `min`, oldest first.
    pub fn filtered(&self, min: LevelFilter) -> Vec<Line> {
        self.lines.iter().filter(|l| l.level <= min).cloned().collect()
    }
}

struct Sink {
    started: Instant,
    echo: bool,
    file: Mutex<Option<File>>,
}

impl Sink {
    fn append_to_file(&self, rendered: &str) {
        if let Ok(mut guard) = self.file.lock() {
            if let Some(file) = guard.as_mut() {
                let _ = writeln!(file, "{rendered}");
            }
        }
    }
}

lazy_static! {
    static ref HISTORY: Mutex<History> = Mutex::new(History::new(HISTORY_CAP));
    static ref SINK: Sink = Sink {
        started: Instant::now(),
        echo: std::env::var("COCKTAIL_LOG_STDERR")
            .map(|v| matches!(v.trim(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false),
        file: Mutex::new(None),
    };
}

struct AppLogger;

impl Log for AppLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Line {
            level: record.level(),
            module: module_of(record.target()),
            text: record.args().to_string(),
            at: SINK.started.elapsed(),
        };
        let rendered = line.render();
        if SINK.echo {
            eprintln!("{rendered}");
        }
        if line.level <= Level::Warn {
            SINK.append_to_file(&rendered);
        }
        if let Ok(mut history) = HISTORY.lock() {
            history.push(line);
        }
    }

    fn flush(&self) {
        if let Ok(mut guard) = SINK.file.lock() {
            if let Some(file) = guard.as_mut() {
                let _ = file.flush();
            }
        }
    }
}

/// `RUST_LOG` in env_logger form: comma separated `level` or `target=level`
/// directives. The most verbose directive decides, since all lines share one buffer.
fn level_from_directives(value: &str) -> Option<LevelFilter> {
    value
        .split(',')
        .filter_map(|d| {
            let level = d.rsplit('=').next()?.trim();
            LevelFilter::from_str(level).ok()
        })
        .max()
}

pub fn init() {
    if log::set_logger(&AppLogger).is_err() {
        return;
    }
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|v| level_from_directives(&v))
        .unwrap_or(LevelFilter::Debug);
    log::set_max_level(level);

    match OpenOptions::new().create(true).append(true).open(LOG_FILE_NAME) {
        Ok(file) => {
            if let Ok(mut guard) = SINK.file.lock() {
                *guard = Some(file);
            }
        }
        Err(e) => log::warn!("cannot open {LOG_FILE_NAME}: {e}"),
    }

    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let what = info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| info.payload().downcast_ref::<String>().map(String::as_str))
            .unwrap_or("non-string payload");
        let place = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_default();
        log::error!(
            "panic at {place}: {what}\n{}",
            std::backtrace::Backtrace::force_capture()
        );
        log::logger().flush();
        previous(info);
    }));

    log::info!("logging at {level}, warnings go to {LOG_FILE_NAME}");
}

pub fn revision() -> u64 {
    HISTORY.lock().map(|h| h.revision()).unwrap_or(0)
}

pub fn snapshot(min: LevelFilter) -> Vec<Line> {
    HISTORY.lock().map(|h| h.filtered(min)).unwrap_or_default()
}

pub fn clear() {
    if let Ok(mut history) = HISTORY.lock() {
        history.clear();
    }
}
