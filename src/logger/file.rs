/// File persistence for log output
///
/// Console output stays colored; the file copy gets the plain line. The file
/// handle is opened once at init and appended for the rest of the session.
use crate::arguments::get_arg_value;
use chrono::Local;
use once_cell::sync::Lazy;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;

static LOG_FILE: Lazy<Mutex<Option<File>>> = Lazy::new(|| Mutex::new(None));

/// Open the session log file under logs/ (or --log-dir)
pub fn init_file_logging() {
    let dir = get_arg_value("--log-dir").unwrap_or_else(|| "logs".to_string());
    if fs::create_dir_all(&dir).is_err() {
        return;
    }

    let filename = format!("{}/solsweep_{}.log", dir, Local::now().format("%Y-%m-%d"));
    if let Ok(file) = OpenOptions::new().create(true).append(true).open(&filename) {
        if let Ok(mut guard) = LOG_FILE.lock() {
            *guard = Some(file);
        }
    }
}

/// Append one plain (uncolored) line to the session log file
pub fn write_to_file(line: &str) {
    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(file) = guard.as_mut() {
            let _ = writeln!(file, "{}", line);
        }
    }
}

/// Flush pending writes, used during shutdown
pub fn flush_file_logging() {
    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(file) = guard.as_mut() {
            let _ = file.flush();
        }
    }
}
