//! Logger module
//!
//! Server lifecycle logging, per-request access logging, and error/warning
//! logging, to stdout/stderr or files.

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;

/// Initialize the logger from configuration. Call once at startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.access_log_file.as_deref(),
        config.error_log_file.as_deref(),
    )
}

fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_server_start(config: &Config, files_loaded: usize, aliases_loaded: usize) {
    write_info(&format!("Start server: {}", config.host));
    write_info(&format!("Loaded {files_loaded} files from {}", config.site));
    if aliases_loaded > 0 {
        write_info(&format!("Loaded {aliases_loaded} aliases"));
    }
    if config.tls_enabled() {
        write_info("TLS enabled, redirecting port 80 to https");
    }
}

pub fn log_access(entry: &AccessLogEntry, format: &str) {
    match writer::get() {
        Some(w) => w.write_access(&entry.format(format)),
        None => println!("{}", entry.format(format)),
    }
}

pub fn log_redirect(target: &str) {
    write_info(&format!("redirect to: {target}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}
