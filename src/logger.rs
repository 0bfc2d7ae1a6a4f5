//! Logger module
//!
//! Function-per-event logging for the server: startup banner, access lines
//! in Common Log Format timestamps, warnings and errors to stderr.

use std::net::SocketAddr;
use std::path::Path;

use chrono::Local;
use hyper::{Method, Uri, Version};

use crate::config::Config;

fn timestamp() -> String {
    Local::now().format("%d/%b/%Y:%H:%M:%S %z").to_string()
}

pub fn log_server_start(addr: &SocketAddr, root: &Path, config: &Config) {
    println!("======================================");
    println!("nocase-server started");
    println!("Listening on: http://{addr}");
    println!("Document root: {}", root.display());
    println!("Log level: {}", config.logging.level);
    println!(
        "SPA fallback: {}",
        if config.serving.spa_fallback { "on" } else { "off" }
    );
    if config.cache.capacity == 0 {
        println!("Resolution cache: disabled");
    } else {
        println!("Resolution cache: {} entries", config.cache.capacity);
    }
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("======================================\n");
}

pub fn log_request(method: &Method, uri: &Uri, version: Version) {
    println!("[{}] \"{method} {uri} {version:?}\"", timestamp());
}

pub fn log_response(status: u16, bytes: u64) {
    println!("[{}] -> {status} ({bytes} bytes)", timestamp());
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}
