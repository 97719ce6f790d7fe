//! Platform abstraction layer
//!
//! The session never probes for browser APIs. It is handed a `Host` at
//! construction time:
//! - `web::BrowserHost`: LocalStorage and Blob downloads (wasm32)
//! - `ConsoleHost`: native fallback, storage is a no-op and CSV goes to stdout
//! - `MemoryHost`: records every call, for tests and headless runs

#[cfg(target_arch = "wasm32")]
pub mod web;

use std::collections::HashMap;

use chrono::{DateTime, Local};

/// Capabilities the game borrows from its environment
pub trait Host {
    /// Current local wall-clock time
    fn now(&self) -> DateTime<Local>;

    /// Overwrite a single key-value slot
    fn store(&mut self, key: &str, value: &str) -> anyhow::Result<()>;

    /// Hand a text file to the user
    fn download(&mut self, filename: &str, mime: &str, contents: &str) -> anyhow::Result<()>;
}

/// Run `work`, then `release` whatever happened. An error from `work` wins
/// over one from `release`.
pub fn with_release<T>(
    work: impl FnOnce() -> anyhow::Result<T>,
    release: impl FnOnce() -> anyhow::Result<()>,
) -> anyhow::Result<T> {
    let result = work();
    let released = release();
    let value = result?;
    released?;
    Ok(value)
}

/// Native fallback when no browser is around
#[derive(Debug, Default)]
pub struct ConsoleHost;

impl Host for ConsoleHost {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn store(&mut self, _key: &str, _value: &str) -> anyhow::Result<()> {
        // No-op for native
        Ok(())
    }

    fn download(&mut self, filename: &str, _mime: &str, contents: &str) -> anyhow::Result<()> {
        log::info!("Printing {} to stdout", filename);
        print!("CSV:\n{}", contents);
        Ok(())
    }
}

/// In-memory host that remembers what it was asked to do
#[derive(Debug)]
pub struct MemoryHost {
    pub clock: DateTime<Local>,
    pub storage: HashMap<String, String>,
    /// Number of `store` calls, successful or not
    pub store_calls: usize,
    /// (filename, contents) per download
    pub downloads: Vec<(String, String)>,
    /// Make every capability call fail, as an unavailable host would
    pub unavailable: bool,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new(Local::now())
    }
}

impl MemoryHost {
    pub fn new(clock: DateTime<Local>) -> Self {
        Self {
            clock,
            storage: HashMap::new(),
            store_calls: 0,
            downloads: Vec::new(),
            unavailable: false,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.storage.get(key).map(String::as_str)
    }
}

impl Host for MemoryHost {
    fn now(&self) -> DateTime<Local> {
        self.clock
    }

    fn store(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        self.store_calls += 1;
        if self.unavailable {
            anyhow::bail!("storage unavailable");
        }
        self.storage.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn download(&mut self, filename: &str, _mime: &str, contents: &str) -> anyhow::Result<()> {
        if self.unavailable {
            anyhow::bail!("download unavailable");
        }
        self.downloads.push((filename.to_string(), contents.to_string()));
        Ok(())
    }
}
