//! Server configuration from environment variables

use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::{RelationError, RelationResult};
use crate::validation::KnownHostKinds;

/// Data directory holding the JSONL files
pub const DATA_DIR_VAR: &str = "ENTITIES_DATA_DIR";

/// Listen address of the HTTP server
pub const HTTP_ADDR_VAR: &str = "ENTITIES_HTTP_ADDR";

/// Comma separated `component:area` list of accepted host kinds
pub const HOST_KINDS_VAR: &str = "ENTITIES_HOST_KINDS";

pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:3030";

/// Runtime configuration for the server binary
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the data directory
    pub data_dir: PathBuf,
    pub http_addr: SocketAddr,
    pub host_kinds: KnownHostKinds,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            http_addr: SocketAddr::from(([127, 0, 0, 1], 3030)),
            host_kinds: KnownHostKinds::default(),
        }
    }
}

impl Config {
    /// Read the configuration from the process environment
    pub fn from_env() -> RelationResult<Self> {
        let current_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::from_lookup(&current_dir, |name| env::var(name).ok())
    }

    /// Build the configuration from any variable source.
    ///
    /// Relative data directories are resolved against `current_dir`.
    pub fn from_lookup<F>(current_dir: &Path, lookup: F) -> RelationResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = match lookup(DATA_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            Some(dir) if Path::new(&dir).is_absolute() => PathBuf::from(dir),
            Some(dir) => current_dir.join(dir),
            None => current_dir.join("data"),
        };

        let addr = lookup(HTTP_ADDR_VAR).unwrap_or_else(|| DEFAULT_HTTP_ADDR.to_string());
        let http_addr = addr.trim().parse::<SocketAddr>().map_err(|_| {
            RelationError::InvalidArgument(format!("{} '{}' is not a socket address", HTTP_ADDR_VAR, addr))
        })?;

        let host_kinds = match lookup(HOST_KINDS_VAR) {
            Some(list) => list.parse::<KnownHostKinds>()?,
            None => KnownHostKinds::default(),
        };

        Ok(Self {
            data_dir,
            http_addr,
            host_kinds,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get path to relations.jsonl
    pub fn relations_path(&self) -> PathBuf {
        self.data_dir.join("relations.jsonl")
    }

    /// Get path to entities.jsonl
    pub fn entities_path(&self) -> PathBuf {
        self.data_dir.join("entities.jsonl")
    }

    /// Get path to hosts.jsonl
    pub fn hosts_path(&self) -> PathBuf {
        self.data_dir.join("hosts.jsonl")
    }
}
