//! Runtime configuration read from the environment.
//!
//! `HOST` (default 0.0.0.0), `PORT` (default 8080) and `MAX_PARALLEL_GAMES` (default 2).
//! Values that fail to parse fall back to their defaults.

use crate::logic::DEFAULT_MAX_PARALLEL_GAMES;

/// Settings that shape generated match plans.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EngineConfig {
    /// Maximum matches per round. Never zero.
    pub max_parallel_games: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_parallel_games: DEFAULT_MAX_PARALLEL_GAMES,
        }
    }
}

impl EngineConfig {
    pub fn with_max_parallel_games(max_parallel_games: usize) -> Self {
        Self {
            max_parallel_games: max_parallel_games.max(1),
        }
    }
}

/// Web server settings.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub engine: EngineConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            engine: EngineConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment, or a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST")
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(default_host);
        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or_else(default_port);
        let engine = lookup("MAX_PARALLEL_GAMES")
            .and_then(|n| n.trim().parse::<usize>().ok())
            .map(EngineConfig::with_max_parallel_games)
            .unwrap_or_default();
        Self { host, port, engine }
    }
}
