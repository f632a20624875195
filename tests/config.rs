//! Integration tests for reading configuration from the environment.

use std::collections::HashMap;
use tournament_engine::{EngineConfig, ServerConfig, DEFAULT_MAX_PARALLEL_GAMES};

fn config_from(vars: &[(&str, &str)]) -> ServerConfig {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ServerConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn missing_variables_use_defaults() {
    let config = config_from(&[]);
    assert_eq!(config, ServerConfig::default());
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 8080);
    assert_eq!(config.engine.max_parallel_games, DEFAULT_MAX_PARALLEL_GAMES);
}

#[test]
fn variables_override_defaults() {
    let config = config_from(&[
        ("HOST", " 127.0.0.1 "),
        ("PORT", "3000"),
        ("MAX_PARALLEL_GAMES", "4"),
    ]);
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 3000);
    assert_eq!(config.engine, EngineConfig::with_max_parallel_games(4));
}

#[test]
fn unparsable_values_fall_back() {
    let config = config_from(&[("HOST", "  "), ("PORT", "eighty"), ("MAX_PARALLEL_GAMES", "-1")]);
    assert_eq!(config, ServerConfig::default());
}

#[test]
fn zero_parallel_games_means_one() {
    let config = config_from(&[("MAX_PARALLEL_GAMES", "0")]);
    assert_eq!(config.engine.max_parallel_games, 1);
    assert_eq!(EngineConfig::with_max_parallel_games(0).max_parallel_games, 1);
}
