use std::{str::FromStr, time::Duration};

use anyhow::{ensure, Context};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
    /// How often the sweep looks for inactive participants.
    pub sweep_period: Duration,
    /// How long a participant may stay silent before being evicted.
    pub inactivity: Duration,
}

impl Config {
    /// Reads `.env` (if any) and then the process environment.
    pub fn from_env() -> anyhow::Result<Config> {
        let database_url = dotenv::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://batepapo.db".to_owned());
        let bind_addr = dotenv::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_owned());

        let db_max_connections = parse_or("DB_MAX_CONNECTIONS", dotenv::var("DB_MAX_CONNECTIONS").ok(), 16)?;
        let sweep_secs = parse_or("SWEEP_PERIOD_SECS", dotenv::var("SWEEP_PERIOD_SECS").ok(), 15)?;
        let inactivity_secs = parse_or("INACTIVITY_SECS", dotenv::var("INACTIVITY_SECS").ok(), 10)?;

        ensure!(db_max_connections > 0, "DB_MAX_CONNECTIONS must be positive");
        ensure!(sweep_secs > 0, "SWEEP_PERIOD_SECS must be positive");

        Ok(Config {
            database_url,
            bind_addr,
            db_max_connections,
            sweep_period: Duration::from_secs(sweep_secs),
            inactivity: Duration::from_secs(inactivity_secs),
        })
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a number, got {raw:?}")),
        None => Ok(default),
    }
}
