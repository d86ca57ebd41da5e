use std::{env, fmt::Display, num::NonZeroU32, str::FromStr};

use tracing::{info, warn};

pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub db_pool_size: NonZeroU32,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn load() -> Self {
        Self {
            database_url: try_load("DATABASE_URL", "market.db"),
            bind_addr: try_load("BIND_ADDR", "0.0.0.0:2811"),
            db_pool_size: try_load("DB_POOL_SIZE", "8"),
            max_upload_bytes: try_load("MAX_UPLOAD_BYTES", "5242880"),
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    parse_or_default(key, env::var(key).ok().as_deref(), default)
}

fn parse_or_default<T: FromStr>(key: &str, raw: Option<&str>, default: &str) -> T
where
    T::Err: Display,
{
    let raw = raw.unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default
    });

    match raw.parse() {
        Ok(value) => value,
        Err(e) => {
            warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
                .parse()
                .unwrap_or_else(|_| panic!("default for {key} must parse"))
        }
    }
}
