use dotenv::dotenv;
use std::{env::var, path::PathBuf};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub root: PathBuf,
    pub listing_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            root: PathBuf::from("."),
            listing_prefix: "/papers".into(),
        }
    }
}

impl Config {
    pub fn get() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();

        Self {
            port: lookup("CFS_PORT")
                .and_then(|port| port.trim().parse::<u16>().ok())
                .unwrap_or(default.port),
            root: lookup("CFS_ROOT")
                .map(|root| root.trim().to_string())
                .filter(|root| !root.is_empty())
                .map_or(default.root, PathBuf::from),
            listing_prefix: lookup("CFS_LISTING_PREFIX")
                .map(|listing_prefix| listing_prefix.trim().to_string())
                .filter(|listing_prefix| !listing_prefix.is_empty())
                .map_or(default.listing_prefix, |listing_prefix| {
                    format!("/{}", listing_prefix.trim_matches('/'))
                }),
        }
    }
}
