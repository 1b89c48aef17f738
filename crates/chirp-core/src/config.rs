use anyhow::{Context, Result};

pub const DEFAULT_IMAGE_URL: &str = "/static/images/default-pic.png";
pub const DEFAULT_HEADER_IMAGE_URL: &str = "/static/images/warbler-hero.jpg";

#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Upper bound on message length, in characters.
    pub message_max_len: usize,
    /// Cap on home feed and author listing pages.
    pub feed_limit: u32,
    pub default_image_url: String,
    pub default_header_image_url: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            message_max_len: 140,
            feed_limit: 100,
            default_image_url: DEFAULT_IMAGE_URL.into(),
            default_header_image_url: DEFAULT_HEADER_IMAGE_URL.into(),
        }
    }
}

impl CoreConfig {
    /// Defaults overridden by `CHIRP_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup("CHIRP_MESSAGE_MAX_LEN") {
            config.message_max_len = raw
                .parse()
                .with_context(|| format!("CHIRP_MESSAGE_MAX_LEN is not a number: {raw}"))?;
        }
        if let Some(raw) = lookup("CHIRP_FEED_LIMIT") {
            config.feed_limit = raw
                .parse()
                .with_context(|| format!("CHIRP_FEED_LIMIT is not a number: {raw}"))?;
        }
        if let Some(url) = lookup("CHIRP_DEFAULT_IMAGE_URL") {
            config.default_image_url = url;
        }
        if let Some(url) = lookup("CHIRP_DEFAULT_HEADER_IMAGE_URL") {
            config.default_header_image_url = url;
        }

        anyhow::ensure!(config.message_max_len > 0, "CHIRP_MESSAGE_MAX_LEN must be positive");
        anyhow::ensure!(config.feed_limit > 0, "CHIRP_FEED_LIMIT must be positive");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = CoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.message_max_len, 140);
        assert_eq!(config.feed_limit, 100);
        assert_eq!(config.default_image_url, DEFAULT_IMAGE_URL);
    }

    #[test]
    fn overrides_apply() {
        let config = CoreConfig::from_lookup(lookup(&[
            ("CHIRP_MESSAGE_MAX_LEN", "280"),
            ("CHIRP_DEFAULT_HEADER_IMAGE_URL", "/hero.png"),
        ]))
        .unwrap();
        assert_eq!(config.message_max_len, 280);
        assert_eq!(config.default_header_image_url, "/hero.png");
    }

    #[test]
    fn bad_numbers_are_rejected() {
        assert!(CoreConfig::from_lookup(lookup(&[("CHIRP_FEED_LIMIT", "lots")])).is_err());
        assert!(CoreConfig::from_lookup(lookup(&[("CHIRP_FEED_LIMIT", "0")])).is_err());
    }
}
