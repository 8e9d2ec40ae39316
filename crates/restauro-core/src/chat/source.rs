//! Where answers come from.

use futures::stream::BoxStream;
use log::info;

use super::{ChatRequest, GeminiClient, LocalResponder};
use crate::config::Config;
use crate::error::Result;

/// Ordered text increments of one answer. An `Err` item ends the answer.
pub type ReplyStream = BoxStream<'static, Result<String>>;

/// Something that can answer a chat turn.
pub trait ResponseSource: Send + Sync {
    /// Short name for logs and the UI
    fn label(&self) -> &str;

    /// Starts answering `request`.
    fn respond(&self, request: ChatRequest) -> ReplyStream;
}

/// Picks the remote model when credentials are configured, otherwise the
/// offline guide.
pub fn source_for(config: &Config) -> Box<dyn ResponseSource> {
    match config.api_key() {
        Some(key) if !config.offline => {
            info!(
                "Using remote assistant model '{}' (streaming: {})",
                config.model, config.stream
            );
            Box::new(GeminiClient::new(key, &config.model).with_streaming(config.stream))
        }
        _ => {
            info!("Using offline assistant");
            Box::new(LocalResponder::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_selects_offline() {
        let config = Config::default();
        assert_eq!(source_for(&config).label(), "offline guide");
    }

    #[test]
    fn test_key_selects_remote() {
        let config = Config {
            api_key: Some("secret".to_string()),
            ..Config::default()
        };
        assert!(source_for(&config).label().starts_with("gemini"));
    }

    #[test]
    fn test_offline_flag_wins_over_key() {
        let config = Config {
            api_key: Some("secret".to_string()),
            offline: true,
            ..Config::default()
        };
        assert_eq!(source_for(&config).label(), "offline guide");
    }
}
