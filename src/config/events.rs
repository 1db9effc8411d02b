//! Event fan-out configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Live update configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EventsConfig {
    /// Pubsub channel carrying to-do event frames
    #[serde(default = "default_channel")]
    pub channel: String,

    /// Per-subscriber event buffer capacity
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,
}

impl EventsConfig {
    /// Validate events configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.channel.trim().is_empty() {
            return Err(ValidationError::MissingRequired("EVENTS_CHANNEL"));
        }
        if self.buffer_capacity == 0 {
            return Err(ValidationError::InvalidBufferCapacity);
        }
        Ok(())
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            channel: default_channel(),
            buffer_capacity: default_buffer_capacity(),
        }
    }
}

fn default_channel() -> String {
    "todo_events".to_string()
}

fn default_buffer_capacity() -> usize {
    128
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_config_defaults() {
        let config = EventsConfig::default();
        assert_eq!(config.channel, "todo_events");
        assert_eq!(config.buffer_capacity, 128);
    }

    #[test]
    fn test_validation_blank_channel() {
        let config = EventsConfig {
            channel: "   ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_capacity() {
        let config = EventsConfig {
            buffer_capacity: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(EventsConfig::default().validate().is_ok());
    }
}
