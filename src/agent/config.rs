// Agent configuration

use super::AgentConfig;
use tracing::warn;

/// Parse an environment variable, logging a warning if the value is present but invalid.
fn parse_env_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(v) => match v.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(var = name, value = %v, "Invalid env var value, using default");
                default
            }
        },
        Err(_) => default,
    }
}

impl AgentConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = AgentConfig::default();

        config.history_window = parse_env_var("AGENT_HISTORY_WINDOW", config.history_window);
        if config.history_window == 0 {
            warn!("AGENT_HISTORY_WINDOW must be positive, using default");
            config.history_window = AgentConfig::default().history_window;
        }
        config.greeting = parse_env_var("AGENT_GREETING", config.greeting);

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_var_falls_back() {
        assert_eq!(parse_env_var("PUCKY_TEST_UNSET_VARIABLE", 18usize), 18);
        assert!(parse_env_var("PUCKY_TEST_UNSET_FLAG", true));
    }
}
