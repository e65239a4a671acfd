use clap::Parser;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Chatroom relay server
#[derive(Parser, Serialize, Deserialize, Clone, Debug)]
#[command(name = "chatroom-server", version, about = "Single-room chat relay server")]
pub struct Config {
    /// Port to listen on
    #[arg(long, env = "CHATROOM_PORT", default_value = "4500")]
    pub port: u16,

    /// Bind address
    #[arg(long, env = "CHATROOM_BIND_ADDRESS", default_value = "0.0.0.0")]
    pub bind_address: String,

    /// Browser origin allowed by CORS
    #[arg(
        long,
        env = "CHATROOM_ALLOWED_ORIGIN",
        default_value = "http://localhost:5173"
    )]
    pub allowed_origin: String,

    /// Path to TOML config file
    #[arg(long, default_value = "./chatroom.toml")]
    pub config: String,

    /// Enable structured JSON logging (for Docker/production)
    #[arg(long, env = "CHATROOM_JSON_LOGS")]
    pub json_logs: bool,

    /// Output a commented TOML config template and exit
    #[arg(long)]
    pub generate_config: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 4500,
            bind_address: "0.0.0.0".to_string(),
            allowed_origin: "http://localhost:5173".to_string(),
            config: "./chatroom.toml".to_string(),
            json_logs: false,
            generate_config: false,
        }
    }
}

impl Config {
    /// Load config with layered precedence:
    /// built-in defaults < TOML file < env vars (CHATROOM_*) < CLI args
    pub fn load() -> Result<Self, figment::Error> {
        let cli = Config::parse();
        let config_path = cli.config.clone();

        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_path))
            .merge(Env::prefixed("CHATROOM_"))
            .merge(Serialized::defaults(cli))
            .extract()
    }
}

/// Generate a commented TOML config template
pub fn generate_config_template() -> String {
    r#"# Chatroom Relay Server Configuration
# Place this file at ./chatroom.toml or specify with --config <path>
# All settings can be overridden via environment variables (CHATROOM_PORT, etc.)
# or CLI flags (--port, etc.)

# Server port (default: 4500)
# port = 4500

# Bind address (default: 0.0.0.0 — all interfaces)
# bind_address = "0.0.0.0"

# Browser origin allowed by CORS (default: the local Vite dev server)
# allowed_origin = "http://localhost:5173"

# Enable structured JSON logging for Docker/production
# json_logs = false
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_contract() {
        let config = Config::default();
        assert_eq!(config.port, 4500);
        assert_eq!(config.allowed_origin, "http://localhost:5173");
        assert_eq!(config.bind_address, "0.0.0.0");
    }

    #[test]
    fn template_is_fully_commented() {
        // The template must be a valid no-op TOML file out of the box.
        for line in generate_config_template().lines() {
            let trimmed = line.trim();
            assert!(
                trimmed.is_empty() || trimmed.starts_with('#'),
                "uncommented template line: {line}"
            );
        }
    }
}
