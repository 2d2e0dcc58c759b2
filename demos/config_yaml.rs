//! Example of loading logger configuration from YAML.
//!
//! Run with:
//! ```bash
//! cargo run --example config_yaml
//! ```

use attrlog::{LogBuilder, LogConfig};

const CONFIG: &str = r#"
level: debug
format: text
simple_source: true
attrs:
  service: config-demo
  region: eu-west-1
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config: LogConfig = serde_yaml::from_str(CONFIG)?;

    LogBuilder::from_config(&config)?.init();

    attrlog::debug!("This is a debug message");
    attrlog::info!("This is an info message");

    tracing::info!(user = "alice", action = "login", "User performed an action");
    tracing::warn!(error_code = 404, path = "/api/users", "Resource not found");

    Ok(())
}
