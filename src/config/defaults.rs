// Default configuration: no proxy, no region hints, nothing forced

use super::types::{Config, OutputFormat};

impl Default for Config {
    fn default() -> Self {
        Config {
            proxy_url: None,
            license_key: None,
            regions: Vec::new(),
            forced_tasks: Vec::new(),
            output: OutputFormat::Text,
        }
    }
}
