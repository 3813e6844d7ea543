//! Command-injection fixture: `/ping`, `/backup`, `/convert`, `/list`

use sink_fixtures::config::DEFAULT_CONFIG_NAME;
use sink_fixtures::handler::Fixture;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_NAME.to_string());
    sink_fixtures::run(Fixture::Command, &config_path)
}
