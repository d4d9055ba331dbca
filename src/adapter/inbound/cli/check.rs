//! Handler for the `check` command.

use crate::adapter::inbound::cli::command::CheckArgs;
use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::provider::ProviderKind;
use crate::infrastructure::config::settings::{Config, DEFAULT_CONFIG_PATH};

/// Validate configuration without starting the monitor.
#[allow(clippy::result_large_err)]
pub fn execute(args: &CheckArgs) -> Result<()> {
    let config = Config::load_or_default(args.config.as_deref())?;
    let source = args
        .config
        .as_ref()
        .map_or_else(|| DEFAULT_CONFIG_PATH.to_string(), |p| p.display().to_string());

    output::section("Configuration Check");
    output::field("Config", source);
    output::success("Configuration is valid");

    output::section("Monitor");
    output::field("Interval", format!("{} min", config.monitor.interval_minutes));
    output::field("Threshold", config.monitor.price_threshold);
    output::field("Timezone", &config.monitor.timezone);
    output::field("Provider", config.provider.kind);
    output::field("Listen", &config.server.listen_address);

    if config.provider.kind == ProviderKind::Amadeus {
        output::success("Amadeus credentials detected");
    }

    if config.notifier.telegram.enabled {
        let token = std::env::var("TELEGRAM_BOT_TOKEN").is_ok();
        let chat = std::env::var("TELEGRAM_CHAT_ID").is_ok();
        if token && chat {
            output::success("Telegram integration configured");
        } else {
            output::warning("Telegram enabled but environment variables are missing");
        }
    } else {
        output::field("Telegram", "disabled");
    }

    output::section("Windows");
    for window in &config.windows {
        output::field(
            window.key().as_str(),
            format!(
                "{} via {}",
                window.route(),
                window
                    .preferred_stop
                    .as_deref()
                    .unwrap_or(&config.monitor.default_preferred_stop)
            ),
        );
    }

    output::success("Configuration check complete");
    Ok(())
}
