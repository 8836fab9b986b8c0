use anyhow::Context;
use hide_config::HideConfig;

/// Load layered configuration, reading `.env` from the working directory first.
pub fn load_config() -> anyhow::Result<HideConfig> {
    HideConfig::load_with_dotenv().context("failed to load hidemeter configuration")
}
