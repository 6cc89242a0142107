use backend::config::StudioConfig;
use backend::veo::{DEFAULT_MODEL, GEMINI_API_BASE, PollPolicy};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(about = "Lumiere Studio - character-consistent video generation with Veo")]
pub struct Cli {
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
    #[arg(long, default_value = "dist")]
    pub dist_dir: PathBuf,
    /// Gemini API key to start the session with
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
    #[arg(long, default_value = GEMINI_API_BASE)]
    pub api_base: String,
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,
    #[arg(long, default_value_t = 5)]
    pub poll_interval_secs: u64,
    /// Give up on a generation after this many seconds (default: never)
    #[arg(long)]
    pub poll_timeout_secs: Option<u64>,
}

impl Cli {
    pub fn studio_config(&self) -> StudioConfig {
        StudioConfig {
            api_key: self.api_key.clone(),
            api_base: self.api_base.clone(),
            model: self.model.clone(),
            poll: PollPolicy {
                interval: Duration::from_secs(self.poll_interval_secs),
                timeout: self.poll_timeout_secs.map(Duration::from_secs),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_veo_service() {
        let cli = Cli::parse_from(["lumiere-launcher", "--api-key", "secret"]);
        let config = cli.studio_config();

        assert_eq!(cli.port, 8080);
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.poll, PollPolicy::default());
    }

    #[test]
    fn poll_timeout_is_optional() {
        let cli = Cli::parse_from([
            "lumiere-launcher",
            "--poll-interval-secs",
            "1",
            "--poll-timeout-secs",
            "600",
        ]);
        let poll = cli.studio_config().poll;

        assert_eq!(poll.interval, Duration::from_secs(1));
        assert_eq!(poll.timeout, Some(Duration::from_secs(600)));
    }
}
