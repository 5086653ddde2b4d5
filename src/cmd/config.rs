use std::io::{self, Write};

use clap::{Args, Subcommand};

use crate::config::{DEFAULT_GITHUB_API_URL, DEFAULT_GITHUB_OWNER, RawConfig};
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Show the configuration read from the environment (secrets masked).
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Show => {
            let report = render_show(&RawConfig::from_env());
            let mut stdout = io::stdout();
            stdout.write_all(report.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn render_show(cfg: &RawConfig) -> String {
    let lines = [
        format!("Jira base URL: {}", display_value(&cfg.jira_base_url)),
        format!("Jira user: {}", display_value(&cfg.jira_user)),
        format!("Jira API token: {}", mask_secret(&cfg.jira_token)),
        format!("GitHub API token: {}", mask_secret(&cfg.github_token)),
        format!(
            "GitHub owner: {}",
            cfg.github_owner.as_deref().unwrap_or(DEFAULT_GITHUB_OWNER)
        ),
        format!(
            "GitHub API URL: {}",
            cfg.github_api_url.as_deref().unwrap_or(DEFAULT_GITHUB_API_URL)
        ),
    ];

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

fn mask_secret(value: &Option<String>) -> String {
    match value {
        Some(token) if token.chars().count() > 6 => {
            let chars: Vec<char> = token.chars().collect();
            let prefix: String = chars[..3].iter().collect();
            let suffix: String = chars[chars.len() - 3..].iter().collect();
            format!("{prefix}***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}
