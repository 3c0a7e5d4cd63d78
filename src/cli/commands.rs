// file: src/cli/commands.rs
// version: 2.0.0
// guid: g7h8i9j0-k1l2-3456-7890-123456ghijkl

//! Command implementations for the CLI

use crate::{
    cli::args::{Cli, Commands},
    config::Config,
    error::OtpError,
    executor::CommandRunner,
    multiotp::MultiOtp,
    Result,
};
use colored::Colorize;
use serde::Serialize;
use tracing::info;

/// Result of one CLI invocation, printed as a line or as JSON
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub command: &'static str,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
}

impl Outcome {
    fn done(command: &'static str, message: impl Into<String>) -> Self {
        Self {
            command,
            success: true,
            message: message.into(),
            token_url: None,
            path: None,
            exit_code: None,
        }
    }

    /// Outcome for a failed command
    pub fn failure(command: &'static str, error: &OtpError) -> Self {
        Self {
            command,
            success: false,
            message: error.to_string(),
            token_url: None,
            path: None,
            exit_code: error.exit_code(),
        }
    }

    /// Human-readable outcome line
    pub fn line(&self) -> String {
        if !self.success {
            return self.message.clone();
        }

        match (&self.token_url, &self.path) {
            (Some(url), _) => format!("{}, tokenURL: {}", "DONE".green().bold(), url),
            (None, Some(path)) => format!("{} {}: {}", "DONE".green().bold(), self.message, path),
            (None, None) => format!("{} {}", "DONE".green().bold(), self.message),
        }
    }

    /// Render the outcome for stdout
    pub fn render(&self, json: bool) -> Result<String> {
        if json {
            Ok(serde_json::to_string(self)?)
        } else {
            Ok(self.line())
        }
    }
}

/// Apply CLI flag overrides on top of the loaded configuration
pub fn apply_cli_overrides(mut config: Config, cli: &Cli) -> Config {
    if let Some(ref binary) = cli.binary {
        config.multiotp.binary_path = binary.clone();
    }

    if let Some(ref dir) = cli.qr_dir {
        config.multiotp.qr_codes_dir = dir.clone();
    }

    if let Commands::TokenUrl {
        description: Some(ref descr),
        ..
    } = cli.command
    {
        config.multiotp.token_description = descr.clone();
    }

    config
}

/// Run one command against the multiOTP facade
pub fn execute<R: CommandRunner>(
    otp: &MultiOtp<R>,
    command: &Commands,
    config: &Config,
) -> Result<Outcome> {
    let name = command.name();
    info!("Running {} with {}", name, otp.binary().display());

    match command {
        Commands::Check => {
            otp.check_binary()?;
            Ok(Outcome::done(name, "checking multiotp binary"))
        }
        Commands::TokenUrl { user, .. } => {
            let raw = otp.token_url(user, &config.multiotp.token_description)?;
            let url = String::from_utf8_lossy(&raw).trim_end().to_string();
            let mut outcome = Outcome::done(name, format!("getting token URL for {}", user));
            outcome.token_url = Some(url);
            Ok(outcome)
        }
        Commands::DeleteUser { user } => {
            otp.delete_user(user)?;
            Ok(Outcome::done(name, "deleting user"))
        }
        Commands::Resync => {
            otp.resync_users()?;
            Ok(Outcome::done(name, "resyncing LDAP users"))
        }
        Commands::ReissueQr { user } => {
            otp.reissue_qr(user)?;
            Ok(Outcome::done(name, "reissuing QR for user"))
        }
        Commands::GeneratePng { user } => {
            let path = otp.generate_png(user, &config.qr_codes_dir())?;
            let mut outcome = Outcome::done(name, "generating png QR for user");
            outcome.path = Some(path.display().to_string());
            Ok(outcome)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_overrides_win() {
        let cli = Cli::try_parse_from([
            "multiotp-agent",
            "-m",
            "/opt/multiotp.php",
            "-d",
            "/srv/qr",
            "token-url",
            "-u",
            "alice",
            "-s",
            "ORG",
        ])
        .unwrap();

        let config = apply_cli_overrides(Config::default(), &cli);

        assert_eq!(config.multiotp.binary_path, "/opt/multiotp.php");
        assert_eq!(config.multiotp.qr_codes_dir, "/srv/qr");
        assert_eq!(config.multiotp.token_description, "ORG");
    }

    #[test]
    fn test_description_untouched_without_flag() {
        let cli = Cli::try_parse_from(["multiotp-agent", "token-url", "-u", "alice"]).unwrap();
        let mut base = Config::default();
        base.multiotp.token_description = "FROM-FILE".to_string();

        let config = apply_cli_overrides(base, &cli);

        assert_eq!(config.multiotp.token_description, "FROM-FILE");
    }

    #[test]
    fn test_failure_outcome_json() {
        let err = OtpError::UnknownExit {
            operation: "-delete".to_string(),
            code: Some(7),
            output: String::new(),
        };
        let outcome = Outcome::failure("delete-user", &err);

        let json: serde_json::Value =
            serde_json::from_str(&outcome.render(true).unwrap()).unwrap();

        assert_eq!(json["command"], "delete-user");
        assert_eq!(json["success"], false);
        assert_eq!(json["exit_code"], 7);
        assert!(json.get("token_url").is_none());
    }

    #[test]
    fn test_token_url_line() {
        let mut outcome = Outcome::done("token-url", "getting token URL for alice");
        outcome.token_url = Some("otpauth://totp/ORG:alice?secret=ABC".to_string());

        let line = outcome.line();

        assert!(line.contains("DONE"));
        assert!(line.ends_with("tokenURL: otpauth://totp/ORG:alice?secret=ABC"));
    }
}
