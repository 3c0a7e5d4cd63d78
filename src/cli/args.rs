// file: src/cli/args.rs
// version: 2.0.0
// guid: f6g7h8i9-j0k1-2345-6789-012345fghijk

//! Command line argument definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "multiotp-agent")]
#[command(about = "Manage multiOTP users and tokens through the multiotp binary")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short = 'm', long, global = true, help = "Full path to the multiotp binary")]
    pub binary: Option<String>,

    #[arg(short = 'd', long, global = true, help = "Directory for generated QR code PNGs")]
    pub qr_dir: Option<String>,

    #[arg(short, long, global = true, help = "Configuration file (TOML)")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Print the outcome as JSON")]
    pub json: bool,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Check that the multiotp binary is present and answers -version
    Check,

    /// Print a user's otpauth:// token URL
    TokenUrl {
        #[arg(short, long)]
        user: String,

        #[arg(short = 's', long, help = "Token description replacing the multiOTP issuer label")]
        description: Option<String>,
    },

    /// Delete a user from the multiOTP database
    DeleteUser {
        #[arg(short, long)]
        user: String,
    },

    /// Resync users from LDAP
    Resync,

    /// Reissue a user's token (delete, then LDAP resync)
    ReissueQr {
        #[arg(short, long)]
        user: String,
    },

    /// Write a user's QR code to <qr-dir>/<user>.png
    GeneratePng {
        #[arg(short, long)]
        user: String,
    },
}

impl Commands {
    /// Stable name used in outcome reports
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Check => "check",
            Commands::TokenUrl { .. } => "token-url",
            Commands::DeleteUser { .. } => "delete-user",
            Commands::Resync => "resync",
            Commands::ReissueQr { .. } => "reissue-qr",
            Commands::GeneratePng { .. } => "generate-png",
        }
    }
}
