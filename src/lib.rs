// file: src/lib.rs
// version: 3.0.0
// guid: d82472d1-7f0f-4eb4-b0a3-6e1547103eb4

//! # multiOTP Agent
//!
//! A thin facade over the multiOTP command-line binary. Each operation runs
//! the binary as a subprocess and classifies its exit code, which multiOTP
//! uses as the only outcome signal.

pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod multiotp;
pub mod utils;

pub use error::{OtpError, ReissueStage, Result};
pub use executor::{CommandOutput, CommandRunner, SystemRunner};
pub use multiotp::MultiOtp;

/// Version information for the utility
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
