// file: src/multiotp/mod.rs
// version: 1.1.0
// guid: 902143ff-0057-4b90-9307-dfd64c08afef

//! Facade over the multiOTP command-line binary
//!
//! Every operation validates the binary with `-version`, runs one
//! sub-command and classifies its exit code:
//!
//! ```text
//! multiotp -urllink <user>
//! multiotp -delete <user>
//! multiotp -ldap-users-sync
//! multiotp -qrcode <user> <png path>
//! ```
//!
//! Reissuing a QR code is a delete followed by an LDAP resync, which brings
//! the user back with a freshly generated seed.

pub mod exit_codes;
pub mod token_url;

pub use exit_codes::{ExitOutcome, Operation};

use crate::error::{OtpError, ReissueStage, Result};
use crate::executor::{CommandOutput, CommandRunner, SystemRunner};
use crate::logging::with_operation_span;
use crate::utils;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Handle on a multiOTP installation
#[derive(Debug, Clone)]
pub struct MultiOtp<R: CommandRunner = SystemRunner> {
    binary: PathBuf,
    runner: R,
}

impl MultiOtp<SystemRunner> {
    /// Create a facade that runs the binary as a real subprocess
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self::with_runner(binary, SystemRunner::new())
    }
}

impl<R: CommandRunner> MultiOtp<R> {
    pub fn with_runner(binary: impl Into<PathBuf>, runner: R) -> Self {
        Self {
            binary: binary.into(),
            runner,
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Verify the binary exists and answers `-version` with its success sentinel
    pub fn check_binary(&self) -> Result<()> {
        if !utils::path_exists(&self.binary) {
            return Err(OtpError::config(format!(
                "{}: path doesn't exist",
                self.binary.display()
            )));
        }

        let op = Operation::Version;
        let output = self
            .runner
            .run(&self.binary, &[op.flag().to_string()])
            .map_err(|e| {
                OtpError::config(format!(
                    "{} isn't executable: {}",
                    self.binary.display(),
                    e
                ))
            })?;

        match op.classify(output.code) {
            ExitOutcome::Success => {
                debug!("multiOTP binary at {} is usable", self.binary.display());
                Ok(())
            }
            _ => Err(OtpError::config(format!(
                "{} failed the version check with exit code {:?}: {}",
                self.binary.display(),
                output.code,
                output.diagnostic()
            ))),
        }
    }

    /// Run a sub-command after validating the binary
    fn invoke(&self, op: Operation, operands: &[&str]) -> Result<CommandOutput> {
        self.check_binary()?;

        let mut args = Vec::with_capacity(operands.len() + 1);
        args.push(op.flag().to_string());
        args.extend(operands.iter().map(|s| s.to_string()));

        debug!("Invoking {} {:?}", self.binary.display(), args);
        self.runner.run(&self.binary, &args)
    }

    fn unknown_exit(op: Operation, output: &CommandOutput) -> OtpError {
        warn!("{} returned unexpected exit code {:?}", op, output.code);
        OtpError::UnknownExit {
            operation: op.flag().to_string(),
            code: output.code,
            output: output.diagnostic(),
        }
    }

    /// Fetch a user's `otpauth://` provisioning URI.
    ///
    /// A non-empty `description` replaces the issuer label (multiOTP's default
    /// is `multiOTP`); an empty one returns the binary's stdout verbatim.
    pub fn token_url(&self, user: &str, description: &str) -> Result<Vec<u8>> {
        with_operation_span("token_url", || {
            let op = Operation::UrlLink;
            let output = self.invoke(op, &[user])?;

            match op.classify(output.code) {
                ExitOutcome::Success => {}
                ExitOutcome::NotFound => return Err(OtpError::user_not_found(user)),
                ExitOutcome::Unknown => return Err(Self::unknown_exit(op, &output)),
            }

            if !token_url::is_otpauth(&output.stdout) {
                return Err(OtpError::FormatMismatch {
                    operation: op.flag().to_string(),
                    output: String::from_utf8_lossy(&output.stdout).into_owned(),
                });
            }

            info!("Fetched token URL for {}", user);
            Ok(token_url::replace_issuer(&output.stdout, description))
        })
    }

    /// Delete a user from the multiOTP database.
    ///
    /// A missing user is reported as [`OtpError::UserNotFound`].
    pub fn delete_user(&self, user: &str) -> Result<()> {
        with_operation_span("delete_user", || {
            let op = Operation::Delete;
            let output = self.invoke(op, &[user])?;

            match op.classify(output.code) {
                ExitOutcome::Success => {
                    info!("Deleted user {}", user);
                    Ok(())
                }
                ExitOutcome::NotFound => Err(OtpError::user_not_found(user)),
                ExitOutcome::Unknown => Err(Self::unknown_exit(op, &output)),
            }
        })
    }

    /// Resync users from the directory service; may take a while on large directories
    pub fn resync_users(&self) -> Result<()> {
        with_operation_span("resync_users", || {
            let op = Operation::LdapUsersSync;
            let output = self.invoke(op, &[])?;

            match op.classify(output.code) {
                ExitOutcome::Success => {
                    info!("Resynced LDAP users");
                    Ok(())
                }
                _ => Err(Self::unknown_exit(op, &output)),
            }
        })
    }

    /// Reissue a user's token: delete, then resync from LDAP.
    ///
    /// There is no rollback; if the resync fails the user stays deleted.
    pub fn reissue_qr(&self, user: &str) -> Result<()> {
        with_operation_span("reissue_qr", || {
            self.delete_user(user)
                .map_err(|e| OtpError::reissue(ReissueStage::Delete, e))?;

            self.resync_users().map_err(|e| {
                warn!("User {} was deleted but the resync failed", user);
                OtpError::reissue(ReissueStage::Resync, e)
            })?;

            info!("Reissued QR for {}", user);
            Ok(())
        })
    }

    /// Render a user's QR code to `<out_dir>/<user>.png` and return that path.
    ///
    /// The user name and the directory are checked before the binary is
    /// touched; the PNG always lands directly inside `out_dir`.
    pub fn generate_png(&self, user: &str, out_dir: &Path) -> Result<PathBuf> {
        with_operation_span("generate_png", || {
            utils::validate_file_stem(user)?;
            utils::ensure_writable_dir(out_dir)?;

            let png_path = out_dir.join(format!("{}.png", user));
            if png_path.parent() != Some(out_dir) {
                return Err(OtpError::precondition(format!(
                    "{} is outside {}",
                    png_path.display(),
                    out_dir.display()
                )));
            }
            let png_arg = png_path.to_string_lossy().into_owned();

            let op = Operation::QrCode;
            let output = self.invoke(op, &[user, png_arg.as_str()])?;

            match op.classify(output.code) {
                ExitOutcome::Success => {
                    info!("QR code for {} written to {}", user, png_path.display());
                    Ok(png_path)
                }
                ExitOutcome::NotFound => Err(OtpError::user_not_found(user)),
                ExitOutcome::Unknown => Err(Self::unknown_exit(op, &output)),
            }
        })
    }
}
