// file: src/multiotp/exit_codes.rs
// version: 1.0.0
// guid: 1a722270-c4f6-47f4-9cc5-41bb2e3c5a30

//! Exit-code sentinels returned by the multiOTP binary
//!
//! multiOTP never exits with 0 on success; every outcome has its own code
//! and each sub-command accepts a different set of them.

/// 12 INFO: User successfully deleted
pub const USER_DELETED: i32 = 12;
/// 16 INFO: QRcode successfully created
pub const QRCODE_CREATED: i32 = 16;
/// 17 INFO: UrlLink successfully created
pub const URLLINK_CREATED: i32 = 17;
/// 19 INFO: Requested operation successfully done
pub const OPERATION_DONE: i32 = 19;
/// 21 ERROR: User doesn't exist
pub const USER_NOT_FOUND: i32 = 21;

/// Sub-commands of the multiOTP binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Version,
    UrlLink,
    Delete,
    LdapUsersSync,
    QrCode,
}

/// How an exit code maps onto an operation's outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    Success,
    NotFound,
    Unknown,
}

impl Operation {
    /// Command-line flag selecting this sub-command
    pub fn flag(&self) -> &'static str {
        match self {
            Operation::Version => "-version",
            Operation::UrlLink => "-urllink",
            Operation::Delete => "-delete",
            Operation::LdapUsersSync => "-ldap-users-sync",
            Operation::QrCode => "-qrcode",
        }
    }

    pub fn success_codes(&self) -> &'static [i32] {
        match self {
            Operation::Version => &[OPERATION_DONE],
            Operation::UrlLink => &[URLLINK_CREATED],
            Operation::Delete => &[USER_DELETED, OPERATION_DONE],
            Operation::LdapUsersSync => &[OPERATION_DONE],
            Operation::QrCode => &[QRCODE_CREATED],
        }
    }

    pub fn not_found_code(&self) -> Option<i32> {
        match self {
            Operation::UrlLink | Operation::Delete | Operation::QrCode => Some(USER_NOT_FOUND),
            Operation::Version | Operation::LdapUsersSync => None,
        }
    }

    /// Classify a process exit code; a missing code (signal) is always unknown
    pub fn classify(&self, code: Option<i32>) -> ExitOutcome {
        let Some(code) = code else {
            return ExitOutcome::Unknown;
        };

        if self.success_codes().contains(&code) {
            ExitOutcome::Success
        } else if self.not_found_code() == Some(code) {
            ExitOutcome::NotFound
        } else {
            ExitOutcome::Unknown
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.flag())
    }
}
