use self::totp::Totp;

pub mod totp;

/// A single-use backup code
///
/// Only the salted hash is ever persisted. Once `used` is set the same
/// plaintext can never authenticate again.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BackupCode {
    /// Argon2 hash of the code
    pub code_hash: String,

    /// Whether this code has been spent
    #[serde(default)]
    pub used: bool,
}

/// Two-factor authentication state of an account
#[derive(Default, Debug, Serialize, Deserialize, Clone)]
pub struct TwoFactorAuthentication {
    /// TOTP credential, enabled once confirmed
    #[serde(default)]
    pub totp: Totp,

    /// Backup codes, stored as salted hashes
    #[serde(default)]
    pub backup_codes: Vec<BackupCode>,
}

/// Which second factor matched a submitted code
#[derive(Debug, PartialEq, Eq)]
pub enum SecondFactor {
    Totp,
    BackupCode { code_hash: String },
}
