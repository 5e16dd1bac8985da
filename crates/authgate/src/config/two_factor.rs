/// Two-factor authentication options
#[derive(Serialize, Deserialize, Clone)]
pub struct TwoFactorConfig {
    /// Number of backup codes issued per set
    pub backup_code_count: usize,

    /// Revoke a pending token after this many failed second-factor attempts
    ///
    /// Disabled by default; the threshold is a deployment policy choice.
    pub attempt_limit: Option<i32>,
}

impl Default for TwoFactorConfig {
    fn default() -> TwoFactorConfig {
        TwoFactorConfig {
            backup_code_count: 10,
            attempt_limit: None,
        }
    }
}
