/// Session token lifetimes
#[derive(Serialize, Deserialize, Clone)]
pub struct SessionTokenConfig {
    /// Lifetime of a pending second-factor token, in seconds
    ///
    /// Kept short: an unused pending token is only a liability.
    pub pending_ttl: u64,

    /// Lifetime of a full session token, in seconds
    pub full_ttl: u64,
}

impl Default for SessionTokenConfig {
    fn default() -> SessionTokenConfig {
        SessionTokenConfig {
            // 5 minutes
            pending_ttl: 5 * 60,
            // 7 days
            full_ttl: 7 * 24 * 60 * 60,
        }
    }
}
