use iso8601_timestamp::Timestamp;

/// Time-based one-time password configuration
#[derive(Default, Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(tag = "status")]
pub enum Totp {
    /// Disabled
    #[default]
    Disabled,
    /// Waiting for the user to confirm with a first valid code
    ///
    /// Confers no authentication power until confirmed.
    Pending { secret: String },
    /// Required on login
    Enabled {
        secret: String,
        confirmed_at: Timestamp,
    },
}
