use iso8601_timestamp::Timestamp;

/// Authorization level of a session token
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum TokenScope {
    /// Only valid for completing the second factor step of login
    #[serde(rename = "pending_2fa")]
    PendingTwoFactor,
    /// Full session
    #[serde(rename = "full")]
    Full,
}

/// Session token
///
/// The bearer credential for both halves of login: `PendingTwoFactor` scope
/// between password and second factor, `Full` scope afterwards.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionToken {
    /// Unique Id
    #[serde(rename = "_id")]
    pub id: String,

    /// Account Id
    pub account_id: String,

    /// Opaque bearer token
    pub token: String,

    /// Authorization level
    pub scope: TokenScope,

    /// Time at which this token was minted
    pub issued_at: Timestamp,

    /// Time at which this token stops being accepted
    pub expires_at: Timestamp,

    /// Failed second-factor attempts against this token
    #[serde(default)]
    pub attempts: i32,
}
