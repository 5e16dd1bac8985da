use super::TwoFactorAuthentication;

/// Account model
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Account {
    /// Unique Id
    #[serde(rename = "_id")]
    pub id: String,

    /// User's email
    pub email: String,

    /// Normalised email
    ///
    /// Login identity; aliases and separator dots collapse to one account.
    pub email_normalised: String,

    /// Argon2 hashed password
    pub password: String,

    /// Role label, passed through to clients verbatim
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub role: Option<String>,

    /// Two-factor authentication information
    #[serde(default)]
    pub mfa: TwoFactorAuthentication,
}
