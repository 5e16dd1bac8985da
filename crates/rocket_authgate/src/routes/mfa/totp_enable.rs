//! Begin TOTP enrollment with a fresh secret.
//! POST /mfa/totp
use authgate::models::Account;
use authgate::{Authgate, Result};
use rocket::serde::json::Json;
use rocket::State;

#[derive(Serialize, Deserialize)]
pub struct ResponseTotpSecret {
    /// Base32 secret, shown to the user exactly once
    pub secret: String,
    /// otpauth:// URI for authenticator-app enrollment
    pub provisioning_uri: String,
}

/// # Enable TOTP
///
/// Generate a new secret and start TOTP enrollment. The credential stays
/// inactive until confirmed with a first valid code.
#[post("/totp")]
pub async fn totp_enable(
    authgate: &State<Authgate>,
    mut account: Account,
) -> Result<Json<ResponseTotpSecret>> {
    let secret = account.mfa.generate_totp_secret()?;

    let provisioning_uri = account
        .mfa
        .totp
        .provisioning_uri(&authgate.config.issuer, &account.email)?;

    // Save model to database
    account.save(authgate).await?;

    Ok(Json(ResponseTotpSecret {
        secret,
        provisioning_uri,
    }))
}
