//! Disable TOTP and wipe all backup codes.
//! DELETE /mfa/totp
use authgate::models::Account;
use authgate::{Authgate, AuthgateEvent, Error, Result};
use rocket::serde::json::Json;
use rocket::State;
use rocket_empty::EmptyResponse;

#[derive(Serialize, Deserialize)]
pub struct DataTotpDisable {
    /// Current password, re-verified as a defense against hijacked sessions
    pub password: String,
}

/// # Disable TOTP
///
/// Disable two-factor authentication for an account. The secret and all
/// backup codes are wiped.
#[delete("/totp", data = "<data>")]
pub async fn totp_disable(
    authgate: &State<Authgate>,
    mut account: Account,
    data: Json<DataTotpDisable>,
) -> Result<EmptyResponse> {
    if !account.mfa.is_active() {
        return Err(Error::NotEnabled);
    }

    account.verify_password(&data.password)?;

    account.mfa.wipe();

    // Save model to database
    account.save(authgate).await?;

    authgate
        .publish_event(AuthgateEvent::TwoFactorDisabled {
            account_id: account.id,
        })
        .await;

    Ok(EmptyResponse)
}
