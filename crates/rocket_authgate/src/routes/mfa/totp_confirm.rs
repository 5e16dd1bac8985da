//! Confirm TOTP enrollment with a first valid code.
//! PUT /mfa/totp
use authgate::models::Account;
use authgate::{Authgate, AuthgateEvent, Result};
use rocket::serde::json::Json;
use rocket::State;

#[derive(Serialize, Deserialize)]
pub struct DataTotpConfirm {
    /// 6-digit code for the pending secret
    pub code: String,
}

#[derive(Serialize, Deserialize)]
pub struct ResponseBackupCodes {
    /// Plaintext backup codes, shown exactly once
    pub backup_codes: Vec<String>,
}

/// # Confirm TOTP
///
/// Activate the pending TOTP credential and receive the initial backup code
/// set. A wrong code keeps the pending secret so the user may retry.
#[put("/totp", data = "<data>")]
pub async fn totp_confirm(
    authgate: &State<Authgate>,
    mut account: Account,
    data: Json<DataTotpConfirm>,
) -> Result<Json<ResponseBackupCodes>> {
    let seconds: u64 = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs();

    let backup_codes =
        account
            .mfa
            .confirm_totp(&data.code, seconds, &authgate.config.two_factor)?;

    // Save model to database
    account.save(authgate).await?;

    authgate
        .publish_event(AuthgateEvent::TwoFactorEnabled {
            account_id: account.id,
        })
        .await;

    Ok(Json(ResponseBackupCodes { backup_codes }))
}
