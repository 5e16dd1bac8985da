//! Fetch the two-factor status of an account.
//! GET /mfa
use authgate::models::totp::Totp;
use authgate::models::{Account, TwoFactorAuthentication};
use authgate::Result;
use iso8601_timestamp::Timestamp;
use rocket::serde::json::Json;

#[derive(Debug, Serialize, Deserialize)]
pub struct TwoFactorStatus {
    pub enabled: bool,
    pub confirmed_at: Option<Timestamp>,
    pub has_backup_codes: bool,
}

impl From<&TwoFactorAuthentication> for TwoFactorStatus {
    fn from(mfa: &TwoFactorAuthentication) -> Self {
        TwoFactorStatus {
            enabled: mfa.is_active(),
            confirmed_at: match &mfa.totp {
                Totp::Enabled { confirmed_at, .. } => Some(*confirmed_at),
                _ => None,
            },
            has_backup_codes: mfa.backup_codes.iter().any(|backup| !backup.used),
        }
    }
}

/// # Two-Factor Status
///
/// Fetch the two-factor status of the current account.
#[get("/")]
pub async fn fetch_status(account: Account) -> Result<Json<TwoFactorStatus>> {
    Ok(Json((&account.mfa).into()))
}
