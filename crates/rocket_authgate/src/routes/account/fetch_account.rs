//! Fetch your account
//! GET /account
use authgate::models::Account;
use authgate::Result;
use rocket::serde::json::Json;

use crate::routes::mfa::fetch_status::TwoFactorStatus;

#[derive(Serialize, Deserialize)]
pub struct AccountInfo {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub two_factor: TwoFactorStatus,
}

impl From<Account> for AccountInfo {
    fn from(account: Account) -> Self {
        let two_factor = TwoFactorStatus::from(&account.mfa);

        AccountInfo {
            id: account.id,
            email: account.email,
            role: account.role,
            two_factor,
        }
    }
}

/// # Fetch Account
///
/// Fetch account information from the current session.
#[get("/")]
pub async fn fetch_account(account: Account) -> Result<Json<AccountInfo>> {
    Ok(Json(account.into()))
}
