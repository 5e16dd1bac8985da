//! Login to an account
//! POST /session/login
use authgate::models::Account;
use authgate::{Authgate, Result};
use rocket::serde::json::Json;
use rocket::State;

use crate::routes::account::fetch_account::AccountInfo;

/// # Login Data
#[derive(Serialize, Deserialize)]
pub struct DataLogin {
    /// Email
    pub email: String,
    /// Password
    pub password: String,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseLogin {
    Success {
        token: String,
        account: AccountInfo,
    },
    /// A confirmed second factor interposes before a session is granted
    TwoFactorRequired {
        requires_2fa: bool,
        temp_token: String,
    },
}

/// # Login
///
/// Login to an account.
#[post("/login", data = "<data>")]
pub async fn login(
    authgate: &State<Authgate>,
    data: Json<DataLogin>,
) -> Result<Json<ResponseLogin>> {
    let DataLogin { email, password } = data.into_inner();

    // Resolve the credentials to an account
    let account = Account::authenticate(authgate, email, &password).await?;

    // Check whether a second factor is required
    if account.mfa.is_active() {
        let pending = account.create_pending_token(authgate).await?;

        return Ok(Json(ResponseLogin::TwoFactorRequired {
            requires_2fa: true,
            temp_token: pending.token,
        }));
    }

    // Create and return a new session
    let session = account.create_session(authgate).await?;

    Ok(Json(ResponseLogin::Success {
        token: session.token,
        account: account.into(),
    }))
}
