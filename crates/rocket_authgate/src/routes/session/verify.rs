//! Complete the second factor step of login
//! POST /session/verify
use authgate::models::{SecondFactor, TokenScope};
use authgate::{Authgate, Error, Result};
use rocket::serde::json::Json;
use rocket::State;

use super::login::ResponseLogin;

/// # Second Factor Data
///
/// The pending token is an explicit argument; it is never read from ambient
/// headers, so concurrent login attempts cannot clobber each other.
#[derive(Serialize, Deserialize)]
pub struct DataVerify {
    /// Pending token returned by login
    pub temp_token: String,
    /// TOTP code or backup code
    pub code: String,
}

/// # Verify Second Factor
///
/// Trade a pending token and a valid second factor for a full session.
#[post("/verify", data = "<data>")]
pub async fn verify(
    authgate: &State<Authgate>,
    data: Json<DataVerify>,
) -> Result<Json<ResponseLogin>> {
    let DataVerify { temp_token, code } = data.into_inner();

    // Resolve the pending token
    let mut token = authgate
        .database
        .find_session_token(&temp_token)
        .await?
        .ok_or(Error::TokenInvalid)?;

    if !matches!(token.scope, TokenScope::PendingTwoFactor) {
        return Err(Error::TokenInvalid);
    }

    if token.is_expired() {
        return Err(Error::TokenExpired);
    }

    // Find the corresponding account
    let account = authgate.database.find_account(&token.account_id).await?;

    let seconds: u64 = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs();

    match account.mfa.match_second_factor(&code, seconds) {
        Ok(factor) => {
            // Claim the pending token; only one verification can win
            token.claim(authgate).await?;

            // Spend the backup code after the claim so a lost race burns the
            // claimed token, never a code without a session
            if let SecondFactor::BackupCode { code_hash } = factor {
                authgate
                    .database
                    .consume_backup_code(&account.id, &code_hash)
                    .await?;
            }

            let session = account.create_session(authgate).await?;

            Ok(Json(ResponseLogin::Success {
                token: session.token,
                account: account.into(),
            }))
        }
        Err(err) => {
            // The pending token survives for a retry until its TTL or the
            // configured attempt limit
            token.register_failed_attempt(authgate).await?;
            Err(err)
        }
    }
}
