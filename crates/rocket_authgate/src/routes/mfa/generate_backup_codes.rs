//! Replace all backup codes with a fresh set.
//! PATCH /mfa/backup-codes
use authgate::models::Account;
use authgate::{Authgate, Error, Result};
use rocket::serde::json::Json;
use rocket::State;

use super::totp_confirm::ResponseBackupCodes;

#[derive(Serialize, Deserialize)]
pub struct DataGenerateBackupCodes {
    /// Current password, re-verified as a defense against hijacked sessions
    pub password: String,
}

/// # Regenerate Backup Codes
///
/// Discard every existing backup code and issue a fresh set. The TOTP
/// secret and its confirmation state are unaffected.
#[patch("/backup-codes", data = "<data>")]
pub async fn generate_backup_codes(
    authgate: &State<Authgate>,
    mut account: Account,
    data: Json<DataGenerateBackupCodes>,
) -> Result<Json<ResponseBackupCodes>> {
    if !account.mfa.is_active() {
        return Err(Error::NotEnabled);
    }

    account.verify_password(&data.password)?;

    let backup_codes = account
        .mfa
        .generate_backup_codes(&authgate.config.two_factor)?;

    // Save model to database
    account.save(authgate).await?;

    Ok(Json(ResponseBackupCodes { backup_codes }))
}

#[cfg(test)]
mod tests {
    use crate::test::*;

    async fn enable_totp(authgate: &Authgate, account: &mut Account) -> Vec<String> {
        account.mfa.generate_totp_secret().unwrap();
        let code = account.mfa.totp.generate_code_at(1_000_000).unwrap();
        let backup_codes = account
            .mfa
            .confirm_totp(&code, 1_000_000, &authgate.config.two_factor)
            .unwrap();
        account.save(authgate).await.unwrap();
        backup_codes
    }

    #[async_std::test]
    async fn success() {
        let (authgate, session, mut account, _) = for_test_authenticated().await;
        let old_codes = enable_totp(&authgate, &mut account).await;

        let client = bootstrap_rocket_with_auth(
            authgate.clone(),
            routes![crate::routes::mfa::generate_backup_codes::generate_backup_codes],
        )
        .await;

        let res = client
            .patch("/backup-codes")
            .header(Header::new("X-Session-Token", session.token))
            .header(ContentType::JSON)
            .body(
                json!({
                    "password": "password_insecure"
                })
                .to_string(),
            )
            .dispatch()
            .await;

        assert_eq!(res.status(), Status::Ok);

        let response = serde_json::from_str::<
            crate::routes::mfa::totp_confirm::ResponseBackupCodes,
        >(&res.into_string().await.unwrap())
        .expect("`ResponseBackupCodes`");

        assert_eq!(response.backup_codes.len(), 10);
        assert!(response
            .backup_codes
            .iter()
            .all(|code| !old_codes.contains(code)));

        // The confirmed secret is unaffected
        let stored = authgate.database.find_account(&account.id).await.unwrap();
        assert_eq!(stored.mfa.totp, account.mfa.totp);
        assert!(stored.mfa.totp.is_active());
    }

    #[async_std::test]
    async fn fail_wrong_password() {
        let (authgate, session, mut account, _) = for_test_authenticated().await;
        enable_totp(&authgate, &mut account).await;

        let client = bootstrap_rocket_with_auth(
            authgate,
            routes![crate::routes::mfa::generate_backup_codes::generate_backup_codes],
        )
        .await;

        let res = client
            .patch("/backup-codes")
            .header(Header::new("X-Session-Token", session.token))
            .header(ContentType::JSON)
            .body(
                json!({
                    "password": "wrong_password"
                })
                .to_string(),
            )
            .dispatch()
            .await;

        assert_eq!(res.status(), Status::Unauthorized);
        assert_eq!(
            res.into_string().await,
            Some("{\"type\":\"InvalidCredentials\"}".into())
        );
    }

    #[async_std::test]
    async fn fail_not_enabled() {
        let (authgate, session, _, _) = for_test_authenticated().await;

        let client = bootstrap_rocket_with_auth(
            authgate,
            routes![crate::routes::mfa::generate_backup_codes::generate_backup_codes],
        )
        .await;

        let res = client
            .patch("/backup-codes")
            .header(Header::new("X-Session-Token", session.token))
            .header(ContentType::JSON)
            .body(
                json!({
                    "password": "password_insecure"
                })
                .to_string(),
            )
            .dispatch()
            .await;

        assert_eq!(res.status(), Status::BadRequest);
        assert_eq!(
            res.into_string().await,
            Some("{\"type\":\"NotEnabled\"}".into())
        );
    }
}
