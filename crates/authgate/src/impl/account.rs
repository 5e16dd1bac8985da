use crate::{
    models::{Account, SessionToken},
    util::{hash_password, normalise_email},
    AuthgateEvent, Authgate, Error, Result, Success,
};

impl Account {
    /// Create a new account
    ///
    /// Provisioning surface; accounts are normally created by an external
    /// system and only their two-factor fields are mutated here.
    pub async fn new(
        authgate: &Authgate,
        email: String,
        plaintext_password: String,
        role: Option<String>,
    ) -> Result<Account> {
        // Hash the user's password
        let password = hash_password(plaintext_password)?;

        // Get a normalised representation of the user's email
        let email_normalised = normalise_email(email.clone());

        // Refuse duplicate identities
        if authgate
            .database
            .find_account_by_normalised_email(&email_normalised)
            .await?
            .is_some()
        {
            return Err(Error::OperationFailed);
        }

        let account = Account {
            id: ulid::Ulid::new().to_string(),

            email,
            email_normalised,
            password,
            role,

            mfa: Default::default(),
        };

        authgate.database.save_account(&account).await?;

        authgate
            .publish_event(AuthgateEvent::CreateAccount {
                account: account.clone(),
            })
            .await;

        Ok(account)
    }

    /// Resolve an identity and password pair to an account
    ///
    /// Unknown identity and wrong password are indistinguishable to the
    /// caller.
    pub async fn authenticate(
        authgate: &Authgate,
        email: String,
        plaintext_password: &str,
    ) -> Result<Account> {
        let email_normalised = normalise_email(email);

        let account = authgate
            .database
            .find_account_by_normalised_email(&email_normalised)
            .await?
            .ok_or(Error::InvalidCredentials)?;

        account.verify_password(plaintext_password)?;
        Ok(account)
    }

    /// Verify a user's password is correct
    pub fn verify_password(&self, plaintext_password: &str) -> Success {
        argon2::verify_encoded(&self.password, plaintext_password.as_bytes())
            .map(|v| {
                if v {
                    Ok(())
                } else {
                    Err(Error::InvalidCredentials)
                }
            })
            // To prevent user enumeration, we should ignore
            // the error and pretend the password is wrong.
            .map_err(|_| Error::InvalidCredentials)?
    }

    /// Save model
    pub async fn save(&self, authgate: &Authgate) -> Success {
        authgate.database.save_account(self).await
    }

    /// Create a full-scope session token
    pub async fn create_session(&self, authgate: &Authgate) -> Result<SessionToken> {
        let session = SessionToken::full(&authgate.config.session_tokens, self.id.clone());

        authgate.database.save_session_token(&session).await?;

        authgate
            .publish_event(AuthgateEvent::CreateSession {
                session: session.clone(),
            })
            .await;

        Ok(session)
    }

    /// Create the short-lived token gating the second factor step
    pub async fn create_pending_token(&self, authgate: &Authgate) -> Result<SessionToken> {
        let token = SessionToken::pending(&authgate.config.session_tokens, self.id.clone());

        authgate.database.save_session_token(&token).await?;

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use crate::{database::DummyDb, Authgate, Database, Error};

    use super::Account;

    async fn for_test() -> Authgate {
        Authgate {
            database: Database::Dummy(DummyDb::default()),
            ..Default::default()
        }
    }

    #[async_std::test]
    async fn it_authenticates_known_accounts() {
        let authgate = for_test().await;

        Account::new(
            &authgate,
            "user@example.com".into(),
            "password_insecure".into(),
            None,
        )
        .await
        .unwrap();

        let account = Account::authenticate(&authgate, "user@example.com".into(), "password_insecure")
            .await
            .unwrap();

        assert_eq!(account.email, "user@example.com");
    }

    #[async_std::test]
    async fn it_collapses_failures_to_one_error() {
        let authgate = for_test().await;

        Account::new(
            &authgate,
            "user@example.com".into(),
            "password_insecure".into(),
            None,
        )
        .await
        .unwrap();

        let wrong_password =
            Account::authenticate(&authgate, "user@example.com".into(), "wrong_password")
                .await
                .unwrap_err();

        let unknown_user =
            Account::authenticate(&authgate, "nobody@example.com".into(), "anything")
                .await
                .unwrap_err();

        assert_eq!(wrong_password, Error::InvalidCredentials);
        assert_eq!(unknown_user, Error::InvalidCredentials);
    }

    #[async_std::test]
    async fn it_refuses_duplicate_identities() {
        let authgate = for_test().await;

        Account::new(
            &authgate,
            "user@example.com".into(),
            "password_insecure".into(),
            None,
        )
        .await
        .unwrap();

        // Same identity through an email alias
        assert!(Account::new(
            &authgate,
            "u.ser+alias@example.com".into(),
            "password_insecure".into(),
            None,
        )
        .await
        .is_err());
    }
}
