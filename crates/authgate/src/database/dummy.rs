use crate::{
    models::{Account, SessionToken},
    Error, Result, Success,
};

use futures::lock::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use super::{definition::AbstractDatabase, Migration};

/// In-memory database, used for testing and development
#[derive(Default, Clone)]
pub struct DummyDb {
    pub accounts: Arc<Mutex<HashMap<String, Account>>>,
    pub session_tokens: Arc<Mutex<HashMap<String, SessionToken>>>,
}

#[async_trait]
impl AbstractDatabase for DummyDb {
    /// Run a database migration
    async fn run_migration(&self, migration: Migration) -> Success {
        info!("Skipping migration {:?}", migration);
        Ok(())
    }

    /// Find account by id
    async fn find_account(&self, id: &str) -> Result<Account> {
        let accounts = self.accounts.lock().await;
        accounts.get(id).cloned().ok_or(Error::UnknownUser)
    }

    /// Find account by normalised email
    async fn find_account_by_normalised_email(
        &self,
        normalised_email: &str,
    ) -> Result<Option<Account>> {
        let accounts = self.accounts.lock().await;
        Ok(accounts
            .values()
            .find(|account| account.email_normalised == normalised_email)
            .cloned())
    }

    /// Find session token by its opaque bearer token
    async fn find_session_token(&self, token: &str) -> Result<Option<SessionToken>> {
        let session_tokens = self.session_tokens.lock().await;
        Ok(session_tokens
            .values()
            .find(|session| session.token == token)
            .cloned())
    }

    // Save account
    async fn save_account(&self, account: &Account) -> Success {
        let mut accounts = self.accounts.lock().await;
        accounts.insert(account.id.to_string(), account.clone());
        Ok(())
    }

    /// Save session token
    async fn save_session_token(&self, token: &SessionToken) -> Success {
        let mut session_tokens = self.session_tokens.lock().await;
        session_tokens.insert(token.id.to_string(), token.clone());
        Ok(())
    }

    /// Delete session token
    async fn delete_session_token(&self, id: &str) -> Success {
        let mut session_tokens = self.session_tokens.lock().await;
        if session_tokens.remove(id).is_some() {
            Ok(())
        } else {
            Err(Error::TokenInvalid)
        }
    }

    /// Atomically spend a backup code
    async fn consume_backup_code(&self, account_id: &str, code_hash: &str) -> Success {
        let mut accounts = self.accounts.lock().await;
        let account = accounts.get_mut(account_id).ok_or(Error::UnknownUser)?;

        let backup = account
            .mfa
            .backup_codes
            .iter_mut()
            .find(|backup| backup.code_hash == code_hash)
            .ok_or(Error::InvalidCode)?;

        if backup.used {
            return Err(Error::InvalidCode);
        }

        backup.used = true;
        Ok(())
    }
}
