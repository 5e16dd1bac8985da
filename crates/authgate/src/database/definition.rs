use crate::{
    models::{Account, SessionToken},
    Result, Success,
};

use super::Migration;

#[async_trait]
pub trait AbstractDatabase: std::marker::Sync {
    /// Run a database migration
    async fn run_migration(&self, migration: Migration) -> Success;

    /// Find account by id
    async fn find_account(&self, id: &str) -> Result<Account>;

    /// Find account by normalised email
    async fn find_account_by_normalised_email(
        &self,
        normalised_email: &str,
    ) -> Result<Option<Account>>;

    /// Find session token by its opaque bearer token
    async fn find_session_token(&self, token: &str) -> Result<Option<SessionToken>>;

    // Save account
    async fn save_account(&self, account: &Account) -> Success;

    /// Save session token
    async fn save_session_token(&self, token: &SessionToken) -> Success;

    /// Delete session token
    ///
    /// Fails with `TokenInvalid` if the token is already gone; promotion
    /// relies on this to be exactly-once.
    async fn delete_session_token(&self, id: &str) -> Success;

    /// Atomically spend a backup code
    ///
    /// Compare-and-set on the `used` flag; fails with `InvalidCode` if the
    /// code was already spent, so the same code can never be accepted twice.
    async fn consume_backup_code(&self, account_id: &str, code_hash: &str) -> Success;
}
