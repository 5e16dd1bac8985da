use bson::{to_document, Document};
use mongodb::options::{Collation, CollationStrength, FindOneOptions, UpdateOptions};
use std::ops::Deref;

use crate::{
    models::{Account, SessionToken},
    Error, Result, Success,
};

use super::{definition::AbstractDatabase, Migration};

#[derive(Clone)]
pub struct MongoDb(pub mongodb::Database);

impl Deref for MongoDb {
    type Target = mongodb::Database;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl AbstractDatabase for MongoDb {
    /// Run a database migration
    async fn run_migration(&self, migration: Migration) -> Success {
        match migration {
            #[cfg(debug_assertions)]
            Migration::WipeAll => {
                // Drop the entire database
                self.drop().await.unwrap();
            }
            Migration::M2026_08_01EnsureUpToSpec => {
                if self
                    .collection::<Document>("session_tokens")
                    .list_index_names()
                    .await
                    .unwrap_or_default()
                    .contains(&"token".to_owned())
                {
                    return Ok(());
                }

                // Make sure all collections exist
                let list = self.list_collection_names().await.unwrap();
                let collections = ["accounts", "session_tokens"];

                for name in collections {
                    if !list.contains(&name.to_string()) {
                        self.create_collection(name).await.unwrap();
                    }
                }

                // Setup index for `accounts`
                let col = self.collection::<Document>("accounts");
                col.drop_indexes().await.unwrap();

                self.run_command(doc! {
                    "createIndexes": "accounts",
                    "indexes": [
                        {
                            "key": {
                                "email_normalised": 1
                            },
                            "name": "email_normalised",
                            "unique": true,
                            "collation": {
                                "locale": "en",
                                "strength": 2
                            }
                        }
                    ]
                })
                .await
                .unwrap();

                // Setup index for `session_tokens`
                let col = self.collection::<Document>("session_tokens");
                col.drop_indexes().await.unwrap();

                self.run_command(doc! {
                    "createIndexes": "session_tokens",
                    "indexes": [
                        {
                            "key": {
                                "token": 1
                            },
                            "name": "token",
                            "unique": true
                        },
                        {
                            "key": {
                                "account_id": 1
                            },
                            "name": "account_id"
                        }
                    ]
                })
                .await
                .unwrap();
            }
        }

        Ok(())
    }

    /// Find account by id
    async fn find_account(&self, id: &str) -> Result<Account> {
        self.collection("accounts")
            .find_one(doc! {
                "_id": id
            })
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "find_one",
                with: "account",
            })?
            .ok_or(Error::UnknownUser)
    }

    /// Find account by normalised email
    async fn find_account_by_normalised_email(
        &self,
        normalised_email: &str,
    ) -> Result<Option<Account>> {
        self.collection("accounts")
            .find_one(doc! {
                "email_normalised": normalised_email
            })
            .with_options(
                FindOneOptions::builder()
                    .collation(
                        Collation::builder()
                            .locale("en")
                            .strength(CollationStrength::Secondary)
                            .build(),
                    )
                    .build(),
            )
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "find_one",
                with: "account",
            })
    }

    /// Find session token by its opaque bearer token
    async fn find_session_token(&self, token: &str) -> Result<Option<SessionToken>> {
        self.collection("session_tokens")
            .find_one(doc! {
                "token": token
            })
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "find_one",
                with: "session_token",
            })
    }

    // Save account
    async fn save_account(&self, account: &Account) -> Success {
        self.collection::<Account>("accounts")
            .update_one(
                doc! {
                    "_id": &account.id
                },
                doc! {
                    "$set": to_document(account).map_err(|_| Error::DatabaseError {
                        operation: "to_document",
                        with: "account",
                    })?
                },
            )
            .with_options(UpdateOptions::builder().upsert(true).build())
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "upsert_one",
                with: "account",
            })
            .map(|_| ())
    }

    /// Save session token
    async fn save_session_token(&self, token: &SessionToken) -> Success {
        self.collection::<SessionToken>("session_tokens")
            .update_one(
                doc! {
                    "_id": &token.id
                },
                doc! {
                    "$set": to_document(token).map_err(|_| Error::DatabaseError {
                        operation: "to_document",
                        with: "session_token",
                    })?
                },
            )
            .with_options(UpdateOptions::builder().upsert(true).build())
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "upsert_one",
                with: "session_token",
            })
            .map(|_| ())
    }

    /// Delete session token
    ///
    /// The delete must observe the document to succeed, which makes claiming
    /// a pending token exactly-once even across workers.
    async fn delete_session_token(&self, id: &str) -> Success {
        let result = self
            .collection::<SessionToken>("session_tokens")
            .delete_one(doc! {
                "_id": id
            })
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "delete_one",
                with: "session_token",
            })?;

        if result.deleted_count == 1 {
            Ok(())
        } else {
            Err(Error::TokenInvalid)
        }
    }

    /// Atomically spend a backup code
    async fn consume_backup_code(&self, account_id: &str, code_hash: &str) -> Success {
        let result = self
            .collection::<Account>("accounts")
            .update_one(
                doc! {
                    "_id": account_id,
                    "mfa.backup_codes": {
                        "$elemMatch": {
                            "code_hash": code_hash,
                            "used": false
                        }
                    }
                },
                doc! {
                    "$set": {
                        "mfa.backup_codes.$.used": true
                    }
                },
            )
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "update_one",
                with: "account",
            })?;

        if result.modified_count == 1 {
            Ok(())
        } else {
            Err(Error::InvalidCode)
        }
    }
}
