use crate::models::{Account, SessionToken};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "event_type")]
pub enum AuthgateEvent {
    CreateAccount {
        account: Account,
    },
    CreateSession {
        session: SessionToken,
    },
    DeleteSession {
        account_id: String,
        session_id: String,
    },
    TwoFactorEnabled {
        account_id: String,
    },
    TwoFactorDisabled {
        account_id: String,
    },
}
