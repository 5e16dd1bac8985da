//! Logout of current session
//! POST /session/logout
use authgate::models::SessionToken;
use authgate::{Authgate, Error, Result};
use rocket::State;
use rocket_empty::EmptyResponse;

/// # Logout
///
/// Delete the current session. Idempotent: a token that is already invalid
/// is not an error to the caller.
#[post("/logout")]
pub async fn logout(
    authgate: &State<Authgate>,
    session: Option<SessionToken>,
) -> Result<EmptyResponse> {
    if let Some(session) = session {
        match session.revoke(authgate).await {
            Ok(()) | Err(Error::TokenInvalid) => {}
            Err(err) => return Err(err),
        }
    }

    Ok(EmptyResponse)
}
