use rocket::{
    http::{ContentType, Status},
    outcome::Outcome,
    request::{self, FromRequest},
    response::{self, Responder},
    Request, Response,
};

use crate::{
    models::{Account, SessionToken, TokenScope},
    Authgate, Error,
};

/// HTTP response builder for Error enum
impl<'r> Responder<'r, 'static> for Error {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let status = match self {
            Error::IncorrectData { .. } => Status::BadRequest,
            Error::DatabaseError { .. } => Status::InternalServerError,
            Error::InternalError => Status::InternalServerError,
            Error::OperationFailed => Status::InternalServerError,
            Error::MissingHeaders => Status::BadRequest,
            Error::UnknownUser => Status::NotFound,
            Error::InvalidCredentials => Status::Unauthorized,
            Error::InvalidCode => Status::BadRequest,
            Error::TokenInvalid => Status::Unauthorized,
            Error::TokenExpired => Status::Unauthorized,
            Error::AlreadyEnabled => Status::BadRequest,
            Error::NotEnabled => Status::BadRequest,
            Error::NoPendingSetup => Status::BadRequest,
        };

        // Serialize the error data structure into JSON.
        let string = json!(self).to_string();

        // Build and send the request.
        Response::build()
            .sized_body(string.len(), std::io::Cursor::new(string))
            .header(ContentType::new("application", "json"))
            .status(status)
            .ok()
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for SessionToken {
    type Error = Error;

    /// Resolve a full-scope session from the `x-session-token` header
    ///
    /// Pending second-factor tokens are never accepted here; they are only
    /// usable as an explicit argument to the verification operation.
    async fn from_request(request: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let header_session_token = request
            .headers()
            .get("x-session-token")
            .next()
            .map(|x| x.to_string());

        match (request.rocket().state::<Authgate>(), header_session_token) {
            (Some(authgate), Some(token)) => {
                match authgate.database.find_session_token(&token).await {
                    Ok(Some(session)) => {
                        if !matches!(session.scope, TokenScope::Full) {
                            Outcome::Error((Status::Unauthorized, Error::TokenInvalid))
                        } else if session.is_expired() {
                            Outcome::Error((Status::Unauthorized, Error::TokenExpired))
                        } else {
                            Outcome::Success(session)
                        }
                    }
                    Ok(None) => Outcome::Error((Status::Unauthorized, Error::TokenInvalid)),
                    Err(_) => Outcome::Error((Status::InternalServerError, Error::InternalError)),
                }
            }
            (_, _) => Outcome::Error((Status::Unauthorized, Error::MissingHeaders)),
        }
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Account {
    type Error = Error;

    async fn from_request(request: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        match request.guard::<SessionToken>().await {
            Outcome::Success(session) => {
                let authgate = request.rocket().state::<Authgate>().unwrap();

                if let Ok(account) = authgate.database.find_account(&session.account_id).await {
                    Outcome::Success(account)
                } else {
                    Outcome::Error((Status::InternalServerError, Error::InternalError))
                }
            }
            Outcome::Forward(f) => Outcome::Forward(f),
            Outcome::Error(err) => Outcome::Error(err),
        }
    }
}
