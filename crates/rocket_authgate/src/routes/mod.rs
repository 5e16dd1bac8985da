use rocket::Route;

pub mod account;
pub mod mfa;
pub mod session;

/// Collect all routes, ready to mount at a common base
pub fn routes() -> Vec<Route> {
    [session::routes(), account::routes(), mfa::routes()].concat()
}
