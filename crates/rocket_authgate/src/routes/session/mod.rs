use rocket::{routes, Route};

pub mod login;
pub mod logout;
pub mod verify;

pub fn routes() -> Vec<Route> {
    routes![login::login, verify::verify, logout::logout]
}
