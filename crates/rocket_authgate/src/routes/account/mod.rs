use rocket::{routes, Route};

pub mod fetch_account;

pub fn routes() -> Vec<Route> {
    routes![fetch_account::fetch_account]
}
