use rocket::{routes, Route};

pub mod fetch_status;
pub mod generate_backup_codes;
pub mod totp_confirm;
pub mod totp_disable;
pub mod totp_enable;

pub fn routes() -> Vec<Route> {
    routes![
        fetch_status::fetch_status,
        totp_enable::totp_enable,
        totp_confirm::totp_confirm,
        totp_disable::totp_disable,
        generate_backup_codes::generate_backup_codes
    ]
}
