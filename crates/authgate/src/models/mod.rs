mod account;
mod session;
mod two_factor;

pub use account::*;
pub use session::*;
pub use two_factor::*;
