mod account;
mod session;
mod two_factor;
