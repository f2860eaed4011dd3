pub mod scope;
pub mod server;
pub mod user;
