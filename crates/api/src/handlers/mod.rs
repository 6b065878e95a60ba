pub mod archive;
pub mod auth;
pub mod blog;
pub mod contact;
pub mod health;
pub mod messages;
pub mod offers;
pub mod upload;
