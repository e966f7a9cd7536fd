pub mod config;
pub mod contact;
pub mod health;
pub mod index;
