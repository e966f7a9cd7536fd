pub mod catalog;
pub mod contact;
pub mod email;
mod macros;
pub mod stats;
pub mod tracking;
