pub mod payload;
pub mod user_agent;
