pub mod process;
pub mod time;
pub mod tracking;
