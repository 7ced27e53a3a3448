pub mod messages;
pub mod questions;
