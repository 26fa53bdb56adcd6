mod retry;
pub mod strategy;

pub use crate::retry::Retry;
