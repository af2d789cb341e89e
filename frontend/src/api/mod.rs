mod admin;
mod auth;
pub mod client;
pub mod token;
pub mod types;
mod user;

pub use client::*;
pub use token::{LocalStorageTokens, MemoryTokens, TokenStore};
pub use types::*;
