pub mod client;
pub mod error;
mod sse;

pub use client::NotifyClient;
pub use error::{SdkError, SdkResult};
pub use reqwest::StatusCode;
pub use seeder_core::*;
