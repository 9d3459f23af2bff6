pub mod client;

pub use client::{GitHubClient, SharedClient};
