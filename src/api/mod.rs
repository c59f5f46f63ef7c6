pub mod client;
pub mod credentials;

pub use client::*;
pub use credentials::HttpCredentialProvider;
