pub mod client;
pub mod error;

pub use client::MetadataClient;
pub use error::MetadataError;
