//! Web API client
//!
//! [`DataverseClient`] owns an authenticated HTTP transport bound to one
//! service root. Every call is a single sequential exchange except paginated
//! retrieval, which follows continuation links one page at a time.

mod batch;
mod client;
mod crud;
mod response;
mod retrieve;


pub use client::DataverseClient;
pub use response::Page;
