//! HTTP plumbing shared by the backend clients.

pub mod client;
