//! REST implementations of the gateway traits over one shared [`ApiClient`].

mod assignments;
mod auth;
mod client;
mod progress;
mod teams;
mod trainings;
mod users;

pub use client::{ApiClient, ApiConfig, DEFAULT_BASE_URL};
