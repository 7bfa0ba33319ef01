#![forbid(unsafe_code)]

pub mod access;
pub mod error;
pub mod model;
pub mod time;
