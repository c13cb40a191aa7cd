//! Wire types shared by the streak tracker client crates.

pub mod domain;
pub mod error;
pub mod protocol;
