//! Shared building blocks for the staking pool contracts.
//!
//! This crate provides:
//! - [`stake_limit`]: the block-indexed stake limit bucket, as pure functions.
//! - [`authorization`]: capability names and the policy engine interface.
//! - `testutils`: a grant-based policy engine, behind the `testutils` feature.

#![cfg_attr(not(test), no_std)]

pub mod authorization;
pub mod stake_limit;
#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

pub use authorization::*;
pub use stake_limit::*;
