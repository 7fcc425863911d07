//! Deterministic random number generation
//!
//! All randomness in the simulator (job page counts) goes through this module.

mod xorshift;

pub use xorshift::RngManager;
