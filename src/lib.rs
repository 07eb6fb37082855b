pub mod buffers;
pub mod config;
pub mod error;
pub mod key;
pub mod permutation;
pub mod scorer;
pub mod search;
pub mod transform;
// cmd and reports are binary modules (see main.rs).
