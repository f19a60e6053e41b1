//! `apigw` CLI library exports.
//!
//! Exposes the configuration handling and the command implementations so
//! the binary stays a thin argument parser.

pub mod commands;
pub mod config;
pub mod errors;

#[cfg(test)]
mod test_support;
