//! Error types and error handling for the compiler.
//!
//! This module defines the error types used throughout the pipeline.
//! It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for each phase, grouped into an [`errors::ErrorKind`] taxonomy
//! - Report formatting (classification headline plus indented detail)

pub mod errors;

#[cfg(test)]
mod tests;
