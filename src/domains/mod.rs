//! Domains module containing business logic organized by bounded contexts.
//!
//! The only domain is `tools`: the runtime-mutable tool registry, its
//! dispatcher and the built-in tools.

pub mod tools;
