//! Adapters implementing domain ports against concrete backends.

pub mod completions;
