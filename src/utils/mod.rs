// Small helpers shared across modules

pub mod numbers;

pub use numbers::{format_n0, format_n1};
