//! Command handlers for the xtr CLI.

mod test;

pub use test::run_tests;
