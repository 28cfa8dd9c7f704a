// Shared test helpers
//
// Included from each test target with #[path]; not every target uses
// every fixture.
#![allow(dead_code)]

pub mod test_data;

pub use test_data::*;
