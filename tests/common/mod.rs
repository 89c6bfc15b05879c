#![allow(dead_code)] // Each test binary compiles this module and uses a subset

pub mod fake_executor;
pub mod strategies;
