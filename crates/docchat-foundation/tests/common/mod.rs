//! Shared fixtures for `docchat-foundation` integration tests.

#![allow(dead_code)]

pub mod fake_runtime;
pub mod fixtures;
