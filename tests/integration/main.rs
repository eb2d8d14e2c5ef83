//! Integration tests for hookify-bridge


mod bridge_tests;
mod cli_tests;
