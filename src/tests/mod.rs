//! Scenario tests for the Microflake generator


mod config_tests;
mod extraction_tests;
