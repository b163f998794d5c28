//! Configuration loading and validation tests
