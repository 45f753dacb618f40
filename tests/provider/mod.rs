//! Integration tests for transform providers

// Dimensional families built on first use
mod family_tests;

// Handing resolved values to transform builders
mod transform_tests;
