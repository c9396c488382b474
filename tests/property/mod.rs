//! Property-based tests
//!
//! Uses proptest to generate random inputs and verify properties

mod hashing_proptest;
mod validation_proptest;
