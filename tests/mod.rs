//! Test suite for workboard
//!
//! This module organizes all tests

pub mod property;
