//! Property-based tests

mod transition_proptest;
