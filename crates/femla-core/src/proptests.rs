//! Property-based tests for containers and expressions.
