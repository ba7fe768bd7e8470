//! Edit session integration test module.
