//! Integration tests for the content domain against an in-memory SQLite store.

mod editing;
mod fixtures;
mod nested;
mod routing;
mod serialization;
