//! Workspace-level integration test package
//!
//! Carries no library code of its own; the end-to-end flows live in
//! `tests/` and import the workspace crates directly.
