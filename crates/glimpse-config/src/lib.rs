//! Configuration for the glimpse preview shell.
//!
//! TOML-backed, with serde defaults so partial configs work correctly.
//! The preview mode selector is read once at controller construction
//! and never mutated mid-session.

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{GlimpseConfig, PreviewConfig, PreviewMode};
pub use toml_loader::{default_config_path, load_default, load_from_path};
