//! Isolated environment provisioning and dashboard launch.
//!
//! The provisioning flow mirrors the project's Makefile: resolve a pinned
//! Python interpreter (pyenv preferred, system fallback), record the pin,
//! build a venv, install the dependency manifest, then stamp the
//! environment. The launcher starts the Streamlit server from the venv in
//! the foreground and propagates its exit code.

pub mod builder;
pub mod error;
pub mod launcher;
pub mod layout;
pub mod manifest;
pub mod python;

pub use error::EnvError;
pub use layout::ProjectLayout;
