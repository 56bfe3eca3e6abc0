//! Terminal-facing UI facade.
//!
//! Groups the rendering contract, the default crossterm renderer, and the
//! account-page view helpers so the binary depends on `ui` alone.

pub mod render;
pub mod terminal;
pub mod view;
