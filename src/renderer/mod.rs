//! Rendering
//!
//! `Scene` is a plain draw list built from the game snapshot. On the web it
//! is painted onto a 2D canvas; natively it is only fingerprinted.

pub mod quad;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use quad::{Quad, fingerprint};
pub use scene::{Hud, Overlay, Scene};
