//! Zellij plugin entry point.
//!
//! The plugin only builds for `wasm32-wasip1`; see [`plugin`] for the
//! Zellij integration. Native builds get a stub `main` so the library can
//! be tested with the regular toolchain.

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_arch = "wasm32")]
mod plugin;

#[cfg(target_arch = "wasm32")]
use zellij_tile::prelude::*;

#[cfg(target_arch = "wasm32")]
register_plugin!(plugin::State);
#[cfg(target_arch = "wasm32")]
register_worker!(
    plugin::CatalogWorkerShim,
    drivesphere_worker,
    DRIVESPHERE_WORKER
);

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("drivesphere is a Zellij plugin; build it with `--target wasm32-wasip1`");
}
