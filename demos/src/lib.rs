// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the drawer demos.

use understory_drawer::headless::HeadlessSurface;

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, defaulting to `debug`
/// for the drawer crate.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into())
                .add_directive(
                    "understory_drawer=debug"
                        .parse()
                        .unwrap_or_else(|_| tracing::Level::DEBUG.into()),
                ),
        )
        .with_target(true)
        .init();
}

/// Prints a surface's inline style under `label`.
pub fn show(label: &str, surface: &HeadlessSurface) {
    let css = surface.css_text();
    if css.is_empty() {
        println!("  {label:<8} (no inline style)");
    } else {
        println!("  {label:<8} {css}");
    }
}
