// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless drawer walkthrough.
//!
//! Opens a drawer over in-memory surfaces, drags it part of the way down and
//! lets it snap back, then flicks it closed. Inline styles are printed after
//! each step; set `RUST_LOG=understory_drawer=trace` to see every move.
//!
//! Run:
//! - `cargo run -p understory_drawer_demos --example headless_drawer`

use kurbo::Rect;
use understory_drawer::dialog::OpenFlag;
use understory_drawer::drag::{PointerId, PointerSample};
use understory_drawer::headless::HeadlessSurface;
use understory_drawer::{Drawer, DrawerConfig, DrawerHooks, config::edge_scale_for_viewport};
use understory_drawer_demos::{init_tracing, show};

const WIDTH: f64 = 390.0;
const HEIGHT: f64 = 844.0;

fn main() {
    init_tracing();

    let root = HeadlessSurface::new(Rect::new(0.0, 0.0, WIDTH, HEIGHT));
    let overlay = HeadlessSurface::new(Rect::new(0.0, 0.0, WIDTH, HEIGHT));
    let content = HeadlessSurface::new(Rect::new(0.0, 444.0, WIDTH, HEIGHT));
    let handle = HeadlessSurface::new(Rect::new(170.0, 452.0, 220.0, 462.0));
    let body = HeadlessSurface::new(Rect::new(0.0, 0.0, WIDTH, HEIGHT));

    let config = match DrawerConfig::builder()
        .edge_scale(edge_scale_for_viewport(WIDTH))
        .build()
    {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid drawer config: {err}");
            return;
        }
    };
    let hooks = DrawerHooks::new().on_closed(|| println!("-> on_closed"));
    let mut drawer = Drawer::new(config, OpenFlag(false)).with_hooks(hooks);
    drawer.bind_root(root.clone());
    drawer.bind_overlay(overlay.clone());
    drawer.bind_content(content.clone());
    drawer.bind_drag_handle(handle);
    drawer.bind_body(body.clone());

    let dump = |title: &str| {
        println!("{title}");
        show("root", &root);
        show("overlay", &overlay);
        show("content", &content);
        show("body", &body);
    };

    let mut now = 0;
    drawer.open(now);
    while let Some(deadline) = drawer.next_deadline() {
        now = deadline;
        drawer.advance(now);
    }
    dump("open:");

    // Slow pull of 150px: under the close threshold, so it snaps back.
    let pointer = PointerId(1);
    now += 1_000;
    if let Some(token) = drawer.pointer_down(PointerSample::new(pointer, 195.0, 460.0, now), false) {
        for step in 1..=5 {
            now += 200;
            let y = 460.0 + 30.0 * f64::from(step);
            drawer.pointer_move(token, PointerSample::new(pointer, 195.0, y, now));
        }
        dump("mid-drag:");
        if let Some(release) =
            drawer.pointer_up(token, PointerSample::new(pointer, 195.0, 610.0, now), HEIGHT)
        {
            println!("released: {:?}", release.outcome);
        }
    }
    dump("after snap back:");

    // Fast flick of 120px in 80ms.
    now += 1_000;
    if let Some(token) = drawer.pointer_down(PointerSample::new(pointer, 195.0, 460.0, now), false) {
        now += 80;
        drawer.pointer_move(token, PointerSample::new(pointer, 195.0, 580.0, now));
        if let Some(release) =
            drawer.pointer_up(token, PointerSample::new(pointer, 195.0, 580.0, now), HEIGHT)
        {
            println!("released: {:?} at {:.2}px/ms", release.outcome, release.velocity);
        }
    }
    while let Some(deadline) = drawer.next_deadline() {
        now = deadline;
        drawer.advance(now);
    }
    dump("closed:");

    for event in drawer.take_events() {
        println!("event: {event:?}");
    }
}
