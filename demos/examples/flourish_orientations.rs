// Copyright 2025 the Flourish Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Where the panel sits for each orientation, hidden, halfway and shown.
//!
//! For every orientation the panel is attached to a 300×200 parent, then sampled
//! through a 100 ms linear show. The world bounds make the swing visible: the
//! hidden panel is fully outside the parent and the pivot corner never moves.
//!
//! Run:
//! - `cargo run -p flourish_demos --example flourish_orientations`

use std::time::Duration;

use flourish::{FlourishBuilder, Orientation};
use flourish_scene::{LocalNode, Scene, Sizing};
use kurbo::{Rect, Size};

fn fmt_rect(r: Option<Rect>) -> String {
    match r {
        Some(r) => format!("({:6.1}, {:6.1})-({:6.1}, {:6.1})", r.x0, r.y0, r.x1, r.y1),
        None => "-".into(),
    }
}

fn main() {
    for orientation in Orientation::ALL {
        let mut scene = Scene::new();
        let parent = scene.insert(
            None,
            LocalNode {
                sizing: Sizing::Fixed(Size::new(300.0, 200.0)),
                ..Default::default()
            },
        );
        let mut flourish = FlourishBuilder::new(&scene, parent)
            .expect("overlay parent")
            .panel_layout(LocalNode::default())
            .orientation(orientation)
            .duration_ms(100)
            .build(&mut scene)
            .expect("panel layout is set");
        scene.layout();
        let _ = flourish.on_parent_laid_out(&mut scene);
        let _ = scene.commit();
        let resolved = orientation.resolve(Size::new(300.0, 200.0));

        println!(
            "{orientation:?}: pivot ({}, {}), sweep {:+}°",
            resolved.pivot.x, resolved.pivot.y, resolved.sweep_degrees
        );
        println!("  hidden   {}", fmt_rect(scene.world_bounds(flourish.panel())));

        flourish.show(&mut scene);
        let _ = flourish.tick(&mut scene, Duration::from_millis(50));
        let _ = scene.commit();
        println!("  halfway  {}", fmt_rect(scene.world_bounds(flourish.panel())));

        while flourish.tick(&mut scene, Duration::from_millis(16)) {}
        let _ = scene.commit();
        println!("  shown    {}", fmt_rect(scene.world_bounds(flourish.panel())));
    }
}
