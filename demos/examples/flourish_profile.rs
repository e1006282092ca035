// Copyright 2025 the Flourish Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A profile panel that bounces into view over a screen.
//!
//! The panel is shown as soon as the screen is laid out. A click on the panel
//! dismisses it; a click on the content below brings it back. The frame loop is
//! simulated at 60 fps and prints the panel rotation every few frames.
//!
//! Run:
//! - `cargo run -p flourish_demos --example flourish_profile`
//! - `RUST_LOG=flourish=debug cargo run -p flourish_demos --example flourish_profile`

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use flourish::{AnimationCurve, FlourishBuilder, Orientation};
use flourish_scene::{LocalNode, QueryFilter, Scene, Sizing};
use kurbo::{Point, Size};
use tracing_subscriber::EnvFilter;

const FRAME: Duration = Duration::from_nanos(16_666_667);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut scene = Scene::new();
    let screen = scene.insert(
        None,
        LocalNode {
            sizing: Sizing::Fixed(Size::new(360.0, 640.0)),
            ..Default::default()
        },
    );
    let content = scene.insert(Some(screen), LocalNode::default());

    let clicked = Rc::new(Cell::new(false));
    let on_click = clicked.clone();
    let mut flourish = FlourishBuilder::new(&scene, screen)
        .expect("screen arranges children as an overlay")
        .panel_layout(LocalNode::default())
        .orientation(Orientation::TopLeft)
        .curve(AnimationCurve::Bounce)
        .duration_ms(600)
        .show_on_start(true)
        .on_click(move || on_click.set(true))
        .on_changed(|shown| println!("  panel {}", if shown { "shown" } else { "dismissed" }))
        .build(&mut scene)
        .expect("panel layout is set");

    // Clicks scripted by frame number.
    let clicks = [70_usize, 90, 150, 200];
    let center = Point::new(180.0, 320.0);
    let filter = QueryFilter {
        visible_only: true,
        pickable_only: true,
    };

    for frame in 0..260 {
        if !flourish.is_laid_out() {
            scene.layout();
            let _ = flourish.on_parent_laid_out(&mut scene);
        }

        if clicks.contains(&frame) {
            let target = scene.hit_test_point(center, filter).map(|h| h.node);
            if target == Some(flourish.panel()) && flourish.click() && clicked.replace(false) {
                println!("frame {frame:3}: click on panel, dismissing");
                flourish.dismiss(&mut scene);
            } else if target == Some(content) {
                println!("frame {frame:3}: click on content, showing");
                flourish.show(&mut scene);
            } else {
                println!("frame {frame:3}: click ignored ({:?})", flourish.state());
            }
        }

        let running = flourish.tick(&mut scene, FRAME);
        let damage = scene.commit();
        if running && frame % 6 == 0 {
            let rotation = scene.local(flourish.panel()).map_or(0.0, |n| n.rotation);
            let area = damage.union_rect().map_or(0.0, |r| r.area());
            println!(
                "frame {frame:3}: {:<10} rotation {rotation:7.2}°  damage {area:9.0}",
                format!("{:?}", flourish.state()),
            );
        }
    }

    println!("final: visible = {}", flourish.is_visible());
}
