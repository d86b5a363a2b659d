//! Walks an eight-legged body around and prints its leg geometry.
//!
//! Stands in for a renderer: everything printed here is exactly the data a
//! visualization layer would draw as lines and points.

use glam::Vec3;
use skitter_rig::{Body, MoveIntent};

fn main() {
    env_logger::init();

    let mut body = Body::new(Vec3::new(0.0, 1.0, 0.0));
    let dt = 1.0 / 60.0;

    // Two seconds forward, then one second strafing right.
    for frame in 0..180u32 {
        let intent = if frame < 120 {
            MoveIntent {
                forward: true,
                ..Default::default()
            }
        } else {
            MoveIntent {
                right: true,
                ..Default::default()
            }
        };
        body.update(dt, intent);

        if frame % 30 == 0 {
            println!("t={:.2}s body={:.2}", frame as f32 * dt, body.position);
            for (i, view) in body.leg_views().iter().enumerate() {
                let state = if body.legs[i].planted() {
                    "planted"
                } else {
                    "stepping"
                };
                println!("  leg {i}: foot={:.2} rest={:.2} {state}", view.foot, view.rest);
            }
        }
    }
}
