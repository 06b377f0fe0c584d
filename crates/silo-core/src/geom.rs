//! Integer trajectory and blast-volume geometry.
//!
//! Everything here is exact integer math: the octagonal distance
//! approximation and increment division reproduce the hardware's
//! routines, so trajectories are identical tick for tick.

use crate::constants::{OCTAGON_SLOPE_DEN, OCTAGON_SLOPE_NUM};
use crate::fixed::Fx;
use crate::types::Point;

/// Fast octagonal distance approximation, capped at 255:
/// `max(|dx|, |dy|) + 3/8 * min(|dx|, |dy|)`.
pub fn distance_approx(a: Point, b: Point) -> i32 {
    let mut dx = (b.x - a.x).abs();
    let mut dy = (b.y - a.y).abs();
    if dx < dy {
        std::mem::swap(&mut dx, &mut dy);
    }
    (dx + ((3 * dy) >> 3)).min(255)
}

/// Per-frame 8.8 increment vector from `origin` toward `target` at
/// `speed` units per frame.
///
/// Divides each axis delta by the approximate distance, scaled by
/// speed. Floor division matches the reference for negative deltas.
/// A zero distance yields a zero vector; callers treat that as an
/// immediate arrival.
pub fn increments(origin: Point, target: Point, speed: i32) -> (Fx, Fx) {
    let dist = distance_approx(origin, target);
    if dist == 0 {
        return (Fx::ZERO, Fx::ZERO);
    }
    let dx = target.x - origin.x;
    let dy = target.y - origin.y;
    let x_inc = (dx * speed * Fx::SCALE).div_euclid(dist);
    let y_inc = (dy * speed * Fx::SCALE).div_euclid(dist);
    (Fx::from_raw(x_inc), Fx::from_raw(y_inc))
}

/// True when a missile at pixel position `pos` has reached or passed
/// `target` given its increment signs.
///
/// The test is per-axis: crossing the target coordinate on either axis
/// counts as arrival. Exact precision is not required; this mirrors
/// the hardware's arrival check.
pub fn passed_target(pos: Point, target: Point, x_inc: Fx, y_inc: Fx) -> bool {
    if x_inc.raw() > 0 && pos.x >= target.x {
        return true;
    }
    if x_inc.raw() < 0 && pos.x <= target.x {
        return true;
    }
    if y_inc.raw() > 0 && pos.y >= target.y {
        return true;
    }
    if y_inc.raw() < 0 && pos.y <= target.y {
        return true;
    }
    false
}

/// True if `p` lies inside the blast octagon centered at `center` with
/// the given radius.
///
/// The octagon is the axis-aligned square `|dx| <= r`, `|dy| <= r`
/// with corners chamfered at the 3/8 slope:
/// `|dx| + |dy| <= r + floor(3r/8)`. The chamfer corners sit at
/// `(r, floor(3r/8))` and its reflections.
pub fn point_in_octagon(p: Point, center: Point, radius: i32) -> bool {
    if radius <= 0 {
        return false;
    }
    let dx = (p.x - center.x).abs();
    let dy = (p.y - center.y).abs();
    if dx > radius || dy > radius {
        return false;
    }
    let cut = (radius * OCTAGON_SLOPE_NUM) / OCTAGON_SLOPE_DEN;
    dx + dy <= radius + cut
}
