//! Octahedral normal encoding.
//!
//! A unit vector is projected onto the octahedron `|x| + |y| + |z| = 1` and
//! the upper half is read off directly as `(x, y)`. The lower half has to be
//! folded outward over the diamond's edges to land in the corners of the
//! `[-1, 1]` square.

use glam::{Vec2, Vec3};

/// Compress a unit vector to two components.
///
/// The upper hemisphere (`z > 0`) maps to the inner diamond of the unit
/// square and round-trips exactly through [`decode`].
///
/// On the lower hemisphere (`z <= 0`) the folded `y` value is written to
/// *both* output components. The `x` information is lost there, so [`decode`]
/// does not recover the input. Baked outline data depends on this exact
/// layout; use [`encode_standard`] when a full-sphere round trip is needed.
#[must_use]
pub fn encode(v: Vec3) -> Vec2 {
    let oct = v.truncate() / (v.x.abs() + v.y.abs() + v.z.abs());
    if v.z > 0.0 {
        return oct;
    }
    let folded = (1.0 - oct.y.abs()) * sign(oct.y);
    Vec2::splat(folded)
}

/// Compress a unit vector to two components with the standard fold.
///
/// `x' = (1 - |y|) * sign(x)` and `y' = (1 - |x|) * sign(y)` on the lower
/// hemisphere. Inverse of [`decode`] over the whole sphere.
#[must_use]
pub fn encode_standard(v: Vec3) -> Vec2 {
    let oct = v.truncate() / (v.x.abs() + v.y.abs() + v.z.abs());
    if v.z >= 0.0 {
        return oct;
    }
    Vec2::new(
        (1.0 - oct.y.abs()) * sign_not_zero(oct.x),
        (1.0 - oct.x.abs()) * sign_not_zero(oct.y),
    )
}

/// Expand a two-component octahedral coordinate back to a unit vector.
#[must_use]
pub fn decode(e: Vec2) -> Vec3 {
    let mut n = Vec3::new(e.x, e.y, 1.0 - e.x.abs() - e.y.abs());
    let t = (-n.z).max(0.0);
    n.x -= t * sign_not_zero(n.x);
    n.y -= t * sign_not_zero(n.y);
    n.normalize()
}

/// Remap an encoded coordinate from `[-1, 1]` to `[0, 1]`.
#[must_use]
pub fn to_unorm(e: Vec2) -> Vec2 {
    e * 0.5 + 0.5
}

/// Remap a stored coordinate from `[0, 1]` back to `[-1, 1]`.
#[must_use]
pub fn from_unorm(e: Vec2) -> Vec2 {
    e * 2.0 - 1.0
}

/// Three-way sign: zero stays zero.
#[inline]
fn sign(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[inline]
fn sign_not_zero(x: f32) -> f32 {
    if x >= 0.0 { 1.0 } else { -1.0 }
}
