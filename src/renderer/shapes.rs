//! Shape generation for the teleport guide meshes

use glam::Vec3;
use std::f32::consts::PI;

use crate::sim::Geometry;

/// Flat ribbon following a polyline, facing up where possible
///
/// Two triangles per segment. Fewer than two points yields empty geometry.
pub fn ribbon(points: &[Vec3], width: f32) -> Geometry {
    if points.len() < 2 {
        return Geometry::default();
    }

    let half = width * 0.5;
    let mut positions = Vec::with_capacity(points.len() * 2);
    let mut indices = Vec::with_capacity((points.len() - 1) * 2);

    for (i, p) in points.iter().enumerate() {
        // Direction from the neighbouring points
        let prev = points[i.saturating_sub(1)];
        let next = points[(i + 1).min(points.len() - 1)];
        let dir = (next - prev).normalize_or_zero();
        // Side vector perpendicular to travel, horizontal
        let mut side = dir.cross(Vec3::Y).normalize_or_zero();
        if side == Vec3::ZERO {
            // Straight up/down segment
            side = Vec3::X;
        }
        positions.push(*p + side * half);
        positions.push(*p - side * half);
    }

    for i in 0..points.len() as u32 - 1 {
        let a = i * 2;
        // Two triangles per segment
        indices.push([a, a + 1, a + 2]);
        indices.push([a + 2, a + 1, a + 3]);
    }

    Geometry::new(positions, indices)
}

/// Closed cylinder standing on the origin, `height` tall along +y
pub fn cylinder(radius: f32, height: f32, segments: u32) -> Geometry {
    let segments = segments.max(3);
    let mut positions = Vec::with_capacity(segments as usize * 2 + 2);
    let mut indices = Vec::with_capacity(segments as usize * 4);

    for i in 0..segments {
        let theta = (i as f32 / segments as f32) * 2.0 * PI;
        let (x, z) = (radius * theta.cos(), radius * theta.sin());
        positions.push(Vec3::new(x, 0.0, z));
        positions.push(Vec3::new(x, height, z));
    }
    let bottom_center = positions.len() as u32;
    positions.push(Vec3::ZERO);
    let top_center = positions.len() as u32;
    positions.push(Vec3::new(0.0, height, 0.0));

    for i in 0..segments {
        let lo1 = i * 2;
        let hi1 = lo1 + 1;
        let lo2 = ((i + 1) % segments) * 2;
        let hi2 = lo2 + 1;

        // Side quad
        indices.push([lo1, hi1, lo2]);
        indices.push([lo2, hi1, hi2]);
        // Caps
        indices.push([bottom_center, lo1, lo2]);
        indices.push([top_center, hi2, hi1]);
    }

    Geometry::new(positions, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ribbon_counts() {
        let points = [Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, -0.5, -2.0)];
        let g = ribbon(&points, 0.1);
        assert_eq!(g.positions.len(), 6);
        assert_eq!(g.indices.len(), 4);
        assert_eq!(g.triangles().count(), 4);
    }

    #[test]
    fn test_ribbon_width() {
        let g = ribbon(&[Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0)], 0.2);
        let d = g.positions[0].distance(g.positions[1]);
        assert!((d - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_ribbon_too_short() {
        assert!(ribbon(&[Vec3::ZERO], 0.1).is_empty());
    }

    #[test]
    fn test_vertical_ribbon_has_width() {
        let g = ribbon(&[Vec3::ZERO, Vec3::Y], 0.2);
        assert!(g.positions[0].distance(g.positions[1]) > 0.19);
    }

    #[test]
    fn test_cylinder_bounds() {
        let g = cylinder(0.5, 0.1, 16);
        let b = g.bounds().unwrap();
        assert!((b.max.x - 0.5).abs() < 1e-5);
        assert!((b.min.y).abs() < 1e-6);
        assert!((b.max.y - 0.1).abs() < 1e-6);
        assert_eq!(g.indices.len(), 64);
    }
}
