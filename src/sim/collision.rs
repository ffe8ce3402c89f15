//! Pointer hit tests
//!
//! Every pointer-move sample runs these against all live targets or nodes,
//! so they stay allocation-free and linear in the entity count.

use glam::Vec2;

use super::state::PathNode;

/// Axis-aligned box test: `point` lies strictly within `half_extent` of `center` on both axes
#[inline]
pub fn box_hit(point: Vec2, center: Vec2, half_extent: f32) -> bool {
    (point.x - center.x).abs() < half_extent && (point.y - center.y).abs() < half_extent
}

/// Circular capture test (inclusive)
#[inline]
pub fn within_radius(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance_squared(center) <= radius * radius
}

/// Closest node whose capture circle contains `point`
pub fn node_under(point: Vec2, nodes: &[PathNode], radius: f32) -> Option<&PathNode> {
    nodes
        .iter()
        .filter(|n| within_radius(point, n.pos, radius))
        .min_by(|a, b| {
            a.pos
                .distance_squared(point)
                .partial_cmp(&b.pos.distance_squared(point))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Self-crossing heuristic for a traced path.
///
/// Flags `point` when it lands within `epsilon` of any recorded sample except
/// the `skip_recent` newest ones (the live stroke always sits next to those).
/// This approximates segment intersection; a fast stroke can slip between
/// two old samples without being flagged.
pub fn crosses_own_path(path: &[Vec2], point: Vec2, skip_recent: usize, epsilon: f32) -> bool {
    if path.len() <= skip_recent {
        return false;
    }
    let eps_sq = epsilon * epsilon;
    path[..path.len() - skip_recent]
        .iter()
        .any(|p| p.distance_squared(point) < eps_sq)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_hit_is_axis_aligned() {
        let center = Vec2::new(50.0, 50.0);
        // Corner of the box: outside a radius-10 circle but inside the box
        assert!(box_hit(Vec2::new(57.0, 57.0), center, 10.0));
        assert!(!within_radius(Vec2::new(57.0, 57.0), center, 9.0));
        // Edge is exclusive
        assert!(!box_hit(Vec2::new(60.0, 50.0), center, 10.0));
        assert!(!box_hit(Vec2::new(50.0, 39.0), center, 10.0));
    }

    #[test]
    fn test_node_under_picks_closest() {
        let nodes = [
            PathNode {
                id: 1,
                pos: Vec2::new(20.0, 20.0),
            },
            PathNode {
                id: 2,
                pos: Vec2::new(26.0, 20.0),
            },
        ];
        let hit = node_under(Vec2::new(24.0, 20.0), &nodes, 6.0);
        assert_eq!(hit.map(|n| n.id), Some(2));
        assert!(node_under(Vec2::new(80.0, 80.0), &nodes, 6.0).is_none());
    }

    #[test]
    fn test_crossing_ignores_recent_samples() {
        let path: Vec<Vec2> = (0..15).map(|i| Vec2::new(i as f32, 0.0)).collect();

        // Right on top of the newest samples: not a crossing
        assert!(!crosses_own_path(&path, Vec2::new(14.0, 0.0), 10, 1.0));
        // Back onto an old sample: crossing
        assert!(crosses_own_path(&path, Vec2::new(2.2, 0.3), 10, 1.0));
        // Short path is never checked
        assert!(!crosses_own_path(&path[..8], Vec2::new(0.0, 0.0), 10, 1.0));
    }
}
