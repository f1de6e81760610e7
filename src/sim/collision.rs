//! Collision detection and response for the player
//!
//! Only the player is ever resolved against the world. Everything else moves
//! on rails and never collides with anything.

use super::aabb::Aabb;

/// Strict open-interval overlap of two boxes (symmetric; touching edges miss)
#[inline]
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    a.overlaps(b)
}

/// Result of resolving the player against platform tops
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundContact {
    /// Whether any platform overlapped the player this tick
    pub on_ground: bool,
    /// Top of the platform the player was snapped onto (last overlap wins)
    pub surface_y: f32,
}

impl GroundContact {
    pub fn airborne() -> Self {
        Self {
            on_ground: false,
            surface_y: 0.0,
        }
    }
}

/// Snap the player on top of every overlapping platform.
///
/// Any overlap counts as standing on it: the player is placed so its bottom
/// rests on the platform top and vertical velocity is cleared. Platforms are
/// visited in order and each hit reassigns the position, so the last one
/// wins when several overlap at once. Overlap is tested against the box as
/// it was snapped by the previous hit.
pub fn resolve_ground<'a, I>(player: &mut Aabb, vel_y: &mut f32, platforms: I) -> GroundContact
where
    I: IntoIterator<Item = &'a Aabb>,
{
    let mut contact = GroundContact::airborne();
    for platform in platforms {
        if overlaps(player, platform) {
            player.pos.y = platform.top() - player.height();
            *vel_y = 0.0;
            contact = GroundContact {
                on_ground: true,
                surface_y: platform.top(),
            };
        }
    }
    contact
}

/// Index of the first box in `others` that overlaps `subject`
pub fn first_overlap<'a, I>(subject: &Aabb, others: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a Aabb>,
{
    others.into_iter().position(|other| overlaps(subject, other))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlaps_symmetric() {
        let a = Aabb::new(0.0, 0.0, 30.0, 30.0);
        let b = Aabb::new(20.0, 25.0, 10.0, 10.0);
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
    }

    #[test]
    fn test_touching_edge_is_not_overlap() {
        let a = Aabb::new(0.0, 0.0, 30.0, 30.0);
        let right = Aabb::new(30.0, 0.0, 10.0, 10.0);
        let below = Aabb::new(0.0, 30.0, 10.0, 10.0);
        assert!(!overlaps(&a, &right));
        assert!(!overlaps(&right, &a));
        assert!(!overlaps(&a, &below));
    }

    #[test]
    fn test_resolve_ground_snaps_onto_platform() {
        let mut player = Aabb::new(10.0, 475.0, 30.0, 30.0);
        let mut vel_y = 6.0;
        let platforms = [Aabb::new(0.0, 500.0, 300.0, 40.0)];

        let contact = resolve_ground(&mut player, &mut vel_y, &platforms);
        assert!(contact.on_ground);
        assert_eq!(contact.surface_y, 500.0);
        assert_eq!(player.y(), 470.0);
        assert_eq!(vel_y, 0.0);
    }

    #[test]
    fn test_resolve_ground_miss_leaves_player() {
        let mut player = Aabb::new(400.0, 100.0, 30.0, 30.0);
        let mut vel_y = 3.0;
        let platforms = [Aabb::new(0.0, 500.0, 300.0, 40.0)];

        let contact = resolve_ground(&mut player, &mut vel_y, &platforms);
        assert!(!contact.on_ground);
        assert_eq!(player.y(), 100.0);
        assert_eq!(vel_y, 3.0);
    }

    #[test]
    fn test_resolve_ground_last_overlap_wins() {
        // Two platforms overlapping the player at different heights: the
        // second hit re-snaps only if it still overlaps after the first snap.
        let mut player = Aabb::new(0.0, 490.0, 30.0, 30.0);
        let mut vel_y = 1.0;
        let platforms = [
            Aabb::new(0.0, 500.0, 100.0, 40.0),
            Aabb::new(0.0, 495.0, 100.0, 40.0),
        ];

        let contact = resolve_ground(&mut player, &mut vel_y, &platforms);
        assert!(contact.on_ground);
        assert_eq!(contact.surface_y, 495.0);
        assert_eq!(player.y(), 465.0);
    }

    #[test]
    fn test_first_overlap() {
        let player = Aabb::new(100.0, 100.0, 30.0, 30.0);
        let others = [
            Aabb::new(0.0, 0.0, 10.0, 10.0),
            Aabb::new(110.0, 110.0, 35.0, 35.0),
            Aabb::new(120.0, 120.0, 35.0, 35.0),
        ];
        assert_eq!(first_overlap(&player, &others), Some(1));
        assert_eq!(first_overlap(&player, &others[..1]), None);
    }
}
