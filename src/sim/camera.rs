//! Deadzone camera
//!
//! Horizontal only. The camera snaps (no smoothing) so the player's screen x
//! stays inside the deadzone, and never scrolls left of the world start.

use super::state::Camera;

/// Scroll the camera so `player_x` sits inside the deadzone
pub fn follow(camera: &mut Camera, player_x: f32) {
    let screen_x = camera.screen_x(player_x);
    if screen_x > camera.deadzone_right {
        camera.x = player_x - camera.deadzone_right;
    } else if screen_x < camera.deadzone_left && camera.x > 0.0 {
        camera.x = (player_x - camera.deadzone_left).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use proptest::prelude::*;

    fn camera() -> Camera {
        Camera::new(&Settings::default())
    }

    #[test]
    fn test_no_scroll_inside_deadzone() {
        let mut cam = camera();
        follow(&mut cam, 300.0);
        assert_eq!(cam.x, 0.0);
    }

    #[test]
    fn test_scrolls_right_exactly_to_bound() {
        let mut cam = camera();
        follow(&mut cam, 500.0);
        assert_eq!(cam.x, 20.0);
        assert_eq!(cam.screen_x(500.0), cam.deadzone_right);
        assert_eq!(cam.screen_x(500.0), 480.0);
    }

    #[test]
    fn test_retreats_but_never_negative() {
        let mut cam = camera();
        cam.x = 100.0;
        follow(&mut cam, 300.0);
        assert_eq!(cam.x, 60.0);

        follow(&mut cam, 20.0);
        assert_eq!(cam.x, 0.0);
    }

    #[test]
    fn test_no_retreat_at_world_start() {
        let mut cam = camera();
        follow(&mut cam, 16.0);
        assert_eq!(cam.x, 0.0);
    }

    proptest! {
        #[test]
        fn prop_rightward_motion_never_rewinds_camera(
            steps in prop::collection::vec(0.0f32..20.0, 1..200),
        ) {
            let mut cam = camera();
            let mut x = 16.0;
            let mut engaged = false;
            for dx in steps {
                let before = cam.x;
                x += dx;
                follow(&mut cam, x);
                prop_assert!(cam.x >= before);
                engaged |= cam.x > 0.0;
                if engaged {
                    prop_assert!(cam.screen_x(x) <= cam.deadzone_right + 1e-3);
                }
            }
        }
    }
}
