//! Движение акторов: интеграция MovementState → Transform
//!
//! Headless кинематика без коллайдеров: planar шаг по heading на фиксированных
//! скоростях WALK_SPEED/RUN_SPEED. Те же константы использует aim solver для
//! упреждения — прямолинейно движущаяся цель предсказывается точно.

use bevy::prelude::*;

use crate::aim::{heading_direction, RUN_SPEED, WALK_SPEED};
use crate::combat::Dead;
use crate::components::MovementState;

/// Planar перемещение за dt (Z не меняется)
pub fn planar_step(state: &MovementState, dt: f32) -> Vec3 {
    if !state.is_moving {
        return Vec3::ZERO;
    }

    let speed = if state.is_running { RUN_SPEED } else { WALK_SPEED };
    heading_direction(state.heading_radians) * speed * dt
}

/// Система: интеграция движения (FixedUpdate)
///
/// Мёртвые не ходят.
pub fn apply_movement(
    mut query: Query<(&MovementState, &mut Transform), Without<Dead>>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();

    for (state, mut transform) in query.iter_mut() {
        if state.is_moving {
            transform.translation += planar_step(state, dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stationary_step_is_zero() {
        let step = planar_step(&MovementState::stationary(), 1.0);
        assert_eq!(step, Vec3::ZERO);
    }

    #[test]
    fn test_walking_step_along_heading() {
        // heading 0 = +Y
        let step = planar_step(&MovementState::walking(0.0), 1.0);
        assert!((step - Vec3::new(0.0, WALK_SPEED, 0.0)).length() < 1e-4);

        // heading π/2 = +X
        let step = planar_step(&MovementState::walking(std::f32::consts::FRAC_PI_2), 1.0);
        assert!((step - Vec3::new(WALK_SPEED, 0.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn test_running_is_faster_than_walking() {
        let walk = planar_step(&MovementState::walking(1.0), 0.5);
        let run = planar_step(&MovementState::running(1.0), 0.5);

        assert!((run.length() - RUN_SPEED * 0.5).abs() < 1e-3);
        assert!(run.length() > walk.length());
        assert_eq!(walk.z, 0.0); // шаг строго planar
    }
}
