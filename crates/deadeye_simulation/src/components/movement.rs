//! Movement компоненты: текущее состояние перемещения актора

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Состояние перемещения актора (walk/run + heading)
///
/// Пишется AI системой (`ai_movement_from_state`), читается:
/// - `apply_movement` — интеграция в Transform
/// - aim solver — прогноз упреждения по движущейся цели
///
/// Инвариант: solver и `apply_movement` используют одни и те же константы
/// скоростей (WALK_SPEED/RUN_SPEED), поэтому прогноз по прямолинейной цели
/// точен.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct MovementState {
    /// Двигается ли актор в этом тике
    pub is_moving: bool,

    /// Направление движения (radians, 0 = +Y, по часовой к +X)
    pub heading_radians: f32,

    /// Бег (RUN_SPEED) или ходьба (WALK_SPEED)
    pub is_running: bool,
}

impl Default for MovementState {
    fn default() -> Self {
        Self::stationary()
    }
}

impl MovementState {
    /// Стоим на месте
    pub fn stationary() -> Self {
        Self {
            is_moving: false,
            heading_radians: 0.0,
            is_running: false,
        }
    }

    /// Идём в направлении heading
    pub fn walking(heading_radians: f32) -> Self {
        Self {
            is_moving: true,
            heading_radians,
            is_running: false,
        }
    }

    /// Бежим в направлении heading
    pub fn running(heading_radians: f32) -> Self {
        Self {
            is_moving: true,
            heading_radians,
            is_running: true,
        }
    }
}
