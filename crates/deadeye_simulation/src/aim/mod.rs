//! Aim solver — target leading + bounded random deviation
//!
//! Чистая геометрия без ECS state:
//! - AimProfile (конфигурация меткости, process-wide)
//! - compute_aim_vector (позиция → unit direction с упреждением и разбросом)
//! - heading helpers (2D heading convention, общая с movement системами)
//!
//! RNG передаётся параметром (`&mut impl Rng`) — solver не владеет
//! генератором, детерминизм контролирует caller (DeterministicRng resource
//! в симуляции, seeded ChaCha8Rng в тестах).

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::components::MovementState;


/// Высота хвата оружия над origin стрелка (units)
pub const WEAPON_HEIGHT_OFFSET: f32 = 120.0;

/// Высота центра массы (грудь) над origin цели (units)
pub const CENTER_MASS_OFFSET: f32 = 80.0;

/// Скорость бега цели для прогноза упреждения (units/s)
pub const RUN_SPEED: f32 = 300.0;

/// Скорость ходьбы цели для прогноза упреждения (units/s)
pub const WALK_SPEED: f32 = 150.0;

/// Порог скорости: медленнее — считаем цель стоящей (units/s)
pub const MOVEMENT_EPSILON: f32 = 10.0;

/// Масштаб случайного отклонения при худшей меткости (radians)
pub const MAX_DEVIATION_RADIANS: f32 = 0.05;

/// Параметры меткости стрелка (process-wide, immutable после старта)
///
/// Живёт внутри [`crate::combat::AimAssistConfig`] resource.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AimProfile {
    /// Базовый бонус меткости, 0..1
    pub base_accuracy_bonus: f32,

    /// Дальше этой дистанции assist отключается (units)
    pub max_effective_range: f32,

    /// Сколько упреждения брать по движущейся цели, >= 0
    /// (1.0 = полное, 0.0 = стрелять в текущую позицию)
    pub prediction_factor: f32,

    /// Скорость снаряда для расчёта времени полёта (units/s)
    pub projectile_speed: f32,
}

impl Default for AimProfile {
    fn default() -> Self {
        Self {
            base_accuracy_bonus: 0.7,
            max_effective_range: 4096.0,
            prediction_factor: 0.8,
            projectile_speed: 3000.0,
        }
    }
}

/// Unit direction вектор от оружия стрелка к (возможно упреждённой) груди цели.
///
/// Алгоритм:
/// 1. Анатомические поправки: оружие +120 по Z, грудь цели +80 по Z.
/// 2. distance > max_effective_range → обычный (unassisted) прицел:
///    normalized raw вектор, без упреждения и разброса. RNG не трогаем.
///    Граница inclusive: distance == range ещё получает assist.
/// 3. Движущаяся цель → линейное упреждение constant-velocity:
///    lead = velocity * (distance / projectile_speed) * prediction_factor.
///    Прогноз сознательно игнорирует гравитацию и баллистику — углы малые,
///    дистанции в пределах effective range.
/// 4. Случайное отклонение: малый поворот вокруг случайной оси через
///    first-order приближение v += (v × axis) * sin(angle). Угол ограничен
///    MAX_DEVIATION_RADIANS * (1 - base_accuracy_bonus).
///
/// Degenerate входы (нулевые векторы) не ошибка: возвращаем Vec3::ZERO,
/// caller пропускает применение. Функция никогда не паникует.
pub fn compute_aim_vector(
    shooter_pos: Vec3,
    target_pos: Vec3,
    target_motion: &MovementState,
    profile: &AimProfile,
    rng: &mut impl Rng,
) -> Vec3 {
    let muzzle = shooter_pos + Vec3::new(0.0, 0.0, WEAPON_HEIGHT_OFFSET);
    let mut aim_point = target_pos + Vec3::new(0.0, 0.0, CENTER_MASS_OFFSET);

    let mut aim_vector = aim_point - muzzle;
    let distance = aim_vector.length();

    if distance > profile.max_effective_range {
        // Вне effective range — стандартный прицел, policy branch
        return aim_vector.normalize_or_zero();
    }

    if target_motion.is_moving {
        let speed = if target_motion.is_running {
            RUN_SPEED
        } else {
            WALK_SPEED
        };
        let velocity = heading_direction(target_motion.heading_radians) * speed;

        if velocity.length() > MOVEMENT_EPSILON {
            let time_to_target = distance / profile.projectile_speed;
            aim_point += velocity * time_to_target * profile.prediction_factor;

            // distance для accuracy_factor НЕ пересчитываем после упреждения
            aim_vector = aim_point - muzzle;
        }
    }

    let mut aim_dir = aim_vector.normalize_or_zero();

    let deviation = deviation_angle(distance, profile);

    // Ось рисуем всегда (внутри effective range) — порядок draw'ов стабилен
    let axis = random_deviation_axis(rng);

    if deviation > 0.0 {
        if let Some(axis) = axis {
            // First-order small-angle rotation, валидно только для малых углов
            aim_dir = (aim_dir + aim_dir.cross(axis) * deviation.sin()).normalize_or_zero();
        }
    }

    aim_dir
}

/// Фактор меткости на дистанции: base + (1 - base) * (distance / max_range).
///
/// Растёт с дистанцией: у max range фактор = 1.0 (нулевой разброс), вплотную
/// остаётся только base bonus.
pub fn accuracy_factor(distance: f32, profile: &AimProfile) -> f32 {
    profile.base_accuracy_bonus
        + (1.0 - profile.base_accuracy_bonus) * (distance / profile.max_effective_range)
}

/// Угол случайного отклонения на дистанции (radians)
///
/// Всегда в [0, MAX_DEVIATION_RADIANS * (1 - base_accuracy_bonus)].
pub fn deviation_angle(distance: f32, profile: &AimProfile) -> f32 {
    (1.0 - accuracy_factor(distance, profile)) * MAX_DEVIATION_RADIANS
}

/// Случайная unit ось поворота: компоненты uniform в [-1, 1]
///
/// None если выпал нулевой вектор (вероятность ~0, но не паникуем).
fn random_deviation_axis(rng: &mut impl Rng) -> Option<Vec3> {
    let axis = Vec3::new(
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
    );

    (axis.length() > 0.0).then(|| axis.normalize())
}

/// 2D heading → planar forward: (sin h, cos h, 0). Z-up, heading 0 = +Y.
pub fn heading_direction(heading_radians: f32) -> Vec3 {
    Vec3::new(heading_radians.sin(), heading_radians.cos(), 0.0)
}

/// Planar направление → heading. Инверсия heading_direction.
pub fn heading_from_direction(direction: Vec3) -> f32 {
    direction.x.atan2(direction.y)
}
