//! Marksman aim correction — перезапись baseline прицела
//!
//! Работает сразу после launch_projectiles в том же тике: снаряд ещё не
//! сделал ни одного шага полёта. Направление пересчитывается aim solver'ом
//! (упреждение + разброс), модуль скорости сохраняется как есть.
//!
//! Gates (любой провал — baseline velocity остаётся нетронутым):
//! - снаряд — стрела (Missile/Flame наводятся своей логикой)
//! - стрелок несёт DesignatedMarksman marker
//! - цель существует и жива
//! - скорость снаряда ненулевая

use bevy::prelude::*;

use crate::aim::{compute_aim_vector, AimProfile};
use crate::components::{DesignatedMarksman, Health, MovementState};
use crate::DeterministicRng;
use super::projectile::{Projectile, ProjectileKind, ProjectileLaunched};

/// Глобальная конфигурация aim assist (process-wide, immutable после старта)
#[derive(Resource, Debug, Clone, Default)]
pub struct AimAssistConfig {
    pub profile: AimProfile,
}

/// System: коррекция прицела для designated marksmen
pub fn improve_marksman_aim(
    mut launch_events: EventReader<ProjectileLaunched>,
    mut projectiles: Query<&mut Projectile>,
    marksmen: Query<(), With<DesignatedMarksman>>,
    shooters: Query<&Transform>,
    targets: Query<(&Transform, &MovementState, &Health)>,
    config: Res<AimAssistConfig>,
    mut rng: ResMut<DeterministicRng>,
) {
    for event in launch_events.read() {
        // Assist только для стрел
        if event.kind != ProjectileKind::Arrow {
            continue;
        }

        // Identity gate: кто marksman решает spawn код, не combat системы
        if !marksmen.contains(event.shooter) {
            continue;
        }

        let Ok(shooter_transform) = shooters.get(event.shooter) else {
            continue;
        };

        let Ok((target_transform, target_motion, target_health)) = targets.get(event.target)
        else {
            continue;
        };

        if !target_health.is_alive() {
            continue;
        }

        let Ok(mut projectile) = projectiles.get_mut(event.projectile) else {
            continue;
        };

        let speed = projectile.velocity.length();
        if speed <= 0.0 {
            continue;
        }

        let improved = compute_aim_vector(
            shooter_transform.translation,
            target_transform.translation,
            target_motion,
            &config.profile,
            &mut rng.rng,
        );

        // Degenerate геометрия → solver вернул "no direction", пропускаем
        if improved == Vec3::ZERO {
            continue;
        }

        // Новое направление, прежний модуль скорости
        projectile.velocity = improved * speed;

        crate::log(&format!(
            "Marksman {:?}: arrow {:?} re-aimed at {:?}",
            event.shooter, event.projectile, event.target
        ));
    }
}
