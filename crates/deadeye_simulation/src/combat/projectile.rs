//! Projectile lifecycle: spawn → flight → hit/despawn
//!
//! Снаряды полностью живут в ECS (headless): kinematic интеграция без
//! коллайдеров, попадание — сфера вокруг груди цели. Baseline прицел при
//! запуске — прямая на грудь цели без упреждения; marksman correction
//! (combat::marksman) перезаписывает направление до первого шага полёта.

use bevy::prelude::*;

use crate::aim::{CENTER_MASS_OFFSET, WEAPON_HEIGHT_OFFSET};
use crate::components::{Actor, Health};
use super::weapon::WeaponFired;

/// Радиус попадания вокруг груди цели (units)
pub const HIT_RADIUS: f32 = 64.0;

/// Дальность, после которой снаряд исчезает (units)
pub const MAX_FLIGHT_RANGE: f32 = 8192.0;

/// Тип снаряда
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ProjectileKind {
    /// Стрела — единственный тип с aim assist
    Arrow,
    /// Самонаводящийся снаряд (своя логика наведения, assist не нужен)
    Missile,
    /// Огненный сгусток
    Flame,
}

/// Снаряд в полёте
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Projectile {
    /// Кто выстрелил (для предотвращения self-hit)
    pub shooter: Entity,

    /// Тип снаряда
    pub kind: ProjectileKind,

    /// Текущая скорость (direction * speed, units/s)
    pub velocity: Vec3,

    /// Урон при попадании
    pub damage: u32,

    /// Пройденная дистанция (units)
    pub traveled: f32,
}

/// Event: снаряд запущен (baseline velocity уже рассчитан)
///
/// Читается marksman correction системой в том же тике, до полёта.
#[derive(Event, Debug, Clone)]
pub struct ProjectileLaunched {
    /// Entity снаряда
    pub projectile: Entity,

    /// Кто выстрелил
    pub shooter: Entity,

    /// В кого
    pub target: Entity,

    /// Тип снаряда
    pub kind: ProjectileKind,
}

/// Event: снаряд попал в цель
#[derive(Event, Debug, Clone)]
pub struct ProjectileHit {
    /// Кто выстрелил
    pub shooter: Entity,

    /// В кого попали
    pub target: Entity,

    /// Урон
    pub damage: u32,
}

/// System: WeaponFired → spawn снаряда с baseline прицелом
///
/// Baseline: прямая от оружия стрелка к груди цели, без упреждения и
/// разброса. Скорость задаёт weapon.
pub fn launch_projectiles(
    mut commands: Commands,
    mut fire_events: EventReader<WeaponFired>,
    actors: Query<&Transform, With<Actor>>,
    mut launched_events: EventWriter<ProjectileLaunched>,
) {
    for event in fire_events.read() {
        let Ok(shooter_transform) = actors.get(event.shooter) else {
            continue;
        };
        let Ok(target_transform) = actors.get(event.target) else {
            continue;
        };

        let muzzle =
            shooter_transform.translation + Vec3::new(0.0, 0.0, WEAPON_HEIGHT_OFFSET);
        let chest = target_transform.translation + Vec3::new(0.0, 0.0, CENTER_MASS_OFFSET);

        let direction = (chest - muzzle).normalize_or_zero();
        if direction == Vec3::ZERO {
            // Стрелок и цель в одной точке — выстрел невозможен
            continue;
        }

        let projectile = commands
            .spawn((
                Projectile {
                    shooter: event.shooter,
                    kind: event.kind,
                    velocity: direction * event.speed,
                    damage: event.damage,
                    traveled: 0.0,
                },
                Transform::from_translation(muzzle),
            ))
            .id();

        launched_events.write(ProjectileLaunched {
            projectile,
            shooter: event.shooter,
            target: event.target,
            kind: event.kind,
        });

        crate::log(&format!(
            "Projectile {:?} launched: {:?} → {:?} ({:?})",
            projectile, event.shooter, event.target, event.kind
        ));
    }
}

/// System: полёт снарядов + попадания
///
/// Kinematic шаг velocity * dt, затем сферический hit check по живым
/// акторам (кроме стрелка). Шаг 50 units на тике при 3000 units/s — меньше
/// диаметра hit сферы, tunneling невозможен.
pub fn update_projectiles(
    mut commands: Commands,
    mut projectiles: Query<(Entity, &mut Projectile, &mut Transform)>,
    actors: Query<(Entity, &Transform, &Health), (With<Actor>, Without<Projectile>)>,
    mut hit_events: EventWriter<ProjectileHit>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();

    for (entity, mut projectile, mut transform) in projectiles.iter_mut() {
        let step = projectile.velocity * dt;
        transform.translation += step;
        projectile.traveled += step.length();

        let mut despawned = false;

        for (actor_entity, actor_transform, health) in actors.iter() {
            if actor_entity == projectile.shooter {
                continue;
            }
            if !health.is_alive() {
                continue;
            }

            let chest =
                actor_transform.translation + Vec3::new(0.0, 0.0, CENTER_MASS_OFFSET);

            if transform.translation.distance(chest) < HIT_RADIUS {
                hit_events.write(ProjectileHit {
                    shooter: projectile.shooter,
                    target: actor_entity,
                    damage: projectile.damage,
                });

                commands.entity(entity).despawn();
                despawned = true;
                break;
            }
        }

        if !despawned && projectile.traveled > MAX_FLIGHT_RANGE {
            commands.entity(entity).despawn();
        }
    }
}
