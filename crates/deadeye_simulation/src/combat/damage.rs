//! Damage pipeline
//!
//! ProjectileHit → Health, затем события для логики выше (DamageDealt,
//! EntityDied) и отключение AI у мёртвых.

use bevy::prelude::*;

use crate::components::{Health, MovementState};
use super::projectile::ProjectileHit;

/// Событие: урон нанесен
///
/// Генерируется после применения damage к Health.
#[derive(Event, Debug, Clone)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: u32,
    pub target_died: bool,
}

/// Событие: entity умер (health == 0)
#[derive(Event, Debug, Clone)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Компонент-маркер: entity мертв
///
/// Деспавн не автоматический — трупы остаются на месте.
#[derive(Component, Debug)]
pub struct Dead;

/// Система: apply damage от ProjectileHit событий
pub fn apply_damage(
    mut hit_events: EventReader<ProjectileHit>,
    mut damage_dealt_events: EventWriter<DamageDealt>,
    mut entity_died_events: EventWriter<EntityDied>,
    mut targets: Query<&mut Health>,
) {
    for hit in hit_events.read() {
        // Self-hit не должен происходить (projectile пропускает стрелка)
        if hit.shooter == hit.target {
            crate::log_warning(&format!("Self-hit dropped: {:?}", hit.shooter));
            continue;
        }

        let Ok(mut health) = targets.get_mut(hit.target) else {
            crate::log_warning(&format!(
                "ProjectileHit: target {:?} has no Health component",
                hit.target
            ));
            continue;
        };

        let was_alive = health.is_alive();
        health.take_damage(hit.damage);
        let is_alive = health.is_alive();

        damage_dealt_events.write(DamageDealt {
            attacker: hit.shooter,
            target: hit.target,
            damage: hit.damage,
            target_died: was_alive && !is_alive,
        });

        crate::log(&format!(
            "Hit: {:?} → {:?} ({} damage, HP left: {})",
            hit.shooter, hit.target, hit.damage, health.current
        ));

        if was_alive && !is_alive {
            entity_died_events.write(EntityDied {
                entity: hit.target,
                killer: Some(hit.shooter),
            });

            crate::log_info(&format!(
                "Entity {:?} killed by {:?}",
                hit.target, hit.shooter
            ));
        }
    }
}

/// Система: отключение AI при смерти
///
/// Останавливает движение сразу, AIState убирает через Commands,
/// добавляет маркер Dead.
pub fn disable_ai_on_death(
    mut commands: Commands,
    mut death_events: EventReader<EntityDied>,
    mut movement_query: Query<&mut MovementState>,
) {
    for event in death_events.read() {
        // Останавливаем сразу (не через Commands)
        if let Ok(mut movement) = movement_query.get_mut(event.entity) {
            *movement = MovementState::stationary();
        }

        if let Ok(mut entity_commands) = commands.get_entity(event.entity) {
            entity_commands.remove::<crate::ai::AIState>();
            entity_commands.insert(Dead);
        }
    }
}
