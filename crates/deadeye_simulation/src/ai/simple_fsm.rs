//! Simple FSM AI для ranged combat
//!
//! Конечный автомат таргетинга:
//! Idle → Combat (враг в detection range) → Idle (цель умерла/ушла) / Dead
//!
//! Архитектура:
//! - FSM работает в FixedUpdate для детерминизма
//! - Combat state держит дистанцию в engage band и стоит, пока стреляет
//! - Стрельбу выполняет combat::ai_weapon_fire по текущему Combat target

use bevy::prelude::*;

use crate::aim::heading_from_direction;
use crate::components::{Actor, Health, MovementState};

/// AI FSM состояния
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub enum AIState {
    /// Idle — ждём врага в detection range
    Idle,

    /// Combat — держим дистанцию и стреляем по цели
    Combat {
        target: Entity,
    },

    /// Dead — актёр мертв (HP == 0), AI отключен
    Dead,
}

impl Default for AIState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Параметры AI (детекция, комфортная дистанция боя)
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct AIConfig {
    /// Радиус обнаружения врагов (units)
    pub detection_range: f32,
    /// Ближе этой дистанции отходим (units)
    pub engage_range_min: f32,
    /// Дальше этой дистанции сближаемся бегом (units)
    pub engage_range_max: f32,
}

impl Default for AIConfig {
    fn default() -> Self {
        Self {
            detection_range: 4096.0,
            engage_range_min: 800.0,
            engage_range_max: 2500.0,
        }
    }
}

/// Система: AI FSM transitions
///
/// Обновляет AIState на основе окружения (ближайший враг, жива ли цель).
pub fn ai_fsm_transitions(
    mut ai_query: Query<(
        Entity,
        &Actor,
        &Transform,
        &mut AIState,
        &AIConfig,
        &Health,
    )>,
    potential_targets: Query<(Entity, &Actor, &Transform, &Health)>,
) {
    for (entity, actor, transform, mut state, config, health) in ai_query.iter_mut() {
        let new_state = if !health.is_alive() {
            AIState::Dead
        } else {
            match state.as_ref() {
                AIState::Idle => {
                    if let Some(target) = find_nearest_enemy(
                        entity,
                        actor.faction_id,
                        transform,
                        &potential_targets,
                        config.detection_range,
                    ) {
                        AIState::Combat { target }
                    } else {
                        AIState::Idle
                    }
                }

                AIState::Combat { target } => {
                    if let Ok((_, _, target_transform, target_health)) =
                        potential_targets.get(*target)
                    {
                        let distance =
                            transform.translation.distance(target_transform.translation);

                        if !target_health.is_alive() {
                            AIState::Idle
                        } else if distance > config.detection_range * 1.5 {
                            // Цель оторвалась — бросаем преследование
                            AIState::Idle
                        } else {
                            AIState::Combat { target: *target }
                        }
                    } else {
                        AIState::Idle
                    }
                }

                AIState::Dead => AIState::Dead,
            }
        };

        *state = new_state;
    }
}

/// Система: AI movement от FSM state
///
/// Конвертирует AIState в MovementState:
/// - дальше engage_range_max — сближаемся бегом
/// - ближе engage_range_min — отходим шагом
/// - в band'е — стоим и стреляем
pub fn ai_movement_from_state(
    mut ai_query: Query<(&Transform, &AIState, &AIConfig, &mut MovementState)>,
    targets: Query<&Transform, With<Actor>>,
) {
    // Ниже этого planar расстояния heading не определён
    const MIN_PLANAR_DISTANCE: f32 = 1.0;

    for (transform, state, config, mut movement) in ai_query.iter_mut() {
        let new_movement = match state {
            AIState::Combat { target } => {
                if let Ok(target_transform) = targets.get(*target) {
                    let to_target = target_transform.translation - transform.translation;
                    let planar = Vec3::new(to_target.x, to_target.y, 0.0);
                    let distance = to_target.length();

                    if distance > config.engage_range_max && planar.length() > MIN_PLANAR_DISTANCE
                    {
                        MovementState::running(heading_from_direction(planar))
                    } else if distance < config.engage_range_min
                        && planar.length() > MIN_PLANAR_DISTANCE
                    {
                        MovementState::walking(heading_from_direction(-planar))
                    } else {
                        MovementState::stationary()
                    }
                } else {
                    MovementState::stationary()
                }
            }

            AIState::Idle | AIState::Dead => MovementState::stationary(),
        };

        *movement = new_movement;
    }
}

/// Helper: найти ближайшего врага (другой фракции) в радиусе
fn find_nearest_enemy(
    self_entity: Entity,
    self_faction: u64,
    self_transform: &Transform,
    targets: &Query<(Entity, &Actor, &Transform, &Health)>,
    max_range: f32,
) -> Option<Entity> {
    let mut nearest: Option<(Entity, f32)> = None;

    for (target_entity, target_actor, target_transform, target_health) in targets.iter() {
        // Не атакуем себя
        if target_entity == self_entity {
            continue;
        }

        // Только враги (другая фракция)
        if target_actor.faction_id == self_faction {
            continue;
        }

        // Только живые targets
        if !target_health.is_alive() {
            continue;
        }

        let distance = self_transform
            .translation
            .distance(target_transform.translation);

        if distance <= max_range {
            match nearest {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => nearest = Some((target_entity, distance)),
            }
        }
    }

    nearest.map(|(entity, _)| entity)
}
