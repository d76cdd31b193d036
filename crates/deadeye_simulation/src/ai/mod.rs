//! AI decision-making module
//!
//! Simple FSM для таргетинга: Idle → Combat → Idle/Dead.
//! Движение и стрельба читают state, сам FSM только выбирает цель.

use bevy::prelude::*;

pub mod simple_fsm;

// Re-export основных типов
pub use simple_fsm::{AIConfig, AIState};

use crate::SimulationSet;

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate (set Ai, до movement и combat).
/// Порядок выполнения:
/// 1. ai_fsm_transitions — выбор/потеря цели, смерть
/// 2. ai_movement_from_state — конвертация state → MovementState
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                simple_fsm::ai_fsm_transitions,
                simple_fsm::ai_movement_from_state,
            )
                .chain() // Последовательное выполнение для детерминизма
                .in_set(SimulationSet::Ai),
        );
    }
}
