//! Базовые компоненты акторов: Actor, Health, DesignatedMarksman

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Актор (NPC, враг) — базовый компонент для живых существ
///
/// Автоматически добавляет Health, MovementState, Transform через Required Components.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Health, crate::components::MovementState, Transform)]
pub struct Actor {
    /// Stable ID фракции (таргетинг: стреляем только по чужим фракциям)
    pub faction_id: u64,
}

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100) // Default 100 HP
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.current = (self.current + amount).min(self.max);
    }
}

/// Маркер: назначенный marksman — его стрелы получают aim assist
///
/// Кто именно считается marksman'ом решает система, владеющая identity
/// (spawn код, scenario setup). Aim системы проверяют только наличие
/// маркера — никаких сравнений имён/ID внутри combat кода.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct DesignatedMarksman;
