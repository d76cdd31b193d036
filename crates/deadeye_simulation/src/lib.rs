//! DEADEYE Simulation Core
//!
//! Headless детерминистичная ECS-симуляция ranged combat на Bevy 0.16.
//! Центральная фича — marksman aim assist: designated стрелки получают
//! упреждение по движущимся целям и ограниченный случайный разброс
//! (aim solver в модуле `aim`).
//!
//! Детерминизм:
//! - FixedUpdate 60Hz, системы в одной явной цепочке (SimulationSet)
//! - Единственный RNG — seeded ChaCha8 в resource DeterministicRng;
//!   ResMut сериализует доступ, function-local генераторов нет

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod aim;
pub mod ai;
pub mod combat;
pub mod components;
pub mod logger;
pub mod movement;

// Re-export базовых типов для удобства
pub use aim::{compute_aim_vector, AimProfile};
pub use ai::{AIConfig, AIPlugin, AIState};
pub use combat::{
    AimAssistConfig, CombatPlugin, DamageDealt, Dead, EntityDied, Projectile, ProjectileHit,
    ProjectileKind, ProjectileLaunched, RangedWeapon, WeaponFired,
};
pub use components::*;
pub use logger::{init_logger, log, log_error, log_info, log_warning};

/// Порядок подсистем внутри тика: AI решает → акторы двигаются → combat стреляет
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Ai,
    Movement,
    Combat,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Детерминистичный RNG (если embedder не вставил свой seed)
            .init_resource::<DeterministicRng>()
            // Явный порядок подсистем внутри тика
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Ai,
                    SimulationSet::Movement,
                    SimulationSet::Combat,
                )
                    .chain(),
            )
            .add_systems(
                FixedUpdate,
                movement::apply_movement.in_set(SimulationSet::Movement),
            )
            // Подсистемы
            .add_plugins((AIPlugin, CombatPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
///
/// Единственный источник случайности симуляции. Доступ только через
/// ResMut — Bevy сериализует использование, у параллельных систем нет
/// шанса перемешать draw'ы.
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время шагается вручную: один app.update() == ровно один fixed tick
/// (60Hz), независимо от wall-clock. Без этого количество FixedUpdate
/// прогонов зависело бы от скорости машины и тесты детерминизма не имели
/// бы смысла.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_micros(
            16_667, // 1/60 s
        )));

    app
}

/// Snapshot мира для сравнения детерминизма
///
/// Сортируем по Entity ID и сериализуем через Debug — достаточно для
/// побайтового сравнения прогонов.
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
