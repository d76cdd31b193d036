//! Combat system module (ranged combat pipeline)
//!
//! ECS ответственность:
//! - Game state: Health, weapon cooldowns, снаряды
//! - Combat rules: выбор момента выстрела, baseline прицел, попадания, урон
//! - Marksman correction: aim assist для designated marksmen
//!
//! Events: WeaponFired → ProjectileLaunched → ProjectileHit → DamageDealt/EntityDied

use bevy::prelude::*;

pub mod damage;
pub mod marksman;
pub mod projectile;
pub mod weapon;

// Re-export основных типов
pub use damage::{apply_damage, disable_ai_on_death, DamageDealt, Dead, EntityDied};
pub use marksman::{improve_marksman_aim, AimAssistConfig};
pub use projectile::{
    Projectile, ProjectileHit, ProjectileKind, ProjectileLaunched, HIT_RADIUS, MAX_FLIGHT_RANGE,
};
pub use weapon::{ai_weapon_fire, update_weapon_cooldowns, RangedWeapon, WeaponFired};

use crate::SimulationSet;

/// Combat Plugin
///
/// Регистрирует combat системы в FixedUpdate (set Combat, после AI и movement).
///
/// Порядок выполнения:
/// 1. update_weapon_cooldowns — тик cooldown таймеров
/// 2. ai_weapon_fire — strategic decision → WeaponFired
/// 3. launch_projectiles — spawn снаряда с baseline прицелом
/// 4. improve_marksman_aim — коррекция прицела ДО первого шага полёта
/// 5. update_projectiles — полёт + попадания
/// 6. apply_damage — ProjectileHit → Health
/// 7. disable_ai_on_death — мёртвые перестают действовать
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<WeaponFired>()
            .add_event::<ProjectileLaunched>()
            .add_event::<ProjectileHit>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>();

        // Глобальная конфигурация aim assist (не перетирает кастомную,
        // вставленную до плагина)
        app.init_resource::<AimAssistConfig>();

        // Регистрация систем в FixedUpdate
        app.add_systems(
            FixedUpdate,
            (
                weapon::update_weapon_cooldowns,
                weapon::ai_weapon_fire,
                projectile::launch_projectiles,
                marksman::improve_marksman_aim,
                projectile::update_projectiles,
                damage::apply_damage,
                damage::disable_ai_on_death,
            )
                .chain() // Последовательное выполнение для детерминизма
                .in_set(SimulationSet::Combat),
        );
    }
}
