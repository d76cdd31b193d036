//! Ranged weapon component + стрельба
//!
//! Architecture:
//! - ECS хранит weapon stats и cooldown (game state)
//! - ai_weapon_fire принимает strategic decision: цель жива, в range, cooldown готов
//! - Баллистику выполняет projectile pipeline (launch → marksman correction → flight)

use bevy::prelude::*;

use crate::ai::AIState;
use crate::components::Health;
use super::projectile::ProjectileKind;

/// Ranged weapon stats component
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct RangedWeapon {
    /// Тип снаряда (aim assist работает только по стрелам)
    pub kind: ProjectileKind,

    /// Базовый урон (без модификаторов)
    pub base_damage: u32,

    /// Cooldown между выстрелами (секунды)
    pub attack_cooldown: f32,

    /// Текущий cooldown timer (уменьшается до 0)
    pub cooldown_timer: f32,

    /// Дальность выстрела (units)
    pub range: f32,

    /// Скорость снаряда (units/s)
    pub projectile_speed: f32,
}

impl Default for RangedWeapon {
    fn default() -> Self {
        Self::hunting_bow()
    }
}

impl RangedWeapon {
    /// Охотничий лук (стрелы ~3000 units/s)
    pub fn hunting_bow() -> Self {
        Self {
            kind: ProjectileKind::Arrow,
            base_damage: 25,
            attack_cooldown: 1.5, // натяжка тетивы
            cooldown_timer: 0.0,
            range: 4096.0,
            projectile_speed: 3000.0,
        }
    }

    /// Огненный посох (медленный flame bolt, без aim assist)
    pub fn fire_staff() -> Self {
        Self {
            kind: ProjectileKind::Flame,
            base_damage: 15,
            attack_cooldown: 0.75,
            cooldown_timer: 0.0,
            range: 2048.0,
            projectile_speed: 1500.0,
        }
    }

    /// Может ли weapon стрелять (cooldown == 0)
    pub fn can_attack(&self) -> bool {
        self.cooldown_timer <= 0.0
    }

    /// Начать cooldown после выстрела
    pub fn start_cooldown(&mut self) {
        self.cooldown_timer = self.attack_cooldown;
    }
}

/// Event: актёр стреляет по цели (принято strategic decision)
#[derive(Event, Debug, Clone)]
pub struct WeaponFired {
    /// Кто стреляет
    pub shooter: Entity,

    /// В кого стреляет
    pub target: Entity,

    /// Тип снаряда
    pub kind: ProjectileKind,

    /// Урон снаряда
    pub damage: u32,

    /// Скорость снаряда (units/s)
    pub speed: f32,
}

/// System: обновление weapon cooldowns
pub fn update_weapon_cooldowns(mut weapons: Query<&mut RangedWeapon>, time: Res<Time>) {
    for mut weapon in weapons.iter_mut() {
        if weapon.cooldown_timer > 0.0 {
            weapon.cooldown_timer -= time.delta_secs();
            weapon.cooldown_timer = weapon.cooldown_timer.max(0.0);
        }
    }
}

/// System: AI weapon fire (strategic decision → WeaponFired)
///
/// Стреляем только когда:
/// - AI в Combat state
/// - cooldown готов
/// - цель жива и в пределах weapon range
pub fn ai_weapon_fire(
    mut shooters: Query<(Entity, &Transform, &AIState, &mut RangedWeapon)>,
    targets: Query<(&Transform, &Health)>,
    mut fire_events: EventWriter<WeaponFired>,
) {
    for (entity, transform, state, mut weapon) in shooters.iter_mut() {
        let AIState::Combat { target } = state else {
            continue;
        };

        if !weapon.can_attack() {
            continue;
        }

        let Ok((target_transform, target_health)) = targets.get(*target) else {
            continue;
        };

        if !target_health.is_alive() {
            continue;
        }

        let distance = transform
            .translation
            .distance(target_transform.translation);

        if distance > weapon.range {
            continue;
        }

        fire_events.write(WeaponFired {
            shooter: entity,
            target: *target,
            kind: weapon.kind,
            damage: weapon.base_damage,
            speed: weapon.projectile_speed,
        });

        // ECS владеет cooldown state
        weapon.start_cooldown();

        crate::log(&format!(
            "Actor {:?} fires at {:?} (distance: {:.0})",
            entity, target, distance
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hunting_bow_stats() {
        let weapon = RangedWeapon::hunting_bow();
        assert_eq!(weapon.kind, ProjectileKind::Arrow);
        assert_eq!(weapon.base_damage, 25);
        assert_eq!(weapon.range, 4096.0);
        assert_eq!(weapon.projectile_speed, 3000.0);
    }

    #[test]
    fn test_fire_staff_is_not_arrow() {
        let weapon = RangedWeapon::fire_staff();
        assert_eq!(weapon.kind, ProjectileKind::Flame);
    }

    #[test]
    fn test_weapon_cooldown() {
        let mut weapon = RangedWeapon::hunting_bow();
        assert!(weapon.can_attack());

        weapon.start_cooldown();
        assert!(!weapon.can_attack());
        assert_eq!(weapon.cooldown_timer, 1.5);

        // Simulate tick
        weapon.cooldown_timer -= 1.0;
        assert!(!weapon.can_attack());

        weapon.cooldown_timer -= 0.5;
        assert!(weapon.can_attack());
    }
}
