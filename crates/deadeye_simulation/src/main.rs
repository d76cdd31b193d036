//! Headless демо DEADEYE
//!
//! Designated marksman против идущей поперёк линии огня цели:
//! baseline стрелок такую цель не достаёт, marksman с упреждением — да.

use bevy::prelude::*;
use deadeye_simulation::*;

fn main() {
    let seed = 42;
    println!("Starting DEADEYE headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);

    // Marksman (faction 1) с луком
    app.world_mut().spawn((
        Transform::from_translation(Vec3::ZERO),
        Actor { faction_id: 1 },
        DesignatedMarksman,
        RangedWeapon::hunting_bow(),
        AIState::default(),
        AIConfig::default(),
    ));

    // Цель (faction 2): идёт на +Y, поперёк линии огня
    let walker = app
        .world_mut()
        .spawn((
            Transform::from_translation(Vec3::new(2000.0, 0.0, 0.0)),
            Actor { faction_id: 2 },
            MovementState::walking(0.0),
        ))
        .id();

    for tick in 0..600 {
        app.update();

        if tick % 100 == 0 {
            let hp = app
                .world()
                .get::<Health>(walker)
                .map(|h| h.current)
                .unwrap_or(0);
            let arrows = {
                let world = app.world_mut();
                let mut query = world.query::<&Projectile>();
                query.iter(world).count()
            };
            println!("Tick {}: walker HP = {}, arrows in flight = {}", tick, hp, arrows);
        }
    }

    let hp = app
        .world()
        .get::<Health>(walker)
        .map(|h| h.current)
        .unwrap_or(0);
    let dead = app.world().get::<Dead>(walker).is_some();
    println!("Simulation complete: walker HP = {}, dead = {}", hp, dead);
}
