//! Scripted decision-core walkthrough
//!
//! Drives one brain through a small three-room world: quiet exploration,
//! then food appears, then a predator shows up, then the rain closes in.
//! Prints every behavior transition and each room change.

use tilebrain::ai::Behavior;
use tilebrain::brain::{AgentSnapshot, Brain, FoodSighting, ThreatSighting};
use tilebrain::core::config::BrainConfig;
use tilebrain::core::types::{ObjectId, RoomId, TileCoord};
use tilebrain::nav::jump::JumpTable;
use tilebrain::world::grid::{GridRoom, GridWorld};
use tilebrain::world::map::WorldMap;
use tilebrain::world::terrain::Terrain;

fn build_world() -> GridWorld {
    let mut world = GridWorld::new();

    // three rooms in a row, shelter at the far end
    for id in 0..3u32 {
        let mut room = GridRoom::new(24, 10);
        room.fill_row(0, Terrain::Floor);
        world.add_room(RoomId(id), room);
    }
    world.connect(RoomId(0), TileCoord::new(23, 0), RoomId(1), TileCoord::new(0, 0));
    world.connect(RoomId(1), TileCoord::new(23, 0), RoomId(2), TileCoord::new(0, 0));
    world.add_shelter(RoomId(2));
    world
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tilebrain=info".into()),
        )
        .init();

    let world = build_world();
    let mut brain = Brain::new(BrainConfig::default(), JumpTable::standard(), 42);

    let food_id = ObjectId::new();
    let threat_id = ObjectId::new();
    let ticks = 400u64;

    let mut snapshot = AgentSnapshot::stationary(RoomId(0));
    snapshot.position = TileCoord::new(2, 0).to_world();
    snapshot.food = 3.0;
    snapshot.max_food = 7.0;
    snapshot.food_to_hibernate = 4.0;

    let mut last_behavior = Behavior::Idle;
    let mut last_room = snapshot.room;
    println!("tick  event");

    for tick in 0..ticks {
        snapshot.rain_fraction = tick as f32 / ticks as f32;
        snapshot.foods.clear();
        snapshot.threats.clear();

        // phase 2: food appears down the corridor
        if (80..200).contains(&tick) {
            snapshot.foods.push(FoodSighting {
                id: food_id,
                room: RoomId(0),
                tile: TileCoord::new(18, 0),
                preferred: true,
            });
        }

        // phase 3: a predator blocks the middle of the room
        if (200..280).contains(&tick) && snapshot.room == RoomId(0) {
            snapshot.threats.push(ThreatSighting {
                id: threat_id,
                room: RoomId(0),
                tile: TileCoord::new(12, 0),
            });
        }

        let decision = match brain.tick(&world, &snapshot) {
            Ok(decision) => decision,
            Err(err) => {
                eprintln!("brain error at tick {tick}: {err}");
                break;
            }
        };

        if decision.behavior != last_behavior {
            println!("{tick:>4}  behavior {:?} -> {:?}", last_behavior, decision.behavior);
            last_behavior = decision.behavior;
        }

        // crude locomotion: step straight onto the edge's target tile
        if !decision.movement.is_hold() {
            snapshot.position = decision.movement.to.to_world();
        }

        // crossing the exit tile moves the agent to the next room
        if let Some(exits) = world.exits(snapshot.room) {
            if let Some(exit) = exits.iter().find(|e| e.tile == snapshot.tile()) {
                snapshot.room = exit.leads_to;
                snapshot.position = TileCoord::new(1, 0).to_world();
            }
        }
        if snapshot.room != last_room {
            println!("{tick:>4}  entered room {}", snapshot.room.0);
            last_room = snapshot.room;
        }

        if snapshot.tile() == TileCoord::new(18, 0) && (80..200).contains(&tick) {
            println!("{tick:>4}  ate the food item");
            snapshot.food = (snapshot.food + 1.0).min(snapshot.max_food);
            brain.on_food_consumed(food_id);
        }
    }

    println!(
        "final: room {} tile {} behavior {:?}",
        snapshot.room.0,
        snapshot.tile(),
        brain.behavior()
    );
}
