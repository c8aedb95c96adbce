//! Brain-level behavior arbitration scenarios

use tilebrain::ai::Behavior;
use tilebrain::brain::{AgentSnapshot, Brain, FoodSighting, ThreatSighting};
use tilebrain::core::config::BrainConfig;
use tilebrain::core::types::{Destination, ObjectId, RoomId, TileCoord};
use tilebrain::nav::jump::JumpTable;
use tilebrain::world::grid::{GridRoom, GridWorld};
use tilebrain::world::terrain::Terrain;

/// Two flat rooms joined end to end, with a shelter on the far side
fn two_room_world() -> GridWorld {
    let mut world = GridWorld::new();
    world.add_room(RoomId(0), GridRoom::filled(20, 1, Terrain::Floor));
    world.add_room(RoomId(1), GridRoom::filled(20, 1, Terrain::Floor));
    world.connect(RoomId(0), TileCoord::new(19, 0), RoomId(1), TileCoord::new(0, 0));
    world.add_shelter(RoomId(1));
    world
}

fn brain() -> Brain {
    Brain::new(BrainConfig::default(), JumpTable::standard(), 11)
}

#[test]
fn hungry_agent_hunts_visible_food() {
    let world = two_room_world();
    let mut brain = brain();

    let mut snapshot = AgentSnapshot::stationary(RoomId(0));
    snapshot.position = TileCoord::new(2, 0).to_world();
    snapshot.food = 1.0;
    snapshot.foods.push(FoodSighting {
        id: ObjectId::new(),
        room: RoomId(0),
        tile: TileCoord::new(10, 0),
        preferred: false,
    });

    let decision = brain.tick(&world, &snapshot).unwrap();
    assert_eq!(decision.behavior, Behavior::Hunt);
    assert_eq!(
        brain.destination(),
        Some(Destination::Tile { room: RoomId(0), tile: TileCoord::new(10, 0) })
    );
    // the corridor path completes within one slice, so the agent is
    // already stepping toward the food
    assert!(!decision.movement.is_hold());
    assert!(decision.movement.to.x > decision.movement.from.x);
}

#[test]
fn threat_overrides_hunger() {
    let world = two_room_world();
    let mut brain = brain();

    let mut snapshot = AgentSnapshot::stationary(RoomId(0));
    snapshot.position = TileCoord::new(8, 0).to_world();
    snapshot.food = 1.0;
    snapshot.foods.push(FoodSighting {
        id: ObjectId::new(),
        room: RoomId(0),
        tile: TileCoord::new(10, 0),
        preferred: false,
    });
    snapshot.threats.push(ThreatSighting {
        id: ObjectId::new(),
        room: RoomId(0),
        tile: TileCoord::new(10, 0),
    });

    let decision = brain.tick(&world, &snapshot).unwrap();
    assert_eq!(decision.behavior, Behavior::Flee);
}

#[test]
fn rising_rain_sends_agent_shelter_ward() {
    let world = two_room_world();
    let mut brain = brain();

    let mut snapshot = AgentSnapshot::stationary(RoomId(0));
    snapshot.position = TileCoord::new(3, 0).to_world();
    snapshot.rain_fraction = 1.0;

    let decision = brain.tick(&world, &snapshot).unwrap();
    assert_eq!(decision.behavior, Behavior::EscapeRain);
    // the exit at (19, 0) is the route toward the shelter room
    assert!(decision.movement.to.x >= decision.movement.from.x);
    match brain.destination() {
        Some(Destination::Exit { room, .. }) => assert_eq!(room, RoomId(0)),
        other => panic!("expected an exit destination, got {other:?}"),
    }
}

#[test]
fn stalled_agent_switches_to_unstuck() {
    let world = two_room_world();
    let config = BrainConfig::default();
    let window = config.stuck_window as u64;
    let mut brain = Brain::new(config, JumpTable::standard(), 11);

    // a standing order the agent never makes progress on
    brain.set_goal_override(Some(Destination::Tile {
        room: RoomId(0),
        tile: TileCoord::new(18, 0),
    }));

    let mut snapshot = AgentSnapshot::stationary(RoomId(0));
    snapshot.position = TileCoord::new(2, 0).to_world();

    let mut saw_unstuck = false;
    for _ in 0..(window + 5) {
        let decision = brain.tick(&world, &snapshot).unwrap();
        if decision.behavior == Behavior::GetUnstuck {
            saw_unstuck = true;
            break;
        }
    }
    assert!(saw_unstuck, "agent never noticed it was stuck");
}

#[test]
fn idle_agent_still_wanders() {
    let world = two_room_world();
    let mut brain = brain();

    let snapshot = AgentSnapshot::stationary(RoomId(0));
    let decision = brain.tick(&world, &snapshot).unwrap();
    assert_eq!(decision.behavior, Behavior::Idle);
    // no urges, so the explorer picks the only exit
    match brain.destination() {
        Some(Destination::Exit { room, .. }) => assert_eq!(room, RoomId(0)),
        other => panic!("expected an exit destination, got {other:?}"),
    }
}

#[test]
fn eaten_food_is_forgotten() {
    let world = two_room_world();
    let mut brain = brain();
    let food_id = ObjectId::new();

    let mut snapshot = AgentSnapshot::stationary(RoomId(0));
    snapshot.food = 1.0;
    snapshot.foods.push(FoodSighting {
        id: food_id,
        room: RoomId(0),
        tile: TileCoord::new(10, 0),
        preferred: false,
    });
    let decision = brain.tick(&world, &snapshot).unwrap();
    assert_eq!(decision.behavior, Behavior::Hunt);

    brain.on_food_consumed(food_id);
    snapshot.foods.clear();
    snapshot.food = 7.0;
    let decision = brain.tick(&world, &snapshot).unwrap();
    assert_ne!(decision.behavior, Behavior::Hunt);
}

#[test]
fn behavior_is_sticky_across_room_changes() {
    let world = two_room_world();
    let mut brain = brain();

    // rain high enough to hold EscapeRain through the boundary crossing
    let mut snapshot = AgentSnapshot::stationary(RoomId(0));
    snapshot.rain_fraction = 1.0;
    brain.tick(&world, &snapshot).unwrap();

    snapshot.room = RoomId(1);
    snapshot.position = TileCoord::new(1, 0).to_world();
    let decision = brain.tick(&world, &snapshot).unwrap();
    assert_eq!(decision.behavior, Behavior::EscapeRain);
    // inside the shelter room the target is the room's own safe tile
    assert_eq!(
        brain.destination(),
        Some(Destination::Tile { room: RoomId(1), tile: TileCoord::new(10, 0) })
    );
}
