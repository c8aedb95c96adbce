use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tilebrain::core::config::BrainConfig;
use tilebrain::core::types::TileCoord;
use tilebrain::nav::jump::JumpTable;
use tilebrain::nav::planner::{Pathfinder, PlannerState};
use tilebrain::world::grid::GridRoom;
use tilebrain::world::terrain::Terrain;

/// Large open room with a few solid pillars to force detours
fn pillared_room(size: i32) -> GridRoom {
    let mut room = GridRoom::filled(size, size, Terrain::Floor);
    for x in (4..size - 4).step_by(8) {
        for y in 2..size - 2 {
            if y % 6 != 0 {
                room.set(TileCoord::new(x, y), Terrain::Solid);
            }
        }
    }
    room
}

fn plan_to_completion(room: &GridRoom, start: TileCoord, goal: TileCoord) -> usize {
    let config = BrainConfig::default();
    let jumps = JumpTable::standard();
    let mut planner = Pathfinder::new();
    planner.set_goal(start, goal, &config);
    // upper bound well past the room's tile count
    for _ in 0..10_000 {
        if planner.state() != PlannerState::Searching {
            break;
        }
        planner.step(room, &jumps, &config);
    }
    planner.path().len()
}

fn bench_planner(c: &mut Criterion) {
    let room = pillared_room(64);
    c.bench_function("plan_64x64_pillared", |b| {
        b.iter(|| {
            plan_to_completion(
                black_box(&room),
                TileCoord::new(1, 1),
                TileCoord::new(62, 62),
            )
        })
    });

    let corridor = GridRoom::filled(256, 1, Terrain::Floor);
    c.bench_function("plan_256_corridor", |b| {
        b.iter(|| {
            plan_to_completion(
                black_box(&corridor),
                TileCoord::new(0, 0),
                TileCoord::new(255, 0),
            )
        })
    });
}

criterion_group!(benches, bench_planner);
criterion_main!(benches);
