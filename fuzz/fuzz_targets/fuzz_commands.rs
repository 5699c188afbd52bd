#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use std::sync::{Arc, OnceLock};
use thermogo::session::UnitId;
use thermogo::{Command, Coord, GameMap, GameSession, Layer, WorldConfig, generate_map};

/// One fuzzed order.
#[derive(Arbitrary, Debug)]
enum Order {
    Pass,
    Base { x: u8, y: u8 },
    Unit { x: u8, y: u8, sea: bool },
    Move { unit: u8, x: u8, y: u8 },
    KillAll,
    Cleanup,
}

/// Structured input for session fuzzing.
#[derive(Arbitrary, Debug)]
struct SessionInput {
    /// Number of seats (capped to the legal range by the session).
    players: u8,
    /// Orders to apply in sequence.
    orders: Vec<Order>,
}

fn world() -> Arc<GameMap> {
    static MAP: OnceLock<Arc<GameMap>> = OnceLock::new();
    Arc::clone(MAP.get_or_init(|| {
        let (map, _) = generate_map(&WorldConfig::new(32, 3)).unwrap();
        Arc::new(map)
    }))
}

fuzz_target!(|input: SessionInput| {
    let Ok(mut session) = GameSession::new_game(world(), Vec::new(), usize::from(input.players))
    else {
        return;
    };

    // Coordinates may fall off the 32x16 grid on purpose
    for order in input.orders.iter().take(256) {
        let command = match *order {
            Order::Pass => Command::PassTurn,
            Order::Base { x, y } => Command::SpawnBase {
                at: Coord::new(u16::from(x), u16::from(y)),
            },
            Order::Unit { x, y, sea } => Command::SpawnUnit {
                at: Coord::new(u16::from(x), u16::from(y)),
                layer: if sea { Layer::Sea } else { Layer::Land },
            },
            Order::Move { unit, x, y } => Command::MoveUnit {
                unit: UnitId(u32::from(unit)),
                to: Coord::new(u16::from(x), u16::from(y)),
            },
            Order::KillAll => Command::KillAll,
            Order::Cleanup => Command::Cleanup,
        };
        if let Ok((next, _)) = session.apply(command) {
            session = next;
        }
        assert!(session.validate().is_ok(), "invariant broken after {order:?}");
    }
});
