//! End-to-end tests: generation, routing, play and save/load.
//!
//! Run with: cargo test --release world_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use thermogo::field::FnField;
use thermogo::map::generate_with;
use thermogo::session::UnitKind;
use thermogo::{
    Command, Coord, Event, GameSession, Layer, SessionError, WorldConfig, generate_map,
    load_snapshot, save_snapshot,
};

/// Two islands on the equator, at longitude 0 and 180, in open sea.
fn two_islands() -> thermogo::GameMap {
    let config = WorldConfig::new(24, 0);
    let field = FnField::new(|p: [f64; 3]| if p[0].abs() > 1.8 { 0.5 } else { -0.5 });
    generate_with(&config, &field, None).unwrap().0
}

#[test]
fn test_generation_is_deterministic() {
    let config = WorldConfig::new(48, 1234);
    let (a, sites_a) = generate_map(&config).unwrap();
    let (b, sites_b) = generate_map(&config).unwrap();
    assert_eq!(a.tiles(), b.tiles());
    assert_eq!(sites_a, sites_b);
    assert_eq!(a.land_graph(), b.land_graph());
}

#[test]
fn test_seeds_give_different_worlds() {
    let (a, _) = generate_map(&WorldConfig::new(48, 1)).unwrap();
    let (b, _) = generate_map(&WorldConfig::new(48, 2)).unwrap();
    assert_ne!(a.tiles(), b.tiles());
}

#[test]
fn test_resources_only_on_land() {
    let (map, sites) = generate_map(&WorldConfig::new(64, 9)).unwrap();
    for site in &sites {
        let tile = map.get(site.coord).unwrap();
        assert!(tile.is_land());
        assert!(site.density > map.config().resource_threshold);
    }
    for tile in map.tiles().iter().filter(|t| !t.is_land()) {
        assert!(tile.resource_density().abs() < f64::EPSILON);
    }
}

#[test]
fn test_two_islands_unreachable_by_land() {
    let map = two_islands();
    let west = Coord::new(0, 6);
    let east = Coord::new(12, 6);
    assert!(map.is_layer(west, Layer::Land));
    assert!(map.is_layer(east, Layer::Land));
    assert_eq!(map.region_count(Layer::Land), 2);

    assert!(map.find_path(Layer::Land, west, east).unwrap().is_none());

    let search = map
        .search(Layer::Land, west, east, thermogo::Heuristic::Spherical)
        .unwrap();
    assert!(!search.found());
    assert!(search.cost_to(search.goal()).is_none());
}

#[test]
fn test_two_islands_reachable_by_sea() {
    let map = two_islands();
    let route = map
        .find_path(Layer::Sea, Coord::new(6, 6), Coord::new(18, 6))
        .unwrap()
        .unwrap();
    assert!(route.steps.iter().all(|&c| map.is_layer(c, Layer::Sea)));
    assert!(route.cost > 0.0);
}

#[test]
fn test_route_through_pole_is_short() {
    let map = two_islands();
    // Straight over the south pole is much shorter than going round.
    let route = map
        .find_path(Layer::Sea, Coord::new(3, 1), Coord::new(15, 1))
        .unwrap()
        .unwrap();
    assert!(route.moves() <= 4, "took {} moves", route.moves());
}

#[test]
fn test_full_game_flow_and_save() {
    let map = Arc::new(two_islands());
    let session = GameSession::new_game(map, Vec::new(), 2).unwrap();

    let (session, event) = session.apply(Command::SpawnBase { at: Coord::new(12, 6) }).unwrap();
    assert!(matches!(event, Event::Spawned(u) if u.kind == UnitKind::Base));
    let err = session.apply(Command::SpawnBase { at: Coord::new(0, 6) }).unwrap_err();
    assert_eq!(err, SessionError::NoActionsLeft(1));

    let (session, _) = session.apply(Command::PassTurn).unwrap();
    let (session, event) = session
        .apply(Command::SpawnUnit {
            at: Coord::new(6, 6),
            layer: Layer::Sea,
        })
        .unwrap();
    let Event::Spawned(ship) = event else {
        panic!("expected a spawn, got {event:?}");
    };
    let (session, _) = session.apply(Command::PassTurn).unwrap();
    let (session, _) = session.apply(Command::PassTurn).unwrap();
    assert_eq!(session.active_player().number, 2);
    assert_eq!(session.turn(), 2);

    let (session, event) = session
        .apply(Command::MoveUnit {
            unit: ship.id,
            to: Coord::new(18, 6),
        })
        .unwrap();
    assert!(matches!(event, Event::Moved { .. }));
    assert_eq!(session.unit(ship.id).unwrap().position, Coord::new(18, 6));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.json");
    save_snapshot(&path, "islands", &session).unwrap();
    let loaded = load_snapshot(&path).unwrap();

    assert_eq!(loaded.name, "islands");
    assert_eq!(loaded.session.units(), session.units());
    assert_eq!(loaded.session.turn(), session.turn());
    assert_eq!(loaded.session.active_player(), session.active_player());
    assert_eq!(loaded.session.map().graph(), session.map().graph());
    assert_eq!(loaded.session.map().sea_graph(), session.map().sea_graph());
}

#[test]
fn test_load_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_snapshot(dir.path().join("absent.json")).is_err());
}

#[test]
fn test_config_yaml_drives_generation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("world.yaml");
    std::fs::write(&path, "width: 32\nseed: 5\nresources: false\n").unwrap();
    let config = WorldConfig::from_file(&path).unwrap();
    let (map, sites) = generate_map(&config).unwrap();
    assert_eq!((map.width(), map.height()), (32, 16));
    assert!(sites.is_empty());
}

#[test]
fn test_shipped_world_files_parse() {
    let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/worlds");
    let default = WorldConfig::from_file(format!("{dir}/default.yaml")).unwrap();
    assert_eq!(default, WorldConfig::default());
    let archipelago = WorldConfig::from_file(format!("{dir}/archipelago.yaml")).unwrap();
    assert_eq!(archipelago.width, 120);
    assert!(archipelago.validate().is_ok());
}
