//! Game sessions: players, units and turn order on a shared map.
//!
//! A [`GameSession`] is an owned value. Every change goes through
//! [`GameSession::apply`], which takes a [`Command`] and returns the next
//! session plus an [`Event`] describing what happened; the original session
//! is left untouched.
//!
//! ```text
//! ┌──────────────┐  Command   ┌──────────────┐
//! │ GameSession  │ ─────────► │ GameSession' │ + Event
//! └──────┬───────┘   apply    └──────┬───────┘
//!        └──────── Arc<GameMap> ─────┘
//! ```

mod player;
mod unit;

pub use player::{ACTIONS_PER_TURN, MAX_PLAYERS, Player, PlayerColor};
pub use unit::{Unit, UnitId, UnitKind};

use crate::error::SessionError;
use crate::graph::Layer;
use crate::map::{Coord, GameMap, ResourceSite, Rgb};
use crate::path::Route;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Turns between automatic removals of dead units.
pub const DEFAULT_CLEANUP_INTERVAL: u32 = 10;

/// An order issued by the active player, or a housekeeping request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// End the active player's turn.
    PassTurn,
    /// Found a base on a land tile. Costs one action.
    SpawnBase {
        /// Target tile.
        at: Coord,
    },
    /// Create a mobile unit for a terrain layer. Costs one action.
    SpawnUnit {
        /// Target tile.
        at: Coord,
        /// Terrain the unit moves on.
        layer: Layer,
    },
    /// Move a unit along the shortest route on its layer. Costs one action.
    MoveUnit {
        /// Unit to move.
        unit: UnitId,
        /// Destination tile.
        to: Coord,
    },
    /// Mark every unit dead.
    KillAll,
    /// Remove dead units.
    Cleanup,
}

/// What a command did.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Play passed to another player.
    TurnPassed {
        /// Seat number of the new active player.
        player: u8,
        /// Turn number after passing.
        turn: u32,
        /// Dead units removed by the periodic cleanup.
        cleaned: usize,
    },
    /// A unit was created.
    Spawned(Unit),
    /// A unit moved.
    Moved {
        /// The unit.
        unit: UnitId,
        /// Route taken.
        route: Route,
    },
    /// Units were marked dead.
    Killed(usize),
    /// Dead units were removed.
    CleanedUp(usize),
}

/// State of one game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    map: Arc<GameMap>,
    deposits: Vec<ResourceSite>,
    players: Vec<Player>,
    active: usize,
    turn: u32,
    units: Vec<Unit>,
    next_unit: u32,
    cleanup_interval: u32,
    cleanup_timer: u32,
}

impl GameSession {
    /// Start a game with `players` seats on `map`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::PlayerCount`] unless `1 <= players <= 7`.
    pub fn new_game(
        map: Arc<GameMap>,
        deposits: Vec<ResourceSite>,
        players: usize,
    ) -> Result<Self, SessionError> {
        let seats = u8::try_from(players)
            .ok()
            .filter(|n| (1..=MAX_PLAYERS).contains(&usize::from(*n)))
            .ok_or(SessionError::PlayerCount {
                requested: players,
                max: MAX_PLAYERS,
            })?;
        let players = (1..=seats).filter_map(Player::seat).collect();
        Ok(Self {
            map,
            deposits,
            players,
            active: 0,
            turn: 1,
            units: Vec::new(),
            next_unit: 1,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
            cleanup_timer: DEFAULT_CLEANUP_INTERVAL,
        })
    }

    /// Change how many turns pass between automatic cleanups (0 disables them).
    #[must_use]
    pub const fn with_cleanup_interval(mut self, interval: u32) -> Self {
        self.cleanup_interval = interval;
        self.cleanup_timer = interval;
        self
    }

    /// The shared map.
    #[must_use]
    pub const fn map(&self) -> &Arc<GameMap> {
        &self.map
    }

    /// Resource deposits reported at generation.
    #[must_use]
    pub fn deposits(&self) -> &[ResourceSite] {
        &self.deposits
    }

    /// All players in seat order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn active_player(&self) -> &Player {
        &self.players[self.active]
    }

    /// Current turn, starting at 1. Increments after every seat has played.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// All units, dead ones included until cleanup.
    #[must_use]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Living units.
    pub fn living_units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|u| u.alive)
    }

    /// A unit by id.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    /// The living unit standing on a tile.
    #[must_use]
    pub fn unit_at(&self, at: Coord) -> Option<&Unit> {
        self.living_units().find(|u| u.position == at)
    }

    /// Display colour of a unit's owner.
    #[must_use]
    pub fn unit_color(&self, unit: &Unit) -> Rgb {
        self.players
            .iter()
            .find(|p| p.number == unit.owner)
            .map_or(PlayerColor::White.rgb(), |p| p.color.rgb())
    }

    /// Check that stored indices and ids are coherent.
    ///
    /// # Errors
    ///
    /// Returns a description of the first inconsistency found.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.players.is_empty() || self.players.len() > MAX_PLAYERS {
            return Err("player count out of range");
        }
        if self.active >= self.players.len() {
            return Err("active player index out of range");
        }
        for (i, player) in self.players.iter().enumerate() {
            if self.players[..i].iter().any(|p| p.number == player.number) {
                return Err("duplicate player number");
            }
        }
        if self.turn == 0 || self.next_unit == 0 {
            return Err("counters start at 1");
        }
        for (i, unit) in self.units.iter().enumerate() {
            if !self.map.in_bounds(unit.position) {
                return Err("unit outside the map");
            }
            if !self.map.is_layer(unit.position, unit.kind.layer()) {
                return Err("unit on the wrong terrain");
            }
            if self.units[..i].iter().any(|u| u.id == unit.id) {
                return Err("duplicate unit id");
            }
            if !self.players.iter().any(|p| p.number == unit.owner) {
                return Err("unit owned by an unknown player");
            }
            if unit.id.0 >= self.next_unit {
                return Err("unit id beyond the id counter");
            }
            if unit.alive
                && self.units[..i]
                    .iter()
                    .any(|u| u.alive && u.position == unit.position)
            {
                return Err("two living units on one tile");
            }
        }
        for deposit in &self.deposits {
            if !self.map.in_bounds(deposit.coord) {
                return Err("deposit outside the map");
            }
            if !self.map.is_layer(deposit.coord, Layer::Land) {
                return Err("deposit on a sea tile");
            }
        }
        Ok(())
    }

    /// Apply a command, returning the next session and what happened.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the command is not legal in this state;
    /// the session is unchanged in that case.
    pub fn apply(&self, command: Command) -> Result<(Self, Event), SessionError> {
        let mut next = self.clone();
        let event = match command {
            Command::PassTurn => next.pass_turn()?,
            Command::SpawnBase { at } => next.spawn(at, UnitKind::Base)?,
            Command::SpawnUnit { at, layer } => next.spawn(at, UnitKind::Mobile(layer))?,
            Command::MoveUnit { unit, to } => next.move_unit(unit, to)?,
            Command::KillAll => {
                let mut killed = 0;
                for unit in next.units.iter_mut().filter(|u| u.alive) {
                    unit.alive = false;
                    killed += 1;
                }
                Event::Killed(killed)
            }
            Command::Cleanup => Event::CleanedUp(next.remove_dead()),
        };
        debug!(?command, ?event, "applied command");
        Ok((next, event))
    }

    fn pass_turn(&mut self) -> Result<Event, SessionError> {
        self.active = (self.active + 1) % self.players.len();
        if self.active == 0 {
            self.turn = self.turn.checked_add(1).ok_or(SessionError::TurnLimit)?;
        }
        self.players[self.active].actions = ACTIONS_PER_TURN;

        let mut cleaned = 0;
        if self.cleanup_interval > 0 {
            self.cleanup_timer = self.cleanup_timer.saturating_sub(1);
            if self.cleanup_timer == 0 {
                self.cleanup_timer = self.cleanup_interval;
                cleaned = self.remove_dead();
            }
        }

        Ok(Event::TurnPassed {
            player: self.players[self.active].number,
            turn: self.turn,
            cleaned,
        })
    }

    fn remove_dead(&mut self) -> usize {
        let before = self.units.len();
        self.units.retain(|u| u.alive);
        before - self.units.len()
    }

    fn spend_action(&mut self) -> Result<(), SessionError> {
        let player = &mut self.players[self.active];
        if !player.can_act() {
            return Err(SessionError::NoActionsLeft(player.number));
        }
        player.actions -= 1;
        Ok(())
    }

    fn check_target(
        &self,
        at: Coord,
        layer: Layer,
        mover: Option<UnitId>,
    ) -> Result<(), SessionError> {
        let tile = self.map.tile(at)?;
        if !layer.accepts(tile.elevation()) {
            return Err(SessionError::WrongTerrain { at, layer });
        }
        if self.unit_at(at).is_some_and(|u| Some(u.id) != mover) {
            return Err(SessionError::Occupied(at));
        }
        Ok(())
    }

    fn spawn(&mut self, at: Coord, kind: UnitKind) -> Result<Event, SessionError> {
        self.check_target(at, kind.layer(), None)?;
        let next_unit = self
            .next_unit
            .checked_add(1)
            .ok_or(SessionError::UnitIdsExhausted)?;
        self.spend_action()?;
        let unit = Unit {
            id: UnitId(self.next_unit),
            owner: self.players[self.active].number,
            kind,
            position: at,
            alive: true,
        };
        self.next_unit = next_unit;
        self.units.push(unit);
        Ok(Event::Spawned(unit))
    }

    fn move_unit(&mut self, id: UnitId, to: Coord) -> Result<Event, SessionError> {
        let player = self.players[self.active].number;
        let unit = *self.unit(id).ok_or(SessionError::UnknownUnit(id))?;
        if unit.owner != player {
            return Err(SessionError::NotOwner { unit: id, player });
        }
        if !unit.is_mobile() {
            return Err(SessionError::Immobile(id));
        }
        let layer = unit.kind.layer();
        self.check_target(to, layer, Some(id))?;

        let route = self
            .map
            .find_path(layer, unit.position, to)?
            .ok_or(SessionError::NoRoute {
                from: unit.position,
                to,
                layer,
            })?;
        self.spend_action()?;

        if let Some(u) = self.units.iter_mut().find(|u| u.id == id) {
            u.position = to;
        }
        Ok(Event::Moved { unit: id, route })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::field::FnField;
    use crate::map::generate_with;

    /// 8x4 world: land where the sampled x coordinate is positive.
    fn session(players: usize) -> GameSession {
        let config = WorldConfig::new(8, 0);
        let field = FnField::new(|[x, _, _]: [f64; 3]| x);
        let (map, _) = generate_with(&config, &field, None).unwrap();
        GameSession::new_game(Arc::new(map), Vec::new(), players).unwrap()
    }

    const LAND: Coord = Coord::new(4, 2);
    const LAND_2: Coord = Coord::new(5, 1);
    const SEA: Coord = Coord::new(0, 2);
    const SEA_2: Coord = Coord::new(1, 1);

    #[test]
    fn test_fixture_terrain() {
        let s = session(1);
        assert!(s.map().is_layer(LAND, Layer::Land));
        assert!(s.map().is_layer(LAND_2, Layer::Land));
        assert!(s.map().is_layer(SEA, Layer::Sea));
        assert!(s.map().is_layer(SEA_2, Layer::Sea));
    }

    #[test]
    fn test_player_count_limits() {
        let config = WorldConfig::new(8, 0);
        let field = FnField::new(|_| 0.5);
        let (map, _) = generate_with(&config, &field, None).unwrap();
        let map = Arc::new(map);
        assert!(GameSession::new_game(Arc::clone(&map), Vec::new(), 0).is_err());
        assert!(GameSession::new_game(Arc::clone(&map), Vec::new(), 8).is_err());
        let s = GameSession::new_game(map, Vec::new(), 7).unwrap();
        assert_eq!(s.players().len(), 7);
        assert_eq!(s.active_player().number, 1);
    }

    #[test]
    fn test_pass_turn_cycles_players() {
        let s = session(3);
        let (s, e) = s.apply(Command::PassTurn).unwrap();
        assert_eq!(
            e,
            Event::TurnPassed {
                player: 2,
                turn: 1,
                cleaned: 0
            }
        );
        let (s, _) = s.apply(Command::PassTurn).unwrap();
        let (s, e) = s.apply(Command::PassTurn).unwrap();
        assert_eq!(s.active_player().number, 1);
        assert_eq!(s.turn(), 2);
        assert!(matches!(e, Event::TurnPassed { player: 1, turn: 2, .. }));
    }

    #[test]
    fn test_apply_leaves_original_untouched() {
        let s = session(2);
        let (next, _) = s.apply(Command::SpawnBase { at: LAND }).unwrap();
        assert!(s.units().is_empty());
        assert_eq!(next.units().len(), 1);
        assert_eq!(s.active_player().actions, ACTIONS_PER_TURN);
        assert_eq!(next.active_player().actions, ACTIONS_PER_TURN - 1);
    }

    #[test]
    fn test_base_requires_land() {
        let s = session(1);
        let err = s.apply(Command::SpawnBase { at: SEA }).unwrap_err();
        assert_eq!(
            err,
            SessionError::WrongTerrain {
                at: SEA,
                layer: Layer::Land
            }
        );
    }

    #[test]
    fn test_spawn_consumes_action() {
        let s = session(2);
        let (s, e) = s.apply(Command::SpawnBase { at: LAND }).unwrap();
        assert!(matches!(e, Event::Spawned(Unit { kind: UnitKind::Base, owner: 1, .. })));
        let err = s
            .apply(Command::SpawnUnit {
                at: SEA,
                layer: Layer::Sea,
            })
            .unwrap_err();
        assert_eq!(err, SessionError::NoActionsLeft(1));
    }

    #[test]
    fn test_occupied_tile_rejected() {
        let s = session(2);
        let (s, _) = s.apply(Command::SpawnBase { at: LAND }).unwrap();
        let (s, _) = s.apply(Command::PassTurn).unwrap();
        let err = s
            .apply(Command::SpawnUnit {
                at: LAND,
                layer: Layer::Land,
            })
            .unwrap_err();
        assert_eq!(err, SessionError::Occupied(LAND));
    }

    #[test]
    fn test_move_follows_route() {
        let s = session(1);
        let (s, e) = s
            .apply(Command::SpawnUnit {
                at: SEA,
                layer: Layer::Sea,
            })
            .unwrap();
        let Event::Spawned(unit) = e else {
            panic!("expected spawn")
        };
        let (s, _) = s.apply(Command::PassTurn).unwrap();
        let (s, e) = s
            .apply(Command::MoveUnit {
                unit: unit.id,
                to: SEA_2,
            })
            .unwrap();
        let Event::Moved { route, .. } = e else {
            panic!("expected move")
        };
        assert_eq!(route.steps.first(), Some(&SEA));
        assert_eq!(route.steps.last(), Some(&SEA_2));
        assert_eq!(s.unit(unit.id).unwrap().position, SEA_2);
    }

    #[test]
    fn test_sea_unit_cannot_move_onto_land() {
        let s = session(1);
        let (s, _) = s
            .apply(Command::SpawnUnit {
                at: SEA,
                layer: Layer::Sea,
            })
            .unwrap();
        let (s, _) = s.apply(Command::PassTurn).unwrap();
        let err = s
            .apply(Command::MoveUnit {
                unit: UnitId(1),
                to: LAND,
            })
            .unwrap_err();
        assert_eq!(
            err,
            SessionError::WrongTerrain {
                at: LAND,
                layer: Layer::Sea
            }
        );
    }

    #[test]
    fn test_bases_cannot_move() {
        let s = session(1);
        let (s, _) = s.apply(Command::SpawnBase { at: LAND }).unwrap();
        let (s, _) = s.apply(Command::PassTurn).unwrap();
        let err = s
            .apply(Command::MoveUnit {
                unit: UnitId(1),
                to: LAND_2,
            })
            .unwrap_err();
        assert_eq!(err, SessionError::Immobile(UnitId(1)));
    }

    #[test]
    fn test_cannot_move_other_players_unit() {
        let s = session(2);
        let (s, _) = s
            .apply(Command::SpawnUnit {
                at: LAND,
                layer: Layer::Land,
            })
            .unwrap();
        let (s, _) = s.apply(Command::PassTurn).unwrap();
        let err = s
            .apply(Command::MoveUnit {
                unit: UnitId(1),
                to: LAND_2,
            })
            .unwrap_err();
        assert_eq!(
            err,
            SessionError::NotOwner {
                unit: UnitId(1),
                player: 2
            }
        );
    }

    #[test]
    fn test_kill_and_cleanup() {
        let s = session(1);
        let (s, _) = s.apply(Command::SpawnBase { at: LAND }).unwrap();
        let (s, e) = s.apply(Command::KillAll).unwrap();
        assert_eq!(e, Event::Killed(1));
        assert_eq!(s.units().len(), 1);
        assert!(s.unit_at(LAND).is_none());
        let (s, e) = s.apply(Command::Cleanup).unwrap();
        assert_eq!(e, Event::CleanedUp(1));
        assert!(s.units().is_empty());
    }

    #[test]
    fn test_periodic_cleanup_on_pass() {
        let s = session(1).with_cleanup_interval(2);
        let (s, _) = s.apply(Command::SpawnBase { at: LAND }).unwrap();
        let (s, _) = s.apply(Command::KillAll).unwrap();
        let (s, e) = s.apply(Command::PassTurn).unwrap();
        assert!(matches!(e, Event::TurnPassed { cleaned: 0, .. }));
        let (s, e) = s.apply(Command::PassTurn).unwrap();
        assert!(matches!(e, Event::TurnPassed { cleaned: 1, .. }));
        assert!(s.units().is_empty());
    }

    #[test]
    fn test_validate() {
        let s = session(2);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_validate_catches_tampering() {
        let (s, _) = session(1).apply(Command::SpawnBase { at: LAND }).unwrap();
        assert!(s.validate().is_ok());

        let mut wet = s.clone();
        wet.units[0].position = SEA;
        assert_eq!(wet.validate(), Err("unit on the wrong terrain"));

        let mut twins = s.clone();
        let mut twin = twins.units[0];
        twin.position = LAND_2;
        twins.units.push(twin);
        assert_eq!(twins.validate(), Err("duplicate unit id"));

        let mut orphan = s.clone();
        orphan.units[0].owner = 5;
        assert_eq!(orphan.validate(), Err("unit owned by an unknown player"));

        let mut stacked = s.clone();
        let mut other = stacked.units[0];
        other.id = UnitId(2);
        stacked.next_unit = 3;
        stacked.units.push(other);
        assert_eq!(stacked.validate(), Err("two living units on one tile"));
        stacked.units[0].alive = false;
        assert!(stacked.validate().is_ok());

        let mut seats = session(2);
        seats.players[1].number = 1;
        assert_eq!(seats.validate(), Err("duplicate player number"));

        let mut reset = s;
        reset.turn = 0;
        assert_eq!(reset.validate(), Err("counters start at 1"));
    }

    #[test]
    fn test_validate_rejects_sea_deposit() {
        let mut s = session(1);
        s.deposits.push(ResourceSite {
            coord: SEA,
            density: 0.9,
        });
        assert_eq!(s.validate(), Err("deposit on a sea tile"));
        s.deposits[0].coord = LAND;
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_exhausted_counters_are_errors() {
        let mut s = session(1);
        s.next_unit = u32::MAX;
        let err = s.apply(Command::SpawnBase { at: LAND }).unwrap_err();
        assert_eq!(err, SessionError::UnitIdsExhausted);
        assert_eq!(s.active_player().actions, ACTIONS_PER_TURN);

        let mut s = session(1);
        s.turn = u32::MAX;
        let err = s.apply(Command::PassTurn).unwrap_err();
        assert_eq!(err, SessionError::TurnLimit);
    }
}
