//! NPC behavior modules.
//!
//! Characters carry a list of behavior modules. Each update picks the
//! highest-priority module that applies to the current surroundings and
//! applies it. `update` is a pure function: movement cadence lives in the
//! NPC's own [`MovementState`], so there is no shared timer table.
//!
//! Stored records are tagged by `type`:
//!
//! ```json
//! { "type": "movement", "priority": 1, "direction": "left", "interval_ms": 500 }
//! ```

use serde::{Deserialize, Serialize};

/// Tile coordinate on a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TilePos {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
}

impl TilePos {
    /// Creates a tile position.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another tile.
    pub fn distance(&self, other: TilePos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The neighbouring tile in `direction`, clamped at the map origin.
    pub fn step(&self, direction: Direction) -> TilePos {
        match direction {
            Direction::Up => TilePos::new(self.x, self.y.saturating_sub(1)),
            Direction::Down => TilePos::new(self.x, self.y.saturating_add(1)),
            Direction::Left => TilePos::new(self.x.saturating_sub(1), self.y),
            Direction::Right => TilePos::new(self.x.saturating_add(1), self.y),
        }
    }

    /// Dominant direction from this tile toward `target`, if they differ.
    pub fn direction_to(&self, target: TilePos) -> Option<Direction> {
        let dx = i64::from(target.x) - i64::from(self.x);
        let dy = i64::from(target.y) - i64::from(self.y);
        if dx == 0 && dy == 0 {
            return None;
        }
        if dx.abs() >= dy.abs() {
            Some(if dx > 0 {
                Direction::Right
            } else {
                Direction::Left
            })
        } else {
            Some(if dy > 0 { Direction::Down } else { Direction::Up })
        }
    }
}

/// Facing or movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

/// What the NPC is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    #[default]
    Idle,
    Walking,
    Talking,
    Attacking,
    Guarding,
}

/// Walks one tile in a fixed direction every `interval_ms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementModule {
    pub priority: u8,
    pub direction: Direction,
    pub interval_ms: u64,
}

/// Faces and talks to the player when they come within `radius` tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionModule {
    pub priority: u8,
    pub radius: u32,
    pub dialogue_id: String,
}

/// Attacks the player inside `aggro_radius` tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatModule {
    pub priority: u8,
    pub aggro_radius: u32,
    pub damage: u32,
}

/// Guards a post and holds position while the player is within `radius`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityModule {
    pub priority: u8,
    pub post: TilePos,
    pub radius: u32,
}

/// A behavior module attached to a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BehaviorModule {
    Movement(MovementModule),
    Interaction(InteractionModule),
    Combat(CombatModule),
    Authority(AuthorityModule),
}

impl BehaviorModule {
    /// Module priority; higher wins.
    pub fn priority(&self) -> u8 {
        match self {
            BehaviorModule::Movement(m) => m.priority,
            BehaviorModule::Interaction(m) => m.priority,
            BehaviorModule::Combat(m) => m.priority,
            BehaviorModule::Authority(m) => m.priority,
        }
    }

    /// Whether this module wants to act given the NPC and its surroundings.
    pub fn applies(&self, npc: &NpcState, surroundings: &Surroundings) -> bool {
        let player_within = |radius: u32| {
            surroundings
                .player
                .is_some_and(|p| npc.position.distance(p) <= radius)
        };
        match self {
            BehaviorModule::Movement(_) => true,
            BehaviorModule::Interaction(m) => player_within(m.radius),
            BehaviorModule::Combat(m) => player_within(m.aggro_radius),
            BehaviorModule::Authority(m) => surroundings
                .player
                .is_some_and(|p| m.post.distance(p) <= m.radius),
        }
    }
}

/// Per-NPC movement bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MovementState {
    /// Timestamp of the last tile step, in milliseconds.
    pub last_moved_ms: u64,
}

/// Runtime state of one NPC.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NpcState {
    pub position: TilePos,
    pub facing: Direction,
    pub activity: Activity,
    pub movement: MovementState,
}

/// What the NPC can observe this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Surroundings {
    pub player: Option<TilePos>,
}

/// Advances an NPC by one tick.
///
/// The highest-priority applicable module runs; ties go to the module listed
/// first. With no applicable module the NPC goes idle in place.
pub fn update(
    npc: &NpcState,
    modules: &[BehaviorModule],
    surroundings: &Surroundings,
    now_ms: u64,
) -> NpcState {
    let mut active: Option<&BehaviorModule> = None;
    for module in modules {
        if !module.applies(npc, surroundings) {
            continue;
        }
        if active.map_or(true, |a| module.priority() > a.priority()) {
            active = Some(module);
        }
    }

    let mut next = npc.clone();
    match active {
        None => next.activity = Activity::Idle,
        Some(BehaviorModule::Movement(m)) => {
            if now_ms.saturating_sub(npc.movement.last_moved_ms) >= m.interval_ms {
                next.position = npc.position.step(m.direction);
                next.movement.last_moved_ms = now_ms;
            }
            next.facing = m.direction;
            next.activity = Activity::Walking;
        }
        Some(BehaviorModule::Interaction(_)) => {
            face_player(&mut next, surroundings);
            next.activity = Activity::Talking;
        }
        Some(BehaviorModule::Combat(_)) => {
            face_player(&mut next, surroundings);
            next.activity = Activity::Attacking;
        }
        Some(BehaviorModule::Authority(m)) => {
            if let Some(dir) = npc.position.direction_to(m.post) {
                next.facing = dir;
            }
            next.activity = Activity::Guarding;
        }
    }
    next
}

fn face_player(npc: &mut NpcState, surroundings: &Surroundings) {
    if let Some(dir) = surroundings
        .player
        .and_then(|p| npc.position.direction_to(p))
    {
        npc.facing = dir;
    }
}
