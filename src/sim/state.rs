//! Game state and core simulation types
//!
//! One mutable `GameState` owns every entity and is threaded `&mut` through
//! the tick pipeline. No globals, no back-references between entities.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;
use crate::tuning::Tuning;

/// Sprite palette (0xRRGGBB)
pub const COLOR_PISTOL_BULLET: u32 = 0xFFDC00;
pub const COLOR_SNIPER_BULLET: u32 = 0x00FF00;
pub const COLOR_SHOTGUN_BULLET: u32 = 0xFFB464;
pub const COLOR_AK_BULLET: u32 = 0xFF6464;
pub const COLOR_HOSTILE_BULLET: u32 = 0xC87878;
pub const COLOR_HIT_SPARK: u32 = 0xFFC832;
pub const COLOR_EXPLOSION: u32 = 0xFF7828;
pub const COLOR_PLAYER_HIT: u32 = 0xFF3232;
pub const COLOR_SHIELD: u32 = 0x78B4FF;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Simulation paused while the player picks a weapon upgrade
    WeaponChoice,
    /// Run ended; only restart is honored
    GameOver,
}

/// Discrete triggers for the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Shoot,
    Explosion,
    LevelUp,
}

/// Player weapons. Pistol is the non-selectable default; the rest are offered
/// at the every-fifth-level weapon-choice interlude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Weapon {
    #[default]
    Pistol,
    Sniper,
    Shotgun,
    Ak,
}

/// Shotgun pellet angles (radians off vertical)
const SHOTGUN_SPREAD: [f32; 5] = [-0.18, -0.09, 0.0, 0.09, 0.18];

impl Weapon {
    /// Milliseconds between shots
    pub fn cooldown_ms(&self) -> u64 {
        match self {
            Weapon::Pistol => 250,
            Weapon::Sniper => 600,
            Weapon::Shotgun => 700,
            Weapon::Ak => 120,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Weapon::Pistol => "pistol",
            Weapon::Sniper => "sniper",
            Weapon::Shotgun => "shotgun",
            Weapon::Ak => "ak",
        }
    }
}

/// A bullet to be realized by the tick orchestrator. Both the player's
/// weapons and Shooter enemies describe their fire this way instead of
/// pushing into the bullet collection themselves.
#[derive(Debug, Clone, Copy)]
pub struct BulletSpawn {
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: f32,
    pub friendly: bool,
    pub color: u32,
}

/// The player's ship. Position is the top-left corner of a
/// `PLAYER_WIDTH x PLAYER_HEIGHT` box.
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub health: i32,
    pub weapon: Weapon,
    pub last_shot_ms: u64,
}

impl Player {
    /// Fresh ship: centered horizontally, 80px above the bottom, at half
    /// health with the default pistol.
    pub fn new(max_health: i32) -> Self {
        Self {
            pos: Vec2::new(
                (FIELD_WIDTH - PLAYER_WIDTH) / 2.0,
                FIELD_HEIGHT - 80.0 - PLAYER_HEIGHT / 2.0,
            ),
            health: max_health / 2,
            weapon: Weapon::Pistol,
            last_shot_ms: 0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT) / 2.0
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.pos + Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }

    pub fn can_shoot(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_shot_ms) >= self.weapon.cooldown_ms()
    }

    /// Emit the current weapon's volley from just above the ship's nose and
    /// start the cooldown.
    pub fn shoot(&mut self, now_ms: u64, bullet_speed: f32) -> Vec<BulletSpawn> {
        self.last_shot_ms = now_ms;
        let muzzle = Vec2::new(self.center().x, self.pos.y - 8.0);
        match self.weapon {
            Weapon::Pistol => vec![BulletSpawn {
                pos: muzzle,
                vel: Vec2::new(0.0, -bullet_speed),
                damage: 1.0,
                friendly: true,
                color: COLOR_PISTOL_BULLET,
            }],
            Weapon::Sniper => vec![BulletSpawn {
                pos: muzzle,
                vel: Vec2::new(0.0, -bullet_speed * 1.6),
                damage: 4.0,
                friendly: true,
                color: COLOR_SNIPER_BULLET,
            }],
            Weapon::Shotgun => SHOTGUN_SPREAD
                .iter()
                .map(|&a| BulletSpawn {
                    pos: muzzle,
                    vel: Vec2::new(a.sin() * bullet_speed, -a.cos() * bullet_speed),
                    damage: 1.0,
                    friendly: true,
                    color: COLOR_SHOTGUN_BULLET,
                })
                .collect(),
            Weapon::Ak => vec![BulletSpawn {
                pos: muzzle,
                vel: Vec2::new(0.0, -bullet_speed),
                damage: 0.6,
                friendly: true,
                color: COLOR_AK_BULLET,
            }],
        }
    }
}

/// A bullet entity. Position is the center of a `2*radius` square box.
#[derive(Debug, Clone)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: f32,
    pub friendly: bool,
    pub radius: f32,
    pub color: u32,
}

impl Bullet {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(self.radius))
    }

    /// Advance one step; returns false once the bullet has left the field on
    /// any side.
    pub fn advance(&mut self, dt: f32, field: Vec2) -> bool {
        self.pos += self.vel * dt;
        let b = self.aabb();
        b.max.y > 0.0 && b.min.y < field.y && b.max.x > 0.0 && b.min.x < field.x
    }
}

/// Enemy behavior variants - a closed tagged union carrying each variant's
/// own state, dispatched in `ai::advance`.
#[derive(Debug, Clone, PartialEq)]
pub enum EnemyKind {
    Basic,
    Zigzag {
        spawn_x: f32,
        elapsed: f32,
        amplitude: f32,
        frequency: f32,
    },
    Shooter {
        interval: f32,
        timer: f32,
    },
    Kamikaze,
    Shielded,
}

impl EnemyKind {
    /// Score awarded when an enemy of this kind is destroyed by bullets
    pub fn score(&self) -> u32 {
        match self {
            EnemyKind::Shielded => 30,
            EnemyKind::Kamikaze => 20,
            EnemyKind::Shooter { .. } => 18,
            EnemyKind::Basic | EnemyKind::Zigzag { .. } => 10,
        }
    }

    /// Payload-free tag for snapshots
    pub fn tag(&self) -> EnemyTag {
        match self {
            EnemyKind::Basic => EnemyTag::Basic,
            EnemyKind::Zigzag { .. } => EnemyTag::Zigzag,
            EnemyKind::Shooter { .. } => EnemyTag::Shooter,
            EnemyKind::Kamikaze => EnemyTag::Kamikaze,
            EnemyKind::Shielded => EnemyTag::Shielded,
        }
    }
}

/// Variant tag without per-enemy state, as exposed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyTag {
    Basic,
    Zigzag,
    Shooter,
    Kamikaze,
    Shielded,
}

/// An enemy entity. Position is the top-left corner of a `size x size` box.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub health: f32,
    pub kind: EnemyKind,
}

impl Enemy {
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.pos + Vec2::splat(self.size))
    }
}

/// A cosmetic particle. Velocity is px/tick, not px/sec; particles decay on
/// tick counts and carry no gameplay effect.
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: i32,
    pub color: u32,
    pub size: f32,
}

/// Complete game state. Exactly one instance per run, owned by the driver
/// and mutated only inside `tick`.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG; the only randomness source in the sim
    pub rng: Pcg32,
    /// Balance knobs
    pub tuning: Tuning,
    /// Score; only ever increases within a run
    pub score: u32,
    /// Level; recomputed from score, only ever increases within a run
    pub level: u32,
    /// Difficulty boosts; start at 1.0 and only grow until restart
    pub size_boost: f32,
    pub speed_boost: f32,
    pub phase: GamePhase,
    /// Spawn-wave timer accumulator (ms)
    pub spawn_timer_ms: f32,
    /// Timestamp of the most recent level-up, for the HUD banner (0 = never)
    pub last_level_up_ms: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub particles: Vec<Particle>,
    /// Audio triggers raised this tick, drained by `snapshot`
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let player = Player::new(tuning.player_max_health);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            score: 0,
            level: 1,
            size_boost: 1.0,
            speed_boost: 1.0,
            phase: GamePhase::Playing,
            spawn_timer_ms: 0.0,
            last_level_up_ms: 0,
            player,
            enemies: Vec::new(),
            bullets: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Full reset back to a fresh run. The RNG keeps advancing on its seed
    /// stream; everything else returns to initial values.
    pub fn restart(&mut self) {
        log::info!("restart requested (final score {})", self.score);
        self.score = 0;
        self.level = 1;
        self.size_boost = 1.0;
        self.speed_boost = 1.0;
        self.phase = GamePhase::Playing;
        self.spawn_timer_ms = 0.0;
        self.last_level_up_ms = 0;
        self.player = Player::new(self.tuning.player_max_health);
        self.enemies.clear();
        self.bullets.clear();
        self.particles.clear();
        self.events.clear();
        self.next_id = 1;
    }

    /// Realize a bullet descriptor into a live entity
    pub fn spawn_bullet(&mut self, spawn: BulletSpawn) {
        let id = self.next_entity_id();
        let radius = if spawn.friendly {
            FRIENDLY_BULLET_RADIUS
        } else {
            HOSTILE_BULLET_RADIUS
        };
        self.bullets.push(Bullet {
            id,
            pos: spawn.pos,
            vel: spawn.vel,
            damage: spawn.damage,
            friendly: spawn.friendly,
            radius,
            color: spawn.color,
        });
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.enemies.sort_by_key(|e| e.id);
        self.bullets.sort_by_key(|b| b.id);
    }

    /// Build the per-tick output for the rendering/audio collaborators,
    /// draining this tick's events.
    pub fn snapshot(&mut self) -> Snapshot {
        Snapshot {
            player: PlayerView {
                pos: self.player.pos,
                size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            },
            enemies: self
                .enemies
                .iter()
                .map(|e| EnemyView {
                    pos: e.pos,
                    tag: e.kind.tag(),
                    size: e.size,
                    shield_hint: matches!(e.kind, EnemyKind::Shielded).then_some(COLOR_SHIELD),
                })
                .collect(),
            bullets: self
                .bullets
                .iter()
                .map(|b| SpriteView {
                    pos: b.pos,
                    color: b.color,
                    radius: b.radius,
                })
                .collect(),
            particles: self
                .particles
                .iter()
                .map(|p| SpriteView {
                    pos: p.pos,
                    color: p.color,
                    radius: p.size,
                })
                .collect(),
            hud: Hud {
                score: self.score,
                level: self.level,
                health: self.player.health,
                weapon: self.player.weapon,
                phase: self.phase,
                last_level_up_ms: self.last_level_up_ms,
            },
            events: std::mem::take(&mut self.events),
        }
    }
}

/// Renderable snapshot of one tick, the core's entire interface to the
/// rendering and audio front end
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub bullets: Vec<SpriteView>,
    pub particles: Vec<SpriteView>,
    pub hud: Hud,
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyView {
    pub pos: Vec2,
    pub tag: EnemyTag,
    pub size: f32,
    /// Extra ring color for shielded enemies
    pub shield_hint: Option<u32>,
}

/// A circle sprite (bullets and particles)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpriteView {
    pub pos: Vec2,
    pub color: u32,
    pub radius: f32,
}

/// HUD numbers for the text overlay
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hud {
    pub score: u32,
    pub level: u32,
    pub health: i32,
    pub weapon: Weapon,
    pub phase: GamePhase,
    pub last_level_up_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_starts_at_half_health() {
        let player = Player::new(10);
        assert_eq!(player.health, 5);
        assert_eq!(player.weapon, Weapon::Pistol);
        assert!((player.center().x - FIELD_WIDTH / 2.0).abs() < 0.001);
    }

    #[test]
    fn test_fire_cooldown_gate() {
        let mut player = Player::new(10);
        assert!(player.can_shoot(1000));
        player.shoot(1000, 700.0);
        assert!(!player.can_shoot(1100));
        assert!(player.can_shoot(1250));
    }

    #[test]
    fn test_weapon_volleys() {
        let mut player = Player::new(10);

        let pistol = player.shoot(1000, 700.0);
        assert_eq!(pistol.len(), 1);
        assert_eq!(pistol[0].vel, Vec2::new(0.0, -700.0));
        assert_eq!(pistol[0].damage, 1.0);
        assert!(pistol[0].friendly);

        player.weapon = Weapon::Sniper;
        let sniper = player.shoot(2000, 700.0);
        assert_eq!(sniper[0].vel.y, -700.0 * 1.6);
        assert_eq!(sniper[0].damage, 4.0);

        player.weapon = Weapon::Shotgun;
        let shotgun = player.shoot(3000, 700.0);
        assert_eq!(shotgun.len(), 5);
        // Spread is symmetric around straight-up
        assert!((shotgun[0].vel.x + shotgun[4].vel.x).abs() < 0.001);
        assert_eq!(shotgun[2].vel.x, 0.0);
        assert!(shotgun.iter().all(|s| s.vel.y < 0.0));

        player.weapon = Weapon::Ak;
        let ak = player.shoot(4000, 700.0);
        assert_eq!(ak[0].damage, 0.6);
        assert_eq!(Weapon::Ak.cooldown_ms(), 120);
    }

    #[test]
    fn test_variant_scores() {
        assert_eq!(EnemyKind::Shielded.score(), 30);
        assert_eq!(EnemyKind::Kamikaze.score(), 20);
        assert_eq!(
            EnemyKind::Shooter {
                interval: 1.0,
                timer: 0.0
            }
            .score(),
            18
        );
        assert_eq!(EnemyKind::Basic.score(), 10);
        assert_eq!(
            EnemyKind::Zigzag {
                spawn_x: 0.0,
                elapsed: 0.0,
                amplitude: 50.0,
                frequency: 1.0
            }
            .score(),
            10
        );
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = GameState::new(7, Tuning::default());
        state.score = 450;
        state.level = 5;
        state.size_boost = 1.48;
        state.speed_boost = 1.72;
        state.phase = GamePhase::GameOver;
        state.player.health = 0;
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            pos: Vec2::new(100.0, 100.0),
            size: 40.0,
            speed: 100.0,
            health: 1.0,
            kind: EnemyKind::Basic,
        });

        state.restart();

        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.size_boost, 1.0);
        assert_eq!(state.speed_boost, 1.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.enemies.is_empty());
        assert!(state.bullets.is_empty());
        assert_eq!(state.player.health, 5);
        assert_eq!(state.player.weapon, Weapon::Pistol);
    }

    #[test]
    fn test_snapshot_drains_events() {
        let mut state = GameState::new(1, Tuning::default());
        state.events.push(GameEvent::Shoot);
        state.events.push(GameEvent::Explosion);

        let snap = state.snapshot();
        assert_eq!(snap.events, vec![GameEvent::Shoot, GameEvent::Explosion]);
        assert!(state.events.is_empty());

        let snap = state.snapshot();
        assert!(snap.events.is_empty());
    }

    #[test]
    fn test_snapshot_shield_hint() {
        let mut state = GameState::new(1, Tuning::default());
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            pos: Vec2::ZERO,
            size: 40.0,
            speed: 80.0,
            health: 3.0,
            kind: EnemyKind::Shielded,
        });
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            pos: Vec2::ZERO,
            size: 30.0,
            speed: 80.0,
            health: 1.0,
            kind: EnemyKind::Basic,
        });

        let snap = state.snapshot();
        assert_eq!(snap.enemies[0].shield_hint, Some(COLOR_SHIELD));
        assert_eq!(snap.enemies[1].shield_hint, None);
    }
}
