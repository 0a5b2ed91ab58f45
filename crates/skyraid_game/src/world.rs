use log::info;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::entities::{Bullet, Enemy, Player};
use crate::input::InputState;
use crate::rect::{Rect, Rectf};
use crate::sprite::Sprite;
use crate::{
    BACKGROUND_SCROLL_SPEED, ENEMY_HEIGHT, ENEMY_SPAWN_INTERVAL, ENEMY_WIDTH,
    PLAYER_BULLET_HEIGHT, PLAYER_BULLET_WIDTH, PLAYER_HEIGHT, PLAYER_SPEED, PLAYER_WIDTH,
    SCREEN_HEIGHT, SCREEN_WIDTH,
};

/// One-shot audio requests produced during an update pass. The simulation
/// never touches the audio device; the frontend plays these back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    EnemyFire,
    PlayerFire,
    Explosion,
}

/// The whole game state: the player, the three entity collections, the
/// scrolling background pair and the spawn/fire timers.
///
/// Every collection is owned outright; removal is a single retain or remove,
/// run once per phase, so no dead entity is ever visible to a later phase of
/// the same frame.
pub struct World {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub background: [Sprite; 2],
    spawn_timer: f32,
    can_shoot: bool,
    rng: SmallRng,
}

impl World {
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }

    /// Deterministic world for tests.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Self {
        let screen = Rect::new(0, 0, SCREEN_WIDTH, SCREEN_HEIGHT);
        let (w, h) = (SCREEN_WIDTH as f32, SCREEN_HEIGHT as f32);
        World {
            player: Player::new(),
            enemies: Vec::new(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            background: [
                Sprite::new(screen, Rectf::new(0.0, 0.0, w, h), 0.0),
                Sprite::new(screen, Rectf::new(w, 0.0, w, h), 0.0),
            ],
            spawn_timer: 0.0,
            can_shoot: true,
            rng,
        }
    }

    /// Re-arm the fire gate. Called on the frame the fire key is released, so
    /// holding the key spawns exactly one bullet per discrete press.
    pub fn release_fire(&mut self) {
        self.can_shoot = true;
    }

    /// Advance the whole simulation by `dt` seconds. Sound cues produced this
    /// tick are appended to `sounds`.
    pub fn update(&mut self, dt: f32, input: &InputState, sounds: &mut Vec<SoundCue>) {
        self.scroll_background(dt);
        self.move_player(dt, input);
        self.fire_player_bullet(input, sounds);
        self.update_enemies(dt, sounds);
        self.spawn_enemies(dt);
        self.update_bullets(dt);
        self.check_collisions(sounds);
    }

    fn scroll_background(&mut self, dt: f32) {
        for tile in &mut self.background {
            tile.dst.x -= BACKGROUND_SCROLL_SPEED * dt;
        }
        // Snap the pair back once the trailing tile reaches the left edge.
        if self.background[1].dst.x <= 0.0 {
            self.background[0].dst.x = 0.0;
            self.background[1].dst.x = SCREEN_WIDTH as f32;
        }
    }

    fn move_player(&mut self, dt: f32, input: &InputState) {
        self.player.animate(dt);

        // The ship is drawn rotated 90 degrees, so the clamping margins use
        // the sprite's height on the left bound and width on the bottom.
        let d = &mut self.player.sprite.dst;
        let step = PLAYER_SPEED * dt;
        if input.left && d.x > d.h {
            d.x -= step;
        } else if input.right && d.x < (SCREEN_WIDTH / 2) as f32 {
            d.x += step;
        }
        if input.up && d.y > 0.0 {
            d.y -= step;
        } else if input.down && d.y < SCREEN_HEIGHT as f32 - d.w {
            d.y += step;
        }
    }

    fn fire_player_bullet(&mut self, input: &InputState, sounds: &mut Vec<SoundCue>) {
        if input.fire && self.can_shoot {
            self.can_shoot = false;
            self.player_bullets
                .push(Bullet::player_shot(&self.player.sprite.dst));
            sounds.push(SoundCue::PlayerFire);
        }
    }

    fn update_enemies(&mut self, dt: f32, sounds: &mut Vec<SoundCue>) {
        for enemy in &mut self.enemies {
            if enemy.update(dt, &mut self.enemy_bullets) {
                sounds.push(SoundCue::EnemyFire);
            }
        }
        self.enemies
            .retain(|e| e.sprite.dst.x >= -e.sprite.dst.h);
    }

    fn spawn_enemies(&mut self, dt: f32) {
        self.spawn_timer += dt;
        if self.spawn_timer > ENEMY_SPAWN_INTERVAL {
            // Fire interval lands on 0.5, 1.0 or 1.5 seconds.
            let fire_interval = 0.5 + self.rng.gen_range(0..3) as f32 / 2.0;
            let y = (ENEMY_HEIGHT + self.rng.gen_range(0..SCREEN_HEIGHT - ENEMY_HEIGHT)) as f32;
            self.enemies.push(Enemy::new(y, fire_interval));
            self.spawn_timer = 0.0;
        }
    }

    fn update_bullets(&mut self, dt: f32) {
        for bullet in &mut self.player_bullets {
            bullet.update(dt);
        }
        self.player_bullets
            .retain(|b| b.sprite.dst.x <= SCREEN_WIDTH as f32);

        for bullet in &mut self.enemy_bullets {
            bullet.update(dt);
        }
        self.enemy_bullets
            .retain(|b| b.sprite.dst.x >= -b.sprite.dst.w);
    }

    fn check_collisions(&mut self, sounds: &mut Vec<SoundCue>) {
        let player_box = player_hitbox(&self.player.sprite.dst);

        // Ramming an enemy destroys it and counts as a player death.
        self.enemies.retain(|enemy| {
            let hit = player_box.intersects(&enemy_hitbox(&enemy.sprite.dst));
            if hit {
                info!("Player goes boom!");
                sounds.push(SoundCue::Explosion);
            }
            !hit
        });

        // Player bullets vs. enemies: each bullet takes out at most the first
        // enemy it overlaps; later bullets still get their own scan.
        let mut i = 0;
        while i < self.player_bullets.len() {
            let shot_box = player_bullet_hitbox(&self.player_bullets[i].sprite.dst);
            let hit = self
                .enemies
                .iter()
                .position(|e| shot_box.intersects(&enemy_hitbox(&e.sprite.dst)));
            match hit {
                Some(j) => {
                    sounds.push(SoundCue::Explosion);
                    self.enemies.remove(j);
                    self.player_bullets.remove(i);
                }
                None => i += 1,
            }
        }

        // Enemy bullets vs. the player: at most one hit registers per frame.
        let hit = self
            .enemy_bullets
            .iter()
            .position(|b| player_box.intersects(&b.sprite.dst));
        if let Some(i) = hit {
            info!("Player goes boom!");
            sounds.push(SoundCue::Explosion);
            self.enemy_bullets.remove(i);
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

// Hitboxes are hand-tuned around the rotated sprites rather than derived from
// the destination rectangles; gameplay balance depends on these offsets.

fn player_hitbox(d: &Rectf) -> Rectf {
    Rectf::new(
        d.x - PLAYER_HEIGHT as f32,
        d.y,
        PLAYER_HEIGHT as f32,
        PLAYER_WIDTH as f32,
    )
}

fn enemy_hitbox(d: &Rectf) -> Rectf {
    Rectf::new(
        d.x,
        d.y - ENEMY_WIDTH as f32,
        ENEMY_HEIGHT as f32,
        ENEMY_WIDTH as f32,
    )
}

fn player_bullet_hitbox(d: &Rectf) -> Rectf {
    Rectf::new(
        d.x - PLAYER_BULLET_HEIGHT as f32,
        d.y,
        PLAYER_BULLET_HEIGHT as f32,
        PLAYER_BULLET_WIDTH as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::{SoundCue, World};
    use crate::entities::{Bullet, Enemy};
    use crate::input::InputState;
    use crate::rect::Rectf;
    use crate::{ENEMY_HEIGHT, SCREEN_HEIGHT, SCREEN_WIDTH};

    fn world() -> World {
        World::seeded(0x5eed)
    }

    fn idle() -> InputState {
        InputState::default()
    }

    fn firing() -> InputState {
        InputState {
            fire: true,
            ..InputState::default()
        }
    }

    fn explosions(sounds: &[SoundCue]) -> usize {
        sounds
            .iter()
            .filter(|c| **c == SoundCue::Explosion)
            .count()
    }

    #[test]
    fn holding_fire_spawns_one_bullet_per_press() {
        let mut w = world();
        let mut sounds = Vec::new();

        w.update(0.01, &firing(), &mut sounds);
        assert_eq!(w.player_bullets.len(), 1);
        assert!(sounds.contains(&SoundCue::PlayerFire));

        // Still held: the gate stays closed.
        w.update(0.01, &firing(), &mut sounds);
        w.update(0.01, &firing(), &mut sounds);
        assert_eq!(w.player_bullets.len(), 1);

        // Release and press again: second bullet.
        w.release_fire();
        w.update(0.01, &firing(), &mut sounds);
        assert_eq!(w.player_bullets.len(), 2);
    }

    #[test]
    fn background_tiles_snap_back_one_screen_apart() {
        let mut w = world();
        let width = SCREEN_WIDTH as f32;
        assert_eq!(w.background[1].dst.x - w.background[0].dst.x, width);

        // Put the pair just before the snap point and scroll past it.
        w.background[0].dst.x = 0.5 - width;
        w.background[1].dst.x = 0.5;
        w.update(0.02, &idle(), &mut Vec::new());
        assert_eq!(w.background[0].dst.x, 0.0);
        assert_eq!(w.background[1].dst.x, width);
    }

    #[test]
    fn player_stays_inside_screen_bounds() {
        let mut w = world();
        let left_limit = w.player.sprite.dst.h;
        for _ in 0..500 {
            w.update(
                0.05,
                &InputState {
                    left: true,
                    up: true,
                    ..InputState::default()
                },
                &mut Vec::new(),
            );
        }
        assert!(w.player.sprite.dst.x >= left_limit - 400.0 * 0.05);
        assert!(w.player.sprite.dst.y >= -400.0 * 0.05);
    }

    #[test]
    fn enemy_past_left_edge_is_removed() {
        let mut w = world();
        let mut enemy = Enemy::new(300.0, 10.0);
        enemy.sprite.dst.x = -20.0;
        w.enemies.push(enemy);

        // One tick moves it from -20 to -50, past the -46 removal bound.
        w.update(0.2, &idle(), &mut Vec::new());
        assert!(w.enemies.is_empty());
    }

    #[test]
    fn spawn_timer_adds_an_enemy_at_the_right_edge() {
        let mut w = world();
        w.update(1.6, &idle(), &mut Vec::new());
        assert_eq!(w.enemies.len(), 1);
        let dst = &w.enemies[0].sprite.dst;
        assert_eq!(dst.x, SCREEN_WIDTH as f32);
        assert!(dst.y >= ENEMY_HEIGHT as f32);
        assert!(dst.y < SCREEN_HEIGHT as f32);

        // Timer restarts: no second spawn right away.
        w.update(0.1, &idle(), &mut Vec::new());
        assert_eq!(w.enemies.len(), 1);
    }

    #[test]
    fn player_bullet_and_enemy_destroy_each_other() {
        let mut w = world();
        let mut enemy = Enemy::new(330.0, 10.0);
        enemy.sprite.dst.x = 450.0;
        w.enemies.push(enemy);

        let mut bullet = Bullet::player_shot(&w.player.sprite.dst);
        bullet.sprite.dst.x = 500.0;
        bullet.sprite.dst.y = 300.0;
        w.player_bullets.push(bullet);

        let mut sounds = Vec::new();
        w.update(0.0, &idle(), &mut sounds);
        assert!(w.enemies.is_empty());
        assert!(w.player_bullets.is_empty());
        assert_eq!(explosions(&sounds), 1);
    }

    #[test]
    fn bullet_missing_the_enemy_leaves_both_alive() {
        let mut w = world();
        let mut enemy = Enemy::new(600.0, 10.0);
        enemy.sprite.dst.x = 900.0;
        w.enemies.push(enemy);

        let mut bullet = Bullet::player_shot(&w.player.sprite.dst);
        bullet.sprite.dst.x = 400.0;
        bullet.sprite.dst.y = 100.0;
        w.player_bullets.push(bullet);

        let mut sounds = Vec::new();
        w.update(0.0, &idle(), &mut sounds);
        assert_eq!(w.enemies.len(), 1);
        assert_eq!(w.player_bullets.len(), 1);
        assert_eq!(explosions(&sounds), 0);
    }

    #[test]
    fn ramming_an_enemy_destroys_it() {
        let mut w = world();
        // Default player sits at (256, 334); its hitbox spans x 156..256,
        // y 334..428. Park an enemy inside it.
        let mut enemy = Enemy::new(400.0, 10.0);
        enemy.sprite.dst.x = 200.0;
        w.enemies.push(enemy);

        let mut sounds = Vec::new();
        w.update(0.0, &idle(), &mut sounds);
        assert!(w.enemies.is_empty());
        assert_eq!(explosions(&sounds), 1);
    }

    #[test]
    fn only_one_enemy_bullet_hit_registers_per_frame() {
        let mut w = world();
        // Two bullets overlapping the player's hitbox on the same frame.
        let origin = Rectf::new(200.0, 400.0, 40.0, 46.0);
        w.enemy_bullets.push(Bullet::enemy_shot(&origin));
        w.enemy_bullets.push(Bullet::enemy_shot(&origin));

        let mut sounds = Vec::new();
        w.update(0.0, &idle(), &mut sounds);
        assert_eq!(w.enemy_bullets.len(), 1);
        assert_eq!(explosions(&sounds), 1);
    }

    #[test]
    fn player_bullet_leaving_the_screen_is_removed() {
        let mut w = world();
        let mut bullet = Bullet::player_shot(&w.player.sprite.dst);
        bullet.sprite.dst.x = SCREEN_WIDTH as f32 - 1.0;
        bullet.sprite.dst.y = 700.0;
        w.player_bullets.push(bullet);

        w.update(0.01, &idle(), &mut Vec::new());
        assert!(w.player_bullets.is_empty());
    }

    #[test]
    fn enemy_bullet_leaving_the_screen_is_removed() {
        let mut w = world();
        let mut bullet = Bullet::enemy_shot(&Rectf::new(0.0, 700.0, 40.0, 46.0));
        bullet.sprite.dst.x = -8.0;
        w.enemy_bullets.push(bullet);

        // One tick moves it from -8 to -11, past the -10 removal bound.
        w.update(0.01, &idle(), &mut Vec::new());
        assert!(w.enemy_bullets.is_empty());
    }

    #[test]
    fn enemy_shots_land_in_the_shared_collection() {
        let mut w = world();
        let mut enemy = Enemy::new(700.0, 0.5);
        enemy.sprite.dst.x = 900.0;
        w.enemies.push(enemy);

        let mut sounds = Vec::new();
        w.update(0.6, &idle(), &mut sounds);
        assert_eq!(w.enemy_bullets.len(), 1);
        assert!(sounds.contains(&SoundCue::EnemyFire));
    }
}
