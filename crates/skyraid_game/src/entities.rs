use crate::rect::{Rect, Rectf};
use crate::sprite::{Animation, Sprite};
use crate::{
    ENEMY_BULLET_HEIGHT, ENEMY_BULLET_SPEED, ENEMY_BULLET_SRC_X, ENEMY_BULLET_SRC_Y,
    ENEMY_BULLET_WIDTH, ENEMY_FRAME_COUNT, ENEMY_FRAME_TIME, ENEMY_HEIGHT, ENEMY_SPEED,
    ENEMY_SRC_X, ENEMY_SRC_Y, ENEMY_WIDTH, PLAYER_BULLET_HEIGHT, PLAYER_BULLET_SPEED,
    PLAYER_BULLET_SRC_X, PLAYER_BULLET_SRC_Y, PLAYER_BULLET_WIDTH, PLAYER_FRAME_COUNT,
    PLAYER_FRAME_TIME, PLAYER_HEIGHT, PLAYER_SRC_X, PLAYER_SRC_Y, PLAYER_WIDTH, SCREEN_HEIGHT,
    SCREEN_WIDTH,
};

/// The user-controlled ship. Movement is applied by the world from input
/// state; the only autonomous behavior is animation.
#[derive(Clone, Debug)]
pub struct Player {
    pub sprite: Sprite,
    anim: Animation,
}

impl Player {
    pub fn new() -> Self {
        Player {
            sprite: Sprite::new(
                Rect::new(PLAYER_SRC_X, PLAYER_SRC_Y, PLAYER_WIDTH, PLAYER_HEIGHT),
                Rectf::new(
                    (SCREEN_WIDTH / 4) as f32,
                    (SCREEN_HEIGHT / 2 - PLAYER_HEIGHT / 2) as f32,
                    PLAYER_WIDTH as f32,
                    PLAYER_HEIGHT as f32,
                ),
                90.0,
            ),
            anim: Animation::new(PLAYER_FRAME_COUNT, PLAYER_FRAME_TIME),
        }
    }

    pub fn animate(&mut self, dt: f32) {
        self.anim.advance(dt);
        self.anim.apply(&mut self.sprite);
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// A projectile with a constant horizontal velocity. Despawning is the
/// world's call, not the bullet's.
#[derive(Clone, Debug)]
pub struct Bullet {
    pub sprite: Sprite,
    speed: f32,
}

impl Bullet {
    /// A shot leaving the player's right edge, travelling right.
    pub fn player_shot(player: &Rectf) -> Self {
        Bullet {
            sprite: Sprite::new(
                Rect::new(
                    PLAYER_BULLET_SRC_X,
                    PLAYER_BULLET_SRC_Y,
                    PLAYER_BULLET_WIDTH,
                    PLAYER_BULLET_HEIGHT,
                ),
                Rectf::new(
                    player.x + (PLAYER_WIDTH - PLAYER_BULLET_WIDTH) as f32,
                    player.y + (PLAYER_HEIGHT / 2 - PLAYER_BULLET_WIDTH) as f32,
                    PLAYER_BULLET_WIDTH as f32,
                    PLAYER_BULLET_HEIGHT as f32,
                ),
                90.0,
            ),
            speed: PLAYER_BULLET_SPEED,
        }
    }

    /// A shot leaving an enemy, travelling left, offset upward so it appears
    /// to come from the ship's nose.
    pub fn enemy_shot(enemy: &Rectf) -> Self {
        Bullet {
            sprite: Sprite::new(
                Rect::new(
                    ENEMY_BULLET_SRC_X,
                    ENEMY_BULLET_SRC_Y,
                    ENEMY_BULLET_WIDTH,
                    ENEMY_BULLET_HEIGHT,
                ),
                Rectf::new(
                    enemy.x,
                    enemy.y - (ENEMY_BULLET_HEIGHT * 2) as f32,
                    ENEMY_BULLET_WIDTH as f32,
                    ENEMY_BULLET_HEIGHT as f32,
                ),
                0.0,
            ),
            speed: ENEMY_BULLET_SPEED,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.sprite.dst.x += self.speed * dt;
    }
}

/// An enemy ship: drifts left at constant speed and fires on its own
/// per-instance interval, drawn once at construction.
#[derive(Clone, Debug)]
pub struct Enemy {
    pub sprite: Sprite,
    anim: Animation,
    fire_timer: f32,
    fire_interval: f32,
}

impl Enemy {
    /// Spawns at the right screen edge at the given vertical position.
    pub fn new(y: f32, fire_interval: f32) -> Self {
        Enemy {
            sprite: Sprite::new(
                Rect::new(ENEMY_SRC_X, ENEMY_SRC_Y, ENEMY_WIDTH, ENEMY_HEIGHT),
                Rectf::new(
                    SCREEN_WIDTH as f32,
                    y,
                    ENEMY_WIDTH as f32,
                    ENEMY_HEIGHT as f32,
                ),
                -90.0,
            ),
            anim: Animation::new(ENEMY_FRAME_COUNT, ENEMY_FRAME_TIME),
            fire_timer: 0.0,
            fire_interval,
        }
    }

    /// Animation, movement and the fire check are independent concerns and
    /// all run on every tick. A fired bullet is appended to `shots`; returns
    /// true when that happened so the caller can play the shot sound.
    pub fn update(&mut self, dt: f32, shots: &mut Vec<Bullet>) -> bool {
        self.anim.advance(dt);
        self.anim.apply(&mut self.sprite);
        self.sprite.dst.x -= ENEMY_SPEED * dt;

        self.fire_timer += dt;
        if self.fire_timer > self.fire_interval {
            self.fire_timer = 0.0;
            shots.push(Bullet::enemy_shot(&self.sprite.dst));
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::{Bullet, Enemy, Player};
    use crate::rect::Rectf;
    use crate::{ENEMY_SPEED, PLAYER_BULLET_SPEED, SCREEN_WIDTH};

    #[test]
    fn player_bullet_moves_right() {
        let mut bullet = Bullet::player_shot(&Rectf::new(100.0, 200.0, 94.0, 100.0));
        let x0 = bullet.sprite.dst.x;
        bullet.update(0.5);
        let moved = bullet.sprite.dst.x - x0;
        assert!((moved - PLAYER_BULLET_SPEED * 0.5).abs() < 1e-3);
    }

    #[test]
    fn player_bullet_spawns_at_right_edge() {
        let bullet = Bullet::player_shot(&Rectf::new(100.0, 200.0, 94.0, 100.0));
        assert_eq!(bullet.sprite.dst.x, 184.0);
        assert_eq!(bullet.sprite.dst.y, 240.0);
    }

    #[test]
    fn enemy_bullet_moves_left() {
        let mut bullet = Bullet::enemy_shot(&Rectf::new(600.0, 100.0, 40.0, 46.0));
        assert_eq!(bullet.sprite.dst.x, 600.0);
        assert_eq!(bullet.sprite.dst.y, 50.0);
        bullet.update(0.1);
        assert!(bullet.sprite.dst.x < 600.0);
    }

    #[test]
    fn enemy_moves_left_by_speed_times_dt() {
        let mut enemy = Enemy::new(100.0, 10.0);
        let mut shots = Vec::new();
        let fired = enemy.update(0.1, &mut shots);
        assert!(!fired);
        assert!(shots.is_empty());
        let expect = SCREEN_WIDTH as f32 - ENEMY_SPEED * 0.1;
        assert!((enemy.sprite.dst.x - expect).abs() < 1e-3);
    }

    #[test]
    fn enemy_fires_once_its_interval_elapses() {
        let mut enemy = Enemy::new(100.0, 0.5);
        let mut shots = Vec::new();
        assert!(!enemy.update(0.3, &mut shots));
        assert!(enemy.update(0.3, &mut shots));
        assert_eq!(shots.len(), 1);
        // Bullet originates at the enemy's position, offset upward.
        assert_eq!(shots[0].sprite.dst.x, enemy.sprite.dst.x);
        assert_eq!(shots[0].sprite.dst.y, 50.0);
        // Timer restarted from zero.
        assert!(!enemy.update(0.3, &mut shots));
        assert_eq!(shots.len(), 1);
    }

    #[test]
    fn player_animation_cycles_the_source_column() {
        let mut player = Player::new();
        let mut columns = std::collections::HashSet::new();
        for _ in 0..8 {
            player.animate(0.21);
            columns.insert(player.sprite.src.x);
        }
        assert_eq!(
            columns,
            std::collections::HashSet::from([0, 94, 188, 282])
        );
    }
}
