//! Procedural world generation
//!
//! Owns every spawned platform, enemy and pickup. Content is only ever
//! generated upward: `top_most_y` tracks the highest row placed so far and
//! never moves back down.
//!
//! All randomness comes from the RNG handle passed into each call, consumed in
//! a fixed order, so a seeded session always builds the same world.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::{Enemy, Platform, Player, Powerup};
use crate::consts::*;
use crate::tuning::Tuning;

/// Spawned entities plus the generation frontier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Platforms in insertion order (landing resolution depends on it)
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub powerups: Vec<Powerup>,
    /// World y of the highest generated row
    pub top_most_y: f64,
    tuning: Tuning,
}

impl World {
    /// Empty world whose frontier sits at the bottom edge of the screen
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            platforms: Vec::new(),
            enemies: Vec::new(),
            powerups: Vec::new(),
            top_most_y: tuning.viewport.height,
            tuning: tuning.clone(),
        }
    }

    /// Starting layout: a staggered ladder, a wide safety platform above the
    /// floor, and one pickup so new players meet the jetpack early.
    pub fn initial(tuning: &Tuning) -> Self {
        let mut world = Self::new(tuning);
        let w = tuning.viewport.width;
        let h = tuning.viewport.height;

        let mut y = h - LADDER_BASE_RISE;
        for i in 0..LADDER_RUNGS {
            let x = LADDER_MARGIN_X + (i % 2) as f64 * (w - LADDER_STAGGER_INSET);
            world
                .platforms
                .push(Platform::new(x, y, LADDER_RUNG_WIDTH, PLATFORM_HEIGHT));
            y -= LADDER_SPACING;
        }

        world.platforms.push(Platform::new(
            w * SAFETY_X_FRACTION,
            h - SAFETY_RISE,
            w * SAFETY_WIDTH_FRACTION,
            PLATFORM_HEIGHT,
        ));
        world.top_most_y = y;

        if let Some(base) = world.platforms.first() {
            let pickup = Powerup::above(base);
            world.powerups.push(pickup);
        }
        world
    }

    /// Target vertical gap between rows for a score.
    /// Widens linearly from the base gap and saturates at the max gap.
    pub fn gap_for_score(&self, score: u64) -> f64 {
        let t = (score as f64 / self.tuning.gap_saturation_score).min(1.0);
        self.tuning.base_gap + t * (self.tuning.max_gap - self.tuning.base_gap)
    }

    /// Place one row `gap` above the current frontier
    pub fn spawn_row_above<R: Rng + ?Sized>(&mut self, gap: f64, rng: &mut R) {
        let w = self.tuning.viewport.width;
        self.top_most_y -= gap;

        // Main platform
        let x = SPAWN_MARGIN_X + rng.random::<f64>() * (w - PLATFORM_WIDTH - SPAWN_MARGIN_X);
        let mut main = Platform::new(x, self.top_most_y, PLATFORM_WIDTH, PLATFORM_HEIGHT);
        main.boost = rng.random::<f64>() < self.tuning.boost_chance;

        // Occasional smaller ledge slightly above for variety
        let ledge = if rng.random::<f64>() < self.tuning.ledge_chance {
            let x2 = SPAWN_MARGIN_X + rng.random::<f64>() * (w - LEDGE_WIDTH - SPAWN_MARGIN_X);
            Some(Platform::new(
                x2,
                self.top_most_y - LEDGE_RISE,
                LEDGE_WIDTH,
                LEDGE_HEIGHT,
            ))
        } else {
            None
        };

        let pickup = if rng.random::<f64>() < self.tuning.powerup_chance {
            Some(Powerup::above(&main))
        } else {
            None
        };

        log::trace!(
            "Row at y={:.1}: boost={} ledge={} pickup={}",
            self.top_most_y,
            main.boost,
            ledge.is_some(),
            pickup.is_some()
        );
        self.platforms.push(main);
        self.platforms.extend(ledge);
        self.powerups.extend(pickup);
    }

    /// Spawn rows until the frontier is far enough above the top screen edge.
    /// Returns the number of rows placed.
    pub fn fill_above<R: Rng + ?Sized>(&mut self, cam_y: f64, score: u64, rng: &mut R) -> usize {
        let gap = self.gap_for_score(score);
        let mut rows = 0;
        while self.top_most_y - cam_y > -self.tuning.spawn_lookahead {
            self.spawn_row_above(gap, rng);
            rows += 1;
        }
        rows
    }

    /// Per-tick chance of an enemy spawn attempt at a given score
    pub fn enemy_spawn_chance(&self, score: u64) -> f64 {
        let t = &self.tuning;
        t.enemy_spawn_base + (score as f64 * t.enemy_spawn_per_point).min(t.enemy_spawn_max_bonus)
    }

    /// Roll for an enemy spawn this tick; on success try to place one fairly.
    /// Returns true if an enemy was added.
    pub fn maybe_spawn_enemy<R: Rng + ?Sized>(
        &mut self,
        score: u64,
        player: &Player,
        cam_y: f64,
        rng: &mut R,
    ) -> bool {
        if self.enemies.len() >= self.tuning.max_enemies {
            return false;
        }
        if rng.random::<f64>() >= self.enemy_spawn_chance(score) {
            return false;
        }
        self.place_enemy(player, cam_y, rng)
    }

    /// Try a bounded number of random spots above the frontier and keep the
    /// first fair one. Finding none is normal; nothing spawns this tick.
    pub fn place_enemy<R: Rng + ?Sized>(&mut self, player: &Player, cam_y: f64, rng: &mut R) -> bool {
        if self.enemies.len() >= self.tuning.max_enemies {
            return false;
        }
        let w = self.tuning.viewport.width;
        for _ in 0..self.tuning.enemy_spawn_attempts {
            let y = self.top_most_y - ENEMY_SPAWN_RISE - rng.random::<f64>() * ENEMY_SPAWN_BAND;
            let x = rng.random::<f64>() * (w - ENEMY_SIZE);
            let vx = if rng.random::<bool>() {
                self.tuning.enemy_speed
            } else {
                -self.tuning.enemy_speed
            };

            if !self.is_fair_enemy_spot(x, y, player, cam_y) {
                continue;
            }

            log::debug!("Enemy spawned at ({:.1}, {:.1}) vx={}", x, y, vx);
            self.enemies.push(Enemy::new(x, y, vx));
            return true;
        }
        false
    }

    /// An enemy at (x, y) must keep clear of the player on BOTH axes and keep
    /// its centre away from every existing enemy.
    pub fn is_fair_enemy_spot(&self, x: f64, y: f64, player: &Player, cam_y: f64) -> bool {
        let t = &self.tuning;

        let player_screen_y = player.pos.y - cam_y;
        let enemy_screen_y = y - cam_y;
        let clear_of_player = (enemy_screen_y - player_screen_y).abs() >= t.enemy_min_player_dy
            && (x - player.pos.x).abs() >= t.enemy_min_player_dx;
        if !clear_of_player {
            return false;
        }

        let center = DVec2::new(x, y) + DVec2::splat(ENEMY_SIZE / 2.0);
        self.enemies
            .iter()
            .all(|e| e.center().distance(center) >= t.enemy_min_gap)
    }

    /// Move enemies, bounce them off the side walls and drop the ones that
    /// fell below the screen
    pub fn move_enemies(&mut self, cam_y: f64) {
        let w = self.tuning.viewport.width;
        let limit = self.tuning.viewport.height + self.tuning.enemy_prune_margin;
        for enemy in &mut self.enemies {
            enemy.pos.x += enemy.vx;
            if enemy.pos.x < 0.0 {
                enemy.pos.x = 0.0;
                enemy.vx = -enemy.vx;
            }
            if enemy.pos.x + enemy.size.x > w {
                enemy.pos.x = w - enemy.size.x;
                enemy.vx = -enemy.vx;
            }
        }
        self.enemies.retain(|e| e.pos.y - cam_y <= limit);
    }

    /// Remove the first pickup overlapping `rect` (world space).
    /// Returns true if one was taken.
    pub fn take_powerup(&mut self, rect: &Rect) -> bool {
        match self.powerups.iter().position(|p| p.rect().intersects(rect)) {
            Some(index) => {
                self.powerups.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drop platforms and pickups that scrolled off the bottom
    pub fn prune_below(&mut self, cam_y: f64) {
        let limit = self.tuning.viewport.height + self.tuning.prune_margin;
        self.platforms.retain(|p| p.pos.y - cam_y <= limit);
        self.powerups.retain(|p| p.pos.y - cam_y <= limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn world() -> World {
        World::initial(&Tuning::default())
    }

    #[test]
    fn test_gap_for_score() {
        let world = world();
        assert_eq!(world.gap_for_score(0), 90.0);
        assert_eq!(world.gap_for_score(75), 130.0);
        assert_eq!(world.gap_for_score(150), 170.0);
        assert_eq!(world.gap_for_score(300), 170.0);
    }

    #[test]
    fn test_initial_ladder() {
        let world = world();
        assert_eq!(world.platforms.len(), 9);
        assert_eq!(world.top_most_y, 680.0 - 8.0 * 90.0);

        // Rungs alternate between the left and right side
        assert_eq!(world.platforms[0].pos, DVec2::new(40.0, 680.0));
        assert_eq!(world.platforms[1].pos, DVec2::new(360.0, 590.0));
        assert_eq!(world.platforms[2].pos.x, 40.0);

        let safety = &world.platforms[8];
        assert_eq!(safety.pos, DVec2::new(96.0, 700.0));
        assert_eq!(safety.size.x, 288.0);
        assert!(world.platforms.iter().all(|p| !p.boost));
    }

    #[test]
    fn test_spawn_row_moves_frontier_up() {
        let mut world = world();
        let mut rng = Pcg32::seed_from_u64(5);
        let before = world.top_most_y;
        let count = world.platforms.len();

        world.spawn_row_above(100.0, &mut rng);
        assert_eq!(world.top_most_y, before - 100.0);
        assert!(world.platforms.len() == count + 1 || world.platforms.len() == count + 2);

        let main = &world.platforms[count];
        assert_eq!(main.pos.y, world.top_most_y);
        assert!(main.pos.x >= 20.0 && main.pos.x <= 480.0 - 120.0);
        if let Some(ledge) = world.platforms.get(count + 1) {
            assert_eq!(ledge.pos.y, world.top_most_y - 18.0);
            assert_eq!(ledge.size, DVec2::new(80.0, 14.0));
        }
    }

    #[test]
    fn test_spawn_row_is_seeded() {
        let mut a = world();
        let mut b = world();
        let mut rng_a = Pcg32::seed_from_u64(99);
        let mut rng_b = Pcg32::seed_from_u64(99);
        for _ in 0..50 {
            a.spawn_row_above(120.0, &mut rng_a);
            b.spawn_row_above(120.0, &mut rng_b);
        }
        assert_eq!(a.platforms, b.platforms);
        assert_eq!(a.powerups, b.powerups);
    }

    #[test]
    fn test_row_rates_roughly_match_tuning() {
        let mut world = World::new(&Tuning::default());
        let mut rng = Pcg32::seed_from_u64(2024);
        let rows = 5000;
        for _ in 0..rows {
            world.spawn_row_above(90.0, &mut rng);
        }
        let mains = world.platforms.iter().filter(|p| p.size.x == PLATFORM_WIDTH);
        let boosts = mains.filter(|p| p.boost).count() as f64 / rows as f64;
        let ledges = world.platforms.len() - rows;
        let ledge_rate = ledges as f64 / rows as f64;
        let pickup_rate = world.powerups.len() as f64 / rows as f64;

        assert!((boosts - 0.12).abs() < 0.03, "boost rate {boosts}");
        assert!((ledge_rate - 0.25).abs() < 0.03, "ledge rate {ledge_rate}");
        assert!(pickup_rate < 0.05, "pickup rate {pickup_rate}");
    }

    #[test]
    fn test_fill_above_loops_until_clear() {
        let mut world = world();
        let mut rng = Pcg32::seed_from_u64(1);
        // Frontier at -40, needs to reach -200 with 90px gaps: two rows
        let rows = world.fill_above(0.0, 0, &mut rng);
        assert_eq!(rows, 2);
        assert_eq!(world.top_most_y, -220.0);
        // Already clear: nothing more
        assert_eq!(world.fill_above(0.0, 0, &mut rng), 0);

        // A big camera jump spawns several rows in one call
        let rows = world.fill_above(-1000.0, 0, &mut rng);
        assert!(rows >= 10);
        assert!(world.top_most_y - -1000.0 <= -200.0);
    }

    #[test]
    fn test_enemy_spawn_chance_scales_and_caps() {
        let world = world();
        assert!((world.enemy_spawn_chance(0) - 0.002).abs() < 1e-12);
        assert!((world.enemy_spawn_chance(100) - 0.006).abs() < 1e-12);
        assert!((world.enemy_spawn_chance(200) - 0.010).abs() < 1e-12);
        assert!((world.enemy_spawn_chance(10_000) - 0.010).abs() < 1e-12);
    }

    #[test]
    fn test_enemy_cap_blocks_spawn() {
        let mut world = world();
        let player = Player::spawn(&Tuning::default().viewport);
        world.enemies.push(Enemy::new(0.0, -1000.0, 1.8));
        world.enemies.push(Enemy::new(400.0, -2000.0, 1.8));

        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..100 {
            assert!(!world.place_enemy(&player, 0.0, &mut rng));
            assert!(!world.maybe_spawn_enemy(500, &player, 0.0, &mut rng));
        }
        assert_eq!(world.enemies.len(), 2);
    }

    #[test]
    fn test_fair_spot_needs_both_axes_clear() {
        let world = world();
        let mut player = Player::spawn(&Tuning::default().viewport);
        player.pos = DVec2::new(200.0, 500.0);

        // Far vertically, far horizontally
        assert!(world.is_fair_enemy_spot(50.0, 100.0, &player, 0.0));
        // Far vertically but horizontally too close
        assert!(!world.is_fair_enemy_spot(250.0, 100.0, &player, 0.0));
        // Far horizontally but vertically too close
        assert!(!world.is_fair_enemy_spot(50.0, 400.0, &player, 0.0));
        // Exactly at both minimums is allowed
        assert!(world.is_fair_enemy_spot(110.0, 320.0, &player, 0.0));
    }

    #[test]
    fn test_fair_spot_keeps_enemies_apart() {
        let mut world = world();
        let mut player = Player::spawn(&Tuning::default().viewport);
        player.pos = DVec2::new(200.0, 1000.0);
        world.enemies.push(Enemy::new(0.0, 0.0, 1.8));

        assert!(!world.is_fair_enemy_spot(100.0, 100.0, &player, 0.0));
        assert!(world.is_fair_enemy_spot(0.0, -280.0, &player, 0.0));
        assert!(!world.is_fair_enemy_spot(0.0, -279.0, &player, 0.0));
    }

    #[test]
    fn test_enemies_bounce_off_walls() {
        let mut world = world();
        world.enemies.push(Enemy::new(1.0, 0.0, -1.8));
        world.enemies.push(Enemy::new(480.0 - 34.0 - 1.0, 100.0, 1.8));

        world.move_enemies(0.0);
        assert_eq!(world.enemies[0].pos.x, 0.0);
        assert_eq!(world.enemies[0].vx, 1.8);
        assert_eq!(world.enemies[1].pos.x, 480.0 - 34.0);
        assert_eq!(world.enemies[1].vx, -1.8);
    }

    #[test]
    fn test_enemies_pruned_below_screen() {
        let mut world = world();
        world.enemies.push(Enemy::new(100.0, 720.0 + 60.0, 1.8));
        world.enemies.push(Enemy::new(100.0, 720.0 + 61.0, 1.8));
        world.move_enemies(0.0);
        assert_eq!(world.enemies.len(), 1);
    }

    #[test]
    fn test_prune_below_uses_screen_space() {
        let mut world = world();
        // Camera scrolled 500px up: everything below 300 + 80 world y... is gone
        world.prune_below(-500.0);
        assert!(world.platforms.iter().all(|p| p.pos.y + 500.0 <= 800.0));
        assert!(world.platforms.len() < 9);
        assert!(world.powerups.iter().all(|p| p.pos.y + 500.0 <= 800.0));
    }

    #[test]
    fn test_take_powerup_removes_first_match_only() {
        let mut world = World::new(&Tuning::default());
        world.powerups.push(Powerup::new(0.0, 0.0));
        world.powerups.push(Powerup::new(10.0, 10.0));
        let probe = Rect::new(20.0, 20.0, 5.0, 5.0);

        assert!(world.take_powerup(&probe));
        assert_eq!(world.powerups.len(), 1);
        assert_eq!(world.powerups[0].pos, DVec2::new(10.0, 10.0));

        let miss = Rect::new(500.0, 500.0, 5.0, 5.0);
        assert!(!world.take_powerup(&miss));
    }
}
