//! One wave of play: the ship, the formation, and every bolt in flight.
//!
//! A `Wave` is created fresh for each level and thrown away when the level
//! ends. The session polls its queries after each update to decide whether
//! the wave is over; the wave itself never changes the high-level mode.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::consts::*;
use crate::error::{check_delta, check_speed, ContractError};
use crate::formation::{Direction, Formation, Step};
use crate::input::{Action, InputFrame};
use crate::models::{Bolt, Ship};
use crate::sound::{March, Sound};

#[derive(Debug)]
pub struct Wave {
    ship: Option<Ship>,
    formation: Formation,
    bolts: Vec<Bolt>,
    lives: u32,
    score: u32,
    /// Seconds between formation steps.
    alien_speed: f32,
    step_time: f32,
    fire_time: f32,
    /// How many step intervals the next alien shot waits for.
    fire_multiple: u32,
    background_time: f32,
    background_frame: u8,
    no_aliens: bool,
    muted: bool,
    march: March,
    sounds: Vec<Sound>,
    rng: StdRng,
}

impl Wave {
    /// A standard wave with the default formation.
    pub fn new(seed: u64) -> Result<Self, ContractError> {
        Self::with_layout(ALIEN_ROWS, ALIENS_IN_ROW, seed)
    }

    pub fn with_layout(rows: usize, columns: usize, seed: u64) -> Result<Self, ContractError> {
        let formation = Formation::new(rows, columns)?;
        let mut rng = StdRng::seed_from_u64(seed);
        let fire_multiple = rng.gen_range(1..=BOLT_RATE);
        Ok(Self {
            ship: Some(Ship::new()),
            formation,
            bolts: Vec::new(),
            lives: SHIP_LIVES,
            score: 0,
            alien_speed: ALIEN_SPEED,
            step_time: 0.0,
            fire_time: 0.0,
            fire_multiple,
            background_time: 0.0,
            background_frame: 0,
            no_aliens: false,
            muted: false,
            march: March::default(),
            sounds: Vec::new(),
            rng,
        })
    }

    pub fn ship(&self) -> Option<&Ship> {
        self.ship.as_ref()
    }

    pub fn formation(&self) -> &Formation {
        &self.formation
    }

    pub fn bolts(&self) -> &[Bolt] {
        &self.bolts
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn alien_speed(&self) -> f32 {
        self.alien_speed
    }

    pub fn direction(&self) -> Direction {
        self.formation.direction()
    }

    pub fn background_frame(&self) -> u8 {
        self.background_frame
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn survivors(&self) -> usize {
        self.formation.survivors()
    }

    /// Latched true once the last alien dies; never resets within a wave.
    pub fn no_aliens(&self) -> bool {
        self.no_aliens
    }

    /// Whether the front of any column has reached the defense line.
    pub fn defense_line_breached(&self) -> bool {
        self.formation
            .lowest_per_column()
            .iter()
            .any(|alien| alien.y <= DEFENSE_LINE + ALIEN_HEIGHT / 2.0)
    }

    pub fn set_lives(&mut self, lives: u32) {
        self.lives = lives;
    }

    pub fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    pub fn set_alien_speed(&mut self, speed: f32) -> Result<(), ContractError> {
        check_speed(speed)?;
        self.alien_speed = speed;
        Ok(())
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Puts a fresh ship on the launch pad if one is missing and lives remain.
    pub fn respawn_ship(&mut self) {
        if self.ship.is_none() && self.lives > 0 {
            self.ship = Some(Ship::new());
        }
    }

    /// Drains the cues queued since the last call.
    pub fn take_sounds(&mut self) -> Vec<Sound> {
        std::mem::take(&mut self.sounds)
    }

    #[cfg(test)]
    pub(crate) fn bolts_mut(&mut self) -> &mut Vec<Bolt> {
        &mut self.bolts
    }

    #[cfg(test)]
    pub(crate) fn formation_mut(&mut self) -> &mut Formation {
        &mut self.formation
    }

    /// Advances the wave by one tick of `dt` seconds.
    pub fn update(&mut self, input: &InputFrame, dt: f32) -> Result<(), ContractError> {
        check_delta(dt)?;

        if self.ship.is_some() {
            self.move_ship(input);
            self.fire_player_bolt(input);
        }
        self.advance_bolts();

        self.step_time += dt;
        self.fire_time += dt;
        self.background_time += dt;

        if self.step_time >= self.alien_speed {
            self.step_formation();
        }
        if self.fire_time >= self.fire_multiple as f32 * self.alien_speed {
            self.fire_alien_bolt();
        }
        if self.background_time >= BACKGROUND_SPEED {
            self.background_frame = (self.background_frame + 1) % BACKGROUND_FRAMES;
            self.background_time = 0.0;
        }

        self.resolve_alien_hits();
        self.resolve_ship_hits();

        if self.formation.is_empty() {
            self.no_aliens = true;
        }

        if input.was_pressed(Action::Mute) {
            self.muted = !self.muted;
            debug!(muted = self.muted, "mute_toggled");
        }
        Ok(())
    }

    fn play(&mut self, sound: Sound) {
        if !self.muted {
            self.sounds.push(sound);
        }
    }

    fn move_ship(&mut self, input: &InputFrame) {
        let Some(ship) = self.ship.as_mut() else {
            return;
        };
        let mut dx = 0.0;
        if input.is_held(Action::MoveLeft) {
            dx -= SHIP_MOVEMENT;
        }
        if input.is_held(Action::MoveRight) {
            dx += SHIP_MOVEMENT;
        }
        ship.slide(dx);
    }

    fn fire_player_bolt(&mut self, input: &InputFrame) {
        if !input.is_held(Action::Fire) || self.bolts.iter().any(Bolt::is_player_bolt) {
            return;
        }
        let Some(ship) = &self.ship else {
            return;
        };
        self.bolts.push(Bolt::player(ship.x, ship.y));
        trace!(x = ship.x, "player_bolt_fired");
        self.play(Sound::PlayerFire);
    }

    fn advance_bolts(&mut self) {
        for bolt in &mut self.bolts {
            bolt.advance();
        }
        self.bolts.retain(|bolt| !bolt.is_off_screen());
    }

    fn step_formation(&mut self) {
        let step = self.formation.step();
        self.step_time = 0.0;
        if step != Step::Idle {
            let note = self.march.next_note();
            self.play(Sound::MarchNote(note));
        }
    }

    fn fire_alien_bolt(&mut self) {
        let shooters = self.formation.lowest_per_column();
        if !shooters.is_empty() {
            let shooter = shooters[self.rng.gen_range(0..shooters.len())];
            let bolt = Bolt::alien(shooter.x, shooter.y);
            trace!(x = bolt.x, y = bolt.y, "alien_bolt_fired");
            self.bolts.push(bolt);
            self.play(Sound::AlienFire);
        }
        self.fire_multiple = self.rng.gen_range(1..=BOLT_RATE);
        self.fire_time = 0.0;
    }

    fn resolve_alien_hits(&mut self) {
        let formation = &self.formation;
        let mut kills: Vec<(usize, usize)> = Vec::new();
        self.bolts.retain(|bolt| {
            if !bolt.is_player_bolt() {
                return true;
            }
            let hit = formation
                .iter()
                .find(|(slot, alien)| !kills.contains(slot) && alien.collides(bolt))
                .map(|(slot, _)| slot);
            match hit {
                Some(slot) => {
                    kills.push(slot);
                    false
                }
                None => true,
            }
        });

        for (row, col) in kills {
            if self.formation.remove(row, col).is_some() {
                self.score += KILL_SCORE;
                self.alien_speed *= SPEEDUP_FACTOR;
                trace!(row, col, score = self.score, "alien_destroyed");
                self.play(Sound::AlienKilled);
            }
        }
    }

    fn resolve_ship_hits(&mut self) {
        let Some(ship) = &self.ship else {
            return;
        };
        let hit = self
            .bolts
            .iter()
            .position(|bolt| !bolt.is_player_bolt() && ship.collides(bolt));
        if let Some(index) = hit {
            self.bolts.remove(index);
            self.ship = None;
            self.lives = self.lives.saturating_sub(1);
            debug!(lives = self.lives, "ship_destroyed");
            self.play(Sound::ShipHit);
        }
    }
}
