//! High-level game flow: title screen, waves, pauses, deaths and endings.
//!
//! The session polls input once per tick, hands the wave its update while
//! play is live, and reads the wave's queries back to decide when play stops.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::consts::*;
use crate::error::{check_delta, ContractError};
use crate::formation::Formation;
use crate::input::{Action, EdgeDetector, Input, InputFrame};
use crate::sound::Sound;
use crate::wave::Wave;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    WaveCleared,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    /// Title screen; no wave exists.
    Inactive,
    /// A fresh wave is on screen; play starts on the next tick.
    NewWave,
    Active,
    Paused,
    /// Ship lost with lives to spare.
    Death,
    Complete(Outcome),
}

/// What a finished wave hands to the next one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CarryOver {
    pub lives: u32,
    pub score: u32,
    /// Step interval the previous wave ended on.
    pub alien_speed: f32,
}

impl CarryOver {
    pub fn from_wave(wave: &Wave) -> Self {
        Self {
            lives: wave.lives(),
            score: wave.score(),
            alien_speed: wave.alien_speed(),
        }
    }

    /// Undoes three quarters of a full grid's worth of kill speed-ups.
    pub fn rebound_speed(speed: f32, rows: usize, columns: usize) -> f32 {
        let kills = 3.0 * (rows * columns) as f32 / 4.0;
        speed * (1.0 / SPEEDUP_FACTOR).powf(kills)
    }

    fn seed(&self, wave: &mut Wave) -> Result<(), ContractError> {
        let formation = wave.formation();
        let speed = Self::rebound_speed(self.alien_speed, formation.rows(), formation.columns());
        wave.set_alien_speed(speed)?;
        wave.set_lives(self.lives);
        wave.set_score(self.score);
        Ok(())
    }
}

/// Text the presentation layer overlays on the playfield.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Message {
    Welcome,
    Paused { lives: u32 },
    Died { lives: u32 },
    GameOver,
    WaveComplete,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Welcome => write!(
                f,
                "Welcome to\nAlien Invaders\n\n\
                 Use the left and right arrow keys to move,\n\
                 and the spacebar to shoot at the aliens.\n\
                 The goal is to kill all the aliens in each wave,\n\
                 and the following waves are harder than the last.\n\
                 Press 'M' to toggle mute and 'Esc' to pause.\n\n\
                 Press 'S' to Play"
            ),
            Message::Paused { lives } => write!(
                f,
                "GAME PAUSED\nLives Remaining: {lives}\n\nPress 'S' to Continue"
            ),
            Message::Died { lives } => write!(
                f,
                "YOU DIED\nLives Remaining: {lives}\n\nPress 'S' to Continue"
            ),
            Message::GameOver => write!(f, "GAME OVER\n\nPress 'S' to return to the title"),
            Message::WaveComplete => write!(f, "WAVE COMPLETE\n\nPress 'S' to\nStart a New Wave"),
        }
    }
}

pub struct Session {
    state: GameState,
    wave: Option<Wave>,
    /// `None` until the first wave is won.
    carry_over: Option<CarryOver>,
    edges: EdgeDetector,
    rng: StdRng,
    rows: usize,
    columns: usize,
    wave_number: u32,
    muted: bool,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self {
            state: GameState::Inactive,
            wave: None,
            carry_over: None,
            edges: EdgeDetector::new(),
            rng: StdRng::seed_from_u64(seed),
            rows: ALIEN_ROWS,
            columns: ALIENS_IN_ROW,
            wave_number: 0,
            muted: false,
        }
    }

    /// A session whose waves use a non-standard grid.
    pub fn with_layout(rows: usize, columns: usize, seed: u64) -> Result<Self, ContractError> {
        Formation::new(rows, columns)?;
        Ok(Self {
            rows,
            columns,
            ..Self::new(seed)
        })
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn wave(&self) -> Option<&Wave> {
        self.wave.as_ref()
    }

    pub fn carry_over(&self) -> Option<&CarryOver> {
        self.carry_over.as_ref()
    }

    /// 1-based number of the current wave, 0 before the first one.
    pub fn wave_number(&self) -> u32 {
        self.wave_number
    }

    pub fn is_muted(&self) -> bool {
        self.wave.as_ref().map_or(self.muted, Wave::is_muted)
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if let Some(wave) = self.wave.as_mut() {
            wave.set_muted(muted);
        }
    }

    pub fn message(&self) -> Option<Message> {
        let lives = self.wave.as_ref().map_or(0, Wave::lives);
        match self.state {
            GameState::Inactive => Some(Message::Welcome),
            GameState::NewWave | GameState::Active => None,
            GameState::Paused => Some(Message::Paused { lives }),
            GameState::Death => Some(Message::Died { lives }),
            GameState::Complete(Outcome::GameOver) => Some(Message::GameOver),
            GameState::Complete(Outcome::WaveCleared) => Some(Message::WaveComplete),
        }
    }

    pub fn take_sounds(&mut self) -> Vec<Sound> {
        self.wave.as_mut().map(Wave::take_sounds).unwrap_or_default()
    }

    /// Advances the game by one frame of `dt` seconds.
    pub fn tick(&mut self, input: &dyn Input, dt: f32) -> Result<(), ContractError> {
        check_delta(dt)?;
        let frame = self.edges.sample(input);
        let confirmed = frame.was_pressed(Action::Confirm);

        match self.state {
            GameState::Inactive => {
                if confirmed {
                    self.prepare_wave()?;
                }
            }
            GameState::NewWave => self.transition(GameState::Active),
            GameState::Active => self.play(&frame, dt)?,
            GameState::Paused => {
                if confirmed {
                    self.transition(GameState::Active);
                }
            }
            GameState::Death => {
                if confirmed {
                    if let Some(wave) = self.wave.as_mut() {
                        wave.respawn_ship();
                    }
                    self.transition(GameState::Active);
                }
            }
            GameState::Complete(Outcome::WaveCleared) => {
                if confirmed {
                    if let Some(wave) = &self.wave {
                        self.carry_over = Some(CarryOver::from_wave(wave));
                        self.muted = wave.is_muted();
                    }
                    self.prepare_wave()?;
                }
            }
            GameState::Complete(Outcome::GameOver) => {
                if confirmed {
                    if let Some(wave) = self.wave.take() {
                        self.muted = wave.is_muted();
                    }
                    self.carry_over = None;
                    self.wave_number = 0;
                    self.transition(GameState::Inactive);
                }
            }
        }
        Ok(())
    }

    /// Replaces the current wave with a fresh one and shows it for a tick
    /// before play starts.
    fn prepare_wave(&mut self) -> Result<(), ContractError> {
        let mut wave = Wave::with_layout(self.rows, self.columns, self.rng.gen())?;
        if let Some(carry) = &self.carry_over {
            carry.seed(&mut wave)?;
        }
        wave.set_muted(self.muted);
        self.wave_number += 1;
        info!(
            wave = self.wave_number,
            lives = wave.lives(),
            score = wave.score(),
            alien_speed = wave.alien_speed(),
            "wave_started"
        );
        self.wave = Some(wave);
        self.transition(GameState::NewWave);
        Ok(())
    }

    fn play(&mut self, frame: &InputFrame, dt: f32) -> Result<(), ContractError> {
        let Some(wave) = self.wave.as_mut() else {
            return Ok(());
        };

        if is_live(wave) {
            wave.update(frame, dt)?;
            if frame.was_pressed(Action::Pause) && is_live(wave) {
                self.transition(GameState::Paused);
            }
            return Ok(());
        }

        let breached = wave.defense_line_breached();
        let next = match (wave.ship().is_some(), wave.lives()) {
            (false, lives) if lives > 0 => GameState::Death,
            (false, _) => GameState::Complete(Outcome::GameOver),
            _ if breached => GameState::Complete(Outcome::GameOver),
            _ => GameState::Complete(Outcome::WaveCleared),
        };
        if breached {
            debug!("defense_line_breached");
        }
        if let GameState::Complete(outcome) = next {
            info!(
                wave = self.wave_number,
                ?outcome,
                score = wave.score(),
                lives = wave.lives(),
                "wave_finished"
            );
        }
        self.transition(next);
        Ok(())
    }

    fn transition(&mut self, next: GameState) {
        debug!(from = ?self.state, to = ?next, "state_transition");
        self.state = next;
    }
}

/// Ship present, aliens left, line intact.
fn is_live(wave: &Wave) -> bool {
    wave.ship().is_some() && !wave.no_aliens() && !wave.defense_line_breached()
}

#[cfg(test)]
mod tests;
