//! The marching grid of aliens.
//!
//! Slots are addressed by `(row, column)` with row 0 at the bottom. A slot
//! that loses its alien stays empty for the rest of the wave; nothing is
//! ever reindexed, so column queries stay stable as the grid thins out.

use crate::consts::*;
use crate::error::ContractError;
use crate::models::{Alien, AlienTier};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    fn reversed(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Outcome of a single formation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// No survivors, nothing moved.
    Idle,
    Marched,
    Dropped,
}

#[derive(Clone, Debug)]
pub struct Formation {
    rows: usize,
    columns: usize,
    slots: Vec<Option<Alien>>,
    direction: Direction,
}

impl Formation {
    /// Lays out a full grid at the top of the playfield, marching right.
    pub fn new(rows: usize, columns: usize) -> Result<Self, ContractError> {
        if rows == 0 || columns == 0 {
            return Err(ContractError::EmptyFormation { rows, columns });
        }
        let pitch_x = ALIEN_WIDTH + ALIEN_H_SEP;
        let right_edge = ALIEN_H_SEP + (columns - 1) as f32 * pitch_x + ALIEN_WIDTH;
        if right_edge > GAME_WIDTH - ALIEN_H_SEP {
            return Err(ContractError::FormationTooWide { columns });
        }

        let pitch_y = ALIEN_HEIGHT + ALIEN_V_SEP;
        let top_center = GAME_HEIGHT - ALIEN_CEILING - ALIEN_HEIGHT / 2.0;
        let front = top_center - (rows - 1) as f32 * pitch_y;
        if front <= DEFENSE_LINE + ALIEN_HEIGHT / 2.0 {
            return Err(ContractError::FormationTooTall { rows });
        }
        let cells = rows
            .checked_mul(columns)
            .ok_or(ContractError::FormationTooTall { rows })?;

        let mut slots = Vec::with_capacity(cells);
        for row in 0..rows {
            let y = top_center - (rows - 1 - row) as f32 * pitch_y;
            let tier = AlienTier::for_row(row);
            for col in 0..columns {
                let x = ALIEN_H_SEP + col as f32 * pitch_x + ALIEN_WIDTH / 2.0;
                slots.push(Some(Alien::new(x, y, tier)));
            }
        }

        Ok(Self {
            rows,
            columns,
            slots,
            direction: Direction::Right,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Alien> {
        if row >= self.rows || col >= self.columns {
            return None;
        }
        self.slots[row * self.columns + col].as_ref()
    }

    /// Clears a slot, handing back whatever occupied it.
    pub fn remove(&mut self, row: usize, col: usize) -> Option<Alien> {
        if row >= self.rows || col >= self.columns {
            return None;
        }
        self.slots[row * self.columns + col].take()
    }

    /// Surviving aliens in row-major order with their `(row, column)` slot.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &Alien)> + '_ {
        let columns = self.columns;
        self.slots
            .iter()
            .enumerate()
            .filter_map(move |(i, slot)| slot.as_ref().map(|a| ((i / columns, i % columns), a)))
    }

    pub(crate) fn aliens_mut(&mut self) -> impl Iterator<Item = &mut Alien> + '_ {
        self.slots.iter_mut().flatten()
    }

    pub fn survivors(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// The bottom-most survivor of every column that still has one, left to right.
    pub fn lowest_per_column(&self) -> Vec<&Alien> {
        (0..self.columns)
            .filter_map(|col| (0..self.rows).find_map(|row| self.get(row, col)))
            .collect()
    }

    /// Leftmost and rightmost survivor centers, if any survive.
    pub fn extent(&self) -> Option<(f32, f32)> {
        self.slots.iter().flatten().fold(None, |acc, alien| match acc {
            None => Some((alien.x, alien.x)),
            Some((lo, hi)) => Some((lo.min(alien.x), hi.max(alien.x))),
        })
    }

    /// Moves every survivor one step: sideways, or down and reversed when the
    /// leading edge has reached the margin.
    pub fn step(&mut self) -> Step {
        let Some((leftmost, rightmost)) = self.extent() else {
            return Step::Idle;
        };

        let margin = ALIEN_H_SEP + ALIEN_WIDTH / 2.0;
        let at_edge = match self.direction {
            Direction::Right => rightmost >= GAME_WIDTH - margin,
            Direction::Left => leftmost <= margin,
        };

        if at_edge {
            for alien in self.aliens_mut() {
                alien.y -= ALIEN_V_WALK;
                alien.frame = !alien.frame;
            }
            self.direction = self.direction.reversed();
            Step::Dropped
        } else {
            let dx = self.direction.sign() * ALIEN_H_WALK;
            for alien in self.aliens_mut() {
                alien.x += dx;
                alien.frame = !alien.frame;
            }
            Step::Marched
        }
    }
}
