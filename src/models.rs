//! Entities on the playfield. Pure data plus geometry; no per-tick logic.

use crate::consts::*;

/// Axis-aligned box centered on `(x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn left(&self) -> f32 {
        self.x - self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y - self.height / 2.0
    }

    pub fn top(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.bottom() < other.top()
            && other.bottom() < self.top()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub x: f32,
    pub y: f32,
}

impl Ship {
    pub fn new() -> Self {
        Self {
            x: GAME_WIDTH / 2.0,
            y: SHIP_BOTTOM,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            x: self.x,
            y: self.y,
            width: SHIP_WIDTH,
            height: SHIP_HEIGHT,
        }
    }

    /// Slides the ship by `dx`, keeping its hull inside the playfield.
    pub fn slide(&mut self, dx: f32) {
        let half = SHIP_WIDTH / 2.0;
        self.x = (self.x + dx).clamp(half, GAME_WIDTH - half);
    }

    pub fn collides(&self, bolt: &Bolt) -> bool {
        self.bounds().overlaps(&bolt.bounds())
    }
}

impl Default for Ship {
    fn default() -> Self {
        Self::new()
    }
}

/// Visual family of an alien, cycling every two rows from the bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlienTier {
    Octopus,
    Crab,
    Squid,
}

impl AlienTier {
    pub fn for_row(row: usize) -> Self {
        match (row / 2) % 3 {
            0 => AlienTier::Octopus,
            1 => AlienTier::Crab,
            _ => AlienTier::Squid,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Alien {
    pub x: f32,
    pub y: f32,
    pub tier: AlienTier,
    /// Which of the two animation frames is showing.
    pub frame: bool,
}

impl Alien {
    pub fn new(x: f32, y: f32, tier: AlienTier) -> Self {
        Self {
            x,
            y,
            tier,
            frame: false,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            x: self.x,
            y: self.y,
            width: ALIEN_WIDTH,
            height: ALIEN_HEIGHT,
        }
    }

    pub fn collides(&self, bolt: &Bolt) -> bool {
        self.bounds().overlaps(&bolt.bounds())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoltOwner {
    Player,
    Alien,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bolt {
    pub x: f32,
    pub y: f32,
    /// Units per tick. Positive travels up the screen.
    pub velocity: f32,
}

impl Bolt {
    pub fn player(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            velocity: PLAYER_BOLT_SPEED,
        }
    }

    pub fn alien(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            velocity: -ALIEN_BOLT_SPEED,
        }
    }

    pub fn owner(&self) -> BoltOwner {
        if self.velocity > 0.0 {
            BoltOwner::Player
        } else {
            BoltOwner::Alien
        }
    }

    pub fn is_player_bolt(&self) -> bool {
        self.owner() == BoltOwner::Player
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            x: self.x,
            y: self.y,
            width: BOLT_WIDTH,
            height: BOLT_HEIGHT,
        }
    }

    pub fn advance(&mut self) {
        self.y += self.velocity;
    }

    /// True once the bolt is more than half its height past the edge it travels toward.
    pub fn is_off_screen(&self) -> bool {
        match self.owner() {
            BoltOwner::Player => self.y > GAME_HEIGHT + BOLT_HEIGHT / 2.0,
            BoltOwner::Alien => self.y < -BOLT_HEIGHT / 2.0,
        }
    }
}
