//! Sound cues. The simulation only decides when a cue happens; playing it is
//! up to whoever drains the queue.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Note {
    Low,
    Mid,
    High,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    PlayerFire,
    AlienFire,
    AlienKilled,
    ShipHit,
    MarchNote(Note),
}

const MARCH: [Note; 4] = [Note::Low, Note::Mid, Note::Low, Note::High];

/// The four-beat bass line that keeps time with the formation.
#[derive(Clone, Debug, Default)]
pub struct March {
    position: usize,
}

impl March {
    pub fn next_note(&mut self) -> Note {
        let note = MARCH[self.position];
        self.position = (self.position + 1) % MARCH.len();
        note
    }
}
