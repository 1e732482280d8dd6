//! Simulation core for Alien Invaders.
//!
//! [`session::Session`] sequences waves, pauses, deaths and endings;
//! [`wave::Wave`] runs one level of the ship against the marching
//! [`formation::Formation`]. Nothing here draws, plays audio or reads a
//! keyboard: callers supply an [`input::Input`] and a time delta per tick,
//! then read snapshots and drain [`sound::Sound`] cues.

pub mod consts;
pub mod error;
pub mod formation;
pub mod input;
pub mod models;
pub mod session;
pub mod sound;
pub mod wave;
