#![allow(dead_code)]
use slotbuf::prelude::*;

/// A point mass with a name. Has drop glue, so it relocates by move.
#[derive(Clone, Debug, PartialEq, Element)]
pub struct Particle {
    /// Position in world space.
    pub position: [f32; 3],
    /// Mass in kilograms.
    pub mass: f32,
    /// Display name.
    pub name: String,
}

/// Plain data, relocated by raw byte copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Element)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// A value whose copies must go through `Clone`, so the buffer relocates it by cloning.
#[derive(Debug, PartialEq, Element)]
#[element(relocate = "copy")]
pub struct Registered {
    /// Identifier shared by every copy of the value.
    pub id: u32,
}

impl Clone for Registered {
    fn clone(&self) -> Self {
        Registered { id: self.id }
    }
}

/// Either a single value or a pair of them.
#[derive(Clone, Debug, PartialEq, Element)]
pub enum Span<T> {
    /// One endpoint.
    Point(T),
    /// Two endpoints.
    Segment(T, T),
}

/// Sums the masses of every particle whose name starts with `prefix`.
pub fn mass_with_prefix(particles: &Array<Particle>, prefix: &str) -> f32 {
    particles
        .iter()
        .filter(|p| p.name.starts_with(prefix))
        .map(|p| p.mass)
        .sum()
}
