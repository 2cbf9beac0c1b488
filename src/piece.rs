//! Piece definitions
//!
//! A piece is an immutable (kind, id) pair. Pieces are moved between the
//! queue and the reserve stack by value and never change once created.

use ratatui::style::Color;
use std::fmt;

/// The piece kinds that can be dealt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I, // Cyan - long bar
    O, // Yellow - square
    T, // Purple - T-shape
    L, // Orange - L-shape
}

impl PieceKind {
    /// Get the color for this kind
    pub fn color(&self) -> Color {
        match self {
            PieceKind::I => Color::Cyan,
            PieceKind::O => Color::Yellow,
            PieceKind::T => Color::Magenta,
            PieceKind::L => Color::Rgb(255, 165, 0), // Orange
        }
    }

    /// Single-letter tag used in chips and logs
    pub fn letter(&self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::L => 'L',
        }
    }

    /// Get all kinds, in the order the generator indexes them
    pub fn all() -> [PieceKind; 4] {
        [PieceKind::I, PieceKind::O, PieceKind::T, PieceKind::L]
    }
}

/// A dealt piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    id: u64,
}

impl Piece {
    pub fn new(kind: PieceKind, id: u64) -> Self {
        Self { kind, id }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Run-unique identifier, assigned in generation order
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Renders as `[K-id]`, e.g. `[T-7]`
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{}]", self.kind().letter(), self.id())
    }
}
