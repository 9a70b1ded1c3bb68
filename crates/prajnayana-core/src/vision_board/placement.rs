//! Greedy randomized placement of new notes on the board.
//!
//! A new note is dropped at the best of a handful of uniformly sampled spots
//! inside the safe rectangle, scored by how much area it would share with the
//! notes already on the canvas. Notes moved by hand are clamped into the same
//! rectangle with [`ensure_within_boundaries`].

use rand::Rng;
use tracing::trace;

use super::note::{CanvasSize, Position};

pub const NOTE_WIDTH: f64 = 200.0;
pub const NOTE_HEIGHT: f64 = 150.0;
pub const PADDING: f64 = 20.0;
pub const MAX_ATTEMPTS: usize = 10;

/// The region a note's top-left corner may occupy.
///
/// On a canvas smaller than one note plus padding the rectangle is inverted
/// (`max < min`); it is used as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafeRect {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl SafeRect {
    pub fn for_canvas(canvas: CanvasSize) -> Self {
        Self {
            min_x: PADDING,
            max_x: canvas.width - NOTE_WIDTH - PADDING,
            min_y: PADDING,
            max_y: canvas.height - NOTE_HEIGHT - PADDING,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.max_x <= self.min_x || self.max_y <= self.min_y
    }

    pub fn contains(&self, p: Position) -> bool {
        (self.min_x..=self.max_x).contains(&p.x) && (self.min_y..=self.max_y).contains(&p.y)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        let u: f64 = rng.gen();
        let v: f64 = rng.gen();
        Position {
            x: self.min_x + u * (self.max_x - self.min_x),
            y: self.min_y + v * (self.max_y - self.min_y),
        }
    }
}

/// Area shared by two note-sized boxes anchored at `a` and `b`.
pub fn overlap_area(a: Position, b: Position) -> f64 {
    let dx = (a.x + NOTE_WIDTH).min(b.x + NOTE_WIDTH) - a.x.max(b.x);
    let dy = (a.y + NOTE_HEIGHT).min(b.y + NOTE_HEIGHT) - a.y.max(b.y);
    if dx > 0.0 && dy > 0.0 {
        dx * dy
    } else {
        0.0
    }
}

fn total_overlap(candidate: Position, existing: &[Position]) -> f64 {
    existing.iter().map(|p| overlap_area(candidate, *p)).sum()
}

/// Choose a position for a new note.
///
/// Samples up to [`MAX_ATTEMPTS`] spots and returns the first with no overlap,
/// or else the one with the least total overlap (earliest wins ties).
pub fn place_note<R: Rng + ?Sized>(existing: &[Position], canvas: CanvasSize, rng: &mut R) -> Position {
    let rect = SafeRect::for_canvas(canvas);
    let mut best = rect.sample(rng);
    let mut best_overlap = total_overlap(best, existing);

    let mut attempt = 1;
    while best_overlap > 0.0 && attempt < MAX_ATTEMPTS {
        let candidate = rect.sample(rng);
        let overlap = total_overlap(candidate, existing);
        if overlap < best_overlap {
            best = candidate;
            best_overlap = overlap;
        }
        attempt += 1;
    }

    trace!(x = best.x, y = best.y, overlap = best_overlap, attempts = attempt, "note placed");
    best
}

/// [`place_note`] driven by the thread-local RNG.
pub fn place_note_random(existing: &[Position], canvas: CanvasSize) -> Position {
    place_note(existing, canvas, &mut rand::thread_rng())
}

/// Clamp a hand-moved note back inside the safe rectangle.
///
/// On a degenerate canvas the lower bound (the padding) wins.
pub fn ensure_within_boundaries(position: Position, canvas: CanvasSize) -> Position {
    let rect = SafeRect::for_canvas(canvas);
    Position {
        x: position.x.min(rect.max_x).max(rect.min_x),
        y: position.y.min(rect.max_y).max(rect.min_y),
    }
}
