use log::warn;
use rand::Rng;
use rand::seq::IteratorRandom;

use crate::Coords;
use crate::arena::Arena;
use crate::snake::Snake;

/// Random draws tried before falling back to scanning the interior.
pub const MAX_SAMPLE_ATTEMPTS: usize = 256;

fn is_free(pos: Coords, arena: &Arena, snake: Option<&Snake>) -> bool {
    arena.find(pos).is_none() && !snake.map_or(false, |s| s.occupies(pos))
}

/// Picks a random interior cell holding neither an item nor a snake segment.
/// Returns `None` when every interior cell is taken.
pub fn sample_free_cell<R: Rng>(arena: &Arena, snake: Option<&Snake>, rng: &mut R) -> Option<Coords> {
    let bounds = arena.bounds();
    if bounds.bottom - bounds.top < 2 || bounds.right - bounds.left < 2 {
        return None;
    }

    for _ in 0..MAX_SAMPLE_ATTEMPTS {
        let pos = (
            rng.gen_range(bounds.top + 1..bounds.bottom),
            rng.gen_range(bounds.left + 1..bounds.right),
        );
        if is_free(pos, arena, snake) {
            return Some(pos);
        }
    }

    warn!("no free cell after {} draws, scanning the arena", MAX_SAMPLE_ATTEMPTS);
    bounds.interior()
        .filter(|pos| is_free(*pos, arena, snake))
        .choose(rng)
}
