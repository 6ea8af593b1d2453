use std::collections::VecDeque;

use crate::Coords;
use crate::arena::Bounds;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    None,
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Unit `(row, col)` step.
    pub fn delta(self) -> Coords {
        match self {
            None => (0, 0),
            Up => (-1, 0),
            Right => (0, 1),
            Down => (1, 0),
            Left => (0, -1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            None => None,
            Up => Down,
            Right => Left,
            Down => Up,
            Left => Right,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Alive,
    Dead,
}

/// Segments from head (front) to tail (back).
pub struct Snake {
    body: VecDeque<Coords>,
    direction: Direction,
    status: Status,
}

impl Snake {
    pub fn new(head: Coords) -> Self {
        let mut body = VecDeque::new();
        body.push_back(head);
        Snake { body, direction: None, status: Status::Alive }
    }

    #[cfg(test)]
    pub fn from_segments(segments: &[Coords], direction: Direction) -> Self {
        assert!(!segments.is_empty());
        Snake { body: segments.iter().copied().collect(), direction, status: Status::Alive }
    }

    pub fn segments(&self) -> impl Iterator<Item = Coords> + '_ {
        self.body.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn head_position(&self) -> Coords {
        self.body[0]
    }

    pub fn tail_position(&self) -> Coords {
        self.body[self.body.len() - 1]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_alive(&self) -> bool {
        self.status == Status::Alive
    }

    pub fn die(&mut self) {
        self.status = Status::Dead;
    }

    pub fn steer(&mut self, new_direction: Direction) {
        if new_direction != self.direction.opposite() {
            self.direction = new_direction;
        }
    }

    /// New tail on top of the current one; it trails into place on the next move.
    pub fn grow(&mut self) {
        self.body.push_back(self.tail_position());
    }

    /// Every segment except the head.
    pub fn occupies_body(&self, pos: Coords) -> bool {
        self.body.iter().skip(1).any(|seg| *seg == pos)
    }

    pub fn occupies(&self, pos: Coords) -> bool {
        self.body.contains(&pos)
    }

    pub fn advance(&mut self, bounds: Bounds) {
        let head = self.head_position();

        // The tail becomes the new head
        if self.body.len() > 1 {
            self.body.pop_back();
            self.body.push_front(head);
        }

        let (dr, dc) = self.direction.delta();
        let new_head = (head.0 + dr, head.1 + dc);
        self.body[0] = new_head;

        if !bounds.contains(new_head) || self.occupies_body(new_head) {
            self.die();
        }
    }
}
