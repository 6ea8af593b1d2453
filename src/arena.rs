use crate::Coords;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub top: i16,
    pub right: i16,
    pub bottom: i16,
    pub left: i16,
}

impl Bounds {
    /// Bounds covering a `width` x `height` display, inclusive on every side.
    pub fn from_size(width: u16, height: u16) -> Self {
        Bounds { top: 0, right: width as i16 - 1, bottom: height as i16 - 1, left: 0 }
    }

    pub fn contains(&self, (row, col): Coords) -> bool {
        row >= self.top && row <= self.bottom && col >= self.left && col <= self.right
    }

    pub fn on_perimeter(&self, (row, col): Coords) -> bool {
        self.contains((row, col))
            && (row == self.top || row == self.bottom || col == self.left || col == self.right)
    }

    pub fn perimeter(&self) -> impl Iterator<Item = Coords> + '_ {
        (self.top..=self.bottom)
            .flat_map(move |row| (self.left..=self.right).map(move |col| (row, col)))
            .filter(move |pos| self.on_perimeter(*pos))
    }

    /// Cells strictly inside the perimeter, row by row.
    pub fn interior(&self) -> impl Iterator<Item = Coords> + '_ {
        (self.top + 1..self.bottom)
            .flat_map(move |row| (self.left + 1..self.right).map(move |col| (row, col)))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Food,
    Wall,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub pos: Coords,
    pub kind: ItemKind,
}

pub struct Arena {
    bounds: Bounds,
    items: Vec<Item>,
}

impl Arena {
    pub fn new(bounds: Bounds) -> Self {
        Arena { bounds, items: vec![] }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn add(&mut self, pos: Coords, kind: ItemKind) {
        self.items.push(Item { pos, kind });
    }

    /// Removes the first item on `pos`, if any.
    pub fn remove(&mut self, pos: Coords) -> Option<Item> {
        let idx = self.items.iter().position(|item| item.pos == pos)?;
        // Item order carries no meaning
        Some(self.items.swap_remove(idx))
    }

    pub fn find(&self, pos: Coords) -> Option<&Item> {
        self.items.iter().find(|item| item.pos == pos)
    }

    pub fn count(&self, kind: ItemKind) -> usize {
        self.items.iter().filter(|item| item.kind == kind).count()
    }

    pub fn add_perimeter_walls(&mut self) {
        let walls: Vec<Coords> = self.bounds.perimeter().collect();
        for pos in walls {
            self.add(pos, ItemKind::Wall);
        }
    }
}
