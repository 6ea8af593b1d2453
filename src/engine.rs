use log::{debug, info, trace, warn};
use rand::Rng;
use thiserror::Error;

use crate::arena::{Arena, Bounds, ItemKind};
use crate::sampler::sample_free_cell;
use crate::snake::{Snake, Status};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("a {width}x{height} terminal is too small to play in")]
    TooSmall { width: u16, height: u16 },
    #[error("no free cell left in the arena for the {placing}")]
    ArenaFull { placing: &'static str },
}

/// Builds a fresh board: border walls, random walls, food, then the snake.
pub fn setup<R: Rng>(
    width: u16,
    height: u16,
    num_walls: usize,
    num_food: usize,
    rng: &mut R,
) -> Result<(Arena, Snake), SetupError> {
    if width < 3 || height < 3 {
        return Err(SetupError::TooSmall { width, height });
    }

    let mut arena = Arena::new(Bounds::from_size(width, height));
    arena.add_perimeter_walls();

    for _ in 0..num_walls {
        let pos = sample_free_cell(&arena, None, rng).ok_or(SetupError::ArenaFull { placing: "walls" })?;
        arena.add(pos, ItemKind::Wall);
    }

    for _ in 0..num_food {
        let pos = sample_free_cell(&arena, None, rng).ok_or(SetupError::ArenaFull { placing: "food" })?;
        arena.add(pos, ItemKind::Food);
    }

    let head = sample_free_cell(&arena, None, rng).ok_or(SetupError::ArenaFull { placing: "snake" })?;
    debug!("board ready: {} items, snake at {:?}", arena.items().len(), head);

    Ok((arena, Snake::new(head)))
}

/// Runs one simulation step and reports the snake's status afterwards.
pub fn tick<R: Rng>(arena: &mut Arena, snake: &mut Snake, rng: &mut R) -> Status {
    snake.advance(arena.bounds());

    if !snake.is_alive() {
        info!("snake crashed into itself or left the arena at {:?}", snake.head_position());
        return snake.status();
    }

    let head = snake.head_position();
    trace!("head at {:?}", head);

    match arena.find(head).map(|item| item.kind) {
        Some(ItemKind::Food) => {
            snake.grow();
            arena.remove(head);
            match sample_free_cell(arena, Some(snake), rng) {
                Some(pos) => {
                    arena.add(pos, ItemKind::Food);
                    debug!("ate food at {:?}, length {}, new food at {:?}", head, snake.len(), pos);
                }
                None => warn!("ate food at {:?} but the arena has no room for more", head),
            }
        }
        Some(ItemKind::Wall) => {
            info!("snake hit a wall at {:?}", head);
            snake.die();
        }
        None => {}
    }

    snake.status()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Coords;
    use crate::snake::Direction::{self, Down, Right};
    use rand::{SeedableRng, rngs::StdRng};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn walled(width: u16, height: u16) -> Arena {
        let mut arena = Arena::new(Bounds::from_size(width, height));
        arena.add_perimeter_walls();
        arena
    }

    #[test]
    fn eating_food_grows_and_respawns() {
        let mut rng = rng();
        let mut arena = walled(12, 12);
        arena.add((5, 6), ItemKind::Food);
        let mut snake = Snake::from_segments(&[(5, 5), (5, 4)], Right);

        assert_eq!(tick(&mut arena, &mut snake, &mut rng), Status::Alive);

        let segments: Vec<Coords> = snake.segments().collect();
        assert_eq!(segments, vec![(5, 6), (5, 5), (5, 5)]);
        assert_eq!(snake.tail_position(), (5, 5));
        assert_eq!(arena.count(ItemKind::Food), 1);

        let food = arena.items().iter().find(|item| item.kind == ItemKind::Food).unwrap();
        assert_ne!(food.pos, (5, 6));
        assert!(!snake.occupies(food.pos));
    }

    #[test]
    fn food_count_is_steady_over_many_meals() {
        let mut rng = rng();
        let mut arena = walled(20, 6);
        for col in 3..18 {
            arena.add((2, col), ItemKind::Food);
        }
        let mut snake = Snake::from_segments(&[(2, 2)], Right);

        for _ in 0..15 {
            assert_eq!(tick(&mut arena, &mut snake, &mut rng), Status::Alive);
        }

        assert!(snake.len() > 1);
        assert_eq!(arena.count(ItemKind::Food), 15);
    }

    #[test]
    fn wall_item_kills_without_further_changes() {
        let mut rng = rng();
        // 3x3 board: only the centre is open
        let mut arena = walled(3, 3);
        let items_before = arena.items().to_vec();
        let mut snake = Snake::from_segments(&[(1, 1)], Right);

        assert_eq!(tick(&mut arena, &mut snake, &mut rng), Status::Dead);
        assert_eq!(snake.head_position(), (1, 2));
        assert_eq!(snake.len(), 1);
        assert_eq!(arena.items(), &items_before[..]);
    }

    #[test]
    fn walking_into_a_wall_in_a_three_by_three_interior() {
        let mut rng = rng();
        let mut arena = walled(5, 5);
        arena.add((2, 3), ItemKind::Wall);
        let items_before = arena.items().to_vec();
        let mut snake = Snake::new((2, 2));
        snake.steer(Right);

        assert_eq!(tick(&mut arena, &mut snake, &mut rng), Status::Dead);
        assert_eq!(snake.head_position(), (2, 3));
        assert_eq!(snake.len(), 1);
        assert_eq!(arena.items(), &items_before[..]);
    }

    #[test]
    fn setup_errors_read_well() {
        assert_eq!(
            SetupError::TooSmall { width: 2, height: 10 }.to_string(),
            "a 2x10 terminal is too small to play in"
        );
        assert_eq!(
            SetupError::ArenaFull { placing: "food" }.to_string(),
            "no free cell left in the arena for the food"
        );
    }

    #[test]
    fn leaving_bounds_kills() {
        let mut rng = rng();
        let mut arena = Arena::new(Bounds::from_size(5, 5));
        let mut snake = Snake::from_segments(&[(2, 4)], Right);

        assert_eq!(tick(&mut arena, &mut snake, &mut rng), Status::Dead);
        assert!(arena.items().is_empty());
    }

    #[test]
    fn empty_cell_is_a_plain_move() {
        let mut rng = rng();
        let mut arena = walled(10, 10);
        let mut snake = Snake::from_segments(&[(4, 4), (4, 3)], Down);

        assert_eq!(tick(&mut arena, &mut snake, &mut rng), Status::Alive);
        assert_eq!(snake.segments().collect::<Vec<_>>(), vec![(5, 4), (4, 4)]);
    }

    #[test]
    fn last_food_is_not_replaced_when_board_is_full() {
        let mut rng = rng();
        // Interior is a single row of three cells, the snake fills it after eating
        let mut arena = walled(5, 3);
        arena.add((1, 3), ItemKind::Food);
        let mut snake = Snake::from_segments(&[(1, 2), (1, 1), (1, 1)], Right);

        assert_eq!(tick(&mut arena, &mut snake, &mut rng), Status::Alive);
        assert_eq!(snake.segments().collect::<Vec<_>>(), vec![(1, 3), (1, 2), (1, 1), (1, 1)]);
        assert_eq!(arena.count(ItemKind::Food), 0);
    }

    #[test]
    fn setup_places_everything_apart() {
        let mut rng = rng();
        let (arena, snake) = setup(40, 20, 25, 5, &mut rng).unwrap();
        let bounds = arena.bounds();

        assert_eq!(arena.count(ItemKind::Food), 5);
        assert_eq!(arena.count(ItemKind::Wall), bounds.perimeter().count() + 25);
        assert!(bounds.perimeter().all(|pos| arena.find(pos).map(|item| item.kind) == Some(ItemKind::Wall)));

        let mut cells: Vec<Coords> = arena.items().iter().map(|item| item.pos).collect();
        cells.push(snake.head_position());
        let total = cells.len();
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), total);

        assert_eq!(snake.len(), 1);
        assert_eq!(snake.direction(), Direction::None);
        assert!(snake.is_alive());
    }

    #[test]
    fn setup_rejects_crowded_boards() {
        let mut rng = rng();

        assert_eq!(setup(2, 10, 0, 1, &mut rng).err(), Some(SetupError::TooSmall { width: 2, height: 10 }));
        assert_eq!(setup(4, 4, 5, 1, &mut rng).err(), Some(SetupError::ArenaFull { placing: "walls" }));
        assert_eq!(setup(4, 4, 2, 2, &mut rng).err(), Some(SetupError::ArenaFull { placing: "snake" }));
    }
}
