use std::{thread::sleep, time::Duration};

use crossterm::Result;
use crossterm::event::{KeyEvent, KeyModifiers, KeyCode};
use crossterm::style::Color;
use log::{info, trace};
use rand::Rng;
use rand::rngs::StdRng;

use crate::GameConfig;
use crate::arena::{Arena, ItemKind};
use crate::engine::{self, SetupError};
use crate::snake::{Snake, Status, Direction};
use crate::term::{Glyph, TermManager};

const SNAKE_CHAR: char = '<';
const FOOD_CHAR: char = 'o';
const WALL_CHAR: char = 'X';

/// What a key press asks the game to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    Die,
    TogglePause,
    Exit,
}

impl Command {
    pub fn from_key_event(ev: &KeyEvent) -> Option<Command> {
        if is_ctrl_c(ev) {
            return Some(Command::Exit);
        }

        match ev.code {
            KeyCode::Char('w') | KeyCode::Char('k') | KeyCode::Up => Some(Command::Steer(Direction::Up)),
            KeyCode::Char('d') | KeyCode::Char('l') | KeyCode::Right => Some(Command::Steer(Direction::Right)),
            KeyCode::Char('s') | KeyCode::Char('j') | KeyCode::Down => Some(Command::Steer(Direction::Down)),
            KeyCode::Char('a') | KeyCode::Char('h') | KeyCode::Left => Some(Command::Steer(Direction::Left)),
            KeyCode::Char('q') => Some(Command::Die),
            KeyCode::Esc => Some(Command::TogglePause),
            _ => None,
        }
    }
}

/// Runs one tick, steering at most once beforehand.
pub fn step<R: Rng>(arena: &mut Arena, snake: &mut Snake, dir_change: Option<Direction>, rng: &mut R) -> Status {
    if let Some(dir) = dir_change {
        trace!("steering {:?} -> {:?}", snake.direction(), dir);
        snake.steer(dir);
    }

    engine::tick(arena, snake, rng)
}

/// How a round ended.
enum Outcome {
    Died,
    Exited,
}

pub struct SnakeGame {
    config: GameConfig,
    rng: StdRng,
    paused: bool,
    term: TermManager,
}

impl SnakeGame {
    pub fn new(config: GameConfig, rng: StdRng) -> Result<Self> {
        Ok(SnakeGame { config, rng, paused: false, term: TermManager::new()? })
    }

    pub fn size(&self) -> (u16, u16) {
        self.term.size()
    }

    /// Runs the title screen and rounds until the player quits. The terminal
    /// is restored whatever the result.
    pub fn run(&mut self) -> color_eyre::Result<()> {
        self.term.setup()?;
        let res = self.run_inner();
        let restored = self.term.restore();
        res?;
        restored?;
        Ok(())
    }

    fn run_inner(&mut self) -> color_eyre::Result<()> {
        if !self.show_intro()? {
            return Ok(());
        }

        loop {
            let (arena, snake) = self.new_board()?;
            let (arena, snake, outcome) = self.play(arena, snake)?;

            if let Outcome::Exited = outcome {
                return Ok(());
            }
            if !self.game_over(&arena, &snake)? {
                return Ok(());
            }
        }
    }

    fn new_board(&mut self) -> std::result::Result<(Arena, Snake), SetupError> {
        let (width, height) = self.term.size();
        engine::setup(width, height, self.config.walls, self.config.food, &mut self.rng)
    }

    /// Returns `false` if the player asked to quit.
    fn show_intro(&mut self) -> Result<bool> {
        self.term.clear()?;
        self.term.show_message(&[
            "SNAKESES",
            "(A SNAKE-like game made with curSES)",
            "Justin J. Meza",
            "",
            "Arrows, WASD or HJKL to move",
            "Esc to pause, q to give up",
            "",
            "Press any key to start!",
        ])?;

        let quit = is_ctrl_c(&self.term.read_key_blocking()?);
        self.term.hide_message()?;
        Ok(!quit)
    }

    fn play(&mut self, mut arena: Arena, mut snake: Snake) -> Result<(Arena, Snake, Outcome)> {
        let tick = Duration::from_millis(self.config.tick_ms);
        self.paused = false;
        self.term.clear()?;
        self.draw(&arena, &snake)?;
        let mut dir_change: Option<Direction> = None;

        loop {
            for key_ev in self.term.read_key_events_queue()? {
                match Command::from_key_event(&key_ev) {
                    Some(Command::Exit) => return Ok((arena, snake, Outcome::Exited)),
                    Some(Command::TogglePause) => self.toggle_pause()?,
                    Some(Command::Die) => snake.die(),
                    Some(Command::Steer(dir)) if !self.paused => dir_change = Some(dir),
                    _ => {}
                }
            }

            if !snake.is_alive() {
                info!("player gave up at length {}", snake.len());
                return Ok((arena, snake, Outcome::Died));
            }

            if !self.paused {
                let status = step(&mut arena, &mut snake, dir_change.take(), &mut self.rng);
                self.draw(&arena, &snake)?;

                if status == Status::Dead {
                    return Ok((arena, snake, Outcome::Died));
                }
            }

            sleep(tick);
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw(&mut self, arena: &Arena, snake: &Snake) -> Result<()> {
        let (width, height) = self.term.size();
        let mut frame = vec![Glyph::BLANK; width as usize * height as usize];
        let mut put = |(row, col): (i16, i16), glyph: Glyph| {
            if row >= 0 && col >= 0 && (row as u16) < height && (col as u16) < width {
                frame[row as usize * width as usize + col as usize] = glyph;
            }
        };

        for pos in snake.segments() {
            put(pos, self.glyph(SNAKE_CHAR, Color::Green));
        }

        for item in arena.items() {
            let glyph = match item.kind {
                ItemKind::Food => self.glyph(FOOD_CHAR, Color::Yellow),
                ItemKind::Wall => self.glyph(WALL_CHAR, Color::Red),
            };
            put(item.pos, glyph);
        }

        self.term.draw_frame(&frame)
    }

    fn glyph(&self, ch: char, color: Color) -> Glyph {
        if self.config.color {
            Glyph::colored(ch, color, color)
        } else {
            Glyph::plain(ch)
        }
    }

    /// Returns `true` to play another round.
    fn game_over(&mut self, arena: &Arena, snake: &Snake) -> Result<bool> {
        info!("game over, length {}, {} food left", snake.len(), arena.count(ItemKind::Food));

        self.term.show_message(&[
            "GAME OVER!",
            &format!("Length: {}", snake.len()),
            "",
            "Press r to play again,",
            "or q to quit.",
        ])?;

        loop {
            let ev = self.term.read_key_blocking()?;
            if is_ctrl_c(&ev) || ev.code == KeyCode::Char('q') {
                return Ok(false);
            }
            if ev.code == KeyCode::Char('r') {
                self.term.hide_message()?;
                return Ok(true);
            }
        }
    }

    fn toggle_pause(&mut self) -> Result<()> {
        if !self.paused {
            self.term.show_message(&["Paused", "Press Esc to resume", "or Ctrl+C to quit"])?;
        } else {
            self.term.hide_message()?;
        }

        self.paused = !self.paused;
        Ok(())
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
