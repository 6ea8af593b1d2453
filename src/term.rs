use std::{io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal, Result};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

/// A character cell with optional colors.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
}

impl Glyph {
    pub const BLANK: Glyph = Glyph { ch: ' ', fg: None, bg: None };

    pub fn plain(ch: char) -> Self {
        Glyph { ch, fg: None, bg: None }
    }

    pub fn colored(ch: char, fg: Color, bg: Color) -> Self {
        Glyph { ch, fg: Some(fg), bg: Some(bg) }
    }
}

pub struct TermManager {
    width: u16,
    height: u16,
    stdout: Stdout,
    screen: Vec<Glyph>,
    current_msg: Option<Message>,
}

struct Message {
    top_left: (u16, u16),
    width: u16,
    height: u16,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size()?;
        let stdout = stdout();
        let screen = vec![Glyph::BLANK; width as usize * height as usize];
        Ok(TermManager { width, height, stdout, screen, current_msg: None })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    /// Drains pending key events without waiting.
    pub fn read_key_events_queue(&self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(0))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Draws a full-screen frame, only touching cells that changed.
    pub fn draw_frame(&mut self, frame: &[Glyph]) -> Result<()> {
        for (i, glyph) in frame.iter().enumerate().take(self.screen.len()) {
            if self.screen[i] != *glyph {
                let pos = ((i % self.width as usize) as u16, (i / self.width as usize) as u16);
                self.print_at(pos, *glyph)?;
            }
        }

        self.flush()
    }

    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        if self.current_msg.is_some() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as u16;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as u16;
        let msg_width = msg_width.min(self.width);
        let msg_height = msg_height.min(self.height);
        let center = (self.width / 2, self.height / 2);
        let top_left = (center.0 - msg_width / 2, center.1 - msg_height / 2);
        let glyph = |ch| Glyph::colored(ch, Color::White, Color::DarkRed);

        for y_diff in 0..msg_height {
            let line = if y_diff == 0 || y_diff == msg_height - 1 {
                ""
            } else {
                lines[y_diff as usize - 1]
            };
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);

            for (x_diff, ch) in padded_line.chars().take(msg_width as usize).enumerate() {
                let pos = (top_left.0 + x_diff as u16, top_left.1 + y_diff);
                self.print_at_no_save(pos, glyph(ch))?;
            }
        }

        self.current_msg = Some(Message { width: msg_width, height: msg_height, top_left });
        self.flush()
    }

    pub fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        // Restore the content from the screen buffer
        for y_diff in 0..msg.height {
            for x_diff in 0..msg.width {
                let (x, y) = (msg.top_left.0 + x_diff, msg.top_left.1 + y_diff);
                let glyph = self.screen[self.width as usize * y as usize + x as usize];
                self.print_at_no_save((x, y), glyph)?;
            }
        }

        self.flush()
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, style::ResetColor, terminal::Clear(ClearType::All))?;
        self.screen = vec![Glyph::BLANK; self.width as usize * self.height as usize];
        self.current_msg = None;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn print_at(&mut self, pos: (u16, u16), glyph: Glyph) -> Result<()> {
        self.print_at_no_save(pos, glyph)?;
        self.screen[self.width as usize * pos.1 as usize + pos.0 as usize] = glyph;
        Ok(())
    }

    fn print_at_no_save(&mut self, pos: (u16, u16), glyph: Glyph) -> Result<()> {
        // Used for messages, so the screen buffer keeps what lies underneath
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::ResetColor)?;
        if let Some(fg) = glyph.fg {
            queue!(self.stdout, style::SetForegroundColor(fg))?;
        }
        if let Some(bg) = glyph.bg {
            queue!(self.stdout, style::SetBackgroundColor(bg))?;
        }
        queue!(self.stdout, style::Print(glyph.ch))
    }
}
