use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, stdout, Write};
use std::time::Duration;

/// Size used when stdout is not a terminal (print mode in a pipe)
const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Terminal abstraction for rendering
pub struct Terminal {
    width: u16,
    height: u16,
    buffer: Vec<Vec<Cell>>,
    alternate_screen: bool,
}

/// A single cell in the terminal buffer
#[derive(Clone, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bg: None,
            bold: false,
        }
    }
}

impl Terminal {
    /// Take over the screen: raw mode, alternate screen, hidden cursor
    pub fn new() -> io::Result<Self> {
        let (width, height) = size()?;

        enable_raw_mode()?;
        // Drop never runs if we bail out here, so leave raw mode ourselves
        undo_on_err(execute!(stdout(), EnterAlternateScreen, Hide), || {
            let _ = disable_raw_mode();
        })?;

        Ok(Self::blank(width, height, true))
    }

    /// Off-screen buffer for print mode; never touches terminal state
    pub fn detached() -> Self {
        let (width, height) = size().unwrap_or(FALLBACK_SIZE);
        Self::blank(width, height, false)
    }

    fn blank(width: u16, height: u16, alternate_screen: bool) -> Self {
        Self {
            width,
            height,
            buffer: vec![vec![Cell::default(); width as usize]; height as usize],
            alternate_screen,
        }
    }

    /// Get terminal dimensions
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Rebuild the buffer for new dimensions
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.buffer = vec![vec![Cell::default(); width as usize]; height as usize];
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        for row in &mut self.buffer {
            row.fill(Cell::default());
        }
    }

    /// Clear the actual terminal
    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(stdout(), Clear(ClearType::All))?;
        Ok(())
    }

    #[cfg(test)]
    pub fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        self.buffer.get(y as usize).and_then(|row| row.get(x as usize))
    }

    /// Set a character at position; the cell keeps its background
    pub fn set(&mut self, x: i32, y: i32, ch: char, fg: Option<Color>, bold: bool) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let cell = &mut self.buffer[y as usize][x as usize];
            cell.ch = ch;
            cell.fg = fg;
            cell.bold = bold;
        }
    }

    pub fn set_bg(&mut self, x: i32, y: i32, bg: Color) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.buffer[y as usize][x as usize].bg = Some(bg);
        }
    }

    /// Set a string starting at position
    pub fn set_str(&mut self, x: i32, y: i32, s: &str, fg: Option<Color>, bold: bool) {
        for (i, ch) in s.chars().enumerate() {
            self.set(x + i as i32, y, ch, fg, bold);
        }
    }

    /// Write the whole buffer to the screen in one flush
    pub fn present(&self) -> io::Result<()> {
        let mut out = stdout();

        for (y, row) in self.buffer.iter().enumerate() {
            queue!(out, MoveTo(0, y as u16))?;

            for cell in row {
                if cell.bold {
                    queue!(out, SetAttribute(Attribute::Bold))?;
                }
                if let Some(bg) = cell.bg {
                    queue!(out, SetBackgroundColor(bg))?;
                }
                if let Some(fg) = cell.fg {
                    queue!(out, SetForegroundColor(fg))?;
                }
                queue!(out, Print(cell.ch), ResetColor)?;
                if cell.bold {
                    queue!(out, SetAttribute(Attribute::Reset))?;
                }
            }
        }

        out.flush()
    }

    /// Check for keypress (non-blocking), returns (code, modifiers)
    pub fn check_key(&self) -> io::Result<Option<(KeyCode, KeyModifiers)>> {
        if poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = read()? {
                if key_event.kind != KeyEventKind::Release {
                    return Ok(Some((key_event.code, key_event.modifiers)));
                }
            }
        }
        Ok(None)
    }

    /// Wait for a keypress with timeout
    pub fn wait_key(&self, timeout_ms: u64) -> io::Result<Option<KeyCode>> {
        if poll(Duration::from_millis(timeout_ms))? {
            if let Event::Key(key_event) = read()? {
                if key_event.kind != KeyEventKind::Release {
                    return Ok(Some(key_event.code));
                }
            }
        }
        Ok(None)
    }

    /// Sleep for specified duration
    pub fn sleep(&self, seconds: f32) {
        std::thread::sleep(Duration::from_secs_f32(seconds));
    }

    /// Print buffer to stdout with 24-bit ANSI colors (for print mode)
    pub fn print_to_stdout(&self) {
        for row in &self.buffer {
            for cell in row {
                if cell.bold {
                    print!("\x1b[1m");
                }
                if let Some(Color::Rgb { r, g, b }) = cell.bg {
                    print!("\x1b[48;2;{};{};{}m", r, g, b);
                }
                match cell.fg {
                    Some(Color::Rgb { r, g, b }) => print!("\x1b[38;2;{};{};{}m", r, g, b),
                    Some(Color::White) => print!("\x1b[97m"),
                    _ => {}
                }
                print!("{}\x1b[0m", cell.ch);
            }
            println!();
        }
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.alternate_screen {
            let _ = execute!(stdout(), Show, LeaveAlternateScreen);
            let _ = disable_raw_mode();
        }
    }
}

/// Run `undo` when `result` is an error, then hand the result back
fn undo_on_err<T>(result: io::Result<T>, undo: impl FnOnce()) -> io::Result<T> {
    if result.is_err() {
        undo();
    }
    result
}

/// Helper to create RGB colors
pub fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb { r, g, b }
}
