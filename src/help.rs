use crate::config::palette;
use crate::terminal::{rgb, Terminal};
use crossterm::event::KeyCode;
use crossterm::style::Color;
use std::io;

pub const HELP: &str = "\
BLOSSOM
─────────────────────
Up/k    Grow one level
Down/j  Prune, petals fall
Space   Pause petals
q/Esc   Quit
?       Close help";

const HINT: &str = "Decrease level to watch petals fall!";

pub fn status_line(level: u32, petals: usize, paused: bool) -> String {
    let mut line = format!(
        "Press UP/DOWN arrows | Recursion level: {} | Falling petals: {}",
        level, petals
    );
    if paused {
        line.push_str(" | paused");
    }
    line
}

/// Status and hint text in the top left corner
pub fn draw_overlay(term: &mut Terminal, level: u32, petals: usize, paused: bool) {
    term.set_str(1, 0, &status_line(level, petals, paused), Some(Color::White), true);
    let pink = palette::LIGHT_PINK;
    term.set_str(1, 1, HINT, Some(rgb(pink.r, pink.g, pink.b)), false);
}

/// Render a centered help box into the back buffer.
pub fn render_help_overlay(term: &mut Terminal, help_text: &str) {
    if help_text.is_empty() {
        return;
    }
    let (width, height) = term.size();

    let lines: Vec<&str> = help_text.lines().collect();
    let max_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let box_width = max_width + 4; // 2 chars padding each side
    let box_height = lines.len() + 2;

    let start_x = (width as usize).saturating_sub(box_width) / 2;
    let start_y = (height as usize).saturating_sub(box_height) / 2;

    let border = Some(Color::White);
    let text = Some(Color::Grey);

    for row in 0..box_height {
        let y = (start_y + row) as i32;
        let (left, fill, right) = match row {
            0 => ('┌', '─', '┐'),
            r if r == box_height - 1 => ('└', '─', '┘'),
            _ => ('│', ' ', '│'),
        };
        term.set(start_x as i32, y, left, border, false);
        for x in 1..box_width - 1 {
            term.set((start_x + x) as i32, y, fill, border, false);
        }
        term.set((start_x + box_width - 1) as i32, y, right, border, false);
    }

    for (i, line) in lines.iter().enumerate() {
        term.set_str((start_x + 2) as i32, (start_y + 1 + i) as i32, line, text, false);
    }
}

/// Show the help box until `?` closes it.
/// Returns true if the user asked to quit (q/Esc) instead.
pub fn show_help_modal(term: &mut Terminal, help_text: &str) -> io::Result<bool> {
    if help_text.is_empty() {
        return Ok(false);
    }

    render_help_overlay(term, help_text);
    term.present()?;

    loop {
        if let Some(code) = term.wait_key(50)? {
            match code {
                KeyCode::Char('?') => return Ok(false),
                KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
                _ => {}
            }
        }
    }
}
