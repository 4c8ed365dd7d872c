//! Crossterm terminal driver for gridpath.
//!
//! Provides a [`CrosstermDriver`] that implements [`gridpath_core::Driver`]:
//! each grid cell is painted as a `cell_size × cell_size` block of terminal
//! characters coloured by its role, and mouse positions are reported in
//! terminal cells (the device units the grid's cell size divides).

use std::io::{self, Write};
use std::sync::mpsc::Sender;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute, queue,
    style::{Color as CtColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use gridpath_core::{
    GridConfig, Point, Role,
    app::{Context, Driver},
    grid::Frame,
    messages::{Key, ModMask, MouseAction, Msg},
};

const GRID_LINE: CtColor = CtColor::Rgb {
    r: 148,
    g: 145,
    b: 148,
};

/// Background colour for a role.
fn role_color(role: Role) -> CtColor {
    let (r, g, b) = match role {
        Role::Empty => (255, 255, 255),
        Role::Barrier => (0, 0, 0),
        Role::Start => (246, 16, 79),
        Role::End => (135, 247, 42),
        Role::Open => (245, 178, 20),
        Role::Closed => (242, 253, 76),
        Role::Path => (20, 224, 245),
    };
    CtColor::Rgb { r, g, b }
}

/// Character at offset `(dx, dy)` inside a cell of side `size`.
///
/// Cells wider than one column carry a grid line along their right and
/// bottom edges.
fn glyph(dx: i32, dy: i32, size: i32, lines: bool) -> char {
    if !lines || size <= 1 {
        return ' ';
    }
    match (dx == size - 1, dy == size - 1) {
        (true, true) => '┼',
        (true, false) => '│',
        (false, true) => '─',
        (false, false) => ' ',
    }
}

/// Maps crossterm key modifiers to a [`ModMask`].
fn to_mod_mask(mods: KeyModifiers) -> ModMask {
    let mut m = ModMask::NONE;
    if mods.contains(KeyModifiers::SHIFT) {
        m = m | ModMask::SHIFT;
    }
    if mods.contains(KeyModifiers::CONTROL) {
        m = m | ModMask::CTRL;
    }
    if mods.contains(KeyModifiers::ALT) {
        m = m | ModMask::ALT;
    }
    m
}

/// Maps a crossterm [`KeyCode`] to a [`Key`].
fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Backspace => Some(Key::Backspace),
        _ => None,
    }
}

/// Maps a crossterm mouse event to a [`Msg`].
///
/// Drags keep the held button's action so barriers can be painted.
fn to_mouse_msg(me: MouseEvent) -> Option<Msg> {
    let action = match me.kind {
        MouseEventKind::Down(btn) | MouseEventKind::Drag(btn) => match btn {
            MouseButton::Left => MouseAction::Main,
            MouseButton::Right => MouseAction::Secondary,
            MouseButton::Middle => MouseAction::Auxiliary,
        },
        MouseEventKind::Up(_) => MouseAction::Release,
        MouseEventKind::Moved => MouseAction::Move,
        _ => return None,
    };
    Some(Msg::Mouse {
        action,
        pos: Point::new(me.column as i32, me.row as i32),
    })
}

/// Maps any crossterm event to a [`Msg`].
fn to_msg(ev: Event) -> Option<Msg> {
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => to_key(code).map(|key| Msg::KeyDown {
            key,
            modifiers: to_mod_mask(modifiers),
        }),
        Event::Mouse(me) => to_mouse_msg(me),
        _ => None,
    }
}

/// A grid configuration filling the current terminal with cells of side
/// `cell_size` columns.
pub fn fitting_config(cell_size: i32) -> io::Result<GridConfig> {
    let (w, h) = terminal::size()?;
    let cell_size = cell_size.max(1);
    Ok(GridConfig {
        rows: (h as i32 / cell_size).max(1),
        cols: (w as i32 / cell_size).max(1),
        cell_size,
        ..GridConfig::default()
    })
}

/// A terminal back-end for gridpath using crossterm.
pub struct CrosstermDriver {
    mouse_enabled: bool,
    grid_lines: bool,
}

impl CrosstermDriver {
    pub fn new() -> Self {
        Self {
            mouse_enabled: true,
            grid_lines: true,
        }
    }

    /// Configure whether mouse events are captured.
    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }

    /// Configure whether cells larger than one column draw grid lines.
    pub fn with_grid_lines(mut self, enabled: bool) -> Self {
        self.grid_lines = enabled;
        self
    }
}

impl Default for CrosstermDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        if self.mouse_enabled {
            execute!(stdout, event::EnableMouseCapture)?;
        }
        Ok(())
    }

    fn poll_msgs(
        &mut self,
        ctx: &Context,
        timeout: Duration,
        tx: &Sender<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if !event::poll(timeout)? {
            return Ok(());
        }

        while event::poll(Duration::ZERO)? {
            if ctx.is_done() {
                return Ok(());
            }
            if let Some(msg) = to_msg(event::read()?) {
                tx.send(msg)?;
            }
        }

        Ok(())
    }

    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = io::stdout();
        let size = frame.cell_size;

        for fc in &frame.cells {
            let x0 = fc.pos.col() * size;
            let y0 = fc.pos.row() * size;
            queue!(
                stdout,
                SetForegroundColor(GRID_LINE),
                SetBackgroundColor(role_color(fc.role))
            )?;
            for dy in 0..size {
                let (Ok(x), Ok(y)) = (u16::try_from(x0), u16::try_from(y0 + dy)) else {
                    log::warn!("cell {} lies beyond the terminal's addressable area", fc.pos);
                    break;
                };
                queue!(stdout, cursor::MoveTo(x, y))?;
                for dx in 0..size {
                    queue!(stdout, Print(glyph(dx, dy, size, self.grid_lines)))?;
                }
            }
        }

        queue!(stdout, ResetColor)?;
        stdout.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse_enabled {
            let _ = execute!(stdout, event::DisableMouseCapture);
        }
        let _ = execute!(stdout, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn space_maps_to_space_key() {
        assert_eq!(to_key(KeyCode::Char(' ')), Some(Key::Space));
        assert_eq!(to_key(KeyCode::Char('c')), Some(Key::Char('c')));
        assert_eq!(to_key(KeyCode::F(1)), None);
    }

    #[test]
    fn ctrl_modifier_is_kept() {
        let m = to_mod_mask(KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        assert!(m.contains(ModMask::CTRL));
        assert!(m.contains(ModMask::SHIFT));
        assert!(!m.contains(ModMask::ALT));
    }

    #[test]
    fn key_releases_are_ignored() {
        let press = Event::Key(KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        });
        let release = Event::Key(KeyEvent {
            kind: KeyEventKind::Release,
            ..KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)
        });
        assert_eq!(to_msg(press), Some(Msg::key(Key::Char('q'))));
        assert_eq!(to_msg(release), None);
    }

    #[test]
    fn drags_paint_with_the_held_button() {
        assert_eq!(
            to_msg(mouse(MouseEventKind::Drag(MouseButton::Left), 7, 3)),
            Some(Msg::mouse(MouseAction::Main, 7, 3))
        );
        assert_eq!(
            to_msg(mouse(MouseEventKind::Down(MouseButton::Right), 0, 1)),
            Some(Msg::mouse(MouseAction::Secondary, 0, 1))
        );
        assert_eq!(to_msg(mouse(MouseEventKind::ScrollUp, 0, 0)), None);
    }

    #[test]
    fn grid_lines_on_right_and_bottom_edges() {
        assert_eq!(glyph(0, 0, 1, true), ' ');
        assert_eq!(glyph(0, 0, 3, true), ' ');
        assert_eq!(glyph(2, 0, 3, true), '│');
        assert_eq!(glyph(1, 2, 3, true), '─');
        assert_eq!(glyph(2, 2, 3, true), '┼');
        assert_eq!(glyph(2, 2, 3, false), ' ');
    }

    #[test]
    fn every_role_has_a_distinct_color() {
        let roles = [
            Role::Empty,
            Role::Barrier,
            Role::Start,
            Role::End,
            Role::Open,
            Role::Closed,
            Role::Path,
        ];
        for (i, a) in roles.iter().enumerate() {
            for b in &roles[i + 1..] {
                assert_ne!(role_color(*a), role_color(*b), "{a:?} vs {b:?}");
            }
        }
    }
}
