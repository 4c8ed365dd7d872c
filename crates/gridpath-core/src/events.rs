//! Semantic [`Event`]s and the [`Keymap`] that resolves raw [`Msg`]s into
//! them.

use crate::geom::Point;
use crate::grid::Grid;
use crate::messages::{Key, ModMask, MouseAction, Msg};

/// The five events the interaction controller understands.
///
/// Click positions are grid cells, already mapped from device coordinates
/// and known to be in bounds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    PrimaryClick(Point),
    SecondaryClick(Point),
    Run,
    Reset,
    Quit,
}

/// Key bindings for the non-mouse events.
#[derive(Clone, Debug)]
pub struct Keymap {
    pub run: Vec<Key>,
    pub reset: Vec<Key>,
    pub quit: Vec<Key>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            run: vec![Key::Space, Key::Enter],
            reset: vec![Key::Char('c')],
            quit: vec![Key::Escape, Key::Char('q')],
        }
    }
}

impl Keymap {
    /// Resolve a raw message against `grid`'s geometry.
    ///
    /// Mouse messages outside the grid, unbound keys and button releases
    /// resolve to `None`. Ctrl-C always quits.
    pub fn translate(&self, msg: &Msg, grid: &Grid) -> Option<Event> {
        match msg {
            Msg::Quit => Some(Event::Quit),
            Msg::KeyDown { key, modifiers } => {
                if modifiers.contains(ModMask::CTRL) && *key == Key::Char('c') {
                    Some(Event::Quit)
                } else if self.quit.contains(key) {
                    Some(Event::Quit)
                } else if self.run.contains(key) {
                    Some(Event::Run)
                } else if self.reset.contains(key) {
                    Some(Event::Reset)
                } else {
                    None
                }
            }
            Msg::Mouse { action, pos } => {
                let click: fn(Point) -> Event = match action {
                    MouseAction::Main => Event::PrimaryClick,
                    MouseAction::Secondary => Event::SecondaryClick,
                    _ => return None,
                };
                match grid.cell_for_point(*pos) {
                    Ok(cell) => Some(click(cell)),
                    Err(e) => {
                        log::debug!("ignoring click at {pos}: {e}");
                        None
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(50, 100, 12)
    }

    #[test]
    fn keys_resolve_to_events() {
        let km = Keymap::default();
        let g = grid();
        assert_eq!(km.translate(&Msg::key(Key::Space), &g), Some(Event::Run));
        assert_eq!(km.translate(&Msg::key(Key::Char('c')), &g), Some(Event::Reset));
        assert_eq!(km.translate(&Msg::key(Key::Escape), &g), Some(Event::Quit));
        assert_eq!(km.translate(&Msg::key(Key::Char('x')), &g), None);
        assert_eq!(km.translate(&Msg::Quit, &g), Some(Event::Quit));
    }

    #[test]
    fn ctrl_c_quits_rather_than_resets() {
        let km = Keymap::default();
        let msg = Msg::key_mod(Key::Char('c'), ModMask::CTRL);
        assert_eq!(km.translate(&msg, &grid()), Some(Event::Quit));
    }

    #[test]
    fn clicks_map_through_cell_size() {
        let km = Keymap::default();
        let g = grid();
        assert_eq!(
            km.translate(&Msg::mouse(MouseAction::Main, 25, 13), &g),
            Some(Event::PrimaryClick(Point::at(1, 2)))
        );
        assert_eq!(
            km.translate(&Msg::mouse(MouseAction::Secondary, 0, 599), &g),
            Some(Event::SecondaryClick(Point::at(49, 0)))
        );
    }

    #[test]
    fn out_of_range_clicks_are_dropped() {
        let km = Keymap::default();
        let g = grid();
        assert_eq!(km.translate(&Msg::mouse(MouseAction::Main, 1200, 0), &g), None);
        assert_eq!(km.translate(&Msg::mouse(MouseAction::Main, -1, 0), &g), None);
    }

    #[test]
    fn other_mouse_actions_ignored() {
        let km = Keymap::default();
        let g = grid();
        for action in [MouseAction::Auxiliary, MouseAction::Release, MouseAction::Move] {
            assert_eq!(km.translate(&Msg::mouse(action, 5, 5), &g), None);
        }
    }
}
