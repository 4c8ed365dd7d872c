//! The interaction state machine: clicks edit the grid, `Run` searches it.

use std::ops::ControlFlow;

use gridpath_core::{Event, Grid, GridConfig, Model, Point, Role, View};
use gridpath_search::{Outcome, Report};

/// Owns the grid and the current start/end selection.
///
/// The selected start and end are positions, so a reset (which replaces
/// every cell) only has to clear them.
pub struct Controller {
    grid: Grid,
    start: Option<Point>,
    end: Option<Point>,
    last_report: Option<Report>,
}

impl Controller {
    pub fn new(config: &GridConfig) -> Self {
        Self {
            grid: Grid::from_config(config),
            start: None,
            end: None,
            last_report: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Option<Point> {
        self.start
    }

    pub fn end(&self) -> Option<Point> {
        self.end
    }

    /// Report of the most recent search, cleared on reset.
    pub fn last_report(&self) -> Option<&Report> {
        self.last_report.as_ref()
    }

    /// First click picks the start, second the end, later clicks paint
    /// barriers. The current start and end are never overwritten.
    pub fn primary_click(&mut self, cell: Point) {
        if !self.grid.contains(cell) {
            log::debug!("primary click outside the grid at {cell}");
            return;
        }
        if self.start.is_none() && self.end != Some(cell) {
            self.start = Some(cell);
            self.grid.set_role(cell, Role::Start);
        } else if self.end.is_none() && self.start != Some(cell) {
            self.end = Some(cell);
            self.grid.set_role(cell, Role::End);
        } else if self.start != Some(cell) && self.end != Some(cell) {
            self.grid.set_role(cell, Role::Barrier);
        } else {
            log::debug!("primary click on endpoint {cell} ignored");
        }
    }

    /// Clear a cell back to empty, dropping it as start or end.
    pub fn secondary_click(&mut self, cell: Point) {
        if !self.grid.contains(cell) {
            log::debug!("secondary click outside the grid at {cell}");
            return;
        }
        if self.start == Some(cell) {
            self.start = None;
        }
        if self.end == Some(cell) {
            self.end = None;
        }
        self.grid.set_role(cell, Role::Empty);
    }

    /// Rebuild adjacency and search from start to end, stepping `view`
    /// after every expansion.
    ///
    /// Returns `None` without touching the grid unless both endpoints are
    /// set.
    pub fn run_search(&mut self, view: &mut dyn View) -> Option<&Report> {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            log::debug!("run requested without both endpoints");
            return None;
        };
        self.grid.recompute_adjacency();
        let report = match gridpath_search::run(&mut self.grid, start, end, view) {
            Ok(report) => report,
            Err(e) => {
                log::warn!("search not started: {e}");
                return None;
            }
        };
        match &report.outcome {
            Outcome::Found(path) => log::info!(
                "path of {} steps from {start} to {end}, {} cells settled",
                path.len() - 1,
                report.stats.settled
            ),
            Outcome::Exhausted => log::info!(
                "no path from {start} to {end}, {} cells settled",
                report.stats.settled
            ),
            Outcome::Aborted => log::info!("search aborted after {} steps", report.stats.steps),
        }
        self.last_report = Some(report);
        self.last_report.as_ref()
    }

    /// Forget the endpoints and start over with an empty grid.
    pub fn reset(&mut self) {
        self.start = None;
        self.end = None;
        self.last_report = None;
        self.grid.reset();
        log::info!("grid reset");
    }
}

impl Model for Controller {
    fn update(&mut self, event: Event, view: &mut dyn View) -> ControlFlow<()> {
        match event {
            Event::PrimaryClick(cell) => self.primary_click(cell),
            Event::SecondaryClick(cell) => self.secondary_click(cell),
            Event::Run => {
                if self.run_search(view).is_some_and(Report::aborted) {
                    return ControlFlow::Break(());
                }
            }
            Event::Reset => self.reset(),
            Event::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    fn grid(&self) -> &Grid {
        &self.grid
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use gridpath_core::{App, AppConfig, Key, Keymap, MouseAction, Msg, ScriptDriver};

    use super::*;

    fn controller(rows: i32, cols: i32) -> Controller {
        Controller::new(&GridConfig {
            rows,
            cols,
            cell_size: 1,
            step_delay_ms: 0,
        })
    }

    fn no_redraw() -> impl FnMut(&Grid) -> ControlFlow<()> {
        |_: &Grid| ControlFlow::Continue(())
    }

    #[test]
    fn clicks_pick_start_then_end_then_barriers() {
        let mut c = controller(3, 3);
        c.primary_click(Point::at(0, 0));
        c.primary_click(Point::at(2, 2));
        c.primary_click(Point::at(1, 1));
        assert_eq!(c.start(), Some(Point::at(0, 0)));
        assert_eq!(c.end(), Some(Point::at(2, 2)));
        assert_eq!(c.grid().role(Point::at(0, 0)), Some(Role::Start));
        assert_eq!(c.grid().role(Point::at(2, 2)), Some(Role::End));
        assert_eq!(c.grid().role(Point::at(1, 1)), Some(Role::Barrier));
    }

    #[test]
    fn clicking_an_endpoint_never_paints_it() {
        let mut c = controller(1, 2);
        c.primary_click(Point::at(0, 0));
        // Second click on the start must not become the end.
        c.primary_click(Point::at(0, 0));
        assert_eq!(c.end(), None);
        c.primary_click(Point::at(0, 1));
        c.primary_click(Point::at(0, 1));
        c.primary_click(Point::at(0, 0));
        assert_eq!(c.grid().role(Point::at(0, 0)), Some(Role::Start));
        assert_eq!(c.grid().role(Point::at(0, 1)), Some(Role::End));
        assert_eq!(c.grid().count(Role::Barrier), 0);
        assert_eq!(c.grid().count(Role::Start), 1);
        assert_eq!(c.grid().count(Role::End), 1);
    }

    #[test]
    fn cleared_start_is_picked_again_before_barriers() {
        let mut c = controller(2, 2);
        c.primary_click(Point::at(0, 0));
        c.primary_click(Point::at(1, 1));
        c.secondary_click(Point::at(0, 0));
        assert_eq!(c.start(), None);
        assert_eq!(c.grid().role(Point::at(0, 0)), Some(Role::Empty));
        // The end cell cannot become the start.
        c.primary_click(Point::at(1, 1));
        assert_eq!(c.start(), None);
        c.primary_click(Point::at(0, 1));
        assert_eq!(c.start(), Some(Point::at(0, 1)));
    }

    #[test]
    fn secondary_click_clears_any_role() {
        let mut c = controller(2, 2);
        c.primary_click(Point::at(0, 0));
        c.primary_click(Point::at(0, 1));
        c.primary_click(Point::at(1, 0));
        c.secondary_click(Point::at(1, 0));
        c.secondary_click(Point::at(0, 1));
        assert_eq!(c.end(), None);
        assert_eq!(c.start(), Some(Point::at(0, 0)));
        assert_eq!(c.grid().count(Role::Empty), 3);
    }

    #[test]
    fn out_of_range_clicks_absorbed() {
        let mut c = controller(2, 2);
        c.primary_click(Point::at(2, 0));
        c.secondary_click(Point::at(-1, 0));
        assert_eq!(c.start(), None);
        assert_eq!(c.grid().count(Role::Empty), 4);
    }

    #[test]
    fn run_without_both_endpoints_is_a_noop() {
        let mut c = controller(3, 3);
        c.primary_click(Point::at(0, 0));
        let mut steps = 0;
        let mut view = |_: &Grid| {
            steps += 1;
            ControlFlow::<()>::Continue(())
        };
        assert!(c.run_search(&mut view).is_none());
        assert_eq!(steps, 0);
        assert!(c.grid().iter().all(|cell| cell.neighbors().is_empty()));
        assert!(c.last_report().is_none());
    }

    #[test]
    fn run_threads_the_gap_in_a_wall() {
        let mut c = controller(5, 5);
        c.primary_click(Point::at(0, 0));
        c.primary_click(Point::at(4, 4));
        for row in 1..5 {
            c.primary_click(Point::at(row, 2));
        }
        let report = c.run_search(&mut no_redraw()).cloned().unwrap();
        assert_eq!(report.path_len(), Some(8));
        assert_eq!(c.grid().role(Point::at(0, 2)), Some(Role::Path));
        assert_eq!(c.grid().count(Role::Path), 7);
        assert_eq!(c.grid().role(Point::at(0, 0)), Some(Role::Start));
    }

    #[test]
    fn barrier_painted_after_a_run_counts_next_time() {
        let mut c = controller(1, 3);
        c.primary_click(Point::at(0, 0));
        c.primary_click(Point::at(0, 2));
        assert!(c.run_search(&mut no_redraw()).unwrap().found());
        // The middle cell is now Path; painting it still works.
        c.primary_click(Point::at(0, 1));
        assert_eq!(c.grid().role(Point::at(0, 1)), Some(Role::Barrier));
        let report = c.run_search(&mut no_redraw()).unwrap();
        assert_eq!(report.outcome, Outcome::Exhausted);
    }

    #[test]
    fn reset_forgets_everything() {
        let mut c = controller(3, 4);
        c.primary_click(Point::at(0, 0));
        c.primary_click(Point::at(2, 3));
        c.primary_click(Point::at(1, 1));
        c.run_search(&mut no_redraw());
        c.reset();
        assert_eq!(c.start(), None);
        assert_eq!(c.end(), None);
        assert!(c.last_report().is_none());
        assert_eq!(c.grid(), &Grid::new(3, 4, 1));
        // The next click is a start again.
        c.primary_click(Point::at(1, 1));
        assert_eq!(c.start(), Some(Point::at(1, 1)));
    }

    #[test]
    fn quit_event_breaks() {
        let mut c = controller(1, 1);
        let mut view = no_redraw();
        assert!(c.update(Event::Quit, &mut view).is_break());
        assert!(c.update(Event::Reset, &mut view).is_continue());
    }

    fn app(rows: i32, cols: i32, script: Vec<Msg>) -> App<Controller, ScriptDriver> {
        App::new(AppConfig {
            model: controller(rows, cols),
            driver: ScriptDriver::new(script),
            keymap: Keymap::default(),
            step_delay: Duration::ZERO,
        })
    }

    #[test]
    fn scripted_session_finds_path() {
        let mut a = app(
            3,
            3,
            vec![
                Msg::mouse(MouseAction::Main, 0, 0),
                Msg::mouse(MouseAction::Main, 2, 2),
                Msg::mouse(MouseAction::Main, 1, 1),
                Msg::key(Key::Space),
            ],
        );
        a.run().unwrap();
        let c = a.model();
        let report = c.last_report().unwrap();
        assert_eq!(report.path_len(), Some(4));
        // One frame per step, each showing the search's progress.
        let frames = a.driver().frames();
        assert!(frames.len() as usize > report.stats.steps);
        let last = frames.last().unwrap();
        assert!(last.cells.iter().any(|fc| fc.role == Role::Path));
        assert!(a.driver().is_closed());
    }

    #[test]
    fn quit_during_search_ends_session() {
        let mut a = app(
            10,
            10,
            vec![
                Msg::mouse(MouseAction::Main, 0, 0),
                Msg::mouse(MouseAction::Main, 9, 9),
                Msg::key(Key::Space),
                Msg::key(Key::Escape),
                Msg::key(Key::Char('c')),
            ],
        );
        a.run().unwrap();
        let c = a.model();
        assert!(c.last_report().unwrap().aborted());
        assert_eq!(c.grid().count(Role::Path), 0);
        // The reset queued after the quit never ran.
        assert_eq!(a.driver().remaining(), 1);
        assert_eq!(c.start(), Some(Point::at(0, 0)));
    }

    #[test]
    fn run_before_endpoints_then_reset_via_keys() {
        let mut a = app(
            2,
            2,
            vec![
                Msg::key(Key::Space),
                Msg::mouse(MouseAction::Main, 0, 0),
                Msg::mouse(MouseAction::Main, 5, 5),
                Msg::key(Key::Char('c')),
            ],
        );
        a.run().unwrap();
        let c = a.model();
        assert!(c.last_report().is_none());
        assert_eq!(c.start(), None);
        assert_eq!(c.grid().count(Role::Empty), 4);
    }
}
