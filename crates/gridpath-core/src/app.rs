//! The application loop: [`Model`], [`View`], [`Driver`], [`App`].
//!
//! The loop is single-threaded. A model may call back into its [`View`]
//! while handling one event (e.g. during a search); each such step redraws
//! and drains pending input for a quit request only.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use crate::cell::Role;
use crate::events::{Event, Keymap};
use crate::grid::{compute_frame, Frame, Grid};
use crate::messages::Msg;

/// How long the idle loop waits for input before re-checking cancellation.
const POLL_TIMEOUT: Duration = Duration::from_millis(16);

// ---------------------------------------------------------------------------
// Context (cancellation token)
// ---------------------------------------------------------------------------

/// A simple cooperative-cancellation token backed by an [`AtomicBool`].
#[derive(Clone, Debug)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
    pub fn new() -> Self {
        Self {
            done: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

/// Render hook handed to a model while it processes one event.
pub trait View {
    /// Redraw `grid` and report whether the caller should keep going.
    fn step(&mut self, grid: &Grid) -> ControlFlow<()>;
}

impl<F: FnMut(&Grid) -> ControlFlow<()>> View for F {
    fn step(&mut self, grid: &Grid) -> ControlFlow<()> {
        self(grid)
    }
}

// ---------------------------------------------------------------------------
// Model trait
// ---------------------------------------------------------------------------

/// Application state driven by semantic events.
pub trait Model {
    /// Handle one event. `Break` ends the application loop.
    fn update(&mut self, event: Event, view: &mut dyn View) -> ControlFlow<()>;

    /// The grid to render and to resolve clicks against.
    fn grid(&self) -> &Grid;
}

// ---------------------------------------------------------------------------
// Driver trait
// ---------------------------------------------------------------------------

/// Back-end driver (terminal, window, script).
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Wait up to `timeout` for input and send any raw messages through
    /// `tx`. A zero timeout only drains what is already pending.
    fn poll_msgs(
        &mut self,
        ctx: &Context,
        timeout: Duration,
        tx: &Sender<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Paint the changed cells of a frame.
    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Clean up / restore the terminal.
    fn close(&mut self);
}

// ---------------------------------------------------------------------------
// AppConfig / App
// ---------------------------------------------------------------------------

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
    pub keymap: Keymap,
    /// Pause after every redraw requested through [`View::step`].
    pub step_delay: Duration,
}

/// The main application runner.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    keymap: Keymap,
    step_delay: Duration,
    /// Roles as of the last flush.
    shown: Vec<Role>,
}

impl<M: Model, D: Driver> App<M, D> {
    pub fn new(config: AppConfig<M, D>) -> Self {
        Self {
            model: config.model,
            driver: config.driver,
            keymap: config.keymap,
            step_delay: config.step_delay,
            shown: Vec::new(),
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Run the loop until the model or the driver asks to stop.
    ///
    /// 1. Initialises the driver and draws the whole grid.
    /// 2. Poll → translate → update → draw changed cells.
    /// 3. Closes the driver, also on error.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.driver.init()?;
        let result = self.event_loop();
        self.driver.close();
        result
    }

    fn event_loop(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let ctx = Context::new();
        let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();

        redraw(&mut self.driver, &mut self.shown, self.model.grid())?;

        while !ctx.is_done() {
            self.driver.poll_msgs(&ctx, POLL_TIMEOUT, &tx)?;
            self.process_pending(&rx, &tx, &ctx)?;
        }
        Ok(())
    }

    /// Drain queued messages, update the model and redraw what changed.
    fn process_pending(
        &mut self,
        rx: &Receiver<Msg>,
        tx: &Sender<Msg>,
        ctx: &Context,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut needs_draw = false;

        while let Ok(msg) = rx.try_recv() {
            let Some(event) = self.keymap.translate(&msg, self.model.grid()) else {
                continue;
            };
            let mut view = StepView {
                driver: &mut self.driver,
                shown: &mut self.shown,
                keymap: &self.keymap,
                ctx,
                tx,
                rx,
                delay: self.step_delay,
                error: None,
            };
            let flow = self.model.update(event, &mut view);
            if let Some(e) = view.error.take() {
                return Err(e);
            }
            if flow.is_break() {
                ctx.cancel();
                return Ok(());
            }
            needs_draw = true;
        }

        if needs_draw {
            redraw(&mut self.driver, &mut self.shown, self.model.grid())?;
        }
        Ok(())
    }
}

/// Flush the cells that changed since `shown` and remember the new roles.
fn redraw<D: Driver>(
    driver: &mut D,
    shown: &mut Vec<Role>,
    grid: &Grid,
) -> Result<(), Box<dyn std::error::Error>> {
    let frame = compute_frame(shown, grid);
    if !frame.cells.is_empty() {
        driver.flush(frame)?;
    }
    *shown = grid.roles();
    Ok(())
}

// ---------------------------------------------------------------------------
// StepView
// ---------------------------------------------------------------------------

/// The [`View`] an [`App`] lends its model: redraw, pause, then look for a
/// quit request. Any other input arriving mid-step is dropped.
struct StepView<'a, D: Driver> {
    driver: &'a mut D,
    shown: &'a mut Vec<Role>,
    keymap: &'a Keymap,
    ctx: &'a Context,
    tx: &'a Sender<Msg>,
    rx: &'a Receiver<Msg>,
    delay: Duration,
    error: Option<Box<dyn std::error::Error>>,
}

impl<D: Driver> StepView<'_, D> {
    fn try_step(&mut self, grid: &Grid) -> Result<ControlFlow<()>, Box<dyn std::error::Error>> {
        redraw(self.driver, self.shown, grid)?;
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        self.driver.poll_msgs(self.ctx, Duration::ZERO, self.tx)?;
        while let Ok(msg) = self.rx.try_recv() {
            match self.keymap.translate(&msg, grid) {
                Some(Event::Quit) => return Ok(ControlFlow::Break(())),
                Some(other) => log::debug!("dropping {other:?} received mid-step"),
                None => {}
            }
        }
        Ok(ControlFlow::Continue(()))
    }
}

impl<D: Driver> View for StepView<'_, D> {
    fn step(&mut self, grid: &Grid) -> ControlFlow<()> {
        if self.error.is_some() {
            return ControlFlow::Break(());
        }
        match self.try_step(grid) {
            Ok(flow) => flow,
            Err(e) => {
                self.error = Some(e);
                ControlFlow::Break(())
            }
        }
    }
}
