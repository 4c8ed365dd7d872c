use std::error::Error;

use gridpath::{Controller, load_config, logging};
use gridpath_core::{App, AppConfig, GridConfig, Keymap};
use gridpath_crossterm::{CrosstermDriver, fitting_config};

/// Terminal columns per cell when no settings file is given.
const TERMINAL_CELL_SIZE: i32 = 2;

fn config_from_args() -> Result<GridConfig, Box<dyn Error>> {
    match std::env::args_os().nth(1) {
        Some(path) => Ok(load_config(path)?),
        None => Ok(GridConfig {
            step_delay_ms: 5,
            ..fitting_config(TERMINAL_CELL_SIZE)?
        }),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    logging::init_logging()?;
    let config = config_from_args()?;
    log::info!(
        "starting with a {}x{} grid, cell size {}",
        config.rows,
        config.cols,
        config.cell_size
    );

    let mut app = App::new(AppConfig {
        model: Controller::new(&config),
        driver: CrosstermDriver::new(),
        keymap: Keymap::default(),
        step_delay: config.step_delay(),
    });
    app.run()
}
