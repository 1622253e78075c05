//! src/app.rs
//!
//! Live CPU temperature / load / battery monitor for the terminal.
//!
//! # Top-Level Application (`app.rs`)
//!
//! Picks a sensor reader, builds the `Monitor` core and runs the UI main loop.
//!
//! ## Overview
//! The application:
//! - Samples the host sensors at the refresh interval and appends each sample
//!   to bounded, index-aligned series.
//! - Renders the visible window as a live chart with a colour-coded legend.
//! - Lets the user change the visible window, refresh interval and retention
//!   from a radio-style menu.
//!
//! Everything runs on one thread: the loop below draws, waits for input at
//! most until the next tick is due, applies any resulting `Command`, and
//! polls the sampling loop. Sensor reads block the loop while they run.
//!
//! # Building and Running
//!
//! ```text
//! cargo run --release -- --interval 1 --duration 5
//! cargo run --release -- --simulate
//! ```
//!
//! Logs go to `$TMPDIR/sysmon.log` unless `--log-file` is given; the filter
//! is taken from `RUST_LOG` (default `info`).
//!
//! # Keyboard Controls
//!
//! - **Tab** — Cycle focus among the Show / Refresh / Logs menus.
//! - **Up/Down** — Move the highlighted option in the focused menu.
//! - **Enter** — Select the highlighted option (the previous one is deselected).
//! - **d / r / l** — Step the Show / Refresh / Logs selection directly.
//! - **x** — Reset the recorded history.
//! - **h** — Collapse to the status line and legend and back; sampling continues.
//! - **q / Esc** — Quit and restore terminal state.
//!
//! Moving the mouse over the chart shows the sample nearest the cursor.

use std::cell::Cell;
use std::io::stdout;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use color_eyre::Result;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEventKind,
};
use log::{info, warn};
use ratatui::{
    DefaultTerminal,
    layout::{Constraint, Direction, Rect},
};

use crate::cli::Cli;
use crate::menu::{Category, Menu};
use crate::monitor::{Command, Control, Monitor, Readout};
use crate::panels::graph::column_to_timestamp;
use crate::panels::controls::{FULL_BINDINGS, HIDDEN_BINDINGS};
use crate::panels::{
    ControlsPanel, GraphPanel, HistoryPanel, HoverPanel, InfoPanel, MenuPanel, TitlePanel,
};
use crate::sampling::LoopState;
use crate::sensor::{BatteryProbe, SensorReader, SimulatedReader, SysinfoReader};
use crate::series::config::{duration_label, interval_label, retention_label};
use crate::ui::{Node, group, leaf};

const APP_NAME: &str = "sysmon";

pub fn run(cli: Cli) -> Result<()> {
    let config = cli.config()?;
    info!(
        "{} starting: refresh {}, showing {}, keeping {}",
        APP_NAME,
        interval_label(config.refresh_interval()),
        duration_label(config.visible_duration()),
        retention_label(config.retention_cap())
    );

    if cli.simulate {
        info!("using simulated sensor readings");
        return run_ui(SimulatedReader::new(true), config);
    }

    let battery = BatteryProbe::detect(&cli.power_supply_root);
    match &battery {
        Some(probe) => info!("battery detected at {}", probe.path().display()),
        None => info!("Battery not detected"),
    }
    run_ui(SysinfoReader::new(cli.sensor.clone(), battery), config)
}

fn run_ui<R: SensorReader>(reader: R, config: crate::series::ConfigState) -> Result<()> {
    let mut monitor = Monitor::new(reader, config, Instant::now());
    let mut menu = Menu::new(monitor.config());

    let mut terminal = ratatui::init();
    let result = crossterm::execute!(stdout(), EnableMouseCapture)
        .map_err(Into::into)
        .and_then(|_| event_loop(&mut terminal, &mut monitor, &mut menu));
    report_cleanup(
        "disable mouse capture",
        crossterm::execute!(stdout(), DisableMouseCapture),
    );
    ratatui::restore();

    info!(
        "{} exiting with {} samples, {} ticks skipped",
        APP_NAME,
        monitor.store().len(),
        monitor.skipped_ticks()
    );
    result
}

/// Log a failed terminal cleanup step; shutdown carries on regardless.
fn report_cleanup(step: &str, result: std::io::Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            warn!("failed to {}: {}", step, e);
            false
        }
    }
}

fn event_loop<R: SensorReader>(
    terminal: &mut DefaultTerminal,
    monitor: &mut Monitor<R>,
    menu: &mut Menu,
) -> Result<()> {
    let frame_time = Duration::from_millis(100);
    let plot_area: Cell<Option<Rect>> = Cell::new(None);
    let mut pointer: Option<(u16, u16)> = None;

    loop {
        monitor.poll(Instant::now());

        if monitor.hidden() {
            plot_area.set(None);
        }
        let readout = hovered(monitor, plot_area.get(), pointer);
        let cursor = readout.as_ref().map(|r| r.sample.timestamp);
        terminal.draw(|f| layout(monitor, menu, &plot_area, cursor, readout).draw(f, f.area()))?;

        let timeout = monitor
            .time_until_tick(Instant::now())
            .map_or(frame_time, |d| d.min(frame_time));
        if !event::poll(timeout)? {
            continue;
        }

        // Drain everything that is queued before the next draw
        loop {
            let command = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => key_command(key.code, menu),
                Event::Mouse(mouse) => {
                    if matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
                        pointer = Some((mouse.column, mouse.row));
                    }
                    None
                }
                _ => None,
            };

            if let Some(command) = command {
                match monitor.apply(command, Instant::now()) {
                    Ok(Control::Quit) => return Ok(()),
                    Ok(Control::Continue) => {}
                    Err(e) => warn!("setting rejected: {}", e),
                }
            }

            if !event::poll(Duration::ZERO)? {
                break;
            }
        }
    }
}

/// Translate a key press into a core command, updating menu focus on the way.
fn key_command(code: KeyCode, menu: &mut Menu) -> Option<Command> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('h') => Some(Command::ToggleHidden),
        KeyCode::Char('x') => Some(Command::ResetHistory),
        KeyCode::Char('d') => menu.cycle(Category::Show),
        KeyCode::Char('r') => menu.cycle(Category::Refresh),
        KeyCode::Char('l') => menu.cycle(Category::Logs),
        KeyCode::Tab => {
            menu.next_category();
            None
        }
        KeyCode::Up => {
            menu.move_cursor(-1);
            None
        }
        KeyCode::Down => {
            menu.move_cursor(1);
            None
        }
        KeyCode::Enter | KeyCode::Char(' ') => menu.activate(),
        _ => None,
    }
}

/// Readout for the sample under the pointer, if the pointer is on the plot.
fn hovered<R: SensorReader>(
    monitor: &Monitor<R>,
    plot: Option<Rect>,
    pointer: Option<(u16, u16)>,
) -> Option<Readout> {
    let (plot, (column, row)) = (plot?, pointer?);
    if row < plot.y || row >= plot.y + plot.height {
        return None;
    }
    let window = monitor.frame()?.window;
    let query: DateTime<Local> = column_to_timestamp(plot, column, &window)?;
    monitor.lookup(query)
}

fn status_line<R: SensorReader>(monitor: &Monitor<R>) -> String {
    let config = monitor.config();
    let state = match monitor.sampler().state() {
        LoopState::Armed(_) => "sampling",
        LoopState::Stopped => "stopped",
    };
    format!(
        "{} every {} | showing {} | keeping {} | {} samples | {} skipped",
        state,
        interval_label(config.refresh_interval()),
        duration_label(config.visible_duration()),
        retention_label(config.retention_cap()),
        monitor.store().len(),
        monitor.skipped_ticks()
    )
}

fn layout<'a, R: SensorReader>(
    monitor: &'a Monitor<R>,
    menu: &'a Menu,
    plot_area: &'a Cell<Option<Rect>>,
    cursor: Option<DateTime<Local>>,
    readout: Option<Readout>,
) -> Node<'a> {
    let title = leaf(TitlePanel::new(APP_NAME, status_line(monitor)));
    let info = leaf(InfoPanel::new(monitor.store(), monitor.frame()));

    if monitor.hidden() {
        return group(
            Direction::Vertical,
            vec![
                Constraint::Length(3),
                Constraint::Length(9),
                Constraint::Length(3),
            ],
            vec![
                title,
                info,
                leaf(ControlsPanel::new(HIDDEN_BINDINGS, "Hidden")),
            ],
        );
    }

    let graph = leaf(
        GraphPanel::new(monitor.store(), monitor.frame().map(|f| f.window), plot_area)
            .with_cursor(cursor),
    );
    let history = leaf(HistoryPanel::new(monitor.store()));
    let hover = leaf(HoverPanel::new(readout));
    let settings = leaf(MenuPanel::new(menu));

    group(
        Direction::Vertical,
        vec![
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ],
        vec![
            title,
            group(
                Direction::Horizontal,
                vec![Constraint::Percentage(60), Constraint::Percentage(40)],
                vec![
                    group(
                        Direction::Vertical,
                        vec![Constraint::Percentage(70), Constraint::Percentage(30)],
                        vec![graph, history],
                    ),
                    group(
                        Direction::Vertical,
                        vec![
                            Constraint::Length(9),
                            Constraint::Length(7),
                            Constraint::Min(13),
                        ],
                        vec![info, hover, settings],
                    ),
                ],
            ),
            leaf(ControlsPanel::new(FULL_BINDINGS, "Controls")),
        ],
    )
}
