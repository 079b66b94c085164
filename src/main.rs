use std::{process::ExitCode, thread, time::Duration};

mod console;
mod options;
mod stats;

use console::{ConsoleCommand, ConsoleRender};
use sparselife::{
    Grid, PositionEncoder, Result, RunLengthEncoded, RunState, Settings, Simulation,
    persist::{self, JsonFileStore},
    seed,
};
use stats::Throughput;

const FRAME: Duration = Duration::from_millis(33);

struct Session {
    sim: Simulation,
    settings: Settings,
    store: Option<JsonFileStore>,
    key: String,
}
impl Session {
    fn save(&mut self) -> Result<()> {
        let Some(store) = self.store.as_mut() else {
            return Ok(());
        };
        persist::save_cells(store, &self.key, &self.sim.grid())?;
        persist::save_settings(store, &self.settings)
    }
}

fn initial_grid(args: &options::Args, store: Option<&JsonFileStore>) -> Result<Grid> {
    if let Some(file_name) = args.input_file() {
        let encoded = std::fs::read_to_string(file_name)?;
        let alive = RunLengthEncoded::default().decode(&encoded)?;
        log::info!("loaded {} cells from {}", alive.len(), file_name);
        return Ok(Grid::from_alive(alive));
    }
    if let Some(fill) = args.fill_mode() {
        let (w, h) = args.fill_size();
        return Ok(Grid::from_alive(fill.create_alive(w, h)));
    }
    Ok(match store {
        Some(store) => persist::restore_grid(store, args.cells_key()),
        None => seed::default_grid(),
    })
}

fn open_session(args: &options::Args) -> Result<Session> {
    let store = args.store_file().map(JsonFileStore::open).transpose()?;
    let saved = store
        .as_ref()
        .map(persist::load_settings)
        .unwrap_or_default();
    let settings = args.settings(saved);
    settings.validate()?;

    let grid = initial_grid(args, store.as_ref())?;
    println!("alive: {}", grid.len());

    Ok(Session {
        sim: Simulation::new(grid).with_parallel(args.multithreading()),
        settings,
        store,
        key: args.cells_key().to_owned(),
    })
}

fn footer(session: &Session, stats: &Throughput) -> String {
    let state = match session.sim.state() {
        RunState::Idle => "idle",
        RunState::Running => "running",
    };
    format!(
        "[{}] gen:{} alive:{} every:{}ms size:{} {:.1}gen/s | space run  n step  c clear  +/- speed  [/] size  s save  q quit",
        state,
        session.sim.generation(),
        session.sim.alive_count(),
        session.settings.interval_ms,
        session.settings.cell_size,
        stats.rate(),
    )
}

/// Applies a settings change, restarting the ticker so a new interval takes
/// effect immediately.
fn adjust(session: &mut Session, change: fn(&mut Settings)) -> Result<()> {
    change(&mut session.settings);
    if session.sim.state() == RunState::Running {
        session.sim.start(session.settings.interval())?;
    }
    Ok(())
}

fn run_console(session: &mut Session) -> Result<()> {
    let mut console = ConsoleRender::new()?;
    let mut stats = Throughput::new(session.sim.alive_count());

    'frames: loop {
        console.render(&session.sim.grid(), session.settings.cell_size)?;

        stats.record(session.sim.generation(), session.sim.alive_count());
        if stats.has_report() {
            stats.report();
        }
        console.set_report(footer(session, &stats));

        // wait one frame for the first event, then drain whatever else is queued
        let mut timeout = FRAME;
        while let Some(cmd) = console.poll_events(timeout, session.settings.cell_size)? {
            timeout = Duration::ZERO;
            match cmd {
                ConsoleCommand::Exit => break 'frames,
                ConsoleCommand::Handled => {}
                ConsoleCommand::ToggleRun => {
                    session.sim.toggle(session.settings.interval())?;
                }
                ConsoleCommand::Step => session.sim.step(),
                ConsoleCommand::Clear => session.sim.clear(),
                ConsoleCommand::Faster => adjust(session, Settings::faster)?,
                ConsoleCommand::Slower => adjust(session, Settings::slower)?,
                ConsoleCommand::Grow => session.settings.grow(),
                ConsoleCommand::Shrink => session.settings.shrink(),
                ConsoleCommand::Save => {
                    if let Err(err) = session.save() {
                        log::error!("save failed: {}", err);
                    }
                }
                ConsoleCommand::Paint(cell) => session.sim.grid().add(cell),
                ConsoleCommand::Erase(cell) => session.sim.grid().remove(cell),
            }
        }
    }
    std::mem::drop(console);

    session.sim.stop();
    session.save()
}

fn run_headless(session: &mut Session, args: &options::Args) -> Result<()> {
    let gens = args.generations();
    let sleep = args.sleep();
    let mut stats = Throughput::new(session.sim.alive_count());

    while gens.is_none_or(|gens| session.sim.generation() < gens) {
        // report metrics every 500ms
        if stats.has_report() {
            println!("{}", stats.report());
        }

        session.sim.step();
        stats.record(session.sim.generation(), session.sim.alive_count());
        if let Some(time) = sleep {
            thread::sleep(time);
        }
    }
    println!("{}", stats.report());

    if let Some(file_name) = args.output_file() {
        let encoder = RunLengthEncoded::default().set_name("sparselife generated pattern");
        let encoded = encoder.encode(&session.sim.snapshot());
        std::fs::write(file_name, encoded)?;
    }
    session.save()
}

fn run(args: &options::Args) -> Result<()> {
    let mut session = open_session(args)?;
    if args.console() {
        run_console(&mut session)
    } else {
        run_headless(&mut session, args)
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match options::Args::from_env() {
        Ok(Some(args)) => args,
        Ok(None) => return ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
