use sparselife::{Pos2, Settings, persist, seed};
use std::{str::FromStr, time::Duration};

pub const DEFAULT_STORE: &str = "sparselife.json";

pub struct Args {
    console: bool,
    threads: bool,
    input: Option<String>,
    output: Option<String>,
    width: Option<i32>,
    height: Option<i32>,
    fill: Option<FillMode>,
    interval_ms: Option<u64>,
    cell_size: Option<u32>,
    gens: Option<u64>,
    store: Option<String>,
    key: String,
}

fn parse_opt<T: FromStr>(matches: &getopts::Matches, name: &str) -> Result<Option<T>, String>
where
    T::Err: std::fmt::Display,
{
    matches
        .opt_get::<T>(name)
        .map_err(|err| format!("invalid value for --{}: {}", name, err))
}

impl Args {
    /// Parses the arguments, `Ok(None)` when only help was asked for.
    pub fn new<T: AsRef<str>>(args: &[T]) -> Result<Option<Self>, String> {
        let mut opts = getopts::Options::new();
        opts.optflag("", "help", "print this help menu");
        opts.optflag("c", "console", "run in console mode");
        opts.optflag("t", "threads", "enables multi-threading");
        opts.optopt("o", "output", "write the final pattern as RLE", "FILE");
        opts.optopt("i", "input", "read the starting pattern as RLE", "FILE");
        opts.optopt("w", "width", "set fill width", "WIDTH");
        opts.optopt("h", "height", "set fill height", "HEIGHT");
        opts.optopt(
            "f",
            "fill",
            "seed pattern: glider, random, alternating, all or empty",
            "TYPE",
        );
        opts.optopt("s", "sleep", "time between generations", "MILLIS");
        opts.optopt("z", "cell-size", "size of a cell on screen", "N");
        opts.optopt("g", "gens", "max number of generations", "COUNT");
        opts.optopt("", "store", "state file", "FILE");
        opts.optopt("", "key", "name the cells are saved under", "NAME");
        opts.optflag("", "no-store", "do not load or save state");

        let matches = opts
            .parse(args.iter().map(T::as_ref))
            .map_err(|err| err.to_string())?;
        if matches.opt_present("help") {
            println!("{}", opts.usage("usage: sparselife [options]"));
            return Ok(None);
        }

        let fill = match matches.opt_str("fill") {
            Some(mode) => {
                Some(FillMode::new(&mode).ok_or_else(|| format!("unknown fill mode {:?}", mode))?)
            }
            None => None,
        };
        let store = if matches.opt_present("no-store") {
            None
        } else {
            Some(
                matches
                    .opt_str("store")
                    .unwrap_or_else(|| DEFAULT_STORE.to_owned()),
            )
        };

        Ok(Some(Self {
            console: matches.opt_present("console"),
            threads: matches.opt_present("threads"),
            input: matches.opt_str("input"),
            output: matches.opt_str("output"),
            width: parse_opt(&matches, "width")?,
            height: parse_opt(&matches, "height")?,
            fill,
            interval_ms: parse_opt(&matches, "sleep")?,
            cell_size: parse_opt(&matches, "cell-size")?,
            gens: parse_opt(&matches, "gens")?,
            store,
            key: matches
                .opt_str("key")
                .unwrap_or_else(|| persist::DEFAULT_CELLS_KEY.to_owned()),
        }))
    }
    pub fn from_env() -> Result<Option<Self>, String> {
        let env = std::env::args().collect::<Vec<_>>();
        Self::new(&env[1..])
    }

    pub fn console(&self) -> bool {
        self.console
    }
    pub fn multithreading(&self) -> bool {
        self.threads
    }

    /// Generations to run headless, unbounded if not given.
    pub fn generations(&self) -> Option<u64> {
        self.gens
    }

    /// Pause between headless generations, `--sleep 0` meaning none.
    pub fn sleep(&self) -> Option<Duration> {
        self.interval_ms
            .filter(|&millis| millis > 0)
            .map(Duration::from_millis)
    }

    /// Applies command line overrides on top of `base`.
    ///
    /// `--sleep` only becomes the step interval in console mode, headless runs use
    /// it as a plain pause (see [`Args::sleep`]) and keep the saved interval.
    pub fn settings(&self, base: Settings) -> Settings {
        let interval_ms = if self.console {
            self.interval_ms.unwrap_or(base.interval_ms)
        } else {
            base.interval_ms
        };
        Settings {
            cell_size: self.cell_size.unwrap_or(base.cell_size),
            interval_ms,
        }
    }

    pub fn fill_size(&self) -> (i32, i32) {
        let default = if self.console {
            crossterm::terminal::size()
                .map(|(cols, rows)| (cols as i32, rows.saturating_sub(1) as i32))
                .unwrap_or((80, 24))
        } else {
            (500, 500)
        };

        (
            self.width.unwrap_or(default.0),
            self.height.unwrap_or(default.1),
        )
    }
    pub fn fill_mode(&self) -> Option<&FillMode> {
        self.fill.as_ref()
    }

    pub fn output_file(&self) -> Option<&str> {
        self.output.as_deref()
    }
    pub fn input_file(&self) -> Option<&str> {
        self.input.as_deref()
    }

    pub fn store_file(&self) -> Option<&str> {
        self.store.as_deref()
    }
    pub fn cells_key(&self) -> &str {
        &self.key
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum FillMode {
    Glider,
    Random,
    Alternating,
    All,
    Empty,
}
impl FillMode {
    fn new<S: AsRef<str>>(s: S) -> Option<Self> {
        match s.as_ref() {
            "glider" => Some(Self::Glider),
            "random" => Some(Self::Random),
            "alternating" => Some(Self::Alternating),
            "all" => Some(Self::All),
            "empty" => Some(Self::Empty),
            _ => None,
        }
    }

    fn fill_cell<R: rand::Rng>(&self, cell: Pos2, rng: &mut R) -> bool {
        match self {
            Self::Random => rng.random_bool(0.5),
            Self::Alternating => (cell.x + cell.y) % 2 == 0,
            Self::All => true,
            Self::Glider | Self::Empty => false,
        }
    }
    pub fn create_alive(&self, w: i32, h: i32) -> Vec<Pos2> {
        match self {
            Self::Glider => return seed::DEFAULT_SEED.to_vec(),
            Self::Empty => return Vec::new(),
            _ => {}
        }

        let mut rng = rand::rng();
        let mut alive = Vec::new();
        for y in 0..h {
            for x in 0..w {
                let cell = Pos2 { x, y };
                if self.fill_cell(cell, &mut rng) {
                    alive.push(cell);
                }
            }
        }
        alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Args {
        Args::new(list).expect("valid args").expect("not help")
    }

    fn pos(x: i32, y: i32) -> Pos2 {
        Pos2 { x, y }
    }

    #[test]
    fn fill_mode_parses() {
        let args = args(&["--fill", "alternating"]);

        assert_eq!(args.fill_mode(), Some(&FillMode::Alternating));
    }

    #[test]
    fn unknown_fill_mode_is_an_error() {
        assert!(Args::new(&["--fill", "checkers"]).is_err());
    }

    #[test]
    fn bad_number_is_an_error() {
        assert!(Args::new(&["--sleep", "soon"]).is_err());
    }

    #[test]
    fn help_returns_none() {
        assert!(Args::new(&["--help"]).unwrap().is_none());
    }

    #[test]
    fn store_defaults_and_opt_out() {
        assert_eq!(args(&[]).store_file(), Some(DEFAULT_STORE));
        assert_eq!(args(&["--store", "a.json"]).store_file(), Some("a.json"));
        assert_eq!(args(&["--no-store"]).store_file(), None);
        assert_eq!(args(&[]).cells_key(), "cells");
    }

    #[test]
    fn overrides_saved_settings() {
        let base = Settings {
            cell_size: 4,
            interval_ms: 30,
        };

        assert_eq!(args(&[]).settings(base), base);
        assert_eq!(
            args(&["-c", "-s", "250", "-z", "2"]).settings(base),
            Settings {
                cell_size: 2,
                interval_ms: 250
            }
        );
    }

    #[test]
    fn headless_sleep_is_only_a_pause() {
        let base = Settings::default();

        let no_pause = args(&["--sleep", "0", "-g", "10"]);
        assert_eq!(no_pause.sleep(), None);
        assert_eq!(no_pause.settings(base), base);
        assert!(no_pause.settings(base).validate().is_ok());

        let pause = args(&["--sleep", "5"]);
        assert_eq!(pause.sleep(), Some(Duration::from_millis(5)));
        assert_eq!(pause.settings(base).interval_ms, base.interval_ms);
    }

    #[test]
    fn console_rejects_zero_interval() {
        let settings = args(&["-c", "--sleep", "0"]).settings(Settings::default());

        assert!(settings.validate().is_err());
    }

    #[test]
    fn create_alive_all_fills_grid() {
        let alive = FillMode::All.create_alive(3, 2);

        let expected = vec![
            pos(0, 0),
            pos(1, 0),
            pos(2, 0),
            pos(0, 1),
            pos(1, 1),
            pos(2, 1),
        ];
        assert_eq!(alive, expected);
    }

    #[test]
    fn create_alive_empty_is_empty() {
        assert!(FillMode::Empty.create_alive(5, 4).is_empty());
    }

    #[test]
    fn create_alive_glider_is_default_seed() {
        assert_eq!(FillMode::Glider.create_alive(5, 4), seed::DEFAULT_SEED.to_vec());
    }

    #[test]
    fn create_alive_alternating_uses_parity() {
        let alive = FillMode::Alternating.create_alive(3, 3);

        let expected = vec![pos(0, 0), pos(2, 0), pos(1, 1), pos(0, 2), pos(2, 2)];
        assert_eq!(alive, expected);
    }

    #[test]
    fn create_alive_random_is_within_bounds() {
        let w = 4;
        let h = 3;
        let alive = FillMode::Random.create_alive(w, h);

        assert!(alive.iter().all(|p| p.x >= 0 && p.y >= 0 && p.x < w && p.y < h));
    }
}
