use crate::{Error, Pos2, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Most live cells a decoded pattern may hold.
pub const MAX_DECODED_CELLS: usize = 1 << 24;

pub trait PositionEncoder {
    fn encode(&self, positions: &[Pos2]) -> String;
    fn decode(&self, value: &str) -> Result<Vec<Pos2>>;
}

struct RunEncoder {
    sequence: String,
    line_len: usize,
    max_line_len: usize,
}
impl RunEncoder {
    fn new(max_line_len: usize) -> Self {
        Self {
            sequence: String::new(),
            line_len: 0,
            max_line_len,
        }
    }

    fn push_run(&mut self, run: i64, c: char) {
        let append = match run {
            0 => return,
            1 => c.to_string(),
            n => format!("{}{}", n, c),
        };
        if self.line_len + append.len() > self.max_line_len {
            self.sequence.push('\n');
            self.line_len = 0;
        }
        self.line_len += append.len();
        self.sequence.push_str(&append);
    }

    fn end(mut self) -> String {
        self.sequence.push('!');
        self.sequence
    }
}

/// The `.rle` pattern format: a header with the bounding box, then runs of dead
/// (`b`) and live (`o`) cells with `$` ending a row and `!` ending the pattern.
#[derive(Default)]
pub struct RunLengthEncoded {
    name: Option<String>,
}
impl RunLengthEncoded {
    pub fn set_name<T: AsRef<str>>(mut self, name: T) -> Self {
        self.name = Some(name.as_ref().to_owned());
        self
    }

    fn encode_header(&self, width: i64, height: i64) -> String {
        let mut header = String::new();
        if let Some(name) = &self.name {
            header.push_str(&format!("#N {}\n", name));
        }
        header.push_str(&format!("x = {}, y = {}, rule = B3/S23\n", width, height));
        header
    }

    /// `alive_cells` must be sorted by row then column. Spans are measured in
    /// `i64`, a pattern may stretch across the whole `i32` range.
    fn encode_cells(&self, alive_cells: &[Pos2], tl: (i64, i64)) -> String {
        let mut last = (tl.0 - 1, tl.1);
        let mut alive_run = 0;
        let mut seq = RunEncoder::new(70);
        for pos in alive_cells {
            let pos = (pos.x as i64, pos.y as i64);
            // extend the current run while the cells stay adjacent
            if last.1 == pos.1 && last.0 + 1 == pos.0 {
                alive_run += 1;
                last = pos;
                continue;
            }

            let lines_run = pos.1 - last.1;
            let dead_run = match lines_run {
                0 => pos.0 - last.0 - 1,
                _ => pos.0 - tl.0,
            };
            // NOTE: order matters!
            seq.push_run(alive_run, 'o');
            seq.push_run(lines_run, '$');
            seq.push_run(dead_run, 'b');

            alive_run = 1;
            last = pos;
        }

        seq.push_run(alive_run, 'o');
        seq.end()
    }

    fn token_regex() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| Regex::new(r"(\d*)([bo$!])|(\S)").expect("static pattern"))
    }
}

fn advance(value: i32, run: i32, line: &str) -> Result<i32> {
    value
        .checked_add(run)
        .ok_or_else(|| Error::Pattern(format!("pattern runs past the grid in {:?}", line)))
}

impl PositionEncoder for RunLengthEncoded {
    /// Encodes the cells relative to their bounding box.
    fn encode(&self, cells: &[Pos2]) -> String {
        let mut cells = cells.to_vec();
        cells.sort_unstable();
        cells.dedup();

        let xs = || cells.iter().map(|p| p.x as i64);
        let (tl, size) = match (xs().min(), xs().max(), cells.first(), cells.last()) {
            (Some(min_x), Some(max_x), Some(first), Some(last)) => (
                (min_x, first.y as i64),
                (max_x - min_x + 1, last.y as i64 - first.y as i64 + 1),
            ),
            _ => ((0, 0), (0, 0)),
        };

        format!(
            "{}{}\n",
            self.encode_header(size.0, size.1),
            self.encode_cells(&cells, tl)
        )
    }

    /// Decodes a pattern with its top left corner at the origin.
    ///
    /// Runs that would leave the `i32` range or push the pattern past
    /// [`MAX_DECODED_CELLS`] are rejected.
    fn decode(&self, value: &str) -> Result<Vec<Pos2>> {
        let re = Self::token_regex();

        let mut alive = Vec::new();
        let mut cursor = Pos2 { x: 0, y: 0 };
        'lines_loop: for line in value.lines() {
            let line = line.trim();
            if line.starts_with('#') || line.starts_with('x') {
                continue;
            }

            for caps in re.captures_iter(line) {
                if let Some(bad) = caps.get(3) {
                    return Err(Error::Pattern(format!(
                        "unexpected {:?} in {:?}",
                        bad.as_str(),
                        line
                    )));
                }
                let run_str = &caps[1];
                let run = match run_str {
                    "" => 1,
                    digits => digits.parse::<i32>().map_err(|err| {
                        Error::Pattern(format!("bad run length {:?}: {}", digits, err))
                    })?,
                };
                match &caps[2] {
                    "!" => break 'lines_loop,
                    "o" => {
                        if alive.len() + run as usize > MAX_DECODED_CELLS {
                            return Err(Error::Pattern(format!(
                                "pattern has more than {} live cells",
                                MAX_DECODED_CELLS
                            )));
                        }
                        let end = advance(cursor.x, run, line)?;
                        alive.extend((cursor.x..end).map(|x| Pos2 { x, y: cursor.y }));
                        cursor.x = end;
                    }
                    "b" => cursor.x = advance(cursor.x, run, line)?,
                    "$" => {
                        cursor.x = 0;
                        cursor.y = advance(cursor.y, run, line)?;
                    }
                    _ => unreachable!(),
                }
            }
        }

        Ok(alive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: i32, y: i32) -> Pos2 {
        Pos2::new(x, y)
    }

    const GLIDER_RLE: &str = "#N Glider\nx = 3, y = 3, rule = B3/S23\nbo$2bo$3o!\n";

    #[test]
    fn decodes_glider() {
        let cells = RunLengthEncoded::default().decode(GLIDER_RLE).unwrap();

        assert_eq!(
            cells,
            vec![pos(1, 0), pos(2, 1), pos(0, 2), pos(1, 2), pos(2, 2)]
        );
    }

    #[test]
    fn encodes_glider() {
        let glider = [pos(1, 0), pos(2, 1), pos(0, 2), pos(1, 2), pos(2, 2)];
        let encoded = RunLengthEncoded::default().set_name("Glider").encode(&glider);

        assert_eq!(encoded, GLIDER_RLE);
    }

    #[test]
    fn encodes_relative_to_bounding_box() {
        let blinker = [pos(-11, -5), pos(-10, -5), pos(-9, -5)];
        let encoded = RunLengthEncoded::default().encode(&blinker);

        assert_eq!(encoded, "x = 3, y = 1, rule = B3/S23\n3o!\n");
    }

    #[test]
    fn encodes_empty_pattern() {
        let encoded = RunLengthEncoded::default().encode(&[]);

        assert_eq!(encoded, "x = 0, y = 0, rule = B3/S23\n!\n");
        assert!(RunLengthEncoded::default().decode(&encoded).unwrap().is_empty());
    }

    #[test]
    fn encodes_across_the_whole_i32_range() {
        let cells = [
            pos(i32::MIN, i32::MIN),
            pos(i32::MAX, i32::MIN),
            pos(i32::MIN, i32::MAX),
        ];
        let encoded = RunLengthEncoded::default().encode(&cells);

        assert_eq!(
            encoded,
            "x = 4294967296, y = 4294967296, rule = B3/S23\no4294967294bo4294967295$o!\n"
        );
    }

    #[test]
    fn handles_blank_rows() {
        let cells = RunLengthEncoded::default().decode("o2$o!").unwrap();

        assert_eq!(cells, vec![pos(0, 0), pos(0, 2)]);
    }

    #[test]
    fn rejects_unknown_states() {
        let err = RunLengthEncoded::default().decode("x = 2, y = 1\noA!").unwrap_err();

        assert!(matches!(err, Error::Pattern(_)));
    }

    #[test]
    fn rejects_runs_past_the_grid() {
        let decoder = RunLengthEncoded::default();

        for pattern in [
            "2000000000b2000000000bo!",
            "2000000000$2000000000$o!",
            "2147483647bo!",
            "99999999999o!",
        ] {
            assert!(
                matches!(decoder.decode(pattern), Err(Error::Pattern(_))),
                "{pattern}"
            );
        }
    }

    #[test]
    fn rejects_oversized_runs() {
        let err = RunLengthEncoded::default()
            .decode("2000000000o!")
            .unwrap_err();

        assert!(matches!(err, Error::Pattern(_)));
    }

    #[test]
    fn accepts_runs_up_to_the_edge() {
        let cells = RunLengthEncoded::default().decode("2147483646bo!").unwrap();

        assert_eq!(cells, vec![pos(i32::MAX - 1, 0)]);
    }
}
