use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue, terminal,
};
use sparselife::{Grid, Pos2, render};
use std::{io, time::Duration};

pub enum ConsoleCommand {
    Exit,
    Handled,
    ToggleRun,
    Step,
    Clear,
    Faster,
    Slower,
    Grow,
    Shrink,
    Save,
    Paint(Pos2),
    Erase(Pos2),
}

pub struct ConsoleRender {
    /// Grid coordinate shown in the top left corner
    tl: Pos2,
    report: String,
}
impl ConsoleRender {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), cursor::Hide, EnableMouseCapture)?;
        Ok(Self {
            tl: Pos2::default(),
            report: String::new(),
        })
    }

    /// Grid cells that fit on a screen of `cols` by `rows` characters, the last
    /// row being kept for the footer.
    fn visible(&self, cols: u16, rows: u16, cell_size: u32) -> Pos2 {
        let size = cell_size.max(1);
        Pos2 {
            x: (cols as u32).div_ceil(size) as i32,
            y: (rows.saturating_sub(1) as u32).div_ceil(size) as i32,
        }
    }

    pub fn render(&self, grid: &Grid, cell_size: u32) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        let br = self.tl + self.visible(cols, rows, cell_size);
        let field_rows = rows.saturating_sub(1) as i64;

        let mut stdout = io::stdout();
        queue!(stdout, terminal::Clear(terminal::ClearType::All))?;
        for cell in grid.window(self.tl, br).iter() {
            let (x1, y1, x2, y2) = render::cell_rect(cell - self.tl, cell_size);
            for y in y1..y2.min(field_rows) {
                queue!(stdout, cursor::MoveTo(x1 as u16, y as u16))?;
                for _ in x1..x2.min(cols as i64) {
                    io::Write::write_all(&mut stdout, "█".as_bytes())?;
                }
            }
        }

        // write footer
        queue!(stdout, cursor::MoveTo(0, rows.saturating_sub(1)))?;
        let footer: String = self.report.chars().take(cols as usize).collect();
        io::Write::write_all(&mut stdout, footer.as_bytes())?;

        io::Write::flush(&mut stdout)
    }

    /// Waits up to `timeout` for input and turns it into a command.
    pub fn poll_events(
        &mut self,
        timeout: Duration,
        cell_size: u32,
    ) -> io::Result<Option<ConsoleCommand>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        let command = match event::read()? {
            event::Event::Key(key) => self.key_command(key),
            event::Event::Mouse(mouse) => self.mouse_command(mouse, cell_size),
            _ => ConsoleCommand::Handled,
        };
        Ok(Some(command))
    }

    fn key_command(&mut self, key: KeyEvent) -> ConsoleCommand {
        if key.kind == KeyEventKind::Release {
            return ConsoleCommand::Handled;
        }
        match key.code {
            // CTRL+C
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                ConsoleCommand::Exit
            }
            KeyCode::Char('q') | KeyCode::Esc => ConsoleCommand::Exit,
            KeyCode::Char(' ') => ConsoleCommand::ToggleRun,
            KeyCode::Char('n') => ConsoleCommand::Step,
            KeyCode::Char('c') => ConsoleCommand::Clear,
            KeyCode::Char('+') | KeyCode::Char('=') => ConsoleCommand::Faster,
            KeyCode::Char('-') => ConsoleCommand::Slower,
            KeyCode::Char(']') => ConsoleCommand::Grow,
            KeyCode::Char('[') => ConsoleCommand::Shrink,
            KeyCode::Char('s') => ConsoleCommand::Save,
            // arrows to move grid
            KeyCode::Up => self.pan(0, -1),
            KeyCode::Down => self.pan(0, 1),
            KeyCode::Left => self.pan(-1, 0),
            KeyCode::Right => self.pan(1, 0),
            _ => ConsoleCommand::Handled,
        }
    }

    fn mouse_command(&self, mouse: MouseEvent, cell_size: u32) -> ConsoleCommand {
        let cell = || {
            self.tl + render::cell_at(mouse.column as f64, mouse.row as f64, cell_size)
        };
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                ConsoleCommand::Paint(cell())
            }
            MouseEventKind::Down(MouseButton::Right)
            | MouseEventKind::Drag(MouseButton::Right) => ConsoleCommand::Erase(cell()),
            _ => ConsoleCommand::Handled,
        }
    }

    fn pan(&mut self, dx: i32, dy: i32) -> ConsoleCommand {
        self.tl = self.tl + Pos2 { x: dx, y: dy };
        ConsoleCommand::Handled
    }

    pub fn set_report(&mut self, report: String) {
        self.report = report;
    }
}
impl Drop for ConsoleRender {
    fn drop(&mut self) {
        if let Err(err) = execute!(io::stdout(), DisableMouseCapture, cursor::Show) {
            log::error!("failed to restore cursor: {}", err);
        }
        if let Err(err) = terminal::disable_raw_mode() {
            log::error!("failed to leave raw mode: {}", err);
        }
    }
}
