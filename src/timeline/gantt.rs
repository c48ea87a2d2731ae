use crate::aircraft::Aircraft;
use crate::flight::{FlightRoute, RouteStatus};
use crate::time::UtcInstant;
use crate::timeline::projector::{DayWindow, NowMarker, day_window_for, now_position_of, position_of};
use chrono::TimeDelta;
use colored::Colorize;

pub const LABEL_WIDTH: usize = 18;
pub const MIN_COLUMNS: usize = 24;

const BAR: char = '█';
const TICK: char = '·';
const NOW: char = '|';
const OVERFLOW: char = '>';

#[derive(Clone, Copy, PartialEq)]
enum Cell {
    Empty,
    Tick,
    Now,
    Bar(RouteStatus, char),
}

pub struct GanttChart {
    pub window: DayWindow,
    pub now: NowMarker,
    pub columns: usize,
    pub colorize: bool,
}

impl GanttChart {
    pub fn new(now: UtcInstant, columns: usize, colorize: bool) -> GanttChart {
        let window = day_window_for(now);
        GanttChart {
            window,
            now: now_position_of(now, &window),
            columns: columns.max(MIN_COLUMNS),
            colorize,
        }
    }

    pub fn title(&self) -> String {
        format!(
            "{} - {} (UTC)",
            self.window.start.as_datetime().format("%b %d, %Y"),
            self.window.end.as_datetime().format("%b %d, %Y")
        )
    }

    pub fn render(&self, aircraft: &[Aircraft], routes: &[FlightRoute]) -> String {
        let mut lines = vec![self.ruler()];

        let mut ticks = self.blank_row();
        self.overlay_now(&mut ticks);
        lines.push(format!("{:<LABEL_WIDTH$}{}", "Aircraft", self.paint(&ticks)));

        for ac in aircraft {
            let mut row = self.blank_row();
            routes
                .iter()
                .filter(|r| r.aircraft_id == ac.id)
                .for_each(|r| self.draw_bar(&mut row, r));
            self.overlay_now(&mut row);
            let label = truncate(&format!("{} {}", ac.registration, ac.aircraft_type), LABEL_WIDTH - 1);
            lines.push(format!("{label:<LABEL_WIDTH$}{}", self.paint(&row)));
        }
        lines.join("\n")
    }

    fn column(&self, percent: f64) -> i64 {
        (percent / 100.0 * self.columns as f64).floor() as i64
    }

    fn hours(&self) -> i64 {
        self.window.length().num_hours()
    }

    fn blank_row(&self) -> Vec<Cell> {
        let mut row = vec![Cell::Empty; self.columns];
        let total = self.hours();
        for h in 0..total.max(0) {
            let col = self.column(100.0 * h as f64 / total as f64);
            if let Some(cell) = row.get_mut(col as usize) {
                *cell = Cell::Tick;
            }
        }
        row
    }

    fn ruler(&self) -> String {
        let mut ruler = vec![' '; self.columns];
        let now_col = self.now_column();
        let total = self.hours();
        let mut next_free = 0;
        for h in 0..total.max(0) {
            let col = self.column(100.0 * h as f64 / total as f64) as usize;
            if col < next_free || col + 2 > self.columns {
                continue;
            }
            // the label under the marker is dropped, not overwritten
            if now_col.is_some_and(|n| (col..col + 2).contains(&n)) {
                continue;
            }
            let hour = (self.window.start + TimeDelta::hours(h)).hour();
            for (i, ch) in format!("{hour:02}").chars().enumerate() {
                ruler[col + i] = ch;
            }
            next_free = col + 3;
        }
        if let Some(col) = now_col {
            ruler[col] = 'v';
        }
        let ruler = ruler.into_iter().collect::<String>();
        format!("{:<LABEL_WIDTH$}{}", "", ruler.trim_end())
    }

    fn draw_bar(&self, row: &mut [Cell], route: &FlightRoute) {
        let pos = position_of(&route.interval(), &self.window);
        let start = self.column(pos.left);
        let end = self.column(pos.left + pos.width).max(start + 1);
        let columns = self.columns as i64;

        if start >= columns {
            row[self.columns - 1] = Cell::Bar(route.status, OVERFLOW);
            return;
        }
        let visible = (end.min(columns) - start) as usize;
        let start = start as usize;
        let label = route.flight_number.chars().collect::<Vec<_>>();
        for i in 0..visible {
            let ch = if label.len() <= visible { label.get(i).copied().unwrap_or(BAR) } else { BAR };
            row[start + i] = Cell::Bar(route.status, ch);
        }
        if end > columns {
            row[self.columns - 1] = Cell::Bar(route.status, OVERFLOW);
        }
    }

    fn now_column(&self) -> Option<usize> {
        match self.now {
            NowMarker::At(p) => Some((self.column(p) as usize).min(self.columns - 1)),
            NowMarker::OutOfWindow => None,
        }
    }

    fn overlay_now(&self, row: &mut [Cell]) {
        if let Some(col) = self.now_column() {
            if matches!(row[col], Cell::Empty | Cell::Tick) {
                row[col] = Cell::Now;
            }
        }
    }

    fn paint(&self, row: &[Cell]) -> String {
        let mut out = String::new();
        let mut run = String::new();
        let mut run_style: Option<Cell> = None;
        for cell in row {
            let (style, ch) = match *cell {
                Cell::Empty => (Cell::Empty, ' '),
                Cell::Tick => (Cell::Empty, TICK),
                Cell::Now => (Cell::Now, NOW),
                Cell::Bar(status, ch) => (Cell::Bar(status, BAR), ch),
            };
            if run_style != Some(style) && !run.is_empty() {
                out.push_str(&self.paint_run(&run, run_style));
                run.clear();
            }
            run_style = Some(style);
            run.push(ch);
        }
        out.push_str(&self.paint_run(&run, run_style));
        out.trim_end().to_string()
    }

    fn paint_run(&self, run: &str, style: Option<Cell>) -> String {
        if !self.colorize {
            return run.to_string();
        }
        match style {
            Some(Cell::Now) => run.red().bold().to_string(),
            Some(Cell::Bar(status, _)) => status.paint(&run.replace(BAR, " ")).reversed().to_string(),
            _ => run.dimmed().to_string(),
        }
    }
}

fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}
