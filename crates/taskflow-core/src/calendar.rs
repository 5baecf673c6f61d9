//! Calendar Grid
//!
//! Month arithmetic for the month view and keyboard navigation over its
//! table of day cells. Rows are weeks (Monday first), columns weekdays.
//! Padding cells outside the month hold no day and never take focus.

use chrono::{Datelike, Month, NaiveDate};

use crate::{Error, Result};

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthRef {
    year: i32,
    month: u32,
}

impl MonthRef {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(Error::InvalidMonth { year, month });
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        // Validated in the constructors
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn days_in_month(&self) -> u32 {
        let days = self.next().first_day() - self.first_day();
        days.num_days() as u32
    }

    /// English month name, e.g. "January"
    pub fn name(&self) -> &'static str {
        u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or("")
    }

    /// Week rows, Monday first; `0` marks days outside the month
    pub fn weeks(&self) -> Vec<[u32; 7]> {
        let offset = self.first_day().weekday().num_days_from_monday() as usize;
        let mut weeks = Vec::new();
        let mut week = [0u32; 7];
        let mut col = offset;
        for day in 1..=self.days_in_month() {
            week[col] = day;
            col += 1;
            if col == 7 {
                weeks.push(week);
                week = [0; 7];
                col = 0;
            }
        }
        if col > 0 {
            weeks.push(week);
        }
        weeks
    }

    /// Query parameters selecting this month in the month view
    pub fn query_pairs(&self) -> [(&'static str, String); 2] {
        [("year", self.year.to_string()), ("month", self.month.to_string())]
    }
}

/// Long display form, e.g. "Monday, March 2, 2026"
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Cell coordinates: week row, weekday column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Keys the grid responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
    Up,
    Down,
    /// Enter or Space
    Activate,
}

impl NavKey {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(NavKey::Left),
            "ArrowRight" => Some(NavKey::Right),
            "ArrowUp" => Some(NavKey::Up),
            "ArrowDown" => Some(NavKey::Down),
            "Enter" | " " | "Spacebar" => Some(NavKey::Activate),
            _ => None,
        }
    }
}

/// What the page should do with a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// Move focus to another day cell
    Focus(GridPos),
    /// Click the current cell
    Activate(GridPos),
    /// Leave focus where it is
    Stay,
}

impl NavOutcome {
    /// Whether the browser's default action for the key is suppressed
    pub fn prevents_default(&self) -> bool {
        !matches!(self, NavOutcome::Stay)
    }
}

/// Which table cells hold a focusable day
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarGrid {
    rows: Vec<Vec<bool>>,
}

impl CalendarGrid {
    /// Rows of cells; `true` marks a day cell. Rows may differ in length.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Self {
        Self { rows }
    }

    pub fn for_month(month: MonthRef) -> Self {
        Self::from_rows(
            month
                .weeks()
                .iter()
                .map(|week| week.iter().map(|day| *day != 0).collect())
                .collect(),
        )
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_day(&self, pos: GridPos) -> bool {
        self.rows
            .get(pos.row)
            .and_then(|row| row.get(pos.col))
            .copied()
            .unwrap_or(false)
    }

    /// Every day cell in row-major order
    pub fn days(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, is_day)| **is_day)
                .map(move |(col, _)| GridPos::new(row, col))
        })
    }

    /// Resolve a key press on `from`. Moves that leave the grid or land on
    /// a padding cell do nothing; focus never wraps.
    pub fn navigate(&self, from: GridPos, key: NavKey) -> NavOutcome {
        if !self.is_day(from) {
            return NavOutcome::Stay;
        }
        let target = match key {
            NavKey::Activate => return NavOutcome::Activate(from),
            NavKey::Right => Some(GridPos::new(from.row, from.col + 1)),
            NavKey::Left => from.col.checked_sub(1).map(|col| GridPos::new(from.row, col)),
            NavKey::Down => Some(GridPos::new(from.row + 1, from.col)),
            NavKey::Up => from.row.checked_sub(1).map(|row| GridPos::new(row, from.col)),
        };
        match target {
            Some(pos) if self.is_day(pos) => NavOutcome::Focus(pos),
            _ => NavOutcome::Stay,
        }
    }
}

/// Page access to the month table
pub trait CalendarTable {
    /// A table cell
    type Cell: Clone + PartialEq;

    /// Cells holding a day, in document order
    fn day_cells(&self) -> Vec<Self::Cell>;

    /// Every week row of the table section holding `cell`; empty when the
    /// cell is not inside a table row
    fn rows_around(&self, cell: &Self::Cell) -> Vec<Vec<Self::Cell>>;

    /// Whether the cell is, or contains, a day
    fn is_day(&self, cell: &Self::Cell) -> bool;

    /// Make the cell's day reachable with Tab
    fn set_tab_stop(&self, cell: &Self::Cell);

    fn focus_day(&self, cell: &Self::Cell);

    /// Click the cell's day
    fn activate_day(&self, cell: &Self::Cell);
}

/// Keyboard navigation over a rendered month table
pub struct CalendarNavigator<T> {
    table: T,
}

impl<T: CalendarTable> CalendarNavigator<T> {
    pub fn new(table: T) -> Self {
        Self { table }
    }

    #[cfg(test)]
    pub fn table(&self) -> &T {
        &self.table
    }

    /// Give every day a tab stop. Returns how many days there are.
    pub fn init(&self) -> usize {
        let days = self.table.day_cells();
        for day in &days {
            self.table.set_tab_stop(day);
        }
        days.len()
    }

    /// Rows around `cell` and its position in them. A cell outside any
    /// table row stands alone as a one-cell grid.
    pub fn locate(&self, cell: &T::Cell) -> (Vec<Vec<T::Cell>>, GridPos) {
        let rows = self.table.rows_around(cell);
        let pos = rows.iter().enumerate().find_map(|(r, row)| {
            row.iter()
                .position(|c| c == cell)
                .map(|c| GridPos::new(r, c))
        });
        match pos {
            Some(pos) => (rows, pos),
            None => (vec![vec![cell.clone()]], GridPos::new(0, 0)),
        }
    }

    /// Apply a key press on `cell`. The caller suppresses the browser
    /// default when the outcome says so.
    pub fn on_key(&self, cell: &T::Cell, key: NavKey) -> NavOutcome {
        let (rows, pos) = self.locate(cell);
        let grid = CalendarGrid::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|c| self.table.is_day(c)).collect())
                .collect(),
        );
        let outcome = grid.navigate(pos, key);
        match outcome {
            NavOutcome::Focus(next) => {
                if let Some(target) = rows.get(next.row).and_then(|row| row.get(next.col)) {
                    self.table.focus_day(target);
                }
            }
            NavOutcome::Activate(_) => self.table.activate_day(cell),
            NavOutcome::Stay => {}
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;

    const KEYS: [NavKey; 4] = [NavKey::Left, NavKey::Right, NavKey::Up, NavKey::Down];

    /// Table of numbered cells; `0` is a padding cell
    #[derive(Default)]
    struct FakeTable {
        rows: Vec<Vec<u32>>,
        tab_stops: RefCell<Vec<u32>>,
        focused: RefCell<Option<u32>>,
        clicked: RefCell<Vec<u32>>,
    }

    impl FakeTable {
        fn month(month: MonthRef) -> Self {
            Self {
                rows: month.weeks().iter().map(|w| w.to_vec()).collect(),
                ..Default::default()
            }
        }
    }

    impl CalendarTable for FakeTable {
        type Cell = u32;

        fn day_cells(&self) -> Vec<u32> {
            self.rows.iter().flatten().copied().filter(|d| *d != 0).collect()
        }

        fn rows_around(&self, cell: &u32) -> Vec<Vec<u32>> {
            if self.rows.iter().flatten().any(|c| c == cell) {
                self.rows.clone()
            } else {
                Vec::new()
            }
        }

        fn is_day(&self, cell: &u32) -> bool {
            *cell != 0
        }

        fn set_tab_stop(&self, cell: &u32) {
            self.tab_stops.borrow_mut().push(*cell);
        }

        fn focus_day(&self, cell: &u32) {
            *self.focused.borrow_mut() = Some(*cell);
        }

        fn activate_day(&self, cell: &u32) {
            self.clicked.borrow_mut().push(*cell);
        }
    }

    #[test]
    fn test_init_gives_every_day_a_tab_stop() {
        let nav = CalendarNavigator::new(FakeTable::month(MonthRef::new(2026, 2).unwrap()));
        assert_eq!(nav.init(), 28);
        assert_eq!(*nav.table().tab_stops.borrow(), (1..=28).collect::<Vec<u32>>());
    }

    #[test]
    fn test_locate_maps_cells_to_positions() {
        let nav = CalendarNavigator::new(FakeTable::month(MonthRef::new(2026, 2).unwrap()));
        assert_eq!(nav.locate(&1).1, GridPos::new(0, 6));
        assert_eq!(nav.locate(&2).1, GridPos::new(1, 0));
        assert_eq!(nav.locate(&28).1, GridPos::new(4, 5));
    }

    #[test]
    fn test_keys_focus_and_click_cells() {
        let nav = CalendarNavigator::new(FakeTable::month(MonthRef::new(2026, 2).unwrap()));

        assert_eq!(nav.on_key(&9, NavKey::Up), NavOutcome::Focus(GridPos::new(1, 0)));
        assert_eq!(*nav.table().focused.borrow(), Some(2));

        assert_eq!(nav.on_key(&8, NavKey::Right), NavOutcome::Stay);
        assert_eq!(*nav.table().focused.borrow(), Some(2));

        assert!(nav.on_key(&14, NavKey::Activate).prevents_default());
        assert_eq!(*nav.table().clicked.borrow(), vec![14]);
    }

    #[test]
    fn test_day_outside_a_row_still_activates() {
        let nav = CalendarNavigator::new(FakeTable::default());
        assert_eq!(nav.on_key(&7, NavKey::Activate), NavOutcome::Activate(GridPos::new(0, 0)));
        assert_eq!(nav.on_key(&7, NavKey::Right), NavOutcome::Stay);
        assert_eq!(*nav.table().clicked.borrow(), vec![7]);
        assert_eq!(*nav.table().focused.borrow(), None);
    }

    #[test]
    fn test_month_wraps_years() {
        let jan = MonthRef::new(2026, 1).unwrap();
        assert_eq!(jan.prev(), MonthRef::new(2025, 12).unwrap());
        let dec = MonthRef::new(2025, 12).unwrap();
        assert_eq!(dec.next(), jan);
        assert_eq!(jan.next().month(), 2);
    }

    #[test]
    fn test_invalid_month() {
        assert!(matches!(MonthRef::new(2026, 13), Err(Error::InvalidMonth { month: 13, .. })));
        assert!(MonthRef::new(2026, 0).is_err());
    }

    #[test]
    fn test_weeks_layout() {
        // February 2026 starts on a Sunday
        let feb = MonthRef::new(2026, 2).unwrap();
        assert_eq!(feb.name(), "February");
        assert_eq!(feb.days_in_month(), 28);

        let weeks = feb.weeks();
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0], [0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(weeks[1], [2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(weeks[4], [23, 24, 25, 26, 27, 28, 0]);
    }

    #[test]
    fn test_leap_february() {
        assert_eq!(MonthRef::new(2024, 2).unwrap().days_in_month(), 29);
    }

    #[test]
    fn test_query_pairs() {
        let [year, month] = MonthRef::new(2026, 10).unwrap().query_pairs();
        assert_eq!(year, ("year", "2026".to_string()));
        assert_eq!(month, ("month", "10".to_string()));
    }

    #[test]
    fn test_format_long_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        assert_eq!(format_long_date(date), "Monday, March 2, 2026");
    }

    #[test]
    fn test_right_stops_at_row_end() {
        let grid = CalendarGrid::for_month(MonthRef::new(2026, 2).unwrap());
        let mut pos = GridPos::new(1, 0);
        for _ in 0..10 {
            if let NavOutcome::Focus(next) = grid.navigate(pos, NavKey::Right) {
                pos = next;
            }
        }
        assert_eq!(pos, GridPos::new(1, 6));
        assert_eq!(grid.navigate(pos, NavKey::Right), NavOutcome::Stay);
    }

    #[test]
    fn test_padding_cells_block_movement() {
        let grid = CalendarGrid::for_month(MonthRef::new(2026, 2).unwrap());
        // Feb 1 sits alone at the end of the first row
        let first = GridPos::new(0, 6);
        assert_eq!(grid.navigate(first, NavKey::Left), NavOutcome::Stay);
        assert_eq!(grid.navigate(first, NavKey::Up), NavOutcome::Stay);
        assert_eq!(grid.navigate(first, NavKey::Down), NavOutcome::Focus(GridPos::new(1, 6)));
        // Feb 2 has a padding cell above it
        assert_eq!(grid.navigate(GridPos::new(1, 0), NavKey::Up), NavOutcome::Stay);
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let grid = CalendarGrid::for_month(MonthRef::new(2026, 10).unwrap());
        let days: Vec<GridPos> = grid.days().collect();
        assert_eq!(days.len(), 31);
        for pos in &days {
            for key in KEYS {
                match grid.navigate(*pos, key) {
                    NavOutcome::Focus(next) => assert!(grid.is_day(next)),
                    NavOutcome::Stay => {}
                    NavOutcome::Activate(_) => panic!("arrow key activated a cell"),
                }
            }
        }
    }

    #[test]
    fn test_activate_and_prevent_default() {
        let grid = CalendarGrid::from_rows(vec![vec![true, true]]);
        let pos = GridPos::new(0, 0);

        let outcome = grid.navigate(pos, NavKey::from_key(" ").unwrap());
        assert_eq!(outcome, NavOutcome::Activate(pos));
        assert!(outcome.prevents_default());
        assert!(!grid.navigate(pos, NavKey::Left).prevents_default());
        assert!(grid.navigate(pos, NavKey::Right).prevents_default());
    }

    #[test]
    fn test_unknown_keys_and_cells() {
        assert_eq!(NavKey::from_key("Tab"), None);
        assert_eq!(NavKey::from_key("Enter"), Some(NavKey::Activate));

        let grid = CalendarGrid::from_rows(vec![vec![false, true]]);
        assert_eq!(grid.navigate(GridPos::new(0, 0), NavKey::Right), NavOutcome::Stay);
        assert_eq!(grid.navigate(GridPos::new(5, 5), NavKey::Activate), NavOutcome::Stay);
    }
}
