use std::borrow::Cow;

use time::Date;
use tracing::debug;

pub use crate::error::ScheduleError;
pub use crate::extract::{
  clean, extract_day, extract_week, DaySchedule, WeekSchedule, EMPTY_LESSON, FIRST_LESSON_ROW,
  LESSONS_PER_DAY, WORKING_DAYS,
};
pub use crate::grid::Grid;
pub use crate::registry::{GroupRegistry, DEFAULT_GROUPS, FIRST_GROUP_COLUMN};
pub use crate::store::{LoadPolicy, SchedulePaths, ScheduleStore};
pub use crate::week::{resolve, DayToken, Parity, Resolved};

mod error;
mod extract;
mod grid;
mod registry;
mod store;
mod week;

pub type Result<T> = std::result::Result<T, ScheduleError>;

pub struct ScheduleService {
  registry: GroupRegistry,
  store: ScheduleStore,
}

impl ScheduleService {
  pub fn new(registry: GroupRegistry, store: ScheduleStore) -> Self {
    Self { registry, store }
  }

  pub fn registry(&self) -> &GroupRegistry {
    &self.registry
  }

  pub fn store(&self) -> &ScheduleStore {
    &self.store
  }

  /// Lessons of `group` for `day` (`today` or `tomorrow`) relative to `today`.
  ///
  /// The parity is always the one active on `today`, also when asking for
  /// tomorrow; the Sunday rule in [`resolve`] makes that line up with the next
  /// week.
  pub fn day_schedule(&self, group: &str, day: &str, today: Date) -> Result<DaySchedule> {
    let token = day.parse::<DayToken>()?;
    let column = self.registry.column_of(group)?;

    let resolved = resolve(today);
    let weekday = match token {
      DayToken::Today => resolved.weekday,
      DayToken::Tomorrow => resolved.weekday.next(),
    };

    debug!(
      "Resolved {} to {} in {} week for group {}",
      token, weekday, resolved.parity, group
    );

    let grid: Cow<'_, Grid> = self.store.grid(resolved.parity)?;
    Ok(extract_day(&grid, column, weekday))
  }

  pub fn week_schedule(&self, group: &str, parity: &str) -> Result<WeekSchedule> {
    let parity = parity.parse::<Parity>()?;
    let column = self.registry.column_of(group)?;

    let grid = self.store.grid(parity)?;
    Ok(extract_week(&grid, column))
  }
}
