use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use time::Weekday;
use time::Weekday::{Friday, Monday, Saturday, Thursday, Tuesday, Wednesday};

use crate::Grid;

/// 1-based row of Monday's first lesson.
pub const FIRST_LESSON_ROW: u32 = 6;
pub const LESSONS_PER_DAY: u32 = 6;
pub const EMPTY_LESSON: &str = "Нет";

pub const WORKING_DAYS: [(Weekday, &str); 6] = [
  (Monday, "pn"),
  (Tuesday, "vt"),
  (Wednesday, "sr"),
  (Thursday, "cht"),
  (Friday, "pt"),
  (Saturday, "sb"),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DaySchedule {
  lessons: Vec<String>,
}

impl DaySchedule {
  /// Lesson of the 1-based `slot`.
  pub fn get(&self, slot: usize) -> Option<&str> {
    slot
      .checked_sub(1)
      .and_then(|index| self.lessons.get(index))
      .map(String::as_str)
  }

  pub fn lessons(&self) -> &[String] {
    &self.lessons
  }

  pub fn iter(&self) -> impl Iterator<Item = (String, &str)> {
    self
      .lessons
      .iter()
      .enumerate()
      .map(|(index, lesson)| ((index + 1).to_string(), lesson.as_str()))
  }
}

impl Serialize for DaySchedule {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.lessons.len()))?;
    for (slot, lesson) in self.iter() {
      map.serialize_entry(&slot, lesson)?;
    }
    map.end()
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeekSchedule {
  days: Vec<(&'static str, DaySchedule)>,
}

impl WeekSchedule {
  pub fn get(&self, key: &str) -> Option<&DaySchedule> {
    self
      .days
      .iter()
      .find(|(day, _)| *day == key)
      .map(|(_, schedule)| schedule)
  }

  pub fn days(&self) -> &[(&'static str, DaySchedule)] {
    &self.days
  }
}

impl Serialize for WeekSchedule {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(self.days.iter().map(|(day, schedule)| (*day, schedule)))
  }
}

pub fn clean(value: &str) -> String {
  value.split_whitespace().collect::<Vec<&str>>().join(" ")
}

pub fn extract_day(grid: &Grid, column: u32, weekday: Weekday) -> DaySchedule {
  let start_row = FIRST_LESSON_ROW + LESSONS_PER_DAY * weekday.number_days_from_monday() as u32;

  let lessons = (start_row..start_row + LESSONS_PER_DAY)
    .map(|row| {
      // only absent or empty cells are blank, whitespace cleans down to ""
      match grid.cell(row, column) {
        Some(value) if !value.is_empty() => clean(&value),
        _ => EMPTY_LESSON.to_string(),
      }
    })
    .collect();

  DaySchedule { lessons }
}

pub fn extract_week(grid: &Grid, column: u32) -> WeekSchedule {
  WeekSchedule {
    days: WORKING_DAYS
      .iter()
      .map(|(weekday, key)| (*key, extract_day(grid, column, *weekday)))
      .collect(),
  }
}
