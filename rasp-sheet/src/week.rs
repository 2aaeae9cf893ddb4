use std::fmt::{Display, Formatter};
use std::str::FromStr;

use time::{Date, Weekday};

use crate::ScheduleError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Parity {
  Odd,
  Even,
}

impl Parity {
  pub fn of_week(week: u8) -> Self {
    if week % 2 == 0 {
      Parity::Even
    } else {
      Parity::Odd
    }
  }

  pub fn flip(self) -> Self {
    match self {
      Parity::Odd => Parity::Even,
      Parity::Even => Parity::Odd,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Parity::Odd => "odd",
      Parity::Even => "even",
    }
  }
}

impl Display for Parity {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Parity {
  type Err = ScheduleError;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value {
      "odd" => Ok(Parity::Odd),
      "even" => Ok(Parity::Even),
      _ => Err(ScheduleError::InvalidParityToken(value.to_string())),
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayToken {
  Today,
  Tomorrow,
}

impl Display for DayToken {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      DayToken::Today => f.write_str("today"),
      DayToken::Tomorrow => f.write_str("tomorrow"),
    }
  }
}

impl FromStr for DayToken {
  type Err = ScheduleError;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    match value {
      "today" => Ok(DayToken::Today),
      "tomorrow" => Ok(DayToken::Tomorrow),
      _ => Err(ScheduleError::InvalidDayToken(value.to_string())),
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolved {
  pub parity: Parity,
  pub weekday: Weekday,
}

/// Parity and weekday in effect on `date`.
///
/// The parity follows the ISO week number, except on Sundays which already
/// show the schedule of the following week.
pub fn resolve(date: Date) -> Resolved {
  let weekday = date.weekday();
  let parity = Parity::of_week(date.iso_week());

  Resolved {
    parity: match weekday {
      Weekday::Sunday => parity.flip(),
      _ => parity,
    },
    weekday,
  }
}
