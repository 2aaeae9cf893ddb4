use std::borrow::Cow;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::info;

use crate::{Grid, Parity, Result};

/// When schedule workbooks are read.
///
/// `Eager` reads both once and needs a restart to pick up edited files,
/// `Lazy` reads the needed workbook on every query and always serves the
/// current file content at the cost of parsing it each time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadPolicy {
  #[default]
  Eager,
  Lazy,
}

impl FromStr for LoadPolicy {
  type Err = String;

  fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
    match value {
      "eager" => Ok(LoadPolicy::Eager),
      "lazy" => Ok(LoadPolicy::Lazy),
      _ => Err(format!("unknown load policy {value:?}, expected eager or lazy")),
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchedulePaths {
  pub odd: PathBuf,
  pub even: PathBuf,
}

impl SchedulePaths {
  pub fn new(odd: impl Into<PathBuf>, even: impl Into<PathBuf>) -> Self {
    Self {
      odd: odd.into(),
      even: even.into(),
    }
  }

  pub fn get(&self, parity: Parity) -> &PathBuf {
    match parity {
      Parity::Odd => &self.odd,
      Parity::Even => &self.even,
    }
  }
}

pub enum ScheduleStore {
  Eager { odd: Grid, even: Grid },
  Lazy(SchedulePaths),
}

impl ScheduleStore {
  pub fn open(paths: SchedulePaths, policy: LoadPolicy) -> Result<Self> {
    match policy {
      LoadPolicy::Eager => {
        let odd = Grid::load(&paths.odd)?;
        let even = Grid::load(&paths.even)?;
        info!("Loaded odd and even schedules");
        Ok(Self::Eager { odd, even })
      }
      LoadPolicy::Lazy => {
        info!(
          "Schedules are read on demand from {} and {}",
          paths.odd.display(),
          paths.even.display()
        );
        Ok(Self::Lazy(paths))
      }
    }
  }

  pub fn from_grids(odd: Grid, even: Grid) -> Self {
    Self::Eager { odd, even }
  }

  pub fn policy(&self) -> LoadPolicy {
    match self {
      Self::Eager { .. } => LoadPolicy::Eager,
      Self::Lazy(_) => LoadPolicy::Lazy,
    }
  }

  pub fn grid(&self, parity: Parity) -> Result<Cow<'_, Grid>> {
    match self {
      Self::Eager { odd, even } => Ok(Cow::Borrowed(match parity {
        Parity::Odd => odd,
        Parity::Even => even,
      })),
      Self::Lazy(paths) => Grid::load(paths.get(parity)).map(Cow::Owned),
    }
  }
}
