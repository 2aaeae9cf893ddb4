use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
  #[error("Group {0:?} not found")]
  GroupNotFound(String),

  #[error("Group {0:?} is listed more than once")]
  DuplicateGroup(String),

  #[error("Group at position {0} has an empty name")]
  EmptyGroup(usize),

  #[error("Invalid day {0:?}, expected \"today\" or \"tomorrow\"")]
  InvalidDayToken(String),

  #[error("Invalid parity {0:?}, expected \"odd\" or \"even\"")]
  InvalidParityToken(String),

  #[error("Schedule file {} not found", .0.display())]
  ScheduleFileMissing(PathBuf),

  #[error("Unable to load schedule file {}: {source}", path.display())]
  ScheduleLoad {
    path: PathBuf,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },
}

impl ScheduleError {
  pub(crate) fn load(
    path: impl Into<PathBuf>,
    source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
  ) -> Self {
    Self::ScheduleLoad {
      path: path.into(),
      source: source.into(),
    }
  }
}
