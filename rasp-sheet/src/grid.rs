use std::io::{Cursor, ErrorKind};
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use tracing::{error, info};

use crate::{Result, ScheduleError};

#[derive(Clone, Debug)]
pub struct Grid {
  range: Range<Data>,
}

impl Grid {
  pub fn load(path: &Path) -> Result<Self> {
    let buffer = std::fs::read(path).map_err(|err| {
      error!("Unable to read schedule file {}: {}", path.display(), err);
      match err.kind() {
        ErrorKind::NotFound => ScheduleError::ScheduleFileMissing(path.to_path_buf()),
        _ => ScheduleError::load(path, err),
      }
    })?;

    let mut workbook = open_workbook_auto_from_rs(Cursor::new(buffer)).map_err(|err| {
      error!("Unable to open schedule file {}: {}", path.display(), err);
      ScheduleError::load(path, err)
    })?;

    let range = match workbook.worksheet_range_at(0) {
      None => {
        error!("Schedule file {} contains no worksheet", path.display());
        return Err(ScheduleError::load(path, "workbook contains no worksheet"));
      }
      Some(range) => range.map_err(|err| {
        error!("Unable to read worksheet of {}: {}", path.display(), err);
        ScheduleError::load(path, err)
      })?,
    };

    let (height, width) = range.get_size();
    info!(
      "Loaded schedule file {} ({} rows, {} columns)",
      path.display(),
      height,
      width
    );

    Ok(Self { range })
  }

  /// Text of the cell at 1-based (`row`, `column`); `None` for blank cells and
  /// positions outside the used range.
  pub fn cell(&self, row: u32, column: u32) -> Option<String> {
    if row == 0 || column == 0 {
      return None;
    }

    match self.range.get_value((row - 1, column - 1))? {
      Data::Empty => None,
      Data::String(value) => Some(value.clone()),
      value => Some(value.to_string()),
    }
  }
}

impl From<Range<Data>> for Grid {
  fn from(range: Range<Data>) -> Self {
    Self { range }
  }
}
