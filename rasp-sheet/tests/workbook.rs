use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Workbook, XlsxError};
use tempfile::TempDir;
use time::macros::date;

use rasp_sheet::{
  GroupRegistry, LoadPolicy, SchedulePaths, ScheduleError, ScheduleService, ScheduleStore,
  EMPTY_LESSON,
};

const DAYS: [&str; 7] = [
  "Понедельник",
  "Вторник",
  "Среда",
  "Четверг",
  "Пятница",
  "Суббота",
  "Воскресенье",
];

/// Writes a workbook laid out like the college schedules: five header rows,
/// then six rows per weekday with the day in column A and the lesson number
/// in column B. `lessons` holds (group index, weekday, slot, text).
fn write_schedule(
  path: &Path,
  title: &str,
  lessons: &[(u16, u32, u32, &str)],
) -> Result<(), XlsxError> {
  let mut workbook = Workbook::new();
  let sheet = workbook.add_worksheet();

  sheet.write_string(0, 0, title)?;
  for (index, group) in ["ТОР-23", "РЭГ-23", "СЭЗС-23"].iter().enumerate() {
    sheet.write_string(4, 2 + index as u16, *group)?;
  }

  for (weekday, day) in DAYS.iter().enumerate() {
    let first_row = 5 + 6 * weekday as u32;
    sheet.write_string(first_row, 0, *day)?;
    for slot in 0..6 {
      sheet.write_number(first_row + slot, 1, (slot + 1) as f64)?;
    }
  }

  for (group, weekday, slot, text) in lessons {
    sheet.write_string(5 + 6 * weekday + slot - 1, 2 + group, *text)?;
  }

  workbook.save(path)
}

struct Fixture {
  _dir: TempDir,
  paths: SchedulePaths,
}

fn fixture() -> anyhow::Result<Fixture> {
  let dir = tempfile::tempdir()?;
  let odd = dir.path().join("rasp_cet.xlsx");
  let even = dir.path().join("rasp_necet.xlsx");

  write_schedule(
    &odd,
    "Нечётная неделя",
    &[
      (0, 0, 1, "Математика\n  ауд. 204"),
      (0, 0, 2, "Физика   ауд. 111"),
      (1, 2, 3, "История"),
      (0, 6, 1, "Консультация"),
    ],
  )?;
  write_schedule(
    &even,
    "Чётная неделя",
    &[(0, 0, 1, "Литература"), (0, 5, 6, "Физкультура\n\nспортзал")],
  )?;

  Ok(Fixture {
    _dir: dir,
    paths: SchedulePaths::new(odd, even),
  })
}

#[test]
fn eager_store_serves_both_parities() -> anyhow::Result<()> {
  let fixture = fixture()?;
  let store = ScheduleStore::open(fixture.paths.clone(), LoadPolicy::Eager)?;
  let service = ScheduleService::new(GroupRegistry::default(), store);

  let odd = service.week_schedule("ТОР-23", "odd")?;
  let monday = odd.get("pn").unwrap();
  assert_eq!(monday.get(1), Some("Математика ауд. 204"));
  assert_eq!(monday.get(2), Some("Физика ауд. 111"));
  assert_eq!(monday.get(3), Some(EMPTY_LESSON));
  assert_eq!(odd.days().len(), 6);

  let odd = service.week_schedule("РЭГ-23", "odd")?;
  assert_eq!(odd.get("sr").unwrap().get(3), Some("История"));

  let even = service.week_schedule("ТОР-23", "even")?;
  assert_eq!(even.get("pn").unwrap().get(1), Some("Литература"));
  assert_eq!(even.get("sb").unwrap().get(6), Some("Физкультура спортзал"));

  // Monday of ISO week 11
  let today = service.day_schedule("ТОР-23", "today", date!(2024 - 03 - 11))?;
  assert_eq!(today.get(1), Some("Математика ауд. 204"));

  // Sunday of ISO week 11 already shows the even week
  let today = service.day_schedule("ТОР-23", "today", date!(2024 - 03 - 17))?;
  assert_eq!(today.get(1), Some(EMPTY_LESSON));
  let tomorrow = service.day_schedule("ТОР-23", "tomorrow", date!(2024 - 03 - 17))?;
  assert_eq!(tomorrow.get(1), Some("Литература"));

  Ok(())
}

#[test]
fn eager_store_keeps_loaded_content() -> anyhow::Result<()> {
  let fixture = fixture()?;
  let store = ScheduleStore::open(fixture.paths.clone(), LoadPolicy::Eager)?;

  write_schedule(&fixture.paths.odd, "edited", &[(0, 0, 1, "Химия")])?;

  let service = ScheduleService::new(GroupRegistry::default(), store);
  let odd = service.week_schedule("ТОР-23", "odd")?;
  assert_eq!(odd.get("pn").unwrap().get(1), Some("Математика ауд. 204"));

  Ok(())
}

#[test]
fn lazy_store_reads_current_file() -> anyhow::Result<()> {
  let fixture = fixture()?;
  let store = ScheduleStore::open(fixture.paths.clone(), LoadPolicy::Lazy)?;
  let service = ScheduleService::new(GroupRegistry::default(), store);

  let odd = service.week_schedule("ТОР-23", "odd")?;
  assert_eq!(odd.get("pn").unwrap().get(1), Some("Математика ауд. 204"));

  write_schedule(&fixture.paths.odd, "edited", &[(0, 0, 1, "Химия")])?;

  let odd = service.week_schedule("ТОР-23", "odd")?;
  assert_eq!(odd.get("pn").unwrap().get(1), Some("Химия"));

  Ok(())
}

#[test]
fn missing_file_fails_eager_open() -> anyhow::Result<()> {
  let fixture = fixture()?;
  let missing = fixture.paths.odd.with_file_name("missing.xlsx");

  let result = ScheduleStore::open(
    SchedulePaths::new(fixture.paths.odd.clone(), missing.clone()),
    LoadPolicy::Eager,
  );

  match result {
    Err(ScheduleError::ScheduleFileMissing(path)) => assert_eq!(path, missing),
    Err(err) => panic!("unexpected error {err}"),
    Ok(_) => panic!("store opened without even schedule"),
  }

  Ok(())
}

#[test]
fn corrupt_file_is_a_load_error() -> anyhow::Result<()> {
  let dir = tempfile::tempdir()?;
  let corrupt: PathBuf = dir.path().join("rasp_cet.xlsx");
  std::fs::write(&corrupt, b"definitely not a workbook")?;

  let store = ScheduleStore::open(
    SchedulePaths::new(&corrupt, dir.path().join("rasp_necet.xlsx")),
    LoadPolicy::Lazy,
  )?;
  let service = ScheduleService::new(GroupRegistry::default(), store);

  match service.week_schedule("ТОР-23", "odd") {
    Err(ScheduleError::ScheduleLoad { path, .. }) => assert_eq!(path, corrupt),
    Err(err) => panic!("unexpected error {err}"),
    Ok(_) => panic!("corrupt workbook was accepted"),
  }

  Ok(())
}
