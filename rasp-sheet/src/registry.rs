use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::{Result, ScheduleError};

/// Spreadsheet column (1-based) holding the first registered group; columns 1
/// and 2 carry the day and lesson labels.
pub const FIRST_GROUP_COLUMN: u32 = 3;

pub const DEFAULT_GROUPS: &[&str] = &[
  "ТОР-23", "РЭГ-23", "СЭЗС-23", "ПР-23", "ОПИ-23", "ДПИ-23", "МД-23/1", "МД-23/2",
  "ИСИП-23/1", "ИСИП-23/2", "БУ-23", "БД-23", "Ф-23", "ЗИМ-23", "ЮР-23/1", "ЮР-23/2",
  "ПКД-23", "ТОР-22", "РЭГ-22", "КИП-22", "СЭЗС-22", "ПР-22", "ОПИ-22", "ДПИ-22", "МД-22",
  "ПО-22/1", "ПО-22/2", "БУ-22", "БД-22", "Ф-22", "ЗИМ-22", "ПСО-22/1", "ПСО-22/2", "ПКД-22",
  "ТОР-21", "РЭГ-21", "КИП-21", "СЭЗС-21", "ПР-21", "ОПИ-21", "ДПИ-21", "МД-21", "ПО-21",
  "БУ-21", "Ф-21", "ЗИМ-21", "ПСО-21/1", "ПСО-21/2", "ПКД-21", "ТОР-20", "РЭГ-20", "СЭЗС-20",
  "ПР-20", "ОПИ-20", "ДПИ-20", "БУ-20", "МД-20", "ПО-20", "ПКД-20",
];

#[derive(Clone, Debug)]
pub struct GroupRegistry {
  groups: Vec<String>,
  columns: HashMap<String, u32>,
}

impl GroupRegistry {
  pub fn new<I, S>(groups: I) -> Result<Self>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let groups = groups.into_iter().map(Into::into).collect::<Vec<String>>();
    let mut columns = HashMap::with_capacity(groups.len());

    for (index, group) in groups.iter().enumerate() {
      if group.is_empty() {
        return Err(ScheduleError::EmptyGroup(index));
      }

      match columns.entry(group.clone()) {
        Entry::Occupied(_) => return Err(ScheduleError::DuplicateGroup(group.clone())),
        Entry::Vacant(entry) => {
          entry.insert(index as u32 + FIRST_GROUP_COLUMN);
        }
      }
    }

    Ok(Self { groups, columns })
  }

  pub fn is_known(&self, group: &str) -> bool {
    self.columns.contains_key(group)
  }

  pub fn column_of(&self, group: &str) -> Result<u32> {
    self
      .columns
      .get(group)
      .copied()
      .ok_or_else(|| ScheduleError::GroupNotFound(group.to_string()))
  }

  pub fn groups(&self) -> &[String] {
    &self.groups
  }

  pub fn len(&self) -> usize {
    self.groups.len()
  }

  pub fn is_empty(&self) -> bool {
    self.groups.is_empty()
  }
}

impl Default for GroupRegistry {
  fn default() -> Self {
    Self {
      groups: DEFAULT_GROUPS.iter().map(|group| group.to_string()).collect(),
      columns: DEFAULT_GROUPS
        .iter()
        .enumerate()
        .map(|(index, group)| (group.to_string(), index as u32 + FIRST_GROUP_COLUMN))
        .collect(),
    }
  }
}
