use crate::core::catalog::Catalog;
use crate::core::derive::{project_courses, project_year_structure, summarize};
use crate::core::slot_map::SlotMap;
use crate::core::transition::{apply, Action};
use crate::domain::model::{Course, SlotKey, YearStructure, YearSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Holds one editing session: the catalog plus the current slot map.
///
/// Edits go through [`CurriculumBuilder::dispatch`], one at a time.
pub struct CurriculumBuilder {
    catalog: Catalog,
    slots: SlotMap,
    applied: usize,
}

/// 匯出用的完整快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub curriculum: String,
    pub exported_at: DateTime<Utc>,
    pub actions_applied: usize,
    pub slots: SlotMap,
    pub structure: Vec<YearStructure>,
    pub summary: Vec<YearSummary>,
}

impl CurriculumBuilder {
    pub fn new(catalog: Catalog, slots: SlotMap) -> Self {
        Self {
            catalog,
            slots,
            applied: 0,
        }
    }

    /// 空白格子開始 (years × semesters)
    pub fn with_empty_grid(catalog: Catalog, years: u32, semesters: u32) -> Self {
        Self::new(catalog, SlotMap::empty_grid(years, semesters))
    }

    /// 依照 catalog 內每門課既有的 year/semester 開始
    pub fn from_catalog(catalog: Catalog) -> Self {
        let slots = SlotMap::from_courses(catalog.courses());
        Self::new(catalog, slots)
    }

    pub fn dispatch(&mut self, action: Action) -> &SlotMap {
        tracing::debug!("Dispatching {:?}", action);

        let next = apply(&self.slots, action);
        tracing::debug!("Slot map now has {} slots (was {})", next.len(), self.slots.len());

        for (code, keys) in next.duplicate_placements() {
            let keys: Vec<String> = keys.iter().map(SlotKey::to_string).collect();
            tracing::debug!("Course {} sits in several slots: {}", code, keys.join(", "));
        }

        self.slots = next;
        self.applied += 1;
        &self.slots
    }

    pub fn slots(&self) -> &SlotMap {
        &self.slots
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn actions_applied(&self) -> usize {
        self.applied
    }

    pub fn courses_by_slot(&self) -> BTreeMap<SlotKey, Vec<&Course>> {
        project_courses(&self.slots, &self.catalog)
    }

    pub fn year_structure(&self) -> Vec<YearStructure> {
        project_year_structure(&self.slots)
    }

    pub fn summary(&self) -> Vec<YearSummary> {
        summarize(&self.slots, &self.catalog)
    }

    /// Codes placed in a slot that the catalog cannot resolve.
    pub fn unresolved_codes(&self) -> Vec<String> {
        self.slots
            .iter()
            .flat_map(|(_, codes)| codes.iter())
            .filter(|code| !self.catalog.contains(code))
            .cloned()
            .collect()
    }

    /// Course list with placements taken from the current slots.
    pub fn flatten(&self) -> Vec<Course> {
        self.slots.to_courses(&self.catalog)
    }

    pub fn snapshot(&self, curriculum: &str) -> Snapshot {
        Snapshot {
            curriculum: curriculum.to_string(),
            exported_at: Utc::now(),
            actions_applied: self.applied,
            slots: self.slots.clone(),
            structure: self.year_structure(),
            summary: self.summary(),
        }
    }
}
