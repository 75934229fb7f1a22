use crate::core::catalog::Catalog;
use crate::core::slot_map::SlotMap;
use crate::domain::model::{Course, SlotKey, SlotSummary, YearStructure, YearSummary};
use std::collections::BTreeMap;

/// Resolves every slot's codes to catalog records, in slot order.
///
/// Codes the catalog does not know are dropped; they stay in the slot map
/// until the catalog catches up.
pub fn project_courses<'a>(
    slots: &SlotMap,
    catalog: &'a Catalog,
) -> BTreeMap<SlotKey, Vec<&'a Course>> {
    slots
        .iter()
        .map(|(key, codes)| {
            let courses: Vec<&Course> = codes.iter().filter_map(|code| catalog.get(code)).collect();
            (*key, courses)
        })
        .collect()
}

/// Years ascending, each with its semesters ascending.
pub fn project_year_structure(slots: &SlotMap) -> Vec<YearStructure> {
    let mut years: Vec<YearStructure> = Vec::new();

    // keys come out sorted by (year, semester)
    for key in slots.keys() {
        match years.last_mut() {
            Some(last) if last.year == key.year => last.semesters.push(key.semester),
            _ => years.push(YearStructure {
                year: key.year,
                semesters: vec![key.semester],
            }),
        }
    }
    years
}

/// 每年 / 每學期的課程數與學分統計
pub fn summarize(slots: &SlotMap, catalog: &Catalog) -> Vec<YearSummary> {
    let mut summaries: Vec<YearSummary> = Vec::new();

    for (key, courses) in project_courses(slots, catalog) {
        let slot = SlotSummary {
            semester: key.semester,
            course_count: courses.len(),
            units: courses.iter().map(|course| u64::from(course.units)).sum(),
        };

        match summaries.last_mut() {
            Some(last) if last.year == key.year => {
                last.course_count += slot.course_count;
                last.units += slot.units;
                last.semesters.push(slot);
            }
            _ => summaries.push(YearSummary {
                year: key.year,
                course_count: slot.course_count,
                units: slot.units,
                semesters: vec![slot],
            }),
        }
    }
    summaries
}
