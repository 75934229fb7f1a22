use crate::core::slot_map::SlotMap;
use crate::domain::model::SlotKey;
use std::fmt;

/// Semesters seeded for every new year.
pub const SEMESTERS_PER_NEW_YEAR: u32 = 3;

pub type Transform = Box<dyn FnOnce(&SlotMap) -> SlotMap>;

/// One logical edit of a slot map.
///
/// Year and semester numbers start at 1. Edits that would create a slot
/// numbered 0 leave the map unchanged.
pub enum Action {
    /// Replace the whole map with `transform(current)`.
    Set(Transform),
    AddYear,
    DeleteYear { year: u32 },
    AddSemester { year: u32 },
    DeleteSemester { year: u32, semester: u32 },
    PlaceCourse { slot: SlotKey, code: String },
    RemoveCourse { year: u32, semester: u32, code: String },
}

impl Action {
    /// Replaces the map with a fixed value.
    pub fn replace(map: SlotMap) -> Self {
        Action::Set(Box::new(move |_: &SlotMap| map))
    }

    pub fn place(slot: SlotKey, code: impl Into<String>) -> Self {
        Action::PlaceCourse {
            slot,
            code: code.into(),
        }
    }

    pub fn remove(year: u32, semester: u32, code: impl Into<String>) -> Self {
        Action::RemoveCourse {
            year,
            semester,
            code: code.into(),
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Set(_) => f.write_str("Set(<transform>)"),
            Action::AddYear => f.write_str("AddYear"),
            Action::DeleteYear { year } => f.debug_struct("DeleteYear").field("year", year).finish(),
            Action::AddSemester { year } => {
                f.debug_struct("AddSemester").field("year", year).finish()
            }
            Action::DeleteSemester { year, semester } => f
                .debug_struct("DeleteSemester")
                .field("year", year)
                .field("semester", semester)
                .finish(),
            Action::PlaceCourse { slot, code } => f
                .debug_struct("PlaceCourse")
                .field("slot", &slot.to_string())
                .field("code", code)
                .finish(),
            Action::RemoveCourse {
                year,
                semester,
                code,
            } => f
                .debug_struct("RemoveCourse")
                .field("year", year)
                .field("semester", semester)
                .field("code", code)
                .finish(),
        }
    }
}

/// Applies one action and returns the next map. `current` is never touched.
pub fn apply(current: &SlotMap, action: Action) -> SlotMap {
    match action {
        Action::Set(transform) => transform(current),
        Action::AddYear => add_year(current),
        Action::DeleteYear { year } => delete_year(current, year),
        Action::AddSemester { year } => add_semester(current, year),
        Action::DeleteSemester { year, semester } => delete_semester(current, year, semester),
        Action::PlaceCourse { slot, code } => place_course(current, slot, &code),
        Action::RemoveCourse {
            year,
            semester,
            code,
        } => remove_course(current, SlotKey::new(year, semester), &code),
    }
}

fn add_year(current: &SlotMap) -> SlotMap {
    // max + 1 even when earlier years are missing
    let year = current.max_year() + 1;
    let mut next = current.clone();
    for semester in 1..=SEMESTERS_PER_NEW_YEAR {
        next.insert(SlotKey::new(year, semester), Vec::new());
    }
    next
}

fn delete_year(current: &SlotMap, year: u32) -> SlotMap {
    if !current.has_year(year) {
        return current.clone();
    }

    // Rebuilt from a snapshot of the old entries so a renumbered slot never
    // lands on a key that is still waiting to move.
    current
        .iter()
        .filter(|(key, _)| key.year != year)
        .map(|(key, codes)| (shift_year_down(*key, year), codes.clone()))
        .collect()
}

fn add_semester(current: &SlotMap, year: u32) -> SlotMap {
    if year == 0 {
        return current.clone();
    }
    let semester = current.max_semester(year) + 1;
    let mut next = current.clone();
    next.insert(SlotKey::new(year, semester), Vec::new());
    next
}

fn delete_semester(current: &SlotMap, year: u32, semester: u32) -> SlotMap {
    let target = SlotKey::new(year, semester);
    if !current.contains_key(&target) {
        return current.clone();
    }

    let remaining = current.iter().filter(|(key, _)| **key != target);

    if !current.semesters_of(year).any(|s| s != semester) {
        // last semester of the year: the year goes away with it
        remaining
            .map(|(key, codes)| (shift_year_down(*key, year), codes.clone()))
            .collect()
    } else {
        remaining
            .map(|(key, codes)| {
                let key = if key.year == year && key.semester > semester {
                    SlotKey::new(key.year, key.semester - 1)
                } else {
                    *key
                };
                (key, codes.clone())
            })
            .collect()
    }
}

fn place_course(current: &SlotMap, slot: SlotKey, code: &str) -> SlotMap {
    if slot.year == 0 || slot.semester == 0 {
        return current.clone();
    }
    let mut next = current.clone();

    let target = next.slot_mut(slot);
    if !target.iter().any(|c| c == code) {
        target.push(code.to_string());
    }

    for (key, codes) in next.iter_mut() {
        if *key != slot {
            codes.retain(|c| c != code);
        }
    }
    next
}

fn remove_course(current: &SlotMap, slot: SlotKey, code: &str) -> SlotMap {
    let mut next = current.clone();
    if let Some(codes) = next.existing_slot_mut(&slot) {
        codes.retain(|c| c != code);
    }
    next
}

fn shift_year_down(key: SlotKey, removed_year: u32) -> SlotKey {
    if key.year > removed_year {
        SlotKey::new(key.year - 1, key.semester)
    } else {
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_of(entries: &[(&str, &[&str])]) -> SlotMap {
        entries
            .iter()
            .map(|(key, codes)| {
                (
                    key.parse::<SlotKey>().unwrap(),
                    codes.iter().map(|c| c.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_add_year_seeds_three_empty_semesters() {
        let next = apply(&SlotMap::empty_grid(4, 3), Action::AddYear);
        assert_eq!(next.len(), 15);
        for semester in 1..=3 {
            assert_eq!(next.get(&SlotKey::new(5, semester)).map(<[String]>::is_empty), Some(true));
        }
    }

    #[test]
    fn test_add_year_on_empty_map_starts_at_one() {
        let next = apply(&SlotMap::new(), Action::AddYear);
        assert_eq!(next, SlotMap::empty_grid(1, 3));
    }

    #[test]
    fn test_add_year_tolerates_gaps() {
        let next = apply(&map_of(&[("3-1", &[])]), Action::AddYear);
        assert!(next.contains_key(&SlotKey::new(4, 1)));
        assert!(!next.has_year(1));
    }

    #[test]
    fn test_delete_year_shifts_following_years() {
        let current = map_of(&[("1-1", &["A"]), ("1-2", &["B"]), ("2-1", &["C"])]);
        let next = apply(&current, Action::DeleteYear { year: 1 });
        assert_eq!(next, map_of(&[("1-1", &["C"])]));
        // input untouched
        assert_eq!(current.len(), 3);
    }

    #[test]
    fn test_delete_middle_year_keeps_earlier_years() {
        let current = map_of(&[
            ("1-1", &["A"]),
            ("2-1", &["B"]),
            ("3-1", &["C"]),
            ("3-2", &["D"]),
        ]);
        let next = apply(&current, Action::DeleteYear { year: 2 });
        assert_eq!(
            next,
            map_of(&[("1-1", &["A"]), ("2-1", &["C"]), ("2-2", &["D"])])
        );
    }

    #[test]
    fn test_delete_missing_year_is_noop() {
        let current = map_of(&[("1-1", &["A"]), ("3-1", &["C"])]);
        assert_eq!(apply(&current, Action::DeleteYear { year: 2 }), current);
    }

    #[test]
    fn test_add_semester_appends_after_max() {
        let current = map_of(&[("1-1", &[]), ("1-2", &[])]);
        let next = apply(&current, Action::AddSemester { year: 1 });
        assert!(next.contains_key(&SlotKey::new(1, 3)));

        let fresh = apply(&current, Action::AddSemester { year: 7 });
        assert!(fresh.contains_key(&SlotKey::new(7, 1)));
    }

    #[test]
    fn test_zero_numbered_slots_are_never_created() {
        let current = map_of(&[("1-1", &["X"])]);
        assert_eq!(apply(&current, Action::AddSemester { year: 0 }), current);
        assert_eq!(apply(&current, Action::place(SlotKey::new(0, 1), "X")), current);
        assert_eq!(apply(&current, Action::place(SlotKey::new(1, 0), "Y")), current);

        // what the engine builds survives a JSON round trip
        let json = serde_json::to_string(&apply(&current, Action::AddSemester { year: 0 })).unwrap();
        let reloaded: SlotMap = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, current);
    }

    #[test]
    fn test_delete_semester_closes_gap_within_year() {
        let current = map_of(&[("1-1", &["A"]), ("1-2", &[]), ("1-3", &["Z"]), ("2-1", &["B"])]);
        let next = apply(&current, Action::DeleteSemester { year: 1, semester: 2 });
        assert_eq!(
            next,
            map_of(&[("1-1", &["A"]), ("1-2", &["Z"]), ("2-1", &["B"])])
        );
    }

    #[test]
    fn test_delete_last_semester_removes_year() {
        let current = map_of(&[("1-1", &["A"]), ("2-1", &["B"]), ("3-1", &["C"]), ("3-2", &[])]);
        let next = apply(&current, Action::DeleteSemester { year: 2, semester: 1 });
        assert_eq!(
            next,
            map_of(&[("1-1", &["A"]), ("2-1", &["C"]), ("2-2", &[])])
        );
    }

    #[test]
    fn test_delete_missing_semester_is_noop() {
        let current = map_of(&[("1-1", &["A"]), ("3-1", &["C"])]);
        assert_eq!(
            apply(&current, Action::DeleteSemester { year: 2, semester: 1 }),
            current
        );
        assert_eq!(
            apply(&current, Action::DeleteSemester { year: 1, semester: 4 }),
            current
        );
    }

    #[test]
    fn test_place_course_moves_between_slots() {
        let current = map_of(&[("1-1", &["X", "Y"]), ("2-1", &["Z"])]);
        let next = apply(&current, Action::place(SlotKey::new(2, 1), "X"));
        assert_eq!(next, map_of(&[("1-1", &["Y"]), ("2-1", &["Z", "X"])]));
    }

    #[test]
    fn test_place_course_creates_missing_slot() {
        let next = apply(&SlotMap::new(), Action::place(SlotKey::new(2, 2), "X"));
        assert_eq!(next, map_of(&[("2-2", &["X"])]));
    }

    #[test]
    fn test_place_course_is_idempotent() {
        let current = map_of(&[("1-1", &["X"]), ("1-2", &[])]);
        let once = apply(&current, Action::place(SlotKey::new(1, 2), "X"));
        let twice = apply(&once, Action::place(SlotKey::new(1, 2), "X"));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_remove_course_only_touches_one_slot() {
        let current = map_of(&[("1-1", &["X", "Y"]), ("1-2", &["Y"])]);
        let next = apply(&current, Action::remove(1, 1, "Y"));
        assert_eq!(next, map_of(&[("1-1", &["X"]), ("1-2", &["Y"])]));

        // absent course / absent slot
        assert_eq!(apply(&next, Action::remove(1, 1, "Q")), next);
        assert_eq!(apply(&next, Action::remove(5, 1, "X")), next);
    }

    #[test]
    fn test_set_replaces_via_transform() {
        let current = map_of(&[("1-1", &["A"])]);
        let next = apply(
            &current,
            Action::Set(Box::new(|map: &SlotMap| {
                let mut copy = map.clone();
                copy.insert(SlotKey::new(9, 9), vec!["N".to_string()]);
                copy
            })),
        );
        assert_eq!(next.len(), 2);
        assert_eq!(apply(&next, Action::replace(SlotMap::new())), SlotMap::new());
    }

    #[test]
    fn test_action_debug_hides_transform() {
        assert_eq!(format!("{:?}", Action::replace(SlotMap::new())), "Set(<transform>)");
        assert!(format!("{:?}", Action::place(SlotKey::new(1, 2), "X")).contains("1-2"));
    }
}
