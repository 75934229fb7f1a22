use crate::core::catalog::Catalog;
use crate::domain::model::{Course, SlotKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Slot key -> ordered course codes. The whole editing state of a curriculum.
///
/// Keys are typed, so a malformed `"<year>-<semester>"` string can never live
/// inside a map; the lenient `Deserialize` impl drops such keys at the
/// boundary instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotMap {
    slots: BTreeMap<SlotKey, Vec<String>>,
}

impl SlotMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 建立空白格子：`years` 年 × `semesters` 學期，全部沒有課程
    pub fn empty_grid(years: u32, semesters: u32) -> Self {
        let slots = (1..=years)
            .flat_map(|year| (1..=semesters).map(move |semester| SlotKey::new(year, semester)))
            .map(|key| (key, Vec::new()))
            .collect();
        Self { slots }
    }

    /// 依照每門課自己的 year/semester 分組；同一格內的 code 只加入一次
    pub fn from_courses(courses: &[Course]) -> Self {
        let mut map = Self::new();
        for course in courses {
            let codes = map.slots.entry(course.slot_key()).or_default();
            if !codes.contains(&course.code) {
                codes.push(course.code.clone());
            }
        }
        map
    }

    /// Flattens the map back into course records placed at their slot.
    ///
    /// Codes the catalog cannot resolve are skipped, the same way the
    /// projections skip them.
    pub fn to_courses(&self, catalog: &Catalog) -> Vec<Course> {
        self.slots
            .iter()
            .flat_map(|(key, codes)| codes.iter().map(move |code| (key, code)))
            .filter_map(|(key, code)| {
                let mut course = catalog.get(code)?.clone();
                course.year = key.year;
                course.semester = key.semester;
                Some(course)
            })
            .collect()
    }

    pub fn get(&self, key: &SlotKey) -> Option<&[String]> {
        self.slots.get(key).map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: &SlotKey) -> bool {
        self.slots.contains_key(key)
    }

    pub fn insert(&mut self, key: SlotKey, codes: Vec<String>) -> Option<Vec<String>> {
        self.slots.insert(key, codes)
    }

    pub(crate) fn slot_mut(&mut self, key: SlotKey) -> &mut Vec<String> {
        self.slots.entry(key).or_default()
    }

    pub(crate) fn existing_slot_mut(&mut self, key: &SlotKey) -> Option<&mut Vec<String>> {
        self.slots.get_mut(key)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&SlotKey, &mut Vec<String>)> {
        self.slots.iter_mut()
    }

    /// Iterates slots in `(year, semester)` order.
    pub fn iter(&self) -> impl Iterator<Item = (&SlotKey, &Vec<String>)> {
        self.slots.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &SlotKey> {
        self.slots.keys()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// 目前最大的年度，沒有任何格子時為 0
    pub fn max_year(&self) -> u32 {
        self.slots.keys().map(|key| key.year).max().unwrap_or(0)
    }

    /// 某年度目前最大的學期，該年度沒有格子時為 0
    pub fn max_semester(&self, year: u32) -> u32 {
        self.semesters_of(year).max().unwrap_or(0)
    }

    pub fn has_year(&self, year: u32) -> bool {
        self.slots.keys().any(|key| key.year == year)
    }

    pub fn semesters_of(&self, year: u32) -> impl Iterator<Item = u32> + '_ {
        self.slots
            .keys()
            .filter(move |key| key.year == year)
            .map(|key| key.semester)
    }

    /// First slot (in key order) holding `code`.
    pub fn slot_of(&self, code: &str) -> Option<SlotKey> {
        self.slots
            .iter()
            .find(|(_, codes)| codes.iter().any(|c| c == code))
            .map(|(key, _)| *key)
    }

    /// Codes that sit in more than one slot, with every slot holding them.
    pub fn duplicate_placements(&self) -> Vec<(String, Vec<SlotKey>)> {
        let mut seen: BTreeMap<&str, Vec<SlotKey>> = BTreeMap::new();
        for (key, codes) in &self.slots {
            let unique: BTreeSet<&str> = codes.iter().map(String::as_str).collect();
            for code in unique {
                seen.entry(code).or_default().push(*key);
            }
        }

        seen.into_iter()
            .filter(|(_, keys)| keys.len() > 1)
            .map(|(code, keys)| (code.to_string(), keys))
            .collect()
    }

    /// Years whose semester numbers are not exactly `1..=N`.
    pub fn semester_gaps(&self) -> Vec<u32> {
        let mut by_year: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
        for key in self.slots.keys() {
            by_year.entry(key.year).or_default().push(key.semester);
        }

        by_year
            .into_iter()
            .filter(|(_, semesters)| {
                semesters
                    .iter()
                    .enumerate()
                    .any(|(i, semester)| *semester as usize != i + 1)
            })
            .map(|(year, _)| year)
            .collect()
    }
}

impl FromIterator<(SlotKey, Vec<String>)> for SlotMap {
    fn from_iter<I: IntoIterator<Item = (SlotKey, Vec<String>)>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().collect(),
        }
    }
}

impl Serialize for SlotMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.slots.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SlotMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = HashMap::<String, Vec<String>>::deserialize(deserializer)?;
        let mut slots = BTreeMap::new();

        for (raw_key, codes) in raw {
            match raw_key.parse::<SlotKey>() {
                Ok(key) => {
                    slots.insert(key, codes);
                }
                Err(e) => {
                    tracing::warn!("⚠️ Skipping malformed slot key: {}", e);
                }
            }
        }

        Ok(Self { slots })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::CourseCategory;

    fn course(code: &str, year: u32, semester: u32) -> Course {
        Course {
            id: code.to_lowercase(),
            code: code.to_string(),
            name: format!("{} name", code),
            prerequisite: None,
            corequisite: None,
            category: CourseCategory::Core,
            department: "CS".to_string(),
            units: 3,
            year,
            semester,
        }
    }

    #[test]
    fn test_empty_grid_has_every_slot() {
        let map = SlotMap::empty_grid(4, 3);
        assert_eq!(map.len(), 12);
        assert!(map.iter().all(|(_, codes)| codes.is_empty()));
        assert_eq!(map.max_year(), 4);
        assert_eq!(map.max_semester(2), 3);
        assert_eq!(map.max_semester(9), 0);
    }

    #[test]
    fn test_from_courses_groups_and_dedups() {
        let courses = vec![
            course("A", 1, 1),
            course("B", 1, 1),
            course("A", 1, 1),
            course("C", 2, 3),
        ];
        let map = SlotMap::from_courses(&courses);

        assert_eq!(map.len(), 2);
        assert_eq!(
            map.get(&SlotKey::new(1, 1)),
            Some(&["A".to_string(), "B".to_string()][..])
        );
        assert_eq!(map.get(&SlotKey::new(2, 3)), Some(&["C".to_string()][..]));
    }

    #[test]
    fn test_to_courses_uses_slot_placement_and_skips_unknown() {
        let catalog = Catalog::new(vec![course("A", 1, 1), course("B", 1, 2)]).unwrap();
        let map: SlotMap = [
            (SlotKey::new(3, 2), vec!["A".to_string(), "GHOST".to_string()]),
            (SlotKey::new(1, 1), vec!["B".to_string()]),
        ]
        .into_iter()
        .collect();

        let flattened = map.to_courses(&catalog);
        assert_eq!(flattened.len(), 2);
        assert_eq!(flattened[0].code, "B");
        assert_eq!((flattened[0].year, flattened[0].semester), (1, 1));
        assert_eq!(flattened[1].code, "A");
        assert_eq!((flattened[1].year, flattened[1].semester), (3, 2));
    }

    #[test]
    fn test_invariant_reports() {
        let map: SlotMap = [
            (SlotKey::new(1, 1), vec!["A".to_string()]),
            (SlotKey::new(1, 3), vec!["A".to_string()]),
            (SlotKey::new(2, 1), vec![]),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            map.duplicate_placements(),
            vec![("A".to_string(), vec![SlotKey::new(1, 1), SlotKey::new(1, 3)])]
        );
        assert_eq!(map.semester_gaps(), vec![1]);
        assert_eq!(map.slot_of("A"), Some(SlotKey::new(1, 1)));
        assert_eq!(map.slot_of("Z"), None);
    }

    #[test]
    fn test_deserialize_skips_malformed_keys() {
        let map: SlotMap = serde_json::from_value(serde_json::json!({
            "1-1": ["A"],
            "oops": ["B"],
            "NaN-2": [],
            "2-1": []
        }))
        .unwrap();

        assert_eq!(map.len(), 2);
        assert!(map.contains_key(&SlotKey::new(1, 1)));
        assert!(map.contains_key(&SlotKey::new(2, 1)));
    }

    #[test]
    fn test_serializes_with_string_keys() {
        let map: SlotMap = [(SlotKey::new(1, 2), vec!["A".to_string()])]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json, serde_json::json!({ "1-2": ["A"] }));
    }
}
