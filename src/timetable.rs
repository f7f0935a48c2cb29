use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Fixed reference lists the timetable screens draw their dropdowns from.
/// Days are not part of the configuration; the week shape is the `Weekday`
/// enum. The time-slot list also fixes the utilization denominator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableConfig {
    pub time_slots: Vec<String>,
    pub rooms: Vec<String>,
    pub teachers: Vec<String>,
    pub classes: Vec<String>,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            time_slots: vec![
                "08:45 - 09:45".to_string(),
                "09:45 - 10:45".to_string(),
                "11:00 - 12:00".to_string(),
                "13:00 - 14:00".to_string(),
                "14:00 - 15:00".to_string(),
            ],
            rooms: vec!["DT1".to_string(), "DT2".to_string(), "DT3".to_string()],
            teachers: vec![
                "Mr Ahmed".to_string(),
                "Mrs Bell".to_string(),
                "Ms Clarke".to_string(),
                "Mr Osei".to_string(),
            ],
            classes: vec![
                "7A".to_string(),
                "7B".to_string(),
                "8A".to_string(),
                "8B".to_string(),
                "9A".to_string(),
            ],
        }
    }
}

impl TimetableConfig {
    pub fn has_time_slot(&self, time_range: &str) -> bool {
        self.time_slots.iter().any(|t| t == time_range)
    }
}

/// School days, in timetable order. Weekends are not schedulable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monday" => Some(Weekday::Monday),
            "tuesday" => Some(Weekday::Tuesday),
            "wednesday" => Some(Weekday::Wednesday),
            "thursday" => Some(Weekday::Thursday),
            "friday" => Some(Weekday::Friday),
            _ => None,
        }
    }
}

/// A single scheduled assignment of a class, teacher and room to one
/// `(day, timeRange)` cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub id: String,
    pub class: String,
    pub teacher: String,
    pub room: String,
}

/// Candidate field values for a slot write. Trimmed on entry; a blank
/// field anywhere makes the whole write a no-op.
#[derive(Debug, Clone)]
pub struct SlotInput {
    pub class: String,
    pub teacher: String,
    pub room: String,
}

impl SlotInput {
    pub fn new(class: &str, teacher: &str, room: &str) -> Self {
        Self {
            class: class.trim().to_string(),
            teacher: teacher.trim().to_string(),
            room: room.trim().to_string(),
        }
    }

    fn is_complete(&self) -> bool {
        !self.class.is_empty() && !self.teacher.is_empty() && !self.room.is_empty()
    }
}

/// Outcome of a slot write. Incomplete input is ignored, not rejected:
/// the editing surface disables submission rather than reporting errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotWrite {
    Applied { slot_id: String, replaced: bool },
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomFilter {
    All,
    Room(String),
}

impl RoomFilter {
    /// The filter control uses the literal "all" sentinel for no filtering.
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            RoomFilter::All
        } else {
            RoomFilter::Room(trimmed.to_string())
        }
    }
}

/// The full week of slots. Every weekday is always materialized, so a
/// filtered view shows unpopulated days as empty rather than missing.
/// Each `(day, timeRange)` cell holds at most one slot; writing to an
/// occupied cell overwrites it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timetable {
    days: BTreeMap<Weekday, BTreeMap<String, Slot>>,
}

impl Default for Timetable {
    fn default() -> Self {
        Self::new()
    }
}

impl Timetable {
    pub fn new() -> Self {
        let mut days = BTreeMap::new();
        for day in Weekday::ALL {
            days.insert(day, BTreeMap::new());
        }
        Self { days }
    }

    pub fn day(&self, day: Weekday) -> &BTreeMap<String, Slot> {
        // All five days exist from construction.
        &self.days[&day]
    }

    pub fn get(&self, day: Weekday, time_range: &str) -> Option<&Slot> {
        self.days[&day].get(time_range)
    }

    /// Inserts or silently overwrites the slot at `(day, time_range)`.
    /// Incomplete input (any blank field, including the time range) is a
    /// silent no-op.
    pub fn create_or_update(
        &mut self,
        day: Weekday,
        time_range: &str,
        input: SlotInput,
    ) -> SlotWrite {
        let time_range = time_range.trim();
        if time_range.is_empty() || !input.is_complete() {
            return SlotWrite::Ignored;
        }

        let slot = Slot {
            id: Uuid::new_v4().to_string(),
            class: input.class,
            teacher: input.teacher,
            room: input.room,
        };
        let slot_id = slot.id.clone();
        let replaced = self
            .days
            .get_mut(&day)
            .and_then(|cells| cells.insert(time_range.to_string(), slot))
            .is_some();
        SlotWrite::Applied { slot_id, replaced }
    }

    /// Removes the slot at `(day, time_range)` if present. Deleting an
    /// absent key leaves the table unchanged.
    pub fn delete(&mut self, day: Weekday, time_range: &str) -> bool {
        self.days
            .get_mut(&day)
            .map(|cells| cells.remove(time_range.trim()).is_some())
            .unwrap_or(false)
    }

    /// Room-filtered deep copy. `RoomFilter::All` copies everything; a
    /// specific room keeps only matching slots, with all days present.
    pub fn filter_by_room(&self, filter: &RoomFilter) -> Timetable {
        match filter {
            RoomFilter::All => self.clone(),
            RoomFilter::Room(room) => {
                let mut out = Timetable::new();
                for (day, cells) in &self.days {
                    for (time_range, slot) in cells {
                        if slot.room == *room {
                            if let Some(kept) = out.days.get_mut(day) {
                                kept.insert(time_range.clone(), slot.clone());
                            }
                        }
                    }
                }
                out
            }
        }
    }

    pub fn slot_count(&self) -> usize {
        self.days.values().map(|cells| cells.len()).sum()
    }

    pub fn iter_slots(&self) -> impl Iterator<Item = (Weekday, &str, &Slot)> {
        self.days.iter().flat_map(|(day, cells)| {
            cells
                .iter()
                .map(move |(time_range, slot)| (*day, time_range.as_str(), slot))
        })
    }
}
