use crate::timetable::{Timetable, Weekday};
use serde::Serialize;
use std::collections::HashSet;

/// Weekly roll-up over the current timetable. Recomputed fresh on every
/// request; nothing here is cached or tracked over time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    pub total_slots: usize,
    pub distinct_rooms: usize,
    pub distinct_teachers: usize,
    pub per_day: Vec<DayCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCount {
    pub day: &'static str,
    pub slots: usize,
}

/// Percentage of the room's weekly capacity that is scheduled, rounded to
/// the nearest integer. The denominator is the fixed reference capacity
/// (`days x configured time slots`), not the populated cell count.
pub fn room_utilization(table: &Timetable, time_slot_count: usize, room: &str) -> i64 {
    let capacity = Weekday::ALL.len() * time_slot_count;
    if capacity == 0 {
        return 0;
    }
    let used = table
        .iter_slots()
        .filter(|(_, _, slot)| slot.room == room)
        .count();
    ((used as f64 / capacity as f64) * 100.0).round() as i64
}

/// Number of slots across the week taught by `teacher` (exact string match).
pub fn teacher_workload(table: &Timetable, teacher: &str) -> usize {
    table
        .iter_slots()
        .filter(|(_, _, slot)| slot.teacher == teacher)
        .count()
}

pub fn weekly_summary(table: &Timetable) -> WeeklySummary {
    let mut rooms = HashSet::new();
    let mut teachers = HashSet::new();
    for (_, _, slot) in table.iter_slots() {
        rooms.insert(slot.room.as_str());
        teachers.insert(slot.teacher.as_str());
    }

    let per_day: Vec<DayCount> = Weekday::ALL
        .iter()
        .map(|day| DayCount {
            day: day.as_str(),
            slots: table.day(*day).len(),
        })
        .collect();

    WeeklySummary {
        total_slots: per_day.iter().map(|d| d.slots).sum(),
        distinct_rooms: rooms.len(),
        distinct_teachers: teachers.len(),
        per_day,
    }
}
