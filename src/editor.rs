use crate::timetable::{Slot, SlotInput, Weekday};

/// Form fields for the slot editor. Everything is a raw string until
/// submission; the submit control stays disabled while any field is blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotForm {
    pub day: String,
    pub time_range: String,
    pub class: String,
    pub teacher: String,
    pub room: String,
}

impl SlotForm {
    pub fn is_complete(&self) -> bool {
        !self.day.trim().is_empty()
            && !self.time_range.trim().is_empty()
            && !self.class.trim().is_empty()
            && !self.teacher.trim().is_empty()
            && !self.room.trim().is_empty()
    }

    /// Named-field patch; unknown names are rejected so the UI cannot
    /// silently drop a typo.
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), String> {
        let target = match field {
            "day" => &mut self.day,
            "timeRange" => &mut self.time_range,
            "class" => &mut self.class,
            "teacher" => &mut self.teacher,
            "room" => &mut self.room,
            _ => return Err(format!("unknown form field: {}", field)),
        };
        *target = value.to_string();
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Creating,
    Editing { day: Weekday, time_range: String },
}

/// Slot editor lifecycle: closed -> open(creating) -> closed, or
/// closed -> open(editing, target) -> closed. Submission and cancel both
/// clear the form and the edit target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorState {
    #[default]
    Closed,
    Open { mode: EditorMode, form: SlotForm },
}

/// What a completed submission hands back to the slot store.
#[derive(Debug, Clone)]
pub struct Submission {
    pub day: Weekday,
    pub time_range: String,
    pub input: SlotInput,
}

impl EditorState {
    pub fn open_create(&mut self) {
        *self = EditorState::Open {
            mode: EditorMode::Creating,
            form: SlotForm::default(),
        };
    }

    /// Opens the editor over an existing slot, pre-populating the form
    /// from the slot's fields plus the key it was found at.
    pub fn open_edit(&mut self, day: Weekday, time_range: &str, slot: &Slot) {
        *self = EditorState::Open {
            mode: EditorMode::Editing {
                day,
                time_range: time_range.to_string(),
            },
            form: SlotForm {
                day: day.as_str().to_string(),
                time_range: time_range.to_string(),
                class: slot.class.clone(),
                teacher: slot.teacher.clone(),
                room: slot.room.clone(),
            },
        };
    }

    pub fn is_open(&self) -> bool {
        matches!(self, EditorState::Open { .. })
    }

    pub fn form_mut(&mut self) -> Option<&mut SlotForm> {
        match self {
            EditorState::Open { form, .. } => Some(form),
            EditorState::Closed => None,
        }
    }

    pub fn can_submit(&self) -> bool {
        match self {
            EditorState::Open { form, .. } => form.is_complete(),
            EditorState::Closed => false,
        }
    }

    /// Consumes the open editor into a store submission. With an incomplete
    /// form this returns `None` and the editor stays open; the UI's
    /// disabled submit control cannot fire, so there is nothing to report.
    /// The form's day string must already have been validated by the caller.
    pub fn submit(&mut self, day: Weekday) -> Option<Submission> {
        let EditorState::Open { form, .. } = self else {
            return None;
        };
        if !form.is_complete() {
            return None;
        }
        let submission = Submission {
            day,
            time_range: form.time_range.trim().to_string(),
            input: SlotInput::new(&form.class, &form.teacher, &form.room),
        };
        *self = EditorState::Closed;
        Some(submission)
    }

    /// Closes the editor and discards the form. No-op when already closed.
    pub fn cancel(&mut self) {
        *self = EditorState::Closed;
    }
}
