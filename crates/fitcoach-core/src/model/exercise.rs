use serde::{Deserialize, Serialize};

/// An alternate (easier or harder) variant of a base exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modification {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub video_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub tips: String,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub modification: Option<Modification>,
}

impl Exercise {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            instructions: String::new(),
            tips: String::new(),
            video_url: None,
            modification: None,
        }
    }

    pub fn with_modification(mut self, name: impl Into<String>) -> Self {
        self.modification = Some(Modification {
            name: name.into(),
            description: String::new(),
            video_url: None,
        });
        self
    }
}

/// One exercise slot inside a block, with per-slot overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockExercise {
    pub exercise: Exercise,
    /// Unique within a block; defines display and progression order.
    pub order: u32,
    #[serde(default)]
    pub reps: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub rest: Option<String>,
    #[serde(default)]
    pub tips: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
}

impl BlockExercise {
    pub fn new(exercise: Exercise, order: u32) -> Self {
        Self {
            exercise,
            order,
            reps: None,
            duration: None,
            rest: None,
            tips: None,
            instructions: None,
        }
    }

    /// Name to show for this slot.
    ///
    /// The modification's name is used only when `show_modified` is set and
    /// the exercise actually has a modification.
    pub fn display_name(&self, show_modified: bool) -> &str {
        match (&self.exercise.modification, show_modified) {
            (Some(modification), true) => &modification.name,
            _ => &self.exercise.name,
        }
    }

    /// Slot-level instructions win over the exercise's own.
    pub fn instructions(&self) -> &str {
        self.instructions
            .as_deref()
            .unwrap_or(&self.exercise.instructions)
    }

    pub fn tips(&self) -> &str {
        self.tips.as_deref().unwrap_or(&self.exercise.tips)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_uses_modification_only_when_flagged() {
        let slot = BlockExercise::new(Exercise::named("Push-up").with_modification("Knee push-up"), 1);
        assert_eq!(slot.display_name(false), "Push-up");
        assert_eq!(slot.display_name(true), "Knee push-up");
    }

    #[test]
    fn display_name_falls_back_without_modification() {
        let slot = BlockExercise::new(Exercise::named("Burpee"), 1);
        assert_eq!(slot.display_name(true), "Burpee");
    }

    #[test]
    fn slot_overrides_take_precedence() {
        let mut exercise = Exercise::named("Squat");
        exercise.tips = "Knees out".into();
        let mut slot = BlockExercise::new(exercise, 1);
        assert_eq!(slot.tips(), "Knees out");
        slot.tips = Some("Pause at bottom".into());
        assert_eq!(slot.tips(), "Pause at bottom");
    }

    #[test]
    fn deserializes_camel_case_payload() {
        let json = r#"{
            "exercise": {
                "name": "Row",
                "videoUrl": "https://videos.example/row.mp4",
                "modification": {"name": "Band row"}
            },
            "order": 2,
            "reps": "12"
        }"#;
        let slot: BlockExercise = serde_json::from_str(json).unwrap();
        assert_eq!(slot.order, 2);
        assert_eq!(slot.reps.as_deref(), Some("12"));
        assert_eq!(slot.display_name(true), "Band row");
    }
}
