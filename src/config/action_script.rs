use crate::core::slot_map::SlotMap;
use crate::core::transition::Action;
use crate::domain::model::SlotKey;
use crate::utils::error::{CurriculumError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 可序列化的編輯動作，用於重播一段編輯紀錄
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptedAction {
    AddYear,
    DeleteYear { year: u32 },
    AddSemester { year: u32 },
    DeleteSemester { year: u32, semester: u32 },
    PlaceCourse { slot: SlotKey, code: String },
    RemoveCourse { year: u32, semester: u32, code: String },
    Replace { slots: SlotMap },
}

impl From<ScriptedAction> for Action {
    fn from(value: ScriptedAction) -> Self {
        match value {
            ScriptedAction::AddYear => Action::AddYear,
            ScriptedAction::DeleteYear { year } => Action::DeleteYear { year },
            ScriptedAction::AddSemester { year } => Action::AddSemester { year },
            ScriptedAction::DeleteSemester { year, semester } => {
                Action::DeleteSemester { year, semester }
            }
            ScriptedAction::PlaceCourse { slot, code } => Action::PlaceCourse { slot, code },
            ScriptedAction::RemoveCourse {
                year,
                semester,
                code,
            } => Action::RemoveCourse {
                year,
                semester,
                code,
            },
            ScriptedAction::Replace { slots } => Action::replace(slots),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionScript {
    #[serde(default)]
    pub actions: Vec<ScriptedAction>,
}

impl ActionScript {
    /// 依副檔名決定 TOML 或 JSON
    pub fn parse(name: &str, content: &str) -> Result<Self> {
        let script = match Path::new(name).extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(content)?,
            _ => Self::from_toml_str(content)?,
        };
        tracing::debug!("Loaded {} actions from {}", script.actions.len(), name);
        Ok(script)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let script: Self =
            toml::from_str(content).map_err(|e| CurriculumError::ConfigValidationError {
                field: "actions".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;
        script.check()?;
        Ok(script)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let script: Self = serde_json::from_str(content)?;
        script.check()?;
        Ok(script)
    }

    /// 年度與學期編號必須從 1 開始
    fn check(&self) -> Result<()> {
        for (index, action) in self.actions.iter().enumerate() {
            let numbers: Vec<u32> = match action {
                ScriptedAction::DeleteYear { year } | ScriptedAction::AddSemester { year } => {
                    vec![*year]
                }
                ScriptedAction::DeleteSemester { year, semester }
                | ScriptedAction::RemoveCourse { year, semester, .. } => vec![*year, *semester],
                ScriptedAction::PlaceCourse { slot, .. } => vec![slot.year, slot.semester],
                ScriptedAction::AddYear | ScriptedAction::Replace { .. } => Vec::new(),
            };

            if numbers.contains(&0) {
                return Err(CurriculumError::ScriptError {
                    index,
                    message: "year and semester numbers start at 1".to_string(),
                });
            }

            if let ScriptedAction::PlaceCourse { code, .. } | ScriptedAction::RemoveCourse { code, .. } =
                action
            {
                if code.trim().is_empty() {
                    return Err(CurriculumError::ScriptError {
                        index,
                        message: "course code cannot be empty".to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn into_actions(self) -> impl Iterator<Item = Action> {
        self.actions.into_iter().map(Action::from)
    }
}
