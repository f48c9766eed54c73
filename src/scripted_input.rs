use anyhow::{Context, Result};
use egui::{pos2, Pos2};
use serde::Deserialize;
use stashgrid_core::Interaction;
use std::{fs, path::Path};

#[derive(Debug, Deserialize)]
struct ScriptedInputFile {
    steps: Vec<ScriptedStepDef>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ScriptedAction {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScriptedStepDef {
    action: ScriptedAction,
    #[serde(default)]
    x: Option<f32>,
    #[serde(default)]
    y: Option<f32>,
    #[serde(default)]
    cell: Option<i64>,
}

/// Where a scripted press lands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepTarget {
    /// Screen position, resolved through the grid layout.
    Pointer(Pos2),
    /// Raw cell index, passed to the inventory as-is.
    Cell(i64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedStep {
    pub interaction: Interaction,
    pub target: StepTarget,
}

/// Ordered list of presses replayed against an inventory.
#[derive(Debug)]
pub struct ScriptedInputPlayer {
    steps: Vec<ScriptedStep>,
}

impl ScriptedInputPlayer {
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read scripted input {}", path.display()))?;
        Self::from_str(&contents)
            .with_context(|| format!("invalid scripted input {}", path.display()))
    }

    pub fn from_str(contents: &str) -> Result<Self> {
        let file: ScriptedInputFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("scripted input file contains no steps");
        }

        let steps = file
            .steps
            .into_iter()
            .enumerate()
            .map(|(position, def)| def.into_step(position))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[ScriptedStep] {
        &self.steps
    }
}

impl ScriptedStepDef {
    fn into_step(self, position: usize) -> Result<ScriptedStep> {
        let interaction = match self.action {
            ScriptedAction::Primary => Interaction::Primary,
            ScriptedAction::Secondary => Interaction::Secondary,
        };
        let target = match (self.x, self.y, self.cell) {
            (Some(x), Some(y), None) => StepTarget::Pointer(pos2(x, y)),
            (None, None, Some(cell)) => StepTarget::Cell(cell),
            (None, None, None) => {
                anyhow::bail!("step {position} needs either x/y or cell")
            }
            (_, _, Some(_)) => {
                anyhow::bail!("step {position} sets both a pointer position and a cell")
            }
            _ => anyhow::bail!("step {position} must set both x and y"),
        };
        Ok(ScriptedStep {
            interaction,
            target,
        })
    }
}
