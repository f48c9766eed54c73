use crate::config::AppConfig;
use crate::scripted_input::{ScriptedInputPlayer, ScriptedStep, StepTarget};
use anyhow::{Context, Result};
use serde::Serialize;
use stashgrid_core::{Cell, Interaction, Inventory, Transition};
use stashgrid_testkit::{EventRecord, JsonlSink};
use stashgrid_ui::GridLayout;
use std::path::PathBuf;
use tracing::{debug, info};

pub struct HeadlessConfig {
    pub app: AppConfig,
    pub scripted_input: Option<PathBuf>,
    pub event_log: Option<PathBuf>,
    pub print_state: bool,
}

/// Tally of a replay.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Steps the inventory accepted.
    pub applied: usize,
    /// Steps that hit a cell but were refused.
    pub rejected: usize,
    /// Pointer steps that missed every cell.
    pub unresolved: usize,
}

#[derive(Debug, Serialize)]
struct StepPayload {
    interaction: Interaction,
    #[serde(skip_serializing_if = "Option::is_none")]
    cell_index: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transition: Option<Transition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cell: Option<Cell>,
    hand: Cell,
}

pub fn run(cfg: HeadlessConfig) -> Result<RunReport> {
    cfg.app.validate()?;
    let mut inventory = build_inventory(&cfg.app)?;

    let script = cfg
        .scripted_input
        .as_deref()
        .map(ScriptedInputPlayer::from_path)
        .transpose()?;
    let mut sink = cfg.event_log.as_deref().map(JsonlSink::create).transpose()?;

    let report = match &script {
        Some(script) => replay(
            &mut inventory,
            &cfg.app.layout,
            script.steps(),
            sink.as_mut(),
        )?,
        None => RunReport::default(),
    };
    if let Some(sink) = sink.as_mut() {
        sink.flush()?;
    }

    info!(
        applied = report.applied,
        rejected = report.rejected,
        unresolved = report.unresolved,
        total = inventory.total_amount(),
        "replay finished"
    );
    if cfg.print_state {
        println!("{inventory}");
    }
    Ok(report)
}

/// Build the configured inventory and place its seed stacks.
pub fn build_inventory(app: &AppConfig) -> Result<Inventory> {
    let inventory = Inventory::with_config(app.inventory)?;
    inventory
        .seeded(
            app.seed
                .iter()
                .map(|entry| (entry.cell, entry.item, entry.amount)),
        )
        .context("failed to seed inventory")
}

/// Apply scripted steps in order, logging one event per step.
pub fn replay(
    inventory: &mut Inventory,
    layout: &GridLayout,
    steps: &[ScriptedStep],
    mut sink: Option<&mut JsonlSink>,
) -> Result<RunReport> {
    let mut report = RunReport::default();

    for (step, scripted) in steps.iter().enumerate() {
        let interaction = scripted.interaction;
        let target = match scripted.target {
            StepTarget::Pointer(pos) => layout
                .cell_at(pos, inventory.cell_count())
                .map(|index| index as i64),
            StepTarget::Cell(raw) => Some(raw),
        };

        let (kind, payload) = match target {
            None => {
                debug!(step, %interaction, "scripted press missed the grid");
                report.unresolved += 1;
                let payload = StepPayload {
                    interaction,
                    cell_index: None,
                    transition: None,
                    error: None,
                    cell: None,
                    hand: *inventory.hand(),
                };
                ("unresolved", payload)
            }
            Some(raw) => {
                let result = match usize::try_from(raw) {
                    Ok(index) => inventory
                        .interact(interaction, index)
                        .map_err(|err| err.to_string()),
                    Err(_) => Err(format!(
                        "cell index {raw} out of range (inventory has {} cells)",
                        inventory.cell_count()
                    )),
                };
                let cell = usize::try_from(raw)
                    .ok()
                    .and_then(|index| inventory.cell(index).copied());
                let kind = match &result {
                    Ok(_) => {
                        report.applied += 1;
                        "applied"
                    }
                    Err(err) => {
                        debug!(step, %interaction, cell = raw, %err, "scripted press rejected");
                        report.rejected += 1;
                        "rejected"
                    }
                };
                let (transition, error) = match result {
                    Ok(transition) => (Some(transition), None),
                    Err(err) => (None, Some(err)),
                };
                let payload = StepPayload {
                    interaction,
                    cell_index: Some(raw),
                    transition,
                    error,
                    cell,
                    hand: *inventory.hand(),
                };
                (kind, payload)
            }
        };

        if let Some(sink) = sink.as_deref_mut() {
            sink.write(&EventRecord {
                step,
                kind,
                payload,
            })?;
        }
    }

    Ok(report)
}
