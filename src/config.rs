use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use stashgrid_core::{InventoryConfig, ItemId, EMPTY};
use stashgrid_ui::GridLayout;
use std::{fs, path::Path};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/stashgrid.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub inventory: InventoryConfig,
    pub layout: GridLayout,
    /// Initial contents, placed in order through the hand.
    pub seed: Vec<SeedEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SeedEntry {
    pub cell: usize,
    pub item: ItemId,
    pub amount: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            inventory: InventoryConfig::default(),
            layout: GridLayout::default(),
            seed: vec![
                SeedEntry {
                    cell: 1,
                    item: 1,
                    amount: 10,
                },
                SeedEntry {
                    cell: 12,
                    item: 2,
                    amount: 10,
                },
            ],
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<AppConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    AppConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!("Config not found at {}. Using defaults", path.display());
                }
                AppConfig::default()
            }
        }
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    /// Reject configurations that parse but cannot drive an inventory.
    pub fn validate(&self) -> Result<()> {
        self.inventory
            .validate()
            .context("invalid [inventory] section")?;
        self.layout.validate().context("invalid [layout] section")?;
        for (position, entry) in self.seed.iter().enumerate() {
            if entry.cell >= self.inventory.cell_count {
                anyhow::bail!(
                    "seed entry {position} targets cell {} but the inventory has {} cells",
                    entry.cell,
                    self.inventory.cell_count
                );
            }
            if entry.item == EMPTY || entry.amount == 0 {
                anyhow::bail!(
                    "seed entry {position} places an empty stack (item {}, amount {})",
                    entry.item,
                    entry.amount
                );
            }
        }
        Ok(())
    }
}
