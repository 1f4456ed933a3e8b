use std::path::PathBuf;

use crate::types::EntityKind;

/// Record counts written by `--batch`, one file each.
pub const BATCH_COUNTS: [usize; 4] = [200, 300, 400, 500];

/// Where upstream references come from. Explicit IDs win over CSV files,
/// which win over IDs in a loaded config, which win over placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Upstream {
    pub account_ids: Vec<String>,
    pub account_csv: Option<PathBuf>,
    pub placeholder_accounts: bool,
    pub invoice_ids: Vec<String>,
    pub invoice_csv: Option<PathBuf>,
    pub placeholder_invoices: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateArgs {
    pub entity: EntityKind,
    pub count: Option<usize>,
    pub load_config: Option<PathBuf>,
    pub save_config: Option<PathBuf>,
    pub upstream: Upstream,
    pub multi_invoice: bool,
    pub payment_processors: Vec<String>,
    /// Accounts only: also write this many orders billed to the new accounts.
    pub with_orders: Option<usize>,
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
    pub default_attributes: bool,
}

impl GenerateArgs {
    #[must_use]
    pub fn new(entity: EntityKind) -> Self {
        Self {
            entity,
            count: None,
            load_config: None,
            save_config: None,
            upstream: Upstream::default(),
            multi_invoice: false,
            payment_processors: Vec::new(),
            with_orders: None,
            min_items: None,
            max_items: None,
            default_attributes: false,
        }
    }

    /// Settings used for each file of a batch run.
    #[must_use]
    pub fn batch_item(entity: EntityKind, count: usize) -> Self {
        let mut args = Self::new(entity);
        args.count = Some(count);
        args.default_attributes = true;
        args.upstream.placeholder_accounts = true;
        args.upstream.placeholder_invoices = true;
        args
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Generate(GenerateArgs),
    Batch { entity: EntityKind },
}

impl Command {
    #[must_use]
    pub fn entity(&self) -> EntityKind {
        match self {
            Command::Generate(args) => args.entity,
            Command::Batch { entity } => *entity,
        }
    }
}
