use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::PathBuf;

use super::command::{BATCH_COUNTS, Command, GenerateArgs};
use crate::config::{load_generation_config, save_generation_config};
use crate::context::GenContext;
use crate::dataset::Dataset;
use crate::errors::GenError;
use crate::export::export_dataset;
use crate::fanout;
use crate::generators::payment::{PaymentConfig, PaymentKind};
use crate::generators::{
    AccountRef, account, inventory, invoice, item, order, payment, purchase_invoice, purchase_order,
};
use crate::ids::{self, AccountRole};
use crate::import;
use crate::summary::{BATCH_FOOTER, BATCH_HEADER, OutputMode, RunSummary};
use crate::types::EntityKind;

/// Process-level inputs shared by every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunEnv {
    pub output_dir: PathBuf,
    pub seed: Option<u64>,
}

/// Config plumbing common to every entity's option bag.
trait EntityConfig: Serialize + DeserializeOwned + Default {
    fn count(&self) -> Option<usize>;
    fn set_count(&mut self, n: usize);
    fn with_defaults(self, entity: EntityKind) -> Self;
}

macro_rules! entity_config {
    ($ty:ty, $field:ident) => {
        impl EntityConfig for $ty {
            fn count(&self) -> Option<usize> {
                self.$field
            }
            fn set_count(&mut self, n: usize) {
                self.$field = Some(n);
            }
            fn with_defaults(self, _entity: EntityKind) -> Self {
                self.with_default_attributes()
            }
        }
    };
}

entity_config!(account::AccountConfig, account_count);
entity_config!(item::ItemConfig, item_count);
entity_config!(invoice::InvoiceConfig, invoice_count);
entity_config!(order::OrderConfig, order_count);
entity_config!(purchase_order::PurchaseOrderConfig, purchase_order_count);
entity_config!(purchase_invoice::PurchaseInvoiceConfig, purchase_invoice_count);

impl EntityConfig for inventory::InventoryConfig {
    fn count(&self) -> Option<usize> {
        self.row_count
    }
    fn set_count(&mut self, n: usize) {
        self.row_count = Some(n);
    }
    fn with_defaults(self, _entity: EntityKind) -> Self {
        self
    }
}

impl EntityConfig for PaymentConfig {
    fn count(&self) -> Option<usize> {
        self.payment_count
    }
    fn set_count(&mut self, n: usize) {
        self.payment_count = Some(n);
    }
    fn with_defaults(self, entity: EntityKind) -> Self {
        self.with_default_attributes(payment_kind(entity))
    }
}

fn payment_kind(entity: EntityKind) -> PaymentKind {
    if entity == EntityKind::PurchasePayment { PaymentKind::Purchase } else { PaymentKind::Sale }
}

fn prepare<C: EntityConfig>(args: &GenerateArgs) -> Result<C, GenError> {
    match &args.load_config {
        Some(path) => load_generation_config(path)
            .map_err(|e| GenError::ConfigLoad { path: path.display().to_string(), reason: e.to_string() }),
        None if args.default_attributes => Ok(C::default().with_defaults(args.entity)),
        None => Ok(C::default()),
    }
}

/// Resolve the record count and write the effective config when asked to.
/// A failed save is reported and generation goes on.
fn settle<C: EntityConfig>(cfg: &mut C, args: &GenerateArgs) -> usize {
    let count = args.count.or(cfg.count()).unwrap_or(args.entity.default_count());
    cfg.set_count(count);
    if let Some(path) = &args.save_config {
        match save_generation_config(path, &*cfg) {
            Ok(()) => log::info!("run: configuration saved to {}", path.display()),
            Err(e) => {
                log::warn!("run: could not save config to {}: {}", path.display(), e);
                eprintln!("Warning: could not save config to {}: {e}", path.display());
            }
        }
    }
    count
}

fn apply_range(items: &mut fanout::ItemConfig, args: &GenerateArgs) {
    if args.min_items.is_some() {
        items.min_items = args.min_items;
    }
    if args.max_items.is_some() {
        items.max_items = args.max_items;
    }
}

fn resolve_accounts(
    args: &GenerateArgs,
    cfg_ids: &[String],
    role: AccountRole,
    fallback: bool,
    ctx: &mut GenContext,
) -> Result<Vec<AccountRef>, GenError> {
    let up = &args.upstream;
    if up.account_ids.is_empty()
        && let Some(path) = &up.account_csv
    {
        return import::load_account_refs(path);
    }
    let refs = AccountRef::from_ids(cfg_ids);
    if !refs.is_empty() {
        return Ok(refs);
    }
    if up.placeholder_accounts || fallback {
        log::warn!("run: no accounts supplied for {}; using placeholder IDs", args.entity);
        return Ok(AccountRef::from_ids(&ids::placeholder_accounts(ctx, role)));
    }
    Ok(Vec::new())
}

fn resolve_invoices(
    args: &GenerateArgs,
    cfg: &PaymentConfig,
    kind: PaymentKind,
    ctx: &mut GenContext,
) -> Result<Vec<String>, GenError> {
    if !cfg.invoice_ids.is_empty() {
        return Ok(cfg.invoice_ids.clone());
    }
    if let Some(path) = &cfg.invoice_csv_path {
        let column = match kind {
            PaymentKind::Sale => "invoice_id",
            PaymentKind::Purchase => "purchase_invoice_id",
        };
        return import::load_ids_from_csv(path, column);
    }
    if args.upstream.placeholder_invoices {
        log::warn!("run: no invoices supplied for {}; using placeholder IDs", args.entity);
        return Ok(kind.placeholder_invoices(ctx));
    }
    Ok(Vec::new())
}

fn write(ds: &Dataset, env: &RunEnv, ctx: &GenContext) -> Result<RunSummary, GenError> {
    let report = export_dataset(ds, &env.output_dir, ctx.now)?;
    Ok(RunSummary::for_dataset(ds, report.path, report.rows))
}

fn generate(args: &GenerateArgs, env: &RunEnv, ctx: &mut GenContext) -> Result<Vec<RunSummary>, GenError> {
    let ds = match args.entity {
        EntityKind::Account => {
            let mut cfg: account::AccountConfig = prepare(args)?;
            if let Some(n) = args.with_orders {
                cfg.order_config.generate_orders = true;
                cfg.order_config.order_count = Some(n);
            }
            let count = settle(&mut cfg, args);
            let accounts = account::generate(&cfg, count, ctx)?;
            let mut out = vec![write(&accounts, env, ctx)?];
            if let Some(orders) = account::chained_orders(&cfg, &accounts, ctx)? {
                out.push(write(&orders, env, ctx)?);
            }
            return Ok(out);
        }
        EntityKind::Item => {
            let mut cfg: item::ItemConfig = prepare(args)?;
            let count = settle(&mut cfg, args);
            item::generate(&cfg, count, ctx)?
        }
        EntityKind::Inventory => {
            let mut cfg: inventory::InventoryConfig = prepare(args)?;
            let count = settle(&mut cfg, args);
            inventory::generate(&cfg, count)
        }
        EntityKind::Invoice => {
            let mut cfg: invoice::InvoiceConfig = prepare(args)?;
            apply_range(&mut cfg.item_config, args);
            if !args.upstream.account_ids.is_empty() {
                cfg.account_ids = args.upstream.account_ids.clone();
            }
            let count = settle(&mut cfg, args);
            let accounts = resolve_accounts(args, &cfg.account_ids, AccountRole::Customer, true, ctx)?;
            invoice::generate(&cfg, count, &accounts, ctx)?
        }
        EntityKind::Order => {
            let mut cfg: order::OrderConfig = prepare(args)?;
            apply_range(&mut cfg.item_config, args);
            if !args.upstream.account_ids.is_empty() {
                cfg.account_ids = args.upstream.account_ids.clone();
            }
            let count = settle(&mut cfg, args);
            let accounts = resolve_accounts(args, &cfg.account_ids, AccountRole::Customer, false, ctx)?;
            order::generate(&cfg, count, &accounts, ctx)?
        }
        EntityKind::PurchaseOrder => {
            let mut cfg: purchase_order::PurchaseOrderConfig = prepare(args)?;
            apply_range(&mut cfg.item_config, args);
            if !args.upstream.account_ids.is_empty() {
                cfg.account_ids = args.upstream.account_ids.clone();
            }
            let count = settle(&mut cfg, args);
            let accounts = resolve_accounts(args, &cfg.account_ids, AccountRole::Supplier, true, ctx)?;
            purchase_order::generate(&cfg, count, &accounts, ctx)?
        }
        EntityKind::PurchaseInvoice => {
            let mut cfg: purchase_invoice::PurchaseInvoiceConfig = prepare(args)?;
            apply_range(&mut cfg.item_config, args);
            if !args.upstream.account_ids.is_empty() {
                cfg.account_ids = args.upstream.account_ids.clone();
            }
            let count = settle(&mut cfg, args);
            let accounts = resolve_accounts(args, &cfg.account_ids, AccountRole::Supplier, true, ctx)?;
            purchase_invoice::generate(&cfg, count, &accounts, ctx)?
        }
        EntityKind::Payment | EntityKind::PurchasePayment => {
            let kind = payment_kind(args.entity);
            let mut cfg: PaymentConfig = prepare(args)?;
            let up = &args.upstream;
            if !up.invoice_ids.is_empty() {
                cfg.invoice_ids = up.invoice_ids.clone();
            } else if let Some(path) = &up.invoice_csv {
                cfg.invoice_ids.clear();
                cfg.invoice_csv_path = Some(path.clone());
            }
            if args.multi_invoice {
                cfg.multi_invoice_enabled = true;
            }
            if !args.payment_processors.is_empty() {
                cfg.payment_processors = args.payment_processors.clone();
            }
            let count = settle(&mut cfg, args);
            let pool = resolve_invoices(args, &cfg, kind, ctx)?;
            payment::generate(&cfg, kind, count, &pool, ctx)?
        }
    };
    Ok(vec![write(&ds, env, ctx)?])
}

/// Run a command without printing anything; returns one summary per written file.
///
/// # Errors
/// Returns the first generation, import or export failure.
pub fn execute(cmd: Command, env: &RunEnv) -> Result<Vec<RunSummary>, GenError> {
    let mut ctx = GenContext::from_seed(env.seed);
    log::info!("run: {:?} into {}", cmd, env.output_dir.display());
    match cmd {
        Command::Generate(args) => generate(&args, env, &mut ctx),
        Command::Batch { entity } => {
            let mut out = Vec::new();
            for count in BATCH_COUNTS {
                out.extend(generate(&GenerateArgs::batch_item(entity, count), env, &mut ctx)?);
            }
            Ok(out)
        }
    }
}

/// [`execute`] and print each summary in `mode`.
///
/// # Errors
/// See [`execute`].
pub fn run_with_format(cmd: Command, env: &RunEnv, mode: OutputMode) -> Result<Vec<RunSummary>, GenError> {
    let batch = matches!(cmd, Command::Batch { .. });
    if batch && mode == OutputMode::Human {
        println!("{BATCH_HEADER}");
    }
    let summaries = execute(cmd, env)?;
    for s in &summaries {
        println!("{}", s.render(mode));
    }
    if batch && mode == OutputMode::Human {
        println!("{BATCH_FOOTER}");
    }
    Ok(summaries)
}

/// [`run_with_format`] with human output.
///
/// # Errors
/// See [`execute`].
pub fn run(cmd: Command, env: &RunEnv) -> Result<Vec<RunSummary>, GenError> {
    run_with_format(cmd, env, OutputMode::Human)
}
