use bulkseed::cli::{self as prog_cli, Command, GenerateArgs, RunEnv, Upstream};
use bulkseed::errors::GenError;
use bulkseed::export;
use bulkseed::settings::AppSettings;
use bulkseed::summary::{self, OutputMode};
use bulkseed::types::EntityKind;
use bulkseed::logger;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bulkseed", version, about = "Fake CSV data for bulk-import testing", long_about = None)]
struct Cli {
    #[arg(long, global = true, help = "Directory for generated CSV files (default: downloads folder, else .)")]
    output_dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Path to a settings file (TOML)")]
    settings: Option<PathBuf>,
    #[arg(long, global = true, help = "Seed for reproducible output")]
    seed: Option<u64>,
    #[arg(long, global = true, default_value = "human", value_parser = ["human", "plain", "json"], help = "Summary output format")]
    format: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Generate customer/supplier accounts")]
    Accounts(EntityArgs),
    #[command(about = "Generate items")]
    Items(EntityArgs),
    #[command(about = "Generate blank inventory rows")]
    Inventory(EntityArgs),
    #[command(about = "Generate invoices with line items")]
    Invoices(EntityArgs),
    #[command(about = "Generate orders with line items")]
    Orders(EntityArgs),
    #[command(about = "Generate payments against invoices")]
    Payments(EntityArgs),
    #[command(about = "Generate purchase orders with line items")]
    PurchaseOrders(EntityArgs),
    #[command(about = "Generate purchase invoices with line items")]
    PurchaseInvoices(EntityArgs),
    #[command(about = "Generate purchase payments against purchase invoices")]
    PurchasePayments(EntityArgs),
}

#[derive(Args, Debug)]
struct EntityArgs {
    #[arg(help = "Number of records (default 200; purchase payments 100)")]
    count: Option<usize>,
    #[arg(long, help = "Write files of 200, 300, 400 and 500 records with placeholder references")]
    batch: bool,
    #[arg(long, num_args = 0..=1, value_name = "PATH", help = "Save the effective config as JSON")]
    save_config: Option<Option<PathBuf>>,
    #[arg(long, value_name = "PATH", help = "Load a JSON config saved earlier")]
    load_config: Option<PathBuf>,
    #[arg(long, help = "Comma-separated account IDs")]
    account_ids: Option<String>,
    #[arg(long, value_name = "PATH", help = "Account CSV to read account_id/account_currency from")]
    account_csv: Option<PathBuf>,
    #[arg(long, help = "Use generated placeholder account IDs when none are supplied")]
    placeholder_accounts: bool,
    #[arg(long, help = "Comma-separated invoice IDs for payments")]
    invoice_ids: Option<String>,
    #[arg(long, value_name = "PATH", help = "Invoice CSV to read invoice IDs from")]
    invoice_csv: Option<PathBuf>,
    #[arg(long, help = "Use generated placeholder invoice IDs when none are supplied")]
    placeholder_invoices: bool,
    #[arg(long, help = "Let one payment settle several invoices")]
    multi_invoice: bool,
    #[arg(long, help = "Comma-separated payment processors")]
    payment_processors: Option<String>,
    #[arg(long, value_name = "N", help = "Accounts only: also generate N orders for the new accounts")]
    with_orders: Option<usize>,
    #[arg(long, help = "Minimum line items per record")]
    min_items: Option<usize>,
    #[arg(long, help = "Maximum line items per record")]
    max_items: Option<usize>,
    #[arg(long, help = "Attach the stock custom attribute columns")]
    default_attributes: bool,
}

impl Commands {
    fn into_parts(self) -> (EntityKind, EntityArgs) {
        match self {
            Commands::Accounts(a) => (EntityKind::Account, a),
            Commands::Items(a) => (EntityKind::Item, a),
            Commands::Inventory(a) => (EntityKind::Inventory, a),
            Commands::Invoices(a) => (EntityKind::Invoice, a),
            Commands::Orders(a) => (EntityKind::Order, a),
            Commands::Payments(a) => (EntityKind::Payment, a),
            Commands::PurchaseOrders(a) => (EntityKind::PurchaseOrder, a),
            Commands::PurchaseInvoices(a) => (EntityKind::PurchaseInvoice, a),
            Commands::PurchasePayments(a) => (EntityKind::PurchasePayment, a),
        }
    }
}

fn to_command(entity: EntityKind, a: EntityArgs) -> Command {
    if a.batch {
        return Command::Batch { entity };
    }
    let list = |s: &Option<String>| s.as_deref().map(prog_cli::parse_list).unwrap_or_default();
    Command::Generate(GenerateArgs {
        entity,
        count: a.count,
        load_config: a.load_config,
        save_config: a.save_config.map(|p| p.unwrap_or_else(|| PathBuf::from(entity.default_config_file()))),
        upstream: Upstream {
            account_ids: list(&a.account_ids),
            account_csv: a.account_csv,
            placeholder_accounts: a.placeholder_accounts,
            invoice_ids: list(&a.invoice_ids),
            invoice_csv: a.invoice_csv,
            placeholder_invoices: a.placeholder_invoices,
        },
        multi_invoice: a.multi_invoice,
        payment_processors: list(&a.payment_processors),
        with_orders: a.with_orders,
        min_items: a.min_items,
        max_items: a.max_items,
        default_attributes: a.default_attributes,
    })
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let settings = match AppSettings::load(cli.settings.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) =
        logger::configure_logging(settings.log_dir.as_deref(), settings.log_level.as_deref(), settings.log_retention)
    {
        eprintln!("warning: file logging unavailable: {e}");
    }

    let mode = OutputMode::parse(&cli.format).unwrap_or(OutputMode::Human);
    let env = RunEnv { output_dir: cli.output_dir.unwrap_or_else(|| settings.output_dir()), seed: cli.seed };
    let (entity, args) = cli.command.into_parts();
    let cmd = to_command(entity, args);

    let out_dir = env.output_dir.clone();
    let task = tokio::task::spawn_blocking(move || prog_cli::run_with_format(cmd, &env, mode));
    tokio::select! {
        joined = task => match joined {
            Ok(Ok(_)) => {}
            Ok(Err(e @ GenError::ConfigLoad { .. })) => {
                eprintln!("ERROR: {e}");
                std::process::exit(1);
            }
            Ok(Err(e)) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
            Err(e) => {
                eprintln!("error: generation task failed: {e}");
                std::process::exit(1);
            }
        },
        _ = tokio::signal::ctrl_c() => {
            // exit skips destructors, so the pending temp file is removed by hand
            if let Err(e) = export::remove_stale_temp_files(&out_dir) {
                log::warn!("temp file cleanup failed: {e}");
            }
            println!("\n{}", summary::cancelled(entity));
            std::process::exit(0);
        }
    }
}
