//! Customer and supplier accounts with address, contact and payment method blocks.
//!
//! Account IDs and names are unique within a batch. The CSV header is regrouped
//! so account fields lead, followed by group, custom attributes, address,
//! payment methods and contacts.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::{AccountRef, GroupConfig, TaxConfig, fakes, order, pick, pick_owned, sample_rows};
use crate::attributes::{self, CustomAttributeSpec, RadioOptions, ValueStyle};
use crate::context::GenContext;
use crate::dataset::Dataset;
use crate::errors::GenError;
use crate::ids::{self, AccountRole, UniqueIds};
use crate::types::{EntityKind, Row};

pub const ATTR_PREFIX: &str = "ca_account_attr_";
pub const MAX_CONTACTS: usize = 5;
pub const MAX_ADDRESS_LINES: usize = 5;
const UNIQUE_ATTEMPTS: usize = 100;

const COMPANY_TYPES: [&str; 8] =
    ["Pty Ltd", "Inc", "Corp", "Group", "Solutions", "Services", "Technologies", "Enterprises"];
const COMPANY_PREFIXES: [&str; 8] = ["Global", "Prime", "Elite", "Summit", "Apex", "Vertex", "Nexus", "Quantum"];
const INDUSTRIES: [&str; 8] =
    ["Tech", "Logistics", "Financial", "Consulting", "Marketing", "Digital", "Industrial", "Trading"];

const DESCRIPTIONS: [&str; 15] = [
    "Configurable empowering challenge",
    "Right-sized high-level groupware",
    "Innovative scalable solution",
    "Enterprise-grade platform",
    "Customer-focused service excellence",
    "Advanced technology integration",
    "Streamlined business operations",
    "Comprehensive management system",
    "Strategic business solutions",
    "Next-generation digital platform",
    "Robust infrastructure services",
    "Integrated business intelligence",
    "Flexible enterprise architecture",
    "Optimized workflow automation",
    "Cutting-edge innovation hub",
];

const ACCOUNT_TYPES: [&str; 3] = ["CUSTOMER", "SUPPLIER", "CUSTOMER_AND_SUPPLIER"];
const CURRENCIES: [&str; 2] = ["AUD", "USD"];
const TIME_ZONES: [&str; 8] = [
    "Australia/Melbourne",
    "Africa/Abidjan",
    "America/Costa Rica",
    "America/Dawson",
    "Europe/Warsaw",
    "Europe/Rome",
    "Asia/Kuwait",
    "Asia/Kuala Lumpur",
];
const MODES: [&str; 2] = ["AUTOMATIC", "MANUAL"];
const CHANNELS: [&str; 4] = ["EMAIL", "POSTAL_EMAIL", "TEXT_MESSAGE", "VOICE_MAIL"];
const YES_NO: [&str; 2] = ["YES", "NO"];
const YES_NO_BLANK: [&str; 3] = ["YES", "NO", ""];
const BILLING_STARTS: [&str; 5] = [
    "DAY_OF_MONTH",
    "RATING_START_DATE",
    "SUBSCRIPTION_START_DATE",
    "SUBSCRIPTION_ACTIVATION_DATE",
    "SUBSCRIPTION_ACCEPTANCE_DATE",
];
const PAYMENT_TERMS: [&str; 8] =
    ["Due on Receipt", "Net 7", "Net 14", "Net 15", "Net 21", "Net 30", "Net 60", "Net 90"];
const INVOICE_TERMS: [&str; 8] =
    ["Billing Start Date", "Net 7", "Net 14", "Net 15", "Net 21", "Net 30", "Net 60", "Net 90"];
const EMAIL_EXTENSIONS: [&str; 3] = [".com.au", ".net.au", ".org.au"];

const SALUTATIONS: [&str; 9] = ["Mr.", "Mrs.", "Ms.", "Dr.", "Prof.", "Master", "Sir", "Frau", "Fraulein"];
const DESIGNATIONS: [&str; 17] = [
    "Analyst",
    "Accountant",
    "Integrator",
    "Investor",
    "Partner",
    "Reseller",
    "Supplier",
    "Vendor",
    "Consultant",
    "Developer",
    "Customer Service Manager",
    "Marketing Manager",
    "Sales Manager",
    "CEO",
    "Director",
    "Vice President",
    "Other",
];
const UNIT_TYPES: [&str; 3] = ["Apt.", "Unit", "Suite"];
const LINE3: [&str; 6] = ["", "Business Park", "Industrial Estate", "Corporate Centre", "Technology Park", "Office Tower"];
const LINE5: [&str; 5] = ["", "CBD", "Business District", "Commercial Area", "City Centre"];

const CONTACT_FIELDS: [&str; 20] = [
    "salutation",
    "designation",
    "first_name",
    "middle_name",
    "last_name",
    "email_address",
    "email_address_do_not_email",
    "address_line_1",
    "address_line_2",
    "address_line_3",
    "address_line_4",
    "address_line_5",
    "post_code",
    "phone",
    "phone_do_not_call",
    "fax",
    "fax_do_not_call",
    "mobile",
    "mobile_do_not_call",
    "receive_billing_information",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressConfig {
    pub line_count: usize,
}

impl Default for AddressConfig {
    fn default() -> Self {
        Self { line_count: 1 }
    }
}

/// Stored payment methods per account: DIRECT_DEBIT (`dd`) and OTHER (`ot`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentMethodConfig {
    pub dd_count: usize,
    pub ot_count: usize,
    pub dd_processor: String,
    pub ot_processor: String,
    /// Per-slot OTHER processors; slots past the end reuse the last entry.
    pub ot_processors: Vec<String>,
}

impl PaymentMethodConfig {
    fn other_processor(&self, slot: usize) -> String {
        match self.ot_processors.get(slot - 1).or(self.ot_processors.last()) {
            Some(p) => p.clone(),
            None => self.ot_processor.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountingConfig {
    pub use_accounting_code: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountFormConfig {
    pub form_names: Vec<String>,
    /// Share of rows, 0-100, that get a custom form.
    pub assign_percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamConfig {
    pub team_names: Vec<String>,
}

/// Optional order file built from the generated accounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainedOrders {
    pub generate_orders: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_count: Option<usize>,
    pub contact_count: usize,
    pub custom_attributes: Vec<CustomAttributeSpec>,
    pub account_address_config: AddressConfig,
    pub payment_config: PaymentMethodConfig,
    pub tax_config: TaxConfig,
    pub accounting_config: AccountingConfig,
    pub group_config: GroupConfig,
    pub custom_form_config: AccountFormConfig,
    pub user_team_config: TeamConfig,
    pub order_config: ChainedOrders,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            account_count: None,
            contact_count: MAX_CONTACTS,
            custom_attributes: Vec::new(),
            account_address_config: AddressConfig::default(),
            payment_config: PaymentMethodConfig::default(),
            tax_config: TaxConfig::default(),
            accounting_config: AccountingConfig::default(),
            group_config: GroupConfig::default(),
            custom_form_config: AccountFormConfig::default(),
            user_team_config: TeamConfig::default(),
            order_config: ChainedOrders::default(),
        }
    }
}

impl AccountConfig {
    #[must_use]
    pub fn with_default_attributes(mut self) -> Self {
        self.custom_attributes = attributes::default_set(ATTR_PREFIX, RadioOptions::Numbered);
        self
    }
}

/// Generate `count` accounts.
///
/// # Errors
/// Currently infallible; the `Result` keeps the signature in line with the other generators.
pub fn generate(cfg: &AccountConfig, count: usize, ctx: &mut GenContext) -> Result<Dataset, GenError> {
    let contacts = cfg.contact_count.clamp(1, MAX_CONTACTS);
    let address_lines = cfg.account_address_config.line_count.clamp(1, MAX_ADDRESS_LINES);
    let grouped = cfg.group_config.rows(count, ctx);
    let forms = &cfg.custom_form_config;
    let with_form = if forms.form_names.is_empty() || forms.assign_percent <= 0.0 {
        Default::default()
    } else {
        // truncating share, at least one row
        let share = (count as f64 * forms.assign_percent / 100.0) as usize;
        sample_rows(count, share.max(1), ctx)
    };
    let style = ValueStyle::account(count);
    let mut account_ids = UniqueIds::new(UNIQUE_ATTEMPTS);
    let mut names = UniqueIds::new(UNIQUE_ATTEMPTS);
    let mut ds = Dataset::new(EntityKind::Account, count);

    for i in 0..count {
        let id = account_ids
            .try_draw(ctx, |c| {
                let role = if c.rng.random_bool(0.5) { AccountRole::Customer } else { AccountRole::Supplier };
                ids::account_id(c, role)
            })
            .ok_or_else(|| {
                GenError::InvalidConfig(format!("account ID space exhausted after {} unique IDs", account_ids.len()))
            })?;
        let name = names.draw(ctx, account_name);
        let domain = name_to_domain(&name, &EMAIL_EXTENSIONS, ctx);
        let website = name_to_domain(&name, &[".com"], ctx);

        let mut row = Row::new();
        account_fields(&mut row, cfg, &id, &name, &domain, &website, ctx);
        if cfg.accounting_config.use_accounting_code && ctx.chance(0.7) {
            row.set("account_accounting_code", pick(ctx, &super::invoice::ACCOUNTING_CODES));
        }
        if grouped.contains(&i) {
            row.set("account_group", pick_owned(ctx, &cfg.group_config.group_names));
        }
        if with_form.contains(&i) {
            row.set("account_custom_form", pick_owned(ctx, &forms.form_names));
        }
        if !cfg.user_team_config.team_names.is_empty() {
            row.set("account_user_team", pick_owned(ctx, &cfg.user_team_config.team_names));
        }

        address_fields(&mut row, address_lines, ctx);
        for slot in 1..=contacts {
            contact_fields(&mut row, slot, &domain, ctx);
        }
        payment_methods(&mut row, &cfg.payment_config, &id, &name, ctx);
        attributes::apply(&mut row, &cfg.custom_attributes, &style, ctx);
        ds.rows.push(row);

        if (i + 1) % 50 == 0 {
            log::debug!("account: generated {}/{} records", i + 1, count);
        }
    }

    ds.column_order = ds.grouped_columns(&[
        &|c: &str| c.starts_with("account_") && c != "account_group",
        &|c: &str| c == "account_group",
        &|c: &str| c.starts_with(ATTR_PREFIX),
        &|c: &str| c.starts_with("address_"),
        &|c: &str| c.starts_with("payment_method_"),
        &|c: &str| c.starts_with("contact_") || c.starts_with("ca_contact_"),
    ]);
    ds.date_columns = attributes::date_columns(&cfg.custom_attributes).collect();
    log::info!("account: generated {} accounts ({} unique ids)", ds.len(), account_ids.len());
    Ok(ds)
}

/// Orders billed to freshly generated accounts, when the config asks for them.
///
/// Uses the stock order config with default attribute sets. Order currency
/// follows each account's currency.
///
/// # Errors
/// Propagates [`order::generate`] failures, e.g. when `accounts` is empty.
pub fn chained_orders(cfg: &AccountConfig, accounts: &Dataset, ctx: &mut GenContext) -> Result<Option<Dataset>, GenError> {
    if !cfg.order_config.generate_orders {
        return Ok(None);
    }
    let count = cfg.order_config.order_count.unwrap_or(accounts.record_count).max(1);
    let refs = AccountRef::from_dataset(accounts);
    let order_cfg = order::OrderConfig::default().with_default_attributes();
    order::generate(&order_cfg, count, &refs, ctx).map(Some)
}

fn account_name(ctx: &mut GenContext) -> String {
    if !ctx.chance(0.6) {
        return fakes::person_name(&mut ctx.rng);
    }
    if ctx.chance(0.5) {
        format!("{} {} {}", pick(ctx, &COMPANY_PREFIXES), pick(ctx, &INDUSTRIES), pick(ctx, &COMPANY_TYPES))
    } else {
        fakes::company(&mut ctx.rng)
    }
}

/// Lowercased, hyphenated name with legal suffixes stripped, plus a random extension.
fn name_to_domain(name: &str, extensions: &[&str], ctx: &mut GenContext) -> String {
    let mut domain = name
        .to_lowercase()
        .replace(' ', "-")
        .replace('&', "and")
        .replace([',', '\'', '.'], "");
    for legal in ["pty-ltd", "inc", "corp"] {
        domain = domain.replace(legal, "");
    }
    format!("{}{}", domain.trim_matches('-'), pick(ctx, extensions))
}

fn profile_slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "").replace('&', "and").replace(',', "")
}

/// "1st of The Month" .. "30th of The Month", or "End of the Month".
fn billing_day(ctx: &mut GenContext) -> String {
    let day = ctx.rng.random_range(1..=31u32);
    if day == 31 {
        return "End of the Month".to_string();
    }
    let suffix = match day {
        1 | 21 => "st",
        2 | 22 => "nd",
        3 | 23 => "rd",
        _ => "th",
    };
    format!("{day}{suffix} of The Month")
}

fn billing_period(ctx: &mut GenContext) -> String {
    // 1 Day, 1 Week, 1-12 Month, 1-10 Year
    match ctx.rng.random_range(0..24usize) {
        0 => "1 Day".to_string(),
        1 => "1 Week".to_string(),
        n @ 2..=13 => format!("{} Month", n - 1),
        n => format!("{} Year", n - 13),
    }
}

fn account_fields(
    row: &mut Row,
    cfg: &AccountConfig,
    id: &str,
    name: &str,
    domain: &str,
    website: &str,
    ctx: &mut GenContext,
) {
    let slug = profile_slug(name);
    let k = ctx.rng.random_range(1..=CHANNELS.len());
    let channels: Vec<&str> = CHANNELS.choose_multiple(&mut ctx.rng, k).copied().collect();
    let billing_start = pick(ctx, &BILLING_STARTS);
    let day_of_month = if billing_start == "DAY_OF_MONTH" { billing_day(ctx) } else { String::new() };

    row.set("account_status", "ACTIVE");
    row.set("account_id", id);
    row.set("account_name", name);
    row.set("account_display_name", name);
    row.set("account_type", pick(ctx, &ACCOUNT_TYPES));
    row.set("account_description", pick(ctx, &DESCRIPTIONS));
    row.set("account_origin", "");
    row.set("account_email_address", format!("info@{domain}"));
    row.set("account_currency", pick(ctx, &CURRENCIES));
    row.set("account_time_zone", pick(ctx, &TIME_ZONES));
    row.set("account_website", format!("https://{website}"));
    row.set("account_tax", "");
    row.set("account_tax_code", pick_owned(ctx, &cfg.tax_config.tax_codes));
    row.set("account_tax_rate", "");
    row.set("account_invoice_mode", pick(ctx, &MODES));
    row.set("account_communication_preference", channels.join(","));
    row.set("account_linkedin", format!("https://www.linkedin.com/in/{slug}"));
    row.set("account_twitter", format!("https://x.com/{slug}"));
    row.set("account_facebook", format!("https://www.facebook.com/{slug}"));
    row.set("account_consolidate_invoice", pick(ctx, &YES_NO));
    row.set("account_payment_mode", pick(ctx, &MODES));
    row.set("account_billing_start_date", billing_start);
    row.set("account_billing_start_day_of_month", day_of_month);
    row.set("account_payment_term", pick(ctx, &PAYMENT_TERMS));
    row.set("account_invoice_term", pick(ctx, &INVOICE_TERMS));
    row.set("account_billing_period", billing_period(ctx));
}

fn street_line(ctx: &mut GenContext) -> String {
    let street = fakes::street_address(&mut ctx.rng);
    if ctx.chance(0.6) {
        format!("{} {} {street}", pick(ctx, &UNIT_TYPES), ctx.rng.random_range(1..=999))
    } else {
        street
    }
}

fn second_line(ctx: &mut GenContext) -> String {
    if ctx.chance(0.5) {
        return String::new();
    }
    match ctx.rng.random_range(0..4) {
        0 => format!("Apt. {}", ctx.rng.random_range(1..=999)),
        1 => format!("Suite {}", ctx.rng.random_range(100..=999)),
        2 => format!("Unit {}", ctx.rng.random_range(1..=99)),
        _ => format!("{}/", ctx.rng.random_range(1..=999)),
    }
}

/// Five address lines; the first is always a street line.
fn address_lines(ctx: &mut GenContext) -> [String; 5] {
    let line1 = street_line(ctx);
    let line2 = second_line(ctx);
    let line3 = pick(ctx, &LINE3);
    let line4 = match ctx.rng.random_range(0..5) {
        0 => String::new(),
        1 => format!("Level {}", ctx.rng.random_range(1..=25)),
        2 => format!("Building {}", pick(ctx, &["A", "B", "C", "D"])),
        3 => "North Wing".to_string(),
        _ => "South Wing".to_string(),
    };
    let line5 = pick(ctx, &LINE5);
    [line1, line2, line3, line4, line5]
}

fn postcode(ctx: &mut GenContext) -> String {
    ctx.rng.random_range(2000..=9999u32).to_string()
}

fn landline(ctx: &mut GenContext) -> String {
    format!(
        "0{} {} {}",
        ctx.rng.random_range(2..=8),
        ctx.rng.random_range(1000..=9999),
        ctx.rng.random_range(1000..=9999)
    )
}

fn mobile(ctx: &mut GenContext) -> String {
    format!(
        "04{:02} {} {}",
        ctx.rng.random_range(0..=99),
        ctx.rng.random_range(100..=999),
        ctx.rng.random_range(100..=999)
    )
}

fn address_fields(row: &mut Row, populated: usize, ctx: &mut GenContext) {
    for (idx, line) in address_lines(ctx).into_iter().enumerate() {
        let value = if idx < populated { line } else { String::new() };
        row.set(format!("address_1_address_line_{}", idx + 1), value);
    }
    row.set("address_1_post_code", postcode(ctx));
    row.set("address_1_city", fakes::city(&mut ctx.rng));
    row.set("address_1_state", fakes::state(&mut ctx.rng));
    row.set("address_1_country", "Australia");
    row.set("address_1_is_default_billing", "YES");
    row.set("address_1_is_default_shipping", "YES");
}

fn contact_fields(row: &mut Row, slot: usize, domain: &str, ctx: &mut GenContext) {
    let first = fakes::first_name(&mut ctx.rng);
    let last = fakes::last_name(&mut ctx.rng);
    let middle = if ctx.chance(0.3) { fakes::first_name(&mut ctx.rng) } else { String::new() };
    let local = format!("{first}.{last}").to_lowercase().replace(' ', ".");
    let lines = address_lines(ctx);

    let mut values: Vec<String> = vec![
        pick(ctx, &SALUTATIONS),
        pick(ctx, &DESIGNATIONS),
        first,
        middle,
        last,
        format!("{local}@{domain}"),
        pick(ctx, &YES_NO_BLANK),
    ];
    values.extend(lines);
    values.push(postcode(ctx));
    values.push(landline(ctx));
    values.push(pick(ctx, &YES_NO_BLANK));
    values.push(landline(ctx));
    values.push(pick(ctx, &YES_NO_BLANK));
    values.push(mobile(ctx));
    values.push(pick(ctx, &YES_NO_BLANK));
    values.push(pick(ctx, &YES_NO_BLANK));

    for (field, value) in CONTACT_FIELDS.iter().zip(values) {
        row.set(format!("contact_{slot}_{field}"), value);
    }
}

fn payment_methods(row: &mut Row, cfg: &PaymentMethodConfig, id: &str, name: &str, ctx: &mut GenContext) {
    for slot in 1..=cfg.dd_count {
        let p = format!("payment_method_dd_{slot}_");
        row.set(format!("{p}processor_type"), "DIRECT_DEBIT");
        row.set(format!("{p}is_default"), if slot == 1 { "YES" } else { "NO" });
        row.set(format!("{p}bsb_number"), ctx.rng.random_range(100_000..=999_999u32).to_string());
        row.set(format!("{p}account_name"), name);
        row.set(format!("{p}account_number"), ctx.rng.random_range(100_000_000..=999_999_999u32).to_string());
        row.set(format!("{p}processor"), cfg.dd_processor.as_str());
        row.set(format!("{p}reference"), format!("{id}-DD{slot}"));
    }
    for slot in 1..=cfg.ot_count {
        let p = format!("payment_method_ot_{slot}_");
        row.set(format!("{p}processor_type"), "OTHER");
        row.set(format!("{p}is_default"), if slot == 1 { "YES" } else { "NO" });
        row.set(format!("{p}processor"), cfg.other_processor(slot));
        row.set(format!("{p}reference"), format!("{id}-OT{slot}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use regex::Regex;
    use std::collections::HashSet;

    fn ctx(seed: u64) -> GenContext {
        let now = NaiveDate::from_ymd_opt(2024, 7, 10).and_then(|d| d.and_hms_opt(12, 0, 0)).unwrap();
        GenContext::seeded(seed, now)
    }

    #[test]
    fn ids_and_names_are_unique_and_well_formed() {
        let mut c = ctx(1);
        let ds = generate(&AccountConfig::default(), 120, &mut c).unwrap();
        let re = Regex::new(r"^CSV-ACC-\d{5}-(CUS|SUP)$").unwrap();
        let ids: HashSet<String> = ds.rows.iter().map(|r| r.text("account_id")).collect();
        let names: HashSet<String> = ds.rows.iter().map(|r| r.text("account_name")).collect();
        assert_eq!(ids.len(), 120);
        assert_eq!(names.len(), 120);
        assert!(ids.iter().all(|id| re.is_match(id)));
    }

    #[test]
    fn contact_and_address_counts_are_clamped() {
        let mut c = ctx(2);
        let cfg = AccountConfig {
            contact_count: 9,
            account_address_config: AddressConfig { line_count: 2 },
            ..AccountConfig::default()
        };
        let ds = generate(&cfg, 5, &mut c).unwrap();
        let row = &ds.rows[0];
        assert!(row.contains("contact_5_mobile"));
        assert!(!row.contains("contact_6_mobile"));
        assert_eq!(row.text("address_1_address_line_3"), "");
        assert_eq!(row.text("address_1_address_line_4"), "");
        assert!(!row.text("address_1_address_line_1").is_empty());
    }

    #[test]
    fn header_is_grouped() {
        let mut c = ctx(3);
        let cfg = AccountConfig {
            payment_config: PaymentMethodConfig { dd_count: 1, ..PaymentMethodConfig::default() },
            group_config: GroupConfig { group_names: vec!["VIP".into()], assign_count: 2 },
            ..AccountConfig::default()
        }
        .with_default_attributes();
        let ds = generate(&cfg, 4, &mut c).unwrap();
        let header = ds.header();
        let pos = |name: &str| header.iter().position(|h| h == name).unwrap();
        assert!(pos("account_billing_period") < pos("account_group"));
        assert!(pos("account_group") < pos("ca_account_attr_CA_BOOL"));
        assert!(pos("ca_account_attr_CA_TEXT") < pos("address_1_address_line_1"));
        assert!(pos("address_1_is_default_shipping") < pos("payment_method_dd_1_processor_type"));
        assert!(pos("payment_method_dd_1_reference") < pos("contact_1_salutation"));
        assert_eq!(ds.rows.iter().filter(|r| r.text("account_group") == "VIP").count(), 2);
    }

    #[test]
    fn other_processors_reuse_the_last_entry() {
        let cfg = PaymentMethodConfig {
            ot_count: 3,
            ot_processors: vec!["Stripe".into(), "PayPal".into()],
            ..PaymentMethodConfig::default()
        };
        assert_eq!(cfg.other_processor(1), "Stripe");
        assert_eq!(cfg.other_processor(3), "PayPal");
        let single = PaymentMethodConfig { ot_processor: "Manual".into(), ..PaymentMethodConfig::default() };
        assert_eq!(single.other_processor(2), "Manual");
    }

    #[test]
    fn billing_day_only_for_day_of_month() {
        let mut c = ctx(4);
        let ds = generate(&AccountConfig::default(), 60, &mut c).unwrap();
        for row in &ds.rows {
            let day = row.text("account_billing_start_day_of_month");
            if row.text("account_billing_start_date") == "DAY_OF_MONTH" {
                assert!(day.ends_with("of The Month") || day == "End of the Month");
            } else {
                assert!(day.is_empty());
            }
        }
    }

    #[test]
    fn domain_strips_legal_suffix() {
        let mut c = ctx(5);
        assert_eq!(name_to_domain("Apex Tech Pty Ltd", &[".com"], &mut c), "apex-tech.com");
        assert_eq!(name_to_domain("Smith & Sons, Corp.", &[".com"], &mut c), "smith-and-sons.com");
    }

    #[test]
    fn chained_orders_follow_account_currency() {
        let mut c = ctx(6);
        let cfg = AccountConfig {
            order_config: ChainedOrders { generate_orders: true, order_count: Some(15) },
            ..AccountConfig::default()
        };
        let accounts = generate(&cfg, 10, &mut c).unwrap();
        let orders = chained_orders(&cfg, &accounts, &mut c).unwrap().unwrap();
        let currency_of = |id: &str| {
            accounts.rows.iter().find(|r| r.text("account_id") == id).map(|r| r.text("account_currency"))
        };
        for row in orders.rows.iter().filter(|r| !r.text("order_currency").is_empty()) {
            assert_eq!(Some(row.text("order_currency")), currency_of(&row.text("order_account_id")));
        }
        assert_eq!(orders.record_count, 15);
    }

    #[test]
    fn no_chained_orders_unless_requested() {
        let mut c = ctx(7);
        let accounts = generate(&AccountConfig::default(), 3, &mut c).unwrap();
        assert!(chained_orders(&AccountConfig::default(), &accounts, &mut c).unwrap().is_none());
    }
}
