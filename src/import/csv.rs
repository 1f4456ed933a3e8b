//! Upstream IDs read back from previously generated CSV files.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::errors::GenError;
use crate::generators::AccountRef;

/// Trim, drop the spreadsheet tab guard, and skip blanks.
fn clean(field: &str) -> Option<String> {
    let v = field.trim().trim_start_matches('\t').trim();
    if v.is_empty() { None } else { Some(v.to_string()) }
}

/// Distinct non-empty values of `column`, in file order.
///
/// # Errors
/// Returns [`GenError::InvalidConfig`] when the header has no such column and
/// [`GenError::Csv`] on malformed input.
pub fn read_ids<R: Read>(reader: R, column: &str) -> Result<Vec<String>, GenError> {
    let mut rdr = ::csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let idx = rdr
        .headers()?
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| GenError::InvalidConfig(format!("column '{column}' not found")))?;
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        if let Some(v) = rec.get(idx).and_then(clean)
            && seen.insert(v.clone())
        {
            out.push(v);
        }
    }
    Ok(out)
}

/// [`read_ids`] over a file.
///
/// # Errors
/// Returns [`GenError::Io`] if the file cannot be opened, else see [`read_ids`].
pub fn load_ids_from_csv(path: &Path, column: &str) -> Result<Vec<String>, GenError> {
    let ids = read_ids(File::open(path)?, column)?;
    log::info!("import: {} distinct '{}' values from {}", ids.len(), column, path.display());
    Ok(ids)
}

/// Accounts from an account CSV: `account_id` plus `account_currency` when present.
///
/// # Errors
/// Same as [`load_ids_from_csv`].
pub fn load_account_refs(path: &Path) -> Result<Vec<AccountRef>, GenError> {
    let mut rdr = ::csv::ReaderBuilder::new().flexible(true).from_reader(File::open(path)?);
    let headers = rdr.headers()?.clone();
    let find = |name: &str| headers.iter().position(|h| h.trim() == name);
    let id_idx = find("account_id")
        .ok_or_else(|| GenError::InvalidConfig(format!("{}: column 'account_id' not found", path.display())))?;
    let cur_idx = find("account_currency");
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let Some(id) = rec.get(id_idx).and_then(clean) else { continue };
        if !seen.insert(id.clone()) {
            continue;
        }
        let currency = cur_idx.and_then(|i| rec.get(i)).and_then(clean);
        out.push(AccountRef { id, currency });
    }
    log::info!("import: {} accounts from {}", out.len(), path.display());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_trimmed_deduped_and_unguarded() {
        let data = "payment_id,invoice_id\n1, CSV-INV-1 \n2,\"\tCSV-INV-2\"\n3,CSV-INV-1\n4,\n";
        let ids = read_ids(data.as_bytes(), "invoice_id").unwrap();
        assert_eq!(ids, vec!["CSV-INV-1", "CSV-INV-2"]);
    }

    #[test]
    fn missing_column_is_reported() {
        let err = read_ids("a,b\n1,2\n".as_bytes(), "invoice_id").unwrap_err();
        assert!(matches!(err, GenError::InvalidConfig(_)));
    }

    #[test]
    fn account_refs_carry_currency() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "account_id,account_currency\nA1,USD\nA2,\nA1,AUD\n").unwrap();
        let refs = load_account_refs(tmp.path()).unwrap();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0], AccountRef { id: "A1".into(), currency: Some("USD".into()) });
        assert_eq!(refs[1].currency, None);
    }
}
