mod csv;

pub use self::csv::{load_account_refs, load_ids_from_csv, read_ids};
