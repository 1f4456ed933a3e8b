mod command;
mod runner;
mod util;

pub use command::{BATCH_COUNTS, Command, GenerateArgs, Upstream};
pub use runner::{RunEnv, execute, run, run_with_format};
pub use util::parse_list;
