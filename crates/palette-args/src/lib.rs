//! Non-interactive command generator: for each catalog tool,
//! build a `clap` sub-command with one flag per schema property, and
//! parse the matched flags back into the same `FormValues` draft shape
//! the interactive form editors produce — so both front ends funnel
//! through the single `values_to_args` choke point.

mod command;
mod parse;

pub use command::build_subcommand;
pub use parse::matches_to_args;
