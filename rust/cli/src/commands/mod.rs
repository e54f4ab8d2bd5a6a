//! Command handlers, one module per subcommand.
//!
//! Every handler follows the same pattern:
//!
//! - `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) passed in, never taken from the process
//! - Errors propagated as `CliError`; [`crate::run`] turns them into exit codes

pub mod cfg;
pub mod deal;
pub mod play;
pub mod shoe;
pub mod sim;
pub mod stats;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use play::{handle_play_command, PlayOptions};
pub use shoe::handle_shoe_command;
pub use sim::handle_sim_command;
pub use stats::handle_stats_command;
