mod decode;
mod events;
mod exit;
mod output;
mod process;
mod run;
pub mod types;

pub use decode::decode_output_bytes;
pub use events::RunnerEvent;
pub use exit::normalize_exit;
pub use output::{drop_truncated_guesses, NO_HIDDEN_DATA_NOTICE, NO_OUTPUT_NOTICE};
pub use run::{run_session, RunSessionArgs, CHAIN_STOPPED, PROCESS_KILLED};
pub use types::{JobResult, JobStatus, RunOutcome, RunState};
