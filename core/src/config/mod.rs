mod load;
mod types;

pub use load::{
    load_default, load_from_dir, parse_key_values, read_key_values, SETTINGS_FILE,
    TOOL_HELP_FILE, TOOL_PATHS_FILE,
};
pub use types::*;
