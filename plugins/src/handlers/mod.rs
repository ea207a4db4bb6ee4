//! One [`ToolHandler`] per tool.
//!
//! Handlers only ask questions and compose commands. Any abandoned prompt is
//! propagated with `?` and becomes `Command::Cancelled` in `ToolHandler::build`.
//!
//! [`ToolHandler`]: stegsuite_core::api::ToolHandler

mod binwalk;
mod hashcat;
mod hexdump;
mod jsteg;
mod pngcheck;
mod steghide;
mod stegseek;
mod stegsnow;
mod zsteg;

pub use binwalk::BinwalkHandler;
pub use hashcat::HashcatHandler;
pub use hexdump::HexdumpHandler;
pub use jsteg::JstegHandler;
pub use pngcheck::PngcheckHandler;
pub use steghide::SteghideHandler;
pub use stegseek::StegseekHandler;
pub use stegsnow::StegsnowHandler;
pub use zsteg::ZstegHandler;

use std::path::Path;

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
