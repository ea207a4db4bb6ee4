use stegsuite_core::api::{ToolHandler, ToolId};

use crate::handlers::{
    BinwalkHandler, HashcatHandler, HexdumpHandler, JstegHandler, PngcheckHandler,
    SteghideHandler, StegseekHandler, StegsnowHandler, ZstegHandler,
};

pub fn build_handler(tool: ToolId) -> Box<dyn ToolHandler> {
    match tool {
        ToolId::Binwalk => Box::new(BinwalkHandler),
        ToolId::Zsteg => Box::new(ZstegHandler),
        ToolId::Pngcheck => Box::new(PngcheckHandler),
        ToolId::Steghide => Box::new(SteghideHandler),
        ToolId::Stegseek => Box::new(StegseekHandler),
        ToolId::Jsteg => Box::new(JstegHandler),
        ToolId::Stegsnow => Box::new(StegsnowHandler),
        ToolId::Hexdump => Box::new(HexdumpHandler),
        ToolId::Hashcat => Box::new(HashcatHandler),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tool_has_a_handler() {
        for id in ToolId::ALL {
            assert_eq!(build_handler(id).tool(), id);
        }
    }
}
