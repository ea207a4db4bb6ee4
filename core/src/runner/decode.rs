use encoding_rs::Encoding;

/// Decodes captured tool output.
///
/// `STEGSUITE_OUTPUT_ENCODING` forces an encoding label; otherwise a BOM wins,
/// then strict UTF-8, then lossy UTF-8.
pub fn decode_output_bytes(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return String::new();
    }

    if let Ok(label) = std::env::var("STEGSUITE_OUTPUT_ENCODING") {
        if let Some(enc) = Encoding::for_label(label.trim().as_bytes()) {
            tracing::debug!(encoding = enc.name(), bytes = bytes.len(), "forced output encoding");
            let (cow, _, _) = enc.decode(bytes);
            return cow.into_owned();
        }
    }

    if let Some((enc, bom_len)) = Encoding::for_bom(bytes) {
        tracing::debug!(encoding = enc.name(), bytes = bytes.len(), "detected BOM");
        let (cow, _) = enc.decode_without_bom_handling(&bytes[bom_len..]);
        return cow.into_owned();
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            tracing::debug!(bytes = bytes.len(), "output is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}
