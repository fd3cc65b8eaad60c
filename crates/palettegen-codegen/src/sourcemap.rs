//! Version 3 source maps.
//!
//! Single-source maps only: every mapping points into the one stylesheet that
//! was processed. Positions are 0-based, columns in UTF-16 code units.

use serde::Serialize;

const BASE64: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// One generated position and the source position it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping {
    pub generated_line: usize,
    pub generated_column: usize,
    pub source_line: usize,
    pub source_column: usize,
}

/// A serializable source map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMap {
    pub version: u8,
    pub file: String,
    pub sources: Vec<String>,
    pub sources_content: Vec<String>,
    pub names: Vec<String>,
    pub mappings: String,
}

impl SourceMap {
    /// Build a map for `file` generated from `source_name`.
    /// `mappings` must be sorted by generated position.
    pub fn new(file: &str, source_name: &str, source_content: &str, mappings: &[Mapping]) -> Self {
        Self {
            version: 3,
            file: file.to_string(),
            sources: vec![source_name.to_string()],
            sources_content: vec![source_content.to_string()],
            names: Vec::new(),
            mappings: encode_mappings(mappings),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Encode mappings into the `mappings` field: lines separated by `;`,
/// segments by `,`, each segment four base64 VLQ deltas.
pub fn encode_mappings(mappings: &[Mapping]) -> String {
    let mut out = String::new();
    let mut line = 0;
    let mut prev_gen_column = 0i64;
    let mut prev_src_line = 0i64;
    let mut prev_src_column = 0i64;
    let mut first_in_line = true;

    for m in mappings {
        while line < m.generated_line {
            out.push(';');
            line += 1;
            prev_gen_column = 0;
            first_in_line = true;
        }
        if !first_in_line {
            out.push(',');
        }

        let gen_column = m.generated_column as i64;
        let src_line = m.source_line as i64;
        let src_column = m.source_column as i64;

        encode_vlq(gen_column - prev_gen_column, &mut out);
        // Source index: always the single source, so 0 then no change.
        encode_vlq(0, &mut out);
        encode_vlq(src_line - prev_src_line, &mut out);
        encode_vlq(src_column - prev_src_column, &mut out);

        prev_gen_column = gen_column;
        prev_src_line = src_line;
        prev_src_column = src_column;
        first_in_line = false;
    }

    log::trace!("encoded {} mappings over {} lines", mappings.len(), line + 1);
    out
}

/// Append one base64 VLQ value.
fn encode_vlq(value: i64, out: &mut String) {
    let signed = if value < 0 {
        ((-value) << 1) | 1
    } else {
        value << 1
    };
    let mut vlq = signed as u64;

    loop {
        let mut digit = (vlq & 0b11111) as u8;
        vlq >>= 5;
        if vlq > 0 {
            digit |= 0b100000;
        }
        out.push(BASE64[digit as usize] as char);
        if vlq == 0 {
            break;
        }
    }
}
