//! C header rendering for libsecp256k1's static generator context.

use core::fmt::Write as _;

use itertools::Itertools;

use crate::comb::table::CombTable;
use crate::error::{Error, Result};
use crate::serialize::encoding::{encode_point, EncodedPoint, WORDS_PER_POINT};
use crate::serialize::TableRenderer;

pub const HEADER_FILE_NAME: &str = "ecmult_static_context.h";
pub const INCLUDE_GUARD: &str = "_SECP256K1_ECMULT_STATIC_CONTEXT_";
pub const TABLE_SYMBOL: &str = "secp256k1_ecmult_gen_prec_table";

#[derive(Debug, Default, Copy, Clone)]
pub struct CHeaderRenderer;

impl TableRenderer for CHeaderRenderer {
    fn file_name(&self) -> &'static str {
        HEADER_FILE_NAME
    }

    fn render(&self, table: &CombTable) -> Result<String> {
        let layout = table.layout();
        if !layout.is_uniform() {
            return Err(Error::RaggedTable);
        }
        let n = layout.blocks();
        let g = layout.entries_in_block(0);

        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "#ifndef {INCLUDE_GUARD}");
        let _ = writeln!(out, "#define {INCLUDE_GUARD}");
        let _ = writeln!(out, "#include \"src/group.h\"");
        let _ = writeln!(out, "#define SC SECP256K1_GE_STORAGE_CONST");
        let _ = writeln!(out, "#if ECMULT_GEN_PREC_N != {n} || ECMULT_GEN_PREC_G != {g}");
        let _ = writeln!(
            out,
            "   #error configuration mismatch, invalid ECMULT_GEN_PREC_N, ECMULT_GEN_PREC_G. \
             Try deleting {HEADER_FILE_NAME} before the build."
        );
        let _ = writeln!(out, "#endif");
        let _ = writeln!(
            out,
            "static const secp256k1_ge_storage {TABLE_SYMBOL}[ECMULT_GEN_PREC_N][ECMULT_GEN_PREC_G] = {{"
        );

        for (block, entries) in table.blocks().iter().enumerate() {
            let _ = writeln!(out, "{{");
            for (value, point) in entries.iter().enumerate() {
                let words = encode_point(point).iter().map(|w| format!("{w}u")).join(", ");
                let sep = if value + 1 == entries.len() { "" } else { "," };
                let _ = writeln!(out, "    SC({words}){sep}");
            }
            let sep = if block + 1 == n { "" } else { "," };
            let _ = writeln!(out, "}}{sep}");
        }

        let _ = writeln!(out, "}};");
        let _ = writeln!(out, "#undef SC");
        let _ = writeln!(out, "#endif");
        Ok(out)
    }
}

/// Reads a header produced by [`CHeaderRenderer`] back into encoded points,
/// grouped by block.
pub fn parse_c_header(text: &str) -> Result<Vec<Vec<EncodedPoint>>> {
    let malformed = |msg: &str| Error::MalformedArtifact(msg.to_owned());

    if !text.contains(&format!("#ifndef {INCLUDE_GUARD}"))
        || !text.contains(&format!("#define {INCLUDE_GUARD}"))
    {
        return Err(malformed("missing include guard"));
    }

    let mut lines = text
        .lines()
        .skip_while(|line| !line.contains(TABLE_SYMBOL));
    if lines.next().is_none() {
        return Err(malformed("missing table symbol"));
    }

    let mut blocks = Vec::new();
    let mut current: Option<Vec<EncodedPoint>> = None;
    for line in lines {
        let line = line.trim();
        match line {
            "{" => {
                if current.replace(Vec::new()).is_some() {
                    return Err(malformed("nested block"));
                }
            }
            "}" | "}," => {
                let block = current.take().ok_or_else(|| malformed("unbalanced block"))?;
                blocks.push(block);
            }
            "};" => {
                if current.is_some() {
                    return Err(malformed("unterminated block"));
                }
                return Ok(blocks);
            }
            _ => {
                let block = current
                    .as_mut()
                    .ok_or_else(|| malformed("entry outside a block"))?;
                block.push(parse_entry(line)?);
            }
        }
    }
    Err(malformed("unterminated table"))
}

fn parse_entry(line: &str) -> Result<EncodedPoint> {
    let malformed = || Error::MalformedArtifact(format!("bad entry {line:?}"));

    let body = line
        .strip_prefix("SC(")
        .and_then(|rest| rest.strip_suffix(',').or(Some(rest)))
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(malformed)?;

    let words: Vec<u32> = body
        .split(',')
        .map(|word| {
            word.trim()
                .strip_suffix('u')
                .and_then(|digits| digits.parse().ok())
                .ok_or_else(malformed)
        })
        .collect::<Result<_>>()?;

    words.try_into().map_err(|_: Vec<u32>| {
        Error::MalformedArtifact(format!("expected {WORDS_PER_POINT} words in {line:?}"))
    })
}
