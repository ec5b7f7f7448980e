//! Rust source rendering, for consumers that `include!` the table.

use core::fmt::Write as _;

use itertools::Itertools;

use crate::comb::table::CombTable;
use crate::error::{Error, Result};
use crate::serialize::encoding::{encode_point, WORDS_PER_POINT};
use crate::serialize::TableRenderer;

pub const MODULE_FILE_NAME: &str = "ecmult_static_context.rs";
pub const TABLE_CONST: &str = "SECP256K1_ECMULT_GEN_PREC_TABLE";

#[derive(Debug, Default, Copy, Clone)]
pub struct RustModuleRenderer;

impl TableRenderer for RustModuleRenderer {
    fn file_name(&self) -> &'static str {
        MODULE_FILE_NAME
    }

    fn render(&self, table: &CombTable) -> Result<String> {
        let layout = table.layout();
        if !layout.is_uniform() {
            return Err(Error::RaggedTable);
        }
        let n = layout.blocks();
        let g = layout.entries_in_block(0);

        let mut out = String::new();
        let _ = writeln!(out, "// @generated by gen_context; do not edit.");
        let _ = writeln!(
            out,
            "// Point layout: [x0..x7, y0..y7], 32-bit words, most significant first; identity is all zero."
        );
        let _ = writeln!(
            out,
            "pub const ECMULT_GEN_PREC_BITS: u32 = {};",
            layout.bits_per_block()
        );
        let _ = writeln!(
            out,
            "pub const {TABLE_CONST}: [[[u32; {WORDS_PER_POINT}]; {g}]; {n}] = ["
        );
        for entries in table.blocks() {
            let _ = writeln!(out, "    [");
            for point in entries {
                let words = encode_point(point)
                    .iter()
                    .map(|w| format!("{w:#010x}"))
                    .join(", ");
                let _ = writeln!(out, "        [{words}],");
            }
            let _ = writeln!(out, "    ],");
        }
        let _ = writeln!(out, "];");
        Ok(out)
    }
}
