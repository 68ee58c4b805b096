pub mod frequency;
pub mod tree;
pub mod canonical;

use crate::error::Result;

use self::{frequency::FrequencyTable, tree::HuffmanTree, canonical::CodeTable};

/// Codes are held in a `u64`, so no code may be longer.
pub const MAX_CODE_LENGTH: usize = 64;

/// Builds the canonical code of `frequencies`: merge tree, leaf depths, then
/// canonical values. The tree is dropped once the depths are known.
pub fn build_code_table(frequencies: &FrequencyTable) -> Result<CodeTable> {
    let tree = HuffmanTree::build(frequencies)?;
    CodeTable::from_lengths(tree.code_lengths()?)
}
