use crate::error::Span;

/// A deferred symbol reference recorded during pass 2 and resolved in pass 3.
///
/// `patch_offset` is a byte offset into the image identifying the start of
/// the 4-byte instruction word carrying the unresolved immediate field — not
/// an offset into the field itself, since the field spans parts of three
/// different bytes and must be patched a whole word at a time.
#[derive(Debug, Clone)]
pub struct PendingPatch {
    pub symbol: String,
    pub patch_offset: usize,
    pub is_pc_relative: bool,
    pub pc_value: u32,
    pub span: Span,
}
