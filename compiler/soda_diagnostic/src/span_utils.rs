//! Line and column lookup for rendering spans.

/// 1-based line containing byte `offset`.
///
/// Offsets past the end of `source` map to the last line.
pub fn line_from_offset(source: &str, offset: u32) -> u32 {
    let end = clamp_offset(source, offset);
    let newlines = source.as_bytes()[..end]
        .iter()
        .filter(|&&b| b == b'\n')
        .count();
    u32::try_from(newlines).map_or(u32::MAX, |n| n.saturating_add(1))
}

/// 1-based `(line, column)` of byte `offset`, counting columns in chars.
pub fn offset_to_line_col(source: &str, offset: u32) -> (u32, u32) {
    let end = clamp_offset(source, offset);
    let line_start = source[..end].rfind('\n').map_or(0, |i| i + 1);
    let col = source[line_start..end].chars().count();
    let col = u32::try_from(col).map_or(u32::MAX, |c| c.saturating_add(1));
    (line_from_offset(source, offset), col)
}

/// Clamp to the source length and back off to a char boundary.
fn clamp_offset(source: &str, offset: u32) -> usize {
    let mut end = (offset as usize).min(source.len());
    while !source.is_char_boundary(end) {
        end -= 1;
    }
    end
}
