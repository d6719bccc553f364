//! Date-anchored block splitting.
//!
//! Extracted PDF text has no row delimiters, so any line carrying a date is
//! treated as the start of a new transaction block. Lines seen before the
//! first anchor are page headers and are dropped.

use super::patterns::date_re;

/// A run of trimmed lines attributed to one candidate transaction.
/// The first line is always the date anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    pub lines: Vec<&'a str>,
}

#[derive(Debug, Default)]
enum SegmenterState<'a> {
    #[default]
    Outside,
    Inside(Block<'a>),
}

/// Two-state line scanner. Feed lines in order, then call `finish`.
#[derive(Debug, Default)]
pub struct Segmenter<'a> {
    state: SegmenterState<'a>,
}

impl<'a> Segmenter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_inside(&self) -> bool {
        matches!(self.state, SegmenterState::Inside(_))
    }

    /// Consume one line. Returns the previous block when this line closes it.
    pub fn feed(&mut self, line: &'a str) -> Option<Block<'a>> {
        if date_re().is_match(line) {
            let opened = Block { lines: vec![line] };
            return match std::mem::replace(&mut self.state, SegmenterState::Inside(opened)) {
                SegmenterState::Inside(closed) => Some(closed),
                SegmenterState::Outside => None,
            };
        }

        if let SegmenterState::Inside(block) = &mut self.state {
            block.lines.push(line);
        }
        None
    }

    /// End of input: hand back the block still open, if any.
    pub fn finish(&mut self) -> Option<Block<'a>> {
        match std::mem::take(&mut self.state) {
            SegmenterState::Inside(block) => Some(block),
            SegmenterState::Outside => None,
        }
    }
}

/// Split prepared lines into blocks, preserving source order.
pub fn segment<'a, I>(lines: I) -> Vec<Block<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seg = Segmenter::new();
    let mut out = Vec::new();
    for line in lines {
        if let Some(block) = seg.feed(line) {
            out.push(block);
        }
    }
    out.extend(seg.finish());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_before_first_anchor_are_ignored() {
        let mut seg = Segmenter::new();
        assert!(seg.feed("Transaction Statement").is_none());
        assert!(seg.feed("").is_none());
        assert!(!seg.is_inside());
        assert!(seg.finish().is_none());
    }

    #[test]
    fn test_new_anchor_closes_open_block() {
        let mut seg = Segmenter::new();
        assert!(seg.feed("Jan 5, 2024").is_none());
        assert!(seg.feed("Paid to A").is_none());
        let closed = seg.feed("Jan 6, 2024").unwrap();
        assert_eq!(closed.lines, vec!["Jan 5, 2024", "Paid to A"]);
        assert!(seg.is_inside());

        let last = seg.finish().unwrap();
        assert_eq!(last.lines, vec!["Jan 6, 2024"]);
        assert!(!seg.is_inside());
    }

    #[test]
    fn test_segment_keeps_internal_blank_lines() {
        let lines = ["header", "Feb 1, 2024", "", "x", "Feb 2, 2024", "y", ""];
        let blocks = segment(lines);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].lines, vec!["Feb 1, 2024", "", "x"]);
        assert_eq!(blocks[1].lines, vec!["Feb 2, 2024", "y", ""]);
    }
}
