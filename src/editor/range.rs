/*!
 * Document positions and ranges.
 *
 * A position addresses a block and an offset within it; offsets count
 * one per text character and one per break marker. Ranges are
 * half-open and may span blocks.
 */

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::errors::DocumentError;

/// A position inside the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocPoint {
    /// Block index
    pub block: usize,
    /// Offset within the block, in document positions
    pub offset: usize,
}

impl DocPoint {
    /// Create a position
    pub fn new(block: usize, offset: usize) -> Self {
        Self { block, offset }
    }

    /// Check the position against a document
    pub fn validate(&self, doc: &Document) -> Result<(), DocumentError> {
        let Some(block) = doc.blocks.get(self.block) else {
            return Err(DocumentError::InvalidRange(format!(
                "block index {} out of bounds ({} blocks)",
                self.block,
                doc.block_count()
            )));
        };

        let width = block.width();
        if self.offset > width {
            return Err(DocumentError::InvalidRange(format!(
                "offset {} out of bounds in block {} (width {})",
                self.offset, self.block, width
            )));
        }

        Ok(())
    }
}

/// A half-open range between two document positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocRange {
    /// Inclusive start position
    pub start: DocPoint,
    /// Exclusive end position
    pub end: DocPoint,
}

/// The part of a range that falls inside one block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BlockSpan {
    /// Block index
    pub block: usize,
    /// Start offset within the block
    pub start: usize,
    /// End offset within the block
    pub end: usize,
}

impl DocRange {
    /// Create a range between two positions
    pub fn new(start: DocPoint, end: DocPoint) -> Self {
        Self { start, end }
    }

    /// Create a range within a single block
    pub fn within_block(block: usize, start: usize, end: usize) -> Self {
        Self { start: DocPoint::new(block, start), end: DocPoint::new(block, end) }
    }

    /// Check whether the range selects nothing
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Check the range against a document
    pub fn validate(&self, doc: &Document) -> Result<(), DocumentError> {
        if self.end < self.start {
            return Err(DocumentError::InvalidRange(format!(
                "range end {:?} precedes start {:?}",
                self.end, self.start
            )));
        }
        self.start.validate(doc)?;
        self.end.validate(doc)?;
        Ok(())
    }

    /// Decompose a validated range into per-block spans
    pub(crate) fn block_spans(&self, doc: &Document) -> Vec<BlockSpan> {
        if self.start.block == self.end.block {
            return vec![BlockSpan {
                block: self.start.block,
                start: self.start.offset,
                end: self.end.offset,
            }];
        }

        let mut spans = Vec::with_capacity(self.end.block - self.start.block + 1);
        spans.push(BlockSpan {
            block: self.start.block,
            start: self.start.offset,
            end: doc.blocks[self.start.block].width(),
        });
        for block in self.start.block + 1..self.end.block {
            spans.push(BlockSpan { block, start: 0, end: doc.blocks[block].width() });
        }
        spans.push(BlockSpan { block: self.end.block, start: 0, end: self.end.offset });
        spans
    }
}
