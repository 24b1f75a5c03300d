//! Batch chunker bounding the rows handed to a single write

use crate::constants::BATCH_SIZE;

/// Splits `items` into consecutive groups of at most [`BATCH_SIZE`] elements.
pub fn chunk<T>(items: &[T]) -> std::slice::Chunks<'_, T> {
    chunk_by_size(items, BATCH_SIZE)
}

/// Splits `items` into consecutive groups of at most `size` elements.
///
/// Order is preserved; the last group may be shorter. A `size` of zero is
/// treated as one.
pub fn chunk_by_size<T>(items: &[T], size: usize) -> std::slice::Chunks<'_, T> {
    items.chunks(size.max(1))
}
