//! Temporal offset — shift a computed series along the index axis.
//!
//! Sign convention: `output[i] = input[i - offset]`. A positive offset moves
//! values to later indices, so the bands appear to lag the unshifted candles
//! by `offset` periods. A negative offset moves them earlier. Positions with
//! no source index are undefined.

use tracing::debug;

/// Shift `values` by `offset` positions, keeping the length unchanged.
///
/// Offset 0 returns a copy equal to the input. An offset whose magnitude is at
/// least the series length leaves every position undefined.
pub fn shift<T: Copy>(values: &[Option<T>], offset: i64) -> Vec<Option<T>> {
    if offset == 0 {
        return values.to_vec();
    }

    let n = values.len();
    if offset.unsigned_abs() >= n as u64 && n > 0 {
        debug!(offset, len = n, "offset moves every value out of range");
    }

    (0..n)
        .map(|i| {
            (i as i64)
                .checked_sub(offset)
                .and_then(|src| usize::try_from(src).ok())
                .and_then(|src| values.get(src).copied().flatten())
        })
        .collect()
}
