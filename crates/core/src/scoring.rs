//! Scoring module
//!
//! A landing that clears `n` rows at once awards `n²` points, so clearing
//! rows together is worth more than clearing them one at a time.

/// Points for one landing that cleared `cleared_rows` rows
pub fn line_clear_points(cleared_rows: usize) -> u32 {
    let n = u32::try_from(cleared_rows).unwrap_or(u32::MAX);
    n.saturating_mul(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_points() {
        assert_eq!(line_clear_points(0), 0);
        assert_eq!(line_clear_points(1), 1);
        assert_eq!(line_clear_points(2), 4);
        assert_eq!(line_clear_points(3), 9);
        assert_eq!(line_clear_points(4), 16);
    }

    #[test]
    fn test_line_clear_points_saturates() {
        assert_eq!(line_clear_points(usize::MAX), u32::MAX);
    }
}
