//! Column width distribution.

#[derive(Debug, Clone, Copy, PartialEq)]
enum ColumnKind {
    Fixed(f32),
    Flexible(f32),
}

fn classify(declared: Option<f32>) -> ColumnKind {
    match declared {
        Some(w) if w > 0.0 => ColumnKind::Fixed(w),
        Some(w) if w < 0.0 => ColumnKind::Flexible(-w),
        _ => ColumnKind::Flexible(1.0),
    }
}

/// Calculates column widths (points) for a table `available` points wide.
///
/// A positive declared width is fixed. No declared width, zero, or a negative
/// value `-w` makes the column flexible with weight 1, 1 or `w` respectively.
///
/// 1. Only fixed columns: declared widths, shrunk uniformly if they overflow.
/// 2. With flexible columns: fixed columns keep their width and the remainder
///    is split by weight. If the fixed columns alone overflow they are shrunk
///    and the flexible columns collapse to zero.
pub fn distribute_column_widths(declared: &[Option<f32>], available: f32) -> Vec<f32> {
    let kinds: Vec<ColumnKind> = declared.iter().copied().map(classify).collect();
    let available = available.max(0.0);

    let fixed_sum: f32 = kinds
        .iter()
        .map(|k| match k {
            ColumnKind::Fixed(w) => *w,
            ColumnKind::Flexible(_) => 0.0,
        })
        .sum();
    let total_weight: f32 = kinds
        .iter()
        .map(|k| match k {
            ColumnKind::Flexible(weight) => *weight,
            ColumnKind::Fixed(_) => 0.0,
        })
        .sum();
    let has_flexible = kinds.iter().any(|k| matches!(k, ColumnKind::Flexible(_)));

    let shrink = if fixed_sum > available {
        available / fixed_sum
    } else {
        1.0
    };

    if has_flexible && fixed_sum > available {
        log::warn!(
            "Table does not fit: fixed columns need {:.2}pt of {:.2}pt available, flexible columns collapse",
            fixed_sum,
            available
        );
    }

    let remaining = (available - fixed_sum).max(0.0);
    kinds
        .iter()
        .map(|kind| match *kind {
            ColumnKind::Fixed(w) => w * shrink,
            ColumnKind::Flexible(weight) if total_weight > 0.0 => remaining * weight / total_weight,
            ColumnKind::Flexible(_) => 0.0,
        })
        .collect()
}

/// Running sum of the previous widths.
pub fn column_offsets(widths: &[f32]) -> Vec<f32> {
    widths
        .iter()
        .scan(0.0, |offset, width| {
            let current = *offset;
            *offset += width;
            Some(current)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_fixed_columns_that_fit_keep_declared_width() {
        let widths = distribute_column_widths(&[Some(20.0), Some(30.0)], 100.0);
        assert_eq!(widths, vec![20.0, 30.0]);
    }

    #[test]
    fn test_overflowing_fixed_columns_shrink_uniformly() {
        let widths = distribute_column_widths(&[Some(50.0), Some(50.0), Some(50.0)], 100.0);
        for width in &widths {
            assert!((width - 100.0 / 3.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_flexible_column_takes_remainder() {
        let widths = distribute_column_widths(&[Some(30.0), Some(30.0), None], 100.0);
        assert_eq!(widths[0], 30.0);
        assert_eq!(widths[1], 30.0);
        assert!((widths[2] - 40.0).abs() < EPSILON);
    }

    #[test]
    fn test_flexible_weights() {
        let widths = distribute_column_widths(&[Some(-1.0), Some(-3.0), Some(0.0)], 100.0);
        assert!((widths[0] - 20.0).abs() < EPSILON);
        assert!((widths[1] - 60.0).abs() < EPSILON);
        assert!((widths[2] - 20.0).abs() < EPSILON);
    }

    #[test]
    fn test_flexible_collapse_when_fixed_overflow() {
        let _ = env_logger::builder().is_test(true).try_init();
        let widths = distribute_column_widths(&[Some(80.0), Some(120.0), None], 100.0);
        assert!((widths[0] - 40.0).abs() < EPSILON);
        assert!((widths[1] - 60.0).abs() < EPSILON);
        assert_eq!(widths[2], 0.0);
    }

    #[test]
    fn test_offsets_are_running_sums() {
        assert_eq!(column_offsets(&[10.0, 20.0, 5.0]), vec![0.0, 10.0, 30.0]);
        assert!(column_offsets(&[]).is_empty());
    }
}
