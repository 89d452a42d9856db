use smallvec::SmallVec;

use crate::core::PlotArea;
use crate::render::{Color, LinePrimitive};

const AXIS_WIDTH_PX: f64 = 2.0;

/// Evenly spaced fractions `0, 1/n, ..., 1` for `intervals` gridline gaps.
#[must_use]
pub fn tick_fractions(intervals: usize) -> SmallVec<[f64; 8]> {
    if intervals == 0 {
        return SmallVec::from_slice(&[0.0]);
    }
    (0..=intervals)
        .map(|step| step as f64 / intervals as f64)
        .collect()
}

/// Indices of at most `max_labels` evenly spread labels out of `len`.
///
/// The first and last index are always included once two labels fit. Indices
/// are strictly increasing.
#[must_use]
pub fn thin_label_indices(len: usize, max_labels: usize) -> Vec<usize> {
    if len == 0 || max_labels == 0 {
        return Vec::new();
    }
    if max_labels == 1 {
        return vec![0];
    }
    if len <= max_labels {
        return (0..len).collect();
    }

    let mut indices: Vec<usize> = (0..max_labels)
        .map(|step| step * (len - 1) / (max_labels - 1))
        .collect();
    indices.dedup();
    indices
}

/// Left and bottom axis lines framing the plot area.
#[must_use]
pub fn axis_lines(plot: PlotArea, color: Color) -> [LinePrimitive; 2] {
    [
        LinePrimitive::new(plot.left, plot.top, plot.left, plot.bottom(), AXIS_WIDTH_PX, color),
        LinePrimitive::new(
            plot.left,
            plot.bottom(),
            plot.right(),
            plot.bottom(),
            AXIS_WIDTH_PX,
            color,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractions_cover_both_ends() {
        assert_eq!(tick_fractions(4).as_slice(), &[0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(tick_fractions(0).as_slice(), &[0.0]);
    }

    #[test]
    fn thinning_keeps_first_and_last() {
        let indices = thin_label_indices(20, 6);
        assert_eq!(indices.len(), 6);
        assert_eq!(indices.first(), Some(&0));
        assert_eq!(indices.last(), Some(&19));
        assert!(indices.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(thin_label_indices(3, 6), vec![0, 1, 2]);
    }
}
