use crate::point::{TrendKind, TrendPoint};

/// Ordered metaseries of swing highs and lows.
///
/// Points are kept as a list of confirmed points plus one pending point.
/// Appending a point of the pending point's kind revises the pending point;
/// appending the other kind confirms it. Adjacent points therefore never
/// share a kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendSeries {
    confirmed: Vec<TrendPoint>,
    pending: Option<TrendPoint>,
}

impl TrendSeries {
    /// Classification code for samples between two points.
    pub const CONTINUATION_CODE: f64 = 0.5;
    /// Classification code for a point below its predecessor.
    pub const DOWNTURN_CODE: f64 = 1.0;
    /// Classification code for a point at or above its predecessor.
    pub const UPTURN_CODE: f64 = 0.0;

    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point, or revise the last point if it has the same kind.
    pub fn append(&mut self, position: usize, value: f64, kind: TrendKind) {
        match self.pending.as_mut() {
            Some(pending) if pending.kind == kind => {
                pending.position = position;
                pending.value = value;
            }
            _ => {
                if let Some(previous) = self.pending.replace(TrendPoint::new(position, value, kind)) {
                    self.confirmed.push(previous);
                }
            }
        }
    }

    /// Insert a point ahead of the first one, tagged with the opposite kind.
    pub(crate) fn prepend_opposite(&mut self, position: usize, value: f64) {
        if let Some(first) = self.first_point() {
            let point = TrendPoint::new(position, value, first.kind.opposite());
            self.confirmed.insert(0, point);
        }
    }

    pub fn len(&self) -> usize {
        self.confirmed.len() + usize::from(self.pending.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }

    pub fn first_point(&self) -> Option<&TrendPoint> {
        self.confirmed.first().or(self.pending.as_ref())
    }

    /// The most recent point, which is still open to revision.
    pub fn last_point(&self) -> Option<&TrendPoint> {
        self.pending.as_ref()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrendPoint> {
        self.confirmed.iter().chain(self.pending.iter())
    }

    pub fn points(&self) -> Vec<TrendPoint> {
        self.iter().copied().collect()
    }

    /// Rebuild the trend on the sampling grid of the source series.
    ///
    /// Walks the points with a cursor starting at `(0, start_value)`. A point
    /// more than one index past the cursor emits the straight line from the
    /// cursor up to (not including) the point and moves the cursor there.
    /// Points within one index of the cursor emit nothing and leave the cursor
    /// in place, so the next emitting point interpolates across them.
    ///
    /// # Arguments
    ///
    /// * `start_value` - Value at index 0, normally the first source value.
    ///
    /// # Returns
    ///
    /// One value per index from 0 up to the last cursor position.
    pub fn to_overlay(&self, start_value: f64) -> Vec<f64> {
        let mut overlay = Vec::new();
        let mut cursor_position = 0usize;
        let mut cursor_value = start_value;

        for point in self.iter() {
            let gap = point.position.saturating_sub(cursor_position);
            if gap > 1 {
                let slope = (point.value - cursor_value) / gap as f64;
                overlay.extend((0..gap).map(|n| cursor_value + n as f64 * slope));

                cursor_position = point.position;
                cursor_value = point.value;
            }
        }

        overlay
    }

    /// Encode the trend as ternary codes on the sampling grid.
    ///
    /// Each point contributes `gap - 1` continuation codes (0.5) for the
    /// indices between it and the previous point, followed by one terminal
    /// code: 1 when its value is below the previous value, else 0.
    ///
    /// # Arguments
    ///
    /// * `start_value` - Value the first point is compared against.
    ///
    /// # Returns
    ///
    /// One code per index from 0 to the last point's position inclusive,
    /// provided the first point sits at index 0.
    pub fn to_classification(&self, start_value: f64) -> Vec<f64> {
        let mut codes = Vec::new();
        let mut prev_position = 0usize;
        let mut prev_value = start_value;

        for point in self.iter() {
            let gap = point.position.saturating_sub(prev_position);
            if gap > 1 {
                codes.extend(std::iter::repeat_n(Self::CONTINUATION_CODE, gap - 1));
            }

            codes.push(if point.value < prev_value {
                Self::DOWNTURN_CODE
            } else {
                Self::UPTURN_CODE
            });

            prev_position = point.position;
            prev_value = point.value;
        }

        codes
    }

    /// Positions and values of the points of one kind, in order.
    pub fn to_scatter(&self, kind: TrendKind) -> (Vec<usize>, Vec<f64>) {
        self.iter()
            .filter(|point| point.kind == kind)
            .map(|point| (point.position, point.value))
            .unzip()
    }
}

impl<'a> IntoIterator for &'a TrendSeries {
    type Item = &'a TrendPoint;
    type IntoIter = std::iter::Chain<
        std::slice::Iter<'a, TrendPoint>,
        std::option::Iter<'a, TrendPoint>,
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.confirmed.iter().chain(self.pending.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zigzag() -> TrendSeries {
        let mut series = TrendSeries::new();
        series.append(0, 10.0, TrendKind::Low);
        series.append(4, 14.0, TrendKind::High);
        series.append(7, 8.0, TrendKind::Low);
        series
    }

    #[test]
    fn test_append_same_kind_replaces_last_point() {
        let mut series = TrendSeries::new();
        series.append(2, 5.0, TrendKind::High);
        series.append(4, 9.0, TrendKind::High);

        assert_eq!(series.len(), 1);
        assert_eq!(series.last_point(), Some(&TrendPoint::new(4, 9.0, TrendKind::High)));
    }

    #[test]
    fn test_append_opposite_kind_confirms_last_point() {
        let mut series = TrendSeries::new();
        series.append(1, 12.0, TrendKind::High);
        series.append(2, 9.0, TrendKind::Low);
        series.append(4, 8.0, TrendKind::Low);

        assert_eq!(
            series.points(),
            vec![
                TrendPoint::new(1, 12.0, TrendKind::High),
                TrendPoint::new(4, 8.0, TrendKind::Low),
            ]
        );
    }

    #[test]
    fn test_empty_series_accessors() {
        let series = TrendSeries::new();
        assert!(series.is_empty());
        assert_eq!(series.len(), 0);
        assert!(series.last_point().is_none());
        assert!(series.first_point().is_none());
        assert!(series.to_overlay(1.0).is_empty());
        assert!(series.to_classification(1.0).is_empty());
    }

    #[test]
    fn test_kinds_alternate_after_mixed_appends() {
        let mut series = TrendSeries::new();
        let kinds = [
            TrendKind::High,
            TrendKind::High,
            TrendKind::Low,
            TrendKind::High,
            TrendKind::High,
            TrendKind::Low,
            TrendKind::Low,
        ];
        for (i, kind) in kinds.iter().enumerate() {
            series.append(i, i as f64, *kind);
        }

        let points = series.points();
        assert_eq!(points.len(), 4);
        for pair in points.windows(2) {
            assert_ne!(pair[0].kind, pair[1].kind);
        }
    }

    #[test]
    fn test_prepend_takes_opposite_kind() {
        let mut series = TrendSeries::new();
        series.append(3, 7.0, TrendKind::High);
        series.prepend_opposite(0, 5.0);

        assert_eq!(series.len(), 2);
        assert_eq!(series.first_point(), Some(&TrendPoint::new(0, 5.0, TrendKind::Low)));
        assert_eq!(series.last_point(), Some(&TrendPoint::new(3, 7.0, TrendKind::High)));

        let mut empty = TrendSeries::new();
        empty.prepend_opposite(0, 5.0);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_to_overlay_interpolates_between_points() {
        let overlay = zigzag().to_overlay(10.0);
        let expected = [10.0, 11.0, 12.0, 13.0, 14.0, 12.0, 10.0];

        assert_eq!(overlay.len(), 7);
        for (got, want) in overlay.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-10);
        }
    }

    #[test]
    fn test_to_overlay_skips_unit_gaps() {
        let mut series = TrendSeries::new();
        series.append(0, 10.0, TrendKind::Low);
        series.append(1, 12.0, TrendKind::High);
        series.append(4, 8.0, TrendKind::Low);
        series.append(5, 13.0, TrendKind::High);

        // 12@1 and 13@5 sit one index past the cursor and emit nothing
        let overlay = series.to_overlay(10.0);
        let expected = [10.0, 9.5, 9.0, 8.5];

        assert_eq!(overlay.len(), expected.len());
        for (got, want) in overlay.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-10);
        }
    }

    #[test]
    fn test_to_classification_codes() {
        let codes = zigzag().to_classification(10.0);
        let expected = [0.0, 0.5, 0.5, 0.5, 0.0, 0.5, 0.5, 1.0];

        assert_eq!(codes, expected);
        assert_eq!(codes.len(), 7 + 1);
    }

    #[test]
    fn test_to_classification_flat_step_is_upturn() {
        let mut series = TrendSeries::new();
        series.append(0, 5.0, TrendKind::High);
        series.append(2, 5.0, TrendKind::Low);

        assert_eq!(series.to_classification(5.0), vec![0.0, 0.5, 0.0]);
    }

    #[test]
    fn test_to_scatter_partitions_points() {
        let series = zigzag();
        let (high_x, high_y) = series.to_scatter(TrendKind::High);
        let (low_x, low_y) = series.to_scatter(TrendKind::Low);

        assert_eq!(high_x, vec![4]);
        assert_eq!(high_y, vec![14.0]);
        assert_eq!(low_x, vec![0, 7]);
        assert_eq!(low_y, vec![10.0, 8.0]);
        assert_eq!(high_x.len() + low_x.len(), series.len());
    }

    #[test]
    fn test_iteration_order() {
        let series = zigzag();
        let positions: Vec<usize> = (&series).into_iter().map(|p| p.position).collect();
        assert_eq!(positions, vec![0, 4, 7]);
        assert_eq!(series.iter().count(), series.len());
    }
}
