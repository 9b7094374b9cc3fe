//! "Nice" tick generation on a 1/2/5 ladder.

/// Returns a step close to `|stop - start| / count`, snapped to 1, 2, 5 or 10
/// times a power of ten. Negative when `stop < start`; `0` when no step exists.
#[must_use]
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let raw_step = (stop - start).abs() / count.max(1) as f64;
    if !raw_step.is_finite() || raw_step <= 0.0 {
        return 0.0;
    }

    let mut step = 10_f64.powi(raw_step.log10().floor() as i32);
    let error = raw_step / step;
    if error >= 50_f64.sqrt() {
        step *= 10.0;
    } else if error >= 10_f64.sqrt() {
        step *= 5.0;
    } else if error >= 2_f64.sqrt() {
        step *= 2.0;
    }

    if stop < start { -step } else { step }
}

/// Integer-indexed positions `index * step` that bracket an interval.
///
/// `first` is the smallest index with a position `>= min`, `last` the largest
/// with a position `<= max`. When no multiple falls inside, `last == first - 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickLadder {
    pub step: f64,
    pub first: i64,
    pub last: i64,
}

impl TickLadder {
    /// Position of ladder index `index`.
    ///
    /// Sub-unit steps divide by the inverse step so that e.g. `3 * 0.1`
    /// yields `0.3` rather than `0.30000000000000004`.
    #[must_use]
    pub fn value_at(self, index: i64) -> f64 {
        if self.step < 1.0 {
            let inverse = (1.0 / self.step).round();
            index as f64 / inverse
        } else {
            index as f64 * self.step
        }
    }

    #[must_use]
    pub fn tick_count(self) -> usize {
        usize::try_from(self.last - self.first + 1).unwrap_or(0)
    }
}

/// Builds the ladder for `[start, stop]` (either order) and a target count.
#[must_use]
pub fn tick_ladder(start: f64, stop: f64, count: usize) -> Option<TickLadder> {
    let step = tick_step(start, stop, count).abs();
    if !step.is_finite() || step <= 0.0 {
        return None;
    }

    let (min, max) = if start <= stop {
        (start, stop)
    } else {
        (stop, start)
    };
    let first = (min / step).ceil();
    let last = (max / step).floor();
    if !first.is_finite() || !last.is_finite() {
        return None;
    }

    Some(TickLadder {
        step,
        first: first as i64,
        last: last as i64,
    })
}

/// Ascending tick positions inside `[start, stop]` (inclusive).
#[must_use]
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    let Some(ladder) = tick_ladder(start, stop, count) else {
        return Vec::new();
    };
    (ladder.first..=ladder.last)
        .map(|index| ladder.value_at(index))
        .collect()
}
