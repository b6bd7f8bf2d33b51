use crate::estimation::Estimate;
use crate::estimation::accumulators::Accumulator;

/// Recursive estimator of the mean and the objective's variance.
///
/// State is the triple `{n, sum, sum_sq_centered}`. Each observation updates
///
/// ```text
/// sum             += y
/// mean_n           = sum / n
/// sum_sq_centered += (y − mean_n)²      // centered on the *updated* mean
/// var_n            = sum_sq_centered / n
/// ```
///
/// Centering on the current-step mean is an online approximation: it does not
/// equal the two-pass population variance `Σ(y − ȳ_n)²/n`, nor the unbiased
/// `n − 1` sample variance, for finite `n`. It is kept as is because reported
/// trajectories are expected to follow exactly this recursion. Use
/// [`WelfordAccumulator`](crate::estimation::WelfordAccumulator) for the
/// textbook estimator.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RecursiveAccumulator {
    n: u64,
    sum: f64,
    sum_sq_centered: f64,
}

impl RecursiveAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn sum(&self) -> f64 {
        self.sum
    }

    #[inline]
    pub fn sum_sq_centered(&self) -> f64 {
        self.sum_sq_centered
    }
}

impl Accumulator for RecursiveAccumulator {
    #[inline]
    fn observe(&mut self, y: f64) -> Estimate {
        self.n += 1;
        self.sum += y;
        let mean = self.sum / self.n as f64;
        self.sum_sq_centered += (y - mean) * (y - mean);
        Estimate {
            n: self.n,
            mean,
            variance: self.sum_sq_centered / self.n as f64,
        }
    }

    #[inline]
    fn count(&self) -> u64 {
        self.n
    }

    fn estimate(&self) -> Option<Estimate> {
        if self.n == 0 {
            return None;
        }
        let n = self.n as f64;
        Some(Estimate {
            n: self.n,
            mean: self.sum / n,
            variance: self.sum_sq_centered / n,
        })
    }

    /// Pairwise combination (Chan, Golub & LeVeque):
    /// `S = S_a + S_b + δ²·n_a·n_b / n` with `δ = mean_b − mean_a`.
    ///
    /// Count and sum combine exactly. The centered sum of squares uses the
    /// standard parallel formula, so a merged state is close to, but not
    /// bit-identical with, a single sequential pass over both partitions.
    fn merge(&mut self, other: &Self) {
        if other.n == 0 {
            return;
        }
        if self.n == 0 {
            *self = *other;
            return;
        }
        let na = self.n as f64;
        let nb = other.n as f64;
        let delta = other.sum / nb - self.sum / na;
        self.sum_sq_centered += other.sum_sq_centered + delta * delta * na * nb / (na + nb);
        self.sum += other.sum;
        self.n += other.n;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimation::WelfordAccumulator;

    #[test]
    fn empty_has_no_estimate() {
        let acc = RecursiveAccumulator::new();
        assert_eq!(acc.count(), 0);
        assert!(acc.estimate().is_none());
    }

    #[test]
    fn constant_input_has_zero_variance() {
        let mut acc = RecursiveAccumulator::new();
        for n in 1..=500 {
            let e = acc.observe(2.5);
            assert_eq!(e.n, n);
            assert_eq!(e.mean, 2.5);
            assert_eq!(e.variance, 0.0);
        }
    }

    #[test]
    fn recursion_matches_hand_computation() {
        let mut acc = RecursiveAccumulator::new();
        let e1 = acc.observe(1.0);
        assert_eq!((e1.mean, e1.variance), (1.0, 0.0));
        let e2 = acc.observe(2.0);
        assert_eq!((e2.mean, e2.variance), (1.5, 0.125));
        let e3 = acc.observe(3.0);
        assert_eq!(e3.mean, 2.0);
        assert!((e3.variance - 1.25 / 3.0).abs() < 1e-15);
        assert_eq!(acc.sum(), 6.0);
        assert_eq!(acc.sum_sq_centered(), 1.25);
    }

    #[test]
    fn estimate_is_reproducible_from_state() {
        let mut acc = RecursiveAccumulator::new();
        let mut last = None;
        for y in [0.3, -1.2, 4.4, 0.0, 2.25] {
            last = Some(acc.observe(y));
        }
        assert_eq!(acc.estimate(), last);
    }

    #[test]
    fn differs_from_unbiased_estimator() {
        // Centering on the running mean is not the textbook sample variance.
        let data = [1.0, 2.0, 3.0];
        let mut recursive = RecursiveAccumulator::new();
        let mut welford = WelfordAccumulator::new();
        for y in data {
            recursive.observe(y);
            welford.observe(y);
        }
        let r = recursive.estimate().unwrap().variance;
        let w = welford.estimate().unwrap().variance;
        assert!((w - 1.0).abs() < 1e-15);
        assert!((r - 0.4166666666666667).abs() < 1e-15);
        assert!(r < w);
    }

    #[test]
    fn merge_combines_count_and_mean_exactly() {
        let mut a = RecursiveAccumulator::new();
        let mut b = RecursiveAccumulator::new();
        for y in [1.0, 2.0, 3.0, 4.0] {
            a.observe(y);
        }
        for y in [10.0, 20.0] {
            b.observe(y);
        }
        a.merge(&b);
        let e = a.estimate().unwrap();
        assert_eq!(e.n, 6);
        assert_eq!(e.mean, 40.0 / 6.0);
        assert!(e.variance > 0.0);
    }

    #[test]
    fn observe_after_merge_continues_from_merged_state() {
        let mut a = RecursiveAccumulator::new();
        let mut b = RecursiveAccumulator::new();
        a.observe(1.0);
        b.observe(3.0);
        a.merge(&b);
        // n = 2, sum = 4, S = 0 + 0 + 2²·1·1/2 = 2
        assert_eq!(a.sum_sq_centered(), 2.0);
        let e = a.observe(5.0);
        assert_eq!(e.n, 3);
        assert_eq!(e.mean, 3.0);
        assert_eq!(a.sum_sq_centered(), 6.0);
        assert_eq!(a.estimate(), Some(e));
    }

    #[test]
    fn merge_with_empty_is_identity() {
        let mut a = RecursiveAccumulator::new();
        a.observe(3.0);
        a.observe(5.0);
        let before = a;
        a.merge(&RecursiveAccumulator::new());
        assert_eq!(a, before);

        let mut empty = RecursiveAccumulator::new();
        empty.merge(&before);
        assert_eq!(empty, before);
    }

    #[test]
    fn merge_of_constant_partitions_stays_zero_variance() {
        let mut a = RecursiveAccumulator::new();
        let mut b = RecursiveAccumulator::new();
        for _ in 0..10 {
            a.observe(7.0);
            b.observe(7.0);
        }
        a.merge(&b);
        let e = a.estimate().unwrap();
        assert_eq!(e.mean, 7.0);
        assert_eq!(e.variance, 0.0);
    }
}
