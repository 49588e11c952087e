//! Composite performance score.

use crate::config::ScoringPolicy;

/// Map a metric onto [0, 100]: 100 at `best`, 0 at `worst`, clamped beyond.
/// Works for both orientations, since `best` may lie above or below `worst`.
fn component(value: f64, best: f64, worst: f64) -> f64 {
    ((value - worst) / (best - worst) * 100.0).clamp(0.0, 100.0)
}

impl ScoringPolicy {
    /// Score averaged handler metrics. Non-increasing in FCR and mortality,
    /// non-decreasing in daily gain. An FCR of 0 means none was measured
    /// and earns no FCR points.
    pub fn score(&self, avg_fcr: f64, avg_mortality: f64, avg_daily_gain: f64) -> f64 {
        let fcr_score = if avg_fcr > 0.0 {
            component(avg_fcr, self.fcr_best, self.fcr_worst)
        } else {
            0.0
        };
        let mortality_score = component(avg_mortality, self.mortality_best, self.mortality_worst);
        let gain_score = component(avg_daily_gain, self.gain_best, self.gain_worst);

        fcr_score * self.fcr_weight
            + mortality_score * self.mortality_weight
            + gain_score * self.gain_weight
    }
}
