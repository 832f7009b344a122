//! Fabricated progress timelines for long agent calls.
//!
//! The backend gives no mid-flight progress, so the frontends show a staged
//! timeline that is a pure function of wall-clock elapsed time: each named
//! step owns a weighted slice of a nominal duration, the final step is
//! weighted longest, and once the nominal duration is exhausted the timeline
//! holds at the last step and 100% without looping. The owner tears the
//! display down the moment the real request settles; nothing here waits.

use std::time::Duration;

/// One named step with its share of the nominal duration.
#[derive(Debug, Clone, Copy)]
pub struct Step {
    pub label: &'static str,
    pub weight: f32,
}

/// Where the fabricated timeline stands at a given elapsed time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSample {
    pub step_index: usize,
    pub label: &'static str,
    /// 0.0..=100.0, monotone nondecreasing in elapsed time.
    pub percent: f32,
    /// 0.0..=100.0 within the current step; resets when the step advances
    /// and holds at 100 once the nominal duration is exhausted.
    pub step_percent: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct ProgressTimeline {
    steps: &'static [Step],
    nominal: Duration,
}

impl ProgressTimeline {
    pub fn new(steps: &'static [Step], nominal: Duration) -> Self {
        debug_assert!(!steps.is_empty());
        Self { steps, nominal }
    }

    pub fn steps(&self) -> &'static [Step] {
        self.steps
    }

    /// Sample the timeline. Total over any `elapsed`, including past the
    /// nominal duration.
    pub fn sample(&self, elapsed: Duration) -> ProgressSample {
        let total_weight: f32 = self.steps.iter().map(|s| s.weight).sum();
        let fraction =
            (elapsed.as_secs_f32() / self.nominal.as_secs_f32()).clamp(0.0, 1.0);

        let mut consumed = 0.0;
        for (i, step) in self.steps.iter().enumerate() {
            let share = step.weight / total_weight;
            if fraction < consumed + share || i == self.steps.len() - 1 {
                let step_percent = ((fraction - consumed) / share * 100.0).clamp(0.0, 100.0);
                return ProgressSample {
                    step_index: i,
                    label: step.label,
                    percent: fraction * 100.0,
                    step_percent,
                };
            }
            consumed += share;
        }
        unreachable!("step table is never empty")
    }
}

pub fn product_search() -> ProgressTimeline {
    const STEPS: &[Step] = &[
        Step { label: "Understanding your question", weight: 1.0 },
        Step { label: "Market research", weight: 2.0 },
        Step { label: "Matching products to your profile", weight: 2.0 },
        Step { label: "Preparing results", weight: 3.0 },
    ];
    ProgressTimeline::new(STEPS, Duration::from_secs(18))
}

pub fn analyst() -> ProgressTimeline {
    const STEPS: &[Step] = &[
        Step { label: "Reading your portfolio", weight: 1.0 },
        Step { label: "Market research", weight: 2.0 },
        Step { label: "Portfolio analysis", weight: 2.0 },
        Step { label: "Writing the report", weight: 3.0 },
    ];
    ProgressTimeline::new(STEPS, Duration::from_secs(25))
}

pub fn time_machine() -> ProgressTimeline {
    const STEPS: &[Step] = &[
        Step { label: "Modelling the decision", weight: 1.0 },
        Step { label: "Projecting alternative outcomes", weight: 2.0 },
        Step { label: "Comparing timelines", weight: 3.0 },
    ];
    ProgressTimeline::new(STEPS, Duration::from_secs(20))
}

pub fn financial_team() -> ProgressTimeline {
    const STEPS: &[Step] = &[
        Step { label: "Routing to the right specialist", weight: 1.0 },
        Step { label: "Gathering your financial picture", weight: 2.0 },
        Step { label: "Recommendation agent", weight: 2.0 },
        Step { label: "Finalizing", weight: 3.0 },
    ];
    ProgressTimeline::new(STEPS, Duration::from_secs(30))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_first_step_and_zero_percent() {
        let sample = product_search().sample(Duration::ZERO);
        assert_eq!(sample.step_index, 0);
        assert_eq!(sample.percent, 0.0);
    }

    #[test]
    fn holds_at_last_step_past_the_nominal_duration() {
        let timeline = analyst();
        let at_end = timeline.sample(Duration::from_secs(25));
        let long_after = timeline.sample(Duration::from_secs(600));
        assert_eq!(at_end.step_index, timeline.steps().len() - 1);
        assert_eq!(long_after.step_index, timeline.steps().len() - 1);
        assert_eq!(long_after.percent, 100.0);
        assert_eq!(long_after.label, at_end.label);
    }

    #[test]
    fn step_percent_resets_when_the_step_advances() {
        // time_machine: weights 1/2/3 over 20s, so the first step ends at
        // 20s / 6 ≈ 3.33s.
        let timeline = time_machine();

        let late_in_first = timeline.sample(Duration::from_secs(3));
        assert_eq!(late_in_first.step_index, 0);
        assert!(late_in_first.step_percent > 80.0);

        let early_in_second = timeline.sample(Duration::from_secs(4));
        assert_eq!(early_in_second.step_index, 1);
        assert!(early_in_second.step_percent < late_in_first.step_percent);
        // Overall progress still moves forward across the boundary.
        assert!(early_in_second.percent > late_in_first.percent);

        let held = timeline.sample(Duration::from_secs(600));
        assert_eq!(held.step_percent, 100.0);
    }

    #[test]
    fn final_step_owns_the_largest_slice() {
        for timeline in [product_search(), analyst(), time_machine(), financial_team()] {
            let steps = timeline.steps();
            let last = steps[steps.len() - 1].weight;
            assert!(steps[..steps.len() - 1].iter().all(|s| s.weight <= last));
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Monotone nondecreasing in elapsed time, for both percent and
            /// step index, across the whole sampling range.
            #[test]
            fn sampling_is_monotone(mut times in proptest::collection::vec(0u64..120_000, 2..30)) {
                times.sort_unstable();
                let timeline = financial_team();
                let mut prev = timeline.sample(Duration::ZERO);
                for ms in times {
                    let next = timeline.sample(Duration::from_millis(ms));
                    prop_assert!(next.percent >= prev.percent);
                    prop_assert!(next.step_index >= prev.step_index);
                    prop_assert!((0.0..=100.0).contains(&next.percent));
                    prev = next;
                }
            }
        }
    }
}
