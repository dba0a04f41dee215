//! SM-2 spaced repetition algorithm.
//!
//! Based on SuperMemo 2 with a 4-point grade scale. The ease update is the
//! classic `EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))`, applied on
//! every review, pass or fail.

use super::{SchedulingResult, SpacedRepetitionAlgorithm};
use crate::types::{CardStatus, Grade, ReviewState};
use chrono::{DateTime, Duration, Utc};

/// SM-2 algorithm with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    pub first_interval: u32,
    pub second_interval: u32,
    pub failure_interval: u32,
    pub maximum_interval: u32,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_ease: 2.5,
            minimum_ease: 1.3,
            first_interval: 1,
            second_interval: 6,
            failure_interval: 1,
            maximum_interval: 36500,
        }
    }
}

impl SpacedRepetitionAlgorithm for Sm2 {
    fn name(&self) -> &'static str {
        "sm2"
    }

    fn initial_state(&self, now: DateTime<Utc>) -> ReviewState {
        ReviewState {
            last_reviewed: None,
            next_review: now,
            interval: 0,
            ease_factor: self.initial_ease,
            repetitions: 0,
            status: CardStatus::New,
        }
    }

    fn schedule(&self, state: &ReviewState, grade: Grade, now: DateTime<Utc>) -> SchedulingResult {
        let (interval, repetitions) = if grade.is_success() {
            let interval = match state.repetitions {
                0 => self.first_interval,
                1 => self.second_interval,
                _ => (f64::from(state.interval) * state.ease_factor)
                    .round()
                    .min(f64::from(self.maximum_interval)) as u32,
            };
            (interval.min(self.maximum_interval), state.repetitions + 1)
        } else {
            (self.failure_interval, 0)
        };

        let ease_factor = self.next_ease(state.ease_factor, grade);
        let next_due = now
            .checked_add_signed(Duration::days(i64::from(interval)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        SchedulingResult {
            new_state: ReviewState {
                last_reviewed: Some(now),
                next_review: next_due,
                interval,
                ease_factor,
                repetitions,
                status: CardStatus::derive(repetitions, interval),
            },
            next_due,
        }
    }
}

impl Sm2 {
    fn next_ease(&self, ease: f64, grade: Grade) -> f64 {
        let q = 5.0 - f64::from(grade.to_value());
        (ease + (0.1 - q * (0.08 + q * 0.02))).max(self.minimum_ease)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 8, 30, 0).unwrap()
    }

    fn state(repetitions: u32, interval: u32, ease_factor: f64) -> ReviewState {
        ReviewState {
            last_reviewed: None,
            next_review: now(),
            interval,
            ease_factor,
            repetitions,
            status: CardStatus::derive(repetitions, interval),
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn initial_state_is_due_now() {
        let sm2 = Sm2::default();
        let state = sm2.initial_state(now());
        assert_eq!(state.next_review, now());
        assert_eq!(state.interval, 0);
        assert_eq!(state.repetitions, 0);
        assert_eq!(state.status, CardStatus::New);
        assert!(state.last_reviewed.is_none());
    }

    #[test]
    fn three_easy_reviews() {
        let sm2 = Sm2::default();
        let mut current = sm2.initial_state(now());

        let expected = [(1, 1), (6, 2), (15, 3)];
        for (interval, repetitions) in expected {
            current = sm2.schedule(&current, Grade::Easy, now()).new_state;
            assert_eq!(current.interval, interval);
            assert_eq!(current.repetitions, repetitions);
            assert!(close(current.ease_factor, 2.5));
        }
        assert_eq!(current.status, CardStatus::Learning);
    }

    #[test]
    fn third_success_uses_ease_before_update() {
        let sm2 = Sm2::default();
        // Good lowers ease by 0.14, but the interval uses the old value.
        let result = sm2.schedule(&state(2, 6, 2.0), Grade::Good, now());
        assert_eq!(result.new_state.interval, 12);
        assert!(close(result.new_state.ease_factor, 1.86));
    }

    #[test]
    fn again_resets_progress() {
        let sm2 = Sm2::default();
        for prior in [state(0, 0, 2.5), state(3, 15, 2.2), state(9, 120, 2.8)] {
            let result = sm2.schedule(&prior, Grade::Again, now());
            assert_eq!(result.new_state.repetitions, 0);
            assert_eq!(result.new_state.interval, 1);
        }
    }

    #[test]
    fn hard_counts_as_failure() {
        let sm2 = Sm2::default();
        let result = sm2.schedule(&state(4, 20, 2.5), Grade::Hard, now());
        assert_eq!(result.new_state.repetitions, 0);
        assert_eq!(result.new_state.interval, 1);
        assert!(close(result.new_state.ease_factor, 2.18));
    }

    #[test]
    fn ease_factor_never_below_minimum() {
        let sm2 = Sm2::default();
        let mut current = state(0, 0, 1.4);
        for _ in 0..10 {
            current = sm2.schedule(&current, Grade::Again, now()).new_state;
            assert!(current.ease_factor >= sm2.minimum_ease);
        }
        assert!(close(current.ease_factor, 1.3));
    }

    #[test]
    fn interval_stops_at_maximum() {
        let sm2 = Sm2::default();
        let mut current = sm2.initial_state(now());
        for _ in 0..40 {
            current = sm2.schedule(&current, Grade::Easy, now()).new_state;
            assert!(current.interval <= sm2.maximum_interval);
        }
        assert_eq!(current.interval, sm2.maximum_interval);
        assert_eq!(current.repetitions, 40);
        assert_eq!(current.status, CardStatus::Mastered);
        assert_eq!(
            current.next_review,
            now() + Duration::days(i64::from(sm2.maximum_interval))
        );
    }

    #[test]
    fn next_review_saturates_at_latest_date() {
        let sm2 = Sm2::default();
        let late = DateTime::<Utc>::MAX_UTC - Duration::days(10);
        let result = sm2.schedule(&state(3, 200, 2.5), Grade::Good, late);
        assert_eq!(result.new_state.interval, 500);
        assert_eq!(result.next_due, DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn next_review_is_interval_days_ahead() {
        let sm2 = Sm2::default();
        let result = sm2.schedule(&state(1, 1, 2.5), Grade::Good, now());
        assert_eq!(result.next_due, now() + Duration::days(6));
        assert_eq!(result.new_state.next_review, result.next_due);
        assert_eq!(result.new_state.last_reviewed, Some(now()));
    }

    #[test]
    fn mastered_card_failing_drops_to_new() {
        let sm2 = Sm2::default();
        let prior = state(5, 30, 2.5);
        assert_eq!(prior.status, CardStatus::Mastered);
        let result = sm2.schedule(&prior, Grade::Again, now());
        assert_eq!(result.new_state.repetitions, 0);
        assert_eq!(result.new_state.interval, 1);
        assert_eq!(result.new_state.status, CardStatus::New);
    }

    #[test]
    fn reaching_mastery() {
        let sm2 = Sm2::default();
        // 4 reps, 15 days, ease 2.5 -> 38 days on the fifth success.
        let result = sm2.schedule(&state(4, 15, 2.5), Grade::Easy, now());
        assert_eq!(result.new_state.interval, 38);
        assert_eq!(result.new_state.repetitions, 5);
        assert_eq!(result.new_state.status, CardStatus::Mastered);
    }
}
