use crate::config::{
    EXPECTED_HIT_PROGRESS, GOOD_POINTS, HIT_WINDOW_MS, HIT_WINDOW_PROGRESS, PERFECT_POINTS,
    PERFECT_WINDOW_MS, PERFECT_WINDOW_PROGRESS,
};
use crate::game::beat::Beat;
use std::cmp::Ordering;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum JudgeGrade {
    Perfect,
    Good,
    Miss,
}

impl JudgeGrade {
    pub fn is_hit(self) -> bool {
        !matches!(self, JudgeGrade::Miss)
    }
}

pub fn grade_points_for(grade: JudgeGrade) -> u32 {
    match grade {
        JudgeGrade::Perfect => PERFECT_POINTS,
        JudgeGrade::Good => GOOD_POINTS,
        JudgeGrade::Miss => 0,
    }
}

/// The judged outcome of one lane press.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Judgment {
    pub grade: JudgeGrade,
    pub lane: usize,
    /// 0–100, present on hits only.
    pub accuracy_percent: Option<f32>,
}

#[derive(Copy, Clone, Debug)]
pub struct PressEvaluation {
    pub grade: JudgeGrade,
    /// Distance of the beat's fall progress from the ideal hit point.
    pub accuracy: f32,
    pub time_error_ms: f32,
}

/// Classifies a press against a beat that has been falling for `age_ms` out
/// of `fall_duration_ms`. A press counts as a hit when it is close to the
/// ideal point either as a fraction of the fall or in absolute milliseconds.
pub fn evaluate_press(age_ms: u64, fall_duration_ms: u64) -> PressEvaluation {
    let progress = age_ms as f32 / fall_duration_ms as f32;
    let accuracy = (progress - EXPECTED_HIT_PROGRESS).abs();
    let expected_hit_ms = fall_duration_ms as f32 * EXPECTED_HIT_PROGRESS;
    let time_error_ms = (age_ms as f32 - expected_hit_ms).abs();

    let grade = if accuracy < HIT_WINDOW_PROGRESS || time_error_ms < HIT_WINDOW_MS {
        if accuracy < PERFECT_WINDOW_PROGRESS || time_error_ms < PERFECT_WINDOW_MS {
            JudgeGrade::Perfect
        } else {
            JudgeGrade::Good
        }
    } else {
        JudgeGrade::Miss
    };

    PressEvaluation {
        grade,
        accuracy,
        time_error_ms,
    }
}

pub fn accuracy_percent(accuracy: f32) -> f32 {
    ((1.0 - accuracy / HIT_WINDOW_PROGRESS) * 100.0).clamp(0.0, 100.0)
}

/// Picks the beat in a lane whose fall progress sits closest to the ideal hit
/// point. Ties go to the earliest spawn, then the lowest id, so selection is
/// deterministic.
pub fn best_candidate(beats: &[Beat], now_ms: u64, fall_duration_ms: u64) -> Option<Beat> {
    let deviation = |b: &Beat| {
        let progress = b.age_ms(now_ms) as f32 / fall_duration_ms as f32;
        (progress - EXPECTED_HIT_PROGRESS).abs()
    };

    beats.iter().copied().min_by(|a, b| {
        deviation(a)
            .partial_cmp(&deviation(b))
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.spawn_time_ms.cmp(&b.spawn_time_ms))
            .then_with(|| a.id.cmp(&b.id))
    })
}
