use serde::Serialize;

use super::{Performance, StreakSummary, TestResult, TopicProgress};

/// Completed topics at which the completion factor saturates.
const COMPLETION_TARGET: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LearningStyle {
    #[serde(rename = "Exploring")]
    Exploring,
    #[serde(rename = "Quick Learner")]
    QuickLearner,
    #[serde(rename = "Steady Builder")]
    SteadyBuilder,
    #[serde(rename = "Deep Diver")]
    DeepDiver,
    #[serde(rename = "Visual Thinker")]
    VisualThinker,
}

impl LearningStyle {
    pub fn description(&self) -> &'static str {
        match self {
            LearningStyle::Exploring => "Take more quizzes to discover your style",
            LearningStyle::QuickLearner => "You grasp concepts rapidly and excel in tests",
            LearningStyle::SteadyBuilder => "You learn through consistent practice",
            LearningStyle::DeepDiver => "You benefit from thorough explanations",
            LearningStyle::VisualThinker => "You learn best with examples and diagrams",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningSnapshot {
    pub health_score: u32,
    pub learning_style: LearningStyle,
    pub learning_style_description: &'static str,
    pub topics_completed: usize,
    pub strong_results: usize,
    pub current_streak: u32,
    pub longest_streak: u32,
}

fn count(results: &[TestResult], performance: Performance) -> usize {
    results.iter().filter(|r| r.performance == performance).count()
}

fn mean_ratio(results: &[TestResult]) -> f64 {
    results.iter().map(TestResult::ratio).sum::<f64>() / results.len() as f64
}

/// Weighted 0-100 score: 40% test average, 30% completion, 30% strong-result share.
pub fn health_score(results: &[TestResult], progress: &[TopicProgress]) -> u32 {
    if results.is_empty() && progress.is_empty() {
        return 0;
    }

    let (avg_test, consistency) = if results.is_empty() {
        (50.0, 50.0)
    } else {
        let strong = count(results, Performance::Strong) as f64;
        (mean_ratio(results) * 100.0, strong / results.len() as f64 * 100.0)
    };

    let completed = progress.iter().filter(|p| p.completed).count() as f64;
    let completion = (completed / COMPLETION_TARGET * 100.0).min(100.0);

    (avg_test * 0.4 + completion * 0.3 + consistency * 0.3).round() as u32
}

pub fn learning_style(results: &[TestResult]) -> LearningStyle {
    if results.len() < 3 {
        return LearningStyle::Exploring;
    }

    let avg = mean_ratio(results);
    let strong = count(results, Performance::Strong);
    let weak = count(results, Performance::Weak);

    if avg > 0.8 && strong > weak * 2 {
        LearningStyle::QuickLearner
    } else if avg > 0.6 {
        LearningStyle::SteadyBuilder
    } else if weak > strong {
        LearningStyle::DeepDiver
    } else {
        LearningStyle::VisualThinker
    }
}

pub fn snapshot(
    results: &[TestResult],
    progress: &[TopicProgress],
    streak: &StreakSummary,
) -> LearningSnapshot {
    let style = learning_style(results);
    LearningSnapshot {
        health_score: health_score(results, progress),
        learning_style: style,
        learning_style_description: style.description(),
        topics_completed: progress.iter().filter(|p| p.completed).count(),
        strong_results: count(results, Performance::Strong),
        current_streak: streak.current_streak,
        longest_streak: streak.longest_streak,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::fixtures::{done, result};

    #[test]
    fn no_activity_scores_zero() {
        assert_eq!(health_score(&[], &[]), 0);
    }

    #[test]
    fn progress_without_tests_uses_neutral_factors() {
        // 50*0.4 + 50*0.3 + 50*0.3
        let progress: Vec<_> = (0..10).map(|i| done(&format!("Topic {i}"))).collect();
        assert_eq!(health_score(&[], &progress), 50);
    }

    #[test]
    fn completion_factor_saturates() {
        let progress: Vec<_> = (0..40).map(|i| done(&format!("Topic {i}"))).collect();
        let results = vec![result("A", 5, 5, Performance::Strong)];
        assert_eq!(health_score(&results, &progress), 100);
    }

    #[test]
    fn styles() {
        let strong = |t: &str| result(t, 5, 5, Performance::Strong);
        let weak = |t: &str| result(t, 1, 5, Performance::Weak);
        let average = |t: &str| result(t, 7, 10, Performance::Average);

        assert_eq!(learning_style(&[strong("a"), strong("b")]), LearningStyle::Exploring);
        let strong_run = [strong("a"), strong("b"), strong("c")];
        assert_eq!(learning_style(&strong_run), LearningStyle::QuickLearner);
        let average_run = [average("a"), average("b"), average("c")];
        assert_eq!(learning_style(&average_run), LearningStyle::SteadyBuilder);
        assert_eq!(learning_style(&[weak("a"), weak("b"), strong("c")]), LearningStyle::DeepDiver);
        assert_eq!(
            learning_style(&vec![result("a", 1, 2, Performance::Average); 3]),
            LearningStyle::VisualThinker
        );
    }

    #[test]
    fn style_serializes_as_display_name() {
        let json = serde_json::to_value(LearningStyle::QuickLearner).unwrap();
        assert_eq!(json, "Quick Learner");
    }
}
