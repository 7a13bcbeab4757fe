//! Learning analytics computed from rows the caller has already fetched.

pub mod grading;
pub mod mastery;
pub mod mistakes;
pub mod snapshot;
pub mod streak;
pub mod warnings;

use serde::{Deserialize, Serialize};

use self::mastery::SubjectMastery;
use self::mistakes::MistakePattern;
use self::snapshot::LearningSnapshot;
use self::warnings::RiskAlert;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Performance {
    Strong,
    Average,
    Weak,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub topic_id: String,
    #[serde(default)]
    pub topic_name: Option<String>,
    pub score: u32,
    pub total_questions: u32,
    pub performance: Performance,
    #[serde(default)]
    pub weak_areas: Vec<String>,
}

impl TestResult {
    /// Fraction correct; an empty test counts as zero.
    pub fn ratio(&self) -> f64 {
        if self.total_questions == 0 {
            0.0
        } else {
            f64::from(self.score) / f64::from(self.total_questions)
        }
    }

    fn lowercase_topic(&self) -> Option<String> {
        self.topic_name.as_deref().map(str::to_lowercase).filter(|n| !n.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicProgress {
    pub topic_id: String,
    #[serde(default)]
    pub topic_name: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterRef {
    pub name: String,
    #[serde(default)]
    pub topics: Vec<TopicRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectRef {
    pub name: String,
    #[serde(default)]
    pub chapters: Vec<ChapterRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSummary {
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsRequest {
    #[serde(default)]
    pub subjects: Vec<SubjectRef>,
    #[serde(default)]
    pub progress: Vec<TopicProgress>,
    #[serde(default)]
    pub test_results: Vec<TestResult>,
    #[serde(default)]
    pub streak: StreakSummary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsReport {
    pub snapshot: LearningSnapshot,
    pub mastery_map: Vec<SubjectMastery>,
    pub mistake_patterns: Vec<MistakePattern>,
    pub warnings: Vec<RiskAlert>,
}

pub fn build_report(request: &InsightsRequest) -> InsightsReport {
    InsightsReport {
        snapshot: snapshot::snapshot(&request.test_results, &request.progress, &request.streak),
        mastery_map: mastery::mastery_map(
            &request.subjects,
            &request.progress,
            &request.test_results,
        ),
        mistake_patterns: mistakes::analyze(&request.test_results),
        warnings: warnings::risk_alerts(&request.progress, &request.test_results),
    }
}

/// "linear equations" -> "Linear Equations"
pub(crate) fn capitalize_words(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
