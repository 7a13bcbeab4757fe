use serde::Serialize;

use super::{SubjectRef, TestResult, TopicProgress};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MasteryStatus {
    Mastered,
    InProgress,
    Weak,
    NotStarted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterMastery {
    pub chapter: String,
    pub status: MasteryStatus,
    pub mastered: usize,
    pub weak: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectMastery {
    pub subject: String,
    pub chapters: Vec<ChapterMastery>,
}

pub fn topic_mastery(
    topic_id: &str,
    progress: &[TopicProgress],
    results: &[TestResult],
) -> MasteryStatus {
    let row = progress.iter().find(|p| p.topic_id == topic_id);
    let tests: Vec<&TestResult> = results.iter().filter(|r| r.topic_id == topic_id).collect();

    if !tests.is_empty() {
        let avg = tests.iter().map(|t| t.ratio()).sum::<f64>() / tests.len() as f64;
        return if avg >= 0.8 {
            MasteryStatus::Mastered
        } else if avg >= 0.5 {
            MasteryStatus::InProgress
        } else {
            MasteryStatus::Weak
        };
    }

    match row {
        Some(p) if p.completed => MasteryStatus::InProgress,
        _ => MasteryStatus::NotStarted,
    }
}

pub fn chapter_mastery(
    name: &str,
    topic_ids: &[&str],
    progress: &[TopicProgress],
    results: &[TestResult],
) -> ChapterMastery {
    let statuses: Vec<MasteryStatus> =
        topic_ids.iter().map(|id| topic_mastery(id, progress, results)).collect();
    let count = |s: MasteryStatus| statuses.iter().filter(|x| **x == s).count();

    let mastered = count(MasteryStatus::Mastered);
    let in_progress = count(MasteryStatus::InProgress);
    let weak = count(MasteryStatus::Weak);
    let total = statuses.len();

    let status = if total == 0 {
        MasteryStatus::NotStarted
    } else if mastered == total {
        MasteryStatus::Mastered
    } else if weak > mastered {
        MasteryStatus::Weak
    } else if in_progress > 0 || mastered > 0 {
        MasteryStatus::InProgress
    } else {
        MasteryStatus::NotStarted
    };

    ChapterMastery { chapter: name.to_string(), status, mastered, weak, total }
}

/// Subjects without chapters are left out.
pub fn mastery_map(
    subjects: &[SubjectRef],
    progress: &[TopicProgress],
    results: &[TestResult],
) -> Vec<SubjectMastery> {
    subjects
        .iter()
        .filter(|s| !s.chapters.is_empty())
        .map(|subject| SubjectMastery {
            subject: subject.name.clone(),
            chapters: subject
                .chapters
                .iter()
                .map(|chapter| {
                    let ids: Vec<&str> = chapter.topics.iter().map(|t| t.id.as_str()).collect();
                    chapter_mastery(&chapter.name, &ids, progress, results)
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::fixtures::{done, result};
    use crate::insights::{ChapterRef, Performance, TopicRef};

    #[test]
    fn topic_status_from_tests_and_progress() {
        let progress = vec![done("Fractions")];
        let results = vec![
            result("Integers", 5, 5, Performance::Strong),
            result("Integers", 4, 5, Performance::Strong),
            result("Decimals", 1, 5, Performance::Weak),
        ];

        assert_eq!(topic_mastery("integers", &progress, &results), MasteryStatus::Mastered);
        assert_eq!(topic_mastery("decimals", &progress, &results), MasteryStatus::Weak);
        assert_eq!(topic_mastery("fractions", &progress, &results), MasteryStatus::InProgress);
        assert_eq!(topic_mastery("algebra", &progress, &results), MasteryStatus::NotStarted);
    }

    #[test]
    fn incomplete_progress_row_is_not_started() {
        let progress =
            vec![TopicProgress { topic_id: "x".into(), topic_name: None, completed: false }];
        assert_eq!(topic_mastery("x", &progress, &[]), MasteryStatus::NotStarted);
    }

    #[test]
    fn chapter_rollup() {
        let results = vec![
            result("A", 5, 5, Performance::Strong),
            result("B", 1, 5, Performance::Weak),
            result("C", 0, 5, Performance::Weak),
        ];

        let all_mastered = chapter_mastery("ch", &["a"], &[], &results);
        assert_eq!(all_mastered.status, MasteryStatus::Mastered);

        let weak = chapter_mastery("ch", &["a", "b", "c"], &[], &results);
        assert_eq!(weak.status, MasteryStatus::Weak);
        assert_eq!((weak.mastered, weak.weak, weak.total), (1, 2, 3));

        let mixed = chapter_mastery("ch", &["a", "b", "z"], &[], &results);
        assert_eq!(mixed.status, MasteryStatus::InProgress);

        let untouched = chapter_mastery("ch", &["z"], &[], &results);
        assert_eq!(untouched.status, MasteryStatus::NotStarted);

        let empty = chapter_mastery("ch", &[], &[], &results);
        assert_eq!((empty.status, empty.total), (MasteryStatus::NotStarted, 0));
    }

    #[test]
    fn map_skips_empty_subjects() {
        let subjects = vec![
            SubjectRef { name: "English".into(), chapters: vec![] },
            SubjectRef {
                name: "Science".into(),
                chapters: vec![ChapterRef {
                    name: "Light".into(),
                    topics: vec![TopicRef { id: "light".into(), name: "Light".into() }],
                }],
            },
        ];
        let map = mastery_map(&subjects, &[done("Light")], &[]);
        assert_eq!(map.len(), 1);
        assert_eq!(map[0].subject, "Science");
        assert_eq!(map[0].chapters[0].status, MasteryStatus::InProgress);
    }
}
