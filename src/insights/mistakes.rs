use serde::Serialize;

use super::{Performance, TestResult};

const MAX_PATTERNS: usize = 5;

struct Category {
    kind: &'static str,
    keywords: &'static [&'static str],
    description: &'static str,
    suggestion: &'static str,
}

const CATEGORIES: &[Category] = &[
    Category {
        kind: "Sign Errors",
        keywords: &["negative", "minus", "sign", "integer"],
        description: "Mistakes with positive/negative numbers",
        suggestion: "Practice integer operations with number lines",
    },
    Category {
        kind: "Assumption Without Reasoning",
        keywords: &["assumption", "reasoning", "proof", "explain"],
        description: "Jumping to conclusions without steps",
        suggestion: "Write out each step before answering",
    },
    Category {
        kind: "Word Problem Misinterpretation",
        keywords: &["word", "problem", "application", "real"],
        description: "Difficulty understanding problem context",
        suggestion: "Underline key information in word problems",
    },
    Category {
        kind: "Calculation Errors",
        keywords: &["calculate", "arithmetic", "compute", "math"],
        description: "Basic arithmetic mistakes",
        suggestion: "Double-check calculations before submitting",
    },
    Category {
        kind: "Concept Confusion",
        keywords: &["concept", "understand", "definition", "theory"],
        description: "Mixing up related concepts",
        suggestion: "Create comparison charts for similar concepts",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MistakePattern {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub count: usize,
    pub description: &'static str,
    pub suggestion: &'static str,
}

impl Category {
    fn matches(&self, result: &TestResult) -> bool {
        let topic = result.lowercase_topic().unwrap_or_default();
        let areas: Vec<String> = result.weak_areas.iter().map(|a| a.to_lowercase()).collect();
        self.keywords
            .iter()
            .any(|k| topic.contains(k) || areas.iter().any(|a| a.contains(k)))
    }
}

/// Buckets weak and average results by keyword category, most frequent first.
pub fn analyze(results: &[TestResult]) -> Vec<MistakePattern> {
    let struggling: Vec<&TestResult> = results
        .iter()
        .filter(|r| matches!(r.performance, Performance::Weak | Performance::Average))
        .collect();

    let mut patterns: Vec<MistakePattern> = CATEGORIES
        .iter()
        .filter_map(|category| {
            let count = struggling.iter().filter(|r| category.matches(r)).count();
            (count > 0).then_some(MistakePattern {
                kind: category.kind,
                count,
                description: category.description,
                suggestion: category.suggestion,
            })
        })
        .collect();

    if patterns.is_empty() {
        let weak = results.iter().filter(|r| r.performance == Performance::Weak).count();
        if weak > 0 {
            patterns.push(MistakePattern {
                kind: "Practice Needed",
                count: weak,
                description: "More practice required in tested areas",
                suggestion: "Review topics and retake quizzes",
            });
        }
    }

    patterns.sort_by(|a, b| b.count.cmp(&a.count));
    patterns.truncate(MAX_PATTERNS);
    patterns
}
