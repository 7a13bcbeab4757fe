use serde::Serialize;

use super::{capitalize_words, Performance, TestResult, TopicProgress};

const MAX_ALERTS: usize = 3;

/// Advanced topic and the topics it builds on, in evaluation order.
const PREREQUISITES: &[(&str, &[&str])] = &[
    // Mathematics
    ("linear equations", &["integers", "fractions", "algebraic expressions"]),
    ("quadratic equations", &["linear equations", "factorization", "algebraic expressions"]),
    ("polynomials", &["algebraic expressions", "integers", "exponents"]),
    ("coordinate geometry", &["linear equations", "graphs", "number systems"]),
    ("mensuration", &["geometry", "area", "perimeter"]),
    ("statistics", &["data handling", "graphs", "averages"]),
    ("probability", &["fractions", "statistics", "ratios"]),
    // Science
    ("chemical equations", &["atoms", "molecules", "elements"]),
    ("chemical reactions", &["chemical equations", "atoms", "periodic table"]),
    ("electricity", &["atoms", "current", "circuits"]),
    ("magnetism", &["electricity", "magnetic field"]),
    ("light", &["reflection", "refraction", "mirrors"]),
    ("force", &["motion", "newton", "gravity"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAlert {
    pub id: String,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub weak_topic: String,
    pub affected_topic: String,
    pub suggested_action: String,
    pub suggested_path: String,
}

/// Unique lowercase names, first occurrence first.
fn distinct(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in names {
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

fn overlaps(known: &[String], topic: &str) -> bool {
    known.iter().any(|k| k.contains(topic) || topic.contains(k.as_str()))
}

pub fn risk_alerts(progress: &[TopicProgress], results: &[TestResult]) -> Vec<RiskAlert> {
    let weak_topics = distinct(
        results
            .iter()
            .filter(|r| r.performance == Performance::Weak)
            .filter_map(TestResult::lowercase_topic),
    );
    let completed_topics = distinct(
        progress
            .iter()
            .filter(|p| p.completed)
            .filter_map(|p| p.topic_name.as_deref())
            .map(str::to_lowercase)
            .filter(|n| !n.is_empty()),
    );

    let mut alerts: Vec<RiskAlert> = Vec::new();
    'table: for (advanced, prereqs) in PREREQUISITES {
        for prereq in *prereqs {
            if alerts.len() >= MAX_ALERTS {
                break 'table;
            }

            let is_weak = overlaps(&weak_topics, prereq);
            let is_incomplete = !overlaps(&completed_topics, prereq);
            if !(is_weak || is_incomplete) {
                continue;
            }
            if alerts.iter().any(|a| a.weak_topic == *prereq && a.affected_topic == *advanced) {
                continue;
            }

            alerts.push(RiskAlert {
                id: format!("{prereq}-{advanced}"),
                severity: if is_weak { Severity::High } else { Severity::Medium },
                title: "Potential Challenge Ahead".to_string(),
                description: format!(
                    "You may struggle with {} due to gaps in {}",
                    capitalize_words(advanced),
                    capitalize_words(prereq)
                ),
                weak_topic: prereq.to_string(),
                affected_topic: advanced.to_string(),
                suggested_action: format!("Revise {}", capitalize_words(prereq)),
                suggested_path: "/subjects".to_string(),
            });
        }
    }

    if alerts.is_empty() {
        if let Some(first) = weak_topics.first() {
            let n = weak_topics.len();
            alerts.push(RiskAlert {
                id: "general-weak".to_string(),
                severity: Severity::Medium,
                title: "Areas Needing Attention".to_string(),
                description: format!(
                    "You have {n} topic{} with weak performance that may affect future learning",
                    if n == 1 { "" } else { "s" }
                ),
                weak_topic: first.clone(),
                affected_topic: "advanced topics".to_string(),
                suggested_action: "Review weak topics before moving forward".to_string(),
                suggested_path: "/progress".to_string(),
            });
        }
    }

    alerts
}
