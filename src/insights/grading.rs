use serde::{Deserialize, Serialize};

use super::Performance;
use crate::errors::AppError;
use crate::models::QuizQuestion;

#[derive(Debug, Clone, Deserialize)]
pub struct GradeRequest {
    pub questions: Vec<QuizQuestion>,
    /// Selected option per question; `None` when skipped.
    pub answers: Vec<Option<usize>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question: String,
    pub selected: Option<usize>,
    pub correct: usize,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradedQuiz {
    pub score: u32,
    pub total_questions: u32,
    /// Rounded for display; `performance` uses the exact value.
    pub percentage: u32,
    pub performance: Performance,
    pub answers: Vec<AnswerRecord>,
}

pub fn classify(percentage: f64) -> Performance {
    if percentage >= 80.0 {
        Performance::Strong
    } else if percentage >= 50.0 {
        Performance::Average
    } else {
        Performance::Weak
    }
}

pub fn grade(request: &GradeRequest) -> Result<GradedQuiz, AppError> {
    if request.answers.len() != request.questions.len() {
        return Err(AppError::AnswerCountMismatch {
            expected: request.questions.len(),
            actual: request.answers.len(),
        });
    }

    let answers: Vec<AnswerRecord> = request
        .questions
        .iter()
        .zip(&request.answers)
        .map(|(q, selected)| AnswerRecord {
            question: q.question.clone(),
            selected: *selected,
            correct: q.correct,
            is_correct: *selected == Some(q.correct),
        })
        .collect();

    let score = answers.iter().filter(|a| a.is_correct).count() as u32;
    let total = answers.len() as u32;
    let percentage = if total == 0 { 0.0 } else { f64::from(score) / f64::from(total) * 100.0 };

    Ok(GradedQuiz {
        score,
        total_questions: total,
        percentage: percentage.round() as u32,
        performance: classify(percentage),
        answers,
    })
}
