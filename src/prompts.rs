//! Fixed instruction templates. Output is a pure function of the inputs.

use crate::models::{ChatMode, LessonContext};

pub fn tutor_instruction(mode: ChatMode, ctx: &LessonContext) -> String {
    match mode {
        ChatMode::Teacher => teacher_instruction(ctx),
        ChatMode::Student => teach_back_instruction(ctx),
    }
}

fn teacher_instruction(ctx: &LessonContext) -> String {
    format!(
        "You are a friendly, patient NCERT teacher for Grade {grade} students in India. \
You are teaching the topic \"{topic}\" from the chapter \"{chapter}\" in {subject}.

Guidelines:
- Explain concepts step by step in language suited to Grade {grade}
- Use everyday examples that Indian students will recognise
- Offer simple analogies
- For mathematics, show every step of a worked solution
- Be encouraging and supportive
- Keep answers concise but complete
- Follow NCERT terminology and approach",
        grade = ctx.grade,
        topic = ctx.topic_name,
        chapter = ctx.chapter_name,
        subject = ctx.subject_name,
    )
}

fn teach_back_instruction(ctx: &LessonContext) -> String {
    format!(
        "You are an expert evaluator helping a Grade {grade} student master \"{topic}\" from {subject} through teach-back.

The student explains the concept to you as if they were the teacher, and you evaluate the explanation.

Guidelines:
- Start by asking the student to explain the concept in their own words
- Evaluate each explanation on three criteria:
  1. Concept Accuracy: is the core idea correct? Point out incorrect statements
  2. Missing Steps: which important steps or details were left out?
  3. Misconceptions: identify misunderstandings and correct them gently
- Give specific, constructive feedback with examples
- Ask follow-up questions that probe deeper understanding
- Praise what was right before addressing gaps
- If the student is stuck, give hints rather than the answer
- Keep answers concise but complete",
        grade = ctx.grade,
        topic = ctx.topic_name,
        subject = ctx.subject_name,
    )
}

pub fn quiz_instruction(topic: &str, grade: u32, count: u32) -> String {
    format!(
        "You are an NCERT quiz generator for Grade {grade} students. \
Generate exactly {count} multiple choice questions about \"{topic}\". \
Each question has four options. Questions must suit Grade {grade} and follow the NCERT curriculum."
    )
}

pub fn quiz_request(topic: &str, grade: u32, count: u32) -> String {
    format!("Generate {count} quiz questions about \"{topic}\" for Grade {grade}.")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> LessonContext {
        LessonContext {
            topic_name: "Photosynthesis".into(),
            chapter_name: "Nutrition in Plants".into(),
            subject_name: "Science".into(),
            grade: 7,
        }
    }

    #[test]
    fn identical_inputs_give_identical_prompts() {
        let ctx = context();
        for mode in [ChatMode::Teacher, ChatMode::Student] {
            assert_eq!(tutor_instruction(mode, &ctx), tutor_instruction(mode, &ctx));
        }
    }

    #[test]
    fn mode_selects_the_template() {
        let ctx = context();
        let teacher = tutor_instruction(ChatMode::Teacher, &ctx);
        let student = tutor_instruction(ChatMode::Student, &ctx);

        assert_ne!(teacher, student);
        let framing = "\"Photosynthesis\" from the chapter \"Nutrition in Plants\" in Science";
        assert!(teacher.contains(framing));
        assert!(teacher.contains("Grade 7"));
        assert!(student.contains("Concept Accuracy"));
        assert!(student.contains("Missing Steps"));
        assert!(student.contains("Misconceptions"));
    }

    #[test]
    fn context_fields_are_substituted_verbatim() {
        let mut ctx = context();
        ctx.topic_name = "Ratio & \"Proportion\"".into();
        assert!(tutor_instruction(ChatMode::Student, &ctx).contains("\"Ratio & \"Proportion\"\""));
    }

    #[test]
    fn quiz_prompts_name_count_topic_and_grade() {
        let system = quiz_instruction("Fractions", 6, 5);
        assert!(system.contains("exactly 5 multiple choice questions about \"Fractions\""));
        assert!(system.contains("Grade 6"));
        assert_eq!(
            quiz_request("Fractions", 6, 5),
            "Generate 5 quiz questions about \"Fractions\" for Grade 6."
        );
    }
}
