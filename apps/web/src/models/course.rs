use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub id: i64,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Module {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lesson kinds known to the backend. Unrecognized values read as `Text`
/// so one odd row does not fail a whole course read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum LessonType {
    Text,
    Video,
    Quiz,
    Sandbox,
    Worksheet,
    Lab,
    Checklist,
}

impl From<String> for LessonType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "video" => LessonType::Video,
            "quiz" => LessonType::Quiz,
            "sandbox" => LessonType::Sandbox,
            "worksheet" => LessonType::Worksheet,
            "lab" => LessonType::Lab,
            "checklist" => LessonType::Checklist,
            _ => LessonType::Text,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lesson {
    pub id: i64,
    pub module_id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub lesson_type: LessonType,
    #[serde(default)]
    pub content: Option<String>,
    pub order_index: i32,
    #[serde(default)]
    pub duration: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModuleWithLessons {
    #[serde(flatten)]
    pub module: Module,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

/// A course row with its modules and lessons embedded, as returned by
/// `select=*,modules(*,lessons(*))`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseWithModules {
    #[serde(flatten)]
    pub course: Course,
    #[serde(default)]
    pub modules: Vec<ModuleWithLessons>,
}

impl CourseWithModules {
    /// Orders modules and their lessons by `order_index`. The store does not
    /// guarantee embedded row order.
    pub fn sorted(mut self) -> Self {
        self.modules.sort_by_key(|m| m.module.order_index);
        for module in &mut self.modules {
            module.lessons.sort_by_key(|l| l.order_index);
        }
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quiz {
    pub id: i64,
    pub lesson_id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuizQuestion {
    pub id: i64,
    pub quiz_id: i64,
    pub order_index: i32,
    pub question: String,
    pub choices: Vec<String>,
    pub answer_index: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QuizQuestion {
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.answer_index
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuizWithQuestions {
    #[serde(flatten)]
    pub quiz: Quiz,
    #[serde(default)]
    pub quiz_questions: Vec<QuizQuestion>,
}

impl QuizWithQuestions {
    pub fn sorted(mut self) -> Self {
        self.quiz_questions.sort_by_key(|q| q.order_index);
        self
    }

    /// Number of answers matching the answer key; missing answers count as wrong.
    pub fn score(&self, answers: &[usize]) -> usize {
        self.quiz_questions
            .iter()
            .zip(answers)
            .filter(|(q, a)| q.is_correct(**a))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lesson_json(id: i64, order: i32, kind: &str) -> serde_json::Value {
        json!({
            "id": id,
            "module_id": 1,
            "title": format!("Lesson {id}"),
            "type": kind,
            "order_index": order,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        })
    }

    #[test]
    fn test_unknown_lesson_type_reads_as_text() {
        let lesson: Lesson = serde_json::from_value(lesson_json(1, 1, "hologram")).unwrap();
        assert_eq!(lesson.lesson_type, LessonType::Text);

        let lesson: Lesson = serde_json::from_value(lesson_json(2, 1, "checklist")).unwrap();
        assert_eq!(lesson.lesson_type, LessonType::Checklist);
    }

    #[test]
    fn test_lesson_type_serializes_snake_case() {
        assert_eq!(serde_json::to_value(LessonType::Worksheet).unwrap(), json!("worksheet"));
    }

    #[test]
    fn test_course_with_modules_sorted_by_order_index() {
        let raw = json!({
            "id": 7,
            "slug": "vibe-coding",
            "title": "Vibe Coding Fundamentals",
            "modules": [
                {
                    "id": 2, "course_id": 7, "title": "Second", "order_index": 2,
                    "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z",
                    "lessons": [lesson_json(22, 2, "quiz"), lesson_json(21, 1, "video")]
                },
                {
                    "id": 1, "course_id": 7, "title": "First", "order_index": 1,
                    "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z"
                }
            ]
        });

        let course: CourseWithModules = serde_json::from_value(raw).unwrap();
        let course = course.sorted();

        assert_eq!(course.course.slug, "vibe-coding");
        assert_eq!(course.modules[0].module.title, "First");
        assert!(course.modules[0].lessons.is_empty());
        let ids: Vec<i64> = course.modules[1].lessons.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![21, 22]);
    }

    #[test]
    fn test_quiz_score_counts_matching_answers() {
        let raw = json!({
            "id": 1, "lesson_id": 11, "title": "Check",
            "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z",
            "quiz_questions": [
                {
                    "id": 2, "quiz_id": 1, "order_index": 2, "question": "b?",
                    "choices": ["x", "y"], "answer_index": 1,
                    "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z"
                },
                {
                    "id": 1, "quiz_id": 1, "order_index": 1, "question": "a?",
                    "choices": ["x", "y"], "answer_index": 0,
                    "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z"
                }
            ]
        });

        let quiz: QuizWithQuestions = serde_json::from_value(raw).unwrap();
        let quiz = quiz.sorted();

        assert_eq!(quiz.quiz_questions[0].question, "a?");
        assert_eq!(quiz.score(&[0, 1]), 2);
        assert_eq!(quiz.score(&[1, 1]), 1);
        assert_eq!(quiz.score(&[0]), 1);
    }
}
