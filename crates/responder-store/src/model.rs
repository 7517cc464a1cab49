use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::outcome::Rejection;

/// The persisted unit: every question, in insertion order.
pub type Document = Vec<Question>;

/// Caller fields that have no dedicated slot, carried through unchanged.
pub type ExtraFields = Map<String, Value>;

/// Generate a fresh opaque entity identifier (random UUID v4).
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// A stored answer, embedded in its question.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub id: String,
    pub author: String,
    pub summary: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// A stored question with its answers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub author: String,
    pub summary: String,
    /// Documents written without this key read back as an empty list.
    #[serde(default)]
    pub answers: Vec<Answer>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Question {
    /// First answer whose id equals `answer_id`.
    pub fn answer(&self, answer_id: &str) -> Option<&Answer> {
        self.answers.iter().find(|answer| answer.id == answer_id)
    }
}

/// Author and summary slots shared by every candidate entity.
pub trait Draft {
    fn has_author(&self) -> bool;
    fn has_summary(&self) -> bool;
}

/// Completeness validation: both `author` and `summary` must be present.
///
/// Only presence of the key is checked. An empty string, `null` or any
/// other value counts as present.
pub fn is_complete<D: Draft + ?Sized>(draft: &D) -> bool {
    draft.has_author() && draft.has_summary()
}

/// Treats a key that is present as `Some`, even when its value is `null`.
/// Paired with `#[serde(default)]`, so a missing key stays `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Text stored for a present candidate field. Strings are kept as-is,
/// `null` becomes empty and any other value its JSON text.
fn field_text(value: Option<Value>) -> String {
    match value {
        Some(Value::String(text)) => text,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Caller input for question creation.
///
/// An `id` supplied by the caller lands in `extra` and is replaced when the
/// question is stored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionDraft {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub author: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub summary: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answers: Option<Vec<Answer>>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl QuestionDraft {
    pub fn new(author: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            author: Some(Value::String(author.into())),
            summary: Some(Value::String(summary.into())),
            ..Self::default()
        }
    }

    /// Validate completeness, yielding a question that only lacks its id.
    pub fn check(self) -> Result<NewQuestion, Rejection> {
        if !is_complete(&self) {
            return Err(Rejection::Incomplete);
        }
        Ok(NewQuestion {
            author: field_text(self.author),
            summary: field_text(self.summary),
            answers: self.answers.unwrap_or_default(),
            extra: self.extra,
        })
    }
}

impl Draft for QuestionDraft {
    fn has_author(&self) -> bool {
        self.author.is_some()
    }

    fn has_summary(&self) -> bool {
        self.summary.is_some()
    }
}

/// Caller input for answer creation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerDraft {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub author: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub summary: Option<Value>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl AnswerDraft {
    pub fn new(author: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            author: Some(Value::String(author.into())),
            summary: Some(Value::String(summary.into())),
            extra: ExtraFields::new(),
        }
    }

    /// Validate completeness, yielding an answer that only lacks its id.
    pub fn check(self) -> Result<NewAnswer, Rejection> {
        if !is_complete(&self) {
            return Err(Rejection::Incomplete);
        }
        Ok(NewAnswer {
            author: field_text(self.author),
            summary: field_text(self.summary),
            extra: self.extra,
        })
    }
}

impl Draft for AnswerDraft {
    fn has_author(&self) -> bool {
        self.author.is_some()
    }

    fn has_summary(&self) -> bool {
        self.summary.is_some()
    }
}

/// A validated question candidate awaiting its identifier.
#[derive(Clone, Debug, PartialEq)]
pub struct NewQuestion {
    author: String,
    summary: String,
    answers: Vec<Answer>,
    extra: ExtraFields,
}

impl NewQuestion {
    /// Attach `id`, discarding any `id` the caller put in the candidate.
    pub fn assign(mut self, id: String) -> Question {
        self.extra.remove("id");
        Question {
            id,
            author: self.author,
            summary: self.summary,
            answers: self.answers,
            extra: self.extra,
        }
    }
}

/// A validated answer candidate awaiting its identifier.
#[derive(Clone, Debug, PartialEq)]
pub struct NewAnswer {
    author: String,
    summary: String,
    extra: ExtraFields,
}

impl NewAnswer {
    /// Attach `id`, discarding any `id` the caller put in the candidate.
    pub fn assign(mut self, id: String) -> Answer {
        self.extra.remove("id");
        Answer {
            id,
            author: self.author,
            summary: self.summary,
            extra: self.extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn generated_ids_are_distinct() {
        let a = generate_id();
        let b = generate_id();
        assert!(!a.is_empty());
        assert_ne!(a, b);
    }

    #[test]
    fn question_without_answers_key_reads_empty() {
        let q: Question = serde_json::from_value(json!({
            "id": "q1",
            "author": "Kate Drozd",
            "summary": "Are pansies purple?"
        }))
        .unwrap();
        assert!(q.answers.is_empty());
        assert!(q.extra.is_empty());
    }

    #[test]
    fn question_missing_author_is_rejected_by_serde() {
        let parsed = serde_json::from_value::<Question>(json!({ "id": "q1", "summary": "s" }));
        assert!(parsed.is_err());
    }

    #[test]
    fn extra_fields_round_trip_through_question() {
        let value = json!({
            "id": "q1",
            "author": "a",
            "summary": "s",
            "answers": [],
            "tags": ["logic"]
        });
        let q: Question = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(q.extra.get("tags"), Some(&json!(["logic"])));
        assert_eq!(serde_json::to_value(&q).unwrap(), value);
    }

    #[test]
    fn empty_strings_count_as_present() {
        assert!(is_complete(&QuestionDraft::new("", "")));
        assert!(is_complete(&AnswerDraft::new("", "")));
    }

    #[test]
    fn draft_without_summary_fails_check() {
        let draft: AnswerDraft = serde_json::from_value(json!({ "author": "Mary Jane" })).unwrap();
        assert!(!is_complete(&draft));
        assert_eq!(draft.check(), Err(Rejection::Incomplete));
    }

    #[test]
    fn unrelated_fields_do_not_satisfy_completeness() {
        let draft: QuestionDraft =
            serde_json::from_value(json!({ "message": "I am a broken question" })).unwrap();
        assert_eq!(draft.extra.get("message"), Some(&json!("I am a broken question")));
        assert_eq!(draft.check(), Err(Rejection::Incomplete));
    }

    #[test]
    fn assign_overwrites_caller_id() {
        let draft: QuestionDraft = serde_json::from_value(json!({
            "id": "caller-chosen",
            "author": "a",
            "summary": "s",
            "topic": "music"
        }))
        .unwrap();
        let question = draft.check().unwrap().assign("generated".into());
        assert_eq!(question.id, "generated");
        assert!(!question.extra.contains_key("id"));
        assert_eq!(question.extra.get("topic"), Some(&json!("music")));

        let encoded = serde_json::to_value(&question).unwrap();
        assert_eq!(encoded["id"], json!("generated"));
    }

    #[test]
    fn supplied_answers_are_kept() {
        let draft = QuestionDraft {
            answers: Some(vec![Answer {
                id: "a1".into(),
                author: "Liam Czarnecki".into(),
                summary: "Swedish".into(),
                extra: ExtraFields::new(),
            }]),
            ..QuestionDraft::new("Mateusz Czyzewski", "Of what nationality was Gauss?")
        };
        let question = draft.check().unwrap().assign(generate_id());
        assert_eq!(question.answers.len(), 1);
        assert_eq!(question.answer("a1").map(|a| a.summary.as_str()), Some("Swedish"));
        assert!(question.answer("missing").is_none());
    }

    #[test]
    fn null_values_count_as_present() {
        let draft: QuestionDraft =
            serde_json::from_value(json!({ "author": null, "summary": "s" })).unwrap();
        assert_eq!(draft.author, Some(Value::Null));
        assert!(is_complete(&draft));
        let question = draft.check().unwrap().assign("q".into());
        assert_eq!(question.author, "");
        assert_eq!(question.summary, "s");
    }

    #[test]
    fn missing_key_stays_absent() {
        let draft: AnswerDraft = serde_json::from_value(json!({ "summary": "s" })).unwrap();
        assert_eq!(draft.author, None);
        assert!(!is_complete(&draft));
    }

    #[test]
    fn non_string_values_are_accepted_and_stored_as_text() {
        let draft: AnswerDraft =
            serde_json::from_value(json!({ "author": 5, "summary": true })).unwrap();
        let answer = draft.check().unwrap().assign("a".into());
        assert_eq!(answer.author, "5");
        assert_eq!(answer.summary, "true");
    }

    proptest! {
        #[test]
        fn completeness_is_presence_of_both(
            author in proptest::option::of(".*"),
            summary in proptest::option::of(".*"),
        ) {
            let expected = author.is_some() && summary.is_some();
            let draft = AnswerDraft {
                author: author.map(Value::String),
                summary: summary.map(Value::String),
                extra: ExtraFields::new(),
            };
            prop_assert_eq!(is_complete(&draft), expected);
            prop_assert_eq!(draft.check().is_ok(), expected);
        }
    }
}
