use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::StoreResult;
use crate::model::{generate_id, Answer, AnswerDraft, Document, Question, QuestionDraft};
use crate::outcome::{Lookup, Outcome, Rejection};
use crate::traits::DocumentStorage;

/// Question and answer repository over a whole-document storage.
///
/// Every operation loads the full document fresh; mutations append to the
/// loaded copy and save the full document back before returning. The
/// repository keeps no state besides its storage handle, and takes no lock:
/// concurrent mutations race with last-writer-wins.
#[derive(Clone)]
pub struct QuestionStore {
    storage: Arc<dyn DocumentStorage>,
}

impl QuestionStore {
    pub fn new(storage: impl DocumentStorage + 'static) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }

    pub fn from_shared(storage: Arc<dyn DocumentStorage>) -> Self {
        Self { storage }
    }

    async fn load(&self) -> StoreResult<Document> {
        let document = self.storage.load().await?;
        debug!(
            location = %self.storage.location(),
            questions = document.len(),
            "loaded document"
        );
        Ok(document)
    }

    async fn save(&self, document: &Document) -> StoreResult<()> {
        self.storage.save(document).await?;
        debug!(
            location = %self.storage.location(),
            questions = document.len(),
            "saved document"
        );
        Ok(())
    }

    /// All stored questions, in insertion order.
    pub async fn list_questions(&self) -> StoreResult<Vec<Question>> {
        self.load().await
    }

    /// The first question whose id equals `question_id`.
    pub async fn get_question_by_id(&self, question_id: &str) -> StoreResult<Lookup<Question>> {
        let document = self.load().await?;
        Ok(document.into_iter().find(|q| q.id == question_id).into())
    }

    /// Like [`get_question_by_id`](Self::get_question_by_id), but absence is
    /// a [`Rejection::QuestionNotFound`].
    async fn require_question(&self, question_id: &str) -> StoreResult<Result<Question, Rejection>> {
        Ok(self
            .get_question_by_id(question_id)
            .await?
            .into_option()
            .ok_or(Rejection::QuestionNotFound))
    }

    /// Validate and store a new question under a freshly generated id.
    ///
    /// An incomplete candidate is rejected before storage is touched.
    pub async fn add_question(&self, draft: QuestionDraft) -> StoreResult<Outcome<Question>> {
        let candidate = match draft.check() {
            Ok(candidate) => candidate,
            Err(rejection) => {
                warn!(%rejection, "question rejected");
                return Ok(Outcome::Rejected(rejection));
            }
        };

        let mut document = self.load().await?;
        let question = candidate.assign(generate_id());
        document.push(question.clone());
        self.save(&document).await?;

        info!(question_id = %question.id, "question added");
        Ok(Outcome::Done(question))
    }

    /// Answers of an existing question; an empty list if it has none.
    pub async fn get_answers(&self, question_id: &str) -> StoreResult<Outcome<Vec<Answer>>> {
        let answers = self
            .require_question(question_id)
            .await?
            .map(|question| question.answers);
        Ok(answers.into())
    }

    /// One answer of an existing question.
    ///
    /// An unknown question is a rejection, an unknown answer is
    /// [`Lookup::Absent`].
    pub async fn get_answer(
        &self,
        question_id: &str,
        answer_id: &str,
    ) -> StoreResult<Outcome<Lookup<Answer>>> {
        let answer = self
            .require_question(question_id)
            .await?
            .map(|question| Lookup::from(question.answer(answer_id).cloned()));
        Ok(answer.into())
    }

    /// Validate and append a new answer to an existing question.
    ///
    /// The question must exist in the freshly loaded document before the
    /// candidate is validated. Rejections perform no write.
    pub async fn add_answer(
        &self,
        question_id: &str,
        draft: AnswerDraft,
    ) -> StoreResult<Outcome<Answer>> {
        let mut document = self.load().await?;
        let Some(question) = document.iter_mut().find(|q| q.id == question_id) else {
            warn!(question_id, "answer rejected: unknown question");
            return Ok(Outcome::Rejected(Rejection::QuestionNotFound));
        };

        let candidate = match draft.check() {
            Ok(candidate) => candidate,
            Err(rejection) => {
                warn!(question_id, %rejection, "answer rejected");
                return Ok(Outcome::Rejected(rejection));
            }
        };

        let answer = candidate.assign(generate_id());
        question.answers.push(answer.clone());
        self.save(&document).await?;

        info!(question_id, answer_id = %answer.id, "answer added");
        Ok(Outcome::Done(answer))
    }
}

impl std::fmt::Debug for QuestionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuestionStore")
            .field("location", &self.storage.location())
            .finish()
    }
}
