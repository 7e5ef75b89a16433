use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::db::{Store, StoreError};

#[derive(Serialize, Deserialize, sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

// the frontend posts select values, so category and difficulty may come as strings
#[derive(Deserialize, Debug, Clone)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub category: i64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub difficulty: i64,
}

impl Store {
    /// Every question, grouped by category.
    pub async fn all_questions(&self) -> Result<Vec<Question>, StoreError> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
SELECT id, question, answer, category, difficulty
FROM questions
ORDER BY category, id
            "#,
        )
        .fetch_all(self.pool())
        .await?;
        Ok(questions)
    }

    pub async fn questions_for_category(&self, category: i64) -> Result<Vec<Question>, StoreError> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
SELECT id, question, answer, category, difficulty
FROM questions
WHERE questions.category = ?1
ORDER BY id
            "#,
        )
        .bind(category)
        .fetch_all(self.pool())
        .await?;
        Ok(questions)
    }

    pub async fn question_by_id(&self, id: i64) -> Result<Question, StoreError> {
        let question = sqlx::query_as::<_, Question>(
            r#"
SELECT id, question, answer, category, difficulty FROM questions WHERE questions.id = ?1
            "#,
        )
        .bind(id)
        .fetch_one(self.pool())
        .await?;
        Ok(question)
    }

    pub async fn create_question(&self, new_question: &NewQuestion) -> Result<Question, StoreError> {
        let question = sqlx::query_as::<_, Question>(
            r#"
INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)
RETURNING id, question, answer, category, difficulty
            "#,
        )
        .bind(&new_question.question)
        .bind(&new_question.answer)
        .bind(new_question.category)
        .bind(new_question.difficulty)
        .fetch_one(self.pool())
        .await?;
        Ok(question)
    }

    pub async fn delete_question(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
DELETE FROM questions WHERE questions.id = ?1
            "#,
        )
        .bind(id)
        .execute(self.pool())
        .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Inserts or overwrites the given questions, keeping their ids.
    pub async fn import_questions(&self, questions: &[Question]) -> Result<(), StoreError> {
        let mut tx = self.pool().begin().await?;
        for question in questions {
            sqlx::query(
                r#"
INSERT INTO questions (id, question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4, ?5)
ON CONFLICT (id) DO UPDATE SET
    question = excluded.question,
    answer = excluded.answer,
    category = excluded.category,
    difficulty = excluded.difficulty
                "#,
            )
            .bind(question.id)
            .bind(&question.question)
            .bind(&question.answer)
            .bind(question.category)
            .bind(question.difficulty)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> Store {
        let store = Store::in_memory().await.unwrap();
        store.migrate().await.unwrap();
        store
    }

    fn new_question(question: &str, category: i64) -> NewQuestion {
        NewQuestion {
            question: question.to_owned(),
            answer: "Answer".to_owned(),
            category,
            difficulty: 2,
        }
    }

    #[tokio::test]
    async fn created_question_can_be_read_back() {
        let store = store().await;
        let created = store
            .create_question(&new_question("What is 2+2?", 1))
            .await
            .unwrap();
        assert_eq!(store.question_by_id(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn listing_is_grouped_by_category() {
        let store = store().await;
        store.create_question(&new_question("Q sports", 6)).await.unwrap();
        store.create_question(&new_question("Q science", 1)).await.unwrap();
        store.create_question(&new_question("Q art", 2)).await.unwrap();
        let categories: Vec<i64> = store
            .all_questions()
            .await
            .unwrap()
            .iter()
            .map(|q| q.category)
            .collect();
        assert_eq!(categories, vec![1, 2, 6]);
    }

    #[tokio::test]
    async fn unknown_category_is_rejected() {
        let store = store().await;
        assert!(matches!(
            store.create_question(&new_question("Orphan", 99)).await,
            Err(StoreError::Constraint(_))
        ));
    }

    #[tokio::test]
    async fn blank_text_is_rejected() {
        let store = store().await;
        assert!(matches!(
            store.create_question(&new_question("   ", 1)).await,
            Err(StoreError::Constraint(_))
        ));
    }

    #[tokio::test]
    async fn delete_reports_missing_rows() {
        let store = store().await;
        let created = store.create_question(&new_question("Gone", 3)).await.unwrap();
        store.delete_question(created.id).await.unwrap();
        assert!(matches!(
            store.delete_question(created.id).await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(
            store.question_by_id(created.id).await,
            Err(StoreError::NotFound)
        ));
    }

    #[tokio::test]
    async fn questions_for_category_filters() {
        let store = store().await;
        store.create_question(&new_question("One", 1)).await.unwrap();
        store.create_question(&new_question("Two", 2)).await.unwrap();
        let science = store.questions_for_category(1).await.unwrap();
        assert_eq!(science.len(), 1);
        assert_eq!(science[0].question, "One");
        assert!(store.questions_for_category(5).await.unwrap().is_empty());
    }

    #[test]
    fn new_question_accepts_numeric_strings() {
        let parsed: NewQuestion = serde_json::from_str(
            r#"{"question": "New Question", "answer": "Answer", "category": "1", "difficulty": 2}"#,
        )
        .unwrap();
        assert_eq!(parsed.category, 1);
        assert_eq!(parsed.difficulty, 2);
    }
}
