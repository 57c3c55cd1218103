//! @ai:module:intent Question and dataset definitions
//! @ai:module:layer domain
//! @ai:module:public_api QuestionItem, Dataset, DatasetInfo
//! @ai:module:stateless true

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// @ai:intent One question with its reference answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub question: String,
    #[serde(rename = "answer", deserialize_with = "string_or_number")]
    pub expected_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl QuestionItem {
    pub fn new(id: impl Into<String>, question: impl Into<String>, expected_answer: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            question: question.into(),
            expected_answer: expected_answer.into(),
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Dataset files may use bare numbers for ids and answers; both are kept as strings.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

/// @ai:intent Raw dataset structure from a JSON file
#[derive(Debug, Deserialize)]
pub struct DatasetFile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub data: Vec<QuestionItem>,
}

/// @ai:intent A loaded question set, identified by its benchmark id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub questions: Vec<QuestionItem>,
}

impl Dataset {
    /// @ai:effects pure
    pub fn from_file(id: impl Into<String>, file: DatasetFile) -> Self {
        Self {
            id: id.into(),
            name: file.name,
            description: file.description,
            questions: file.data,
        }
    }

    /// @ai:intent Distinct question categories, sorted
    /// @ai:effects pure
    pub fn categories(&self) -> Vec<String> {
        self.questions
            .iter()
            .filter_map(|q| q.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// @ai:intent Listing entry for an available dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub categories: Vec<String>,
    pub question_count: usize,
}

impl From<&Dataset> for DatasetInfo {
    fn from(dataset: &Dataset) -> Self {
        Self {
            id: dataset.id.clone(),
            name: dataset.name.clone(),
            description: dataset.description.clone(),
            categories: dataset.categories(),
            question_count: dataset.questions.len(),
        }
    }
}
