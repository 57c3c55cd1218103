//! @ai:module:intent Per-agent accuracy within each question category
//! @ai:module:layer domain
//! @ai:module:public_api category_scores
//! @ai:module:stateless true

use crate::dataset::QuestionItem;
use crate::metrics::stats::round2;
use crate::metrics::{CategoryScores, QuestionResult};
use std::collections::{BTreeMap, HashMap};

#[derive(Default)]
struct Tally {
    correct: u32,
    total: u32,
}

/// @ai:intent Accuracy percentage per (agent, category) over categorised questions
/// @ai:post agents that answered no categorised question are absent
/// @ai:effects pure
pub fn category_scores(
    questions: &[QuestionItem],
    results: &[QuestionResult],
) -> BTreeMap<String, CategoryScores> {
    let mut category_of: HashMap<&str, &str> = HashMap::new();
    for q in questions {
        if let Some(category) = &q.category {
            category_of.entry(q.id.as_str()).or_insert(category.as_str());
        }
    }

    let mut tallies: BTreeMap<&str, BTreeMap<&str, Tally>> = BTreeMap::new();
    for result in results {
        let Some(&category) = category_of.get(result.question_id.as_str()) else {
            continue;
        };

        for response in &result.responses {
            let tally = tallies
                .entry(response.agent_id.as_str())
                .or_default()
                .entry(category)
                .or_default();
            tally.total += 1;
            if response.is_correct {
                tally.correct += 1;
            }
        }
    }

    tallies
        .into_iter()
        .map(|(agent, by_category)| {
            let scores = by_category
                .into_iter()
                .map(|(category, t)| {
                    let pct = t.correct as f64 * 100.0 / t.total as f64;
                    (category.to_string(), round2(pct))
                })
                .collect();
            (agent.to_string(), scores)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{AgentResponse, TokenUsage};

    fn answer(agent: &str, correct: bool) -> AgentResponse {
        AgentResponse::answered(agent, "x", TokenUsage::new(1, 1), 1.0, correct)
    }

    #[test]
    fn test_scores_per_category() {
        let questions = vec![
            QuestionItem::new("q1", "2+2?", "4").with_category("mathematics"),
            QuestionItem::new("q2", "3+3?", "6").with_category("mathematics"),
            QuestionItem::new("q3", "All A are B...", "yes").with_category("logic"),
            QuestionItem::new("q4", "Uncategorised", "n/a"),
        ];
        let results = vec![
            QuestionResult {
                question_id: "q1".to_string(),
                responses: vec![answer("a", true), answer("b", false)],
            },
            QuestionResult {
                question_id: "q2".to_string(),
                responses: vec![answer("a", false), AgentResponse::failed("b", "timeout")],
            },
            QuestionResult {
                question_id: "q3".to_string(),
                responses: vec![answer("a", true), answer("b", true)],
            },
            QuestionResult {
                question_id: "q4".to_string(),
                responses: vec![answer("c", true)],
            },
        ];

        let scores = category_scores(&questions, &results);

        assert_eq!(scores["a"]["mathematics"], 50.0);
        assert_eq!(scores["a"]["logic"], 100.0);
        assert_eq!(scores["b"]["mathematics"], 0.0);
        assert!(!scores.contains_key("c"));
    }
}
