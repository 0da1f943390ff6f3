use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::refs::{collect_schema_refs, schema_ref_name};
use crate::spec::{ApiDocument, HttpMethod, Operation};
use crate::token::tokenize;

/// A scored guess at which operation answers a question. Produced fresh per
/// query, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub route: String,
    pub method: HttpMethod,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(
        rename = "operationId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub operation_id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schema_refs: Vec<String>,

    #[serde(default)]
    pub score: f64,
}

/// The outcome of disambiguation: one concrete operation, or nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Operation { route: String, method: HttpMethod },
    NoMatch,
}

/// Score one operation against a deduplicated token list.
///
/// Additive per token: +3.0 for a substring match on the lower-cased raw
/// path, +2.0 for membership in the tokenized operationId or summary, +1.0
/// for membership in the tokenized description, +1.0 for case-insensitive
/// equality with a referenced schema name. Intentionally not normalized by
/// query or document length.
pub fn score_operation(
    tokens: &[String],
    route: &str,
    op: &Operation,
    schema_refs: &[String],
) -> f64 {
    let path_low = route.to_lowercase();
    let summary_tokens = tokenize(op.summary.as_deref().unwrap_or_default());
    let description_tokens = tokenize(op.description.as_deref().unwrap_or_default());
    let id_tokens = tokenize(op.operation_id.as_deref().unwrap_or_default());
    let schema_names: Vec<String> = schema_refs
        .iter()
        .filter_map(|r| schema_ref_name(r))
        .map(str::to_lowercase)
        .collect();

    let mut score = 0.0;
    for token in tokens {
        if path_low.contains(token.as_str()) {
            score += 3.0;
        }
        if id_tokens.contains(token) || summary_tokens.contains(token) {
            score += 2.0;
        }
        if description_tokens.contains(token) {
            score += 1.0;
        }
        if schema_names.contains(token) {
            score += 1.0;
        }
    }
    score
}

/// Enumerate, score, sort, and truncate every operation in the document.
///
/// The ordering is fully deterministic: score descending, then route
/// ascending, then method ascending. Zero-score candidates fill remaining
/// slots when fewer than `top_k` operations score positive.
pub fn find_candidates(doc: &ApiDocument, question: &str, top_k: usize) -> Vec<Candidate> {
    let tokens: Vec<String> = tokenize(question)
        .into_iter()
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect();

    let mut candidates = Vec::new();
    for (route, item) in &doc.paths {
        for (method, op) in item.operations() {
            let schema_refs = collect_schema_refs(op);
            let score = score_operation(&tokens, route, op, &schema_refs);
            candidates.push(Candidate {
                route: route.clone(),
                method,
                summary: op.summary.clone(),
                operation_id: op.operation_id.clone(),
                schema_refs,
                score,
            });
        }
    }

    candidates.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.route.cmp(&b.route))
            .then_with(|| a.method.as_str().cmp(b.method.as_str()))
    });
    candidates.truncate(top_k);
    candidates
}
