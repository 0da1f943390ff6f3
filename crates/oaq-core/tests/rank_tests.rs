use oaq_core::rank::{find_candidates, score_operation};
use oaq_core::refs::collect_schema_refs;
use oaq_core::spec::{self, HttpMethod};

const PETSTORE: &str = include_str!("fixtures/petstore.json");

const HEALTH_ONLY: &str = r#"{
  "openapi": "3.0.0",
  "paths": {
    "/health": {
      "get": { "summary": "Health check", "responses": { "200": { "description": "OK" } } }
    }
  }
}"#;

#[test]
fn health_question_ranks_the_health_endpoint() {
    let doc = spec::from_json(HEALTH_ONLY).unwrap();
    let candidates = find_candidates(
        &doc,
        "Which endpoint tells me about the health of the system?",
        10,
    );
    assert_eq!(candidates.len(), 1);

    let top = &candidates[0];
    assert_eq!(top.route, "/health");
    assert_eq!(top.method, HttpMethod::Get);
    // "health" is a path substring (+3) and a summary token (+2).
    assert_eq!(top.score, 5.0);
}

#[test]
fn score_arithmetic_is_additive_per_token() {
    let doc = spec::from_json(PETSTORE).unwrap();
    let candidates = find_candidates(&doc, "create product", 10);

    let top = &candidates[0];
    assert_eq!(top.route, "/products");
    assert_eq!(top.method, HttpMethod::Post);
    // "create": summary token (+2).
    // "product": path substring (+3), summary token (+2), schema name (+1).
    assert_eq!(top.score, 8.0);
    assert_eq!(top.operation_id.as_deref(), Some("createProduct"));
    assert_eq!(top.schema_refs, vec!["#/components/schemas/Product"]);
}

#[test]
fn description_tokens_score_one() {
    let doc = spec::from_json(PETSTORE).unwrap();
    let op = doc.paths["/products"].get.as_ref().unwrap();
    let refs = collect_schema_refs(op);

    // "catalog" appears only in the description.
    let score = score_operation(&["catalog".to_string()], "/products", op, &refs);
    assert_eq!(score, 1.0);
}

#[test]
fn duplicate_query_tokens_do_not_inflate_the_score() {
    let doc = spec::from_json(PETSTORE).unwrap();
    let once = find_candidates(&doc, "product", 1);
    let thrice = find_candidates(&doc, "product product product", 1);
    assert_eq!(once[0].score, thrice[0].score);
}

#[test]
fn score_is_order_independent() {
    let doc = spec::from_json(PETSTORE).unwrap();
    let op = doc.paths["/products"].post.as_ref().unwrap();
    let refs = collect_schema_refs(op);

    let forward = ["create".to_string(), "product".to_string()];
    let backward = ["product".to_string(), "create".to_string()];
    assert_eq!(
        score_operation(&forward, "/products", op, &refs),
        score_operation(&backward, "/products", op, &refs)
    );
}

#[test]
fn top_k_caps_the_result() {
    let doc = spec::from_json(PETSTORE).unwrap();
    assert_eq!(find_candidates(&doc, "product", 3).len(), 3);
    assert_eq!(find_candidates(&doc, "product", 100).len(), 6);
    assert!(find_candidates(&doc, "product", 0).is_empty());
}

#[test]
fn zero_scores_fill_slots_in_deterministic_order() {
    let doc = spec::from_json(PETSTORE).unwrap();
    let candidates = find_candidates(&doc, "xyzzy plugh", 10);
    assert_eq!(candidates.len(), 6);
    assert!(candidates.iter().all(|c| c.score == 0.0));

    // Tie-break: route ascending, then method ascending.
    let order: Vec<(&str, HttpMethod)> = candidates
        .iter()
        .map(|c| (c.route.as_str(), c.method))
        .collect();
    assert_eq!(
        order,
        vec![
            ("/health", HttpMethod::Get),
            ("/orders", HttpMethod::Post),
            ("/products", HttpMethod::Get),
            ("/products", HttpMethod::Post),
            ("/products/{id}", HttpMethod::Delete),
            ("/products/{id}", HttpMethod::Get),
        ]
    );
}

#[test]
fn every_candidate_route_exists_in_the_document() {
    let doc = spec::from_json(PETSTORE).unwrap();
    for candidate in find_candidates(&doc, "list all the products", 10) {
        assert!(doc.paths.contains_key(&candidate.route));
    }
}

#[test]
fn empty_document_yields_no_candidates() {
    let doc = spec::from_json(r#"{"openapi": "3.1.0", "paths": {}}"#).unwrap();
    assert!(find_candidates(&doc, "anything", 10).is_empty());
}

#[test]
fn empty_question_scores_everything_zero() {
    let doc = spec::from_json(PETSTORE).unwrap();
    let candidates = find_candidates(&doc, "", 10);
    assert_eq!(candidates.len(), 6);
    assert!(candidates.iter().all(|c| c.score == 0.0));
}

#[test]
fn candidate_json_shape_round_trips() {
    let doc = spec::from_json(PETSTORE).unwrap();
    let candidates = find_candidates(&doc, "create product", 1);

    let value = serde_json::to_value(&candidates[0]).unwrap();
    assert_eq!(value["route"], "/products");
    assert_eq!(value["method"], "post");
    assert_eq!(value["operationId"], "createProduct");

    let back: oaq_core::Candidate = serde_json::from_value(value).unwrap();
    assert_eq!(back, candidates[0]);
}
