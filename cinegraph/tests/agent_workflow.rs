//! End-to-end runs of the movie agent over in-memory store, embedder and model.

mod init_logging;

use std::sync::Arc;

use cinegraph::store::MockOperation;
use cinegraph::{
    default_registry, AgentError, EnrichedMovie, HybridRetriever, MockEmbedder, MockGraphStore,
    MockLlm, MovieAgent, ResultItem, RetrievalError, StoreError, WebSearchTool,
};
use serde_json::json;

fn items(prefix: &str, n: usize) -> Vec<ResultItem> {
    (0..n)
        .map(|i| ResultItem::new(format!("{prefix} {i}"), "overview", 7.0, 0.8))
        .collect()
}

fn enriched(title: &str) -> EnrichedMovie {
    EnrichedMovie {
        title: title.into(),
        overview: "overview".into(),
        rating: 7.0,
        genres: vec!["Action".into(), "Sci-Fi".into()],
        directors: vec!["Lana Wachowski".into()],
        actors: vec!["Keanu Reeves".into()],
        similar_movies: vec!["Dark City".into()],
    }
}

fn matrix_store() -> MockGraphStore {
    let mut store = MockGraphStore::new()
        .with_vector_results(items("Vector", 5))
        .with_fulltext_results(items("Text", 5));
    for i in 0..5 {
        store = store
            .with_movie(enriched(&format!("Vector {i}")))
            .with_movie(enriched(&format!("Text {i}")));
    }
    store
}

fn agent(llm: Arc<MockLlm>, store: Arc<MockGraphStore>) -> MovieAgent {
    let retriever = HybridRetriever::new(store.clone(), Arc::new(MockEmbedder::default()));
    let tools = default_registry(store, WebSearchTool::new().unwrap());
    MovieAgent::new(llm, retriever, tools).unwrap()
}

/// **Scenario**: a similarity query takes the no-tool path; context holds the first
/// three merged titles (vector and lexical interleaved) and the model answers from it.
#[tokio::test]
async fn similarity_query_answers_from_graph_context() {
    let store = Arc::new(matrix_store());
    let llm = Arc::new(MockLlm::scripted([
        "User wants sci-fi films like The Matrix.",
        "Try **Vector 0**, **Text 0** and **Vector 1**.",
    ]));
    let result = agent(llm.clone(), store.clone())
        .run("Find movies similar to The Matrix")
        .await
        .unwrap();

    assert!(!result.answer.is_empty());
    assert!(result.tool_calls.is_empty());
    assert_eq!(result.context_used, 5);
    assert_eq!(
        result.reasoning,
        vec!["Analysis: User wants sci-fi films like The Matrix."]
    );

    let contexts = store
        .calls()
        .into_iter()
        .filter(|op| *op == MockOperation::MovieContext)
        .count();
    assert_eq!(contexts, 3);

    let answer_prompt = &llm.prompts()[1];
    assert!(answer_prompt.contains("Movie: Vector 0"));
    assert!(answer_prompt.contains("Movie: Text 0"));
    assert!(answer_prompt.contains("Movie: Vector 1"));
    assert!(!answer_prompt.contains("Movie: Vector 2"));
    assert!(!answer_prompt.contains("Movie: Text 1"));
    assert!(answer_prompt.contains("Director: Lana Wachowski"));
}

/// **Scenario**: "how many" routes to the tool stage, the model picks `graph_query`,
/// and the query rows reach the answer prompt.
#[tokio::test]
async fn counting_query_runs_graph_query_tool() {
    let mut row = serde_json::Map::new();
    row.insert("movies".into(), json!(42));
    let store = Arc::new(matrix_store().with_rows(vec![row]));
    let llm = Arc::new(MockLlm::scripted([
        "Needs a count over the graph.",
        "graph_query: MATCH (m:Movie) RETURN count(m) AS movies",
        "There are **42** movies.",
    ]));
    let result = agent(llm.clone(), store.clone())
        .run("How many movies are in the database?")
        .await
        .unwrap();

    assert_eq!(result.answer, "There are **42** movies.");
    assert_eq!(result.tool_calls.len(), 1);
    let call = &result.tool_calls[0];
    assert_eq!(call.tool, "graph_query");
    assert_eq!(call.input, "MATCH (m:Movie) RETURN count(m) AS movies");
    assert_eq!(call.output, r#"Query results: [{"movies":42}]"#);
    assert!(store.calls().contains(&MockOperation::Execute));
    assert!(llm.prompts()[2].contains(r#"graph_query: Query results: [{"movies":42}]"#));
}

/// **Scenario**: the calculator is reachable through the default registry.
#[tokio::test]
async fn calculation_query_runs_calculator() {
    let llm = Arc::new(MockLlm::scripted([
        "Arithmetic on ratings.",
        "calculator: (8.7 + 8.3) / 2",
        "The average is **8.5**.",
    ]));
    let result = agent(llm, Arc::new(matrix_store()))
        .run("Calculate the average of 8.7 and 8.3")
        .await
        .unwrap();
    assert_eq!(result.tool_calls[0].output, "Result: 8.5");
}

/// **Scenario**: a tool error is rendered into the record and the run still completes.
#[tokio::test]
async fn failing_tool_is_recorded_not_fatal() {
    let store = Arc::new(matrix_store().failing_on(MockOperation::Execute));
    let llm = Arc::new(MockLlm::scripted([
        "count",
        "graph_query: MATCH (n) RETURN count(n)",
        "I could not count them.",
    ]));
    let result = agent(llm, store)
        .run("how many people acted in Heat?")
        .await
        .unwrap();
    assert_eq!(result.answer, "I could not count them.");
    assert!(result.tool_calls[0]
        .output
        .starts_with("Error executing query: "));
}

/// **Scenario**: the model failing in the first stage fails the run with a model error.
#[tokio::test]
async fn model_failure_surfaces_as_language_model_error() {
    let llm = Arc::new(MockLlm::scripted(["unused"]).failing_after(0, "connection refused"));
    let err = agent(llm.clone(), Arc::new(matrix_store()))
        .run("Find movies similar to The Matrix")
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::LanguageModel(ref m) if m.contains("connection refused")));
    assert_eq!(llm.call_count(), 1);
}

/// **Scenario**: the store failing during retrieval aborts before the answer stage.
#[tokio::test]
async fn store_failure_surfaces_as_retrieval_error() {
    let store = Arc::new(matrix_store().failing_on(MockOperation::VectorSearch));
    let llm = Arc::new(MockLlm::with_fixed_response("analysis"));
    let err = agent(llm.clone(), store)
        .run("Find movies similar to The Matrix")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AgentError::Retrieval(RetrievalError::Store(StoreError::Transport(_)))
    ));
    assert_eq!(llm.call_count(), 1);
}

/// **Scenario**: `context_used` counts vector hits only, capped by the retrieval top-k.
#[tokio::test]
async fn context_used_follows_retrieval_top_k() {
    let store = Arc::new(matrix_store());
    let retriever = HybridRetriever::new(store.clone(), Arc::new(MockEmbedder::default()));
    let tools = default_registry(store, WebSearchTool::new().unwrap());
    let llm = Arc::new(MockLlm::scripted(["a", "b"]));
    let agent = MovieAgent::with_retrieval_top_k(llm, retriever, tools, 2).unwrap();
    let result = agent.run("recommend something").await.unwrap();
    assert_eq!(result.context_used, 2);
}
