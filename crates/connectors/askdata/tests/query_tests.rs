mod common;

use std::sync::Arc;

use askdata::query::{
    query, transcription_query, ErrorKind, QueryRequest, QueryResponse, TranscriptionRequest,
};
use tests_common::fixtures;
use tests_common::model::{FailingModel, ScriptedModel};

fn ask(question: &str) -> QueryRequest {
    QueryRequest {
        query: question.to_string(),
    }
}

fn failure_kind(response: &QueryResponse) -> Option<ErrorKind> {
    match response {
        QueryResponse::Failure(failure) => Some(failure.error_kind),
        QueryResponse::Success(_) => None,
    }
}

mod answered {
    use super::*;
    use similar_asserts::assert_eq;

    #[tokio::test]
    async fn mumbai_is_selected_exactly() {
        let model = Arc::new(ScriptedModel::answering(
            "```sql\nSELECT * FROM data WHERE city = \"Mumbai\"\n```",
        ));
        let state =
            common::create_state_with_upload(model.clone(), "sales.json", fixtures::sales_json())
                .await;

        let response = query(&state, ask("Show records where city is Mumbai")).await;

        insta::assert_json_snapshot!(response, @r###"
        {
          "success": true,
          "sql_query": "SELECT * FROM data WHERE city = 'Mumbai'",
          "data": [
            {
              "city": "Mumbai",
              "amount": 10
            }
          ]
        }
        "###);
        assert_eq!(model.calls(), 1);
        assert_eq!(state.metrics.query_total.get(), 1);
        assert_eq!(state.metrics.fallback_total.get(), 0);
    }

    #[tokio::test]
    async fn failed_execution_falls_back_to_approximate_filtering() {
        let model = Arc::new(ScriptedModel::answering(
            "SELECT * FROM sales WHERE city = 'Mumbai'",
        ));
        let state =
            common::create_state_with_upload(model, "sales.json", fixtures::sales_json()).await;

        let response = query(&state, ask("Show records where city is Mumbai")).await;

        insta::assert_json_snapshot!(response, @r###"
        {
          "success": true,
          "sql_query": "SELECT * FROM sales WHERE city = 'Mumbai'",
          "data": [
            {
              "city": "Mumbai",
              "amount": 10
            }
          ],
          "approximate": true,
          "note": "Used simplified filtering as SQL execution failed"
        }
        "###);
        assert_eq!(state.metrics.fallback_total.get(), 1);
    }

    #[tokio::test]
    async fn second_statement_is_never_answered() {
        let model = Arc::new(ScriptedModel::answering(
            "SELECT * FROM data WHERE city = 'Mumbai'; REPLACE INTO data VALUES ('Hacked', 1)",
        ));
        let state =
            common::create_state_with_upload(model, "sales.json", fixtures::sales_json()).await;

        let response = query(&state, ask("Show records where city is Mumbai")).await;

        insta::assert_json_snapshot!(response, @r###"
        {
          "success": true,
          "sql_query": "SELECT * FROM data WHERE city = 'Mumbai'; REPLACE INTO data VALUES ('Hacked', 1)",
          "data": [
            {
              "city": "Mumbai",
              "amount": 10
            }
          ],
          "approximate": true,
          "note": "Used simplified filtering as SQL execution failed"
        }
        "###);
        assert_eq!(state.metrics.fallback_total.get(), 1);
        assert_eq!(state.metrics.unsafe_query_total.get(), 0);
    }

    #[tokio::test]
    async fn empty_fallback_result_is_still_a_success() {
        let model = Arc::new(ScriptedModel::answering(
            "SELECT * FROM sales WHERE city = 'Delhi'",
        ));
        let state =
            common::create_state_with_upload(model, "sales.json", fixtures::sales_json()).await;

        let response = query(&state, ask("Who is in Delhi?")).await;

        match response {
            QueryResponse::Success(success) => {
                assert!(success.approximate);
                assert!(success.data.is_empty());
            }
            QueryResponse::Failure(failure) => panic!("unexpected failure: {failure:?}"),
        }
    }

    #[tokio::test]
    async fn cached_question_does_not_call_the_model() {
        let model = Arc::new(ScriptedModel::answering("SELECT 1"));
        let state = common::create_state_with_upload(
            model.clone(),
            "sales.json",
            fixtures::sales_json_with_cache(
                "What is the total amount?",
                "SELECT SUM(amount) AS total FROM data",
            ),
        )
        .await;

        let response = query(&state, ask("What is the total amount?")).await;

        insta::assert_json_snapshot!(response, @r###"
        {
          "success": true,
          "sql_query": "SELECT SUM(amount) AS total FROM data",
          "data": [
            {
              "total": 30
            }
          ]
        }
        "###);
        assert_eq!(model.calls(), 0);
        assert_eq!(state.metrics.cache_hit_total.get(), 1);
    }

    #[tokio::test]
    async fn model_sees_the_dataset_columns() {
        let model = Arc::new(ScriptedModel::answering("SELECT city FROM data"));
        let state =
            common::create_state_with_upload(model.clone(), "sales.json", fixtures::sales_json())
                .await;

        let response = query(&state, ask("Which cities are there?")).await;

        assert!(response.is_success());
        let prompts = model.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("city, amount"), "{}", prompts[0]);
        assert!(prompts[0].contains("Which cities are there?"));
    }
}

mod rejected {
    use super::*;
    use similar_asserts::assert_eq;

    #[tokio::test]
    async fn drop_table_is_rejected_before_execution() {
        let model = Arc::new(ScriptedModel::answering("DROP TABLE data;"));
        let state =
            common::create_state_with_upload(model, "sales.json", fixtures::sales_json()).await;

        let response = query(&state, ask("Delete everything")).await;

        insta::assert_json_snapshot!(response, @r###"
        {
          "success": false,
          "error": "Only SELECT statements are allowed (found 'drop')",
          "error_kind": "unsafe_query",
          "sql_query": "DROP TABLE data;"
        }
        "###);
        assert_eq!(state.metrics.unsafe_query_total.get(), 1);
        assert_eq!(state.metrics.query_total.get(), 0);
        assert_eq!(state.metrics.fallback_total.get(), 0);
    }

    #[tokio::test]
    async fn cached_queries_are_validated_too() {
        let model = Arc::new(ScriptedModel::answering("SELECT 1"));
        let state = common::create_state_with_upload(
            model,
            "sales.json",
            fixtures::sales_json_with_cache("Clean up", "DELETE FROM data"),
        )
        .await;

        let response = query(&state, ask("Clean up")).await;

        assert_eq!(failure_kind(&response), Some(ErrorKind::UnsafeQuery));
    }

    #[tokio::test]
    async fn nothing_uploaded_means_no_dataset() {
        let model = Arc::new(ScriptedModel::answering("SELECT * FROM data"));
        let state = common::create_state(model.clone()).await;

        let response = query(&state, ask("Show everything")).await;

        insta::assert_json_snapshot!(response, @r###"
        {
          "success": false,
          "error": "No data loaded. Please upload a file first.",
          "error_kind": "no_dataset"
        }
        "###);
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn empty_dataset_means_no_dataset() {
        let model = Arc::new(ScriptedModel::answering("SELECT * FROM data"));
        let state = common::create_state_with_upload(model, "empty.json", b"[]".to_vec()).await;

        let response = query(&state, ask("Show everything")).await;

        assert_eq!(failure_kind(&response), Some(ErrorKind::NoDataset));
    }

    #[tokio::test]
    async fn model_failure_is_a_translation_error() {
        let model = Arc::new(FailingModel::with_status(503));
        let state =
            common::create_state_with_upload(model.clone(), "sales.json", fixtures::sales_json())
                .await;

        let response = query(&state, ask("Show everything")).await;

        match response {
            QueryResponse::Failure(failure) => {
                assert_eq!(failure.error_kind, ErrorKind::Translation);
                assert!(
                    failure.error.starts_with("Error generating SQL query"),
                    "{}",
                    failure.error
                );
                assert_eq!(failure.sql_query, None);
            }
            QueryResponse::Success(success) => panic!("unexpected success: {success:?}"),
        }
        assert_eq!(model.calls(), 1);
    }
}

mod transcription {
    use super::*;
    use similar_asserts::assert_eq;

    #[tokio::test]
    async fn transcription_is_echoed_with_the_answer() {
        let model = Arc::new(ScriptedModel::answering(
            "SELECT amount FROM data WHERE city = 'Pune'",
        ));
        let state =
            common::create_state_with_upload(model, "sales.json", fixtures::sales_json()).await;

        let response = transcription_query(
            &state,
            TranscriptionRequest {
                transcription: "how much did pune spend".to_string(),
            },
        )
        .await;

        insta::assert_json_snapshot!(response, @r###"
        {
          "success": true,
          "transcription": "how much did pune spend",
          "sql_query": "SELECT amount FROM data WHERE city = 'Pune'",
          "data": [
            {
              "amount": 20
            }
          ]
        }
        "###);
    }

    #[tokio::test]
    async fn empty_transcription_is_refused() {
        let model = Arc::new(ScriptedModel::answering("SELECT * FROM data"));
        let state = common::create_state(model.clone()).await;

        let response = transcription_query(&state, TranscriptionRequest::default()).await;

        insta::assert_json_snapshot!(response, @r###"
        {
          "success": false,
          "transcription": "",
          "error": "No transcription provided",
          "error_kind": "invalid_request"
        }
        "###);
        assert_eq!(model.calls(), 0);
    }
}
