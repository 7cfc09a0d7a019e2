//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use todo_client::{ApiError, CreateTodo, HttpMethod, HttpResponse, Todo, TodoClient, TodoId, UpdateTodo};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> TodoClient {
    TodoClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

/// Ids may be numbers or strings on the wire; both forms are kept.
fn input_id(case: &serde_json::Value) -> TodoId {
    serde_json::from_value(case["input_id"].clone()).unwrap()
}

/// Checks an error against the `expected_error` / `expected_message` fields.
fn assert_expected_error(name: &str, case: &serde_json::Value, err: ApiError) {
    match case["expected_error"].as_str().unwrap() {
        "NotFound" => assert!(matches!(err, ApiError::NotFound { .. }), "{name}: expected NotFound"),
        "Http" => assert!(matches!(err, ApiError::Http { .. }), "{name}: expected Http"),
        other => panic!("{name}: unknown expected_error: {other}"),
    }
    if let Some(message) = case.get("expected_message") {
        assert_eq!(err.server_message(), message.as_str(), "{name}: server message");
    }
}

fn check_request(name: &str, req: &todo_client::HttpRequest, expected: &serde_json::Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.url, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: url");

    if let Some(headers) = expected.get("headers") {
        let expected_headers: Vec<(String, String)> = headers
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");
    }

    match expected.get("body") {
        Some(body) => {
            let req_body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&req_body, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let raw = include_str!("../../test-vectors/list.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        let req = c.build_list_todos();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_list_todos(simulated(case));
        if case.get("expected_error").is_some() {
            assert_expected_error(name, case, result.unwrap_err());
        } else {
            let expected: Vec<Todo> = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let raw = include_str!("../../test-vectors/create.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: CreateTodo = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_create_todo(&input).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_create_todo(simulated(case));
        if case.get("expected_error").is_some() {
            assert_expected_error(name, case, result.unwrap_err());
        } else {
            let expected: Todo = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let raw = include_str!("../../test-vectors/update.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let cached: Todo = serde_json::from_value(vectors["cached"].clone()).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: UpdateTodo = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_update_todo(&input_id(case), &input).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_update_todo(simulated(case));
        if case.get("expected_error").is_some() {
            assert_expected_error(name, case, result.unwrap_err());
        } else {
            let expected: Todo = serde_json::from_value(case["expected_result"].clone()).unwrap();
            let mut merged = cached.clone();
            merged.apply(result.unwrap());
            assert_eq!(merged, expected, "{name}: merged record");
        }
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let raw = include_str!("../../test-vectors/delete.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        let req = c.build_delete_todo(&input_id(case));
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_delete_todo(simulated(case));
        if case.get("expected_error").is_some() {
            assert_expected_error(name, case, result.unwrap_err());
        } else {
            assert!(result.is_ok(), "{name}: expected success");
        }
    }
}
