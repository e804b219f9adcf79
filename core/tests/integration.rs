//! Full CRUD lifecycle against a live server.
//!
//! Starts the server on a random port, then exercises every client operation
//! over real HTTP using ureq.

use todo_core::{ApiError, CreateTodo, HttpMethod, HttpRequest, HttpResponse, TodoClient, UpdateTodo};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Status codes are not treated as errors so 4xx/5xx responses come back as
/// data for the client to interpret.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.url).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.url).call(),
        (HttpMethod::Post, Some(body)) => {
            agent.post(&req.url).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Post, None) => agent.post(&req.url).send_empty(),
        (HttpMethod::Put, Some(body)) => {
            agent.put(&req.url).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Put, None) => agent.put(&req.url).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers,
        body,
    }
}

/// Runs a fresh server on its own runtime thread and returns a client for it.
fn start_server() -> TodoClient {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            todo_server::run(listener).await
        })
        .unwrap();
    });

    TodoClient::new(&format!("http://{addr}"))
}

#[test]
fn banner_and_health() {
    let client = start_server();

    let response = execute(client.build_banner());
    assert_eq!(response.header("Content-Type"), Some("application/json"));
    let banner = client.parse_banner(response).unwrap();
    assert!(!banner.message.is_empty());

    let health = client.parse_health(execute(client.build_health())).unwrap();
    assert!(health.is_ok());
}

#[test]
fn create_without_title_is_a_validation_error() {
    let client = start_server();

    let req = client.build_create_todo(&CreateTodo::new("")).unwrap();
    let response = execute(req);
    assert_eq!(response.header("content-type"), Some("application/json"));
    let err = client.parse_create_todo(response).unwrap_err();
    assert!(matches!(err, ApiError::Validation(msg) if msg == "title is required"));

    let todos = client.parse_list_todos(execute(client.build_list_todos())).unwrap();
    assert!(todos.is_empty());
}

#[test]
fn crud_lifecycle() {
    let client = start_server();

    // Step 1: list is empty.
    let todos = client.parse_list_todos(execute(client.build_list_todos())).unwrap();
    assert!(todos.is_empty(), "expected empty list");

    // Step 2: create a todo; the first id is 1.
    let req = client.build_create_todo(&CreateTodo::new("Write tests")).unwrap();
    let created = client.parse_create_todo(execute(req)).unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.title, "Write tests");
    assert!(!created.completed);
    let id = created.id;

    // Step 3: get the created todo.
    let fetched = client.parse_get_todo(execute(client.build_get_todo(id))).unwrap();
    assert_eq!(fetched, created);

    // Step 4: update title and completed.
    let update = UpdateTodo {
        title: Some("Write better tests".to_string()),
        completed: Some(true),
    };
    let req = client.build_update_todo(id, &update).unwrap();
    let updated = client.parse_update_todo(execute(req)).unwrap();
    assert_eq!(updated.title, "Write better tests");
    assert!(updated.completed);

    // Step 5: update only completed; title is kept.
    let update = UpdateTodo {
        title: None,
        completed: Some(false),
    };
    let req = client.build_update_todo(id, &update).unwrap();
    let updated = client.parse_update_todo(execute(req)).unwrap();
    assert_eq!(updated.title, "Write better tests");
    assert!(!updated.completed);

    // Step 6: list has the one item.
    let todos = client.parse_list_todos(execute(client.build_list_todos())).unwrap();
    assert_eq!(todos, vec![updated.clone()]);

    // Step 7: delete returns the removed todo.
    let removed = client.parse_delete_todo(execute(client.build_delete_todo(id))).unwrap();
    assert_eq!(removed, updated);

    // Step 8: get after delete is NotFound.
    let err = client.parse_get_todo(execute(client.build_get_todo(id))).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Step 9: delete again is NotFound.
    let err = client.parse_delete_todo(execute(client.build_delete_todo(id))).unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Step 10: the next todo does not reuse the deleted id.
    let req = client.build_create_todo(&CreateTodo::new("Next")).unwrap();
    let next = client.parse_create_todo(execute(req)).unwrap();
    assert_eq!(next.id, 2);
}
