use http::Request;
use wicket_http::{error_response, params_from_request};
use wicket_query::{QueryConfig, QueryString, SortOrder};
use wicket_schema::{Schema, SchemaRegistry};

fn registry() -> SchemaRegistry {
    [
        Schema::new("book")
            .attribute("title", "title")
            .attribute("created_at", "created_at")
            .to_one("author", "author_id", "person"),
        Schema::new("person").attribute("name", "name"),
    ]
    .into_iter()
    .collect()
}

#[test]
fn request_to_directives() {
    let registry = registry();
    let config = QueryConfig::default();

    let req = Request::builder()
        .uri(
            "https://example.test/books?sort=-created_at&page%5Bsize%5D=10\
             &fields%5Bbook%5D=title&include=author&filter%5Btitle%5D=dune",
        )
        .body(Vec::<u8>::new())
        .unwrap();

    let params = params_from_request(&req);
    let qs = QueryString::new(params, registry.get("book").unwrap(), &registry, &config);

    let sorting = qs.sorting().unwrap();
    assert_eq!(sorting[0].field, "created_at");
    assert_eq!(sorting[0].order, SortOrder::Desc);

    let page = qs.pagination().unwrap();
    assert_eq!(page.get("size").map(String::as_str), Some("10"));

    assert_eq!(
        qs.fields().unwrap().get("book"),
        Some(&vec!["title".to_string()])
    );
    assert_eq!(qs.include().unwrap(), vec!["author".to_string()]);
    assert_eq!(qs.filters().unwrap().len(), 1);
}

#[test]
fn invalid_directive_maps_to_client_error_response() {
    let registry = registry();
    let config = QueryConfig {
        max_page_size: Some(50),
        ..QueryConfig::default()
    };

    let req = Request::builder()
        .uri("https://example.test/books?page%5Bsize%5D=9999")
        .body(Vec::<u8>::new())
        .unwrap();

    let params = params_from_request(&req);
    let qs = QueryString::new(params, registry.get("book").unwrap(), &registry, &config);
    let err = qs.pagination().unwrap_err();

    let response = error_response(&err);
    assert_eq!(response.status(), http::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(body["source"]["parameter"], "page[size]");
    assert!(body["error"].as_str().unwrap().contains("50"));
}
