//! Page-level tests driving the router over the in-memory store

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use tower::ServiceExt;
use uuid::Uuid;

use library_catalog::{
    create_router,
    repository::{AuthorsRepository, BooksRepository, GenresRepository, MemoryStore},
    services::Services,
    views::Views,
    AppConfig, AppState,
};

struct TestApp {
    router: Router,
    store: Arc<MemoryStore>,
}

impl TestApp {
    fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState {
            config: Arc::new(AppConfig::default()),
            services: Arc::new(Services::new(store.clone())),
            views: Arc::new(Views::new().unwrap()),
        };
        Self {
            router: create_router(state),
            store,
        }
    }

    async fn get(&self, uri: &str) -> Response {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn post(&self, uri: &str, form: &str) -> Response {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Submit a create form and return the id of the record redirected to
    async fn create(&self, uri: &str, form: &str) -> Uuid {
        let response = self.post(uri, form).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri} rejected {form}");
        location(&response)
            .rsplit('/')
            .next()
            .and_then(|id| Uuid::parse_str(id).ok())
            .unwrap()
    }
}

fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new();
    let response = app.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "healthy");

    let ready: serde_json::Value =
        serde_json::from_str(&body_text(app.get("/ready").await).await).unwrap();
    assert_eq!(ready["store"], "memory");
}

#[tokio::test]
async fn test_root_redirects_to_catalog() {
    let app = TestApp::new();
    let response = app.get("/").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/catalog/");
    assert_eq!(app.get("/catalog/").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_index_counts_records() {
    let app = TestApp::new();
    let author = app
        .create("/catalog/author/create", "first_name=Frank&family_name=Herbert")
        .await;
    let book = app
        .create(
            "/catalog/book/create",
            &format!("title=Dune&author={author}&summary=Spice&isbn=9780441013593"),
        )
        .await;
    app.create(
        "/catalog/bookinstance/create",
        &format!("book={book}&imprint=Chilton&status=Available"),
    )
    .await;
    app.create(
        "/catalog/bookinstance/create",
        &format!("book={book}&imprint=Ace&status=Loaned&due_back=2024-05-01"),
    )
    .await;

    let body = body_text(app.get("/catalog/").await).await;
    assert!(body.contains("<strong>Books:</strong> 1"));
    assert!(body.contains("<strong>Copies:</strong> 2"));
    assert!(body.contains("<strong>Copies available:</strong> 1"));
    assert!(body.contains("<strong>Authors:</strong> 1"));
    assert!(body.contains("<strong>Genres:</strong> 0"));
}

#[tokio::test]
async fn test_author_without_first_name_is_not_created() {
    let app = TestApp::new();
    let response = app
        .post("/catalog/author/create", "first_name=&family_name=Herbert")
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("<li>First name must be specified.</li>"));
    assert!(body.contains("value=\"Herbert\""));
    assert_eq!(app.store.authors_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_genre_name_length_boundary() {
    let app = TestApp::new();
    let response = app.post("/catalog/genre/create", "name=Sc").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response)
        .await
        .contains("genre name must contain at least 3 characters"));
    assert_eq!(app.store.genres_count().await.unwrap(), 0);

    let id = app.create("/catalog/genre/create", "name=Sci").await;
    let body = body_text(app.get(&format!("/catalog/genre/{id}")).await).await;
    assert!(body.contains("Genre: Sci"));
}

#[tokio::test]
async fn test_duplicate_genre_redirects_to_existing() {
    let app = TestApp::new();
    let first = app.create("/catalog/genre/create", "name=Fantasy").await;
    let second = app.create("/catalog/genre/create", "name=Fantasy").await;

    assert_eq!(first, second);
    assert_eq!(app.store.genres_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_author_delete_blocked_by_books() {
    let app = TestApp::new();
    let author = app
        .create("/catalog/author/create", "first_name=Frank&family_name=Herbert")
        .await;
    let book = app
        .create(
            "/catalog/book/create",
            &format!("title=Dune&author={author}&summary=Spice&isbn=1"),
        )
        .await;

    let response = app
        .post(
            &format!("/catalog/author/{author}/delete"),
            &format!("authorid={author}"),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Delete the following books"));
    assert!(body.contains("Dune"));
    assert!(app.store.authors_get_by_id(author).await.unwrap().is_some());

    let stored = app.store.books_get_by_id(book).await.unwrap().unwrap();
    assert_eq!(stored.author, author);
}

#[tokio::test]
async fn test_author_delete_without_books() {
    let app = TestApp::new();
    let author = app
        .create("/catalog/author/create", "first_name=Ada&family_name=Palmer")
        .await;

    let confirm = body_text(app.get(&format!("/catalog/author/{author}/delete")).await).await;
    assert!(confirm.contains(&format!("name=\"authorid\" value=\"{author}\"")));

    let response = app
        .post(
            &format!("/catalog/author/{author}/delete"),
            &format!("authorid={author}"),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/catalog/authors");
    assert!(app.store.authors_get_by_id(author).await.unwrap().is_none());
}

#[tokio::test]
async fn test_genre_delete_blocked_by_books() {
    let app = TestApp::new();
    let genre = app.create("/catalog/genre/create", "name=Horror").await;
    let author = app
        .create("/catalog/author/create", "first_name=Shirley&family_name=Jackson")
        .await;
    let book = app
        .create(
            "/catalog/book/create",
            &format!("title=Hill+House&author={author}&summary=Haunted&isbn=2&genre={genre}"),
        )
        .await;

    let response = app
        .post(
            &format!("/catalog/genre/{genre}/delete"),
            &format!("genreid={genre}"),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Hill House"));
    assert_eq!(app.store.genres_count().await.unwrap(), 1);

    let stored = app.store.books_get_by_id(book).await.unwrap().unwrap();
    assert_eq!(stored.genre, vec![genre]);
}

#[tokio::test]
async fn test_genre_delete_without_books() {
    let app = TestApp::new();
    let genre = app.create("/catalog/genre/create", "name=Satire").await;

    let response = app
        .post(
            &format!("/catalog/genre/{genre}/delete"),
            &format!("genreid={genre}"),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/catalog/genres");
    assert!(app.store.genres_get_by_id(genre).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_targets_the_id_in_the_form_body() {
    let app = TestApp::new();
    let opened = app.create("/catalog/genre/create", "name=Mystery").await;
    let named = app.create("/catalog/genre/create", "name=Thriller").await;

    let response = app
        .post(
            &format!("/catalog/genre/{opened}/delete"),
            &format!("genreid={named}"),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(app.store.genres_get_by_id(opened).await.unwrap().is_some());
    assert!(app.store.genres_get_by_id(named).await.unwrap().is_none());
}

#[tokio::test]
async fn test_book_update_form_checks_current_genres() {
    let app = TestApp::new();
    let g1 = app.create("/catalog/genre/create", "name=Fantasy").await;
    let g2 = app.create("/catalog/genre/create", "name=Adventure").await;
    let g3 = app.create("/catalog/genre/create", "name=Poetry").await;
    let author = app
        .create("/catalog/author/create", "first_name=Ursula&family_name=LeGuin")
        .await;
    let book = app
        .create(
            "/catalog/book/create",
            &format!("title=Earthsea&author={author}&summary=Ged&isbn=3&genre={g1}&genre={g2}"),
        )
        .await;

    let body = body_text(app.get(&format!("/catalog/book/{book}/update")).await).await;
    assert!(body.contains(&format!("value=\"{g1}\" checked")));
    assert!(body.contains(&format!("value=\"{g2}\" checked")));
    assert!(!body.contains(&format!("value=\"{g3}\" checked")));
    assert!(body.contains(&format!("value=\"{author}\" selected")));
}

#[tokio::test]
async fn test_book_update_without_genres_clears_them() {
    let app = TestApp::new();
    let genre = app.create("/catalog/genre/create", "name=Fantasy").await;
    let author = app
        .create("/catalog/author/create", "first_name=Ursula&family_name=LeGuin")
        .await;
    let book = app
        .create(
            "/catalog/book/create",
            &format!("title=Earthsea&author={author}&summary=Ged&isbn=3&genre={genre}"),
        )
        .await;

    let response = app
        .post(
            &format!("/catalog/book/{book}/update"),
            &format!("title=Earthsea&author={author}&summary=Ged&isbn=3"),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/catalog/book/{book}"));

    let stored = app.store.books_get_by_id(book).await.unwrap().unwrap();
    assert!(stored.genre.is_empty());
}

#[tokio::test]
async fn test_unknown_record_is_not_found() {
    let app = TestApp::new();
    let response = app.get(&format!("/catalog/author/{}", Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Author not found"));

    let response = app
        .get(&format!("/catalog/bookinstance/{}", Uuid::new_v4()))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_id_is_rejected() {
    let app = TestApp::new();
    let response = app.get("/catalog/book/not-an-id").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_form_of_absent_record_redirects() {
    let app = TestApp::new();
    let response = app
        .get(&format!("/catalog/genre/{}/delete", Uuid::new_v4()))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/catalog/genres");
}

#[tokio::test]
async fn test_delete_without_body_id_is_bad_request() {
    let app = TestApp::new();
    let genre = app.create("/catalog/genre/create", "name=Drama").await;

    let response = app.post(&format!("/catalog/genre/{genre}/delete"), "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.store.genres_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_book_copy_lifecycle() {
    let app = TestApp::new();
    let author = app
        .create("/catalog/author/create", "first_name=Iain&family_name=Banks")
        .await;
    let book = app
        .create(
            "/catalog/book/create",
            &format!("title=Excession&author={author}&summary=Outside+Context&isbn=4"),
        )
        .await;
    let copy = app
        .create(
            "/catalog/bookinstance/create",
            &format!("book={book}&imprint=Orbit&status=Loaned&due_back=2020-10-06"),
        )
        .await;

    let body = body_text(app.get(&format!("/catalog/bookinstance/{copy}")).await).await;
    assert!(body.contains("Excession"));
    assert!(body.contains("Oct 6, 2020"));

    let body = body_text(app.get(&format!("/catalog/book/{book}")).await).await;
    assert!(body.contains("<title>Excession</title>"));

    let blocked = app
        .post(&format!("/catalog/book/{book}/delete"), &format!("bookid={book}"))
        .await;
    assert_eq!(blocked.status(), StatusCode::OK);

    let response = app
        .post(
            &format!("/catalog/bookinstance/{copy}/delete"),
            &format!("bookinstanceid={copy}"),
        )
        .await;
    assert_eq!(location(&response), "/catalog/bookinstances");

    let response = app
        .post(&format!("/catalog/book/{book}/delete"), &format!("bookid={book}"))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(app.store.books_count().await.unwrap(), 0);
}
