#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use db::test_utils::setup_test_db;
    use tower::ServiceExt;

    use crate::helpers::{body_json, get, make_app};

    #[tokio::test]
    async fn health_check_needs_no_token() {
        let db = setup_test_db().await;
        let app = make_app(db);

        let response = app.oneshot(get("/api/health", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
    }
}
