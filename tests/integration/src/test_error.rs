//! Error handling integration tests.

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use crate::{edge_client, get_text, url};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_serve_error_document_for_missing_page() {
        let client = edge_client();
        let (status, body) = get_text(&client, "/no-such-page").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Page not found"));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_not_cache_error_responses() {
        let client = edge_client();
        let resp = client
            .get(url("/missing.css"))
            .send()
            .await
            .expect("GET missing");

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            resp.headers()
                .get("cache-control")
                .and_then(|v| v.to_str().ok()),
            Some("no-store")
        );
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_forbid_encoded_traversal() {
        // Slashes are encoded too, so the client cannot collapse the dot
        // segments; the origin sees `a/../../Cargo.toml` after decoding.
        let path = "/a/%2E%2E%2F%2E%2E%2FCargo.toml";
        let sent = reqwest::Url::parse(&url(path)).expect("valid url");
        assert_eq!(sent.path(), path);

        let client = edge_client();
        let (status, body) = get_text(&client, path).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(!body.contains("[package]"));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_write_methods() {
        let client = edge_client();
        let resp = client
            .post(url("/about"))
            .body("x")
            .send()
            .await
            .expect("POST about");

        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            resp.headers().get("allow").and_then(|v| v.to_str().ok()),
            Some("GET, HEAD")
        );
    }
}
