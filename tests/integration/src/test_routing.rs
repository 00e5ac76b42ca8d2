//! Path resolution integration tests.

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use crate::{edge_client, get_text, url};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_serve_top_level_page_without_extension() {
        let client = edge_client();
        let (status, body) = get_text(&client, "/about").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>About</h1>"));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_serve_same_page_with_extension() {
        let client = edge_client();
        let (_, bare) = get_text(&client, "/about").await;
        let (status, explicit) = get_text(&client, "/about.html").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(bare, explicit);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_serve_root_index() {
        let client = edge_client();
        let (status, body) = get_text(&client, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>Home</h1>"));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_serve_folder_index() {
        let client = edge_client();
        let (status, body) = get_text(&client, "/blog/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>Blog</h1>"));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_not_suffix_nested_extensionless_path() {
        let client = edge_client();
        let (status, _) = get_text(&client, "/blog/post-one").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = get_text(&client, "/blog/post-one.html").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Post one"));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_serve_assets_with_content_type() {
        let client = edge_client();
        let resp = client
            .get(url("/assets/style.css"))
            .send()
            .await
            .expect("GET style.css");

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok()),
            Some("text/css; charset=utf-8")
        );
        assert!(resp.headers().contains_key("etag"));
        assert!(resp.headers().contains_key("x-amz-cf-id"));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_ignore_query_string_when_resolving() {
        let client = edge_client();
        let (status, body) = get_text(&client, "/about?ref=home").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>About</h1>"));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_answer_head_without_body() {
        let client = edge_client();
        let resp = client.head(url("/about")).send().await.expect("HEAD about");

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key("content-length"));
        let body = resp.bytes().await.expect("body");
        assert!(body.is_empty());
    }
}
