//! Conditional request integration tests.

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use crate::{edge_client, url};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_return_not_modified_for_current_etag() {
        let client = edge_client();
        let first = client.get(url("/about")).send().await.expect("GET about");
        let etag = first
            .headers()
            .get("etag")
            .and_then(|v| v.to_str().ok())
            .expect("etag header")
            .to_owned();

        let resp = client
            .get(url("/about"))
            .header("if-none-match", &etag)
            .send()
            .await
            .expect("conditional GET");

        assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_return_object_for_stale_etag() {
        let client = edge_client();
        let resp = client
            .get(url("/about"))
            .header("if-none-match", "\"0123456789abcdef\"")
            .send()
            .await
            .expect("conditional GET");

        assert_eq!(resp.status(), StatusCode::OK);
    }
}
