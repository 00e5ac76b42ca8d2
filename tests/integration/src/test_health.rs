//! Health endpoint integration tests.

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use crate::{edge_client, url};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_report_running() {
        let client = edge_client();
        let resp = client
            .get(url("/_blogstack/health"))
            .send()
            .await
            .expect("GET health");

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = resp.json().await.expect("health JSON");
        assert_eq!(body["status"], "running");
        assert_eq!(body["service"], "edge");
    }
}
