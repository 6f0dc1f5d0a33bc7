// API Integration Tests
//
// Purpose: exercise the router with the built-in catalogue
// Run with: cargo test --features api --test api_integration_tests

#[cfg(feature = "api")]
mod api_tests {
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use seo_site::{create_router, AppState, SiteGenerator};
    use serde_json::Value;
    use tower::ServiceExt; // for oneshot

    fn create_test_app() -> axum::Router {
        create_router(AppState::from_generator(SiteGenerator::default()))
    }

    async fn get(app: axum::Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        String::from_utf8(body.to_vec()).expect("Body is not UTF-8")
    }

    async fn json_response(response: axum::response::Response) -> Value {
        serde_json::from_str(&body_string(response).await).expect("Failed to parse JSON")
    }

    // =========================================================================
    // Health + listing
    // =========================================================================

    #[tokio::test]
    async fn test_health_check() {
        let response = get(create_test_app(), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["pages"], 9);
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_list_pages() {
        let body = json_response(get(create_test_app(), "/api/pages").await).await;
        let data = body["data"].as_array().unwrap();
        assert_eq!(body["rows"].as_u64().unwrap() as usize, data.len());
        assert!(data
            .iter()
            .any(|p| p["path"] == "/industries/fashion-ecommerce-seo" && p["kind"] == "industry"));
    }

    // =========================================================================
    // HTML pages
    // =========================================================================

    #[tokio::test]
    async fn test_fashion_page_html() {
        let response = get(create_test_app(), "/industries/fashion-ecommerce-seo").await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_string(response).await;
        assert!(html.contains("<title>Fashion Ecommerce SEO | SEO for Clothing &amp; Apparel Brands"));
        assert_eq!(html.matches("<link rel=\"canonical\"").count(), 1);
        assert_eq!(html.matches("<script type=\"application/ld+json\">").count(), 1);
    }

    #[tokio::test]
    async fn test_home_page_html() {
        let response = get(create_test_app(), "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("\"@type\":\"WebSite\""));
    }

    #[tokio::test]
    async fn test_faq_query_opens_entry() {
        let app = create_test_app();

        let open = body_string(get(app.clone(), "/industries/electronics-ecommerce-seo?faq=0").await).await;
        assert_eq!(open.matches("class=\"faq-answer\"").count(), 1);

        // cached render is identical
        let again = body_string(get(app.clone(), "/industries/electronics-ecommerce-seo?faq=0").await).await;
        assert_eq!(open, again);

        let closed = body_string(get(app, "/industries/electronics-ecommerce-seo").await).await;
        assert_eq!(closed.matches("class=\"faq-answer\"").count(), 0);
    }

    #[tokio::test]
    async fn test_bad_faq_query_collapses() {
        for query in ["faq=abc", "faq=99"] {
            let uri = format!("/industries/electronics-ecommerce-seo?{}", query);
            let response = get(create_test_app(), &uri).await;
            assert_eq!(response.status(), StatusCode::OK);
            let html = body_string(response).await;
            assert!(!html.contains("class=\"faq-answer\""), "{} opened an entry", query);
        }
    }

    #[tokio::test]
    async fn test_unknown_page_404() {
        let response = get(create_test_app(), "/industries/does-not-exist").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_response(response).await;
        assert!(body["error"].as_str().unwrap().contains("not found"));
    }

    // =========================================================================
    // Page data endpoints
    // =========================================================================

    #[tokio::test]
    async fn test_metadata_endpoint() {
        let response = get(create_test_app(), "/api/pages/fashion-ecommerce-seo/metadata").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(
            body["canonical_url"],
            "https://moazhaider.com/industries/fashion-ecommerce-seo"
        );
        assert_eq!(body["twitter_card"], "summary_large_image");
    }

    #[tokio::test]
    async fn test_structured_data_endpoint() {
        let response = get(
            create_test_app(),
            "/api/pages/electronics-ecommerce-seo/structured-data",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/ld+json"
        );

        let body = json_response(response).await;
        assert_eq!(body["@context"], "https://schema.org");
        let graph = body["@graph"].as_array().unwrap();
        let faq = graph.iter().find(|e| e["@type"] == "FAQPage").unwrap();
        for question in faq["mainEntity"].as_array().unwrap() {
            assert_eq!(question["@type"], "Question");
            assert!(!question["acceptedAnswer"]["text"].as_str().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_unknown_slug_404() {
        let response = get(create_test_app(), "/api/pages/nope/metadata").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
