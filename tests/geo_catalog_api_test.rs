mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{response_json, TestApp};

#[tokio::test]
async fn coast_walkthrough() {
    let app = TestApp::new().await;

    let response = app.create_coordinate(-23.35, -44.72).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["id"], 1);

    let response = app
        .request(
            Method::POST,
            "/geo_catalog",
            Some(json!({
                "title": "Lighthouse",
                "description": "Old stone lighthouse",
                "hashtag": "#coast",
                "latitude": -23.35,
                "longitude": -44.72
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let owner = response_json(response).await;
    assert_eq!(owner["id"], 1);
    let entries = owner["geo_catalogs"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["title"], "Lighthouse");

    let response = app
        .request(Method::GET, "/geo_catalogs?hashtag=coast", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let rows = response_json(response).await;
    let rows = rows["geo_catalogs"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["title"], "Lighthouse");
    assert_eq!(rows[0]["hashtag"], "#coast");
    assert_eq!(rows[0]["latitude"], -23.35);
    assert_eq!(rows[0]["longitude"], -44.72);

    let response = app
        .request(Method::DELETE, "/geo_catalog?id=999", None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.geo_catalog_count().await, 1);
}

#[tokio::test]
async fn entry_for_unknown_coordinate_is_bad_request() {
    let app = TestApp::new().await;
    app.create_coordinate(1.0, 1.0).await;

    let response = app.create_geo_catalog("nowhere", "#lost", 1.0, 2.0).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Bad Request");
    assert!(body["message"].as_str().unwrap().contains("no coordinate at"));
    assert_eq!(app.geo_catalog_count().await, 0);
}

#[tokio::test]
async fn entry_on_empty_store_is_bad_request() {
    let app = TestApp::new().await;

    let response = app.create_geo_catalog("island", "#sea", 9.0, 9.0).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.geo_catalog_count().await, 0);
}

#[tokio::test]
async fn entries_accumulate_on_owner_in_id_order() {
    let app = TestApp::new().await;
    app.create_coordinate(3.0, 4.0).await;

    app.create_geo_catalog("first", "#a", 3.0, 4.0).await;
    let response = app.create_geo_catalog("second", "#b", 3.0, 4.0).await;
    assert_eq!(response.status(), StatusCode::OK);

    let owner = response_json(response).await;
    let titles: Vec<_> = owner["geo_catalogs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["first", "second"]);
    assert_eq!(owner["total_catalogs"], 2);
}

#[tokio::test]
async fn descriptive_fields_on_entry_do_not_touch_coordinate() {
    let app = TestApp::new().await;
    app.request(
        Method::POST,
        "/coordinate",
        Some(json!({ "latitude": 7.0, "longitude": 8.0, "city": "Original" })),
    )
    .await;

    let response = app
        .request(
            Method::POST,
            "/geo_catalog",
            Some(json!({
                "title": "t",
                "description": "",
                "hashtag": "#t",
                "latitude": 7.0,
                "longitude": 8.0,
                "city": "Ignored"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["city"], "Original");
}

#[tokio::test]
async fn blank_title_is_bad_request() {
    let app = TestApp::new().await;
    app.create_coordinate(1.0, 1.0).await;

    let response = app.create_geo_catalog("   ", "#x", 1.0, 1.0).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.geo_catalog_count().await, 0);
}

#[tokio::test]
async fn image_is_returned_in_standard_base64() {
    let app = TestApp::new().await;
    app.create_coordinate(0.5, 0.5).await;

    let response = app
        .request(
            Method::POST,
            "/geo_catalog",
            Some(json!({
                "title": "pic",
                "description": "with image",
                "img_source": "aGk_Pz4-",
                "hashtag": "#img",
                "latitude": 0.5,
                "longitude": 0.5
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let owner = response_json(response).await;
    assert_eq!(owner["geo_catalogs"][0]["img_source"], "aGk/Pz4+");

    let rows = response_json(app.request(Method::GET, "/geo_catalogs", None).await).await;
    assert_eq!(rows["geo_catalogs"][0]["img_source"], "aGk/Pz4+");
}

#[tokio::test]
async fn invalid_image_is_bad_request() {
    let app = TestApp::new().await;
    app.create_coordinate(0.5, 0.5).await;

    let response = app
        .request(
            Method::POST,
            "/geo_catalog",
            Some(json!({
                "title": "pic",
                "description": "broken",
                "img_source": "not base64 at all!",
                "hashtag": "#img",
                "latitude": 0.5,
                "longitude": 0.5
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.geo_catalog_count().await, 0);
}

#[tokio::test]
async fn region_filter_composes_with_hashtag() {
    let app = TestApp::new().await;
    for (lat, region) in [(1.0, "North"), (2.0, "South")] {
        app.request(
            Method::POST,
            "/coordinate",
            Some(json!({ "latitude": lat, "longitude": 0.0, "region": region })),
        )
        .await;
    }
    app.create_geo_catalog("n-beach", "#beach", 1.0, 0.0).await;
    app.create_geo_catalog("n-hill", "#hill", 1.0, 0.0).await;
    app.create_geo_catalog("s-beach", "#beach", 2.0, 0.0).await;

    let rows = response_json(
        app.request(Method::GET, "/geo_catalogs?region=North", None)
            .await,
    )
    .await;
    assert_eq!(rows["geo_catalogs"].as_array().unwrap().len(), 2);

    let rows = response_json(
        app.request(Method::GET, "/geo_catalogs?region=North&hashtag=beach", None)
            .await,
    )
    .await;
    let rows = rows["geo_catalogs"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["title"], "n-beach");
    assert_eq!(rows[0]["region"], "North");
}

#[tokio::test]
async fn oversized_hashtag_filter_matches_nothing() {
    let app = TestApp::new().await;
    app.create_coordinate(1.0, 1.0).await;
    app.create_geo_catalog("short", "#aaaa", 1.0, 1.0).await;

    let uri = format!("/geo_catalogs?hashtag={}", "a".repeat(60_000));
    let response = app.request(Method::GET, &uri, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, json!({ "geo_catalogs": [] }));
}

#[tokio::test]
async fn hashtag_filter_treats_wildcards_literally() {
    let app = TestApp::new().await;
    app.create_coordinate(1.0, 1.0).await;
    app.create_geo_catalog("plain", "#plain", 1.0, 1.0).await;
    app.create_geo_catalog("percent", "#100%", 1.0, 1.0).await;
    app.create_geo_catalog("slash", "#a\\b", 1.0, 1.0).await;

    for (query, title) in [("%25", "percent"), ("%5C", "slash")] {
        let rows = response_json(
            app.request(Method::GET, &format!("/geo_catalogs?hashtag={}", query), None)
                .await,
        )
        .await;
        let rows = rows["geo_catalogs"].as_array().unwrap();
        assert_eq!(rows.len(), 1, "{}", query);
        assert_eq!(rows[0]["title"], title);
    }
}

#[tokio::test]
async fn listing_without_entries_is_empty() {
    let app = TestApp::new().await;
    app.create_coordinate(1.0, 1.0).await;

    let response = app.request(Method::GET, "/geo_catalogs", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, json!({ "geo_catalogs": [] }));
}

#[tokio::test]
async fn deleting_entry_removes_exactly_one() {
    let app = TestApp::new().await;
    app.create_coordinate(1.0, 1.0).await;
    app.create_geo_catalog("keep", "#k", 1.0, 1.0).await;
    app.create_geo_catalog("drop", "#d", 1.0, 1.0).await;

    let response = app.request(Method::DELETE, "/geo_catalog?id=2", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response_json(response).await,
        json!({ "success": "Geo catalog 2 deleted" })
    );

    let rows = response_json(app.request(Method::GET, "/geo_catalogs", None).await).await;
    let rows = rows["geo_catalogs"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["title"], "keep");
}

#[tokio::test]
async fn delete_without_usable_id_is_not_found() {
    let app = TestApp::new().await;
    app.create_coordinate(1.0, 1.0).await;
    app.create_geo_catalog("stay", "#s", 1.0, 1.0).await;

    for uri in ["/geo_catalog", "/geo_catalog?id=abc", "/geo_catalog?id="] {
        let response = app.request(Method::DELETE, uri, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
    }
    assert_eq!(app.geo_catalog_count().await, 1);
}

#[tokio::test]
async fn hashtags_are_distinct_and_sorted() {
    let app = TestApp::new().await;
    app.create_coordinate(1.0, 1.0).await;
    for tag in ["#zeta", "#alpha", "#zeta", "#Beta"] {
        app.create_geo_catalog("t", tag, 1.0, 1.0).await;
    }

    let response = app.request(Method::GET, "/hashtags", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response_json(response).await,
        json!({ "hashtags": ["#Beta", "#alpha", "#zeta"] })
    );
}
