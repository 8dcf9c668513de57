//! Integration tests for `KakaoClient` against a local `wiremock` server.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mukji_core::{
    aggregate, Generations, KeywordQuery, LatLng, LatLngBounds, PlaceSearch, PoolRequest,
    ReverseGeocoder, ViewportCache, MAX_SEARCH_RADIUS_METERS,
};
use mukji_kakao::{KakaoClient, KakaoError};

const KEYWORD_PATH: &str = "/v2/local/search/keyword.json";
const ADDRESS_PATH: &str = "/v2/local/geo/coord2address.json";
const CENTER: LatLng = LatLng::new(37.5665, 126.978);

fn test_client(server: &MockServer) -> KakaoClient {
    KakaoClient::with_base_url("test-key", &server.uri(), 5, "mukji-test/0.1", 0, 0)
        .expect("failed to build test KakaoClient")
}

fn test_client_with_retries(server: &MockServer, max_retries: u32) -> KakaoClient {
    KakaoClient::with_base_url("test-key", &server.uri(), 5, "mukji-test/0.1", max_retries, 0)
        .expect("failed to build test KakaoClient")
}

fn query(page: u32) -> KeywordQuery {
    KeywordQuery {
        keyword: "음식점".to_owned(),
        center: CENTER,
        radius_meters: 150,
        page,
    }
}

fn document(id: &str, x: &str, y: &str) -> serde_json::Value {
    json!({
        "id": id,
        "place_name": format!("식당 {id}"),
        "category_name": "음식점 > 한식",
        "category_group_code": "FD6",
        "phone": "",
        "address_name": "서울 중구 태평로1가 31",
        "road_address_name": "서울 중구 세종대로 110",
        "x": x,
        "y": y,
        "place_url": format!("http://place.map.kakao.com/{id}"),
        "distance": ""
    })
}

fn keyword_body(documents: Vec<serde_json::Value>, is_end: bool) -> serde_json::Value {
    json!({
        "meta": {
            "is_end": is_end,
            "pageable_count": 45,
            "total_count": 120,
            "same_name": null
        },
        "documents": documents
    })
}

#[tokio::test]
async fn search_page_sends_scoped_authenticated_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(KEYWORD_PATH))
        .and(header("Authorization", "KakaoAK test-key"))
        .and(query_param("query", "음식점"))
        .and(query_param("x", "126.978"))
        .and(query_param("y", "37.5665"))
        .and(query_param("radius", "150"))
        .and(query_param("page", "2"))
        .and(query_param("size", "15"))
        .respond_with(ResponseTemplate::new(200).set_body_json(keyword_body(
            vec![
                document("1", "126.9781", "37.5667"),
                document("2", "126.9779", "37.5663"),
            ],
            false,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let page = test_client(&server).search_page(&query(2)).await.unwrap();

    let ids: Vec<&str> = page.items.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
    assert!(page.has_next_page);
    assert_eq!(page.items[0].phone, None, "empty phone maps to None");
    assert_eq!(
        page.items[0].road_address.as_deref(),
        Some("서울 중구 세종대로 110")
    );
}

#[tokio::test]
async fn search_page_clamps_radius_to_provider_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(KEYWORD_PATH))
        .and(query_param("radius", MAX_SEARCH_RADIUS_METERS.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(keyword_body(vec![], true)))
        .expect(1)
        .mount(&server)
        .await;

    let wide = KeywordQuery {
        radius_meters: 50_000,
        ..query(1)
    };
    let page = test_client(&server).search_page(&wide).await.unwrap();

    assert!(page.items.is_empty());
    assert!(!page.has_next_page);
}

#[tokio::test]
async fn last_page_reports_no_next_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(KEYWORD_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(keyword_body(vec![], true)),
        )
        .mount(&server)
        .await;

    let page = test_client(&server).search_page(&query(1)).await.unwrap();

    assert!(page.items.is_empty());
    assert!(!page.has_next_page);
}

#[tokio::test]
async fn documents_with_bad_coordinates_are_skipped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(KEYWORD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(keyword_body(
            vec![
                document("ok", "126.978", "37.5665"),
                document("broken", "", "37.5665"),
            ],
            true,
        )))
        .mount(&server)
        .await;

    let page = test_client(&server).search_page(&query(1)).await.unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, "ok");
}

#[tokio::test]
async fn unauthorized_key_is_reported_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(KEYWORD_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errorType": "AccessDeniedError",
            "message": "wrong appKey format"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_client_with_retries(&server, 3)
        .search_page(&query(1))
        .await;

    assert!(
        matches!(result, Err(KakaoError::Unauthorized { status: 401 })),
        "expected Unauthorized, got: {result:?}"
    );
}

#[tokio::test]
async fn rate_limit_carries_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(KEYWORD_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .mount(&server)
        .await;

    let result = test_client(&server).search_page(&query(1)).await;

    assert!(
        matches!(result, Err(KakaoError::RateLimited { retry_after_secs: 7 })),
        "expected RateLimited(7), got: {result:?}"
    );
}

#[tokio::test]
async fn rate_limit_is_retried_until_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(KEYWORD_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(KEYWORD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(keyword_body(
            vec![document("1", "126.978", "37.5665")],
            true,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let page = test_client_with_retries(&server, 2)
        .search_page(&query(1))
        .await
        .unwrap();

    assert_eq!(page.items.len(), 1);
}

#[tokio::test]
async fn server_error_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(KEYWORD_PATH))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let result = test_client(&server).search_page(&query(1)).await;

    match result {
        Err(KakaoError::UnexpectedStatus { status, url }) => {
            assert_eq!(status, 502);
            assert!(url.contains(KEYWORD_PATH), "url was: {url}");
        }
        other => panic!("expected UnexpectedStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(KEYWORD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let result = test_client(&server).search_page(&query(1)).await;

    match result {
        Err(KakaoError::Deserialize { context, .. }) => {
            assert!(context.contains("keyword search"), "context was: {context}");
        }
        other => panic!("expected Deserialize, got: {other:?}"),
    }
}

#[tokio::test]
async fn invalid_center_sends_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut bad = query(1);
    bad.center = LatLng::new(f64::NAN, 126.978);
    let result = test_client(&server).search_page(&bad).await;

    assert!(matches!(result, Err(KakaoError::InvalidCoordinate { .. })));
}

#[tokio::test]
async fn address_of_prefers_road_address() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ADDRESS_PATH))
        .and(header("Authorization", "KakaoAK test-key"))
        .and(query_param("x", "126.978"))
        .and(query_param("y", "37.5665"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": { "total_count": 1 },
            "documents": [{
                "road_address": { "address_name": "서울 중구 세종대로 110", "building_name": "서울시청" },
                "address": { "address_name": "서울 중구 태평로1가 31" }
            }]
        })))
        .mount(&server)
        .await;

    let address = test_client(&server).address_of(CENTER).await.unwrap();

    assert_eq!(address.as_deref(), Some("서울 중구 세종대로 110"));
}

#[tokio::test]
async fn address_of_unknown_point_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ADDRESS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": { "total_count": 0 },
            "documents": []
        })))
        .mount(&server)
        .await;

    let address = test_client(&server).address_of(CENTER).await.unwrap();

    assert_eq!(address, None);
}

#[tokio::test]
async fn aggregate_walks_pages_until_is_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(KEYWORD_PATH))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(keyword_body(
            vec![
                document("1", "126.9781", "37.5667"),
                document("far", "127.1", "37.6"),
            ],
            false,
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(KEYWORD_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(keyword_body(
            vec![document("2", "126.9779", "37.5663")],
            true,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let request = PoolRequest {
        keyword: "음식점".to_owned(),
        center: CENTER,
        radius_meters: 150,
        max_pages: 4,
    };
    let viewport = LatLngBounds::around(CENTER, 250.0);
    let mut cache = ViewportCache::new(4);
    let token = Generations::new().begin();

    let pool = aggregate(&client, &request, &viewport, &mut cache, &token)
        .await
        .unwrap();

    let ids: Vec<&str> = pool.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
    assert_eq!(cache.len(), 1);
}
