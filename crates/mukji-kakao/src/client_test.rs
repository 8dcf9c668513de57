use super::*;

fn client(base_url: &str) -> KakaoClient {
    KakaoClient::with_base_url("test-key", base_url, 5, "mukji-test/0.1", 0, 0).unwrap()
}

#[test]
fn build_url_appends_path_and_encodes_query() {
    let url = client("https://dapi.kakao.com")
        .build_url(KEYWORD_SEARCH_PATH, &[("query", "음식점"), ("page", "2")])
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://dapi.kakao.com/v2/local/search/keyword.json?query=%EC%9D%8C%EC%8B%9D%EC%A0%90&page=2"
    );
}

#[test]
fn base_url_trailing_slashes_are_normalised() {
    let url = client("https://dapi.kakao.com///")
        .build_url(COORD_TO_ADDRESS_PATH, &[("x", "126.978"), ("y", "37.5665")])
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://dapi.kakao.com/v2/local/geo/coord2address.json?x=126.978&y=37.5665"
    );
}

#[test]
fn base_url_path_prefix_is_kept() {
    let url = client("http://127.0.0.1:8080/proxy")
        .build_url(KEYWORD_SEARCH_PATH, &[("page", "1")])
        .unwrap();
    assert_eq!(
        url.as_str(),
        "http://127.0.0.1:8080/proxy/v2/local/search/keyword.json?page=1"
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = KakaoClient::with_base_url("k", "not a url", 5, "ua", 0, 0);
    assert!(
        matches!(result, Err(KakaoError::InvalidBaseUrl { .. })),
        "expected InvalidBaseUrl"
    );
}

#[test]
fn check_coordinate_accepts_valid_points() {
    assert!(check_coordinate(LatLng::new(37.5665, 126.978)).is_ok());
    assert!(check_coordinate(LatLng::new(-90.0, 180.0)).is_ok());
}

#[test]
fn check_coordinate_rejects_invalid_points() {
    assert!(matches!(
        check_coordinate(LatLng::new(f64::NAN, 126.978)),
        Err(KakaoError::InvalidCoordinate { .. })
    ));
    assert!(check_coordinate(LatLng::new(37.5, 181.0)).is_err());
    assert!(check_coordinate(LatLng::new(90.5, 126.9)).is_err());
}
