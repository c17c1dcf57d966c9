use eventgate_lib::geohash;
use eventgate_lib::{Error, GeocodeResolver, QueryBuilder, SearchRequest, GEOHASH_PRECISION};
use reqwest::Client;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn provider_with(ip: &str, body: serde_json::Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/{ip}")))
        .and(query_param("token", "geo-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;
    server
}

fn resolver(server: &MockServer) -> GeocodeResolver {
    GeocodeResolver::new(Client::new(), server.uri(), "geo-token")
}

#[tokio::test]
async fn resolves_ip_to_stable_geohash() {
    let server = provider_with(
        "8.8.8.8",
        json!({"ip": "8.8.8.8", "loc": "34.0522,-118.2437"}),
    )
    .await;
    let resolver = resolver(&server);

    let first = resolver.resolve("8.8.8.8").await.expect("resolves");
    let second = resolver.resolve("8.8.8.8").await.expect("resolves");

    assert_eq!(first, second);
    assert_eq!(first.len(), GEOHASH_PRECISION);
    assert_eq!(first, geohash::encode(34.0522, -118.2437, 9).unwrap());
}

#[tokio::test]
async fn missing_location_is_lookup_failure() {
    let server = provider_with("10.0.0.1", json!({"ip": "10.0.0.1", "bogon": true})).await;

    let err = resolver(&server).resolve("10.0.0.1").await.unwrap_err();
    assert!(matches!(err, Error::LookupFailed { ref ip } if ip == "10.0.0.1"));
    assert!(!err.is_upstream());
}

#[tokio::test]
async fn provider_error_status_is_upstream_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = resolver(&server).resolve("1.1.1.1").await.unwrap_err();
    assert!(matches!(err, Error::UpstreamStatus { status: 429, .. }));
}

#[tokio::test]
async fn auto_detect_sets_geo_point_and_keeps_latlong() {
    let server = provider_with("8.8.8.8", json!({"loc": "34.0522,-118.2437"})).await;
    let builder = QueryBuilder::new("tm-key", resolver(&server));

    let request = SearchRequest {
        keyword: Some("rock".to_string()),
        ip_address: Some("8.8.8.8".to_string()),
        auto_detect: true,
        latlong: Some("40.7,-74.0".to_string()),
        ..SearchRequest::default()
    };

    let params = builder.build(&request).await.expect("builds");
    assert_eq!(params.geo_point.as_deref(), Some("9q5ctr186"));
    assert_eq!(params.latlong.as_deref(), Some("40.7,-74.0"));
    assert_eq!(params.apikey, "tm-key");
    assert_eq!(params.keyword, "rock");
}

#[tokio::test]
async fn failed_lookup_fails_the_build() {
    let server = provider_with("192.168.1.1", json!({"bogon": true})).await;
    let builder = QueryBuilder::new("tm-key", resolver(&server));

    let request = SearchRequest {
        ip_address: Some("192.168.1.1".to_string()),
        auto_detect: true,
        location: Some("Los Angeles".to_string()),
        ..SearchRequest::default()
    };

    let err = builder.build(&request).await.unwrap_err();
    assert!(matches!(err, Error::LookupFailed { .. }));
}

#[tokio::test]
async fn manual_location_does_not_geocode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let builder = QueryBuilder::new("tm-key", resolver(&server));

    let request = SearchRequest {
        location: Some("Los Angeles".to_string()),
        ip_address: Some("8.8.8.8".to_string()),
        auto_detect: false,
        ..SearchRequest::default()
    };

    let params = builder.build(&request).await.expect("builds");
    assert!(params.geo_point.is_none());
    assert_eq!(params.radius, "10");
}

#[tokio::test]
async fn auto_detect_without_ip_skips_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let builder = QueryBuilder::new("tm-key", resolver(&server));

    let request = SearchRequest {
        auto_detect: true,
        ..SearchRequest::default()
    };

    let params = builder.build(&request).await.expect("builds");
    assert!(params.geo_point.is_none());
}

#[tokio::test]
async fn non_ip_input_never_reaches_provider() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"loc": "0.0,0.0"})),
        )
        .expect(0)
        .mount(&server)
        .await;
    let resolver = resolver(&server);

    for input in ["8.8.8.8/json", "8.8.8.8#", "..", "", "me?token=mine"] {
        let err = resolver.resolve(input).await.unwrap_err();
        assert!(
            matches!(err, Error::LookupFailed { ref ip } if ip == input),
            "{input}: {err}"
        );
    }
}

#[tokio::test]
async fn ipv6_address_is_sent_as_single_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2001:4860:4860::8888"))
        .and(query_param("token", "geo-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"loc": "37.4056,-122.0775"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (lat, lng) = resolver(&server)
        .locate("2001:4860:4860::8888")
        .await
        .expect("locates");
    assert_eq!((lat, lng), (37.4056, -122.0775));
}
