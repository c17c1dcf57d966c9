use axum_test::TestServer;
use wiremock::MockServer;

use eventgate_service::router;
use eventgate_service_shared::test_utils::test_state;

/// Gateway under test plus the mock standing in for both upstream APIs.
pub struct Harness {
    pub server: TestServer,
    pub upstream: MockServer,
}

pub async fn harness() -> Harness {
    let upstream = MockServer::start().await;
    let state = test_state(&upstream.uri(), &upstream.uri());
    let server = TestServer::new(router(state)).expect("test server");
    Harness { server, upstream }
}
