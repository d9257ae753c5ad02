use assert_cmd::Command;
use predicates::prelude::*;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn estat() -> Command {
    let mut cmd = Command::cargo_bin("estat").expect("binary");
    cmd.env_remove("ESTAT_APP_ID")
        .env_remove("ESTAT_LANG")
        .env_remove("ESTAT_BASE_URL")
        .env_remove("ESTAT_DEBUG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_operations() {
    estat()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("stats-list"))
        .stdout(predicate::str::contains("stats-datas"))
        .stdout(predicate::str::contains("data-catalog"));
}

#[test]
fn test_missing_app_id_fails() {
    estat()
        .args(["meta-info", "0003109741"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ESTAT_APP_ID not set"));
}

#[test]
fn test_bad_condition_fails() {
    estat()
        .env("ESTAT_APP_ID", "test-app")
        .env("ESTAT_BASE_URL", "http://127.0.0.1:1")
        .args(["stats-data", "--stats-data-id", "0003109741", "--cond", "cdCat99=1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value 'cdCat99=1' for '--cond"))
        .stderr(predicate::str::contains("unknown narrowing axis"))
        .stderr(predicate::str::contains("configuration error").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_meta_info_prints_json() {
    let server = MockServer::start().await;
    let body = std::fs::read(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/get_meta_info.xml"
    ))
    .expect("fixture");

    Mock::given(method("GET"))
        .and(path("/getMetaInfo"))
        .and(query_param("appId", "test-app"))
        .and(query_param("statsDataId", "0003109741"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .mount(&server)
        .await;

    let uri = server.uri();
    let assert = tokio::task::spawn_blocking(move || {
        estat()
            .env("ESTAT_APP_ID", "test-app")
            .env("ESTAT_BASE_URL", uri)
            .args(["meta-info", "0003109741"])
            .assert()
    })
    .await
    .expect("join");

    assert
        .success()
        .stdout(predicate::str::contains("\"id\": \"0003109741\""))
        .stderr(predicate::str::contains("status 0"));
}
