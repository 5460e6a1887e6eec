// tests/index_parser_test.rs

use coursera_dl::{
    client::SessionClient,
    config::AppConfig,
    error::{AppError, AppResult},
    extractor::{CourseIndexExtractor, index_page::parse_index_page},
    models::ResourceKind,
};
use std::{fs, sync::Arc};
use url::Url;

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("tests/fixtures/{}", name)).expect("无法读取测试页面")
}

#[test]
fn test_fixture_sections_sorted_by_week_then_page_order() -> AppResult<()> {
    let page_url = Url::parse("https://www.coursera.org/ml-001/lecture/index")?;
    let course = parse_index_page(&fixture("lecture_index.html"), "ml-001", &page_url)?;

    assert_eq!(course.id, "ml-001");
    assert_eq!(course.title, "Machine Learning");

    // "Basics" 没有周次 (0)，排在 "Intro (week 1)" 之前
    let names: Vec<_> = course.sections.iter().map(|s| s.display_name()).collect();
    assert_eq!(names, vec!["Basics", "Intro (week 1)"]);
    assert_eq!(course.sections[0].page_index, 1);
    assert_eq!(course.sections[1].week, 1);

    let basics = &course.sections[0];
    let titles: Vec<_> = basics.lectures.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, vec!["Setup", "Tools: Octave/MATLAB"]);
    assert_eq!(basics.lectures[0].resources.len(), 4);
    assert_eq!(basics.lectures[1].resources.len(), 1);
    assert_eq!(basics.lectures[1].resources[0].kind, ResourceKind::Pdf);
    assert_eq!(
        basics.lectures[1].resources[0].url.as_str(),
        "https://www.coursera.org/files/basics/tools.pdf"
    );

    let intro = &course.sections[1];
    assert_eq!(intro.lectures[0].title, "Welcome");
    let kinds: Vec<_> = intro.lectures[0].resources.iter().map(|r| r.kind).collect();
    assert_eq!(kinds, ResourceKind::ALL.to_vec());
    Ok(())
}

#[tokio::test]
async fn test_extractor_sends_session_cookie() -> AppResult<()> {
    let mut server = mockito::Server::new_async().await;
    let index_mock = server
        .mock("GET", "/ml-001/lecture/index")
        .match_header("cookie", "session=secret-cookie")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(fixture("lecture_index.html"))
        .create_async()
        .await;

    let config = Arc::new(AppConfig::for_site(&server.url()));
    let client = Arc::new(SessionClient::new(config, "secret-cookie")?);
    let course = CourseIndexExtractor::new(client)
        .extract_course("ml-001")
        .await?;

    index_mock.assert_async().await;
    assert_eq!(course.sections.len(), 2);
    // 相对链接基于测试服务器地址解析
    assert!(
        course.sections[1].lectures[0].resources[3]
            .url
            .as_str()
            .starts_with(&server.url())
    );
    Ok(())
}

#[tokio::test]
async fn test_unknown_course_reports_url_and_id() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/no-such-course/lecture/index")
        .with_status(404)
        .create_async()
        .await;

    let config = Arc::new(AppConfig::for_site(&server.url()));
    let client = Arc::new(SessionClient::new(config, "cookie").unwrap());
    let err = CourseIndexExtractor::new(client)
        .extract_course("no-such-course")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::IndexFetch { .. }));
    assert_eq!(err.exit_code(), 3);
    let msg = err.to_string();
    assert!(msg.contains(&format!("{}/no-such-course/lecture/index", server.url())));
    assert!(msg.contains("(no-such-course)"));
}

#[tokio::test]
async fn test_login_page_means_title_not_found() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/ml-001/lecture/index")
        .with_status(200)
        .with_body(fixture("login_page.html"))
        .create_async()
        .await;

    let config = Arc::new(AppConfig::for_site(&server.url()));
    let client = Arc::new(SessionClient::new(config, "expired").unwrap());
    let err = CourseIndexExtractor::new(client)
        .extract_course("ml-001")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::TitleNotFound));
    assert_eq!(err.exit_code(), 4);
}

#[tokio::test]
async fn test_forbidden_index_is_a_rejected_session() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/ml-001/lecture/index")
        .with_status(403)
        .create_async()
        .await;

    let config = Arc::new(AppConfig::for_site(&server.url()));
    let client = Arc::new(SessionClient::new(config, "expired").unwrap());
    let err = CourseIndexExtractor::new(client)
        .extract_course("ml-001")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::SessionRejected { .. }));
    assert_eq!(err.exit_code(), 4);
}
