use async_std::task::yield_now;
use eduapp::{
    browser::{ResourceBrowser, Status},
    error::AppError,
    fetcher::{load_translations, Fetcher},
    presenter::{CardContext, Presentation, Presenter},
};
use educore::{
    error::FetchError,
    filter::BrowserSpec,
    listing::Pagination,
    notice::Notice,
    query::QueryState,
    resource::{Document, Exam, LikeStatus, Module, Resource},
    session::{Session, Token},
};
use mockall::Sequence;
use serde_json::{json, Value};
use std::sync::Arc;
use test_edu::{
    core::MockApiClient,
    deferred::DeferredApi,
    fixture::{EXAMS_PAGE_1, EXAMS_PAGE_2, MODULES, TRANSLATIONS_FR},
    notice::RecordingNotifier,
};

fn body(s: &str) -> Value {
    serde_json::from_str(s).expect("fixture is valid json")
}

fn ids<T: Resource>(items: &[T]) -> Vec<i64> {
    items.iter().map(|item| item.id()).collect()
}

fn logged_in() -> Session {
    Session::authenticated(Token::new("secret"), None)
}

#[async_std::test]
async fn loading_spans_the_request() -> anyhow::Result<()> {
    let mut api = MockApiClient::new();
    api.expect_list()
        .times(1)
        .withf(|path, params| path == "modules" && params.is_empty())
        .returning(|_, _| Ok(body(MODULES)));
    let browser = ResourceBrowser::new(
        Fetcher::<Module, _>::new(Arc::new(api)),
        BrowserSpec::modules(),
        Session::anonymous(),
    );
    assert_eq!(browser.status(), Status::Idle);

    let fetch = browser.refresh();
    assert!(browser.loading());
    assert_eq!(browser.status(), Status::Loading);
    fetch.await;

    assert!(!browser.loading());
    assert_eq!(browser.status(), Status::Loaded);
    assert_eq!(ids(&browser.collection()), vec![1, 2]);
    assert_eq!(browser.pagination(), None);
    Ok(())
}

#[async_std::test]
async fn dropped_refetch_clears_loading() -> anyhow::Result<()> {
    let mut api = MockApiClient::new();
    api.expect_list()
        .times(1)
        .withf(|_, params| params.first() == Some(&("search".to_string(), "alg".to_string())))
        .returning(|_, _| Ok(json!([{ "id": 1, "nomMod": "Algebra" }])));
    let browser = ResourceBrowser::new(
        Fetcher::<Module, _>::new(Arc::new(api)).paged(),
        BrowserSpec::modules(),
        Session::anonymous(),
    );
    let presenter = Presenter::new(CardContext::new("http://localhost:8000/storage"));

    let superseded = browser.set_search("al").expect("paged endpoints refetch");
    assert!(browser.loading());
    drop(superseded);
    assert!(!browser.loading());
    assert_eq!(browser.status(), Status::Idle);

    browser.set_search("alg").expect("paged endpoints refetch").await;
    assert_eq!(ids(&browser.collection()), vec![1]);
    assert!(!browser.loading());
    assert_eq!(browser.status(), Status::Loaded);
    assert!(matches!(presenter.present(&browser), Presentation::Cards(_)));

    // unpolled refresh futures are released as well
    let _ = browser.refresh();
    assert!(!browser.loading());
    assert_eq!(browser.status(), Status::Loaded);
    Ok(())
}

#[async_std::test]
async fn latest_issued_response_wins() -> anyhow::Result<()> {
    let api = Arc::new(DeferredApi::new());
    let browser = ResourceBrowser::new(
        Fetcher::<Module, _>::new(api.clone()).paged(),
        BrowserSpec::modules(),
        Session::anonymous(),
    );

    let first = browser.set_search("al").expect("paged endpoints refetch");
    let second = browser.set_search("alg").expect("paged endpoints refetch");
    let driver = async {
        while api.requests() < 2 {
            yield_now().await;
        }
        assert!(api.respond(1, Ok(json!([{ "id": 1, "nomMod": "Algebra" }]))));
        while browser.collection().is_empty() {
            yield_now().await;
        }
        // the older request answers last
        assert!(api.respond(0, Ok(json!([
            { "id": 1, "nomMod": "Algebra" },
            { "id": 2, "nomMod": "Algorithms" },
        ]))));
    };
    futures::join!(first, second, driver);

    assert_eq!(ids(&browser.collection()), vec![1]);
    assert_eq!(browser.query().search_term(), Some("alg"));
    assert_eq!(api.params(1), Some(vec![
        ("search".to_string(), "alg".to_string()),
        ("page".to_string(), "1".to_string()),
    ]));
    assert!(!browser.loading());
    assert_eq!(browser.status(), Status::Loaded);
    Ok(())
}

#[async_std::test]
async fn stale_failure_is_discarded() -> anyhow::Result<()> {
    let api = Arc::new(DeferredApi::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let browser = ResourceBrowser::new(
        Fetcher::<Module, _>::new(api.clone()).paged(),
        BrowserSpec::modules(),
        Session::anonymous(),
    )
    .notifier(notifier.clone());

    let first = browser.refresh();
    let second = browser.refresh();
    let driver = async {
        while api.requests() < 2 {
            yield_now().await;
        }
        assert!(api.respond(1, Ok(body(MODULES))));
        while browser.collection().is_empty() {
            yield_now().await;
        }
        assert!(api.respond(0, Err(FetchError::Server { status: 500 })));
    };
    futures::join!(first, second, driver);

    assert!(!browser.failed());
    assert_eq!(ids(&browser.collection()), vec![1, 2]);
    assert!(notifier.notices().is_empty());
    Ok(())
}

#[async_std::test]
async fn failure_keeps_previous_collection() -> anyhow::Result<()> {
    let mut api = MockApiClient::new();
    let mut seq = Sequence::new();
    api.expect_list()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(body(MODULES)));
    api.expect_list()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Err(FetchError::Network("connection refused".to_string())));
    api.expect_list()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(json!([])));
    let notifier = Arc::new(RecordingNotifier::new());
    let browser = ResourceBrowser::new(
        Fetcher::<Module, _>::new(Arc::new(api)),
        BrowserSpec::modules(),
        Session::anonymous(),
    )
    .notifier(notifier.clone());

    browser.refresh().await;
    assert_eq!(ids(&browser.collection()), vec![1, 2]);

    browser.refresh().await;
    assert!(browser.failed());
    assert_eq!(browser.status(), Status::Failed);
    assert_eq!(
        browser.error(),
        Some(FetchError::Network("connection refused".to_string())),
    );
    assert_eq!(ids(&browser.collection()), vec![1, 2]);
    assert_eq!(notifier.notices(), vec![Notice::CouldNotLoad]);

    // a successful retry clears the failure
    browser.retry().await;
    assert!(!browser.failed());
    assert_eq!(browser.error(), None);
    assert!(browser.collection().is_empty());
    assert_eq!(notifier.notices(), vec![Notice::CouldNotLoad]);
    Ok(())
}

#[async_std::test]
async fn teardown_before_issue() -> anyhow::Result<()> {
    let api = Arc::new(DeferredApi::new());
    let browser = ResourceBrowser::new(
        Fetcher::<Module, _>::new(api.clone()),
        BrowserSpec::modules(),
        Session::anonymous(),
    );
    let fetch = browser.refresh();
    browser.teardown();
    fetch.await;

    assert!(browser.is_torn_down());
    assert_eq!(api.requests(), 0);
    assert!(!browser.loading());
    assert_eq!(browser.status(), Status::Idle);

    // nothing further is issued once torn down
    browser.refresh().await;
    assert!(browser.set_search("alg").is_none());
    assert_eq!(api.requests(), 0);
    Ok(())
}

#[async_std::test]
async fn teardown_while_in_flight() -> anyhow::Result<()> {
    let api = Arc::new(DeferredApi::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let browser = ResourceBrowser::new(
        Fetcher::<Module, _>::new(api.clone()),
        BrowserSpec::modules(),
        Session::anonymous(),
    )
    .notifier(notifier.clone());

    let fetch = browser.refresh();
    let driver = async {
        while api.requests() < 1 {
            yield_now().await;
        }
        browser.teardown();
        api.respond(0, Ok(body(MODULES)));
    };
    futures::join!(fetch, driver);

    assert!(browser.collection().is_empty());
    assert!(!browser.loading());
    assert_eq!(browser.status(), Status::Idle);
    assert!(notifier.notices().is_empty());
    Ok(())
}

#[async_std::test]
async fn paged_listing() -> anyhow::Result<()> {
    let mut api = MockApiClient::new();
    api.expect_list()
        .times(1)
        .withf(|path, params| path == "exams/type/EFM"
            && params == &vec![("page".to_string(), "1".to_string())])
        .returning(|_, _| Ok(body(EXAMS_PAGE_1)));
    api.expect_list()
        .times(1)
        .withf(|_, params| params == &vec![("page".to_string(), "2".to_string())])
        .returning(|_, _| Ok(body(EXAMS_PAGE_2)));
    let browser = ResourceBrowser::new(
        Fetcher::<Exam, _>::new(Arc::new(api))
            .path("exams/type/EFM")
            .paged(),
        BrowserSpec::exams(),
        Session::anonymous(),
    );

    browser.refresh().await;
    assert_eq!(browser.pagination(), Some(Pagination { current_page: 1, total_pages: 3 }));
    assert_eq!(ids(&browser.view()), vec![21, 22]);

    browser.set_page(2).expect("paged endpoints refetch").await;
    assert_eq!(browser.query().page.get(), 2);
    assert_eq!(browser.pagination(), Some(Pagination { current_page: 2, total_pages: 3 }));
    assert_eq!(ids(&browser.view()), vec![23]);
    Ok(())
}

#[async_std::test]
async fn all_sentinels_are_not_sent() -> anyhow::Result<()> {
    let mut api = MockApiClient::new();
    api.expect_list()
        .times(1)
        .withf(|_, params| params == &vec![
            ("year".to_string(), "2024".to_string()),
            ("page".to_string(), "1".to_string()),
        ])
        .returning(|_, _| Ok(body(EXAMS_PAGE_1)));
    let browser = ResourceBrowser::new(
        Fetcher::<Exam, _>::new(Arc::new(api)).paged(),
        BrowserSpec::exams(),
        Session::anonymous(),
    )
    .initial_query(QueryState::new()
        .search("")
        .filter("module_id", "all")
        .filter("year", "2024"));

    browser.refresh().await;
    assert!(!browser.failed());
    Ok(())
}

#[async_std::test]
async fn full_refresh_keeps_whole_collection() -> anyhow::Result<()> {
    let mut api = MockApiClient::new();
    api.expect_list()
        .times(2)
        .withf(|path, params| path == "modules" && params.is_empty())
        .returning(|_, _| Ok(body(MODULES)));
    let browser = ResourceBrowser::new(
        Fetcher::<Module, _>::new(Arc::new(api)),
        BrowserSpec::modules(),
        Session::anonymous(),
    )
    .initial_query(QueryState::new().search("rithm").filter("year", "2024"));

    browser.refresh().await;
    assert_eq!(ids(&browser.view()), vec![2]);

    // a retry while the query is active still stores everything
    browser.retry().await;
    assert!(browser.set_search("").is_none());
    assert!(browser.set_filter("year", "all").is_none());
    assert_eq!(ids(&browser.view()), vec![1, 2]);
    Ok(())
}

#[async_std::test]
async fn full_mode_filters_locally() -> anyhow::Result<()> {
    let mut api = MockApiClient::new();
    api.expect_list()
        .times(1)
        .returning(|_, _| Ok(body(MODULES)));
    let browser = ResourceBrowser::new(
        Fetcher::<Module, _>::new(Arc::new(api)),
        BrowserSpec::modules(),
        Session::anonymous(),
    );
    browser.refresh().await;

    assert!(browser.set_search("RITHM").is_none());
    assert_eq!(ids(&browser.view()), vec![2]);
    assert!(browser.set_search("").is_none());
    assert!(browser.set_filter("year", "2023").is_none());
    assert_eq!(ids(&browser.view()), vec![1]);
    assert!(browser.set_filter("year", "tous").is_none());
    assert!(browser.set_sort(Some("name".to_string())).is_none());
    assert_eq!(ids(&browser.view()), vec![1, 2]);
    // the collection itself is left in fetch order
    assert_eq!(ids(&browser.collection()), vec![1, 2]);
    Ok(())
}

#[async_std::test]
async fn login_gate() -> anyhow::Result<()> {
    let mut api = MockApiClient::new();
    api.expect_list().times(0);
    let notifier = Arc::new(RecordingNotifier::new());
    let browser = ResourceBrowser::new(
        Fetcher::<Module, _>::new(Arc::new(api)),
        BrowserSpec::modules(),
        Session::anonymous(),
    )
    .require_login(true)
    .notifier(notifier.clone());

    browser.refresh().await;
    assert!(browser.failed());
    assert!(!browser.loading());
    assert_eq!(notifier.notices(), vec![Notice::LoginRequired]);
    Ok(())
}

#[async_std::test]
async fn mutations_leave_collection_alone() -> anyhow::Result<()> {
    let mut api = MockApiClient::new();
    api.expect_list()
        .times(1)
        .returning(|_, _| Ok(body(MODULES)));
    api.expect_remove()
        .times(1)
        .withf(|path, id| path == Module::KIND && *id == 1)
        .returning(|_, _| Ok(()));
    api.expect_create()
        .times(1)
        .withf(|path, payload| path == "modules" && payload["nomMod"] == "Réseaux")
        .returning(|_, payload| Ok(payload));
    let api = Arc::new(api);

    let browser = ResourceBrowser::new(
        Fetcher::<Module, _>::new(api.clone()),
        BrowserSpec::modules(),
        logged_in(),
    );
    browser.refresh().await;
    browser.remove(1).await?;
    browser.create(&json!({ "nomMod": "Réseaux" })).await?;
    assert_eq!(ids(&browser.collection()), vec![1, 2]);

    let anonymous = ResourceBrowser::new(
        Fetcher::<Module, _>::new(api),
        BrowserSpec::modules(),
        Session::anonymous(),
    );
    assert!(matches!(anonymous.remove(1).await, Err(AppError::Unauthorized)));
    Ok(())
}

#[async_std::test]
async fn translations() -> anyhow::Result<()> {
    let mut api = MockApiClient::new();
    api.expect_translations()
        .times(1)
        .withf(|locale| locale == "fr")
        .returning(|_| Ok(body(TRANSLATIONS_FR)));
    api.expect_translations()
        .times(1)
        .withf(|locale| locale == "en")
        .returning(|_| Err(FetchError::Server { status: 404 }));

    let (fr, error) = load_translations(&api, "fr").await;
    assert_eq!(error, None);
    assert_eq!(fr.get("search.placeholder"), "Recherchez un module...");

    let (en, error) = load_translations(&api, "en").await;
    assert_eq!(error, Some(FetchError::Server { status: 404 }));
    assert!(en.is_empty());
    assert_eq!(en.get("search.placeholder"), "search.placeholder");
    Ok(())
}

#[async_std::test]
async fn presenter_follows_browser() -> anyhow::Result<()> {
    let mut api = MockApiClient::new();
    api.expect_list()
        .times(1)
        .returning(|_, _| Ok(body(MODULES)));
    let browser = ResourceBrowser::new(
        Fetcher::<Module, _>::new(Arc::new(api)),
        BrowserSpec::modules(),
        Session::anonymous(),
    );
    let presenter = Presenter::new(CardContext::new("http://localhost:8000/storage"))
        .placeholders(3);

    let fetch = browser.refresh();
    assert_eq!(presenter.present(&browser), Presentation::Placeholders(3));
    fetch.await;

    match presenter.present(&browser) {
        Presentation::Cards(cards) => {
            assert_eq!(cards.len(), 2);
            assert_eq!(cards[0].title, "Algebra");
            assert_eq!(
                cards[0].image.src.as_deref(),
                Some("http://localhost:8000/storage/modules/algebra.png"),
            );
        }
        other => panic!("expected cards, got {other:?}"),
    }

    assert!(browser.set_search("zoologie").is_none());
    assert_eq!(
        presenter.present(&browser),
        Presentation::Empty {
            message: "Aucun résultat trouvé pour la recherche : \"zoologie\"".to_string(),
        },
    );
    Ok(())
}

#[tokio::test]
async fn spawned_fetch_survives_teardown() -> anyhow::Result<()> {
    let api = Arc::new(DeferredApi::new());
    let browser = ResourceBrowser::new(
        Fetcher::<Module, _>::new(api.clone()),
        BrowserSpec::modules(),
        Session::anonymous(),
    );

    let handle = tokio::spawn(browser.refresh());
    while api.requests() < 1 {
        tokio::task::yield_now().await;
    }
    assert!(browser.loading());
    browser.teardown();
    api.respond(0, Ok(body(MODULES)));
    handle.await?;

    assert!(browser.collection().is_empty());
    assert!(!browser.loading());
    Ok(())
}

#[async_std::test]
async fn like_requires_login() -> anyhow::Result<()> {
    let mut api = MockApiClient::new();
    api.expect_list()
        .times(1)
        .returning(|_, _| Ok(json!([{ "id": 7, "title": "Cours SQL", "likes": 2 }])));
    api.expect_act()
        .times(1)
        .returning(|_, _, _| Ok(json!({ "status": "added" })));
    let api = Arc::new(api);

    let anonymous = ResourceBrowser::new(
        Fetcher::<Document, _>::new(api.clone()),
        BrowserSpec::documents(),
        Session::anonymous(),
    );
    assert!(matches!(anonymous.toggle_like(7).await, Err(AppError::Unauthorized)));

    let browser = ResourceBrowser::new(
        Fetcher::<Document, _>::new(api),
        BrowserSpec::documents(),
        logged_in(),
    );
    browser.refresh().await;
    let status = browser.toggle_like(7).await?;
    assert_eq!(status, LikeStatus::Added);
    // the displayed count is adjusted by the caller, not the browser
    assert_eq!(browser.collection()[0].likes, 2);
    assert_eq!(status.apply(browser.collection()[0].likes), 3);
    Ok(())
}
