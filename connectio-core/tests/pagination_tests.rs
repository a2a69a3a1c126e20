// connectio-core/tests/pagination_tests.rs

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use connectio_core::pagination::{paginate, Page, PageConfig};
use connectio_core::Error;

#[tokio::test]
async fn ceiling_stops_an_always_full_remote() -> anyhow::Result<()> {
    let config = PageConfig {
        max_pages: 7,
        short_page_under: None,
        ..PageConfig::default()
    }
    .without_delay();

    let calls = AtomicUsize::new(0);
    let items = paginate(&config, |_page, _cursor| {
        calls.fetch_add(1, Ordering::SeqCst);
        async {
            Ok(Page {
                items: vec![1u32; 100],
                next_cursor: None,
            })
        }
    })
    .await?;

    assert_eq!(calls.load(Ordering::SeqCst), 7);
    assert_eq!(items.len(), 700);
    Ok(())
}

#[tokio::test]
async fn empty_page_stops_with_prior_items_kept() -> anyhow::Result<()> {
    let config = PageConfig::default().without_delay();

    let calls = AtomicUsize::new(0);
    let items = paginate(&config, |page, _cursor| {
        calls.fetch_add(1, Ordering::SeqCst);
        async move {
            let items = if page == 0 { vec!["a", "b", "c"] } else { vec![] };
            Ok(Page {
                items,
                next_cursor: None,
            })
        }
    })
    .await?;

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(items, vec!["a", "b", "c"]);
    Ok(())
}

#[tokio::test]
async fn short_page_heuristic_stops_pagination() -> anyhow::Result<()> {
    let config = PageConfig {
        short_page_under: Some(10),
        ..PageConfig::default()
    }
    .without_delay();

    let calls = AtomicUsize::new(0);
    let items = paginate(&config, |page, _cursor| {
        calls.fetch_add(1, Ordering::SeqCst);
        async move {
            let count = if page == 0 { 12 } else { 4 };
            Ok(Page {
                items: vec![0u8; count],
                next_cursor: None,
            })
        }
    })
    .await?;

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(items.len(), 16);
    Ok(())
}

#[tokio::test]
async fn cursor_threads_from_page_to_page() -> anyhow::Result<()> {
    let config = PageConfig::default().without_delay();

    let seen = Mutex::new(Vec::new());
    let _ = paginate(&config, |page, cursor| {
        seen.lock().unwrap().push(cursor.clone());
        async move {
            if page == 2 {
                return Ok(Page {
                    items: Vec::<u8>::new(),
                    next_cursor: None,
                });
            }
            Ok(Page {
                items: vec![0u8; 20],
                next_cursor: Some(format!("c{page}")),
            })
        }
    })
    .await?;

    assert_eq!(
        *seen.lock().unwrap(),
        vec![None, Some("c0".to_string()), Some("c1".to_string())]
    );
    Ok(())
}

#[tokio::test]
async fn page_errors_propagate() {
    let config = PageConfig::default().without_delay();

    let result: Result<Vec<u8>, Error> = paginate(&config, |_page, _cursor| async {
        Err(Error::Status {
            status: 500,
            context: "stub".into(),
        })
    })
    .await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("500"));
}
