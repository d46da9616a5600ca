//! Property-based tests for bookmark store operations.
//!
//! These tests verify that for any sequence of adds, deletes, and updates,
//! the store holds exactly one row per URL, add reports duplicates
//! accurately, and the stored set matches a simple map model.

use std::collections::HashMap;

use proptest::prelude::*;

use minibrowser::database::Database;
use minibrowser::managers::bookmark_manager::{BookmarkManager, BookmarkManagerTrait};

/// Operations that can be performed on the bookmark store.
#[derive(Debug, Clone)]
enum BookmarkOp {
    Add(usize, String),    // URL pool index, title
    DeleteByUrl(usize),    // URL pool index
    Update(usize, String), // URL pool index (bookmark to move to), new title
}

fn pool_url(idx: usize) -> String {
    format!("https://site{}.example.com/", idx % 5)
}

/// Strategy for generating operation sequences over a small URL pool, so
/// duplicate adds and missing deletes both occur often.
fn arb_bookmark_ops() -> impl Strategy<Value = Vec<BookmarkOp>> {
    prop::collection::vec(
        prop_oneof![
            4 => (0..10usize, "[A-Za-z]{3,12}").prop_map(|(i, t)| BookmarkOp::Add(i, t)),
            2 => (0..10usize).prop_map(BookmarkOp::DeleteByUrl),
            1 => (0..10usize, "[A-Za-z]{3,12}").prop_map(|(i, t)| BookmarkOp::Update(i, t)),
        ],
        1..40,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// For any operation sequence the store matches a url -> title map:
    /// same length, same titles, no URL stored twice.
    #[test]
    fn bookmark_store_matches_model(ops in arb_bookmark_ops()) {
        let db = Database::open_in_memory().unwrap();
        let mut manager = BookmarkManager::new(db.connection());
        let mut model: HashMap<String, String> = HashMap::new();

        for op in &ops {
            match op {
                BookmarkOp::Add(idx, title) => {
                    let url = pool_url(*idx);
                    let added = manager.add_bookmark(title, &url).unwrap();

                    prop_assert_eq!(
                        added,
                        !model.contains_key(&url),
                        "add reported {} for url {} already-present={}",
                        added,
                        &url,
                        model.contains_key(&url)
                    );
                    model.entry(url).or_insert_with(|| title.clone());
                }
                BookmarkOp::DeleteByUrl(idx) => {
                    let url = pool_url(*idx);
                    let result = manager.delete_bookmark_by_url(&url);

                    prop_assert_eq!(
                        result.is_ok(),
                        model.remove(&url).is_some(),
                        "delete outcome diverged from model for {}",
                        &url
                    );
                }
                BookmarkOp::Update(idx, title) => {
                    let target = pool_url(*idx);
                    // Pick the stored bookmark with the smallest id to move.
                    let Some(first) = manager.list_bookmarks().unwrap().pop() else {
                        continue;
                    };
                    let result = manager.update_bookmark(first.id, title, &target);

                    if target == first.url || !model.contains_key(&target) {
                        prop_assert!(result.is_ok());
                        model.remove(&first.url);
                        model.insert(target, title.clone());
                    } else {
                        // Moving onto another bookmark's URL is refused and
                        // changes nothing.
                        prop_assert!(result.is_err());
                    }
                }
            }

            // The store and the model agree after every operation.
            let stored = manager.list_bookmarks().unwrap();
            prop_assert_eq!(stored.len(), model.len());

            let mut seen: HashMap<&str, usize> = HashMap::new();
            for bookmark in &stored {
                *seen.entry(bookmark.url.as_str()).or_insert(0) += 1;
                prop_assert_eq!(
                    model.get(&bookmark.url),
                    Some(&bookmark.title),
                    "stored title diverged for {}",
                    &bookmark.url
                );
            }
            prop_assert!(
                seen.values().all(|&count| count == 1),
                "duplicate URLs stored: {:?}",
                seen
            );
        }
    }

    /// Adding the same URL twice reports true then false regardless of the
    /// titles used.
    #[test]
    fn double_add_reports_duplicate(first in "[A-Za-z]{3,12}", second in "[A-Za-z]{3,12}") {
        let db = Database::open_in_memory().unwrap();
        let mut manager = BookmarkManager::new(db.connection());

        prop_assert!(manager.add_bookmark(&first, "https://example.com/").unwrap());
        prop_assert!(!manager.add_bookmark(&second, "https://example.com/").unwrap());

        let stored = manager.list_bookmarks().unwrap();
        prop_assert_eq!(stored.len(), 1);
        prop_assert_eq!(&stored[0].title, &first, "first title wins");
    }
}
