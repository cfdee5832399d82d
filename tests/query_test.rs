use circulation_desk::models::BookStatus;
use circulation_desk::seed::sample_snapshot;
use circulation_desk::services::book_service::{filter_books, search_books, BookFilter, ALL_GENRES};
use circulation_desk::services::member_service::{borrowed_by, filter_members, member_summaries};

fn ids<'a, T: 'a>(items: impl IntoIterator<Item = &'a T>, id: impl Fn(&T) -> &str) -> Vec<String> {
    items.into_iter().map(|item| id(item).to_string()).collect()
}

#[test]
fn test_hobbit_query_finds_only_the_hobbit() {
    let snapshot = sample_snapshot();

    for query in ["hobbit", "HOBBIT", "Hob"] {
        let found = filter_books(&snapshot.books, &BookFilter::query(query));
        assert_eq!(found.len(), 1, "query {}", query);
        assert_eq!(found[0].title, "The Hobbit");
    }
}

#[test]
fn test_query_matches_author_and_isbn() {
    let snapshot = sample_snapshot();

    let by_author = filter_books(&snapshot.books, &BookFilter::query("tolkien"));
    assert_eq!(ids(by_author, |b| b.id.as_str()), vec!["b3"]);

    let by_isbn = filter_books(&snapshot.books, &BookFilter::query("0441172719"));
    assert_eq!(ids(by_isbn, |b| b.id.as_str()), vec!["b6"]);

    let empty = filter_books(&snapshot.books, &BookFilter::query(""));
    assert_eq!(empty.len(), snapshot.books.len());
}

#[test]
fn test_query_ignores_surrounding_whitespace() {
    let snapshot = sample_snapshot();

    for query in [" dune", "dune  ", "\tDune\n"] {
        let found = filter_books(&snapshot.books, &BookFilter::query(query));
        assert_eq!(ids(found, |b| b.id.as_str()), vec!["b6"], "query {:?}", query);
    }

    let blank = filter_books(&snapshot.books, &BookFilter::query("   "));
    assert_eq!(blank.len(), snapshot.books.len());
    assert_eq!(search_books(&snapshot.books, " dune ", "", false).len(), 1);
}

#[test]
fn test_availability_checked_out() {
    let snapshot = sample_snapshot();
    let filter = BookFilter {
        availability: Some("checked-out".to_string()),
        ..Default::default()
    };

    let found = filter_books(&snapshot.books, &filter);
    assert_eq!(ids(found.iter().copied(), |b| b.id.as_str()), vec!["b3", "b7"]);
    assert!(found.iter().all(|b| b.status == BookStatus::CheckedOut));
}

#[test]
fn test_unrecognised_availability_matches_nothing() {
    let snapshot = sample_snapshot();
    let filter = BookFilter {
        availability: Some("lost".to_string()),
        ..Default::default()
    };
    assert!(filter_books(&snapshot.books, &filter).is_empty());
}

#[test]
fn test_genre_filter_keeps_catalog_order() {
    let snapshot = sample_snapshot();

    let fantasy = BookFilter {
        genre: Some("Fantasy".to_string()),
        ..Default::default()
    };
    assert_eq!(ids(filter_books(&snapshot.books, &fantasy), |b| b.id.as_str()), vec!["b1", "b3"]);

    let all = BookFilter {
        genre: Some(ALL_GENRES.to_string()),
        ..Default::default()
    };
    assert_eq!(filter_books(&snapshot.books, &all).len(), 8);
}

#[test]
fn test_combined_filters() {
    let snapshot = sample_snapshot();
    let filter = BookFilter {
        query: Some("the".to_string()),
        genre: Some("Fantasy".to_string()),
        availability: Some("available".to_string()),
    };
    // The Hobbit is Fantasy but lent out
    assert_eq!(ids(filter_books(&snapshot.books, &filter), |b| b.id.as_str()), vec!["b1"]);
}

#[test]
fn test_search_books_available_only() {
    let snapshot = sample_snapshot();

    let all = search_books(&snapshot.books, "", "", false);
    assert_eq!(all.len(), 8);

    let on_shelf = search_books(&snapshot.books, "", "", true);
    assert_eq!(on_shelf.len(), 6);

    let biography = search_books(&snapshot.books, "", "Biography", true);
    assert!(biography.is_empty());
}

#[test]
fn test_member_search() {
    let snapshot = sample_snapshot();

    assert_eq!(ids(filter_members(&snapshot.members, "jane"), |m| m.id.as_str()), vec!["m2"]);
    assert_eq!(ids(filter_members(&snapshot.members, "555-555"), |m| m.id.as_str()), vec!["m3"]);
    assert_eq!(filter_members(&snapshot.members, "EXAMPLE.COM").len(), 4);
    assert_eq!(filter_members(&snapshot.members, "").len(), 4);
    assert!(filter_members(&snapshot.members, "nobody").is_empty());
}

#[test]
fn test_borrowed_counts_follow_active_loans() {
    let snapshot = sample_snapshot();
    let summaries = member_summaries(&snapshot.members, &snapshot.transactions);

    let counts: Vec<(String, usize)> = summaries
        .iter()
        .map(|s| (s.member.id.clone(), s.borrowed_books))
        .collect();
    assert_eq!(
        counts,
        vec![
            ("m1".to_string(), 1),
            ("m2".to_string(), 0),
            ("m3".to_string(), 1),
            ("m4".to_string(), 0),
        ]
    );

    for summary in &summaries {
        assert_eq!(
            summary.borrowed_books,
            borrowed_by(&snapshot.transactions, &summary.member.id).len()
        );
    }
}
