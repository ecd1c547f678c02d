use bookshelf_core::db::open_db_in_memory;
use bookshelf_core::{BookService, SqliteBookRepository};
use rusqlite::Connection;

fn seed_catalog(conn: &Connection) -> (i64, i64, i64, i64) {
    let service = BookService::new(SqliteBookRepository::new(conn));
    let hobbit = service
        .add(
            "The Hobbit",
            "J. R. R. Tolkien",
            "Unlikely hero takes on dragon",
        )
        .unwrap();
    let ulysses = service
        .add("Ulysses", "James Joyce", "A day in the life")
        .unwrap();
    let decameron = service.add("Decameron", "Boccaccio", "Various").unwrap();
    let promethea = service.add("Promethea", "Alan Moore", "Apocalypse").unwrap();
    (hobbit, ulysses, decameron, promethea)
}

#[test]
fn search_matches_tokens_across_all_text_fields() {
    let conn = open_db_in_memory().unwrap();
    let (hobbit, ulysses, decameron, promethea) = seed_catalog(&conn);
    let service = BookService::new(SqliteBookRepository::new(&conn));

    let hits = service
        .search_for_words(&["the".to_string(), "apocalypse".to_string()])
        .unwrap();
    let hit_ids: Vec<_> = hits.iter().map(|book| book.id).collect();

    // "the" matches the Hobbit title and the Ulysses description;
    // "apocalypse" matches the Promethea description; Decameron has no hit.
    assert!(hit_ids.contains(&hobbit));
    assert!(hit_ids.contains(&ulysses));
    assert!(hit_ids.contains(&promethea));
    assert!(!hit_ids.contains(&decameron));
}

#[test]
fn search_is_case_insensitive() {
    let conn = open_db_in_memory().unwrap();
    let (hobbit, ..) = seed_catalog(&conn);
    let service = BookService::new(SqliteBookRepository::new(&conn));

    let hits = service.search_for_words(&["HOBBIT".to_string()]).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, hobbit);
}

#[test]
fn search_does_not_match_substrings() {
    let conn = open_db_in_memory().unwrap();
    seed_catalog(&conn);
    let service = BookService::new(SqliteBookRepository::new(&conn));

    let hits = service.search_for_words(&["hobb".to_string()]).unwrap();
    assert!(hits.is_empty());
}

#[test]
fn book_matching_multiple_words_is_returned_once_per_word() {
    let conn = open_db_in_memory().unwrap();
    let service = BookService::new(SqliteBookRepository::new(&conn));

    let id = service
        .add("The Hobbit", "J. R. R. Tolkien", "The classic adventure")
        .unwrap();

    let hits = service
        .search_for_words(&["the".to_string(), "hobbit".to_string()])
        .unwrap();

    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|book| book.id == id));
}

#[test]
fn search_reflects_edits() {
    let conn = open_db_in_memory().unwrap();
    let service = BookService::new(SqliteBookRepository::new(&conn));

    let id = service.add("Draft", "Anon", "placeholder").unwrap();

    let before = service.search_for_words(&["promethea".to_string()]).unwrap();
    assert!(before.is_empty());

    service.edit(id, "Promethea", "Alan Moore", "Apocalypse").unwrap();

    let after = service.search_for_words(&["promethea".to_string()]).unwrap();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].id, id);
}

#[test]
fn empty_query_returns_no_hits() {
    let conn = open_db_in_memory().unwrap();
    seed_catalog(&conn);
    let service = BookService::new(SqliteBookRepository::new(&conn));

    assert!(service.search_for_words(&[]).unwrap().is_empty());
}
