use eventgate_lib::{Error, Favorite, FavoritesStore};
use tempfile::TempDir;

fn full_favorite(id: &str) -> Favorite {
    Favorite {
        id: id.to_string(),
        name: "Lakers vs Celtics".to_string(),
        date: Some("2025-03-01".to_string()),
        time: Some("19:30:00".to_string()),
        category: Some("Sports".to_string()),
        venue: Some("Crypto.com Arena".to_string()),
        image: Some("https://example.com/img.jpg".to_string()),
    }
}

#[test]
fn add_list_remove_round_trip() {
    let store = FavoritesStore::open_in_memory().expect("store opens");
    let favorite = full_favorite("evt1");

    let stored = store.add(favorite.clone()).expect("add succeeds");
    assert_eq!(stored, favorite);

    let listed = store.list().expect("list succeeds");
    let matching: Vec<_> = listed.iter().filter(|f| f.id == "evt1").collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0], &favorite);

    store.remove("evt1").expect("remove succeeds");
    assert!(store.list().unwrap().iter().all(|f| f.id != "evt1"));
}

#[test]
fn duplicate_add_conflicts_and_keeps_count() {
    let store = FavoritesStore::open_in_memory().unwrap();
    store.add(full_favorite("evt1")).unwrap();
    store.add(Favorite::new("evt2", "Other")).unwrap();
    let before = store.count().unwrap();

    let err = store
        .add(Favorite::new("evt1", "Renamed"))
        .expect_err("duplicate id");
    assert!(matches!(err, Error::FavoriteExists { ref id } if id == "evt1"));

    assert_eq!(store.count().unwrap(), before);
    let original = store
        .list()
        .unwrap()
        .into_iter()
        .find(|f| f.id == "evt1")
        .unwrap();
    assert_eq!(original.name, "Lakers vs Celtics");
}

#[test]
fn removing_unknown_id_is_not_found() {
    let store = FavoritesStore::open_in_memory().unwrap();
    store.add(full_favorite("evt1")).unwrap();

    let err = store.remove("missing").expect_err("unknown id");
    assert!(matches!(err, Error::FavoriteNotFound { ref id } if id == "missing"));
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn list_preserves_insertion_order() {
    let store = FavoritesStore::open_in_memory().unwrap();
    for id in ["c", "a", "b"] {
        store.add(Favorite::new(id, id.to_uppercase())).unwrap();
    }

    let ids: Vec<String> = store.list().unwrap().into_iter().map(|f| f.id).collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
}

#[test]
fn favorites_persist_across_reopen() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("favorites.db");
    let url = format!("sqlite://{}", path.display());

    {
        let store = FavoritesStore::open(&url).expect("store opens");
        store.add(full_favorite("evt9")).unwrap();
    }

    let reopened = FavoritesStore::open(&url).expect("store reopens");
    assert_eq!(reopened.list().unwrap(), vec![full_favorite("evt9")]);
}

#[test]
fn clones_share_one_collection() {
    let store = FavoritesStore::open_in_memory().unwrap();
    let other = store.clone();

    store.add(Favorite::new("shared", "Shared")).unwrap();
    assert_eq!(other.count().unwrap(), 1);

    let err = other.add(Favorite::new("shared", "Again")).unwrap_err();
    assert!(matches!(err, Error::FavoriteExists { .. }));
}
