use super::*;
use crate::error::Error;
use crate::library::TrackId;

#[test]
fn create_trims_and_ignores_blank_names() {
    let mut store = PlaylistStore::new();
    assert!(store.create("   ").is_none());
    assert!(store.create("").is_none());
    assert!(store.is_empty());

    let id = store.create("  Favorites ").unwrap();
    assert_eq!(store.find(id).unwrap().name, "Favorites");
    assert!(store.find(id).unwrap().is_empty());
}

#[test]
fn names_need_not_be_unique() {
    let mut store = PlaylistStore::new();
    let a = store.create("Mix").unwrap();
    let b = store.create("Mix").unwrap();
    assert_ne!(a, b);
    assert_eq!(store.all().len(), 2);
}

#[test]
fn add_track_appends_once_in_insertion_order() {
    let mut store = PlaylistStore::new();
    let id = store.create("Road trip").unwrap();
    let (t1, t2) = (TrackId::generate(), TrackId::generate());

    assert!(store.add_track(id, t2).unwrap());
    assert!(store.add_track(id, t1).unwrap());
    assert!(!store.add_track(id, t2).unwrap());
    assert_eq!(store.find(id).unwrap().tracks(), &[t2, t1]);
}

#[test]
fn add_track_without_playlists_signals_no_playlists() {
    let mut store = PlaylistStore::new();
    let err = store
        .add_track(PlaylistId::generate(), TrackId::generate())
        .unwrap_err();
    assert!(matches!(err, Error::NoPlaylistsAvailable));
}

#[test]
fn add_track_to_stale_playlist_is_not_found() {
    let mut store = PlaylistStore::new();
    store.create("Real").unwrap();
    let stale = PlaylistId::generate();
    let err = store.add_track(stale, TrackId::generate()).unwrap_err();
    assert!(matches!(err, Error::PlaylistNotFound(id) if id == stale));
}

#[test]
fn delete_removes_only_the_named_playlist() {
    let mut store = PlaylistStore::new();
    let a = store.create("A").unwrap();
    let b = store.create("B").unwrap();

    let removed = store.delete(a).unwrap();
    assert_eq!(removed.name, "A");
    assert!(store.find(a).is_none());
    assert!(store.find(b).is_some());
    assert!(matches!(store.delete(a), Err(Error::PlaylistNotFound(_))));
}

#[test]
fn remove_track_everywhere_prunes_all_memberships() {
    let mut store = PlaylistStore::new();
    let a = store.create("A").unwrap();
    let b = store.create("B").unwrap();
    let c = store.create("C").unwrap();
    let (keep, gone) = (TrackId::generate(), TrackId::generate());
    store.add_track(a, gone).unwrap();
    store.add_track(a, keep).unwrap();
    store.add_track(b, gone).unwrap();
    store.add_track(c, keep).unwrap();

    assert_eq!(store.remove_track_everywhere(gone), 2);
    assert_eq!(store.find(a).unwrap().tracks(), &[keep]);
    assert!(store.find(b).unwrap().is_empty());
    assert_eq!(store.find(c).unwrap().tracks(), &[keep]);
    assert_eq!(store.remove_track_everywhere(gone), 0);
}
