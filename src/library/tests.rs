use std::sync::Arc;
use std::time::Duration;

use super::*;
use super::model::display_name;
use crate::config::TrackField;

fn raw(filename: &str, mime: &str) -> RawFile {
    RawFile::new(filename, MediaSource::Memory(Arc::from(vec![0u8; 8])), mime)
}

fn track(registry: &TrackRegistry, id: TrackId) -> &Track {
    registry.find(id).unwrap()
}

#[test]
fn display_name_strips_only_the_last_extension() {
    assert_eq!(display_name("Song.mp3"), "Song");
    assert_eq!(display_name("live.at.wembley.flac"), "live.at.wembley");
    assert_eq!(display_name("noext"), "noext");
    assert_eq!(display_name(".hidden"), ".hidden");
    assert_eq!(display_name("trailing."), "trailing.");
}

#[test]
fn import_keeps_audio_in_arrival_order_and_skips_the_rest() {
    let mut registry = TrackRegistry::new();
    let report = registry.import(vec![
        raw("b.mp3", "audio/mpeg"),
        raw("notes.txt", "text/plain"),
        raw("a.flac", "Audio/FLAC"),
        raw("cover.jpg", "image/jpeg"),
    ]);

    assert_eq!(report.imported.len(), 2);
    assert_eq!(report.skipped, vec!["notes.txt".to_string(), "cover.jpg".to_string()]);
    let names: Vec<&str> = registry.tracks().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["b", "a"]);
}

#[test]
fn imported_tracks_get_placeholder_metadata_and_fresh_ids() {
    let mut registry = TrackRegistry::new();
    let report = registry.import(vec![raw("x.mp3", "audio/mpeg"), raw("x.mp3", "audio/mpeg")]);

    let (a, b) = (report.imported[0], report.imported[1]);
    assert_ne!(a, b);
    let t = track(&registry, a);
    assert_eq!(t.artist, UNKNOWN_ARTIST);
    assert_eq!(t.album, UNKNOWN_ALBUM);
    assert_eq!(t.genre, UNKNOWN_GENRE);
    assert!(t.duration.is_none());
    assert_eq!(t.locator.as_str(), format!("memory:{a}"));
}

#[test]
fn file_sources_resolve_to_file_locators() {
    let mut registry = TrackRegistry::new();
    let report = registry.import(vec![RawFile::new(
        "song.ogg",
        MediaSource::File("/music/song.ogg".into()),
        "audio/ogg",
    )]);
    let t = track(&registry, report.imported[0]);
    assert_eq!(t.locator.as_str(), "file:///music/song.ogg");
}

#[test]
fn library_grows_monotonically_across_imports() {
    let mut registry = TrackRegistry::new();
    registry.import(vec![raw("a.mp3", "audio/mpeg")]);
    registry.import(vec![raw("b.mp3", "audio/mpeg")]);
    registry.import(Vec::new());
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.tracks()[0].name, "a");
    assert_eq!(registry.tracks()[1].name, "b");
}

#[test]
fn remove_and_find() {
    let mut registry = TrackRegistry::new();
    let ids = registry
        .import(vec![raw("a.mp3", "audio/mpeg"), raw("b.mp3", "audio/mpeg")])
        .imported;

    let removed = registry.remove(ids[0]).unwrap();
    assert_eq!(removed.name, "a");
    assert!(registry.find(ids[0]).is_none());
    assert!(registry.remove(ids[0]).is_none());
    assert!(registry.contains(ids[1]));
}

#[test]
fn set_duration_updates_known_tracks_only() {
    let mut registry = TrackRegistry::new();
    let id = registry.import(vec![raw("a.mp3", "audio/mpeg")]).imported[0];

    assert!(registry.set_duration(id, Duration::from_secs(180)));
    assert_eq!(track(&registry, id).duration, Some(Duration::from_secs(180)));
    assert!(!registry.set_duration(TrackId::generate(), Duration::from_secs(1)));
}

#[test]
fn filter_search_matches_name_artist_album_case_insensitive() {
    let mut registry = TrackRegistry::new();
    let ids = registry
        .import(vec![
            raw("Blue Monday.mp3", "audio/mpeg"),
            raw("Ceremony.mp3", "audio/mpeg"),
            raw("Bluebird.mp3", "audio/mpeg"),
        ])
        .imported;

    let filter = ViewFilter::new("BLUE", GenreFilter::All);
    assert_eq!(filter.apply(registry.tracks()), vec![ids[0], ids[2]]);

    // Placeholder artist/album are searchable too.
    let filter = ViewFilter::new("unknown album", GenreFilter::All);
    assert_eq!(filter.apply(registry.tracks()), ids);

    let filter = ViewFilter::new("   ", GenreFilter::All);
    assert_eq!(filter.apply(registry.tracks()), ids);
    assert!(!filter.is_active());
}

#[test]
fn filter_genre_and_search_combine() {
    let mut registry = TrackRegistry::new();
    let ids = registry
        .import(vec![
            raw("alpha.mp3", "audio/mpeg"),
            raw("beta.mp3", "audio/mpeg"),
        ])
        .imported;
    registry.tracks_mut()[1].genre = "Synth Pop".to_string();

    let filter = ViewFilter::new("", GenreFilter::parse("pop"));
    assert_eq!(filter.apply(registry.tracks()), vec![ids[1]]);

    let filter = ViewFilter::new("alpha", GenreFilter::parse("pop"));
    assert!(filter.apply(registry.tracks()).is_empty());

    let filter = ViewFilter::new("", GenreFilter::parse("All"));
    assert_eq!(filter.apply(registry.tracks()), ids);
}

#[test]
fn genre_filter_parse() {
    assert_eq!(GenreFilter::parse(""), GenreFilter::All);
    assert_eq!(GenreFilter::parse(" ALL "), GenreFilter::All);
    assert_eq!(GenreFilter::parse(" rock "), GenreFilter::Genre("rock".into()));
    assert_eq!(GenreFilter::parse("rock").label(), "rock");
}

#[test]
fn display_from_fields_skips_unknown_duration() {
    let mut registry = TrackRegistry::new();
    let id = registry.import(vec![raw("Song.mp3", "audio/mpeg")]).imported[0];

    let fields = [TrackField::Artist, TrackField::Name, TrackField::Duration];
    assert_eq!(
        display_from_fields(track(&registry, id), &fields, " - "),
        "Unknown Artist - Song"
    );

    registry.set_duration(id, Duration::from_secs(125));
    assert_eq!(
        display_from_fields(track(&registry, id), &fields, " - "),
        "Unknown Artist - Song - 2:05"
    );
    assert_eq!(display_from_fields(track(&registry, id), &[], " - "), "Song");
}
