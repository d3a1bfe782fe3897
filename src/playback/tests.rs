use std::collections::HashSet;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::library::TrackId;
use crate::transport::RequestId;

#[test]
fn repeat_mode_cycles_back_to_off() {
    let mut mode = RepeatMode::default();
    assert_eq!(mode, RepeatMode::Off);
    mode = mode.cycle();
    assert_eq!(mode, RepeatMode::RepeatAll);
    mode = mode.cycle();
    assert_eq!(mode, RepeatMode::RepeatOne);
    mode = mode.cycle();
    assert_eq!(mode, RepeatMode::Off);
}

#[test]
fn next_and_previous_wrap() {
    let mut rng = StdRng::seed_from_u64(7);
    assert_eq!(next_index(Some(2), 3, false, &mut rng), Some(0));
    assert_eq!(next_index(Some(0), 3, false, &mut rng), Some(1));
    assert_eq!(previous_index(Some(0), 3), Some(2));
    assert_eq!(previous_index(Some(2), 3), Some(1));
}

#[test]
fn untracked_cursor_starts_at_the_ends() {
    let mut rng = StdRng::seed_from_u64(7);
    assert_eq!(next_index(None, 4, false, &mut rng), Some(0));
    assert_eq!(previous_index(None, 4), Some(3));
}

#[test]
fn empty_sequence_has_no_index() {
    let mut rng = StdRng::seed_from_u64(7);
    assert_eq!(next_index(Some(0), 0, false, &mut rng), None);
    assert_eq!(next_index(None, 0, true, &mut rng), None);
    assert_eq!(previous_index(None, 0), None);
}

#[test]
fn next_then_previous_restores_index() {
    let mut rng = StdRng::seed_from_u64(7);
    for len in 1..6 {
        for i in 0..len {
            let n = next_index(Some(i), len, false, &mut rng);
            assert_eq!(previous_index(n, len), Some(i));
        }
    }
}

#[test]
fn shuffle_stays_in_range_and_reaches_everything() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut seen = HashSet::new();
    for _ in 0..1000 {
        let i = next_index(Some(0), 5, true, &mut rng).unwrap();
        assert!(i < 5);
        seen.insert(i);
    }
    assert_eq!(seen.len(), 5);
}

#[test]
fn cursor_only_confirms_the_pending_request() {
    let a = TrackId::generate();
    let b = TrackId::generate();
    let mut cursor = Cursor::default();

    cursor.begin(RequestId(1), a);
    cursor.begin(RequestId(2), b);
    assert_eq!(cursor.track(), Some(b));
    assert_eq!(cursor.state(), PlaybackState::Stopped);

    assert_eq!(cursor.confirm(RequestId(1), None), None);
    assert!(!cursor.is_playing());

    assert_eq!(cursor.confirm(RequestId(2), Some(Duration::from_secs(9))), Some(b));
    assert_eq!(cursor.state(), PlaybackState::Playing);
    assert_eq!(cursor.loaded_track(), Some(b));
    assert_eq!(cursor.duration(), Some(Duration::from_secs(9)));
    assert!(!cursor.is_pending());
}

#[test]
fn rejection_falls_back_to_the_loaded_track() {
    let a = TrackId::generate();
    let b = TrackId::generate();
    let mut cursor = Cursor::default();
    cursor.begin(RequestId(1), a);
    cursor.confirm(RequestId(1), None);

    cursor.begin(RequestId(2), b);
    assert!(!cursor.reject(RequestId(1)));
    assert!(cursor.reject(RequestId(2)));
    assert_eq!(cursor.track(), Some(a));
    assert!(cursor.is_playing());
}

#[test]
fn held_pause_applies_to_the_confirmed_track_only() {
    let a = TrackId::generate();
    let b = TrackId::generate();
    let mut cursor = Cursor::default();
    cursor.begin(RequestId(1), a);
    cursor.confirm(RequestId(1), None);

    cursor.begin(RequestId(2), b);
    cursor.set_hold_paused(true);
    cursor.defer_end();
    assert!(cursor.is_held_paused());

    cursor.confirm(RequestId(2), None);
    assert_eq!(cursor.state(), PlaybackState::Paused);
    assert!(!cursor.is_held_paused());
    assert!(!cursor.take_deferred_end());
}

#[test]
fn deferred_end_outlives_a_rejection() {
    let a = TrackId::generate();
    let b = TrackId::generate();
    let mut cursor = Cursor::default();
    cursor.begin(RequestId(1), a);
    cursor.confirm(RequestId(1), None);

    cursor.begin(RequestId(2), b);
    cursor.defer_end();
    assert!(cursor.reject(RequestId(2)));
    assert!(cursor.take_deferred_end());
    assert!(!cursor.take_deferred_end());
}

#[test]
fn index_follows_the_track_not_the_slot() {
    let a = TrackId::generate();
    let b = TrackId::generate();
    let c = TrackId::generate();
    let mut cursor = Cursor::default();
    cursor.begin(RequestId(1), b);
    cursor.confirm(RequestId(1), None);

    assert_eq!(cursor.index_in(&[a, b, c]), Some(1));
    assert_eq!(cursor.index_in(&[b]), Some(0));
    assert_eq!(cursor.index_in(&[a, c]), None);
}

#[test]
fn clear_keeps_modes() {
    let a = TrackId::generate();
    let mut cursor = Cursor::default();
    cursor.is_shuffling = true;
    cursor.repeat_mode = RepeatMode::RepeatOne;
    cursor.begin(RequestId(1), a);
    cursor.confirm(RequestId(1), None);
    cursor.set_position(Duration::from_secs(3));

    cursor.clear();
    assert_eq!(cursor.state(), PlaybackState::Stopped);
    assert_eq!(cursor.track(), None);
    assert_eq!(cursor.position(), Duration::ZERO);
    assert!(cursor.is_shuffling);
    assert_eq!(cursor.repeat_mode, RepeatMode::RepeatOne);
}
