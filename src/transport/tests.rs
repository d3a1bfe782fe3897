use std::thread;
use std::time::Duration;

use super::clock::PlayClock;

#[test]
fn paused_clock_holds_its_position() {
    let clock = PlayClock::paused_at(Duration::from_secs(3));
    assert!(!clock.is_running());
    thread::sleep(Duration::from_millis(5));
    assert_eq!(clock.elapsed(), Duration::from_secs(3));
}

#[test]
fn running_clock_accumulates_across_pauses() {
    let mut clock = PlayClock::default();
    clock.resume();
    thread::sleep(Duration::from_millis(10));
    clock.pause();
    let first = clock.elapsed();
    assert!(first >= Duration::from_millis(10));

    thread::sleep(Duration::from_millis(10));
    assert_eq!(clock.elapsed(), first);

    clock.resume();
    thread::sleep(Duration::from_millis(5));
    assert!(clock.elapsed() >= first + Duration::from_millis(5));
}

#[test]
fn reset_keeps_running_state() {
    let mut clock = PlayClock::default();
    clock.reset_to(Duration::from_secs(30));
    assert!(!clock.is_running());
    assert_eq!(clock.elapsed(), Duration::from_secs(30));

    clock.resume();
    clock.reset_to(Duration::ZERO);
    assert!(clock.is_running());
    assert!(clock.elapsed() < Duration::from_secs(1));
}

#[test]
fn reported_position_stops_at_the_source_length() {
    let mut clock = PlayClock::paused_at(Duration::from_millis(990));
    clock.resume();
    thread::sleep(Duration::from_millis(20));
    let total = Some(Duration::from_secs(1));
    assert_eq!(clock.position_within(total), Duration::from_secs(1));
    assert!(clock.position_within(None) > Duration::from_secs(1));

    clock.reset_to(Duration::ZERO);
    assert!(clock.position_within(total) < Duration::from_secs(1));
}
