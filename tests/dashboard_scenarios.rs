//! End-to-end scenarios through the dashboard, with an in-memory store and a
//! hand-driven clock.

use std::f64::consts::FRAC_PI_2;
use std::rc::Rc;

use approx::assert_abs_diff_eq;
use chrono::{Duration, TimeZone, Utc};
use rstest::rstest;
use tempfile::tempdir;

use chronosphere::constants::{TIME_FORMAT_KEY, TRACKED_CITIES_KEY};
use chronosphere::{
    project, CityDirectory, Dashboard, HourCycle, Loader, ManualClock, MemoryStore,
    RotationController, RotationSettings, RotationTarget,
};

fn start_clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2026, 10, 19, 13, 5, 9).unwrap())
}

fn create_dashboard(store: &MemoryStore, clock: &ManualClock) -> Dashboard {
    Loader::new()
        .dashboard_with(Rc::new(store.clone()), Box::new(clock.clone()))
        .unwrap()
}

#[rstest]
#[case(0.0, 0.0, 1.0)]
#[case(90.0, 45.0, 2.5)]
#[case(-90.0, -120.0, 2.5)]
#[case(-33.8688, 151.2093, 7.0)]
fn test_every_marker_lies_on_the_globe(#[case] lat: f64, #[case] lng: f64, #[case] radius: f64) {
    let p = project(lat, lng, radius);
    assert!(p.x.is_finite() && p.y.is_finite() && p.z.is_finite());
    assert_abs_diff_eq!(p.magnitude(), radius, epsilon = 1e-12);
}

#[test]
fn test_fresh_install_shows_default_clocks() {
    let store = MemoryStore::new();
    let dashboard = create_dashboard(&store, &start_clock());

    let cards = dashboard.clock_cards().unwrap();
    let names: Vec<&str> = cards.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["New York", "London", "Tokyo"]);
    assert_eq!(dashboard.time().hour_cycle(), HourCycle::H24);

    // Nothing is written until the user changes something
    assert!(store.raw(TRACKED_CITIES_KEY).is_none());
    assert!(store.raw(TIME_FORMAT_KEY).is_none());
}

#[test]
fn test_corrupt_favorites_fall_back_to_defaults() {
    let store = MemoryStore::with_entries([(TRACKED_CITIES_KEY, "[\"tokyo\", oops")]);
    let dashboard = create_dashboard(&store, &start_clock());

    let ids: Vec<&str> = dashboard
        .tracked_cities()
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(ids, vec!["new-york", "london", "tokyo"]);
}

#[test]
fn test_tracking_changes_survive_a_restart() {
    let store = MemoryStore::new();
    let clock = start_clock();

    {
        let mut dashboard = create_dashboard(&store, &clock);
        assert!(dashboard.track_city("sydney"));
        assert!(!dashboard.track_city("sydney"));
        assert!(dashboard.untrack_city("london"));
        dashboard.toggle_format();
    }

    let dashboard = create_dashboard(&store, &clock);
    let ids: Vec<&str> = dashboard
        .tracked_cities()
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(ids, vec!["new-york", "tokyo", "sydney"]);
    assert!(dashboard.time().is_12_hour());
    assert_eq!(dashboard.clock_cards().unwrap()[0].time, "09:05:09 AM");
}

#[test]
fn test_toggle_format_twice_restores_preference() {
    let store = MemoryStore::new();
    let mut dashboard = create_dashboard(&store, &start_clock());
    let original = dashboard.time().hour_cycle();

    dashboard.toggle_format();
    assert_eq!(store.raw(TIME_FORMAT_KEY).as_deref(), Some("true"));
    dashboard.toggle_format();

    assert_eq!(dashboard.time().hour_cycle(), original);
    assert_eq!(store.raw(TIME_FORMAT_KEY).as_deref(), Some("false"));
}

#[test]
fn test_clocks_advance_together_on_tick() {
    let store = MemoryStore::new();
    let clock = start_clock();
    let mut dashboard = create_dashboard(&store, &clock);
    dashboard.track_city("kolkata-does-not-exist");
    dashboard.track_city("delhi");

    let times = |dashboard: &Dashboard| -> Vec<String> {
        dashboard
            .clock_cards()
            .unwrap()
            .into_iter()
            .map(|c| c.time)
            .collect()
    };

    let before = times(&dashboard);
    assert_eq!(before, vec!["09:05:09", "14:05:09", "22:05:09", "18:35:09"]);

    clock.advance(Duration::seconds(51));
    // Frames alone never move the clocks
    for _ in 0..90 {
        dashboard.frame();
    }
    assert_eq!(times(&dashboard), before);

    dashboard.tick();
    assert_eq!(
        times(&dashboard),
        vec!["09:06:00", "14:06:00", "22:06:00", "18:36:00"]
    );
}

#[test]
fn test_selecting_tokyo_brings_it_forward() {
    let store = MemoryStore::new();
    let mut dashboard = create_dashboard(&store, &start_clock());

    assert!(dashboard.select_city(Some("tokyo")));
    assert!(matches!(
        dashboard.rotation().target(),
        RotationTarget::Tracking { .. }
    ));

    let mut previous = dashboard.rotation().distance_to_target().unwrap();
    for _ in 0..200 {
        dashboard.frame();
        let distance = dashboard.rotation().distance_to_target().unwrap();
        assert!(distance < previous);
        previous = distance;
    }

    let radius = dashboard.radius();
    let forward = dashboard
        .rotation()
        .orientation()
        .apply(&project(35.6762, 139.6503, radius));
    assert_abs_diff_eq!(forward.x, 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(forward.y, 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(forward.z, radius, epsilon = 1e-6);
}

#[test]
fn test_unknown_selection_leaves_globe_idle() {
    let store = MemoryStore::new();
    let mut dashboard = create_dashboard(&store, &start_clock());

    assert!(!dashboard.select_city(Some("el-dorado")));
    assert_eq!(dashboard.rotation().target(), RotationTarget::Idle);

    let before = dashboard.rotation().orientation();
    let after = dashboard.frame();
    assert!(after.yaw > before.yaw);
}

#[test]
fn test_clearing_selection_relaxes_pitch() {
    let store = MemoryStore::new();
    let mut dashboard = create_dashboard(&store, &start_clock());

    dashboard.select_city(Some("buenos-aires"));
    for _ in 0..60 {
        dashboard.frame();
    }
    dashboard.select_city(None);

    let mut previous = dashboard.rotation().orientation().pitch.abs();
    assert!(previous > 0.1);
    for _ in 0..400 {
        let pitch = dashboard.frame().pitch.abs();
        assert!(pitch <= previous);
        previous = pitch;
    }
    assert!(previous < 1e-6);
}

#[test]
fn test_quarter_turn_converges_within_bound() {
    let mut controller = RotationController::new(RotationSettings::default());
    controller.retarget(RotationTarget::Tracking {
        yaw: FRAC_PI_2,
        pitch: 0.0,
    });

    let steps = (1..=200)
        .find(|_| {
            controller.step();
            controller.distance_to_target().unwrap() < 1e-6
        })
        .unwrap();
    assert!(steps <= 200);
}

#[rstest]
#[case("")]
#[case("   ")]
fn test_blank_search_is_empty(#[case] query: &str) {
    let dashboard = create_dashboard(&MemoryStore::new(), &start_clock());
    assert!(dashboard.search(query).is_empty());
}

#[test]
fn test_search_ranks_exact_country_matches_first() {
    let dashboard = create_dashboard(&MemoryStore::new(), &start_clock());

    assert_eq!(dashboard.search("tokyo")[0].id, "tokyo");

    let results = dashboard.search("United States");
    assert_eq!(results.len(), 4);
    assert!(results.iter().all(|c| c.country == "United States"));
}

#[test]
fn test_loader_with_custom_catalog() {
    let dir = tempdir().unwrap();
    let catalog = dir.path().join("cities.json");
    std::fs::write(
        &catalog,
        r#"[
            {"id": "reykjavik", "name": "Reykjavik", "country": "Iceland",
             "continent": "Europe", "timezone": "Atlantic/Reykjavik",
             "lat": 64.1466, "lng": -21.9426},
            {"id": "tokyo", "name": "Tokyo", "country": "Japan",
             "continent": "Asia", "timezone": "Asia/Tokyo",
             "lat": 35.6762, "lng": 139.6503}
        ]"#,
    )
    .unwrap();

    let store = MemoryStore::new();
    let dashboard = Loader::new()
        .with_catalog(&catalog)
        .dashboard_with(Rc::new(store), Box::new(start_clock()))
        .unwrap();

    // The default ids that this catalog lacks are skipped
    let ids: Vec<&str> = dashboard
        .tracked_cities()
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(ids, vec!["tokyo"]);
    assert_eq!(dashboard.favorites().len(), 3);
    assert_eq!(
        CityDirectory::from_json_file(&catalog).unwrap().len(),
        dashboard.directory().len()
    );
}
