use crate::focus::{classify, eased_falloff, linear_falloff, FocusConfig, Intensity, Radii, Zone};

fn medium() -> Radii {
    FocusConfig::default().radii()
}

fn low() -> Radii {
    FocusConfig {
        intensity: Intensity::Low,
        ..FocusConfig::default()
    }
    .radii()
}

#[test]
fn nearby_words_focus_distant_word_periphery() {
    // Spans at (100,100), (150,100), (400,400); sample at (120,100).
    let centers = [(100.0, 100.0), (150.0, 100.0), (400.0, 400.0)];
    let zones = classify(120.0, 100.0, &centers, &medium());

    assert_eq!(zones.zones[0], Zone::Focus); // distance 20
    assert_eq!(zones.zones[1], Zone::Focus); // distance 30
    assert_eq!(zones.zones[2], Zone::Periphery); // distance ~424
    assert_eq!(zones.primary, Some(0));
    assert_eq!(zones.focus_count(), 2);
    assert_eq!(zones.transition_count(), 0);
}

#[test]
fn lowering_intensity_shrinks_the_focus_zone() {
    // Same layout at low intensity (focus 45, transition 90): a word inside
    // the medium focus zone drops into the transition annulus, and only the
    // nearest word stays focus/primary.
    let centers = [(100.0, 100.0), (150.0, 100.0), (400.0, 400.0)];
    let zones = classify(60.0, 100.0, &centers, &low());

    assert_eq!(zones.zones[0], Zone::Focus); // distance 40 <= 45
    assert!(matches!(zones.zones[1], Zone::Transition { .. })); // distance 90
    assert_eq!(zones.zones[2], Zone::Periphery);
    assert_eq!(zones.primary, Some(0));
    assert_eq!(zones.focus_count(), 1);

    // The same sample at medium keeps both nearby words in focus.
    let zones = classify(60.0, 100.0, &centers, &medium());
    assert_eq!(zones.focus_count(), 2);
}

#[test]
fn single_primary_with_deterministic_tie_break() {
    // Two regions equidistant from the sample: first in cache order wins.
    let centers = [(90.0, 100.0), (110.0, 100.0), (100.0, 120.0)];
    let zones = classify(100.0, 100.0, &centers, &medium());

    assert_eq!(zones.primary, Some(0));
    assert_eq!(zones.focus_count(), 3);
}

#[test]
fn no_primary_without_focus_members() {
    let centers = [(500.0, 500.0), (900.0, 100.0)];
    let zones = classify(0.0, 0.0, &centers, &medium());
    assert!(zones.primary.is_none());
    assert_eq!(zones.focus_count(), 0);
}

#[test]
fn zone_boundaries_are_inclusive() {
    // Exactly on the focus radius -> focus; exactly on the transition
    // radius -> transition.
    let centers = [(90.0, 0.0), (180.0, 0.0), (180.1, 0.0)];
    let zones = classify(0.0, 0.0, &centers, &medium());

    assert_eq!(zones.zones[0], Zone::Focus);
    assert!(matches!(zones.zones[1], Zone::Transition { .. }));
    assert_eq!(zones.zones[2], Zone::Periphery);
}

#[test]
fn monotonic_zone_ordering() {
    // Random-ish spread of centers; every focus distance <= every
    // transition distance, and no periphery member gets a highlight zone.
    let centers: Vec<(f64, f64)> = (0..50)
        .map(|i| {
            let angle = i as f64 * 0.7;
            let r = i as f64 * 9.0;
            (300.0 + r * angle.cos(), 300.0 + r * angle.sin())
        })
        .collect();
    let radii = medium();
    let zones = classify(300.0, 300.0, &centers, &radii);

    let dist = |i: usize| {
        let (cx, cy) = centers[i];
        ((cx - 300.0f64).powi(2) + (cy - 300.0f64).powi(2)).sqrt()
    };

    let mut max_focus = 0.0f64;
    let mut min_transition = f64::INFINITY;
    for (i, zone) in zones.zones.iter().enumerate() {
        match zone {
            Zone::Focus => max_focus = max_focus.max(dist(i)),
            Zone::Transition { .. } => {
                min_transition = min_transition.min(dist(i));
                assert!(dist(i) <= radii.transition);
            }
            Zone::Periphery => assert!(dist(i) > radii.transition),
        }
    }
    assert!(max_focus <= min_transition);
}

#[test]
fn transition_fraction_normalized_over_annulus() {
    let radii = medium();
    let centers = [(135.0, 0.0)]; // halfway between 90 and 180
    let zones = classify(0.0, 0.0, &centers, &radii);

    match zones.zones[0] {
        Zone::Transition { fraction } => assert!((fraction - 0.5).abs() < 1e-9),
        ref other => panic!("expected transition, got {:?}", other),
    }
}

#[test]
fn empty_cache_classifies_to_empty_set() {
    let zones = classify(10.0, 10.0, &[], &medium());
    assert!(zones.zones.is_empty());
    assert!(zones.primary.is_none());
}

#[test]
fn falloff_endpoints() {
    assert_eq!(linear_falloff(0.0), 1.0);
    assert_eq!(linear_falloff(1.0), 0.0);
    assert_eq!(eased_falloff(0.0), 1.0);
    assert_eq!(eased_falloff(1.0), 0.0);

    // Eased falloff stays above linear mid-annulus (shallow start).
    assert!(eased_falloff(0.5) > linear_falloff(0.5));

    // Out-of-range fractions clamp instead of extrapolating.
    assert_eq!(eased_falloff(2.0), 0.0);
    assert_eq!(linear_falloff(-1.0), 1.0);
}
