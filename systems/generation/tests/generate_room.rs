use lucid_core::{
    objects, AnomalyCode, ContentError, Event, ExhaustionPolicy, GenerationError, HardAnomalyCode,
    HardFamily, HazardParameters, RoomId, StageIndex, TestMode, Tier, DEFAULT_TIME_BOMB_FUSE,
};
use lucid_room::{RoomContainer, RoomObject, RoomTemplate};
use lucid_system_catalog::MutationCatalog;
use lucid_system_clock_sync::{ClockConfig, ClockSync};
use lucid_system_generation::Generator;
use lucid_system_strategies::{
    DrawerMissingContent, FixedPicker, HardAnomaly, HazardTuning, Laptop, LaptopTerminal,
    MutationStrategy, PianoMissing, PortraitUpsideDown, SealedDoor,
};

fn bedroom() -> RoomTemplate {
    RoomTemplate::new("bedroom")
        .with_object(objects::CLOCK_HOUR_HAND, RoomObject::visible())
        .with_object(objects::DIGITAL_CLOCK_TEXT, RoomObject::with_text("--:--"))
        .with_object(objects::DRAWER_MISSING_CONTENT, RoomObject::visible())
        .with_object(objects::TUTORIAL_IMAGE, RoomObject::hidden())
        .with_object(objects::PIANO, RoomObject::visible())
        .with_object(objects::PORTRAIT, RoomObject::visible())
        .with_object(objects::LAPTOP, RoomObject::hidden())
        .with_object(objects::BEDROOM_DOOR, RoomObject::visible())
}

fn hard(stage: impl lucid_system_strategies::HazardStage + 'static) -> MutationStrategy {
    MutationStrategy::hard(HardAnomaly::new(stage, Laptop::new(HazardTuning::default())))
}

fn generator_with(catalog: MutationCatalog) -> Generator {
    Generator::new(
        catalog,
        RoomContainer::new(bedroom()),
        ClockSync::new(ClockConfig::default()),
        Box::new(FixedPicker::new(HardAnomalyCode::TimeBomb)),
    )
}

fn full_generator(policy: ExhaustionPolicy) -> Generator {
    let mut catalog = MutationCatalog::new(policy);
    let _ = catalog.register(MutationStrategy::plain(DrawerMissingContent));
    let _ = catalog.register(MutationStrategy::plain(PianoMissing));
    let _ = catalog.register(MutationStrategy::plain(PortraitUpsideDown));
    let _ = catalog.register(hard(LaptopTerminal));
    let _ = catalog.register(hard(SealedDoor));
    generator_with(catalog)
}

fn single_entry_generator(policy: ExhaustionPolicy) -> Generator {
    let mut catalog = MutationCatalog::new(policy);
    let _ = catalog.register(MutationStrategy::plain(DrawerMissingContent));
    let _ = catalog.register(hard(LaptopTerminal));
    generator_with(catalog)
}

fn cursors(generator: &Generator) -> (usize, usize) {
    (
        generator.catalog().easy_index(),
        generator.catalog().hard_index(),
    )
}

#[test]
fn anomaly_free_rooms_never_touch_cursors() {
    let mut generator = full_generator(ExhaustionPolicy::EndRun);
    let mut events = Vec::new();
    let _ = generator
        .generate_room(true, StageIndex::new(1), &mut events)
        .expect("easy");
    let _ = generator
        .generate_room(true, StageIndex::new(7), &mut events)
        .expect("hard");
    let before = cursors(&generator);

    for stage in 0..12 {
        let code = generator
            .generate_room(false, StageIndex::new(stage), &mut events)
            .expect("plain room");
        assert_eq!(code, AnomalyCode::NoAnomaly);
        assert_eq!(cursors(&generator), before, "stage {stage}");
    }
}

#[test]
fn easy_stages_advance_only_the_easy_cursor() {
    for stage in 0..5 {
        let mut generator = full_generator(ExhaustionPolicy::EndRun);
        let mut events = Vec::new();
        let code = generator
            .generate_room(true, StageIndex::new(stage), &mut events)
            .expect("easy anomaly");

        assert_eq!(code.tier(), Some(Tier::Easy));
        assert_eq!(cursors(&generator), (1, 0), "stage {stage}");
    }
}

#[test]
fn hard_stages_advance_only_the_hard_cursor() {
    for stage in [5, 6, 9, 40] {
        let mut generator = full_generator(ExhaustionPolicy::EndRun);
        let mut events = Vec::new();
        let code = generator
            .generate_room(true, StageIndex::new(stage), &mut events)
            .expect("hard anomaly");

        assert_eq!(code.tier(), Some(Tier::Hard));
        assert_eq!(cursors(&generator), (0, 1), "stage {stage}");
    }
}

#[test]
fn test_mode_overrides_stage_tier_without_moving_cursors() {
    let mut generator = full_generator(ExhaustionPolicy::EndRun);
    let mut events = Vec::new();

    generator.catalog_mut().set_test_mode(TestMode::hard(1));
    for stage in [0, 2, 4] {
        let code = generator
            .generate_room(true, StageIndex::new(stage), &mut events)
            .expect("pinned hard");
        assert_eq!(
            code,
            AnomalyCode::Hard {
                family: HardFamily::SealedDoor,
                variant: Some(HardAnomalyCode::TimeBomb),
            }
        );
    }

    generator.catalog_mut().set_test_mode(TestMode::easy(2));
    for stage in [5, 8] {
        let code = generator
            .generate_room(true, StageIndex::new(stage), &mut events)
            .expect("pinned easy");
        assert_eq!(code, AnomalyCode::PortraitUpsideDown);
    }

    assert_eq!(cursors(&generator), (0, 0));
}

#[test]
fn test_mode_index_out_of_range_is_reported() {
    let mut generator = full_generator(ExhaustionPolicy::Wrap);
    generator.catalog_mut().set_test_mode(TestMode::easy(9));
    let mut events = Vec::new();

    let error = generator
        .generate_room(true, StageIndex::new(1), &mut events)
        .unwrap_err();

    assert!(matches!(error, GenerationError::Configuration(_)));
}

#[test]
fn single_entry_tier_ends_the_run_when_exhausted() {
    let mut generator = single_entry_generator(ExhaustionPolicy::EndRun);
    let mut events = Vec::new();

    let first = generator
        .generate_room(true, StageIndex::TUTORIAL, &mut events)
        .expect("first drawer");
    assert_eq!(first, AnomalyCode::DrawerMissingContent);
    assert_eq!(generator.catalog().easy_index(), 1);

    let second = generator.generate_room(true, StageIndex::TUTORIAL, &mut events);
    assert_eq!(
        second,
        Err(GenerationError::CatalogExhausted {
            tier: Tier::Easy,
            len: 1
        })
    );
    assert_eq!(generator.catalog().easy_index(), 1);
}

#[test]
fn wrap_policy_serves_the_first_entry_again_and_signals_it() {
    let mut generator = single_entry_generator(ExhaustionPolicy::Wrap);
    let mut events = Vec::new();

    let _ = generator
        .generate_room(true, StageIndex::new(2), &mut events)
        .expect("first");
    events.clear();
    let again = generator
        .generate_room(true, StageIndex::new(2), &mut events)
        .expect("wrapped");

    assert_eq!(again, AnomalyCode::DrawerMissingContent);
    assert_eq!(generator.catalog().easy_index(), 2);
    assert!(events.contains(&Event::CatalogWrapped {
        tier: Tier::Easy,
        lap: 1
    }));
}

#[test]
fn stop_offering_generates_anomaly_free_rooms_once_exhausted() {
    let mut generator = single_entry_generator(ExhaustionPolicy::StopOffering);
    let mut events = Vec::new();

    let _ = generator
        .generate_room(true, StageIndex::new(6), &mut events)
        .expect("first hard");
    events.clear();
    let withheld = generator
        .generate_room(true, StageIndex::new(7), &mut events)
        .expect("withheld");

    assert_eq!(withheld, AnomalyCode::NoAnomaly);
    let room = generator.current_room().expect("room").id();
    assert!(events.contains(&Event::AnomalyWithheld {
        room,
        tier: Tier::Hard
    }));
    let laptop = generator
        .current_room()
        .expect("room")
        .object(objects::LAPTOP)
        .expect("laptop");
    assert!(!laptop.is_active(), "withheld rooms stay pristine");
}

#[test]
fn hard_rooms_arm_the_laptop_and_report_the_variant() {
    let mut generator = full_generator(ExhaustionPolicy::EndRun);
    let mut events = Vec::new();

    let code = generator
        .generate_room(true, StageIndex::new(5), &mut events)
        .expect("hard");

    assert_eq!(
        code,
        AnomalyCode::Hard {
            family: HardFamily::LaptopTerminal,
            variant: Some(HardAnomalyCode::TimeBomb),
        }
    );
    let room = generator.current_room().expect("room");
    assert!(room.object(objects::LAPTOP).expect("laptop").is_active());
    assert!(events.contains(&Event::HazardArmed {
        room: room.id(),
        family: HardFamily::LaptopTerminal,
        hazard: HazardParameters::TimeBomb {
            fuse: DEFAULT_TIME_BOMB_FUSE
        },
    }));
}

#[test]
fn tutorial_banner_only_appears_in_anomaly_free_stage_zero() {
    let mut generator = full_generator(ExhaustionPolicy::EndRun);
    let mut events = Vec::new();

    let _ = generator
        .generate_room(false, StageIndex::TUTORIAL, &mut events)
        .expect("tutorial");
    let banner_visible = |generator: &Generator| {
        generator
            .current_room()
            .expect("room")
            .object(objects::TUTORIAL_IMAGE)
            .expect("banner")
            .is_active()
    };
    assert!(banner_visible(&generator));
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::TutorialShown { .. })));

    let _ = generator
        .generate_room(false, StageIndex::new(1), &mut events)
        .expect("stage one");
    assert!(!banner_visible(&generator));

    let _ = generator
        .generate_room(true, StageIndex::TUTORIAL, &mut events)
        .expect("stage zero anomaly");
    assert!(!banner_visible(&generator));
}

#[test]
fn each_call_replaces_the_previous_room() {
    let mut generator = full_generator(ExhaustionPolicy::EndRun);
    let mut events = Vec::new();

    let _ = generator
        .generate_room(true, StageIndex::new(1), &mut events)
        .expect("first");
    assert_eq!(
        events.first(),
        Some(&Event::RoomCreated {
            room: RoomId::new(0)
        })
    );

    events.clear();
    let _ = generator
        .generate_room(false, StageIndex::new(2), &mut events)
        .expect("second");

    assert_eq!(
        &events[..2],
        &[
            Event::RoomDestroyed {
                room: RoomId::new(0)
            },
            Event::RoomCreated {
                room: RoomId::new(1)
            },
        ]
    );
    let room = generator.current_room().expect("room");
    assert_eq!(room.id(), RoomId::new(1));
    assert!(
        room.object(objects::DRAWER_MISSING_CONTENT)
            .expect("drawer")
            .is_active(),
        "mutations never leak into the next room"
    );
}

#[test]
fn clocks_are_synced_with_and_without_anomalies() {
    let mut generator = full_generator(ExhaustionPolicy::EndRun);
    let mut events = Vec::new();

    for (have_anomaly, stage) in [(false, 0), (true, 3), (true, 6)] {
        events.clear();
        let _ = generator
            .generate_room(have_anomaly, StageIndex::new(stage), &mut events)
            .expect("room");

        let expected_display = format!("{stage:02}:00");
        let room = generator.current_room().expect("room");
        assert_eq!(
            room.object(objects::DIGITAL_CLOCK_TEXT)
                .expect("display")
                .text(),
            Some(expected_display.as_str())
        );
        assert!(events.iter().any(|event| matches!(
            event,
            Event::ClockSynced { display, .. } if *display == expected_display
        )));
    }
}

#[test]
fn missing_content_is_reported_as_content_error() {
    let mut catalog = MutationCatalog::new(ExhaustionPolicy::EndRun);
    let _ = catalog.register(MutationStrategy::plain(PianoMissing));
    let mut generator = Generator::new(
        catalog,
        RoomContainer::new(bedroom().without_object(objects::PIANO)),
        ClockSync::default(),
        Box::new(FixedPicker::new(HardAnomalyCode::Lava)),
    );
    let mut events = Vec::new();

    assert_eq!(
        generator.generate_room(true, StageIndex::new(1), &mut events),
        Err(GenerationError::Content(ContentError::MissingObject {
            room: RoomId::new(0),
            name: objects::PIANO,
        }))
    );
    assert_eq!(
        generator.catalog().easy_index(),
        1,
        "a failed application still uses up its entry"
    );
}

#[test]
fn cleanup_is_idempotent() {
    let mut generator = full_generator(ExhaustionPolicy::EndRun);
    let mut events = Vec::new();
    let _ = generator
        .generate_room(false, StageIndex::new(3), &mut events)
        .expect("room");
    events.clear();

    generator.cleanup(&mut events);
    generator.cleanup(&mut events);

    assert_eq!(
        events,
        vec![Event::RoomDestroyed {
            room: RoomId::new(0)
        }]
    );
    assert!(generator.current_room().is_none());
}
