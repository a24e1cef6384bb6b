//! Integration tests for `#[derive(TagEnum)]`.

use hostbridge::{
    ConversionError, Dynamic, FromDynamic, IntoDynamic, TagEnum, has_unique_tags,
    validate_tag_table,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, TagEnum)]
enum PlaybackState {
    Idle,
    Playing,
    Paused,
}

/// Test tags default to variant names, in declaration order.
#[test]
fn test_default_tags() {
    assert_eq!(PlaybackState::ENUM_NAME, "PlaybackState");
    assert_eq!(
        PlaybackState::TAGS,
        &[
            ("Idle", PlaybackState::Idle),
            ("Playing", PlaybackState::Playing),
            ("Paused", PlaybackState::Paused),
        ]
    );
    assert_eq!(PlaybackState::Playing.to_tag(), "Playing");
}

#[test]
fn test_enum_round_trip() {
    for state in [PlaybackState::Idle, PlaybackState::Playing, PlaybackState::Paused] {
        let value = state.into_dynamic();
        assert_eq!(value, Dynamic::String(state.to_tag().to_string()));
        assert_eq!(PlaybackState::from_dynamic(&value).unwrap(), state);
    }
}

#[test]
fn test_unknown_tag() {
    let err = PlaybackState::from_dynamic(&Dynamic::String("Bogus".into())).unwrap_err();
    assert_eq!(
        err,
        ConversionError::UnknownEnumTag {
            enum_name: "PlaybackState",
            tag: "Bogus".to_string()
        }
    );
}

#[test]
fn test_enum_rejects_numbers() {
    assert!(matches!(
        PlaybackState::from_dynamic(&Dynamic::Number(0.0)),
        Err(ConversionError::TypeMismatch {
            expected: "string",
            actual: "number"
        })
    ));
}

/// Test `#[hostbridge(tag = "...")]` and `#[hostbridge(name = "...")]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TagEnum)]
#[hostbridge(name = "Interpolation")]
enum Curve {
    #[hostbridge(tag = "linear")]
    Linear,
    #[hostbridge(tag = "ease-in-out")]
    EaseInOut,
    Step,
}

#[test]
fn test_tag_overrides() {
    assert_eq!(Curve::ENUM_NAME, "Interpolation");
    assert_eq!(Curve::EaseInOut.into_dynamic(), Dynamic::String("ease-in-out".into()));
    assert_eq!(
        Curve::from_dynamic(&Dynamic::String("linear".into())).unwrap(),
        Curve::Linear
    );
    assert_eq!(Curve::Step.to_tag(), "Step");
    // The Rust name is not a tag once overridden
    assert!(matches!(
        Curve::from_dynamic(&Dynamic::String("Linear".into())),
        Err(ConversionError::UnknownEnumTag {
            enum_name: "Interpolation",
            ..
        })
    ));
}

/// Test the derive through the facade crate path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TagEnum)]
#[hostbridge(crate = "hostbridge")]
enum LoopMode {
    Once,
    Repeat,
}

#[test]
fn test_facade_crate_path() {
    assert_eq!(LoopMode::Repeat.into_dynamic(), Dynamic::String("Repeat".into()));
    assert_eq!(LoopMode::from_tag("Once").unwrap(), LoopMode::Once);
}

const _: () = assert!(has_unique_tags(PlaybackState::TAGS));
const _: () = assert!(has_unique_tags(Curve::TAGS));

#[test]
fn test_derived_tables_validate() {
    assert_eq!(validate_tag_table::<PlaybackState>(), Ok(()));
    assert_eq!(validate_tag_table::<Curve>(), Ok(()));
    assert_eq!(validate_tag_table::<LoopMode>(), Ok(()));
}

#[test]
fn test_enum_in_containers() {
    let value = Dynamic::Array(vec![
        Dynamic::String("Paused".into()),
        Dynamic::Undefined,
        Dynamic::String("Idle".into()),
    ]);
    let states = Vec::<Option<PlaybackState>>::from_dynamic(&value).unwrap();
    assert_eq!(
        states,
        vec![Some(PlaybackState::Paused), None, Some(PlaybackState::Idle)]
    );
}
