//! Behaviour-driven tests for classification and menu identifiers.

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use crate::command::Command;
use crate::detector::classify;
use crate::error::DecodeError;
use crate::indicator::{Indicator, IndicatorType};

// ---------------------------------------------------------------------------
// Test world
// ---------------------------------------------------------------------------

#[derive(Default)]
struct TestWorld {
    selection: String,
    indicators: Vec<Indicator>,
    identifier: String,
    decoded: Option<Result<Command, DecodeError>>,
}

#[fixture]
fn world() -> TestWorld {
    TestWorld::default()
}

fn parse_kind(label: &str) -> IndicatorType {
    IndicatorType::from_label(label.trim_matches('"'))
        .unwrap_or_else(|| panic!("unknown indicator type label: {label}"))
}

fn decoded_command(world: &TestWorld) -> &Command {
    world
        .decoded
        .as_ref()
        .expect("no identifier decoded")
        .as_ref()
        .expect("expected decoding to succeed")
}

// ---------------------------------------------------------------------------
// Given steps
// ---------------------------------------------------------------------------

#[given("the selection {text}")]
fn given_selection(world: &mut TestWorld, text: String) {
    world.selection = text.trim_matches('"').to_owned();
}

#[given("the menu identifier {identifier}")]
fn given_identifier(world: &mut TestWorld, identifier: String) {
    world.identifier = identifier.trim_matches('"').to_owned();
}

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

#[when("the selection is classified")]
fn when_classified(world: &mut TestWorld) {
    world.indicators = classify(&world.selection);
}

#[when("the identifier is decoded")]
fn when_decoded(world: &mut TestWorld) {
    world.decoded = Some(Command::decode(&world.identifier));
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

#[then("the number of reported indicators is {count}")]
fn then_indicator_count(world: &mut TestWorld, count: usize) {
    assert_eq!(
        world.indicators.len(),
        count,
        "unexpected indicators: {:?}",
        world.indicators
    );
}

#[then("a {kind} indicator with query {query} is reported")]
fn then_indicator_reported(world: &mut TestWorld, kind: String, query: String) {
    let expected = Indicator::new(parse_kind(&kind), query.trim_matches('"'));
    assert!(
        world.indicators.contains(&expected),
        "expected {expected:?} in {:?}",
        world.indicators
    );
}

#[then("no {kind} indicator is reported")]
fn then_kind_absent(world: &mut TestWorld, kind: String) {
    let absent = parse_kind(&kind);
    assert!(
        world.indicators.iter().all(|indicator| indicator.kind() != absent),
        "unexpected {absent} in {:?}",
        world.indicators
    );
}

#[then("the decoded command has query {query}, type {kind} and target {target}")]
fn then_decoded_fields(world: &mut TestWorld, query: String, kind: String, target: String) {
    let command = decoded_command(world);
    assert_eq!(command.query(), query.trim_matches('"'));
    assert_eq!(command.kind(), parse_kind(&kind));
    assert_eq!(command.target(), target.trim_matches('"'));
}

#[then("re-encoding yields the same identifier")]
fn then_reencodes(world: &mut TestWorld) {
    assert_eq!(decoded_command(world).encode(), world.identifier);
}

#[then("decoding fails with an unknown type {label}")]
fn then_unknown_type(world: &mut TestWorld, label: String) {
    let result = world.decoded.as_ref().expect("no identifier decoded");
    assert_eq!(
        result.as_ref().err(),
        Some(&DecodeError::unknown_type(label.trim_matches('"')))
    );
}

// ---------------------------------------------------------------------------
// Scenario registration
// ---------------------------------------------------------------------------

#[scenario(path = "tests/features/classification.feature")]
fn classification_behaviour(world: TestWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/command_codec.feature")]
fn command_codec_behaviour(world: TestWorld) {
    let _ = world;
}
