use super::*;
use pretty_assertions::assert_eq;

#[test]
fn no_prior_snapshot_yields_default_state() {
    let store = store();
    assert_eq!(store.state(), &default_state());
    assert_eq!(store.storage().writes(), 0);
}

#[test]
fn persisted_state_round_trips_through_initialize() {
    let mut first = store();
    first.save_case_info(informant());
    let mut parameters = default_parameters();
    parameters.push(scar());
    first.save_parameters(parameters);
    first.save_render_style("Painting");
    first.save_free_text("tattoo on left wrist");

    let expected = first.state().clone();
    let stored = first.storage().clone();

    let second = AppStore::initialize(stored);
    assert_eq!(second.state(), &expected);
}

#[test]
fn snapshot_missing_newer_fields_gets_defaults() {
    let storage = MemoryStorage::with_contents(r#"{"caseInfo":{"caseNumber":"C-9"}}"#);
    let store = AppStore::initialize(storage);

    assert_eq!(store.case_info(), &CaseInfo::new("", "C-9", ""));
    assert_eq!(store.parameters(), default_parameters().as_slice());
    assert_eq!(store.render_style(), "Sketch");
    assert_eq!(store.free_text(), "");
}

#[test]
fn corrupt_snapshot_is_treated_as_absent() {
    let store = AppStore::initialize(MemoryStorage::with_contents("\u{0}garbage"));
    assert_eq!(store.state(), &default_state());
}

#[test]
fn reinitialize_reloads_from_storage() {
    let mut store = store();
    store.save_free_text("first");

    let mut replacement = default_state();
    replacement.free_text = "written elsewhere".to_string();
    store
        .storage_mut()
        .set_contents(Some(encode_snapshot(&replacement).expect("encode")));

    store.reinitialize();
    assert_eq!(store.free_text(), "written elsewhere");

    store.reinitialize();
    assert_eq!(store.state(), &replacement);
}
