use super::*;
use pretty_assertions::assert_eq;

#[test]
fn slider_moves_update_the_value() {
    let mut store = store();
    let seen = record(&mut store);

    assert!(store.set_parameter_position("hair-color", 3));
    assert!(store.set_parameter_value("build", "Heavy"));

    let hair = store
        .parameters()
        .iter()
        .find(|p| p.id == "hair-color")
        .expect("hair-color");
    assert_eq!(hair.value, "Red");
    assert_eq!(tags(&seen), vec![ChangeTag::Parameters, ChangeTag::Parameters]);
}

#[test]
fn custom_parameters_can_be_added_edited_and_deleted() {
    let mut store = store();

    assert!(store.add_parameter(scar()));
    assert!(store.update_parameter(
        "custom-1",
        "Facial scar".to_string(),
        vec!["None".to_string(), "Visible".to_string(), "Prominent".to_string()],
    ));
    let custom = store.parameters().last().expect("custom");
    assert_eq!(custom.name, "Facial scar");
    assert_eq!(custom.value, "Visible");

    assert!(store.delete_parameter("custom-1"));
    assert_eq!(store.parameters(), default_parameters().as_slice());
}

#[test]
fn store_does_not_guard_default_parameters() {
    let mut store = store();
    assert!(store.is_default_parameter("age"));
    assert!(store.delete_parameter("age"));
    assert_eq!(store.parameters().len(), 8);
}
