use std::time::Duration;

use flagset::values::{I64SliceValue, StringSliceValue};
use flagset::{Error, ErrorHandling, Flag, FlagSet, SliceValue, Value};

fn set_with<F>(register: F) -> FlagSet
where
    F: FnOnce(&mut FlagSet),
{
    let mut fs = FlagSet::new("values", ErrorHandling::Continue);
    register(&mut fs);
    fs
}

#[test]
fn integers_of_any_radix_reserialize_as_decimal() {
    // The re-serialized decimal form must parse back to the same value.
    for (text, expected) in [
        ("42", 42),
        ("+42", 42),
        ("-17", -17),
        ("0x2A", 42),
        ("052", 42),
        ("0o52", 42),
        ("0b101010", 42),
    ] {
        let mut fs = set_with(|fs| fs.i64("n", 0, "").unwrap());
        fs.set("n", text).unwrap();
        assert_eq!(fs.get_i64("n").unwrap(), expected, "{text}");

        let serialized = fs.lookup("n").unwrap().value().text();
        fs.set("n", &serialized).unwrap();
        assert_eq!(fs.get_i64("n").unwrap(), expected, "{text} via {serialized}");
    }
}

#[test]
fn unsigned_and_float_flags_parse_and_read_back() {
    let mut fs = set_with(|fs| {
        fs.u64("size", 0, "").unwrap();
        fs.f64("ratio", 1.0, "").unwrap();
    });
    fs.parse(["--size=0xFF", "--ratio", "2.5"]).unwrap();
    assert_eq!(fs.get_u64("size").unwrap(), 255);
    assert_eq!(fs.get_f64("ratio").unwrap(), 2.5);

    let err = fs.parse(["--size=-1"]).unwrap_err();
    assert!(matches!(err, Error::InvalidValue { ref flag, .. } if flag == "size"), "{err}");
}

#[test]
fn duration_flags_round_trip_through_their_text_form() {
    for (text, expected) in [
        ("300ms", Duration::from_millis(300)),
        ("1h2m3s", Duration::from_secs(3723)),
        ("1.5s", Duration::from_millis(1500)),
        ("90s", Duration::from_secs(90)),
    ] {
        let mut fs = set_with(|fs| fs.duration("wait", Duration::ZERO, "").unwrap());
        fs.set("wait", text).unwrap();
        assert_eq!(fs.get_duration("wait").unwrap(), expected, "{text}");

        let serialized = fs.lookup("wait").unwrap().value().text();
        fs.set("wait", &serialized).unwrap();
        assert_eq!(fs.get_duration("wait").unwrap(), expected, "{text} via {serialized}");
    }
}

#[test]
fn bool_flag_rejects_non_literal_text() {
    let mut fs = set_with(|fs| fs.bool("ok", false, "").unwrap());
    let err = fs.parse(["--ok=yes"]).unwrap_err();
    let Error::InvalidValue { flag, value, .. } = &err else {
        panic!("expected InvalidValue, got {err}");
    };
    assert_eq!(flag, "ok");
    assert_eq!(value, "yes");
}

#[test]
fn first_parse_time_set_clears_the_slice_default() {
    let mut fs = set_with(|fs| {
        fs.string_slice("tag", &["from-default"], "").unwrap();
    });
    assert_eq!(fs.get_string_slice("tag").unwrap(), ["from-default"]);

    fs.parse(["--tag=a", "--tag", "b"]).unwrap();
    assert_eq!(fs.get_string_slice("tag").unwrap(), ["a", "b"]);
}

#[test]
fn i64_slice_elements_accept_any_radix() {
    let mut fs = set_with(|fs| fs.i64_slice("port", &[80], "").unwrap());
    fs.parse(["--port=0x1F90", "--port=443"]).unwrap();
    assert_eq!(fs.get_i64_slice("port").unwrap(), [8080, 443]);
}

#[test]
fn slice_values_support_append_replace_and_items() {
    let mut tags = StringSliceValue::new(["a"]);
    tags.append("b").unwrap();
    assert_eq!(tags.items(), ["a", "b"]);
    tags.replace(&["x".to_string(), "y".to_string()]).unwrap();
    assert_eq!(tags.items(), ["x", "y"]);
    assert_eq!(tags.text(), "[x,y]");

    let mut ports = I64SliceValue::new([80]);
    ports.append("0x1F90").unwrap();
    assert_eq!(ports.items(), ["80", "8080"]);
    assert!(ports.replace(&["not-a-number".to_string()]).is_err());
    // A failed replace leaves nothing half-applied observable via items.
    assert_eq!(ports.items(), ["80", "8080"]);
}

#[test]
fn adapters_expose_the_slice_interface_only_when_multi_valued() {
    let mut slice = StringSliceValue::new(["a"]);
    assert!(slice.as_slice_value().is_some());

    let mut single = flagset::values::StringValue::new("a");
    assert!(single.as_slice_value().is_none());
}

#[test]
fn map_entries_accumulate_and_later_keys_overwrite() {
    let mut fs = set_with(|fs| {
        fs.string_map("label", &[("stage", "dev")], "").unwrap();
    });
    fs.parse(["--label=env=prod", "--label=region=eu", "--label=env=test"])
        .unwrap();
    let labels = fs.get_string_map("label").unwrap();
    assert_eq!(labels.len(), 2, "registration default cleared, env overwritten");
    assert_eq!(labels["env"], "test");
    assert_eq!(labels["region"], "eu");

    let err = fs.parse(["--label=oops"]).unwrap_err();
    assert!(matches!(err, Error::InvalidValue { .. }), "{err}");
}

#[test]
fn typed_getters_reject_the_wrong_adapter() {
    let fs = set_with(|fs| fs.string("name", "x", "").unwrap());
    let err = fs.get_i64("name").unwrap_err();
    let Error::TypeMismatch { flag, requested, actual } = &err else {
        panic!("expected TypeMismatch, got {err}");
    };
    assert_eq!(flag, "name");
    assert_eq!(*requested, "i64");
    assert_eq!(*actual, "string");

    let err = fs.get_bool("missing").unwrap_err();
    assert!(matches!(err, Error::UnknownFlag { .. }), "{err}");
}

#[test]
fn default_text_is_captured_once_at_registration() {
    let mut fs = FlagSet::new("values", ErrorHandling::Continue);
    fs.add_flag(Flag::new(
        "jobs",
        "",
        flagset::values::I64Value::new(4),
    ))
    .unwrap();
    fs.set("jobs", "9").unwrap();

    let flag = fs.lookup("jobs").unwrap();
    assert_eq!(flag.default_text(), "4");
    assert_eq!(flag.value().text(), "9");
}
