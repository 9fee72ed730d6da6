//! Fuzzing harnesses for `contains-core`.
//!
//! Each public function accepts raw bytes so it can be driven from
//! `cargo fuzz` targets as well as from ordinary tests. Decoding failures are
//! swallowed; violated containment invariants panic so the fuzzer records
//! them as crashes.
//!
//! # Examples
//!
//! ```
//! contains_fuzz::fuzz_canonicalization(b"{\"a\":1}");
//! contains_fuzz::fuzz_contains(&[1, 2, 3, 4]);
//! contains_fuzz::fuzz_reflexive(b"seed");
//! contains_fuzz::fuzz_path_parse(b"list[0].name");
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use arbitrary::Unstructured;
use contains_core::{check, ContainsOptions, Node, Path};
use serde_json::{Map as JsonMap, Number as JsonNumber, Value as JsonValue};

const MAX_DEPTH: usize = 4;
const MAX_ARRAY_LEN: u8 = 6;
const MAX_OBJECT_LEN: u8 = 6;
const MAX_KEY_LEN: u8 = 3;
const MAX_STRING_LEN: u8 = 12;

/// Feeds arbitrary bytes through the JSON and YAML canonicalization routines.
///
/// ```
/// contains_fuzz::fuzz_canonicalization(b"key: value");
/// ```
pub fn fuzz_canonicalization(data: &[u8]) {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = Node::from_json_str(text);
        let _ = Node::from_yaml_str(text);
    }
}

/// Checks one random tree against another under every array mode.
///
/// Generated trees stay far below the default depth limit, so the check
/// must never fail with a hard error.
///
/// ```
/// contains_fuzz::fuzz_contains(b"containment");
/// ```
pub fn fuzz_contains(data: &[u8]) {
    let mut unstructured = Unstructured::new(data);
    let (Some(haystack), Some(needle)) =
        (random_node(&mut unstructured), random_node(&mut unstructured))
    else {
        return;
    };
    for options in option_variants() {
        match check(&haystack, &needle, &options) {
            Ok(report) => {
                let _ = report.render();
            }
            Err(err) => panic!("check failed on shallow input: {err}"),
        }
    }
}

/// Asserts that a random tree contains itself, including under the
/// assignment solver.
///
/// ```
/// contains_fuzz::fuzz_reflexive(b"reflexive");
/// ```
pub fn fuzz_reflexive(data: &[u8]) {
    let mut unstructured = Unstructured::new(data);
    let Some(node) = random_node(&mut unstructured) else {
        return;
    };
    for options in option_variants() {
        match check(&node, &node, &options) {
            Ok(report) => assert!(
                report.is_empty(),
                "tree does not contain itself with {options:?}:\n{}",
                report.render()
            ),
            Err(err) => panic!("check failed on shallow input: {err}"),
        }
    }
}

/// Parses arbitrary text as a path and asserts that the rendered form parses
/// back to the same path.
///
/// ```
/// contains_fuzz::fuzz_path_parse(br#"a["b.c"][3]"#);
/// ```
pub fn fuzz_path_parse(data: &[u8]) {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(path) = Path::parse(text) else {
        return;
    };
    let rendered = path.to_string();
    match Path::parse(&rendered) {
        Ok(reparsed) => assert_eq!(reparsed, path, "{text:?} rendered as {rendered:?}"),
        Err(err) => panic!("rendered path {rendered:?} does not parse: {err}"),
    }
}

fn option_variants() -> Vec<ContainsOptions> {
    let defaults = ContainsOptions::default();
    let mut variants = vec![
        defaults.clone(),
        defaults.clone().with_array_strict_comparison(true),
        defaults.clone().with_skip_containers(false),
    ];
    if let Ok(solver) = defaults.with_permutation_limit(1) {
        variants.push(solver);
    }
    variants
}

fn random_node(unstructured: &mut Unstructured<'_>) -> Option<Node> {
    let value = json_value_from_unstructured(unstructured, 0).ok()?;
    Node::from_json_value(value).ok()
}

fn json_value_from_unstructured(
    unstructured: &mut Unstructured<'_>,
    depth: usize,
) -> Result<JsonValue, arbitrary::Error> {
    if depth >= MAX_DEPTH {
        return json_leaf(unstructured);
    }

    let choice = unstructured.int_in_range::<u8>(0..=5)?;
    match choice {
        0 => Ok(JsonValue::Null),
        1 => Ok(JsonValue::Bool(unstructured.arbitrary()?)),
        2 => Ok(JsonValue::Number(random_number(unstructured)?)),
        3 => Ok(JsonValue::String(random_string(unstructured, MAX_STRING_LEN)?)),
        4 => {
            let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_ARRAY_LEN)?);
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(json_value_from_unstructured(unstructured, depth + 1)?);
            }
            Ok(JsonValue::Array(items))
        }
        _ => {
            let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_OBJECT_LEN)?);
            let mut map = JsonMap::new();
            for _ in 0..len {
                // Short keys so records in one array tend to share keys.
                let key = random_string(unstructured, MAX_KEY_LEN)?;
                let value = json_value_from_unstructured(unstructured, depth + 1)?;
                map.insert(key, value);
            }
            Ok(JsonValue::Object(map))
        }
    }
}

fn json_leaf(unstructured: &mut Unstructured<'_>) -> Result<JsonValue, arbitrary::Error> {
    let choice = unstructured.int_in_range::<u8>(0..=3)?;
    match choice {
        0 => Ok(JsonValue::Null),
        1 => Ok(JsonValue::Bool(unstructured.arbitrary()?)),
        2 => Ok(JsonValue::Number(random_number(unstructured)?)),
        _ => Ok(JsonValue::String(random_string(unstructured, MAX_STRING_LEN)?)),
    }
}

fn random_number(unstructured: &mut Unstructured<'_>) -> Result<JsonNumber, arbitrary::Error> {
    if unstructured.arbitrary()? {
        let int = unstructured.arbitrary::<i32>()?;
        Ok(JsonNumber::from(int))
    } else {
        let numerator = f64::from(unstructured.arbitrary::<i32>()?);
        let denominator = f64::from(unstructured.int_in_range::<u16>(1..=1024)?);
        JsonNumber::from_f64(numerator / denominator).ok_or(arbitrary::Error::IncorrectFormat)
    }
}

fn random_string(unstructured: &mut Unstructured<'_>, max_len: u8) -> Result<String, arbitrary::Error> {
    let len = usize::from(unstructured.int_in_range::<u8>(0..=max_len)?);
    let mut string = String::with_capacity(len);
    for _ in 0..len {
        let byte = unstructured.int_in_range::<u8>(b'a'..=b'e')?;
        string.push(char::from(byte));
    }
    Ok(string)
}
