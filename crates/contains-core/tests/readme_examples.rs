use contains_core::{check, contains_structure, ContainsOptions, MismatchKind, Node};

#[test]
fn contains_core_readme_example() -> Result<(), Box<dyn std::error::Error>> {
    let haystack = Node::from_json_str(r#"[{"a":1,"b":2},{"c":3,"d":4}]"#)?;
    let needle = Node::from_json_str(r#"[{"c":3,"d":4},{"a":1,"b":2}]"#)?;

    let report = check(&haystack, &needle, &ContainsOptions::default())?;
    assert!(report.is_empty());

    let strict = ContainsOptions::default().with_array_strict_comparison(true);
    let report = check(&haystack, &needle, &strict)?;
    println!("{}", report.render());
    assert!(report.iter().all(|mismatch| mismatch.kind == MismatchKind::MissingPath));
    Ok(())
}

#[test]
fn contains_core_readme_callback_example() -> Result<(), Box<dyn std::error::Error>> {
    let haystack = Node::from_yaml_str("version: 1.2.0\nname: demo\n")?;
    let needle = Node::from_json_str(r#"{"version":"1.2.9"}"#)?;

    let mut compared = Vec::new();
    contains_structure(
        &haystack,
        &needle,
        |actual, expected, path| compared.push((path.to_string(), actual.clone(), expected.clone())),
        |mismatch| panic!("unexpected mismatch: {mismatch}"),
        &ContainsOptions::default(),
    )?;
    assert_eq!(compared.len(), 1);
    assert_eq!(compared[0].0, "version");
    Ok(())
}
