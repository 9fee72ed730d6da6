use contains_benches::available_corpora;
use contains_core::ContainsOptions;

#[test]
fn contains_benches_readme_example() -> Result<(), Box<dyn std::error::Error>> {
    let corpus =
        available_corpora().iter().find(|c| c.name() == "nested-catalog").expect("registered corpus");
    let dataset = corpus.load()?;
    let report = dataset.check(&ContainsOptions::default())?;
    println!("{}", report.render());
    assert!(report.is_empty());

    let strict = ContainsOptions::default().with_array_strict_comparison(true);
    assert!(!dataset.check(&strict)?.is_empty());
    Ok(())
}
