//! Benchmark corpora for `contains-core`.
//!
//! Every corpus is generated deterministically, so runs are comparable
//! across machines without checked-in data files.
//!
//! # Examples
//!
//! ```
//! let corpus = contains_benches::available_corpora()
//!     .iter()
//!     .find(|c| c.name() == "shuffled-records")
//!     .expect("registered corpus");
//! let dataset = corpus.load()?;
//! assert!(dataset.check(&Default::default())?.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use contains_core::{check, CanonicalizeError, ContainsError, ContainsOptions, Node, Report};
use serde_json::{json, Value};

/// A named haystack/needle pair generator.
#[derive(Debug)]
pub struct Corpus {
    name: &'static str,
    generate: fn() -> (Value, Value),
}

impl Corpus {
    /// Returns the corpus identifier used as the benchmark id.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Serialized size of haystack plus needle, for throughput reporting.
    #[must_use]
    pub fn fixture_bytes(&self) -> usize {
        let (haystack, needle) = (self.generate)();
        haystack.to_string().len() + needle.to_string().len()
    }

    /// Generates and canonicalizes the documents.
    pub fn load(&self) -> Result<Dataset, CanonicalizeError> {
        let (haystack, needle) = (self.generate)();
        Ok(Dataset {
            haystack: Node::from_json_value(haystack)?,
            needle: Node::from_json_value(needle)?,
        })
    }
}

/// Canonicalized documents of a corpus.
#[derive(Clone, Debug)]
pub struct Dataset {
    haystack: Node,
    needle: Node,
}

impl Dataset {
    /// The document searched in.
    #[must_use]
    pub fn haystack(&self) -> &Node {
        &self.haystack
    }

    /// The document searched for.
    #[must_use]
    pub fn needle(&self) -> &Node {
        &self.needle
    }

    /// Runs a strict-equality containment check of the needle in the haystack.
    pub fn check(&self, options: &ContainsOptions) -> Result<Report, ContainsError> {
        check(&self.haystack, &self.needle, options)
    }
}

const CORPORA: &[Corpus] = &[
    Corpus { name: "scalar-leaves", generate: scalar_leaves },
    Corpus { name: "shuffled-records", generate: shuffled_records },
    Corpus { name: "wide-records", generate: wide_records },
    Corpus { name: "nested-catalog", generate: nested_catalog },
];

/// Returns every registered corpus.
#[must_use]
pub fn available_corpora() -> &'static [Corpus] {
    CORPORA
}

// A flat object of 2000 scalars; the needle keeps every other key.
fn scalar_leaves() -> (Value, Value) {
    let haystack: serde_json::Map<String, Value> =
        (0..2000).map(|i| (format!("key{i:04}"), json!(i * 7))).collect();
    let needle = haystack.iter().step_by(2).map(|(k, v)| (k.clone(), v.clone())).collect();
    (Value::Object(haystack), Value::Object(needle))
}

// Eight records in reverse order: the largest fully enumerated case.
fn shuffled_records() -> (Value, Value) {
    let records: Vec<Value> = (0..8).map(record).collect();
    let reversed = records.iter().rev().cloned().collect();
    (Value::Array(records), Value::Array(reversed))
}

// Sixty-four records searched for half of them; resolved by the assignment solver.
fn wide_records() -> (Value, Value) {
    let records: Vec<Value> = (0..64).map(record).collect();
    let needle = records.iter().rev().step_by(2).cloned().collect();
    (Value::Array(records), Value::Array(needle))
}

// Categories of products with tag records, shuffled at both levels.
fn nested_catalog() -> (Value, Value) {
    let categories: Vec<Value> = (0..6)
        .map(|c| {
            let products: Vec<Value> = (0..5)
                .map(|p| {
                    let tags: Vec<Value> =
                        (0..3).map(|t| json!({"tag": format!("t{c}{p}{t}"), "weight": t})).collect();
                    json!({"sku": format!("sku-{c}-{p}"), "price": c * 10 + p, "tags": tags})
                })
                .collect();
            json!({"category": format!("cat-{c}"), "products": products})
        })
        .collect();

    let needle_categories: Vec<Value> = categories
        .iter()
        .rev()
        .map(|category| {
            let products = category["products"].as_array().cloned().unwrap_or_default();
            let products: Vec<Value> = products
                .into_iter()
                .rev()
                .map(|mut product| {
                    if let Some(tags) = product.get_mut("tags").and_then(Value::as_array_mut) {
                        tags.reverse();
                    }
                    product
                })
                .collect();
            json!({"category": category["category"].clone(), "products": products})
        })
        .collect();

    (json!({"catalog": categories}), json!({"catalog": needle_categories}))
}

fn record(i: usize) -> Value {
    json!({
        "id": i,
        "name": format!("user-{i}"),
        "active": i % 3 != 0,
        "roles": [format!("role-{}", i % 4)],
    })
}
