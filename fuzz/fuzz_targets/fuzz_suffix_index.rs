#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use linkdex::index::suffix_array::SuffixIndexBuilder;
use linkdex::utils::CounterView;

#[derive(Debug, Arbitrary)]
struct Input {
    labels: Vec<(u8, String, u8)>,
    term: String,
}

fuzz_target!(|input: Input| {
    // Positive weights only, so counts never cancel
    let mut builder = SuffixIndexBuilder::with_defaults();
    for (value, label, weight) in &input.labels {
        builder.add_weighted_label(*value, label, i64::from(*weight) + 1);
    }
    let index = builder.build();

    assert!(index.entries().windows(2).all(|w| w[0].suffix < w[1].suffix));

    // The empty term sees every suffix, so it dominates any other term
    let everything = index.search("");
    let result = index.search(&input.term);
    for (value, count) in result.frequencies().iter() {
        assert!(count > 0);
        assert!(everything.get(value).unwrap_or(0) >= count);
    }
});
