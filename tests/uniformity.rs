//! Statistical checks over many seeds. Thresholds are chi-square critical
//! values at p = 0.001, so an honest sampler fails about one run in a thousand.

use egs_subset::testing::keyed_examples;
use egs_subset::{SubsetConfig, sample_stream};

const TRIALS: u64 = 20_000;

fn chi_square(observed: &[u64], expected: f64) -> f64 {
    observed
        .iter()
        .map(|&o| {
            let d = o as f64 - expected;
            d * d / expected
        })
        .sum()
}

#[mark_flaky_tests::flaky]
#[test]
fn every_example_is_kept_with_probability_n_over_len() {
    const LEN: u32 = 10;
    const N: usize = 3;
    let mut hits = [0u64; LEN as usize];
    for seed in 0..TRIALS {
        let cfg = SubsetConfig::default().with_n(N).with_seed(seed);
        for ex in sample_stream(cfg, keyed_examples(LEN)).examples {
            hits[ex.value as usize] += 1;
        }
    }
    let expected = TRIALS as f64 * N as f64 / f64::from(LEN);
    let stat = chi_square(&hits, expected);
    // df = 9
    assert!(stat < 27.88, "chi-square {stat:.2} too large, hits {hits:?}");
}

#[mark_flaky_tests::flaky]
#[test]
fn shuffle_puts_each_example_first_equally_often() {
    const LEN: u32 = 5;
    let mut first = [0u64; LEN as usize];
    for seed in 0..TRIALS {
        let cfg = SubsetConfig::default().with_n(LEN as usize).with_seed(seed);
        let subset = sample_stream(cfg, keyed_examples(LEN));
        first[subset.examples[0].value as usize] += 1;
    }
    let stat = chi_square(&first, TRIALS as f64 / f64::from(LEN));
    // df = 4
    assert!(stat < 18.47, "chi-square {stat:.2} too large, counts {first:?}");
}

#[mark_flaky_tests::flaky]
#[test]
fn late_examples_are_not_favoured() {
    // Reservoir order without shuffling: the last example of a long stream
    // should be kept no more often than the first.
    const LEN: u32 = 200;
    const N: usize = 20;
    let (mut first_kept, mut last_kept) = (0u64, 0u64);
    for seed in 0..TRIALS / 4 {
        let cfg = SubsetConfig::default()
            .with_n(N)
            .with_seed(seed)
            .with_randomize_order(false);
        for ex in sample_stream(cfg, keyed_examples(LEN)).examples {
            match ex.value {
                0 => first_kept += 1,
                v if v == LEN - 1 => last_kept += 1,
                _ => {}
            }
        }
    }
    let expected = (TRIALS / 4) as f64 * N as f64 / f64::from(LEN);
    for (label, count) in [("first", first_kept), ("last", last_kept)] {
        let z = (count as f64 - expected) / (expected * (1.0 - N as f64 / f64::from(LEN))).sqrt();
        assert!(z.abs() < 4.0, "{label} example kept {count} times, expected ~{expected:.0}");
    }
}
