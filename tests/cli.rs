use anyhow::Result;
use egs_subset::cli::{EXIT_EMPTY_INPUT, EXIT_FAILURE, EXIT_USAGE, exit_status, run_cli};
use egs_subset::io::jsonl::read_examples;
use egs_subset::testing::*;
use egs_subset::{Example, SamplingMode};
use serde_json::Value;

fn args(rest: &[&str]) -> Vec<String> {
    std::iter::once("egs-subset")
        .chain(rest.iter().copied())
        .map(String::from)
        .collect()
}

#[test]
fn subset_of_requested_size() -> Result<()> {
    let input = mock_jsonl_file(&sample_training_examples(20, 5), ".jsonl")?;
    let tmp = TempDirPath::new()?;
    let out = tmp.file_path("out.jsonl");
    let in_arg = input.path().to_string_lossy().into_owned();
    let out_arg = out.to_string_lossy().into_owned();

    let result = run_cli(args(&["--n=5", "--srand=3", &in_arg, &out_arg]));
    assert_eq!(exit_status(&result), 0);
    let summary = result?.unwrap();
    assert_eq!(summary.num_read, 100);
    assert_eq!(summary.selected, 5);
    assert_eq!(read_examples::<Value>(&out)?.len(), 5);
    Ok(())
}

#[test]
fn per_utt_alias_selects_group_mode() -> Result<()> {
    let input = mock_jsonl_file(&grouped_examples(&[2, 2, 2, 2]), ".jsonl")?;
    let tmp = TempDirPath::new()?;
    let out = tmp.file_path("out.jsonl");
    let in_arg = input.path().to_string_lossy().into_owned();
    let out_arg = out.to_string_lossy().into_owned();

    let summary = run_cli(args(&["--per-utt", "--n=3", &in_arg, &out_arg]))?.unwrap();
    assert_eq!(summary.mode, SamplingMode::PerGroup);
    let written: Vec<Example<u32>> = read_examples(&out)?;
    assert_eq!(written, grouped_examples(&[2, 2]));
    assert_eq!(summary.num_read, 3);
    Ok(())
}

#[test]
fn empty_input_exits_with_failure() -> Result<()> {
    let input = mock_jsonl_file::<Value>(&[], ".jsonl")?;
    let tmp = TempDirPath::new()?;
    let out = tmp.file_path("out.jsonl");
    let result = run_cli(args(&[
        &*input.path().to_string_lossy(),
        &*out.to_string_lossy(),
    ]));
    assert_eq!(exit_status(&result), EXIT_EMPTY_INPUT);
    Ok(())
}

#[test]
fn wrong_argument_count_is_a_usage_error() {
    let tmp = TempDirPath::new().unwrap();
    let out = tmp.file_path("out.jsonl");
    let result = run_cli(args(&["--n=10", &*out.to_string_lossy()]));
    assert_eq!(exit_status(&result), EXIT_USAGE);
    assert!(!out.exists());
}

#[test]
fn missing_input_is_a_runtime_failure() {
    let tmp = TempDirPath::new().unwrap();
    let result = run_cli(args(&[
        &*tmp.file_path("nope.jsonl").to_string_lossy(),
        &*tmp.file_path("out.jsonl").to_string_lossy(),
    ]));
    assert_eq!(exit_status(&result), EXIT_FAILURE);
}

#[test]
fn help_is_not_an_error() {
    let result = run_cli(args(&["--help"]));
    assert!(matches!(result, Ok(None)));
    assert_eq!(exit_status(&result), 0);
}
