use anyhow::Result;
use egs_subset::io::jsonl::read_examples;
use egs_subset::io::memory::{VecSink, VecSource};
use egs_subset::testing::*;
use egs_subset::*;
use serde_json::Value;
use std::fs;

#[test]
fn run_files_per_record() -> Result<()> {
    let input = sample_training_examples(50, 4);
    let src = mock_jsonl_file(&input, ".jsonl")?;
    let tmp = TempDirPath::new()?;
    let out = tmp.file_path("subset.jsonl");

    let summary = Runner::new(SubsetConfig::default().with_n(30).with_seed(8))
        .run_files::<Value>(src.path(), &out)?;
    assert!(summary.is_success());
    assert_eq!(summary.num_read, 200);
    assert_eq!(summary.selected, 30);
    assert_eq!(summary.mode, SamplingMode::PerRecord);

    let written: Vec<Example<Value>> = read_examples(&out)?;
    assert_eq!(written.len(), 30);
    assert_subset_of(&written, &input);
    Ok(())
}

#[test]
fn fixed_seed_gives_byte_identical_output() -> Result<()> {
    let src = mock_jsonl_file(&sample_training_examples(30, 3), ".jsonl")?;
    let tmp = TempDirPath::new()?;
    let (a, b) = (tmp.file_path("a.jsonl"), tmp.file_path("b.jsonl"));
    let runner = Runner::new(SubsetConfig::default().with_n(17).with_seed(123));
    runner.run_files::<Value>(src.path(), &a)?;
    runner.run_files::<Value>(src.path(), &b)?;
    assert_eq!(fs::read(&a)?, fs::read(&b)?);
    Ok(())
}

#[test]
fn run_files_per_group_keeps_utterances_whole() -> Result<()> {
    let input = sample_training_examples(10, 3);
    let src = mock_jsonl_file(&input, ".jsonl")?;
    let tmp = TempDirPath::new()?;
    let out = tmp.file_path("subset.jsonl");

    let cfg = SubsetConfig::default().with_n(4).with_per_group(true);
    let summary = Runner::new(cfg).run_files::<Value>(src.path(), &out)?;
    assert_eq!(summary.selected, 9);
    assert_eq!(summary.num_read, 4);

    let written: Vec<Example<Value>> = read_examples(&out)?;
    assert_eq!(written, input[..9].to_vec());
    assert_groups_contiguous(&written);
    Ok(())
}

#[test]
fn empty_input_writes_empty_output_and_fails() -> Result<()> {
    let src = mock_jsonl_file::<Value>(&[], ".jsonl")?;
    let tmp = TempDirPath::new()?;
    let out = tmp.file_path("subset.jsonl");
    let summary = Runner::default().run_files::<Value>(src.path(), &out)?;
    assert_eq!(summary.num_read, 0);
    assert!(!summary.is_success());
    assert_eq!(fs::read(&out)?, Vec::<u8>::new());
    Ok(())
}

#[test]
fn unreadable_input_leaves_no_output() {
    let tmp = TempDirPath::new().unwrap();
    let out = tmp.file_path("subset.jsonl");
    let result = Runner::default().run_files::<Value>(tmp.file_path("missing.jsonl"), &out);
    assert!(result.is_err());
    assert!(!out.exists());
}

#[test]
fn decode_error_mid_stream_is_propagated() -> Result<()> {
    let tmp = TempDirPath::new()?;
    let input = tmp.file_path("egs.jsonl");
    fs::write(&input, "{\"key\":\"a-0\",\"value\":0}\n{oops\n")?;
    let out = tmp.file_path("subset.jsonl");
    let err = Runner::default()
        .run_files::<Value>(&input, &out)
        .unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("parse JSONL line 2"), "{msg}");
    assert!(!out.exists());
    Ok(())
}

#[test]
fn in_memory_run_matches_sample_stream() -> Result<()> {
    let cfg = SubsetConfig::default().with_n(12).with_seed(77);
    let mut src = VecSource::new(keyed_examples(300));
    let mut sink = VecSink::new();
    let summary = Runner::new(cfg).run(&mut src, &mut sink)?;
    assert_eq!(summary.selected, 12);
    assert!(summary.shuffled);
    assert!(sink.is_finished());
    assert_eq!(sink.into_examples(), sample_stream(cfg, keyed_examples(300)).examples);
    Ok(())
}
