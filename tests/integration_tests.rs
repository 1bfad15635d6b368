use anyhow::Result;
use ban_sweep::core::clock::FixedClock;
use ban_sweep::{CliConfig, LocalStorage, SweepEngine, SweepError, SweepPipeline};
use clap::Parser;
use std::path::Path;
use tempfile::TempDir;

const NOW: i64 = 1_700_000_000;

fn write_bans(dir: &TempDir, content: &str) -> String {
    let path = dir.path().join("Bans.cfg");
    std::fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

fn cli_config(input: &str, output_dir: &Path, extra: &[&str]) -> CliConfig {
    let mut args = vec![
        "ban-sweep".to_string(),
        "--input".to_string(),
        input.to_string(),
        "--output-dir".to_string(),
        output_dir.to_str().unwrap().to_string(),
    ];
    args.extend(extra.iter().map(|s| s.to_string()));
    let mut config = CliConfig::parse_from(args);
    config.resolve_now().unwrap();
    config
}

fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_end_to_end_sweep() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_bans(
        &temp_dir,
        "// ban list\n\
         76561198000000001:1600000000\n\
         Admin [SteamID 1] Banned:76561198000000002:0\n\
         76561198000000003:1800000000\n\
         76561198000000004:whenever\n",
    );

    let config = cli_config(&input, temp_dir.path(), &[]);
    let storage = LocalStorage::new(config.output_dir.clone());
    let pipeline = SweepPipeline::with_clock(storage, config, FixedClock(NOW));
    let summary = SweepEngine::new(pipeline).run().await?;

    assert_eq!(summary.expired_count, 1);
    assert_eq!(summary.active_count, 2);
    assert_eq!(summary.malformed_count, 1);
    assert_eq!(summary.skipped_count, 0);
    assert_eq!(summary.write_failures, 0);
    assert_eq!(summary.warnings.len(), 1);
    assert_eq!(summary.warnings[0].line, 5);

    assert_eq!(
        read_lines(&temp_dir.path().join("expired_bans.cfg")),
        vec!["76561198000000001:1600000000"]
    );
    assert_eq!(
        read_lines(&temp_dir.path().join("active_bans.cfg")),
        vec![
            "Admin [SteamID 1] Banned:76561198000000002:0",
            "76561198000000003:1800000000"
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_now_flag_pins_reference_time() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_bans(&temp_dir, "a:999\nb:1000\nc:1001\nd:0\n");

    // the clock would expire everything; --now takes precedence
    let config = cli_config(&input, temp_dir.path(), &["--now", "1000"]);
    let storage = LocalStorage::new(config.output_dir.clone());
    let pipeline = SweepPipeline::with_clock(storage, config, FixedClock(i64::MAX));
    let summary = SweepEngine::new(pipeline).run().await?;

    assert_eq!(summary.now, 1000);
    assert_eq!(read_lines(&summary.expired_path), vec!["a:999"]);
    assert_eq!(read_lines(&summary.active_path), vec!["b:1000", "c:1001", "d:0"]);
    Ok(())
}

#[tokio::test]
async fn test_rerun_is_deterministic() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_bans(&temp_dir, "a:10\nx:y:z:1\nb:0\nadmin: c :99999999999\n");

    let mut outputs = Vec::new();
    for _ in 0..2 {
        let config = cli_config(&input, temp_dir.path(), &[]);
        let storage = LocalStorage::new(config.output_dir.clone());
        let pipeline = SweepPipeline::with_clock(storage, config, FixedClock(NOW));
        let summary = SweepEngine::new(pipeline).run().await?;
        outputs.push((
            summary.expired_count,
            summary.active_count,
            summary.skipped_count,
            std::fs::read(&summary.expired_path)?,
            std::fs::read(&summary.active_path)?,
        ));
    }

    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(outputs[0].2, 1);
    Ok(())
}

#[tokio::test]
async fn test_outputs_exist_for_empty_input() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_bans(&temp_dir, "// nothing but comments\n\n");

    let config = cli_config(&input, temp_dir.path(), &[]);
    let storage = LocalStorage::new(config.output_dir.clone());
    let pipeline = SweepPipeline::with_clock(storage, config, FixedClock(NOW));
    let summary = SweepEngine::new(pipeline).run().await?;

    assert_eq!(summary.expired_count, 0);
    assert_eq!(summary.active_count, 0);
    assert!(summary.expired_path.exists());
    assert!(summary.active_path.exists());
    assert_eq!(std::fs::read_to_string(&summary.active_path)?, "");
    Ok(())
}

#[tokio::test]
async fn test_missing_input_is_fatal() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("missing.cfg");

    let config = cli_config(input.to_str().unwrap(), temp_dir.path(), &[]);
    let storage = LocalStorage::new(config.output_dir.clone());
    let pipeline = SweepPipeline::with_clock(storage, config, FixedClock(NOW));
    let result = SweepEngine::new(pipeline).run().await;

    assert!(matches!(result, Err(SweepError::InputUnreadable { .. })));
    assert!(!temp_dir.path().join("expired_bans.cfg").exists());
    Ok(())
}

#[tokio::test]
async fn test_uncreatable_output_is_fatal() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_bans(&temp_dir, "a:0\n");
    let output_dir = temp_dir.path().join("does-not-exist");

    let config = cli_config(&input, &output_dir, &[]);
    let storage = LocalStorage::new(config.output_dir.clone());
    let pipeline = SweepPipeline::with_clock(storage, config, FixedClock(NOW));
    let result = SweepEngine::new(pipeline).run().await;

    match result {
        Err(e @ SweepError::OutputUncreatable { .. }) => assert_eq!(e.exit_code(), 3),
        other => panic!("expected OutputUncreatable, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_custom_output_names_and_monitoring() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_bans(&temp_dir, "a:1\nb:0\n");

    let config = cli_config(
        &input,
        temp_dir.path(),
        &["--expired-file", "old.cfg", "--active-file", "current.cfg"],
    );
    let storage = LocalStorage::new(config.output_dir.clone());
    let pipeline = SweepPipeline::with_clock(storage, config, FixedClock(NOW));
    let summary = SweepEngine::new_with_monitoring(pipeline, true).run().await?;

    assert_eq!(read_lines(&temp_dir.path().join("old.cfg")), vec!["a:1"]);
    assert_eq!(read_lines(&temp_dir.path().join("current.cfg")), vec!["b:0"]);
    assert_eq!(summary.expired_path, temp_dir.path().join("old.cfg"));
    Ok(())
}

#[tokio::test]
async fn test_summary_serializes_to_json() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_bans(&temp_dir, "a:1\nb:nope\n");

    let config = cli_config(&input, temp_dir.path(), &["--json"]);
    let storage = LocalStorage::new(config.output_dir.clone());
    let pipeline = SweepPipeline::with_clock(storage, config, FixedClock(NOW));
    let summary = SweepEngine::new(pipeline).run().await?;

    let value = serde_json::to_value(&summary)?;
    assert_eq!(value["expired_count"], 1);
    assert_eq!(value["active_count"], 0);
    assert_eq!(value["malformed_count"], 1);
    assert_eq!(value["warnings"][0]["line"], 2);
    Ok(())
}
