mod common;

use anyhow::Result;
use clap::Parser;
use common::{scratch_dir, write_file};
use tally::LedgerService;
use tally::cli::Cli;

async fn run(args: &[&str]) -> Result<()> {
    let mut argv = vec!["tally"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv)?.run().await
}

#[tokio::test]
async fn test_init_register_export() -> Result<()> {
    let dir = scratch_dir()?;
    let ledger = dir.path().join("ledger.json");
    let ledger = ledger.to_str().unwrap();
    let csv_out = dir.path().join("out.csv");

    run(&["--ledger", ledger, "init"]).await?;
    run(&["--ledger", ledger, "register", "100", "--from", "alice", "--to", "bob"]).await?;
    run(&["--ledger", ledger, "register", "-5", "--from", "bob", "--to", "carol"]).await?;
    run(&[
        "--ledger",
        ledger,
        "export",
        "--format",
        "csv",
        "--output",
        csv_out.to_str().unwrap(),
    ])
    .await?;

    let state = LedgerService::new();
    state.restore_json(ledger).await?;
    let transactions = state.transactions().await;
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[1].amount, -5);

    let exported = LedgerService::new();
    exported.import_csv(&csv_out).await?;
    assert_eq!(exported.transactions().await, transactions);
    Ok(())
}

#[tokio::test]
async fn test_init_refuses_to_overwrite() -> Result<()> {
    let dir = scratch_dir()?;
    let ledger = dir.path().join("ledger.json");
    let ledger = ledger.to_str().unwrap();

    run(&["--ledger", ledger, "init"]).await?;
    assert!(run(&["--ledger", ledger, "init"]).await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_commands_require_existing_ledger() -> Result<()> {
    let dir = scratch_dir()?;
    let ledger = dir.path().join("missing.json");

    let err = run(&["--ledger", ledger.to_str().unwrap(), "list"])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Ledger not found"));
    Ok(())
}

#[tokio::test]
async fn test_failed_csv_import_keeps_earlier_rows() -> Result<()> {
    let dir = scratch_dir()?;
    let ledger = dir.path().join("ledger.json");
    let ledger = ledger.to_str().unwrap();
    let input = write_file(
        &dir,
        "in.csv",
        "tx0,carol,dave,25,1690000000\ntx1,alice,bob,abc,1690000000\n",
    )?;

    run(&["--ledger", ledger, "init"]).await?;
    let result = run(&[
        "--ledger",
        ledger,
        "import",
        "--input",
        input.to_str().unwrap(),
    ])
    .await;
    assert!(result.is_err());

    let state = LedgerService::new();
    state.restore_json(ledger).await?;
    let transactions = state.transactions().await;
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].id, "tx0");
    Ok(())
}

#[tokio::test]
async fn test_json_import_appends() -> Result<()> {
    let dir = scratch_dir()?;
    let ledger = dir.path().join("ledger.json");
    let ledger = ledger.to_str().unwrap();
    let input = write_file(
        &dir,
        "in.json",
        r#"[{"id":"tx1","from":"a","to":"b","amount":3,"created":4}]"#,
    )?;

    run(&["--ledger", ledger, "init"]).await?;
    run(&["--ledger", ledger, "register", "1", "--from", "x", "--to", "y"]).await?;
    run(&[
        "--ledger",
        ledger,
        "import",
        "-f",
        "json",
        "-i",
        input.to_str().unwrap(),
    ])
    .await?;

    let state = LedgerService::new();
    assert_eq!(state.restore_json(ledger).await?, 2);
    assert_eq!(state.transactions().await[1].id, "tx1");
    Ok(())
}
