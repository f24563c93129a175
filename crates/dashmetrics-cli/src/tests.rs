use super::*;
use crate::extract::{read_pages, render};

#[test]
fn parses_extract_with_defaults() {
    let cli = Cli::try_parse_from(["dashmetrics", "extract", "shot-1.txt", "shot-2.txt"])
        .expect("expected valid cli args");

    match cli.command {
        Commands::Extract {
            files,
            today,
            pretty,
            metrics_only,
            concurrency,
        } => {
            assert_eq!(
                files,
                vec![PathBuf::from("shot-1.txt"), PathBuf::from("shot-2.txt")]
            );
            assert!(today.is_none());
            assert!(!pretty);
            assert!(!metrics_only);
            assert_eq!(concurrency, 4);
        }
        Commands::Limits => panic!("expected extract command"),
    }
}

#[test]
fn parses_extract_flags() {
    let cli = Cli::try_parse_from([
        "dashmetrics",
        "extract",
        "-",
        "--today",
        "2024-03-10",
        "--pretty",
        "--metrics-only",
        "--concurrency",
        "8",
    ])
    .unwrap();

    assert!(matches!(
        cli.command,
        Commands::Extract {
            today: Some(date),
            pretty: true,
            metrics_only: true,
            concurrency: 8,
            ..
        } if date == NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    ));
}

#[test]
fn extract_requires_at_least_one_file() {
    assert!(Cli::try_parse_from(["dashmetrics", "extract"]).is_err());
}

#[test]
fn invalid_today_is_rejected() {
    let result =
        Cli::try_parse_from(["dashmetrics", "extract", "a.txt", "--today", "10/03/2024"]);
    assert!(result.is_err());
}

#[test]
fn parses_limits_command() {
    let cli = Cli::try_parse_from(["dashmetrics", "limits"]).unwrap();
    assert!(matches!(cli.command, Commands::Limits));
}

#[test]
fn missing_command_is_rejected() {
    assert!(Cli::try_parse_from(["dashmetrics"]).is_err());
}

#[test]
fn render_compact_and_pretty() {
    let value = serde_json::json!({ "views": 10 });
    assert_eq!(render(&value, false).unwrap(), r#"{"views":10}"#);
    assert_eq!(render(&value, true).unwrap(), "{\n  \"views\": 10\n}");
}

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("dashmetrics-{}-{name}", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

#[tokio::test]
async fn read_pages_keeps_file_order() {
    let first = temp_file("order-a.txt", "Views 10");
    let second = temp_file("order-b.txt", "Reach 5");

    let pages = read_pages(&[first.clone(), second.clone()], 2).await;

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].index, 0);
    assert_eq!(pages[0].text.as_deref(), Some("Views 10"));
    assert_eq!(pages[1].index, 1);
    assert_eq!(pages[1].text.as_deref(), Some("Reach 5"));

    std::fs::remove_file(first).unwrap();
    std::fs::remove_file(second).unwrap();
}

#[tokio::test]
async fn unreadable_file_becomes_failed_page() {
    let present = temp_file("present.txt", "Saves 3");
    let missing = std::env::temp_dir().join("dashmetrics-does-not-exist.txt");

    let pages = read_pages(&[missing, present.clone()], 0).await;

    assert!(pages[0].error.is_some());
    assert!(pages[0].text.is_none());
    assert_eq!(pages[1].text.as_deref(), Some("Saves 3"));

    std::fs::remove_file(present).unwrap();
}
