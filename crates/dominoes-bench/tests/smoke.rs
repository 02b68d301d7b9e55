use dominoes_bench::config::BenchConfig;
use dominoes_bench::tournament::TournamentRunner;
use std::fs;
use tempfile::tempdir;

fn load_config(output_dir: &std::path::Path) -> BenchConfig {
    let yaml = format!(
        r#"
run_id: "test_smoke"
series:
  seed: 4242
  count: 2
  target_score: 30
agents:
  - name: "plain"
    kind: "identity"
  - name: "heavy"
    kind: "heaviest_first"
  - name: "doubles"
    kind: "doubles_first"
  - name: "backwards"
    kind: "reverse"
outputs:
  jsonl: "{jsonl}"
  summary_md: "{summary}"
logging:
  enable_structured: false
"#,
        jsonl = output_dir.join("games.jsonl").display(),
        summary = output_dir.join("summary.md").display(),
    );

    let cfg: BenchConfig = serde_yaml::from_str(&yaml).expect("valid yaml");
    cfg.validate().expect("config validates");
    cfg
}

#[test]
fn tournament_smoke_test_writes_rows_and_summary() {
    let dir = tempdir().expect("temp dir");
    let config = load_config(dir.path());
    let outputs = config.resolved_outputs();

    let runner = TournamentRunner::new(config, outputs).expect("runner created");
    let summary = runner.run().expect("tournament completes");

    assert_eq!(summary.series_played, 2);
    assert!(summary.games_played >= 2, "each series plays at least one game");
    assert_eq!(summary.rows_written, summary.games_played);

    let rows = fs::read_to_string(&summary.jsonl_path).expect("rows readable");
    let parsed: Vec<serde_json::Value> = rows
        .lines()
        .map(|line| serde_json::from_str(line).expect("row parses"))
        .collect();
    assert_eq!(parsed.len(), summary.rows_written);
    for row in &parsed {
        assert!(row.get("points").is_some());
        assert!(row.get("won").is_some());
        assert!(row.get("agent").is_some());
    }

    let markdown = fs::read_to_string(&summary.summary_path).expect("summary readable");
    assert!(markdown.contains("# Run `test_smoke`"));
    assert!(markdown.contains("Point differential"));
}

#[test]
fn seeded_runs_are_reproducible() {
    let dir_a = tempdir().expect("temp dir");
    let dir_b = tempdir().expect("temp dir");

    let run = |dir: &std::path::Path| {
        let config = load_config(dir);
        let outputs = config.resolved_outputs();
        let summary = TournamentRunner::new(config, outputs)
            .expect("runner created")
            .run()
            .expect("tournament completes");
        fs::read_to_string(&summary.jsonl_path).expect("rows readable")
    };

    assert_eq!(run(dir_a.path()), run(dir_b.path()));
}
