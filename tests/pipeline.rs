use logagg::workload::{self, Stage, StreamStats};

fn run_stage(stage: Stage, input: &str) -> (String, StreamStats) {
    let mut out = Vec::new();
    let stats = workload::run(stage, input.as_bytes(), &mut out).unwrap();
    (String::from_utf8(out).unwrap(), stats)
}

/// What the streaming shuffle does between the stages: a stable sort on the
/// text before the first tab.
fn shuffle(intermediate: &str) -> String {
    let mut lines: Vec<&str> = intermediate.lines().collect();
    lines.sort_by(|a, b| key_of(a).cmp(key_of(b)));
    lines.iter().map(|line| format!("{line}\n")).collect()
}

fn key_of(line: &str) -> &str {
    line.split('\t').next().unwrap_or_default()
}

#[test]
fn single_record_end_to_end() {
    let (mapped, _) = run_stage(Stage::Map, "2024-01-01T00:00:00\tu42\tclick\t1.5\n");
    assert_eq!(mapped, "u42\tclick,1.5\n");

    let (reduced, _) = run_stage(Stage::Reduce, &mapped);
    assert_eq!(reduced, "u42\tclick\t1\t1.50\t1.50\n");
}

#[test]
fn key_change_flushes_previous_run() {
    let (reduced, _) = run_stage(Stage::Reduce, "u1\tA,1.0\nu1\tA,3.0\nu2\tB,5.0\n");
    assert_eq!(reduced, "u1\tA\t2\t4.00\t2.00\nu2\tB\t1\t5.00\t5.00\n");
}

#[test]
fn garbage_is_dropped_by_both_stages() {
    let (mapped, map_stats) = run_stage(Stage::Map, "garbage\n");
    assert!(mapped.is_empty());
    assert_eq!(map_stats.skipped, 1);

    let (reduced, reduce_stats) = run_stage(Stage::Reduce, "garbage\n");
    assert!(reduced.is_empty());
    assert_eq!(reduce_stats.malformed, 1);
}

#[test]
fn shuffled_logs_aggregate_per_user() {
    let logs = "\
2024-01-01T00:00:00\tu2\tview\t1.25
2024-01-01T00:00:01\tu1\tclick\t2
2024-01-01T00:00:02\tu2\tbuy\t10.5
bad line
2024-01-01T00:00:03\tu1\tclick\t3
2024-01-01T00:00:04\tu2\tview\t0.75
2024-01-01T00:00:05\tu3\tview\tn/a
2024-01-01T00:00:06\tu1\tview\t1
";
    let (mapped, map_stats) = run_stage(Stage::Map, logs);
    assert_eq!(map_stats.emitted, 7);
    assert_eq!(map_stats.skipped, 1);

    let (reduced, reduce_stats) = run_stage(Stage::Reduce, &shuffle(&mapped));
    assert_eq!(
        reduced,
        "u1\tclick\t2\t5.00\t2.50\n\
         u1\tview\t1\t1.00\t1.00\n\
         u2\tview\t2\t2.00\t1.00\n\
         u2\tbuy\t1\t10.50\t10.50\n"
    );
    // u3's only value is not a number
    assert_eq!(reduce_stats.malformed, 1);
}

#[test]
fn ungrouped_input_reports_a_key_per_run() {
    let (reduced, _) = run_stage(Stage::Reduce, "u1\tA,1\nu2\tA,1\nu1\tA,1\n");
    let keys: Vec<&str> = reduced
        .lines()
        .map(|line| line.split('\t').next().unwrap())
        .collect();
    assert_eq!(keys, vec!["u1", "u2", "u1"]);
}

#[test]
fn summaries_match_per_action_totals() {
    let mut input = String::new();
    for i in 0..30u32 {
        let action = ["click", "view", "buy"][(i % 3) as usize];
        input.push_str(&format!("u7\t{action},{}\n", f64::from(i) * 0.5));
    }
    let (reduced, stats) = run_stage(Stage::Reduce, &input);
    assert_eq!(stats.emitted, 3);

    for line in reduced.lines() {
        let fields: Vec<&str> = line.split('\t').collect();
        let offset = match fields[1] {
            "click" => 0,
            "view" => 1,
            "buy" => 2,
            other => panic!("unexpected action {other}"),
        };
        let expected: f64 = (0..30u32)
            .filter(|i| i % 3 == offset)
            .map(|i| f64::from(i) * 0.5)
            .sum();
        assert_eq!(fields[2], "10");
        assert_eq!(fields[3], format!("{expected:.2}"));
        assert_eq!(fields[4], format!("{:.2}", expected / 10.0));
    }
}
