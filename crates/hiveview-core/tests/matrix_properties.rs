use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Duration, TimeZone, Utc};
use hiveview_core::{
    classify, group_runs, parse_listing, sort_runs, GroupBy, HealthTier, SortBy, TestRun,
};
use proptest::prelude::*;

const TESTS: &[&str] = &["engine", "rpc", "sync"];
const CLIENTS: &[&str] = &["besu", "geth", "reth"];

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn arb_run() -> impl Strategy<Value = TestRun> {
    (
        0..TESTS.len(),
        proptest::sample::subsequence(CLIENTS.to_vec(), 1..=CLIENTS.len()).prop_shuffle(),
        0i64..240,
        0u64..50,
        0u64..50,
    )
        .prop_map(|(t, clients, hours, passes, fails)| {
            TestRun::new(
                TESTS[t],
                clients,
                epoch() + Duration::hours(hours),
                passes,
                fails,
            )
        })
}

fn cell(run: &TestRun) -> (String, String) {
    (run.name.clone(), run.combo().key())
}

fn selected(runs: &[TestRun], by: GroupBy) -> BTreeSet<(String, String, DateTime<Utc>, u64, u64)> {
    group_runs(runs, by)
        .flatten()
        .into_iter()
        .map(|r| (r.name.clone(), r.combo().key(), r.start, r.passes, r.fails))
        .collect()
}

proptest! {
    #[test]
    fn test_by_test_keeps_latest_run_per_cell(runs in proptest::collection::vec(arb_run(), 0..60)) {
        let groups = group_runs(&runs, GroupBy::Test);

        let mut latest: HashMap<(String, String), DateTime<Utc>> = HashMap::new();
        for r in &runs {
            let entry = latest.entry(cell(r)).or_insert(r.start);
            if r.start > *entry {
                *entry = r.start;
            }
        }

        let flat = groups.flatten();
        prop_assert_eq!(flat.len(), latest.len());

        let mut seen = BTreeSet::new();
        for r in flat {
            prop_assert!(seen.insert(cell(r)), "duplicate cell {:?}", cell(r));
            prop_assert_eq!(Some(&r.start), latest.get(&cell(r)));
        }
    }

    #[test]
    fn test_grouping_axes_select_same_runs(runs in proptest::collection::vec(arb_run(), 0..60)) {
        prop_assert_eq!(selected(&runs, GroupBy::Test), selected(&runs, GroupBy::Client));
    }

    #[test]
    fn test_coverage_sort_is_non_increasing(runs in proptest::collection::vec(arb_run(), 0..40)) {
        let sorted = sort_runs(&runs, SortBy::Coverage, GroupBy::Test);
        prop_assert_eq!(sorted.len(), runs.len());
        let ratios: Vec<f64> = sorted.iter().map(|r| r.pass_ratio().unwrap_or(-1.0)).collect();
        prop_assert!(ratios.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_classification_rules(passes in 0u64..1000, fails in 0u64..1000) {
        let run = TestRun::new("t", ["geth"], epoch(), passes, fails);
        let tier = classify(&run);
        if fails == 0 {
            prop_assert_eq!(tier, HealthTier::AllPass);
        } else if passes > 0 && (passes as f64 / (passes + fails) as f64) > 0.5 {
            prop_assert_eq!(tier, HealthTier::PartialFail);
        } else {
            prop_assert_eq!(tier, HealthTier::MostlyFail);
        }
    }
}

#[test]
fn test_scenario_latest_geth_run_is_partial_fail() {
    let listing = concat!(
        r#"{"name":"T1","clients":["geth"],"start":"2024-01-01","passes":10,"fails":0}"#,
        "\n",
        r#"{"name":"T1","clients":["geth"],"start":"2024-01-02","passes":8,"fails":2}"#,
        "\n",
    );
    let runs = parse_listing(listing).unwrap();
    let groups = group_runs(&runs, GroupBy::Test);

    let entries = groups.get("T1").unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].combo().key(), "geth");
    assert_eq!(
        entries[0].start,
        Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()
    );
    assert_eq!(entries[0].health(), HealthTier::PartialFail);
}
