//! Extraction of pass/fail results from runner output
//!
//! The runner's console output is not under our control, so parsing is kept
//! behind [`ResultClassifier`]. The default [`RegexClassifier`] matches status
//! lines of the form `<anything>: <progress> <test id> PASS` (or `FAIL`), where
//! the optional progress text such as `[1/4 emulator-5554]` is skipped and the
//! test id is the last whitespace-free token before the status.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::types::{TestId, TestResults, TestSet};

static PASS_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^.*: (?:.*[ \t])?(\S+) PASS\r?$").expect("valid PASS pattern"));

static FAIL_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^.*: (?:.*[ \t])?(\S+) FAIL\r?$").expect("valid FAIL pattern"));

/// Turns captured runner output into observed results
pub trait ResultClassifier {
    fn classify(&self, output: &str) -> TestResults;
}

/// Line-suffix regex classifier for `cts-tradefed` console output
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexClassifier;

impl RegexClassifier {
    fn collect(pattern: &Regex, output: &str) -> TestSet {
        pattern
            .captures_iter(output)
            .filter_map(|caps| caps.get(1))
            .map(|m| TestId::new(m.as_str()))
            .collect()
    }
}

impl ResultClassifier for RegexClassifier {
    fn classify(&self, output: &str) -> TestResults {
        let failures = Self::collect(&FAIL_LINE, output);
        let mut passes = Self::collect(&PASS_LINE, output);

        // A retried test may report both outcomes; the failure is what counts.
        let before = passes.len();
        passes.retain(|id| !failures.contains(id));
        if passes.len() != before {
            debug!(
                "{} test(s) reported both PASS and FAIL, counted as failures",
                before - passes.len()
            );
        }

        TestResults { passes, failures }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SAMPLE: &str = "\
05-14 10:12:01 I/TestInvocation: Starting invocation for 'cts'
05-14 10:12:09 I/ConsoleReporter: [1/4 emulator-5554] android.webkit.cts.WebViewTest#testZoom FAIL
05-14 10:12:11 I/ConsoleReporter: android.webkit.cts.WebViewTest#testLoadUrl PASS
05-14 10:12:12 I/ConsoleReporter: android.webkit.cts.WebViewTest#testGoBack PASS\r
05-14 10:12:12 I/ConsoleReporter: android.webkit.cts.WebViewTest#testGoBack PASS
05-14 10:12:13 I/ConsoleReporter: android.webkit.cts.CookieTest#testDomain FAIL
05-14 10:12:14 I/TestInvocation: Invocation finished
";

    fn ids(set: &TestSet) -> Vec<&str> {
        set.iter().map(TestId::as_str).collect()
    }

    #[test]
    fn test_classify_sample() {
        let results = RegexClassifier.classify(SAMPLE);
        assert_eq!(
            ids(&results.passes),
            vec![
                "android.webkit.cts.WebViewTest#testGoBack",
                "android.webkit.cts.WebViewTest#testLoadUrl",
            ]
        );
        assert_eq!(
            ids(&results.failures),
            vec![
                "android.webkit.cts.CookieTest#testDomain",
                "android.webkit.cts.WebViewTest#testZoom",
            ]
        );
        assert_eq!(results.total(), 4);
    }

    #[test]
    fn test_prefix_up_to_last_separator() {
        let results = RegexClassifier.classify("I/Reporter: module: a.B#c PASS\n");
        assert_eq!(ids(&results.passes), vec!["a.B#c"]);
    }

    #[test]
    fn test_progress_prefix_skipped() {
        let output = "\
I/ConsoleReporter: [1/4 emulator-5554] android.webkit.cts.WebViewTest#testZoom FAIL
I/ConsoleReporter: [2/4 emulator-5554] android.webkit.cts.WebViewTest#testLoadUrl PASS
";
        let results = RegexClassifier.classify(output);
        assert_eq!(ids(&results.failures), vec!["android.webkit.cts.WebViewTest#testZoom"]);
        assert_eq!(ids(&results.passes), vec!["android.webkit.cts.WebViewTest#testLoadUrl"]);
    }

    #[test]
    fn test_suffix_must_end_line() {
        let output = "x: a.B#c PASSED\nx: a.B#d FAIL later\nx: a.B#e PASS\n";
        let results = RegexClassifier.classify(output);
        assert_eq!(ids(&results.passes), vec!["a.B#e"]);
        assert!(results.failures.is_empty());
    }

    #[test]
    fn test_match_stays_on_one_line() {
        let results = RegexClassifier.classify("I/Reporter: starting\nandroid.webkit.cts.T#m PASS\n");
        assert!(results.passes.is_empty());
    }

    #[test]
    fn test_unrecognized_output() {
        let results = RegexClassifier.classify("cts-tradefed: command not understood\n");
        assert_eq!(results, TestResults::default());
        assert_eq!(RegexClassifier.classify("").total(), 0);
    }

    #[test]
    fn test_failure_wins_over_pass() {
        let output = "r: a.B#flaky FAIL\nr: a.B#flaky PASS\n";
        let results = RegexClassifier.classify(output);
        assert!(results.passes.is_empty());
        assert_eq!(ids(&results.failures), vec!["a.B#flaky"]);
    }

    proptest! {
        #[test]
        fn prop_sets_disjoint_and_complete(
            lines in prop::collection::vec(("[a-e]\\.T#m[0-9]", any::<bool>()), 0..40)
        ) {
            let output: String = lines
                .iter()
                .map(|(id, pass)| format!("I/Reporter: {} {}\n", id, if *pass { "PASS" } else { "FAIL" }))
                .collect();
            let results = RegexClassifier.classify(&output);

            prop_assert!(results.passes.is_disjoint(&results.failures));

            let distinct: std::collections::BTreeSet<&str> =
                lines.iter().map(|(id, _)| id.as_str()).collect();
            prop_assert_eq!(results.total(), distinct.len());
        }
    }
}
