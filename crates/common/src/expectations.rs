//! Known-failing WebView CTS tests

use std::collections::BTreeSet;

use crate::types::{TestId, TestSet};

/// Tests currently tolerated as broken. Eventually this list will be empty.
const WEBVIEW_EXPECTED_FAILURES: &[&str] = &[
    "android.webkit.cts.WebSettingsTest#testAccessSaveFormData",
    "android.webkit.cts.WebViewClientTest#testOnScaleChanged",
    "android.webkit.cts.WebViewTest#testCapturePicture",
    // crbug.com/162967
    "android.webkit.cts.WebViewTest#testFlingScroll",
    "android.webkit.cts.WebViewTest#testInsecureSiteClearsCertificate",
    "android.webkit.cts.WebViewTest#testLoadDataWithBaseUrl",
    "android.webkit.cts.WebViewTest#testOnReceivedSslError",
    "android.webkit.cts.WebViewTest#testOnReceivedSslErrorProceed",
    "android.webkit.cts.WebViewTest#testPageScroll",
    "android.webkit.cts.WebViewTest#testPauseResumeTimers",
    "android.webkit.cts.WebViewTest#testRequestChildRectangleOnScreen",
    "android.webkit.cts.WebViewTest#testScrollBarOverlay",
    "android.webkit.cts.WebViewTest#testSecureSiteSetsCertificate",
    "android.webkit.cts.WebViewTest#testSetInitialScale",
    "android.webkit.cts.WebViewTest#testSetScrollBarStyle",
    "android.webkit.cts.WebViewTest#testSetWebViewClient",
    "android.webkit.cts.WebViewTest#testSslErrorProceedResponseNotReusedForDifferentHost",
    "android.webkit.cts.WebViewTest#testSslErrorProceedResponseReusedForSameHost",
    "android.webkit.cts.WebViewTest#testStopLoading",
    "android.webkit.cts.WebViewTest#testZoom",
    // crbug.com/172786, b/8187850
    "android.webkit.cts.WebViewTest#testRequestImageRef",
    "android.webkit.cts.WebViewTest#testFindNext",
    "android.webkit.cts.WebViewTest#testFindAll",
    "android.webkit.cts.WebViewTest#testGetContentHeight",
    // b/8231270
    "android.webkit.cts.WebSettingsTest#testDatabaseEnabled",
    // b/8231433
    "android.webkit.cts.GeolocationTest#testSimpleGeolocationRequestAcceptAlways",
    "android.webkit.cts.GeolocationTest#testSimpleGeolocationRequestAcceptOnce",
];

/// Immutable set of tests that are expected to fail.
///
/// Built once per run and handed to [`Comparison::new`](crate::Comparison::new);
/// callers can construct alternative sets with [`FromIterator`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectedFailures {
    tests: TestSet,
}

impl ExpectedFailures {
    /// The built-in WebView expectation list
    pub fn webview() -> Self {
        WEBVIEW_EXPECTED_FAILURES.iter().copied().collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tests.contains(id)
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TestId> {
        self.tests.iter()
    }

    pub(crate) fn as_set(&self) -> &BTreeSet<TestId> {
        &self.tests
    }
}

impl<T: Into<TestId>> FromIterator<T> for ExpectedFailures {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            tests: iter.into_iter().map(Into::into).collect(),
        }
    }
}
