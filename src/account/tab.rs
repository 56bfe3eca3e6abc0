//! Account tab state bridged to the `tab` URL query parameter.
//!
//! Two directions only: external URL changes reconcile into local state, and
//! local selection rewrites the URL. The admin tab is gated by the session's
//! authorization flag in both directions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AccountError;

use super::query::QueryParams;

/// Query parameter carrying the selected tab.
pub const TAB_PARAM: &str = "tab";

/// Account page tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountTab {
    #[default]
    Profile,
    LookAndFeel,
    Admin,
    Support,
}

impl AccountTab {
    pub const ALL: [AccountTab; 4] = [
        AccountTab::Profile,
        AccountTab::LookAndFeel,
        AccountTab::Admin,
        AccountTab::Support,
    ];

    /// Stable wire name used in the URL.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::LookAndFeel => "look_and_feel",
            Self::Admin => "admin",
            Self::Support => "support",
        }
    }

    /// Human-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Profile => "Profile",
            Self::LookAndFeel => "Look and Feel",
            Self::Admin => "Admin",
            Self::Support => "Support",
        }
    }

    pub fn requires_admin(self) -> bool {
        self == Self::Admin
    }
}

impl fmt::Display for AccountTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountTab {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.as_str() == s)
            .ok_or_else(|| AccountError::UnknownTab(s.to_string()))
    }
}

/// Keeps the selected tab and the URL query in step.
#[derive(Debug, Clone)]
pub struct TabRouter {
    current: AccountTab,
    query: QueryParams,
    is_admin: bool,
}

impl TabRouter {
    /// Mount with the URL as it is now.
    pub fn new(query: QueryParams, is_admin: bool) -> Self {
        let mut router = Self {
            current: AccountTab::default(),
            query: QueryParams::new(),
            is_admin,
        };
        router.sync_from_query(&query);
        router
    }

    pub fn current_tab(&self) -> AccountTab {
        self.current
    }

    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Record the session's authorization flag once it resolves.
    ///
    /// A pending `tab=admin` in the URL is honored as soon as the flag flips on;
    /// revoking it drops the page back to the default tab.
    pub fn set_admin(&mut self, is_admin: bool) {
        self.is_admin = is_admin;
        if self.current.requires_admin() && !is_admin {
            self.current = AccountTab::default();
        }
        let query = self.query.clone();
        self.sync_from_query(&query);
    }

    /// Tabs the current session may see, in display order.
    pub fn visible_tabs(&self) -> Vec<AccountTab> {
        AccountTab::ALL
            .into_iter()
            .filter(|tab| !tab.requires_admin() || self.is_admin)
            .collect()
    }

    /// Reconcile local state after the URL changed externally.
    ///
    /// Missing or unknown values are no-ops; `admin` without authorization is
    /// ignored and the current tab stays.
    pub fn sync_from_query(&mut self, query: &QueryParams) {
        self.query = query.clone();
        let Some(raw) = query.get(TAB_PARAM) else {
            return;
        };
        let Ok(requested) = raw.parse::<AccountTab>() else {
            tracing::debug!(value = raw, "ignoring unknown tab parameter");
            return;
        };
        if requested == self.current {
            return;
        }
        if requested.requires_admin() && !self.is_admin {
            tracing::debug!("ignoring admin tab request without authorization");
            return;
        }
        tracing::debug!(from = %self.current, to = %requested, "tab synced from url");
        self.current = requested;
    }

    /// Select `next` and rewrite the `tab` parameter, preserving the rest.
    pub fn set_tab(&mut self, next: AccountTab) -> Result<&QueryParams, AccountError> {
        if next.requires_admin() && !self.is_admin {
            return Err(AccountError::TabNotAllowed(next));
        }
        self.current = next;
        self.query.set(TAB_PARAM, next.as_str());
        Ok(&self.query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revoking_admin_leaves_admin_tab() {
        let mut router = TabRouter::new(QueryParams::parse("tab=admin"), true);
        assert_eq!(router.current_tab(), AccountTab::Admin);

        router.set_admin(false);
        assert_eq!(router.current_tab(), AccountTab::Profile);
        assert!(router.visible_tabs().contains(&router.current_tab()));

        router.set_admin(true);
        assert_eq!(router.current_tab(), AccountTab::Admin);
    }

    #[test]
    fn mount_defaults_to_profile_without_param() {
        let router = TabRouter::new(QueryParams::parse("trip=7"), false);
        assert_eq!(router.current_tab(), AccountTab::Profile);
    }

    #[test]
    fn mount_reads_tab_param() {
        let router = TabRouter::new(QueryParams::parse("tab=look_and_feel"), false);
        assert_eq!(router.current_tab(), AccountTab::LookAndFeel);
    }

    #[test]
    fn set_tab_rewrites_param_and_preserves_others() {
        for tab in [AccountTab::Profile, AccountTab::LookAndFeel, AccountTab::Support] {
            let mut router = TabRouter::new(QueryParams::parse("trip=7&tab=profile&lang=en"), false);
            let query = router.set_tab(tab).expect("tab allowed").clone();
            assert_eq!(query.get(TAB_PARAM), Some(tab.as_str()));
            assert_eq!(query.get("trip"), Some("7"));
            assert_eq!(query.get("lang"), Some("en"));
            assert_eq!(query.len(), 3);
            assert_eq!(router.current_tab(), tab);
        }
    }

    #[test]
    fn set_admin_tab_without_authorization_is_rejected() {
        let mut router = TabRouter::new(QueryParams::parse("tab=support"), false);
        let err = router.set_tab(AccountTab::Admin).expect_err("must reject");
        assert!(matches!(err, AccountError::TabNotAllowed(AccountTab::Admin)));
        assert_eq!(router.current_tab(), AccountTab::Support);
        assert_eq!(router.query().get(TAB_PARAM), Some("support"));
    }

    #[test]
    fn external_admin_param_is_ignored_without_authorization() {
        let mut router = TabRouter::new(QueryParams::parse("tab=support"), false);
        router.sync_from_query(&QueryParams::parse("tab=admin"));
        assert_eq!(router.current_tab(), AccountTab::Support);
    }

    #[test]
    fn admin_param_applies_once_authorization_resolves() {
        let mut router = TabRouter::new(QueryParams::parse("tab=admin"), false);
        assert_eq!(router.current_tab(), AccountTab::Profile);
        router.set_admin(true);
        assert_eq!(router.current_tab(), AccountTab::Admin);
    }

    #[test]
    fn unknown_param_keeps_current_tab() {
        let mut router = TabRouter::new(QueryParams::parse("tab=support"), true);
        router.sync_from_query(&QueryParams::parse("tab=billing"));
        assert_eq!(router.current_tab(), AccountTab::Support);
    }

    #[test]
    fn visible_tabs_hide_admin_without_flag() {
        let router = TabRouter::new(QueryParams::new(), false);
        assert!(!router.visible_tabs().contains(&AccountTab::Admin));
        let router = TabRouter::new(QueryParams::new(), true);
        assert_eq!(router.visible_tabs().len(), 4);
    }

    #[test]
    fn every_tab_reachable_from_every_other_when_authorized() {
        for from in AccountTab::ALL {
            for to in AccountTab::ALL {
                let mut router = TabRouter::new(QueryParams::new(), true);
                router.set_tab(from).expect("from");
                router.set_tab(to).expect("to");
                assert_eq!(router.current_tab(), to);
            }
        }
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert!("billing".parse::<AccountTab>().is_err());
        assert_eq!(
            "look_and_feel".parse::<AccountTab>().expect("known"),
            AccountTab::LookAndFeel
        );
    }

    #[cfg(feature = "fuzz-tests")]
    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn set_tab_never_disturbs_other_params(
                pairs in proptest::collection::vec(
                    (
                        proptest::string::string_regex("[a-z]{1,6}").expect("regex"),
                        proptest::string::string_regex("[ -~]{0,12}").expect("regex"),
                    ),
                    0..6
                )
            ) {
                let mut query = QueryParams::new();
                for (k, v) in &pairs {
                    if k != TAB_PARAM {
                        query.set(k, v);
                    }
                }
                let before: Vec<(String, String)> = query
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();
                let mut router = TabRouter::new(query, false);
                let after = router.set_tab(AccountTab::Support).expect("allowed").clone();
                let kept: Vec<(String, String)> = after
                    .iter()
                    .filter(|(k, _)| *k != TAB_PARAM)
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();
                prop_assert_eq!(kept, before);
                prop_assert_eq!(after.get(TAB_PARAM), Some("support"));
            }
        }
    }
}
