#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tiered, non-repeating catalog of mutation strategies.
//!
//! Each tier is an ordered list fixed at registration time. Every non-test
//! selection hands out the entry under the tier's cursor and advances the
//! cursor by one, so a run sees each anomaly once in authoring order. What
//! happens when a cursor runs past the end is decided by the configured
//! [`ExhaustionPolicy`]; out-of-range indexing never happens. Test mode pins
//! selection to a single entry and never moves a cursor.

use log::{debug, warn};
use lucid_core::{CatalogError, ConfigurationError, ExhaustionPolicy, TestMode, Tier};
use lucid_system_strategies::MutationStrategy;

/// Entry handed out by the catalog together with where it came from.
#[derive(Debug)]
pub struct Selection<'a> {
    /// Strategy to apply.
    pub strategy: &'a mut MutationStrategy,
    /// Tier the strategy was drawn from.
    pub tier: Tier,
    /// Position of the strategy within its tier.
    pub position: usize,
    /// Completed passes over the tier before this selection.
    pub lap: usize,
    /// Reports whether the selection was pinned by test mode.
    pub pinned: bool,
}

impl Selection<'_> {
    /// Reports whether the tier had to start over to serve this selection.
    #[must_use]
    pub const fn wrapped(&self) -> bool {
        self.lap > 0
    }
}

/// Ordered easy and hard strategy sequences with their cursors.
#[derive(Debug, Default)]
pub struct MutationCatalog {
    easy: Vec<MutationStrategy>,
    hard: Vec<MutationStrategy>,
    easy_index: usize,
    hard_index: usize,
    test_mode: TestMode,
    policy: ExhaustionPolicy,
}

impl MutationCatalog {
    /// Creates an empty catalog using the provided exhaustion policy.
    #[must_use]
    pub fn new(policy: ExhaustionPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Overrides selection with the provided test mode.
    #[must_use]
    pub fn with_test_mode(mut self, test_mode: TestMode) -> Self {
        self.test_mode = test_mode;
        self
    }

    /// Appends a strategy to the tier matching its shape.
    ///
    /// Returns the tier and position the strategy was registered at.
    pub fn register(&mut self, strategy: MutationStrategy) -> (Tier, usize) {
        let tier = strategy.tier();
        let entries = self.entries_mut(tier);
        entries.push(strategy);
        (tier, entries.len() - 1)
    }

    /// Selects the next easy strategy.
    pub fn select_easy(&mut self) -> Result<Selection<'_>, CatalogError> {
        self.select(Tier::Easy)
    }

    /// Selects the next hard strategy.
    pub fn select_hard(&mut self) -> Result<Selection<'_>, CatalogError> {
        self.select(Tier::Hard)
    }

    /// Selects the next strategy from `tier`, honouring test mode.
    pub fn select(&mut self, tier: Tier) -> Result<Selection<'_>, CatalogError> {
        if let Some(forced) = self.test_mode.forced_tier() {
            return self.select_pinned(forced);
        }

        let len = self.len(tier);
        if len == 0 {
            return Err(ConfigurationError::EmptyTier { tier }.into());
        }

        let cursor = self.cursor(tier);
        if cursor >= len {
            match self.policy {
                ExhaustionPolicy::Wrap => {}
                ExhaustionPolicy::EndRun | ExhaustionPolicy::StopOffering => {
                    warn!(
                        "{tier} tier exhausted after {len} selections under {:?}",
                        self.policy
                    );
                    return Err(CatalogError::Exhausted { tier, len });
                }
            }
        }

        let position = cursor % len;
        let lap = cursor / len;
        if lap > 0 {
            warn!("{tier} tier wrapped, serving entry {position} on pass {}", lap + 1);
        }
        *self.cursor_mut(tier) = cursor + 1;
        debug!("selected {tier} entry {position} (cursor {cursor})");

        Ok(Selection {
            strategy: &mut self.entries_mut(tier)[position],
            tier,
            position,
            lap,
            pinned: false,
        })
    }

    /// Position of the next easy selection.
    #[must_use]
    pub const fn easy_index(&self) -> usize {
        self.easy_index
    }

    /// Position of the next hard selection.
    #[must_use]
    pub const fn hard_index(&self) -> usize {
        self.hard_index
    }

    /// Cursor of the provided tier.
    #[must_use]
    pub const fn cursor(&self, tier: Tier) -> usize {
        match tier {
            Tier::Easy => self.easy_index,
            Tier::Hard => self.hard_index,
        }
    }

    /// Number of strategies registered for `tier`.
    #[must_use]
    pub fn len(&self, tier: Tier) -> usize {
        self.entries(tier).len()
    }

    /// Reports whether no strategy has been registered at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.easy.is_empty() && self.hard.is_empty()
    }

    /// Strategies registered for `tier`, in selection order.
    #[must_use]
    pub fn entries(&self, tier: Tier) -> &[MutationStrategy] {
        match tier {
            Tier::Easy => &self.easy,
            Tier::Hard => &self.hard,
        }
    }

    /// Number of entries `tier` can still hand out before exhaustion.
    #[must_use]
    pub fn remaining(&self, tier: Tier) -> usize {
        self.len(tier).saturating_sub(self.cursor(tier))
    }

    /// Active test mode override.
    #[must_use]
    pub const fn test_mode(&self) -> TestMode {
        self.test_mode
    }

    /// Replaces the test mode override.
    pub fn set_test_mode(&mut self, test_mode: TestMode) {
        self.test_mode = test_mode;
    }

    /// Policy applied when a tier runs out.
    #[must_use]
    pub const fn policy(&self) -> ExhaustionPolicy {
        self.policy
    }

    fn select_pinned(&mut self, tier: Tier) -> Result<Selection<'_>, CatalogError> {
        let index = self.test_mode.anomaly_index;
        let len = self.len(tier);
        if len == 0 {
            return Err(ConfigurationError::EmptyTier { tier }.into());
        }
        if index >= len {
            return Err(ConfigurationError::TestIndexOutOfRange { tier, index, len }.into());
        }

        debug!("test mode pinned {tier} entry {index}");
        Ok(Selection {
            strategy: &mut self.entries_mut(tier)[index],
            tier,
            position: index,
            lap: 0,
            pinned: true,
        })
    }

    fn entries_mut(&mut self, tier: Tier) -> &mut Vec<MutationStrategy> {
        match tier {
            Tier::Easy => &mut self.easy,
            Tier::Hard => &mut self.hard,
        }
    }

    fn cursor_mut(&mut self, tier: Tier) -> &mut usize {
        match tier {
            Tier::Easy => &mut self.easy_index,
            Tier::Hard => &mut self.hard_index,
        }
    }
}
