//! Builder module for constructing solver components from configuration
//!
//! This module provides the wiring between configuration types and the
//! scorers, grouper and engines the solver runs with. Unset weights fall back
//! to the scoring defaults.

use loadout_config::{DirectWeightsConfig, ProcurementWeightsConfig, SolverConfig};
use loadout_scoring::{DirectScorer, DirectWeights, ProcurementScorer, ProcurementWeights};

use crate::grouping::DemandGrouper;
use crate::primary::PrimarySolver;
use crate::secondary::SecondaryEngine;

/// Builder for constructing solver components from configuration.
pub struct PolicyBuilder;

impl PolicyBuilder {
    /// Builds direct weights, keeping defaults for unset values.
    pub fn direct_weights(config: &DirectWeightsConfig) -> DirectWeights {
        let d = DirectWeights::default();
        DirectWeights {
            manual_override: config.manual_override.unwrap_or(d.manual_override),
            common_sub_component: config
                .common_sub_component
                .unwrap_or(d.common_sub_component),
            member_count: config.member_count.unwrap_or(d.member_count),
            member_count_cap: config.member_count_cap.unwrap_or(d.member_count_cap),
            origin_priority: config.origin_priority.unwrap_or(d.origin_priority),
        }
    }

    /// Builds procurement weights, keeping defaults for unset values.
    pub fn procurement_weights(config: &ProcurementWeightsConfig) -> ProcurementWeights {
        let d = ProcurementWeights::default();
        ProcurementWeights {
            offset: config.offset.unwrap_or(d.offset),
            completion: config.completion.unwrap_or(d.completion),
            depth: config.depth.unwrap_or(d.depth),
            group_size: config.group_size.unwrap_or(d.group_size),
            group_size_cap: config.group_size_cap.unwrap_or(d.group_size_cap),
            remaining: config.remaining.unwrap_or(d.remaining),
            origin_priority: config.origin_priority.unwrap_or(d.origin_priority),
        }
    }

    pub fn direct_scorer(config: &SolverConfig) -> DirectScorer {
        DirectScorer::new(
            Self::direct_weights(&config.weights),
            config.strict_sub_component_matching,
        )
    }

    pub fn procurement_scorer(config: &SolverConfig) -> ProcurementScorer {
        ProcurementScorer::new(Self::procurement_weights(&config.procurement_weights))
    }

    pub fn grouper(config: &SolverConfig) -> DemandGrouper {
        DemandGrouper::new(config.grouping, config.reserve_locked_items)
    }

    pub fn primary(config: &SolverConfig) -> PrimarySolver {
        PrimarySolver::new(Self::direct_scorer(config), Self::grouper(config))
    }

    /// Stage 2 never reserves locked entries.
    pub fn secondary(config: &SolverConfig) -> SecondaryEngine {
        SecondaryEngine::new(
            Self::procurement_scorer(config),
            DemandGrouper::new(config.grouping, false),
            config.secondary.iteration_buffer,
        )
    }
}
