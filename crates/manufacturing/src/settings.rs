//! Manufacturing module configuration.

use serde::{Deserialize, Serialize};

use millwright_core::{DomainError, DomainResult};

/// How new work order numbers are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberPolicy {
    Manual,
    Automatic,
    /// Automatic, but the user may overwrite the proposed number.
    Override,
}

/// Date used to pick effective bill-of-material components on explosion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplodeEffective {
    StartDate,
    ExplosionDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplosionLevel {
    SingleLevel,
    MultipleLevel,
}

/// Default cost-of-sales method for job items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobItemCosDefault {
    ProportionalCost,
    ToDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManufacturingSettings {
    pub wo_number_generation: NumberPolicy,
    pub next_work_order_number: u64,
    pub auto_explode_wo: bool,
    pub work_order_change_log: bool,
    pub post_material_variances: bool,
    pub explode_wo_effective: ExplodeEffective,
    pub wo_explosion_level: ExplosionLevel,
    pub job_item_cos_default: JobItemCosDefault,
}

impl Default for ManufacturingSettings {
    fn default() -> Self {
        Self {
            wo_number_generation: NumberPolicy::Automatic,
            next_work_order_number: 10000,
            auto_explode_wo: true,
            work_order_change_log: false,
            post_material_variances: true,
            explode_wo_effective: ExplodeEffective::StartDate,
            wo_explosion_level: ExplosionLevel::MultipleLevel,
            job_item_cos_default: JobItemCosDefault::ProportionalCost,
        }
    }
}

impl ManufacturingSettings {
    pub fn validate(&self) -> DomainResult<()> {
        if self.wo_number_generation != NumberPolicy::Manual && self.next_work_order_number == 0 {
            return Err(DomainError::validation(
                "next work order number must be at least 1",
            ));
        }
        Ok(())
    }

    /// Number proposed for the next work order, if the policy assigns one.
    pub fn proposed_work_order_number(&self) -> Option<u64> {
        match self.wo_number_generation {
            NumberPolicy::Manual => None,
            NumberPolicy::Automatic | NumberPolicy::Override => Some(self.next_work_order_number),
        }
    }

    /// Whether the user may type a number over the proposed one.
    pub fn number_is_editable(&self) -> bool {
        !matches!(self.wo_number_generation, NumberPolicy::Automatic)
    }
}
