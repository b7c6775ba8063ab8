//! Post-hoc summary computation from a completed scheduling run.

use std::fmt;

use serde::Serialize;

use crate::config::BatteryConfig;
use crate::dispatch::ScheduleEntry;

/// Aggregate summary derived from one complete schedule.
///
/// Computed post-hoc from the emitted entries so the report always agrees
/// with the schedule the caller received.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchReport {
    /// Number of samples dispatched to charge.
    pub charge_steps: usize,
    /// Number of samples dispatched to discharge.
    pub discharge_steps: usize,
    /// Number of samples held.
    pub hold_steps: usize,
    /// Total energy routed into the battery (kWh, pre-efficiency).
    pub energy_charged_kwh: f64,
    /// Total energy drawn from the battery (kWh).
    pub energy_discharged_kwh: f64,
    /// Lowest level reached during the run (kWh).
    pub min_level_kwh: f64,
    /// Highest level reached during the run (kWh).
    pub max_level_kwh: f64,
    /// Level after the final sample (kWh).
    pub final_level_kwh: f64,
    /// Equivalent full cycles (throughput / 2·capacity).
    pub equivalent_full_cycles: f64,
}

impl DispatchReport {
    /// Computes the summary from the complete schedule.
    pub fn from_schedule(schedule: &[ScheduleEntry], config: &BatteryConfig) -> Self {
        if schedule.is_empty() {
            return Self {
                charge_steps: 0,
                discharge_steps: 0,
                hold_steps: 0,
                energy_charged_kwh: 0.0,
                energy_discharged_kwh: 0.0,
                min_level_kwh: 0.0,
                max_level_kwh: 0.0,
                final_level_kwh: 0.0,
                equivalent_full_cycles: 0.0,
            };
        }

        let mut charge_steps = 0_usize;
        let mut discharge_steps = 0_usize;
        let mut hold_steps = 0_usize;
        let mut charged = 0.0_f64;
        let mut discharged = 0.0_f64;
        let mut min_level = f64::MAX;
        let mut max_level = f64::MIN;

        for e in schedule {
            if e.charge_kw > 0.0 {
                charge_steps += 1;
            } else if e.discharge_kw > 0.0 {
                discharge_steps += 1;
            } else {
                hold_steps += 1;
            }
            charged += e.charge_kw;
            discharged += e.discharge_kw;
            min_level = min_level.min(e.battery_level_kwh);
            max_level = max_level.max(e.battery_level_kwh);
        }

        let cycles = if config.capacity_kwh > 0.0 {
            (charged + discharged) / (2.0 * config.capacity_kwh)
        } else {
            0.0
        };

        Self {
            charge_steps,
            discharge_steps,
            hold_steps,
            energy_charged_kwh: charged,
            energy_discharged_kwh: discharged,
            min_level_kwh: min_level,
            max_level_kwh: max_level,
            final_level_kwh: schedule[schedule.len() - 1].battery_level_kwh,
            equivalent_full_cycles: cycles,
        }
    }
}

impl fmt::Display for DispatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Dispatch Report ---")?;
        writeln!(
            f,
            "Steps:              {} charge / {} discharge / {} hold",
            self.charge_steps, self.discharge_steps, self.hold_steps
        )?;
        writeln!(f, "Energy charged:     {:.3} kWh", self.energy_charged_kwh)?;
        writeln!(
            f,
            "Energy discharged:  {:.3} kWh",
            self.energy_discharged_kwh
        )?;
        writeln!(
            f,
            "Level range:        {:.3} – {:.3} kWh (final {:.3})",
            self.min_level_kwh, self.max_level_kwh, self.final_level_kwh
        )?;
        write!(
            f,
            "Equivalent cycles:  {:.3}",
            self.equivalent_full_cycles
        )
    }
}
