//! Outbound stimulation-safety screening.
//!
//! Pure functions over a command and the policy table. Authorization is the
//! only short-circuit: bounds for an unknown region are undefined, so no
//! further check is meaningful. All numeric checks run and accumulate so a
//! result can report several simultaneous violations. Out-of-bounds values
//! are never clamped to the nearest legal value; silent correction of a
//! stimulation command is itself a safety hazard.

use crate::message::StimulationCommand;
use crate::policy::{PolicyTable, SafetyBounds};
use crate::verdict::Violation;

/// Screen one command against the region's safety envelope.
///
/// Finding order is fixed: authorization, amplitude, frequency, pulse width,
/// charge density, source verification.
pub fn validate_command(command: &StimulationCommand, policy: &PolicyTable) -> Vec<Violation> {
    match policy.bounds_for(&command.region) {
        Ok(bounds) => validate_against_bounds(command, bounds),
        Err(_) => vec![Violation::UnauthorizedRegion],
    }
}

/// Numeric screening for a command whose region is already authorized.
pub fn validate_against_bounds(
    command: &StimulationCommand,
    bounds: &SafetyBounds,
) -> Vec<Violation> {
    let mut findings = Vec::new();

    if !bounds.amplitude_ma.contains(command.amplitude_ma) {
        findings.push(Violation::AmplitudeOutOfBounds);
    }
    if !bounds.frequency_hz.contains(command.frequency_hz) {
        findings.push(Violation::FrequencyOutOfBounds);
    }
    if !bounds.pulse_width_us.contains(command.pulse_width_us) {
        findings.push(Violation::PulseWidthOutOfBounds);
    }
    // Evaluated even when amplitude and frequency pass individually: a safe
    // amplitude and a safe pulse width can still combine into an unsafe
    // per-phase charge.
    if command.charge_density_uc_cm2(bounds.electrode_area_cm2) > bounds.max_charge_density_uc_cm2 {
        findings.push(Violation::ChargeDensityExceeded);
    }
    if !command.source_verified {
        findings.push(Violation::UnverifiedSource);
    }

    findings
}
