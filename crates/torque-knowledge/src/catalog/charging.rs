use torque_core::TorqueResult;

use crate::model::{ComponentDef, FailureMode, PidEffect, PidEffectKind, Severity, SystemDef};
use crate::registry::KnowledgeBaseBuilder;

const SYSTEM: &str = "charging";

pub(super) fn register(b: &mut KnowledgeBaseBuilder) -> TorqueResult<()> {
    b.add_system(SystemDef::new(
        SYSTEM,
        "Charging System",
        "Battery, alternator, and voltage regulation",
    ))?;
    b.add_component(ComponentDef::new("battery", "Battery", SYSTEM))?
        .add_component(ComponentDef::new("alternator", "Alternator", SYSTEM))?;

    b.add_failure(
        FailureMode::new("battery_weak", "Weak Battery", SYSTEM, "battery")
            .immediate("Battery cannot hold charge under cranking load")
            .cascade(&["Slow cranking", "No start after sitting overnight"])
            .dtcs(&["P0562"])
            .pid(PidEffect::new("voltage", PidEffectKind::Low, "System voltage sags below 12 V"))
            .symptom("no start", Severity::Obvious)
            .tests(&[
                "Battery load test",
                "Measure charging voltage at 2000 rpm",
            ])
            .repairs(&["Replace battery", "Clean battery terminals"])
            .frequency(0.9),
    )?;

    b.add_failure(
        FailureMode::new("alternator_failure", "Alternator Failure", SYSTEM, "alternator")
            .immediate("Charging output drops below electrical demand")
            .cascade(&[
                "Battery drains while driving",
                "Electrical accessories dim and engine eventually stalls",
            ])
            .dtcs(&["P0562"])
            .pid(
                PidEffect::new("voltage", PidEffectKind::Low, "Running voltage below 13 V")
                    .with_typical("11.5-12.4 V"),
            )
            .symptom("no start", Severity::Moderate)
            .symptom("stalling", Severity::Subtle)
            .tests(&[
                "Measure charging voltage at 2000 rpm",
                "Alternator output load test",
            ])
            .repairs(&["Replace alternator"])
            .frequency(0.5),
    )?;

    b.add_failure(
        FailureMode::new(
            "voltage_regulator_overcharge",
            "Voltage Regulator Overcharging",
            SYSTEM,
            "alternator",
        )
        .immediate("Regulator lets charging voltage run away")
        .cascade(&["Battery electrolyte boils", "Bulbs and modules fail early"])
        .dtcs(&["P0563"])
        .pid(PidEffect::new("voltage", PidEffectKind::High, "Running voltage above 15 V"))
        .tests(&["Measure charging voltage at 2000 rpm"])
        .repairs(&["Replace voltage regulator"])
        .frequency(0.15),
    )?;

    Ok(())
}
