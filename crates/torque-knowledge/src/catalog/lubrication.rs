use torque_core::TorqueResult;

use crate::model::{ComponentDef, FailureMode, PidEffect, PidEffectKind, Severity, SystemDef};
use crate::registry::KnowledgeBaseBuilder;

const SYSTEM: &str = "lubrication";

pub(super) fn register(b: &mut KnowledgeBaseBuilder) -> TorqueResult<()> {
    b.add_system(SystemDef::new(
        SYSTEM,
        "Lubrication System",
        "Oil supply, pressure generation, and pressure monitoring",
    ))?;
    b.add_component(ComponentDef::new("oil_supply", "Engine Oil Supply", SYSTEM))?
        .add_component(ComponentDef::new("oil_pump", "Oil Pump", SYSTEM))?
        .add_component(ComponentDef::new("oil_pressure_sender", "Oil Pressure Sender", SYSTEM))?;

    b.add_failure(
        FailureMode::new("low_oil_level", "Low Engine Oil Level", SYSTEM, "oil_supply")
            .immediate("Oil pickup draws air during cornering and braking")
            .cascade(&[
                "Oil pressure drops at idle",
                "Valve train and bearings run with marginal lubrication",
            ])
            .dtcs(&["P0524"])
            .pid(
                PidEffect::new("oil_pressure", PidEffectKind::Low, "Oil pressure sags at hot idle")
                    .with_typical("5-15 psi at idle"),
            )
            .symptom("engine knock", Severity::Moderate)
            .tests(&[
                "Check dipstick oil level",
                "Verify oil pressure with mechanical gauge",
            ])
            .repairs(&["Top up engine oil", "Locate and repair oil leak"])
            .frequency(0.7),
    )?;

    b.add_failure(
        FailureMode::new("oil_pump_worn", "Worn Oil Pump", SYSTEM, "oil_pump")
            .immediate("Pump cannot build rated pressure")
            .cascade(&[
                "Oil pressure low at every engine speed",
                "Rod and main bearings wear rapidly",
            ])
            .dtcs(&["P0524", "P0521"])
            .pid(PidEffect::new("oil_pressure", PidEffectKind::Low, "Oil pressure low across the rpm range"))
            .symptom("engine knock", Severity::Severe)
            .tests(&[
                "Verify oil pressure with mechanical gauge",
                "Inspect oil pickup screen",
            ])
            .repairs(&["Replace oil pump", "Replace oil pickup screen"])
            .frequency(0.2),
    )?;

    b.add_failure(
        FailureMode::new(
            "oil_pressure_sender_failure",
            "Oil Pressure Sender Failure",
            SYSTEM,
            "oil_pressure_sender",
        )
        .immediate("Reported oil pressure no longer tracks actual pressure")
        .cascade(&["Oil warning light flickers with good mechanical pressure"])
        .dtcs(&["P0521"])
        .pid(PidEffect::new("oil_pressure", PidEffectKind::Erratic, "Oil pressure reading jumps between extremes"))
        .tests(&[
            "Verify oil pressure with mechanical gauge",
            "Check sender connector for oil intrusion",
        ])
        .repairs(&["Replace oil pressure sender"])
        .frequency(0.4),
    )?;

    Ok(())
}
