use torque_core::TorqueResult;

use crate::model::{ComponentDef, FailureMode, PidEffect, PidEffectKind, Severity, SystemDef};
use crate::registry::KnowledgeBaseBuilder;

const SYSTEM: &str = "cooling";

pub(super) fn register(b: &mut KnowledgeBaseBuilder) -> TorqueResult<()> {
    b.add_system(SystemDef::new(
        SYSTEM,
        "Cooling System",
        "Coolant circulation, heat rejection, and temperature regulation",
    ))?;
    b.add_component(ComponentDef::new("thermostat", "Thermostat", SYSTEM))?
        .add_component(ComponentDef::new("water_pump", "Water Pump", SYSTEM))?
        .add_component(ComponentDef::new("radiator", "Radiator", SYSTEM))?
        .add_component(ComponentDef::new("cooling_fan", "Radiator Cooling Fan", SYSTEM))?
        .add_component(ComponentDef::new("fan_control", "Fan Relay and Control Circuit", SYSTEM))?
        .add_component(ComponentDef::new("coolant_hoses", "Coolant Hoses", SYSTEM))?
        .add_component(ComponentDef::new("head_gasket", "Cylinder Head Gasket", SYSTEM))?;

    b.add_failure(
        FailureMode::new("thermostat_stuck_closed", "Thermostat Stuck Closed", SYSTEM, "thermostat")
            .immediate("Coolant cannot reach the radiator once the engine warms up")
            .cascade(&[
                "Engine temperature climbs rapidly past normal operating range",
                "Coolant boils and pressure cap vents",
                "Prolonged driving risks head gasket and cylinder head damage",
            ])
            .dtcs(&["P0217"])
            .pid(
                PidEffect::new("coolant_temp", PidEffectKind::High, "Coolant temperature rises above 105 C within minutes")
                    .with_typical("110-125 C"),
            )
            .symptom("upper radiator hose cold", Severity::Subtle)
            .symptom("heater blows cold when hot", Severity::Moderate)
            .tests(&[
                "Feel upper radiator hose at operating temperature",
                "Infrared temperature check across thermostat housing",
            ])
            .repairs(&["Replace thermostat and housing gasket", "Refill and bleed cooling system"])
            .frequency(0.6),
    )?;

    b.add_failure(
        FailureMode::new("thermostat_stuck_open", "Thermostat Stuck Open", SYSTEM, "thermostat")
            .immediate("Coolant flows through the radiator continuously from cold start")
            .cascade(&[
                "Engine takes too long to reach operating temperature",
                "Fuel control stays in warm-up enrichment",
            ])
            .dtcs(&["P0128"])
            .pid(
                PidEffect::new("coolant_temp", PidEffectKind::Low, "Coolant temperature stays below 70 C while driving")
                    .with_typical("50-70 C"),
            )
            .symptom("poor fuel economy", Severity::Subtle)
            .tests(&[
                "Monitor warm-up time with scan tool",
                "Feel upper radiator hose at operating temperature",
            ])
            .repairs(&["Replace thermostat"])
            .frequency(0.7),
    )?;

    b.add_failure(
        FailureMode::new("water_pump_failure", "Water Pump Failure", SYSTEM, "water_pump")
            .immediate("Coolant circulation drops or stops")
            .cascade(&[
                "Engine overheats under load",
                "Seal failure leaks coolant from the weep hole",
            ])
            .dtcs(&["P0217"])
            .pid(PidEffect::new("coolant_temp", PidEffectKind::High, "Coolant temperature climbs under load"))
            .symptom("coolant leak", Severity::Moderate)
            .symptom("whining noise", Severity::Subtle)
            .tests(&[
                "Inspect water pump weep hole",
                "Check for shaft play at pump pulley",
            ])
            .repairs(&["Replace water pump", "Replace drive belt"])
            .frequency(0.4),
    )?;

    b.add_failure(
        FailureMode::new("cooling_fan_motor_failure", "Cooling Fan Motor Failure", SYSTEM, "cooling_fan")
            .immediate("No airflow across the radiator at low vehicle speed")
            .cascade(&[
                "Engine overheats in traffic and at idle",
                "Temperature normalizes at highway speed",
            ])
            .dtcs(&["P0480", "P0217"])
            .pid(PidEffect::new("coolant_temp", PidEffectKind::High, "Coolant temperature climbs at idle"))
            .symptom("fan not running", Severity::Obvious)
            .tests(&[
                "Apply direct 12 V to fan motor",
                "Command fan on with scan tool",
            ])
            .repairs(&["Replace cooling fan motor"])
            .frequency(0.5),
    )?;

    b.add_failure(
        FailureMode::new("fan_relay_failure", "Cooling Fan Relay Failure", SYSTEM, "fan_control")
            .immediate("Fan motor never receives power")
            .cascade(&["Engine overheats in traffic and at idle"])
            .dtcs(&["P0480"])
            .pid(PidEffect::new("coolant_temp", PidEffectKind::High, "Coolant temperature climbs at idle"))
            .symptom("fan not running", Severity::Obvious)
            .tests(&[
                "Swap fan relay with identical relay",
                "Command fan on with scan tool",
            ])
            .repairs(&["Replace fan relay"])
            .frequency(0.35),
    )?;

    b.add_failure(
        FailureMode::new("coolant_hose_leak", "Coolant Hose Leak", SYSTEM, "coolant_hoses")
            .immediate("Coolant escapes from a cracked or loose hose")
            .cascade(&[
                "Coolant level drops",
                "Air pockets form and the engine overheats",
            ])
            .pid(PidEffect::new("coolant_temp", PidEffectKind::High, "Coolant temperature rises as level drops"))
            .symptom("coolant leak", Severity::Obvious)
            .symptom("low coolant level", Severity::Moderate)
            .tests(&["Pressure test cooling system"])
            .repairs(&["Replace leaking hose and clamps", "Refill and bleed cooling system"])
            .frequency(0.8),
    )?;

    b.add_failure(
        FailureMode::new("radiator_clogged", "Radiator Clogged", SYSTEM, "radiator")
            .immediate("Heat rejection through the radiator core is reduced")
            .cascade(&["Engine runs hot under sustained load"])
            .pid(PidEffect::new("coolant_temp", PidEffectKind::High, "Coolant temperature rises at highway speed"))
            .symptom("overheats under load", Severity::Moderate)
            .tests(&[
                "Infrared temperature scan across radiator core",
                "Pressure test cooling system",
            ])
            .repairs(&["Flush or replace radiator"])
            .frequency(0.3),
    )?;

    b.add_failure(
        FailureMode::new("head_gasket_failure", "Head Gasket Failure", SYSTEM, "head_gasket")
            .immediate("Combustion gas leaks into the cooling system")
            .cascade(&[
                "Coolant is pushed out of the overflow and burned in the cylinder",
                "Engine overheats and misfires",
                "Coolant contaminates engine oil",
            ])
            .dtcs(&["P0217", "P0300"])
            .pid(PidEffect::new("coolant_temp", PidEffectKind::High, "Coolant temperature spikes under load"))
            .symptom("white smoke", Severity::Severe)
            .symptom("misfire", Severity::Moderate)
            .symptom("low coolant level", Severity::Moderate)
            .tests(&[
                "Combustion gas (block) test on coolant",
                "Cylinder leak-down test",
                "Pressure test cooling system",
            ])
            .repairs(&["Replace head gasket", "Resurface cylinder head"])
            .frequency(0.2),
    )?;

    Ok(())
}
