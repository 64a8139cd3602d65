use torque_core::TorqueResult;

use crate::model::{ComponentDef, FailureMode, PidEffect, PidEffectKind, Severity, SystemDef};
use crate::registry::KnowledgeBaseBuilder;

const SYSTEM: &str = "engine_management";

pub(super) fn register(b: &mut KnowledgeBaseBuilder) -> TorqueResult<()> {
    b.add_system(SystemDef::new(
        SYSTEM,
        "Engine Management",
        "Ignition, air metering, fuel control, and engine sensors",
    ))?;
    b.add_component(ComponentDef::new("ignition_coil", "Ignition Coil", SYSTEM))?
        .add_component(ComponentDef::new("intake", "Intake and Vacuum Lines", SYSTEM))?
        .add_component(ComponentDef::new("maf_sensor", "Mass Airflow Sensor", SYSTEM))?
        .add_component(ComponentDef::new("ect_sensor", "Coolant Temperature Sensor", SYSTEM))?;

    b.add_failure(
        FailureMode::new("ignition_coil_failure", "Ignition Coil Failure", SYSTEM, "ignition_coil")
            .immediate("One cylinder loses spark under load")
            .cascade(&[
                "Unburned fuel overheats the catalytic converter",
                "Check engine light flashes",
            ])
            .dtcs(&["P0300", "P0301"])
            .symptom("misfire", Severity::Obvious)
            .symptom("rough idle", Severity::Moderate)
            .symptom("hesitation", Severity::Moderate)
            .tests(&[
                "Swap ignition coil to another cylinder",
                "Check spark with spark tester",
            ])
            .repairs(&["Replace ignition coil", "Replace spark plug"])
            .frequency(0.6),
    )?;

    b.add_failure(
        FailureMode::new("vacuum_leak", "Intake Vacuum Leak", SYSTEM, "intake")
            .immediate("Unmetered air enters the intake manifold")
            .cascade(&["Mixture runs lean at idle", "Idle speed hunts"])
            .dtcs(&["P0171", "P0174"])
            .pid(PidEffect::new("fuel_trim", PidEffectKind::High, "Long-term fuel trim above +15% at idle"))
            .symptom("rough idle", Severity::Moderate)
            .symptom("hesitation", Severity::Subtle)
            .symptom("stalling", Severity::Moderate)
            .tests(&[
                "Smoke test intake manifold",
                "Check fuel trims at idle and 2500 rpm",
            ])
            .repairs(&["Replace cracked vacuum hose", "Replace intake manifold gasket"])
            .frequency(0.5),
    )?;

    b.add_failure(
        FailureMode::new("maf_sensor_contaminated", "Contaminated MAF Sensor", SYSTEM, "maf_sensor")
            .immediate("Airflow is under-reported to the engine computer")
            .cascade(&["Mixture runs lean under load", "Transmission shift quality suffers"])
            .dtcs(&["P0101", "P0171"])
            .pid(PidEffect::new("maf", PidEffectKind::Low, "Airflow reading low for engine speed"))
            .symptom("hesitation", Severity::Obvious)
            .symptom("poor fuel economy", Severity::Subtle)
            .symptom("stalling", Severity::Subtle)
            .tests(&[
                "Check fuel trims at idle and 2500 rpm",
                "Compare MAF grams per second to engine displacement",
            ])
            .repairs(&["Clean MAF sensor", "Replace MAF sensor"])
            .frequency(0.45),
    )?;

    b.add_failure(
        FailureMode::new("ect_sensor_failure", "Coolant Temperature Sensor Failure", SYSTEM, "ect_sensor")
            .immediate("Engine computer receives a false coolant temperature")
            .cascade(&[
                "Fan control and fuel enrichment follow the false reading",
                "Temperature gauge swings without a real temperature change",
            ])
            .dtcs(&["P0118", "P0117", "P0128"])
            .pid(PidEffect::new("coolant_temp", PidEffectKind::Erratic, "Coolant temperature reading jumps or reads -40 C"))
            .symptom("poor fuel economy", Severity::Subtle)
            .tests(&[
                "Compare ECT reading with infrared thermometer",
                "Check ECT sensor resistance against temperature chart",
            ])
            .repairs(&["Replace coolant temperature sensor"])
            .frequency(0.3),
    )?;

    Ok(())
}
