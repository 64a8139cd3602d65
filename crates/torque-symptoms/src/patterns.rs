//! Canonical symptom definitions: keywords, exact phrases, and negation terms.

use serde::{Deserialize, Serialize};

/// Authored rule set for one canonical symptom key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomPattern {
    /// Canonical evidence token, e.g. `coolant_temp_high`.
    pub key: String,
    /// Whole-word terms; each distinct hit adds to the score.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Substrings worth a fixed bonus when any one appears.
    #[serde(default)]
    pub phrases: Vec<String>,
    /// Substrings that veto this symptom outright.
    #[serde(default)]
    pub negations: Vec<String>,
}

impl SymptomPattern {
    pub fn new(key: &str, keywords: &[&str], phrases: &[&str], negations: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            phrases: phrases.iter().map(|s| s.to_string()).collect(),
            negations: negations.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// The built-in canonical symptom set, in registration order.
///
/// Keys line up with the tokens produced by DTC and sensor mapping and with
/// the observation keys derived from the built-in knowledge catalog.
pub fn default_patterns() -> Vec<SymptomPattern> {
    vec![
        // ── Temperature ────────────────────────────────────────────────────
        SymptomPattern::new(
            "coolant_temp_high",
            &["overheating", "overheat", "overheats", "overheated", "hot", "boiling", "temperature", "temp"],
            &["overheating", "running hot", "temp gauge high", "temperature gauge high", "gauge in the red", "engine hot"],
            &["no heat", "not overheating", "never overheats", "running cold"],
        ),
        SymptomPattern::new(
            "coolant_temp_low",
            &["cold", "heat", "heater", "lukewarm", "warm"],
            &["no heat", "running cold", "heater blows cold", "never warms up", "takes forever to warm up", "temp gauge low"],
            &["overheating", "running hot"],
        ),
        SymptomPattern::new(
            "coolant_temp_erratic",
            &["fluctuates", "fluctuating", "erratic", "bouncing", "jumps"],
            &["temp gauge fluctuates", "temperature goes up and down", "gauge jumps around"],
            &[],
        ),
        SymptomPattern::new(
            "fan_not_running",
            &["fan", "spinning"],
            &["fan not running", "fan doesn't turn on", "fan does not turn on", "fan won't turn on", "fan not spinning", "fan not working", "fan never comes on"],
            &["fan running constantly", "fan always on", "fan runs all the time"],
        ),
        // ── Fluids ─────────────────────────────────────────────────────────
        SymptomPattern::new(
            "coolant_leak",
            &["leak", "leaking", "puddle", "antifreeze", "drip", "dripping"],
            &["coolant leak", "leaking coolant", "green puddle", "sweet smell", "losing coolant"],
            &["no leak", "not leaking"],
        ),
        SymptomPattern::new(
            "low_coolant_level",
            &["coolant", "reservoir", "topping"],
            &["low coolant", "coolant low", "keep adding coolant", "reservoir empty"],
            &[],
        ),
        SymptomPattern::new(
            "white_smoke",
            &["smoke", "white", "exhaust"],
            &["white smoke", "steam from exhaust", "white exhaust"],
            &["no smoke"],
        ),
        SymptomPattern::new(
            "oil_pressure_low",
            &["oil", "pressure"],
            &["oil pressure light", "low oil pressure", "oil light on", "oil warning"],
            &[],
        ),
        // ── Mechanical ─────────────────────────────────────────────────────
        SymptomPattern::new(
            "engine_knock",
            &["knock", "knocking", "ticking", "tapping", "rattle"],
            &["engine knocking", "ticking noise", "knocking noise", "lifter tick"],
            &[],
        ),
        SymptomPattern::new(
            "whining_noise",
            &["whine", "whining", "squeal", "squealing"],
            &["whining noise", "high pitched whine", "squealing belt"],
            &[],
        ),
        // ── Electrical ─────────────────────────────────────────────────────
        SymptomPattern::new(
            "voltage_low",
            &["battery", "dim", "weak", "charging", "voltage"],
            &["battery light", "dim headlights", "slow crank", "battery keeps dying", "battery warning light"],
            &[],
        ),
        SymptomPattern::new(
            "no_start",
            &["start", "crank", "dead"],
            &["won't start", "wont start", "does not start", "doesn't start", "no start", "will not start"],
            &["starts fine", "starts ok", "starts normally"],
        ),
        // ── Driveability ───────────────────────────────────────────────────
        SymptomPattern::new(
            "hesitation",
            &["hesitates", "hesitation", "hesitating", "stumble", "stumbles", "bogs", "sluggish"],
            &["hesitates when accelerating", "hesitates when i accelerate", "loss of power", "lack of power", "stumbles on acceleration"],
            &[],
        ),
        SymptomPattern::new(
            "rough_idle",
            &["rough", "idle", "shaking", "shakes", "vibration", "shudder"],
            &["rough idle", "idles rough", "shakes at idle", "shaking at idle", "running rough"],
            &["smooth idle"],
        ),
        SymptomPattern::new(
            "misfire",
            &["misfire", "misfiring", "misfires", "sputter", "sputtering", "jerking"],
            &["engine misfire", "cylinder misfire", "flashing check engine"],
            &[],
        ),
        SymptomPattern::new(
            "stalling",
            &["stall", "stalls", "stalling", "dies"],
            &["stalls at idle", "dies at stop", "engine dies", "cuts out"],
            &["never stalls", "doesn't stall"],
        ),
        SymptomPattern::new(
            "poor_fuel_economy",
            &["mileage", "mpg", "economy", "guzzling"],
            &["bad gas mileage", "poor fuel economy", "using more fuel", "burning more gas", "bad mileage"],
            &[],
        ),
        SymptomPattern::new(
            "check_engine_light",
            &["cel", "mil"],
            &["check engine light", "engine light on", "service engine soon"],
            &[],
        ),
    ]
}
