//! Fixed DTC → evidence token table.

/// Canonical token for a small set of well-understood codes.
/// Unknown codes produce no evidence.
pub fn dtc_to_evidence(code: &str) -> Option<&'static str> {
    let code = normalize_dtc(code)?;
    let token = match code.as_str() {
        "P0217" | "P0118" => "coolant_temp_high",
        "P0128" => "coolant_temp_low",
        "P0480" | "P0481" => "fan_not_running",
        "P0524" | "P0521" => "oil_pressure_low",
        "P0562" => "voltage_low",
        "P0563" => "voltage_high",
        "P0300" => "misfire",
        _ => {
            tracing::debug!(code = %code, "no evidence mapping for DTC");
            return None;
        }
    };
    Some(token)
}

/// Trim and upper-case a DTC. Empty or non-alphanumeric input is rejected.
pub fn normalize_dtc(code: &str) -> Option<String> {
    let code = code.trim();
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(code.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_ignores_case_and_whitespace() {
        assert_eq!(dtc_to_evidence(" p0217 "), Some("coolant_temp_high"));
    }

    #[test]
    fn malformed_codes_are_rejected() {
        assert_eq!(normalize_dtc(""), None);
        assert_eq!(normalize_dtc("P02-17"), None);
        assert_eq!(normalize_dtc("b1234").as_deref(), Some("B1234"));
    }
}
