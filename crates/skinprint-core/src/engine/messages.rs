/// Builders for the user-facing reason strings attached to analysis results.
///
/// The wording is part of the library's observable output; front ends display it verbatim.
pub struct MessageTemplates;

impl MessageTemplates {
    pub const UNKNOWN_INGREDIENTS: &'static str = "Unknown ingredients";
    pub const COMPATIBLE: &'static str = "Compatible ingredients";
    pub const SENSITIVITY: &'static str =
        "You have marked this ingredient as causing sensitivity or allergies";

    /// CONFLICT message. `carrier` is the ingredient whose conflict list names `other`.
    pub fn conflict(carrier: &str, other: &str) -> String {
        format!(
            "{} should not be used with {}. \
             {} may reduce the efficacy of {} or cause irritation.",
            carrier, other, carrier, other,
        )
    }

    /// DISCOVERY event for the fingerprint timeline.
    pub fn discovery(ingredient: &str) -> String {
        format!("Discovered {} works for your skin", ingredient)
    }

    /// CONFIDENCE event for the fingerprint timeline.
    pub fn confidence_increase(ingredient: &str) -> String {
        format!("{} confidence increased significantly", ingredient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_names_carrier_first() {
        assert_eq!(
            MessageTemplates::conflict("Retinol", "Vitamin E"),
            "Retinol should not be used with Vitamin E. \
             Retinol may reduce the efficacy of Vitamin E or cause irritation."
        );
    }

    #[test]
    fn no_alarm_wording() {
        let msg = MessageTemplates::conflict("A", "B");
        assert!(!msg.contains('!'));
        assert!(!MessageTemplates::SENSITIVITY.contains('!'));
    }
}
