use super::ScanInput;
use crate::policy::PolicyConfig;
use sqlgate_types::Violation;

/// One violation per configured keyword found as a whole word, in policy order.
pub fn run(input: &ScanInput<'_>, policy: &PolicyConfig, out: &mut Vec<Violation>) {
    for keyword in policy.forbidden_keywords() {
        if keyword.is_match(input.text) {
            out.push(Violation::ForbiddenOperation {
                keyword: keyword.keyword().to_string(),
            });
        }
    }
}
