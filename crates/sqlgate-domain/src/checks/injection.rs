use super::ScanInput;
use crate::policy::PolicyConfig;
use sqlgate_types::Violation;

pub fn run(input: &ScanInput<'_>, policy: &PolicyConfig, out: &mut Vec<Violation>) {
    for pattern in policy.injection_patterns() {
        if pattern.is_match(input.text) {
            out.push(Violation::InjectionPattern {
                pattern_id: pattern.id().to_string(),
            });
        }
    }
}
