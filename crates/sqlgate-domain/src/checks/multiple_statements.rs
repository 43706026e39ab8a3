use super::ScanInput;
use crate::policy::PolicyConfig;
use sqlgate_types::Violation;

/// Splits on every `;`, quoted or not. A single trailing terminator is fine.
pub fn run(input: &ScanInput<'_>, _policy: &PolicyConfig, out: &mut Vec<Violation>) {
    let statements = input
        .text
        .split(';')
        .filter(|segment| !segment.trim().is_empty())
        .count();
    if statements > 1 {
        out.push(Violation::MultipleStatements);
    }
}
