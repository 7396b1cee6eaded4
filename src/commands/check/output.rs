//! Output formatting for integrity reports.

use crate::output::Outputable;
use crate::store::IntegrityReport;

impl Outputable for IntegrityReport {
    fn to_table(&self) -> String {
        let mut output = String::from("Integrity Check\n\n");

        if self.is_clean() {
            output.push_str("No integrity issues found.\n");
            return output;
        }

        if !self.orphaned.is_empty() {
            output.push_str(&format!("Orphaned foreign keys ({}):\n", self.orphaned.len()));
            for o in &self.orphaned {
                output.push_str(&format!(
                    "  ✗ {} #{}: {} = {} (no such {})\n",
                    o.relation, o.id, o.field, o.value, o.target
                ));
            }
        }

        if !self.invalid_values.is_empty() {
            output.push_str(&format!("Invalid values ({}):\n", self.invalid_values.len()));
            for v in &self.invalid_values {
                output.push_str(&format!("  ✗ {} #{}: {} = '{}'\n", v.relation, v.id, v.field, v.value));
            }
        }

        if !self.duplicate_follows.is_empty() {
            output.push_str(&format!("Duplicate follows ({}):\n", self.duplicate_follows.len()));
            for d in &self.duplicate_follows {
                let ids: Vec<String> = d.follower_ids.iter().map(|id| format!("#{}", id)).collect();
                output.push_str(&format!(
                    "  ! user #{} → user #{} recorded as {}\n",
                    d.user_from_id,
                    d.user_to_id,
                    ids.join(", ")
                ));
            }
        }

        if !self.self_follows.is_empty() {
            output.push_str(&format!("Self follows ({}):\n", self.self_follows.len()));
            for f in &self.self_follows {
                output.push_str(&format!("  ! follower #{}: user #{}\n", f.id, f.user_from_id));
            }
        }

        if self.is_consistent() {
            output.push_str("\nNo constraint violations.\n");
        }

        output
    }
}
