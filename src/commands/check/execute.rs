use std::error::Error;

use super::CheckCmd;
use crate::commands::Execute;
use crate::db::DatabaseBackend;
use crate::store::{check_integrity, IntegrityReport};

impl Execute for CheckCmd {
    type Output = IntegrityReport;

    fn execute(self, db: &dyn DatabaseBackend) -> Result<Self::Output, Box<dyn Error>> {
        check_integrity(db)
    }
}
