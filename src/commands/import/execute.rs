use std::error::Error;

use super::ImportCmd;
use crate::commands::Execute;
use crate::db::schema::migrations::run_migrations;
use crate::db::DatabaseBackend;
use crate::store::import::{clear_all, import_dataset, Dataset, ImportResult};

impl Execute for ImportCmd {
    type Output = ImportResult;

    fn execute(self, db: &dyn DatabaseBackend) -> Result<Self::Output, Box<dyn Error>> {
        let dataset = Dataset::from_file(&self.file)?;

        run_migrations(db)?;

        if self.clear {
            clear_all(db)?;
        }

        let mut result = import_dataset(db, dataset)?;
        result.cleared = self.clear;
        Ok(result)
    }
}
