//! Test helpers for writing CSV workspaces and scripting the solver.

use camino::{Utf8Path, Utf8PathBuf};
use roadie_core::SolverAdapter;
use roadie_core::test_support::{ScriptedSolver, two_city_tables};
use std::fs;
use tempfile::TempDir;

use crate::CliError;
use crate::solve::{SolveConfig, SolverBuilder};

pub(super) const TWO_CITY_CITIES: &str = "city,country\nHome,Here\nAway,There\n";
pub(super) const TWO_CITY_PROFITS: &str = "date,city,profit,country\n02-01-2024,Away,500,There\n";
pub(super) const TWO_CITY_COSTS: &str = ",Home,Away\nHome,0,100\nAway,100,0\n";

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directories");
    }
    fs::write(path, contents).expect("write file");
}

/// Temporary directory holding the two-city tables under their default
/// file names.
pub(super) struct TwoCityWorkspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl TwoCityWorkspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        write_utf8(&root.join("cities.csv"), TWO_CITY_CITIES.as_bytes());
        write_utf8(&root.join("sample_data.csv"), TWO_CITY_PROFITS.as_bytes());
        write_utf8(
            &root.join("transportation_costs.csv"),
            TWO_CITY_COSTS.as_bytes(),
        );
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }
}

/// Builds a solver that answers with a fixed path through the two-city
/// model for the configured horizon.
#[derive(Debug)]
pub(super) struct ScriptedSolverBuilder {
    pub(super) path: Vec<&'static str>,
}

impl SolverBuilder for ScriptedSolverBuilder {
    fn build(&self, config: &SolveConfig) -> Result<Box<dyn SolverAdapter>, CliError> {
        let tables = two_city_tables(config.calendar.horizon_days())?;
        let solver = ScriptedSolver::path(&tables, &self.path)?;
        Ok(Box::new(solver))
    }
}
