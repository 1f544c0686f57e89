pub mod commands;
pub mod script;

use clap::ValueEnum;

pub use script::{Step, StepParseError};

#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum CliTab {
    Brochures,
    Audit,
}

impl From<CliTab> for folio_core::TopTab {
    fn from(t: CliTab) -> Self {
        match t {
            CliTab::Brochures => folio_core::TopTab::Brochures,
            CliTab::Audit => folio_core::TopTab::Audit,
        }
    }
}
