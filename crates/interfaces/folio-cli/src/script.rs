//! Replay script steps, one per command-line argument.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use folio_core::route::parse_id_token;
use folio_core::{BrochureId, SubRoute, TopTab};

use crate::CliTab;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Tab(TopTab),
    Select(Option<BrochureId>),
    Menu(String),
    Sub(SubRoute),
    Back,
    Forward,
    Mount,
    Unmount,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StepParseError {
    #[error("unknown step '{0}'")]
    UnknownStep(String),
    #[error("step '{0}' needs an argument")]
    MissingArgument(String),
    #[error("unknown tab '{0}' (expected brochures or audit)")]
    UnknownTab(String),
    #[error("unknown sub-route '{0}'")]
    UnknownSubRoute(String),
    #[error("invalid brochure id '{0}'")]
    InvalidId(String),
}

impl FromStr for Step {
    type Err = StepParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (s, None),
        };

        match name {
            "back" => Ok(Step::Back),
            "forward" => Ok(Step::Forward),
            "mount" => Ok(Step::Mount),
            "unmount" => Ok(Step::Unmount),
            "tab" => {
                let arg = required(name, arg)?;
                <CliTab as ValueEnum>::from_str(arg, true)
                    .map(|t| Step::Tab(t.into()))
                    .map_err(|_| StepParseError::UnknownTab(arg.to_string()))
            }
            "select" => {
                let arg = required(name, arg)?;
                // "undefined" is a legal selection that resolves to no brochure.
                match parse_id_token(arg) {
                    Some(id) => Ok(Step::Select(Some(id))),
                    None if arg == "undefined" => Ok(Step::Select(None)),
                    None => Err(StepParseError::InvalidId(arg.to_string())),
                }
            }
            "menu" => Ok(Step::Menu(required(name, arg)?.to_string())),
            "sub" => {
                let arg = required(name, arg)?;
                SubRoute::from_link(arg)
                    .or_else(|| SubRoute::from_key(arg).filter(|s| !s.is_none()))
                    .map(Step::Sub)
                    .ok_or_else(|| StepParseError::UnknownSubRoute(arg.to_string()))
            }
            _ => Err(StepParseError::UnknownStep(s.to_string())),
        }
    }
}

fn required<'a>(name: &str, arg: Option<&'a str>) -> Result<&'a str, StepParseError> {
    arg.filter(|a| !a.is_empty())
        .ok_or_else(|| StepParseError::MissingArgument(name.to_string()))
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Tab(tab) => write!(f, "tab:{}", tab.label().to_lowercase()),
            Step::Select(Some(id)) => write!(f, "select:{id}"),
            Step::Select(None) => write!(f, "select:undefined"),
            Step::Menu(key) => write!(f, "menu:{key}"),
            Step::Sub(sub) => write!(f, "sub:{}", sub.link().unwrap_or_default()),
            Step::Back => write!(f, "back"),
            Step::Forward => write!(f, "forward"),
            Step::Mount => write!(f, "mount"),
            Step::Unmount => write!(f, "unmount"),
        }
    }
}
