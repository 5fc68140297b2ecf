//! Closed value sets for the `program` and `gender` attributes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Academic program a student is registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Program {
    #[serde(rename = "Applied Physics & Electronics")]
    AppliedPhysicsAndElectronics,
    #[serde(rename = "Anthropology")]
    Anthropology,
    #[serde(rename = "Architecture")]
    Architecture,
    #[serde(rename = "BBA")]
    Bba,
    #[serde(rename = "Biotechnology")]
    Biotechnology,
    #[serde(rename = "Computer Science")]
    ComputerScience,
    #[serde(rename = "Computer Science & Engineering")]
    ComputerScienceAndEngineering,
    #[serde(rename = "Economics")]
    Economics,
    #[serde(rename = "Electrical & Electronic Engineering")]
    ElectricalAndElectronicEngineering,
    #[serde(rename = "Electronics & Communication Engineering")]
    ElectronicsAndCommunicationEngineering,
    #[serde(rename = "English")]
    English,
    #[serde(rename = "LLB")]
    Llb,
    #[serde(rename = "Mathematics")]
    Mathematics,
    #[serde(rename = "Microbiology")]
    Microbiology,
    #[serde(rename = "Pharmacy")]
    Pharmacy,
    #[serde(rename = "Physics")]
    Physics,
    #[serde(rename = "Other")]
    Other,
}

impl Program {
    /// Every program, in the order clients see them documented.
    pub const ALL: [Program; 17] = [
        Program::AppliedPhysicsAndElectronics,
        Program::Anthropology,
        Program::Architecture,
        Program::Bba,
        Program::Biotechnology,
        Program::ComputerScience,
        Program::ComputerScienceAndEngineering,
        Program::Economics,
        Program::ElectricalAndElectronicEngineering,
        Program::ElectronicsAndCommunicationEngineering,
        Program::English,
        Program::Llb,
        Program::Mathematics,
        Program::Microbiology,
        Program::Pharmacy,
        Program::Physics,
        Program::Other,
    ];

    /// Wire name of the program.
    pub fn as_str(&self) -> &'static str {
        match self {
            Program::AppliedPhysicsAndElectronics => "Applied Physics & Electronics",
            Program::Anthropology => "Anthropology",
            Program::Architecture => "Architecture",
            Program::Bba => "BBA",
            Program::Biotechnology => "Biotechnology",
            Program::ComputerScience => "Computer Science",
            Program::ComputerScienceAndEngineering => "Computer Science & Engineering",
            Program::Economics => "Economics",
            Program::ElectricalAndElectronicEngineering => "Electrical & Electronic Engineering",
            Program::ElectronicsAndCommunicationEngineering => {
                "Electronics & Communication Engineering"
            }
            Program::English => "English",
            Program::Llb => "LLB",
            Program::Mathematics => "Mathematics",
            Program::Microbiology => "Microbiology",
            Program::Pharmacy => "Pharmacy",
            Program::Physics => "Physics",
            Program::Other => "Other",
        }
    }

    /// Wire names of all programs.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Program::as_str).collect()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Program {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|program| program.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Gender::as_str).collect()
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|gender| gender.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// A string that names no member of a closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value '{0}'")]
pub struct UnknownVariant(pub String);
