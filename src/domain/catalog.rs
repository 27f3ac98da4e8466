//! Static option lists offered by the prompt form.

use std::fmt;
use std::str::FromStr;

use crate::domain::AppError;

/// Area of Mexican law the prompt is framed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LegalArea {
    #[default]
    Familiar,
    Civil,
    Penal,
    Administrativo,
    Mercantil,
    Amparo,
    Laboral,
    Tributario,
    Constitucional,
}

impl LegalArea {
    /// All areas in presentation order.
    pub const ALL: [LegalArea; 9] = [
        LegalArea::Familiar,
        LegalArea::Civil,
        LegalArea::Penal,
        LegalArea::Administrativo,
        LegalArea::Mercantil,
        LegalArea::Amparo,
        LegalArea::Laboral,
        LegalArea::Tributario,
        LegalArea::Constitucional,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LegalArea::Familiar => "Familiar",
            LegalArea::Civil => "Civil",
            LegalArea::Penal => "Penal",
            LegalArea::Administrativo => "Administrativo",
            LegalArea::Mercantil => "Mercantil",
            LegalArea::Amparo => "Amparo",
            LegalArea::Laboral => "Laboral",
            LegalArea::Tributario => "Tributario",
            LegalArea::Constitucional => "Constitucional",
        }
    }

    /// Role text suggested when this area is selected.
    pub fn default_role(&self) -> String {
        format!("Actúa como un abogado especialista en {}", self.label())
    }
}

/// Tone the generated answer should adopt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tone {
    #[default]
    Formal,
    Persuasivo,
    Informativo,
    Conciliador,
    FirmeYEnergico,
    Academico,
}

impl Tone {
    pub const ALL: [Tone; 6] = [
        Tone::Formal,
        Tone::Persuasivo,
        Tone::Informativo,
        Tone::Conciliador,
        Tone::FirmeYEnergico,
        Tone::Academico,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tone::Formal => "Formal",
            Tone::Persuasivo => "Persuasivo",
            Tone::Informativo => "Informativo",
            Tone::Conciliador => "Conciliador",
            Tone::FirmeYEnergico => "Firme y enérgico",
            Tone::Academico => "Académico",
        }
    }

    fn slug(&self) -> &'static str {
        match self {
            Tone::Formal => "formal",
            Tone::Persuasivo => "persuasivo",
            Tone::Informativo => "informativo",
            Tone::Conciliador => "conciliador",
            Tone::FirmeYEnergico => "firme-y-energico",
            Tone::Academico => "academico",
        }
    }
}

/// Language register of the generated answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Register {
    #[default]
    TecnicoJuridico,
    ClaroYSencillo,
    Coloquial,
    Forense,
}

impl Register {
    pub const ALL: [Register; 4] = [
        Register::TecnicoJuridico,
        Register::ClaroYSencillo,
        Register::Coloquial,
        Register::Forense,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Register::TecnicoJuridico => "Técnico-jurídico",
            Register::ClaroYSencillo => "Claro y sencillo (para clientes)",
            Register::Coloquial => "Lenguaje coloquial",
            Register::Forense => "Estilo forense",
        }
    }

    fn slug(&self) -> &'static str {
        match self {
            Register::TecnicoJuridico => "tecnico-juridico",
            Register::ClaroYSencillo => "claro-y-sencillo",
            Register::Coloquial => "coloquial",
            Register::Forense => "forense",
        }
    }
}

fn parse_option<T: Copy>(
    kind: &'static str,
    value: &str,
    all: &[T],
    label: fn(&T) -> &'static str,
    slug: fn(&T) -> &'static str,
) -> Result<T, AppError> {
    let wanted = value.trim().to_lowercase();
    all.iter()
        .find(|option| label(option).to_lowercase() == wanted || slug(option) == wanted)
        .copied()
        .ok_or_else(|| AppError::UnknownOption {
            kind,
            value: value.to_string(),
            available: all.iter().map(label).collect::<Vec<_>>().join(", "),
        })
}

impl FromStr for LegalArea {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Area labels are already ASCII, so the label doubles as the slug.
        parse_option("legal area", s, &LegalArea::ALL, LegalArea::label, LegalArea::label)
    }
}

impl FromStr for Tone {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option("tone", s, &Tone::ALL, Tone::label, Tone::slug)
    }
}

impl FromStr for Register {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option("language register", s, &Register::ALL, Register::label, Register::slug)
    }
}

impl fmt::Display for LegalArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
