use std::fmt;

/// A material property, always in SI units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Property {
    /// Specific gas constant, J/kg·K.
    R,
    /// Density, kg/m³.
    Rho,
    /// Compressibility `∂ρ/∂p`, s²/m².
    Psi,
    /// Heat capacity at constant pressure, J/kg·K.
    Cp,
    /// Heat capacity at constant volume, J/kg·K.
    Cv,
    /// `Cp − Cv`, J/kg·K.
    CpMCv,
    /// Absolute enthalpy, J/kg.
    Ha,
    /// Sensible enthalpy, J/kg.
    Hs,
    /// Enthalpy of formation, J/kg.
    Hf,
    /// Entropy, J/kg·K.
    S,
    /// Pressure contribution to entropy, J/kg·K.
    Sp,
    /// Sensible internal energy, J/kg.
    Es,
    /// Absolute internal energy, J/kg.
    Ea,
    /// `∂Cp/∂T`, J/kg·K².
    DCpdT,
    /// Temperature, K.
    T,
}

impl Property {
    /// Configuration name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::R => "R",
            Self::Rho => "rho",
            Self::Psi => "psi",
            Self::Cp => "Cp",
            Self::Cv => "Cv",
            Self::CpMCv => "CpMCv",
            Self::Ha => "ha",
            Self::Hs => "hs",
            Self::Hf => "hf",
            Self::S => "s",
            Self::Sp => "sp",
            Self::Es => "es",
            Self::Ea => "ea",
            Self::DCpdT => "dCpdT",
            Self::T => "T",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A property an aggregate needs from another aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    pub property: Property,
    /// Linking fails if a compulsory requirement has no provider.
    pub compulsory: bool,
}

impl Requirement {
    #[must_use]
    pub const fn compulsory(property: Property) -> Self {
        Self {
            property,
            compulsory: true,
        }
    }

    #[must_use]
    pub const fn optional(property: Property) -> Self {
        Self {
            property,
            compulsory: false,
        }
    }
}
