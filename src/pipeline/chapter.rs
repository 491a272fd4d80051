//! Chapter classification: a code's leading letter decides its category.

/// CID-10 chapter groupings used as the table's `category` column.
///
/// Some chapters span several letters (A-B, V-Y). Letters without a chapter
/// (U, and anything malformed) fall back to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chapter {
    Infectious,
    Neoplasms,
    Blood,
    Endocrine,
    Mental,
    Nervous,
    EyeEar,
    Circulatory,
    Respiratory,
    Digestive,
    Skin,
    Musculoskeletal,
    Genitourinary,
    Pregnancy,
    Perinatal,
    Congenital,
    Symptoms,
    Injuries,
    Poisoning,
    ExternalCauses,
    HealthFactors,
    Other,
}

impl Chapter {
    /// Every chapter, `Other` last.
    pub const ALL: [Chapter; 22] = [
        Self::Infectious,
        Self::Neoplasms,
        Self::Blood,
        Self::Endocrine,
        Self::Mental,
        Self::Nervous,
        Self::EyeEar,
        Self::Circulatory,
        Self::Respiratory,
        Self::Digestive,
        Self::Skin,
        Self::Musculoskeletal,
        Self::Genitourinary,
        Self::Pregnancy,
        Self::Perinatal,
        Self::Congenital,
        Self::Symptoms,
        Self::Injuries,
        Self::Poisoning,
        Self::ExternalCauses,
        Self::HealthFactors,
        Self::Other,
    ];

    pub fn from_letter(letter: char) -> Self {
        match letter {
            'A' | 'B' => Self::Infectious,
            'C' => Self::Neoplasms,
            'D' => Self::Blood,
            'E' => Self::Endocrine,
            'F' => Self::Mental,
            'G' => Self::Nervous,
            'H' => Self::EyeEar,
            'I' => Self::Circulatory,
            'J' => Self::Respiratory,
            'K' => Self::Digestive,
            'L' => Self::Skin,
            'M' => Self::Musculoskeletal,
            'N' => Self::Genitourinary,
            'O' => Self::Pregnancy,
            'P' => Self::Perinatal,
            'Q' => Self::Congenital,
            'R' => Self::Symptoms,
            'S' => Self::Injuries,
            'T' => Self::Poisoning,
            'V' | 'W' | 'X' | 'Y' => Self::ExternalCauses,
            'Z' => Self::HealthFactors,
            _ => Self::Other,
        }
    }

    /// Portuguese label shown by the search widget.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Infectious => "Infecciosas e Parasitárias",
            Self::Neoplasms => "Neoplasias",
            Self::Blood => "Sangue e Imunológicas",
            Self::Endocrine => "Endócrinas e Metabólicas",
            Self::Mental => "Transtornos Mentais",
            Self::Nervous => "Sistema Nervoso",
            Self::EyeEar => "Olho/Ouvido",
            Self::Circulatory => "Aparelho Circulatório",
            Self::Respiratory => "Aparelho Respiratório",
            Self::Digestive => "Aparelho Digestivo",
            Self::Skin => "Pele e Tecido Subcutâneo",
            Self::Musculoskeletal => "Sistema Osteomuscular",
            Self::Genitourinary => "Aparelho Geniturinário",
            Self::Pregnancy => "Gravidez e Parto",
            Self::Perinatal => "Período Perinatal",
            Self::Congenital => "Malformações Congênitas",
            Self::Symptoms => "Sintomas e Sinais",
            Self::Injuries => "Lesões e Traumatismos",
            Self::Poisoning => "Lesões e Envenenamentos",
            Self::ExternalCauses => "Causas Externas",
            Self::HealthFactors => "Fatores de Saúde",
            Self::Other => "Outros",
        }
    }

    pub fn is_known_label(label: &str) -> bool {
        Self::ALL.iter().any(|c| c.label() == label)
    }
}

impl std::fmt::Display for Chapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a code by its first character. Total: never fails.
pub fn classify(code: &str) -> Chapter {
    code.chars().next().map_or(Chapter::Other, Chapter::from_letter)
}
