//! Brazilian federative units and the name lookup table used to spot them in
//! free-text geocoder output.

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::StateMatching;
use crate::normalize::{contains_word, fold, strip_country_suffix};
use crate::segments::AddressParts;

/// One of the 26 states plus the Federal District.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FederativeUnit {
    Acre,
    Alagoas,
    Amapa,
    Amazonas,
    Bahia,
    Ceara,
    DistritoFederal,
    EspiritoSanto,
    Goias,
    Maranhao,
    MatoGrosso,
    MatoGrossoDoSul,
    MinasGerais,
    Para,
    Paraiba,
    Parana,
    Pernambuco,
    Piaui,
    RioDeJaneiro,
    RioGrandeDoNorte,
    RioGrandeDoSul,
    Rondonia,
    Roraima,
    SantaCatarina,
    SaoPaulo,
    Sergipe,
    Tocantins,
}

impl FederativeUnit {
    pub const ALL: [FederativeUnit; 27] = [
        Self::Acre,
        Self::Alagoas,
        Self::Amapa,
        Self::Amazonas,
        Self::Bahia,
        Self::Ceara,
        Self::DistritoFederal,
        Self::EspiritoSanto,
        Self::Goias,
        Self::Maranhao,
        Self::MatoGrosso,
        Self::MatoGrossoDoSul,
        Self::MinasGerais,
        Self::Para,
        Self::Paraiba,
        Self::Parana,
        Self::Pernambuco,
        Self::Piaui,
        Self::RioDeJaneiro,
        Self::RioGrandeDoNorte,
        Self::RioGrandeDoSul,
        Self::Rondonia,
        Self::Roraima,
        Self::SantaCatarina,
        Self::SaoPaulo,
        Self::Sergipe,
        Self::Tocantins,
    ];

    /// Two-letter abbreviation ("SP").
    pub fn code(&self) -> &'static str {
        match self {
            Self::Acre => "AC",
            Self::Alagoas => "AL",
            Self::Amapa => "AP",
            Self::Amazonas => "AM",
            Self::Bahia => "BA",
            Self::Ceara => "CE",
            Self::DistritoFederal => "DF",
            Self::EspiritoSanto => "ES",
            Self::Goias => "GO",
            Self::Maranhao => "MA",
            Self::MatoGrosso => "MT",
            Self::MatoGrossoDoSul => "MS",
            Self::MinasGerais => "MG",
            Self::Para => "PA",
            Self::Paraiba => "PB",
            Self::Parana => "PR",
            Self::Pernambuco => "PE",
            Self::Piaui => "PI",
            Self::RioDeJaneiro => "RJ",
            Self::RioGrandeDoNorte => "RN",
            Self::RioGrandeDoSul => "RS",
            Self::Rondonia => "RO",
            Self::Roraima => "RR",
            Self::SantaCatarina => "SC",
            Self::SaoPaulo => "SP",
            Self::Sergipe => "SE",
            Self::Tocantins => "TO",
        }
    }

    /// Official name with diacritics ("São Paulo").
    pub fn name(&self) -> &'static str {
        match self {
            Self::Acre => "Acre",
            Self::Alagoas => "Alagoas",
            Self::Amapa => "Amapá",
            Self::Amazonas => "Amazonas",
            Self::Bahia => "Bahia",
            Self::Ceara => "Ceará",
            Self::DistritoFederal => "Distrito Federal",
            Self::EspiritoSanto => "Espírito Santo",
            Self::Goias => "Goiás",
            Self::Maranhao => "Maranhão",
            Self::MatoGrosso => "Mato Grosso",
            Self::MatoGrossoDoSul => "Mato Grosso do Sul",
            Self::MinasGerais => "Minas Gerais",
            Self::Para => "Pará",
            Self::Paraiba => "Paraíba",
            Self::Parana => "Paraná",
            Self::Pernambuco => "Pernambuco",
            Self::Piaui => "Piauí",
            Self::RioDeJaneiro => "Rio de Janeiro",
            Self::RioGrandeDoNorte => "Rio Grande do Norte",
            Self::RioGrandeDoSul => "Rio Grande do Sul",
            Self::Rondonia => "Rondônia",
            Self::Roraima => "Roraima",
            Self::SantaCatarina => "Santa Catarina",
            Self::SaoPaulo => "São Paulo",
            Self::Sergipe => "Sergipe",
            Self::Tocantins => "Tocantins",
        }
    }

    /// Look up by two-letter code, case-insensitive.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL.into_iter().find(|uf| uf.code().eq_ignore_ascii_case(code))
    }

    /// Resolve a code or a full name (with or without diacritics).
    pub fn resolve(value: &str) -> Option<Self> {
        if let Some(uf) = Self::from_code(value) {
            return Some(uf);
        }
        let folded = fold(value.trim());
        STATE_KEYS
            .iter()
            .find(|(key, _)| *key == folded)
            .map(|(_, uf)| *uf)
    }
}

impl fmt::Display for FederativeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for FederativeUnit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for FederativeUnit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::resolve(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown federative unit: {raw}")))
    }
}

// ---------------------------------------------------------------------------
// Lookup table
// ---------------------------------------------------------------------------

/// Lowercase state names, accented and ASCII spellings.
const STATE_NAMES: &[(&str, FederativeUnit)] = &[
    ("acre", FederativeUnit::Acre),
    ("alagoas", FederativeUnit::Alagoas),
    ("amapá", FederativeUnit::Amapa),
    ("amapa", FederativeUnit::Amapa),
    ("amazonas", FederativeUnit::Amazonas),
    ("bahia", FederativeUnit::Bahia),
    ("ceará", FederativeUnit::Ceara),
    ("ceara", FederativeUnit::Ceara),
    ("distrito federal", FederativeUnit::DistritoFederal),
    ("espírito santo", FederativeUnit::EspiritoSanto),
    ("espirito santo", FederativeUnit::EspiritoSanto),
    ("goiás", FederativeUnit::Goias),
    ("goias", FederativeUnit::Goias),
    ("maranhão", FederativeUnit::Maranhao),
    ("maranhao", FederativeUnit::Maranhao),
    ("mato grosso", FederativeUnit::MatoGrosso),
    ("mato grosso do sul", FederativeUnit::MatoGrossoDoSul),
    ("minas gerais", FederativeUnit::MinasGerais),
    ("pará", FederativeUnit::Para),
    ("para", FederativeUnit::Para),
    ("paraíba", FederativeUnit::Paraiba),
    ("paraiba", FederativeUnit::Paraiba),
    ("paraná", FederativeUnit::Parana),
    ("parana", FederativeUnit::Parana),
    ("pernambuco", FederativeUnit::Pernambuco),
    ("piauí", FederativeUnit::Piaui),
    ("piaui", FederativeUnit::Piaui),
    ("rio de janeiro", FederativeUnit::RioDeJaneiro),
    ("rio grande do norte", FederativeUnit::RioGrandeDoNorte),
    ("rio grande do sul", FederativeUnit::RioGrandeDoSul),
    ("rondônia", FederativeUnit::Rondonia),
    ("rondonia", FederativeUnit::Rondonia),
    ("roraima", FederativeUnit::Roraima),
    ("santa catarina", FederativeUnit::SantaCatarina),
    ("são paulo", FederativeUnit::SaoPaulo),
    ("sao paulo", FederativeUnit::SaoPaulo),
    ("sergipe", FederativeUnit::Sergipe),
    ("tocantins", FederativeUnit::Tocantins),
];

/// Folded, deduplicated keys, longest first so "mato grosso do sul" is tried
/// before "mato grosso" and "parana" before "para".
static STATE_KEYS: Lazy<Vec<(String, FederativeUnit)>> = Lazy::new(|| {
    let mut keys: Vec<(String, FederativeUnit)> = Vec::new();
    for (name, uf) in STATE_NAMES {
        let key = fold(name);
        if !keys.iter().any(|(k, _)| *k == key) {
            keys.push((key, *uf));
        }
    }
    keys.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
    keys
});

/// Find a state named inside one folded text fragment.
pub fn find_in_text(folded: &str, matching: StateMatching) -> Option<FederativeUnit> {
    STATE_KEYS
        .iter()
        .find(|(key, _)| match matching {
            StateMatching::Word => contains_word(folded, key),
            StateMatching::Substring => folded.contains(key.as_str()),
        })
        .map(|(_, uf)| *uf)
}

/// Scan segments in order; the first one naming a state wins.
///
/// Returns the unit and the index of the segment it was found in.
pub fn find_in_segments(
    parts: &AddressParts,
    countries: &[String],
    matching: StateMatching,
) -> Option<(FederativeUnit, usize)> {
    parts.iter().enumerate().find_map(|(idx, segment)| {
        let folded = strip_country_suffix(segment, countries);
        find_in_text(&folded, matching).map(|uf| (uf, idx))
    })
}

/// True when any whitespace/punctuation token of folded text is a state code.
pub fn mentions_code(folded: &str) -> bool {
    crate::normalize::tokens(folded)
        .any(|t| t.len() == 2 && FederativeUnit::from_code(t).is_some())
}
