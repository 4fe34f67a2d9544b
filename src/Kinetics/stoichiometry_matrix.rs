use crate::Utils::table::stoich_table;
use crate::settings::ParserSettings;
use log::{debug, error, info};
use nalgebra::DMatrix;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

static COEFFICIENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+)?$").expect("coefficient pattern"));
static SPECIES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("species pattern"));

#[derive(Debug, Error)]
pub enum StoichError {
    #[error("reaction '{reaction}' must contain exactly one arrow, found {found}")]
    ArrowCount { reaction: String, found: usize },
    #[error("reaction '{reaction}' has no terms on the {side} side")]
    EmptySide { reaction: String, side: Side },
    #[error("reaction '{reaction}' contains an empty term")]
    EmptyTerm { reaction: String },
    #[error("invalid coefficient in term '{term}'")]
    InvalidCoefficient { term: String },
    #[error("invalid species name in term '{term}'")]
    InvalidSpecies { term: String },
    #[error("no reactions given")]
    NoReactions,
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings parsing error: {0}")]
    Config(#[from] serde_json::Error),
}

impl StoichError {
    /// True for errors caused by a malformed reaction string.
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self,
            StoichError::ArrowCount { .. }
                | StoichError::EmptySide { .. }
                | StoichError::EmptyTerm { .. }
                | StoichError::InvalidCoefficient { .. }
                | StoichError::InvalidSpecies { .. }
        )
    }
}

/// Side of the reaction arrow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Reactants,
    Products,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Reactants => write!(f, "reactant"),
            Side::Products => write!(f, "product"),
        }
    }
}

/// coefficient-species pair, e.g. "1.5*C"
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionTerm {
    pub coefficient: f64,
    pub species: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReaction {
    pub equation: String,
    pub reactants: Vec<ReactionTerm>,
    pub products: Vec<ReactionTerm>,
}

impl ParsedReaction {
    /// Net coefficient of every species of the reaction (products minus reactants),
    /// in order of first appearance. A species on both sides gets one summed entry.
    pub fn net_coefficients(&self) -> Vec<(String, f64)> {
        let mut net: Vec<(String, f64)> = Vec::new();
        let signed = self
            .reactants
            .iter()
            .map(|t| (t, -1.0))
            .chain(self.products.iter().map(|t| (t, 1.0)));
        for (term, sign) in signed {
            match net.iter_mut().find(|(name, _)| *name == term.species) {
                Some((_, value)) => *value += sign * term.coefficient,
                None => net.push((term.species.clone(), sign * term.coefficient)),
            }
        }
        net
    }
}

/// Splits a term into its optional coefficient and the species name.
/// "3*H2" -> (3.0, "H2"), "H2" -> (1.0, "H2")
pub fn parse_term(
    term: &str,
    reaction: &str,
    settings: &ParserSettings,
) -> Result<ReactionTerm, StoichError> {
    let term = term.trim();
    if term.is_empty() {
        return Err(StoichError::EmptyTerm {
            reaction: reaction.to_string(),
        });
    }
    let parts: Vec<&str> = term.split('*').collect();
    let (coefficient, species) = match parts.as_slice() {
        [species] => (1.0, species.trim()),
        [coefficient, species] => {
            let coefficient = coefficient.trim();
            if !COEFFICIENT_RE.is_match(coefficient) {
                return Err(StoichError::InvalidCoefficient {
                    term: term.to_string(),
                });
            }
            let value: f64 = coefficient
                .parse()
                .ok()
                .filter(|v: &f64| v.is_finite())
                .ok_or_else(|| StoichError::InvalidCoefficient {
                    term: term.to_string(),
                })?;
            (value, species.trim())
        }
        _ => {
            return Err(StoichError::InvalidCoefficient {
                term: term.to_string(),
            });
        }
    };
    let valid_name = if settings.strict_species_names {
        SPECIES_RE.is_match(species)
    } else {
        !species.is_empty()
    };
    if !valid_name {
        return Err(StoichError::InvalidSpecies {
            term: term.to_string(),
        });
    }
    debug!("term '{}': coefficient {}, species {}", term, coefficient, species);
    Ok(ReactionTerm {
        coefficient,
        species: species.to_string(),
    })
}

fn parse_side(
    side_str: &str,
    side: Side,
    reaction: &str,
    settings: &ParserSettings,
) -> Result<Vec<ReactionTerm>, StoichError> {
    if side_str.trim().is_empty() {
        if settings.allow_empty_side {
            return Ok(Vec::new());
        }
        return Err(StoichError::EmptySide {
            reaction: reaction.to_string(),
            side,
        });
    }
    side_str
        .split('+')
        .map(|term| parse_term(term, reaction, settings))
        .collect()
}

/// Parses one reaction equation "A + 2*B -> 1.5*C" into reactant and product terms.
pub fn parse_reaction(
    reaction: &str,
    settings: &ParserSettings,
) -> Result<ParsedReaction, StoichError> {
    settings.validate()?;
    let arrow = settings.arrow.trim();
    let found = reaction.matches(arrow).count();
    let Some((left, right)) = reaction.split_once(arrow).filter(|_| found == 1) else {
        return Err(StoichError::ArrowCount {
            reaction: reaction.to_string(),
            found,
        });
    };
    let reactants = parse_side(left, Side::Reactants, reaction, settings)?;
    let products = parse_side(right, Side::Products, reaction, settings)?;
    Ok(ParsedReaction {
        equation: reaction.trim().to_string(),
        reactants,
        products,
    })
}

/// Builds the stoichiometric matrix of a reaction set.
///
/// rows are species in order of first appearance, columns are reactions in input order.
/// Entry (i, j) is the net coefficient of species i in reaction j: negative for
/// consumption, positive for formation.
#[derive(Debug, Clone)]
pub struct StoichAnalyzer {
    pub reactions: Vec<String>,
    pub settings: ParserSettings,
    pub parsed_reactions: Vec<ParsedReaction>,
    // substances in order of discovery, substances[i] has row i
    pub substances: Vec<String>,
    pub species_index: HashMap<String, usize>,
    pub stoich_matrix: DMatrix<f64>,
    // unsigned coefficients of the left and right sides of each reaction
    pub reactants_matrix: DMatrix<f64>,
    pub products_matrix: DMatrix<f64>,
}

impl Default for StoichAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl StoichAnalyzer {
    pub fn new() -> Self {
        Self {
            reactions: Vec::new(),
            settings: ParserSettings::default(),
            parsed_reactions: Vec::new(),
            substances: Vec::new(),
            species_index: HashMap::new(),
            stoich_matrix: DMatrix::zeros(0, 0),
            reactants_matrix: DMatrix::zeros(0, 0),
            products_matrix: DMatrix::zeros(0, 0),
        }
    }

    pub fn with_reactions<S: AsRef<str>>(reactions: &[S]) -> Self {
        let mut analyzer = Self::new();
        analyzer.reactions = reactions.iter().map(|r| r.as_ref().to_string()).collect();
        analyzer
    }

    pub fn set_settings(&mut self, settings: ParserSettings) {
        self.settings = settings;
    }

    // parses all reactions and collects the substances in order of first appearance,
    // nothing is stored if any reaction is malformed
    fn search_substances(&mut self) -> Result<(), StoichError> {
        if let Err(e) = self.settings.validate() {
            error!("{}", e);
            return Err(e);
        }
        if self.reactions.is_empty() {
            error!("no reactions to analyse");
            return Err(StoichError::NoReactions);
        }
        let mut parsed_reactions = Vec::with_capacity(self.reactions.len());
        for reaction in &self.reactions {
            match parse_reaction(reaction, &self.settings) {
                Ok(parsed) => parsed_reactions.push(parsed),
                Err(e) => {
                    error!("{}", e);
                    return Err(e);
                }
            }
        }
        let mut substances: Vec<String> = Vec::new();
        let mut species_index: HashMap<String, usize> = HashMap::new();
        for parsed in &parsed_reactions {
            for term in parsed.reactants.iter().chain(parsed.products.iter()) {
                if !species_index.contains_key(&term.species) {
                    species_index.insert(term.species.clone(), substances.len());
                    substances.push(term.species.clone());
                }
            }
        }
        self.parsed_reactions = parsed_reactions;
        self.substances = substances;
        self.species_index = species_index;
        Ok(())
    }

    /// Fills the stoichiometric matrix and the reactant/product coefficient matrices.
    pub fn analyse_reactions(&mut self) -> Result<(), StoichError> {
        info!("______________BUILDING STOICHIOMETRIC MATRIX________");
        self.search_substances()?;
        let n_species = self.substances.len();
        let n_reactions = self.parsed_reactions.len();
        let mut stoich_matrix = DMatrix::zeros(n_species, n_reactions);
        let mut reactants_matrix = DMatrix::zeros(n_species, n_reactions);
        let mut products_matrix = DMatrix::zeros(n_species, n_reactions);
        for (j, parsed) in self.parsed_reactions.iter().enumerate() {
            for term in &parsed.reactants {
                let i = self.species_index[&term.species];
                reactants_matrix[(i, j)] += term.coefficient;
                stoich_matrix[(i, j)] -= term.coefficient;
            }
            for term in &parsed.products {
                let i = self.species_index[&term.species];
                products_matrix[(i, j)] += term.coefficient;
                stoich_matrix[(i, j)] += term.coefficient;
            }
        }
        self.stoich_matrix = stoich_matrix;
        self.reactants_matrix = reactants_matrix;
        self.products_matrix = products_matrix;
        info!(
            "{} species x {} reactions",
            self.stoich_matrix.nrows(),
            self.stoich_matrix.ncols()
        );
        info!("______________BUILDING STOICHIOMETRIC MATRIX ENDED________");
        Ok(())
    }

    pub fn pretty_print(&self) {
        stoich_table(&self.stoich_matrix, &self.substances).printstd();
    }
}

/// Stoichiometric matrix and species index of a reaction set, default parser settings.
///
/// ```
/// use ARTools::Kinetics::stoichiometry_matrix::build;
/// let (matrix, index) = build(&["N2 + 3*H2 -> 2*NH3"]).unwrap();
/// assert_eq!(matrix[(index["H2"], 0)], -3.0);
/// assert_eq!(matrix[(index["NH3"], 0)], 2.0);
/// ```
pub fn build<S: AsRef<str>>(
    reactions: &[S],
) -> Result<(DMatrix<f64>, HashMap<String, usize>), StoichError> {
    build_with_settings(reactions, &ParserSettings::default())
}

pub fn build_with_settings<S: AsRef<str>>(
    reactions: &[S],
    settings: &ParserSettings,
) -> Result<(DMatrix<f64>, HashMap<String, usize>), StoichError> {
    let mut analyzer = StoichAnalyzer::with_reactions(reactions);
    analyzer.set_settings(settings.clone());
    analyzer.analyse_reactions()?;
    Ok((analyzer.stoich_matrix, analyzer.species_index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_term() {
        let settings = ParserSettings::default();
        let term = parse_term(" 1.5*C ", "r", &settings).unwrap();
        assert_eq!(term.coefficient, 1.5);
        assert_eq!(term.species, "C");
        let term = parse_term("H2O", "r", &settings).unwrap();
        assert_eq!(term.coefficient, 1.0);
        assert_eq!(term.species, "H2O");
        let term = parse_term("2 * carbon_dioxide", "r", &settings).unwrap();
        assert_eq!(term.coefficient, 2.0);
        assert_eq!(term.species, "carbon_dioxide");
        let term = parse_term("0*X", "r", &settings).unwrap();
        assert_eq!(term.coefficient, 0.0);
    }

    #[test]
    fn test_parse_term_errors() {
        let settings = ParserSettings::default();
        assert!(matches!(
            parse_term("x*A", "r", &settings),
            Err(StoichError::InvalidCoefficient { .. })
        ));
        assert!(matches!(
            parse_term("-2*A", "r", &settings),
            Err(StoichError::InvalidCoefficient { .. })
        ));
        assert!(matches!(
            parse_term("2*3*A", "r", &settings),
            Err(StoichError::InvalidCoefficient { .. })
        ));
        assert!(matches!(
            parse_term("2*", "r", &settings),
            Err(StoichError::InvalidSpecies { .. })
        ));
        assert!(matches!(
            parse_term("ethylene oxide", "r", &settings),
            Err(StoichError::InvalidSpecies { .. })
        ));
        assert!(matches!(
            parse_term("   ", "r", &settings),
            Err(StoichError::EmptyTerm { .. })
        ));
    }

    #[test]
    fn test_relaxed_species_names() {
        let settings = ParserSettings {
            strict_species_names: false,
            ..ParserSettings::default()
        };
        let term = parse_term("2*H2O(g)", "r", &settings).unwrap();
        assert_eq!(term.species, "H2O(g)");
        assert_eq!(term.coefficient, 2.0);
    }

    #[test]
    fn test_parse_reaction() {
        let parsed = parse_reaction("A + 2*B -> 1.5*C", &ParserSettings::default()).unwrap();
        assert_eq!(parsed.equation, "A + 2*B -> 1.5*C");
        assert_eq!(parsed.reactants.len(), 2);
        assert_eq!(parsed.products.len(), 1);
        assert_eq!(parsed.reactants[1].species, "B");
        assert_eq!(parsed.reactants[1].coefficient, 2.0);
        assert_eq!(parsed.products[0].coefficient, 1.5);
    }

    #[test]
    fn test_arrow_count() {
        let settings = ParserSettings::default();
        match parse_reaction("A -> B -> C", &settings) {
            Err(StoichError::ArrowCount { found, .. }) => assert_eq!(found, 2),
            other => panic!("unexpected result {:?}", other),
        }
        match parse_reaction("A + B", &settings) {
            Err(StoichError::ArrowCount { found, .. }) => assert_eq!(found, 0),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_empty_side() {
        let settings = ParserSettings::default();
        assert!(matches!(
            parse_reaction("A ->", &settings),
            Err(StoichError::EmptySide {
                side: Side::Products,
                ..
            })
        ));
        assert!(matches!(
            parse_reaction(" -> B", &settings),
            Err(StoichError::EmptySide {
                side: Side::Reactants,
                ..
            })
        ));
        assert!(matches!(
            parse_reaction("A + -> B", &settings),
            Err(StoichError::EmptyTerm { .. })
        ));

        let relaxed = ParserSettings {
            allow_empty_side: true,
            ..ParserSettings::default()
        };
        let parsed = parse_reaction("A ->", &relaxed).unwrap();
        assert_eq!(parsed.reactants.len(), 1);
        assert!(parsed.products.is_empty());
    }

    #[test]
    fn test_custom_arrow() {
        let settings = ParserSettings {
            arrow: "=>".to_string(),
            ..ParserSettings::default()
        };
        let parsed = parse_reaction("A => 2*B", &settings).unwrap();
        assert_eq!(parsed.products[0].coefficient, 2.0);
        assert!(parse_reaction("A -> 2*B", &settings).is_err());
    }

    #[test]
    fn test_net_coefficients() {
        let parsed = parse_reaction("A + B -> 2*B", &ParserSettings::default()).unwrap();
        let net = parsed.net_coefficients();
        assert_eq!(net, vec![("A".to_string(), -1.0), ("B".to_string(), 1.0)]);
    }

    #[test]
    fn test_oversized_coefficient_rejected() {
        let reaction = format!("{}*A -> B", "9".repeat(400));
        assert!(matches!(
            build(&[reaction]),
            Err(StoichError::InvalidCoefficient { .. })
        ));
    }

    #[test]
    fn test_settings_built_in_code_are_checked() {
        let plus_arrow = ParserSettings {
            arrow: "+".into(),
            ..ParserSettings::default()
        };
        assert!(matches!(
            build_with_settings(&["A + B"], &plus_arrow),
            Err(StoichError::InvalidSettings(_))
        ));
        assert!(matches!(
            parse_reaction("A + B", &plus_arrow),
            Err(StoichError::InvalidSettings(_))
        ));
        let empty_arrow = ParserSettings {
            arrow: String::new(),
            ..ParserSettings::default()
        };
        assert!(matches!(
            build_with_settings(&["A -> B"], &empty_arrow),
            Err(StoichError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_reanalysis_replaces_all_results() {
        let mut analyzer = StoichAnalyzer::with_reactions(&["A -> B"]);
        analyzer.analyse_reactions().unwrap();
        analyzer.reactions = vec!["X + Y -> Z".to_string(), "Z -> W".to_string()];
        analyzer.analyse_reactions().unwrap();
        assert_eq!(analyzer.substances, vec!["X", "Y", "Z", "W"]);
        assert_eq!(analyzer.species_index.len(), 4);
        assert_eq!(analyzer.stoich_matrix.shape(), (4, 2));
        assert_eq!(analyzer.reactants_matrix.shape(), (4, 2));
        assert_eq!(analyzer.products_matrix.shape(), (4, 2));
    }

    #[test]
    fn test_is_syntax_error() {
        let err = build(&["A -> B -> C"]).unwrap_err();
        assert!(err.is_syntax_error());
        assert!(!StoichError::NoReactions.is_syntax_error());
        let io = StoichError::from(std::io::Error::other("disk"));
        assert!(!io.is_syntax_error());
    }
}
